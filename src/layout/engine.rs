use std::f64::consts::TAU;

use rand::Rng;

use crate::{
    foundation::core::{Point, Rect, Size, clamp_point, inset},
    foundation::error::{LevelError, LevelResult},
    level::config::LayoutKind,
};

/// Default viewport of a generated project.
pub const DEFAULT_SCREEN: Size = Size::new(1152.0, 648.0);
/// Distance kept free on every screen edge.
pub const DEFAULT_MARGIN: f64 = 150.0;

const GRID_MAX_COLUMNS: usize = 4;
const CIRCLE_RADIUS_DIVISOR: f64 = 2.5;
const CORNER_INSET: f64 = 50.0;
const CORNER_GRID_COLUMNS: usize = 3;
const CORNER_GRID_STEP_X: f64 = 200.0;
const CORNER_GRID_STEP_Y: f64 = 150.0;
const RANDOM_MIN_SPACING: f64 = 120.0;
const SCATTER_MIN_SPACING: f64 = 180.0;
const MAX_ATTEMPTS: usize = 100;

/// Screen geometry every layout strategy works inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
    pub bounds: Size,
    pub margin: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            bounds: DEFAULT_SCREEN,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl LayoutSettings {
    pub fn new(bounds: Size, margin: f64) -> LevelResult<Self> {
        if !(bounds.width.is_finite() && bounds.height.is_finite())
            || bounds.width <= 0.0
            || bounds.height <= 0.0
        {
            return Err(LevelError::layout(format!(
                "layout bounds must be positive and finite, got {}x{}",
                bounds.width, bounds.height
            )));
        }
        if !margin.is_finite() || margin < 0.0 {
            return Err(LevelError::layout(format!(
                "layout margin must be >= 0, got {margin}"
            )));
        }
        Ok(Self { bounds, margin })
    }

    pub fn screen(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.bounds)
    }

    /// The screen minus the margin on every side.
    pub fn safe_rect(&self) -> Rect {
        inset(self.screen(), self.margin)
    }
}

/// Places `count` items on one screen according to `layout`.
///
/// The result always has exactly `count` entries, all inside
/// [`LayoutSettings::safe_rect`]. Only [`LayoutKind::Random`] and
/// [`LayoutKind::Scatter`] consume `rng`.
pub fn generate_positions<R: Rng + ?Sized>(
    count: usize,
    layout: LayoutKind,
    settings: &LayoutSettings,
    rng: &mut R,
) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let safe = settings.safe_rect();
    match layout {
        LayoutKind::Grid => grid(count, safe),
        LayoutKind::Circle => circle(count, safe),
        LayoutKind::Horizontal => line(count, safe, Axis::Horizontal, settings.screen()),
        LayoutKind::Vertical => line(count, safe, Axis::Vertical, settings.screen()),
        LayoutKind::Diagonal => diagonal(count, safe),
        LayoutKind::Corners => corners(count, safe, settings.screen()),
        LayoutKind::Random => spaced_sample(count, safe, RANDOM_MIN_SPACING, None, rng),
        LayoutKind::Scatter => spaced_sample(
            count,
            safe,
            SCATTER_MIN_SPACING,
            Some(RANDOM_MIN_SPACING),
            rng,
        ),
    }
}

/// Column count for the grid layout: the smallest square that fits, capped at four.
pub fn grid_columns(count: usize) -> usize {
    let mut cols = 1;
    while cols * cols < count && cols < GRID_MAX_COLUMNS {
        cols += 1;
    }
    cols
}

fn grid(count: usize, safe: Rect) -> Vec<Point> {
    let cols = grid_columns(count);
    let rows = count.div_ceil(cols);
    let step_x = safe.width() / (cols + 1) as f64;
    let step_y = safe.height() / (rows + 1) as f64;
    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            Point::new(
                safe.x0 + (col + 1) as f64 * step_x,
                safe.y0 + (row + 1) as f64 * step_y,
            )
        })
        .collect()
}

fn circle(count: usize, safe: Rect) -> Vec<Point> {
    let center = safe.center();
    let radius = safe.width().min(safe.height()) / CIRCLE_RADIUS_DIVISOR;
    let step = TAU / count as f64;
    (0..count)
        .map(|i| {
            let angle = i as f64 * step;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn line(count: usize, safe: Rect, axis: Axis, screen: Rect) -> Vec<Point> {
    let mid = screen.center();
    (0..count)
        .map(|i| {
            let t = (i + 1) as f64 / (count + 1) as f64;
            let p = match axis {
                Axis::Horizontal => Point::new(safe.x0 + t * safe.width(), mid.y),
                Axis::Vertical => Point::new(mid.x, safe.y0 + t * safe.height()),
            };
            clamp_point(p, safe)
        })
        .collect()
}

fn diagonal(count: usize, safe: Rect) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = (i + 1) as f64 / (count + 1) as f64;
            Point::new(safe.x0 + t * safe.width(), safe.y0 + t * safe.height())
        })
        .collect()
}

fn corners(count: usize, safe: Rect, screen: Rect) -> Vec<Point> {
    let fixed = [
        Point::new(safe.x0 + CORNER_INSET, safe.y0 + CORNER_INSET),
        Point::new(safe.x1 - CORNER_INSET, safe.y0 + CORNER_INSET),
        Point::new(safe.x0 + CORNER_INSET, safe.y1 - CORNER_INSET),
        Point::new(safe.x1 - CORNER_INSET, safe.y1 - CORNER_INSET),
    ];
    let mut out: Vec<Point> = fixed
        .into_iter()
        .take(count)
        .map(|p| clamp_point(p, safe))
        .collect();

    let rest = count.saturating_sub(fixed.len());
    if rest == 0 {
        return out;
    }

    // Remainder block is centered on the screen, not on the safe area.
    let cols = rest.min(CORNER_GRID_COLUMNS);
    let rows = rest.div_ceil(cols);
    let center = screen.center();
    let half_cols = (cols - 1) as f64 / 2.0;
    let half_rows = (rows - 1) as f64 / 2.0;
    out.extend((0..rest).map(|i| {
        let col = (i % cols) as f64;
        let row = (i / cols) as f64;
        let p = Point::new(
            center.x + (col - half_cols) * CORNER_GRID_STEP_X,
            center.y + (row - half_rows) * CORNER_GRID_STEP_Y,
        );
        clamp_point(p, safe)
    }));
    out
}

/// Rejection sampling with a minimum pairwise distance.
///
/// A point that cannot be placed within `MAX_ATTEMPTS` draws is accepted
/// anyway. With `degraded_spacing` set, the first such failure also lowers
/// the spacing for every later point. Only the first failure of a call is
/// logged at `warn`.
fn spaced_sample<R: Rng + ?Sized>(
    count: usize,
    safe: Rect,
    min_spacing: f64,
    degraded_spacing: Option<f64>,
    rng: &mut R,
) -> Vec<Point> {
    let mut spacing = min_spacing;
    let mut degraded = false;
    let mut out = Vec::<Point>::with_capacity(count);
    for idx in 0..count {
        let mut candidate = uniform_point(safe, rng);
        let mut attempts = 1;
        while attempts < MAX_ATTEMPTS && !far_enough(&out, candidate, spacing) {
            candidate = uniform_point(safe, rng);
            attempts += 1;
        }
        if !far_enough(&out, candidate, spacing) {
            if degraded {
                tracing::debug!(idx, spacing, "accepting overlap");
            } else {
                tracing::warn!(idx, spacing, "spacing not satisfiable, accepting overlaps");
                degraded = true;
            }
            if let Some(floor) = degraded_spacing {
                spacing = spacing.min(floor);
            }
        }
        out.push(candidate);
    }
    out
}

fn far_enough(placed: &[Point], candidate: Point, spacing: f64) -> bool {
    placed.iter().all(|p| p.distance(candidate) >= spacing)
}

fn uniform_point<R: Rng + ?Sized>(safe: Rect, rng: &mut R) -> Point {
    fn axis<R: Rng + ?Sized>(lo: f64, hi: f64, rng: &mut R) -> f64 {
        if hi > lo { rng.gen_range(lo..=hi) } else { lo }
    }
    Point::new(
        axis(safe.x0, safe.x1, rng),
        axis(safe.y0, safe.y1, rng),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
