use crate::foundation::core::{Point, Rect};

/// Width of a side-scrolling level; the ground spans all of it.
pub const LEVEL_WIDTH: f64 = 3000.0;

const GROUND_Y: f64 = 600.0;
const GROUND_HEIGHT: f64 = 48.0;
const MAX_JUMP_PLATFORMS: usize = 8;
const EXTRA_PLATFORMS: usize = 2;
const FIRST_PLATFORM_X: f64 = 200.0;
const PLATFORM_STEP_X: f64 = 400.0;
const PLATFORM_WIDTH: f64 = 200.0;
const PLATFORM_HEIGHT: f64 = 40.0;
const PLATFORM_TIERS: [f64; 3] = [450.0, 350.0, 250.0];

const COLLECTIBLE_LIFT: f64 = 100.0;
const OVERFLOW_JITTER: f64 = 60.0;
const FALLBACK_X: f64 = 300.0;
const FALLBACK_STEP_X: f64 = 200.0;
const FALLBACK_Y: f64 = 550.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    /// The floor spanning the whole level.
    Ground,
    /// An elevated jump platform.
    Platform,
}

/// Axis-aligned platform; `(x, y)` is its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn is_ground(&self) -> bool {
        self.kind == PlatformKind::Ground
    }
}

/// Ground first, then `min(collectibles + 2, 8)` jump platforms when there is
/// anything to collect.
///
/// Jump platforms step 400 units to the right and cycle through three heights.
pub fn generate_platforms(collectible_count: usize) -> Vec<Platform> {
    let mut out = vec![Platform {
        x: 0.0,
        y: GROUND_Y,
        width: LEVEL_WIDTH,
        height: GROUND_HEIGHT,
        kind: PlatformKind::Ground,
    }];
    if collectible_count == 0 {
        return out;
    }

    let jump_count = collectible_count
        .saturating_add(EXTRA_PLATFORMS)
        .min(MAX_JUMP_PLATFORMS);
    out.extend((0..jump_count).map(|i| Platform {
        x: FIRST_PLATFORM_X + i as f64 * PLATFORM_STEP_X,
        y: PLATFORM_TIERS[i % PLATFORM_TIERS.len()],
        width: PLATFORM_WIDTH,
        height: PLATFORM_HEIGHT,
        kind: PlatformKind::Platform,
    }));
    out
}

/// Puts `count` collectibles above the jump platforms, round-robin.
///
/// Without jump platforms the items line up above the ground instead. When
/// there are more items than platforms every item is shifted by
/// `(round - 0.5) * 60` so that items sharing a platform do not overlap.
pub fn place_on_platforms(count: usize, platforms: &[Platform]) -> Vec<Point> {
    let jump: Vec<&Platform> = platforms.iter().filter(|p| !p.is_ground()).collect();
    if jump.is_empty() {
        return (0..count)
            .map(|i| Point::new(FALLBACK_X + i as f64 * FALLBACK_STEP_X, FALLBACK_Y))
            .collect();
    }

    let n = jump.len();
    let overflow = count > n;
    (0..count)
        .map(|i| {
            let platform = jump[i % n];
            let jitter = if overflow {
                ((i / n) as f64 - 0.5) * OVERFLOW_JITTER
            } else {
                0.0
            };
            Point::new(
                platform.center_x() + jitter,
                platform.y - COLLECTIBLE_LIFT,
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/platforms.rs"]
mod tests;
