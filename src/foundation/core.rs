pub use kurbo::{Point, Rect, Size, Vec2};

/// Returns `rect` shrunk by `margin` on every side.
///
/// A margin larger than half of a dimension collapses that axis onto the
/// rectangle's center instead of producing an inverted rectangle.
pub fn inset(rect: Rect, margin: f64) -> Rect {
    let center = rect.center();
    let x0 = (rect.x0 + margin).min(center.x);
    let y0 = (rect.y0 + margin).min(center.y);
    let x1 = (rect.x1 - margin).max(center.x);
    let y1 = (rect.y1 - margin).max(center.y);
    Rect::new(x0, y0, x1, y1)
}

/// Clamps `p` into `rect` (inclusive on every edge).
pub fn clamp_point(p: Point, rect: Rect) -> Point {
    Point::new(p.x.clamp(rect.x0, rect.x1), p.y.clamp(rect.y0, rect.y1))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
