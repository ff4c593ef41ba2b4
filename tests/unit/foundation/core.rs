use super::*;

#[test]
fn inset_shrinks_every_side() {
    let r = inset(Rect::new(0.0, 0.0, 1152.0, 648.0), 150.0);
    assert_eq!(r, Rect::new(150.0, 150.0, 1002.0, 498.0));
}

#[test]
fn oversized_margin_collapses_to_center() {
    let r = inset(Rect::new(0.0, 0.0, 200.0, 100.0), 150.0);
    assert_eq!(r, Rect::new(100.0, 50.0, 100.0, 50.0));
}

#[test]
fn clamp_point_is_inclusive() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert_eq!(clamp_point(Point::new(0.0, 25.0), r), Point::new(10.0, 20.0));
    assert_eq!(clamp_point(Point::new(15.0, 15.0), r), Point::new(15.0, 15.0));
}
