use super::*;

#[test]
fn no_collectibles_means_ground_only() {
    let platforms = generate_platforms(0);
    assert_eq!(platforms.len(), 1);
    assert_eq!(
        platforms[0],
        Platform {
            x: 0.0,
            y: 600.0,
            width: 3000.0,
            height: 48.0,
            kind: PlatformKind::Ground,
        }
    );
}

#[test]
fn jump_platforms_cycle_three_tiers_and_cap_at_eight() {
    for n in [1usize, 3, 6, 7, 50] {
        let platforms = generate_platforms(n);
        assert_eq!(platforms.len(), 1 + (n + 2).min(8), "n={n}");
        assert!(platforms[0].is_ground());
        for (i, p) in platforms[1..].iter().enumerate() {
            assert_eq!(p.kind, PlatformKind::Platform);
            assert_eq!(p.y, [450.0, 350.0, 250.0][i % 3]);
            assert_eq!(p.x, 200.0 + 400.0 * i as f64);
            assert_eq!((p.width, p.height), (200.0, 40.0));
        }
    }
}

#[test]
fn empty_platform_list_uses_ground_line() {
    let points = place_on_platforms(3, &generate_platforms(0));
    assert_eq!(
        points,
        vec![
            Point::new(300.0, 550.0),
            Point::new(500.0, 550.0),
            Point::new(700.0, 550.0),
        ]
    );
    assert_eq!(place_on_platforms(2, &[]).len(), 2);
}

#[test]
fn collectibles_hover_over_platform_centers() {
    let platforms = generate_platforms(2);
    let points = place_on_platforms(2, &platforms);
    assert_eq!(points, vec![Point::new(300.0, 350.0), Point::new(700.0, 250.0)]);
}

#[test]
fn no_duplicate_positions_when_platforms_suffice() {
    let platforms = generate_platforms(6);
    let jump = platforms.len() - 1;
    for count in 0..=jump {
        let points = place_on_platforms(count, &platforms);
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn overflow_items_are_jittered_apart() {
    let platforms = generate_platforms(1);
    let jump = platforms.len() - 1;
    assert_eq!(jump, 3);
    let points = place_on_platforms(6, &platforms);
    assert_eq!(points.len(), 6);
    assert_eq!(points[0], Point::new(300.0 - 30.0, 350.0));
    assert_eq!(points[3], Point::new(300.0 + 30.0, 350.0));
    assert_ne!(points[0], points[3]);
}
