use super::*;

#[test]
fn dark_gray_normalizes_to_point_one_oh_two() {
    let c = Rgb8::from_hex("1a1a1a").unwrap().normalized();
    for ch in [c.r, c.g, c.b] {
        assert!((ch - 0.102).abs() <= 0.001, "channel {ch}");
    }
    assert_eq!(c.a, 1.0);
}

#[test]
fn accepts_hash_prefix_and_mixed_case() {
    assert_eq!(Rgb8::from_hex("#FFa500").unwrap(), Rgb8::new(255, 165, 0));
}

#[test]
fn rejects_wrong_length_and_non_hex() {
    for bad in ["", "#fff", "1a1a1a1a", "zzzzzz", "#12345g", "ééé"] {
        let err = Rgb8::from_hex(bad).unwrap_err();
        assert!(matches!(err, LevelError::Validation(_)), "{bad}");
    }
}
