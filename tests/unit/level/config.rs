use super::*;
use serde_json::json;

fn level_json() -> serde_json::Value {
    json!({
        "name": "meadow",
        "npc": { "enabled": true, "type": "merchant", "message": "Hi!", "svg": "" },
        "collectibles": 6,
        "target_score": 60,
        "background_color": "#1a1a1a",
        "layout": "circle"
    })
}

#[test]
fn parses_level_schema() {
    let level: LevelConfig = serde_json::from_value(level_json()).unwrap();
    assert_eq!(level.name, "meadow");
    assert_eq!(level.collectible_count, 6);
    assert_eq!(level.layout, LayoutKind::Circle);
    let npc = level.active_npc().unwrap();
    assert_eq!(npc.kind, "merchant");
    assert_eq!(npc.svg_ref(), None);
    level.validate().unwrap();
}

#[test]
fn unknown_layout_falls_back_to_grid() {
    let mut v = level_json();
    v["layout"] = json!("zigzag");
    let level: LevelConfig = serde_json::from_value(v).unwrap();
    assert_eq!(level.layout, LayoutKind::Grid);
    assert_eq!(LayoutKind::from_name("SCATTER"), LayoutKind::Scatter);
    assert_eq!(LayoutKind::lookup("zigzag"), None);
}

#[test]
fn negative_collectibles_and_missing_fields_are_errors() {
    let mut v = level_json();
    v["collectibles"] = json!(-1);
    assert!(serde_json::from_value::<LevelConfig>(v).is_err());

    let mut v = level_json();
    v.as_object_mut().unwrap().remove("target_score");
    assert!(serde_json::from_value::<LevelConfig>(v).is_err());
}

#[test]
fn bad_color_fails_validation_with_level_name() {
    let mut v = level_json();
    v["background_color"] = json!("#12");
    let level: LevelConfig = serde_json::from_value(v).unwrap();
    let err = level.validate().unwrap_err();
    assert!(err.to_string().contains("level 'meadow'"));
}

#[test]
fn disabled_npc_is_not_active() {
    let mut v = level_json();
    v["npc"]["enabled"] = json!(false);
    let level: LevelConfig = serde_json::from_value(v).unwrap();
    assert!(level.active_npc().is_none());
}

#[test]
fn level_set_rejects_duplicate_names() {
    let level: LevelConfig = serde_json::from_value(level_json()).unwrap();
    let set = LevelSet {
        levels: vec![level.clone(), level],
    };
    assert!(set.any_npc());
    assert!(set.validate().unwrap_err().to_string().contains("duplicate"));
}

#[test]
fn layout_serializes_lowercase() {
    assert_eq!(
        serde_json::to_value(LayoutKind::Diagonal).unwrap(),
        json!("diagonal")
    );
}
