use super::*;
use crate::{
    foundation::color::Rgb8,
    scene::model::{SceneNode, Variant},
};

fn sample_doc() -> SceneDocument {
    let mut doc = SceneDocument::new("uid://abc");
    let player = doc.add_ext_resource("PackedScene", "res://scenes/player.tscn", None);
    let tex = doc.add_ext_resource(
        "Texture2D",
        "res://assets/npc.svg",
        Some("uid://tex".to_owned()),
    );
    let frames = doc.add_sub_resource(
        "SpriteFrames",
        vec![(
            "animations".to_owned(),
            Variant::Array(vec![Variant::Dictionary(vec![
                ("texture".to_owned(), Variant::ExtResource(tex)),
                ("name".to_owned(), Variant::string_name("idle")),
                ("speed".to_owned(), Variant::Float(5.0)),
            ])]),
        )],
    );
    doc.add_node(SceneNode::typed("Level", "Node2D").with("target_score", 40i64));
    doc.add_node(
        SceneNode::typed("Background", "ColorRect")
            .under(".")
            .with("color", Rgb8::from_hex("1a1a1a").unwrap().normalized()),
    );
    doc.add_node(
        SceneNode::instance("Player", player)
            .under(".")
            .with("position", Variant::vector2(100.0, 500.5)),
    );
    doc.add_node(
        SceneNode::override_of("Sprite")
            .under("Player")
            .with("sprite_frames", Variant::SubResource(frames))
            .with("message", "say \"hi\""),
    );
    doc
}

#[test]
fn renders_expected_text() {
    let text = render_scene(&sample_doc()).unwrap();
    let expected = r#"[gd_scene load_steps=3 format=3 uid="uid://abc"]

[ext_resource type="PackedScene" path="res://scenes/player.tscn" id="1"]
[ext_resource type="Texture2D" uid="uid://tex" path="res://assets/npc.svg" id="2"]

[sub_resource type="SpriteFrames" id="SpriteFrames_3"]
animations = [{
"texture": ExtResource("2"),
"name": &"idle",
"speed": 5.0
}]

[node name="Level" type="Node2D"]
target_score = 40

[node name="Background" type="ColorRect" parent="."]
color = Color(0.102, 0.102, 0.102, 1)

[node name="Player" parent="." instance=ExtResource("1")]
position = Vector2(100, 500.5)

[node name="Sprite" parent="Player"]
sprite_frames = SubResource("SpriteFrames_3")
message = "say \"hi\""
"#;
    assert_eq!(text, expected);
}

#[test]
fn rendering_is_deterministic() {
    let a = render_scene(&sample_doc()).unwrap();
    let b = render_scene(&sample_doc()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_documents_are_not_rendered() {
    let mut doc = sample_doc();
    doc.add_node(SceneNode::instance("Ghost", ResourceId(42)).under("."));
    assert!(render_scene(&doc).is_err());
}

#[test]
fn float_formatting() {
    assert_eq!(float(5.0), "5.0");
    assert_eq!(float(0.25), "0.25");
    assert_eq!(float(-0.0), "0.0");
    assert_eq!(real(1500.0), "1500");
    assert_eq!(real(-0.0), "0");
}

#[test]
fn sub_resource_keys_resolve_only_against_sub_resources() {
    let doc = sample_doc();
    assert_eq!(sub_key(&doc, ResourceId(3)).unwrap(), "SpriteFrames_3");
    let err = sub_key(&doc, ResourceId(1)).unwrap_err();
    assert!(err.to_string().contains("no declared sub-resource"), "{err}");
}
