use super::*;

fn doc_with_root() -> SceneDocument {
    let mut doc = SceneDocument::new("uid://test");
    doc.add_node(SceneNode::typed("Root", "Node2D"));
    doc
}

#[test]
fn ids_are_sequential_across_ext_and_sub_resources() {
    let mut doc = doc_with_root();
    let a = doc.add_ext_resource("PackedScene", "res://a.tscn", None);
    let b = doc.add_ext_resource("Texture2D", "res://b.svg", None);
    let c = doc.add_sub_resource("SpriteFrames", vec![]);
    assert_eq!((a, b, c), (ResourceId(1), ResourceId(2), ResourceId(3)));
    assert_eq!(doc.load_steps(), 3);
    assert_eq!(doc.sub_resource(c).unwrap().key(), "SpriteFrames_3");
    assert_eq!(doc.ext_resource(b).unwrap().path, "res://b.svg");
    doc.validate().unwrap();
}

#[test]
fn node_paths_follow_parents() {
    let root = SceneNode::typed("Level", "Node2D");
    let child = SceneNode::typed("Platforms", "Node2D").under(".");
    let grandchild = SceneNode::typed("Ground", "Node2D").under("Platforms");
    assert_eq!(root.path(), ".");
    assert_eq!(child.path(), "Platforms");
    assert_eq!(grandchild.path(), "Platforms/Ground");
}

#[test]
fn dangling_reference_is_rejected() {
    let mut doc = doc_with_root();
    doc.add_node(SceneNode::instance("Player", ResourceId(4)).under("."));
    let err = doc.validate().unwrap_err();
    assert!(err.to_string().contains("undeclared ExtResource id 4"));
}

#[test]
fn sub_resource_cannot_reference_later_sub_resource() {
    let mut doc = doc_with_root();
    doc.add_sub_resource(
        "SpriteFrames",
        vec![("next".to_owned(), Variant::SubResource(ResourceId(2)))],
    );
    doc.add_sub_resource("SpriteFrames", vec![]);
    assert!(doc.validate().is_err());
}

#[test]
fn nested_references_are_checked() {
    let mut doc = doc_with_root();
    doc.add_sub_resource(
        "SpriteFrames",
        vec![(
            "animations".to_owned(),
            Variant::Array(vec![Variant::Dictionary(vec![(
                "texture".to_owned(),
                Variant::ExtResource(ResourceId(9)),
            )])]),
        )],
    );
    assert!(doc.validate().is_err());
}

#[test]
fn references_must_target_the_matching_table() {
    let mut doc = doc_with_root();
    let script = doc.add_ext_resource("Script", "res://scripts/level_manager.gd", None);
    doc.add_node(
        SceneNode::override_of("Sprite")
            .under(".")
            .with("sprite_frames", Variant::SubResource(script)),
    );
    let err = doc.validate().unwrap_err();
    assert!(err.to_string().contains("undeclared SubResource id 1"), "{err}");
    assert!(render_scene_is_rejected(&doc));

    let mut doc = doc_with_root();
    let frames = doc.add_sub_resource("SpriteFrames", vec![]);
    doc.add_node(
        SceneNode::override_of("Sprite")
            .under(".")
            .with("texture", Variant::ExtResource(frames)),
    );
    let err = doc.validate().unwrap_err();
    assert!(err.to_string().contains("undeclared ExtResource id 1"), "{err}");
}

#[test]
fn instances_must_name_a_packed_scene() {
    let mut doc = doc_with_root();
    let script = doc.add_ext_resource("Script", "res://scripts/level_manager.gd", None);
    doc.add_node(SceneNode::instance("Thing", script).under("."));
    let err = doc.validate().unwrap_err();
    assert!(err.to_string().contains("expected PackedScene"), "{err}");
    assert!(render_scene_is_rejected(&doc));

    let mut doc = doc_with_root();
    let frames = doc.add_sub_resource("SpriteFrames", vec![]);
    doc.add_node(SceneNode::instance("Thing", frames).under("."));
    assert!(doc.validate().is_err());

    let mut doc = doc_with_root();
    let scene = doc.add_ext_resource("PackedScene", "res://scenes/player.tscn", None);
    doc.add_node(SceneNode::instance("Player", scene).under("."));
    doc.validate().unwrap();
}

fn render_scene_is_rejected(doc: &SceneDocument) -> bool {
    crate::render_scene(doc).is_err()
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut doc = doc_with_root();
    doc.add_ext_resource("PackedScene", "res://a.tscn", None);
    doc.ext_resources.push(ExtResource {
        id: ResourceId(1),
        kind: "PackedScene".to_owned(),
        path: "res://b.tscn".to_owned(),
        uid: None,
    });
    assert!(doc.validate().unwrap_err().to_string().contains("duplicate"));
}

#[test]
fn unknown_parent_and_misplaced_root_are_rejected() {
    let mut doc = doc_with_root();
    doc.add_node(SceneNode::typed("Camera2D", "Camera2D").under("Player"));
    assert!(doc.validate().unwrap_err().to_string().contains("unknown parent"));

    let mut doc = doc_with_root();
    doc.add_node(SceneNode::typed("Other", "Node2D"));
    assert!(doc.validate().is_err());

    let mut doc = SceneDocument::new("uid://x");
    doc.add_node(SceneNode::typed("Child", "Node2D").under("."));
    assert!(doc.validate().is_err());
}

#[test]
fn property_lookup() {
    let node = SceneNode::typed("NPC", "Node2D")
        .with("message", "Hi!")
        .with("level_index", 2i64);
    assert_eq!(node.property("message").and_then(Variant::as_str), Some("Hi!"));
    assert_eq!(node.property("level_index"), Some(&Variant::Int(2)));
    assert_eq!(node.property("missing"), None);
}
