use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_assets").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("project/assets")).unwrap();
    dir
}

#[test]
fn resolves_relative_to_project_parent() {
    let dir = scratch("parent_relative");
    std::fs::write(dir.join("hero.svg"), "<svg/>").unwrap();
    let project = dir.join("project");
    assert_eq!(
        resolve_asset_path("hero.svg", &project),
        Some(dir.join("hero.svg"))
    );
    assert_eq!(resolve_asset_path("nope.svg", &project), None);
    assert_eq!(resolve_asset_path("  ", &project), None);
}

#[test]
fn missing_custom_sprite_falls_back_to_placeholder() {
    let dir = scratch("placeholder");
    let project = dir.join("project");
    let dest = project.join("assets/player.svg");
    let source = install_sprite(Some("missing.svg"), None, &project, &dest).unwrap();
    assert_eq!(source, SpriteSource::Placeholder);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), DEFAULT_SPRITE_SVG);
}

#[test]
fn fallback_file_is_copied_before_placeholder() {
    let dir = scratch("fallback");
    let project = dir.join("project");
    let player = project.join("assets/player.svg");
    std::fs::write(&player, "<svg id=\"player\"/>").unwrap();
    let dest = project.join("assets/npc_level_1.svg");
    let source = install_sprite(None, Some(&player), &project, &dest).unwrap();
    assert_eq!(source, SpriteSource::Copied(player.clone()));
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "<svg id=\"player\"/>");
}

#[test]
fn custom_sprite_wins() {
    let dir = scratch("custom");
    std::fs::write(dir.join("npc.svg"), "<svg id=\"npc\"/>").unwrap();
    let project = dir.join("project");
    let dest = project.join("assets/npc_level_1.svg");
    let source = install_sprite(Some("npc.svg"), None, &project, &dest).unwrap();
    assert!(matches!(source, SpriteSource::Custom(_)));
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "<svg id=\"npc\"/>");
}

#[test]
fn prunes_only_existing_npc_templates() {
    let dir = scratch("prune");
    let project = dir.join("project");
    std::fs::create_dir_all(project.join("scripts")).unwrap();
    std::fs::write(project.join("scripts/npc.gd"), "extends Node2D").unwrap();
    std::fs::write(project.join("assets/npc.svg"), "<svg/>").unwrap();
    let removed = prune_npc_templates(&project).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(!project.join("scripts/npc.gd").exists());
    assert!(prune_npc_templates(&project).unwrap().is_empty());
}
