use sha2::Digest as _;

use crate::{
    foundation::core::{Point, Size},
    foundation::error::LevelResult,
    layout::platforms::{Platform, PlatformKind},
    level::config::{LevelConfig, NpcConfig},
    scene::model::{ResourceId, SceneDocument, SceneNode, Variant},
};

/// Size of the canonical platform scene; platform nodes are scaled from it.
pub const PLATFORM_ASSET_SIZE: Size = Size::new(200.0, 40.0);

const NPC_ANIMATIONS: [&str; 2] = ["idle", "talking"];
const NPC_ANIMATION_SPEED: f64 = 5.0;
const BACKGROUND_Z_INDEX: i64 = -10;
const MOUSE_FILTER_IGNORE: i64 = 2;

/// Resource paths (inside the generated project) every level scene points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    pub player_scene: String,
    pub collectible_scene: String,
    pub manager_script: String,
    pub platform_scene: String,
    pub npc_scene: String,
    pub ui_scene: String,
    /// Directory holding the per-level NPC textures.
    pub assets_dir: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            player_scene: "res://scenes/player.tscn".to_owned(),
            collectible_scene: "res://scenes/collectible.tscn".to_owned(),
            manager_script: "res://scripts/level_manager.gd".to_owned(),
            platform_scene: "res://scenes/platform.tscn".to_owned(),
            npc_scene: "res://scenes/npc.tscn".to_owned(),
            ui_scene: "res://scenes/ui.tscn".to_owned(),
            assets_dir: "res://assets".to_owned(),
        }
    }
}

/// Fixed scene parameters shared by every level of a project.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneProfile {
    pub paths: ResourcePaths,
    pub viewport: Size,
    pub player_spawn: Point,
    pub npc_spawn: Point,
    pub camera_smoothing_speed: f64,
}

impl Default for SceneProfile {
    fn default() -> Self {
        Self {
            paths: ResourcePaths::default(),
            viewport: crate::layout::engine::DEFAULT_SCREEN,
            player_spawn: Point::new(100.0, 500.0),
            npc_spawn: Point::new(700.0, 536.0),
            camera_smoothing_speed: 5.0,
        }
    }
}

/// File name of the NPC texture of the 1-based level `level_index`.
pub fn npc_texture_file_name(level_index: usize) -> String {
    format!("npc_level_{level_index}.svg")
}

/// Stable scene uid derived from the level name.
pub fn scene_uid(level_name: &str) -> String {
    let digest = sha2::Sha256::digest(level_name.as_bytes());
    let mut out = String::with_capacity("uid://".len() + 12);
    out.push_str("uid://");
    for b in digest.iter().take(6) {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

struct LevelResources {
    player: ResourceId,
    collectible: ResourceId,
    script: ResourceId,
    platform: ResourceId,
    npc: Option<NpcResources>,
    ui: ResourceId,
}

struct NpcResources {
    scene: ResourceId,
    frames: ResourceId,
}

/// Builds the scene of one level.
///
/// `platforms` may be empty (top-down levels); `collectibles` are already
/// placed. `level_index` is 1-based. A malformed background color is an
/// error.
#[tracing::instrument(skip(config, platforms, collectibles, profile), fields(level = %config.name))]
pub fn compose_level(
    config: &LevelConfig,
    platforms: &[Platform],
    collectibles: &[Point],
    level_index: usize,
    profile: &SceneProfile,
) -> LevelResult<SceneDocument> {
    let background = config.background()?;
    let play_width = platforms
        .iter()
        .find(|p| p.kind == PlatformKind::Ground)
        .map(|p| p.width)
        .unwrap_or(profile.viewport.width);

    let mut doc = SceneDocument::new(scene_uid(&config.name));
    let res = declare_resources(&mut doc, config.active_npc(), level_index, &profile.paths);

    doc.add_node(
        SceneNode::typed("Level", "Node2D")
            .with("script", Variant::ExtResource(res.script))
            .with("level_name", config.name.as_str())
            .with("level_index", level_index as i64)
            .with("target_score", config.target_score)
            .with("total_collectibles", collectibles.len() as i64),
    );

    doc.add_node(
        SceneNode::typed("Background", "ColorRect")
            .under(".")
            .with("z_index", BACKGROUND_Z_INDEX)
            .with("offset_right", play_width)
            .with("offset_bottom", profile.viewport.height)
            .with("mouse_filter", MOUSE_FILTER_IGNORE)
            .with("color", background.normalized()),
    );

    doc.add_node(
        SceneNode::instance("Player", res.player)
            .under(".")
            .with("position", profile.player_spawn),
    );
    doc.add_node(
        SceneNode::typed("Camera2D", "Camera2D")
            .under("Player")
            .with("limit_left", 0i64)
            .with("limit_top", 0i64)
            .with("limit_right", play_width.round() as i64)
            .with("limit_bottom", profile.viewport.height.round() as i64)
            .with("position_smoothing_enabled", true)
            .with("position_smoothing_speed", profile.camera_smoothing_speed),
    );

    if !platforms.is_empty() {
        doc.add_node(SceneNode::typed("Platforms", "Node2D").under("."));
        let mut jump_idx = 0;
        for p in platforms {
            let name = match p.kind {
                PlatformKind::Ground => "Ground".to_owned(),
                PlatformKind::Platform => {
                    jump_idx += 1;
                    format!("Platform{jump_idx}")
                }
            };
            let center = p.rect().center();
            doc.add_node(
                SceneNode::instance(name, res.platform)
                    .under("Platforms")
                    .with("position", center)
                    .with(
                        "scale",
                        Variant::vector2(
                            p.width / PLATFORM_ASSET_SIZE.width,
                            p.height / PLATFORM_ASSET_SIZE.height,
                        ),
                    ),
            );
        }
    }

    doc.add_node(SceneNode::typed("Collectibles", "Node2D").under("."));
    for (i, pos) in collectibles.iter().enumerate() {
        doc.add_node(
            SceneNode::instance(format!("Collectible{}", i + 1), res.collectible)
                .under("Collectibles")
                .with("position", *pos),
        );
    }

    if let (Some(npc), Some(npc_res)) = (config.active_npc(), &res.npc) {
        doc.add_node(
            SceneNode::instance("NPC", npc_res.scene)
                .under(".")
                .with("position", profile.npc_spawn)
                .with("npc_type", npc.kind.as_str())
                .with("message", npc.message.as_str()),
        );
        doc.add_node(
            SceneNode::override_of("AnimatedSprite2D")
                .under("NPC")
                .with("sprite_frames", Variant::SubResource(npc_res.frames))
                .with("animation", Variant::string_name(NPC_ANIMATIONS[0])),
        );
    }

    doc.add_node(SceneNode::instance("UI", res.ui).under("."));

    doc.validate()?;
    tracing::debug!(
        resources = doc.load_steps(),
        nodes = doc.nodes.len(),
        "composed level"
    );
    Ok(doc)
}

// Declaration order decides numbering: the NPC scene sits before the UI
// scene and the NPC texture after it, so enabling the NPC moves the UI id
// up by exactly one.
fn declare_resources(
    doc: &mut SceneDocument,
    npc: Option<&NpcConfig>,
    level_index: usize,
    paths: &ResourcePaths,
) -> LevelResources {
    let player = doc.add_ext_resource("PackedScene", paths.player_scene.as_str(), None);
    let collectible = doc.add_ext_resource("PackedScene", paths.collectible_scene.as_str(), None);
    let script = doc.add_ext_resource("Script", paths.manager_script.as_str(), None);
    let platform = doc.add_ext_resource("PackedScene", paths.platform_scene.as_str(), None);
    let npc_scene = npc.map(|_| doc.add_ext_resource("PackedScene", paths.npc_scene.as_str(), None));
    let ui = doc.add_ext_resource("PackedScene", paths.ui_scene.as_str(), None);

    let npc = npc_scene.map(|scene| {
        let texture = doc.add_ext_resource(
            "Texture2D",
            format!("{}/{}", paths.assets_dir, npc_texture_file_name(level_index)),
            None,
        );
        let frames = doc.add_sub_resource("SpriteFrames", npc_frames(texture));
        NpcResources { scene, frames }
    });

    LevelResources {
        player,
        collectible,
        script,
        platform,
        npc,
        ui,
    }
}

fn npc_frames(texture: ResourceId) -> Vec<(String, Variant)> {
    let clips = NPC_ANIMATIONS
        .iter()
        .map(|name| {
            Variant::Dictionary(vec![
                (
                    "frames".to_owned(),
                    Variant::Array(vec![Variant::Dictionary(vec![
                        ("duration".to_owned(), Variant::Float(1.0)),
                        ("texture".to_owned(), Variant::ExtResource(texture)),
                    ])]),
                ),
                ("loop".to_owned(), Variant::Bool(true)),
                ("name".to_owned(), Variant::string_name(*name)),
                ("speed".to_owned(), Variant::Float(NPC_ANIMATION_SPEED)),
            ])
        })
        .collect();
    vec![("animations".to_owned(), Variant::Array(clips))]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
