//! levelsmith turns compact level configurations into ready-to-load 2D game scenes.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `levels.json` or synthesized defaults -> `Vec<LevelConfig>`
//! 2. **Lay out**: `LevelConfig -> positions` (screen layouts) or
//!    `LevelConfig -> platforms + positions` (side-scrolling levels)
//! 3. **Compose**: `LevelConfig + layout -> SceneDocument` (resources, sub-resources, node tree)
//! 4. **Render**: `SceneDocument -> String` in the engine's text scene format
//!
//! Layout and composition are pure. Randomized layouts take an injected
//! [`rand::Rng`], and file IO is confined to [`generate_project`] and the
//! level resolver.
#![forbid(unsafe_code)]

mod foundation;
mod layout;
mod level;
mod project;
mod scene;

pub use foundation::color::{ColorF, Rgb8};
pub use foundation::core::{Point, Rect, Size, Vec2};
pub use foundation::error::{LevelError, LevelResult};
pub use layout::engine::{
    DEFAULT_MARGIN, DEFAULT_SCREEN, LayoutSettings, generate_positions, grid_columns,
};
pub use layout::platforms::{
    LEVEL_WIDTH, Platform, PlatformKind, generate_platforms, place_on_platforms,
};
pub use level::config::{LayoutKind, LevelConfig, LevelSet, NpcConfig};
pub use level::resolve::{load_level_set, resolve_levels, synthesize_levels, write_level_set};
pub use project::assets::{
    DEFAULT_SPRITE_SVG, NPC_TEMPLATE_FILES, SpriteSource, install_sprite, prune_npc_templates,
    resolve_asset_path,
};
pub use project::audio::{
    JingleSpec, VICTORY_NOTES_HZ, encode_wav_mono16, victory_samples, victory_wav,
};
pub use project::generate::{
    GameStyle, GenerateOptions, GeneratedProject, LevelLayout, build_level_scene,
    generate_project, layout_level, level_seed, scene_file_name,
};
pub use scene::compose::{
    PLATFORM_ASSET_SIZE, ResourcePaths, SceneProfile, compose_level, npc_texture_file_name,
    scene_uid,
};
pub use scene::model::{
    ExtResource, NodeKind, ResourceId, SceneDocument, SceneNode, SubResource, Variant,
};
pub use scene::render::{SCENE_FORMAT, render_scene};
