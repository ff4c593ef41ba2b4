use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::core::Point,
    foundation::error::LevelResult,
    layout::{
        engine::{LayoutSettings, generate_positions},
        platforms::{Platform, generate_platforms, place_on_platforms},
    },
    level::{
        config::{LevelConfig, LevelSet},
        resolve::{resolve_levels, write_level_set},
    },
    project::{
        assets::{SpriteSource, install_sprite, prune_npc_templates},
        audio::{JingleSpec, victory_wav},
    },
    scene::{
        compose::{SceneProfile, compose_level, npc_texture_file_name},
        model::SceneDocument,
        render::render_scene,
    },
};

/// How collectibles are arranged in every level of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStyle {
    /// Single screen; collectibles follow each level's layout kind.
    #[default]
    TopDown,
    /// Side-scrolling; collectibles sit above generated platforms.
    Platformer,
}

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Root of the generated project.
    pub out_dir: PathBuf,
    /// Levels to synthesize when no config file is used.
    pub level_count: usize,
    pub config_path: Option<PathBuf>,
    /// NPC switch for synthesized levels.
    pub include_npc: bool,
    pub style: GameStyle,
    pub seed: u64,
    pub player_svg: Option<String>,
    /// Default NPC sprite for levels without their own `svg`.
    pub npc_svg: Option<String>,
    pub layout: LayoutSettings,
    pub profile: SceneProfile,
}

impl GenerateOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            level_count: 3,
            config_path: None,
            include_npc: false,
            style: GameStyle::TopDown,
            seed: 0,
            player_svg: None,
            npc_svg: None,
            layout: LayoutSettings::default(),
            profile: SceneProfile::default(),
        }
    }
}

/// Placement computed for one level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Point>,
}

/// Independent RNG seed for the 1-based level `level_index`.
pub fn level_seed(seed: u64, level_index: usize) -> u64 {
    seed ^ (level_index as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93)
}

pub fn layout_level<R: Rng + ?Sized>(
    config: &LevelConfig,
    style: GameStyle,
    settings: &LayoutSettings,
    rng: &mut R,
) -> LevelLayout {
    let count = config.collectible_count as usize;
    match style {
        GameStyle::TopDown => LevelLayout {
            platforms: Vec::new(),
            collectibles: generate_positions(count, config.layout, settings, rng),
        },
        GameStyle::Platformer => {
            let platforms = generate_platforms(count);
            let collectibles = place_on_platforms(count, &platforms);
            LevelLayout {
                platforms,
                collectibles,
            }
        }
    }
}

/// Lays out and composes one level with its own seeded RNG.
pub fn build_level_scene(
    config: &LevelConfig,
    level_index: usize,
    style: GameStyle,
    seed: u64,
    settings: &LayoutSettings,
    profile: &SceneProfile,
) -> LevelResult<SceneDocument> {
    let mut rng = StdRng::seed_from_u64(level_seed(seed, level_index));
    let layout = layout_level(config, style, settings, &mut rng);
    compose_level(
        config,
        &layout.platforms,
        &layout.collectibles,
        level_index,
        profile,
    )
}

pub fn scene_file_name(level_index: usize) -> String {
    format!("level_{level_index}.tscn")
}

/// Files written by [`generate_project`].
#[derive(Clone, Debug)]
pub struct GeneratedProject {
    pub levels: Vec<LevelConfig>,
    pub scenes: Vec<PathBuf>,
    pub levels_json: PathBuf,
    pub player_sprite: SpriteSource,
    pub pruned: Vec<PathBuf>,
}

/// Resolves levels, composes every scene and writes the project files.
///
/// All scenes are composed and rendered before anything is written, so a
/// data error in any level leaves no scene files behind.
#[tracing::instrument(skip(opts), fields(out = %opts.out_dir.display()))]
pub fn generate_project(opts: &GenerateOptions) -> LevelResult<GeneratedProject> {
    let set = LevelSet {
        levels: resolve_levels(
            opts.level_count,
            opts.config_path.as_deref(),
            opts.include_npc,
        )?,
    };
    let levels = &set.levels;

    let mut rendered = Vec::with_capacity(levels.len());
    for (i, level) in levels.iter().enumerate() {
        let index = i + 1;
        let doc = build_level_scene(
            level,
            index,
            opts.style,
            opts.seed,
            &opts.layout,
            &opts.profile,
        )?;
        rendered.push(render_scene(&doc)?);
    }

    let out = &opts.out_dir;
    let scenes_dir = out.join("scenes");
    let assets_dir = out.join("assets");
    for dir in [&scenes_dir, &assets_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("create dir '{}'", dir.display()))?;
    }

    let mut scenes = Vec::with_capacity(rendered.len());
    for (i, text) in rendered.iter().enumerate() {
        let path = scenes_dir.join(scene_file_name(i + 1));
        std::fs::write(&path, text).with_context(|| format!("write scene '{}'", path.display()))?;
        scenes.push(path);
    }

    let levels_json = out.join("levels.json");
    write_level_set(&levels_json, levels)?;

    let player_path = assets_dir.join("player.svg");
    let player_sprite = install_sprite(opts.player_svg.as_deref(), None, out, &player_path)?;
    install_npc_sprites(levels, opts.npc_svg.as_deref(), out, &player_path)?;

    let any_npc = set.any_npc();
    let pruned = if any_npc {
        Vec::new()
    } else {
        prune_npc_templates(out)?
    };

    let wav_path = assets_dir.join("victory.wav");
    std::fs::write(&wav_path, victory_wav(JingleSpec::default()))
        .with_context(|| format!("write '{}'", wav_path.display()))?;

    tracing::info!(levels = levels.len(), npc = any_npc, "project generated");
    Ok(GeneratedProject {
        levels: set.levels,
        scenes,
        levels_json,
        player_sprite,
        pruned,
    })
}

fn install_npc_sprites(
    levels: &[LevelConfig],
    default_svg: Option<&str>,
    project_dir: &Path,
    player_sprite: &Path,
) -> LevelResult<()> {
    for (i, level) in levels.iter().enumerate() {
        let Some(npc) = level.active_npc() else {
            continue;
        };
        let dest = project_dir
            .join("assets")
            .join(npc_texture_file_name(i + 1));
        let custom = npc.svg_ref().or(default_svg);
        install_sprite(custom, Some(player_sprite), project_dir, &dest)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/project/generate.rs"]
mod tests;
