use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    foundation::error::{LevelError, LevelResult},
    level::config::{LayoutKind, LevelConfig, LevelSet, NpcConfig},
};

const BASE_COLLECTIBLES: u32 = 4;
const COLLECTIBLES_STEP: u32 = 2;
const BASE_TARGET_SCORE: i64 = 40;
const TARGET_SCORE_STEP: i64 = 20;
const DEFAULT_BACKGROUND: &str = "#1a1a1a";

/// Builds `count` levels with progressively more collectibles.
///
/// Level `i` (0-based) gets `4 + 2i` collectibles and a target score of
/// `40 + 20i`. Every level shares the same background, grid layout and NPC
/// switch.
pub fn synthesize_levels(count: usize, include_npc: bool) -> Vec<LevelConfig> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            let step = u32::try_from(i).unwrap_or(u32::MAX);
            LevelConfig {
                name: format!("level_{n}"),
                npc: Some(NpcConfig {
                    enabled: include_npc,
                    kind: "guide".to_owned(),
                    message: format!("Welcome to level {n}! Collect every item to win."),
                    svg: None,
                }),
                collectible_count: BASE_COLLECTIBLES
                    .saturating_add(COLLECTIBLES_STEP.saturating_mul(step)),
                target_score: BASE_TARGET_SCORE + TARGET_SCORE_STEP * i as i64,
                background_color: DEFAULT_BACKGROUND.to_owned(),
                layout: LayoutKind::Grid,
            }
        })
        .collect()
}

/// Reads a level file.
///
/// Returns `Ok(None)` when the file cannot be read at all; a readable file
/// with a malformed schema is an error.
pub fn load_level_set(path: &Path) -> LevelResult<Option<LevelSet>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "level config unreadable");
            return Ok(None);
        }
    };
    let set: LevelSet = serde_json::from_str(&text).map_err(|err| {
        LevelError::config(format!("parse level config '{}': {err}", path.display()))
    })?;
    Ok(Some(set))
}

/// Produces the ordered level list for one generation run.
///
/// A readable `config` file wins and its levels are used verbatim (after
/// validation). Otherwise `count` levels are synthesized.
pub fn resolve_levels(
    count: usize,
    config: Option<&Path>,
    include_npc: bool,
) -> LevelResult<Vec<LevelConfig>> {
    if let Some(path) = config {
        if let Some(set) = load_level_set(path)? {
            set.validate()?;
            tracing::debug!(levels = set.levels.len(), path = %path.display(), "loaded levels");
            return Ok(set.levels);
        }
        tracing::warn!(count, "falling back to synthesized levels");
    }
    Ok(synthesize_levels(count, include_npc))
}

/// Writes the resolved levels back out in the input schema.
pub fn write_level_set(path: &Path, levels: &[LevelConfig]) -> LevelResult<()> {
    let set = LevelSet {
        levels: levels.to_vec(),
    };
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &set)?;
    w.flush().with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/level/resolve.rs"]
mod tests;
