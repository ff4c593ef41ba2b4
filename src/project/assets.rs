use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::LevelResult;

/// Placeholder sprite used when no custom SVG is available.
pub const DEFAULT_SPRITE_SVG: &str = r##"<svg height="128" width="128" xmlns="http://www.w3.org/2000/svg">
  <rect x="10" y="10" width="108" height="108" fill="#478cbf" rx="20" ry="20" />
  <circle cx="64" cy="64" r="30" fill="white" />
  <circle cx="64" cy="64" r="10" fill="#478cbf" />
</svg>
"##;

/// Where a sprite ended up coming from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpriteSource {
    Custom(PathBuf),
    Copied(PathBuf),
    Placeholder,
}

/// Finds a user-supplied file.
///
/// Tried in order: `~` expansion, an existing absolute path, a path relative
/// to the parent of `project_dir`, a path relative to the working directory.
pub fn resolve_asset_path(raw: &str, project_dir: &Path) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let expanded = expand_home(raw);

    if expanded.is_absolute() {
        return expanded.is_file().then_some(expanded);
    }
    if let Some(parent) = project_dir.parent() {
        let candidate = parent.join(&expanded);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    expanded.is_file().then_some(expanded)
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix("~/").or_else(|| (raw == "~").then_some("")) {
        Some(rest) => rest,
        None => return PathBuf::from(raw),
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(raw),
    }
}

/// Writes `dest` from the custom file, else from `fallback`, else the placeholder.
///
/// A custom path that does not resolve is logged, never an error.
pub fn install_sprite(
    custom: Option<&str>,
    fallback: Option<&Path>,
    project_dir: &Path,
    dest: &Path,
) -> LevelResult<SpriteSource> {
    if let Some(src) = custom.and_then(|raw| resolve_asset_path(raw, project_dir)) {
        copy(&src, dest)?;
        return Ok(SpriteSource::Custom(src));
    }
    if let Some(raw) = custom.filter(|s| !s.trim().is_empty()) {
        tracing::warn!(path = raw, dest = %dest.display(), "custom sprite not found, using default");
    }

    if let Some(src) = fallback.filter(|p| p.is_file()) {
        copy(src, dest)?;
        return Ok(SpriteSource::Copied(src.to_path_buf()));
    }

    std::fs::write(dest, DEFAULT_SPRITE_SVG)
        .with_context(|| format!("write placeholder sprite '{}'", dest.display()))?;
    Ok(SpriteSource::Placeholder)
}

fn copy(src: &Path, dest: &Path) -> LevelResult<()> {
    std::fs::copy(src, dest)
        .with_context(|| format!("copy '{}' to '{}'", src.display(), dest.display()))?;
    Ok(())
}

/// Template files that only make sense when some level has an NPC.
pub const NPC_TEMPLATE_FILES: [&str; 4] = [
    "scenes/npc.tscn",
    "scripts/npc.gd",
    "assets/npc.svg",
    "tests/test_npc.gd",
];

/// Deletes the NPC template files that exist under `project_dir`.
pub fn prune_npc_templates(project_dir: &Path) -> LevelResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for rel in NPC_TEMPLATE_FILES {
        let path = project_dir.join(rel);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("remove '{}'", path.display()))?;
            tracing::debug!(path = %path.display(), "removed npc template file");
            removed.push(path);
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "../../tests/unit/project/assets.rs"]
mod tests;
