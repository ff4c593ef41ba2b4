use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::foundation::{
    color::Rgb8,
    error::{LevelError, LevelResult},
};

/// Strategy used to place collectibles on a single screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Up to four columns, evenly spaced rows.
    #[default]
    Grid,
    /// Evenly spaced on a circle around the screen center.
    Circle,
    /// Rejection-sampled with 120 px minimum spacing.
    Random,
    /// One row along the horizontal midline.
    Horizontal,
    /// One column along the vertical midline.
    Vertical,
    /// Top-left to bottom-right of the safe area.
    Diagonal,
    /// Four corners first, remainder in a centered block.
    Corners,
    /// Like `Random` but starting at 180 px spacing.
    Scatter,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 8] = [
        LayoutKind::Grid,
        LayoutKind::Circle,
        LayoutKind::Random,
        LayoutKind::Horizontal,
        LayoutKind::Vertical,
        LayoutKind::Diagonal,
        LayoutKind::Corners,
        LayoutKind::Scatter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Circle => "circle",
            LayoutKind::Random => "random",
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Vertical => "vertical",
            LayoutKind::Diagonal => "diagonal",
            LayoutKind::Corners => "corners",
            LayoutKind::Scatter => "scatter",
        }
    }

    /// Exact (case-insensitive) lookup without fallback.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Lookup that maps unrecognized names to [`LayoutKind::Grid`].
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(layout = name, "unknown layout, falling back to grid");
            LayoutKind::Grid
        })
    }
}

impl<'de> Deserialize<'de> for LayoutKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Optional non-player character placed in a level.
pub struct NpcConfig {
    /// Whether the NPC is emitted at all.
    pub enabled: bool,
    /// Free-form NPC archetype, forwarded to the NPC scene.
    #[serde(rename = "type", default = "default_npc_kind")]
    pub kind: String,
    /// Greeting shown when the player talks to the NPC.
    #[serde(default)]
    pub message: String,
    /// User-supplied sprite path; blank means "use the default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

fn default_npc_kind() -> String {
    "guide".to_owned()
}

impl NpcConfig {
    pub fn svg_ref(&self) -> Option<&str> {
        self.svg.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One level as read from (and written back to) `levels.json`.
pub struct LevelConfig {
    /// Unique level identifier.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npc: Option<NpcConfig>,
    #[serde(rename = "collectibles")]
    pub collectible_count: u32,
    pub target_score: i64,
    /// `#RRGGBB`; parsed lazily by [`LevelConfig::background`].
    pub background_color: String,
    #[serde(default)]
    pub layout: LayoutKind,
}

impl LevelConfig {
    /// The NPC block, only when present and enabled.
    pub fn active_npc(&self) -> Option<&NpcConfig> {
        self.npc.as_ref().filter(|npc| npc.enabled)
    }

    pub fn background(&self) -> LevelResult<Rgb8> {
        Rgb8::from_hex(&self.background_color)
    }

    pub fn validate(&self) -> LevelResult<()> {
        if self.name.trim().is_empty() {
            return Err(LevelError::validation("level name must be non-empty"));
        }
        match self.background() {
            Err(LevelError::Validation(msg)) => Err(LevelError::validation(format!(
                "level '{}': {msg}",
                self.name
            ))),
            Err(other) => Err(other),
            Ok(_) => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Top-level wrapper of the level configuration file.
pub struct LevelSet {
    pub levels: Vec<LevelConfig>,
}

impl LevelSet {
    pub fn validate(&self) -> LevelResult<()> {
        let mut seen = BTreeSet::new();
        for level in &self.levels {
            level.validate()?;
            if !seen.insert(level.name.as_str()) {
                return Err(LevelError::validation(format!(
                    "duplicate level name '{}'",
                    level.name
                )));
            }
        }
        Ok(())
    }

    pub fn any_npc(&self) -> bool {
        self.levels.iter().any(|l| l.active_npc().is_some())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/level/config.rs"]
mod tests;
