/// Convenience result type used across levelsmith.
pub type LevelResult<T> = Result<T, LevelError>;

/// Top-level error taxonomy used by layout, composition and project APIs.
///
/// Conditions that have a documented default (unknown layout, missing config
/// file, missing custom asset) never surface here; they are logged and
/// substituted instead.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// Structurally invalid level data (bad color, negative count, empty name).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while computing item or platform placement.
    #[error("layout error: {0}")]
    Layout(String),

    /// Inconsistent scene documents (dangling ids, unknown parents).
    #[error("scene error: {0}")]
    Scene(String),

    /// Malformed level configuration input.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LevelError {
    /// Build a [`LevelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LevelError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`LevelError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`LevelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<std::fmt::Error> for LevelError {
    fn from(_: std::fmt::Error) -> Self {
        Self::scene("failed to format scene text")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
