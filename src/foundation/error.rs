/// Convenience result type used across hudreplay.
pub type HudResult<T> = Result<T, HudError>;

/// Top-level error taxonomy.
///
/// Only construction-time APIs return these. Recording, folding, derived views and the timing
/// bridge degrade gracefully instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum HudError {
    /// Invalid caller-provided construction input (negative duration, non-finite timestamps,
    /// unknown event kinds, bad options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing a session recording.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HudError {
    /// Build a [`HudError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HudError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
