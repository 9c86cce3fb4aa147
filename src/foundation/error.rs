/// Convenience result type used across animecard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by compositor, editor and deck APIs.
///
/// Only [`CardError::Surface`] is fatal to a render call; asset failures are reported per layer
/// and never abort a render.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid user-provided data (unsupported field edits, malformed deck lists).
    #[error("validation error: {0}")]
    Validation(String),

    /// An image or font could not be fetched, decoded or prepared.
    #[error("asset error: {0}")]
    Asset(String),

    /// The drawing surface could not be created.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`CardError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
