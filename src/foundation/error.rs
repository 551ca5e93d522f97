/// Result alias used throughout the crate.
pub type PenumbraResult<T> = Result<T, PenumbraError>;

/// Errors surfaced by buffer construction, rasterization and spec loading.
///
/// Rendering entry points never return these: a shadow that cannot be rasterized is logged and
/// skipped so a frame always completes.
#[derive(thiserror::Error, Debug)]
pub enum PenumbraError {
    /// Caller-supplied dimensions or parameters are unusable.
    #[error("validation error: {0}")]
    Validation(String),

    /// The vector rasterizer rejected a request.
    #[error("raster error: {0}")]
    Raster(String),

    /// Shadow specs could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PenumbraError {
    /// Build a [`PenumbraError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PenumbraError::Raster`].
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`PenumbraError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
