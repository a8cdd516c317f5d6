//! Error types for the tile compositor.

use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Primary error type for compositing operations.
///
/// All variants are fatal to the artifact being produced; the core never
/// retries. The surrounding pipeline decides whether to abort or skip.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Configuration Errors ===
    #[error("Invalid image dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i64, height: i64 },

    #[error("Invalid plot configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid tile: {0}")]
    InvalidTile(String),

    // === Lifecycle Errors ===
    #[error("Compositor has not been initialized")]
    Uninitialized,

    #[error("Compositor is already initialized")]
    AlreadyInitialized,

    #[error("Compositor is closed")]
    ClosedCompositor,

    #[error("Compositor lock poisoned by a panicking producer")]
    LockPoisoned,

    // === Output Errors ===
    #[error("Failed to encode canvas")]
    Encode(#[source] std::io::Error),
}

impl PlotError {
    /// Whether the error was raised while validating configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PlotError::InvalidDimension { .. } | PlotError::InvalidConfig(_)
        )
    }

    /// Whether the error indicates the caller drove the lifecycle out of order.
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            PlotError::Uninitialized
                | PlotError::AlreadyInitialized
                | PlotError::ClosedCompositor
        )
    }
}

impl From<crate::bbox::BboxParseError> for PlotError {
    fn from(err: crate::bbox::BboxParseError) -> Self {
        PlotError::InvalidConfig(err.to_string())
    }
}

impl From<serde_yaml::Error> for PlotError {
    fn from(err: serde_yaml::Error) -> Self {
        PlotError::InvalidConfig(format!("YAML error: {}", err))
    }
}
