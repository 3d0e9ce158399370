use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid frame dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Core(#[from] apfel_core::CoreError),
}
