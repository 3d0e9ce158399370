use thiserror::Error;

/// Errors originating from the core fractal engine and viewport math.
///
/// Every variant is a precondition violation: the operation that reports it
/// leaves all state exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid squared escape radius: {0} (must be positive and finite)")]
    InvalidEscapeRadius(f64),

    #[error("invalid zoom factor: {0} (must be positive and finite)")]
    InvalidZoomFactor(f64),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid explorer config: {reason}")]
    InvalidConfig { reason: String },
}
