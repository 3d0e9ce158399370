pub mod budget;
pub mod complex;
pub mod config;
pub mod error;
pub mod explorer;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod pointer;
pub mod viewport;

// Re-export primary types for convenience.
pub use budget::IterationBudget;
pub use complex::Complex;
pub use config::ExplorerConfig;
pub use error::CoreError;
pub use explorer::{Explorer, FrameSnapshot};
pub use fractal::{evaluate, evaluate_orbit, Fractal};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use pointer::PointerState;
pub use viewport::{Bounds, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
