pub mod buffer;
pub mod error;
pub mod frame;
pub mod palette;
pub mod renderer;

pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use frame::EscapeFrame;
pub use palette::{colorize, hsb_to_rgba, ColorMap, Palette, PaletteKind};
pub use renderer::{render_frame, RenderCancel, RenderResult};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
