//! GPU rendering.
//!
//! The triangle pipeline owns its GPU objects; per-frame state is borrowed
//! through [`RenderTarget`].

mod color;
mod target;
mod triangle;

pub use color::ClearColor;
pub use target::RenderTarget;
pub use triangle::TrianglePipeline;
