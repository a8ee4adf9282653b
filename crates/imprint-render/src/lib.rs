//! Imprint Render Library
//!
//! Renderer abstraction and frame composition for the Imprint canvas.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod cache;
mod renderer;
pub mod rulers;
pub mod tile;

#[cfg(feature = "vello-renderer")]
mod background;
#[cfg(feature = "vello-renderer")]
mod handles;
#[cfg(feature = "vello-renderer")]
mod objects;
#[cfg(feature = "vello-renderer")]
mod overlay;
#[cfg(feature = "vello-renderer")]
mod scene;
#[cfg(feature = "vello-renderer")]
pub mod text;

pub use cache::FrameKey;
pub use renderer::{FrameContext, RenderResult, Renderer, RendererError};
pub use tile::{checkerboard_tile, dots_tile, PatternTile};

#[cfg(feature = "vello-renderer")]
pub use cache::BaseLayerCache;
#[cfg(feature = "vello-renderer")]
pub use scene::CanvasRenderer;
