//! Rendering module
//!
//! The scene is described as a display list ([`Frame`]) so it can be built
//! and inspected without a browser. The canvas backend replays it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use draw::{Color, DrawCommand, Font, Frame, Stroke};
pub use scene::render;
