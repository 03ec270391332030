//! Platform abstraction layer
//!
//! The simulation, scheduler and renderer are host-agnostic. This module
//! holds the browser binding: canvas setup, animation frames, and input
//! listeners. Native builds drive the same [`Arcade`](crate::Arcade) from a
//! plain loop (see `main.rs`).

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::ArcadeHandle;
