//! Flap Arcade - an embeddable side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entity physics, obstacle spawning, collisions, scoring)
//! - `arcade`: Session lifecycle state machine driven by host inputs
//! - `scheduler`: Cancellable per-frame loop bookkeeping
//! - `renderer`: Display-list rendering for a 2D drawing surface
//! - `platform`: Browser bindings (canvas, animation frames, input listeners)
//! - `config`: Data-driven game tuning with fail-fast validation

pub mod arcade;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod sim;

pub use arcade::{Arcade, ArcadePhase, Effects, FrameOutput, Input};
pub use config::{ConfigError, GameConfig};
pub use scheduler::{FrameTicket, Scheduler};

/// Default tuning constants (pixels, pixels per frame)
pub mod consts {
    /// Drawing surface dimensions
    pub const SURFACE_WIDTH: f32 = 400.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Entity starts at a fixed column, a little above mid-height
    pub const ENTITY_START_X: f32 = 80.0;
    pub const ENTITY_START_Y: f32 = 250.0;
    pub const ENTITY_WIDTH: f32 = 34.0;
    pub const ENTITY_HEIGHT: f32 = 24.0;

    /// Added to vertical velocity every frame
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set by an impulse (negative = up)
    pub const IMPULSE_VELOCITY: f32 = -8.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 150.0;
    pub const MIN_GAP_HEIGHT: f32 = 50.0;
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Horizontal distance the last obstacle travels before the next spawns
    pub const SPAWN_SPACING: f32 = 200.0;
}
