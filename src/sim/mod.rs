//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only (same seed, same obstacle layout)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, entity_hits_obstacle, surface_bounds_hit};
pub use state::{Entity, Obstacle, Session, SessionStatus, TerminalCause};
pub use tick::{TickOutcome, tick};
