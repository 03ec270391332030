//! Demo-mode pilot
//!
//! Decides, before a frame, whether an impulse would keep the entity on
//! course for the next unpassed gap. Used by the headless native runner and
//! by tests that need a session to survive for a while.

use super::state::Session;
use crate::config::GameConfig;

/// Vertical point (entity centre) the pilot steers toward
pub fn target_y(session: &Session, config: &GameConfig) -> f32 {
    let entity = &session.entity;
    session
        .obstacles
        .iter()
        .find(|o| o.right() >= entity.left())
        // Aim below the gap centre: an impulse carries the entity well above
        // the point it was fired at
        .map(|o| o.gap_top + config.gap_size * 0.7)
        .unwrap_or(config.surface_height * 0.5)
}

/// True if the entity should receive an impulse before the next frame
pub fn wants_impulse(session: &Session, config: &GameConfig) -> bool {
    if !session.is_running() {
        return false;
    }
    let centre = session.entity.pos.y + session.entity.size.y * 0.5;
    centre > target_y(session, config)
}
