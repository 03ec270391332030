//! Per-frame simulation step
//!
//! Advances a session by exactly one frame. There is no variable timestep:
//! every constant is expressed in pixels per frame.

use rand::Rng;

use super::collision::{entity_hits_obstacle, surface_bounds_hit};
use super::state::{Obstacle, Session, TerminalCause};
use crate::config::GameConfig;

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session keeps running
    Continue,
    /// Session ended this frame
    Terminal(TerminalCause),
    /// Session was already terminal; nothing changed
    Frozen,
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, config: &GameConfig) -> TickOutcome {
    if !session.is_running() {
        return TickOutcome::Frozen;
    }
    session.frames += 1;

    // Gravity
    session.entity.fall();

    // Ceiling / floor
    if let Some(cause) = surface_bounds_hit(&session.entity, config.surface_height) {
        return end(session, cause);
    }

    spawn_if_due(session, config);

    // Scroll, collide, score
    let mut offscreen = false;
    for index in 0..session.obstacles.len() {
        let obstacle = &mut session.obstacles[index];
        obstacle.x -= config.scroll_speed;

        if entity_hits_obstacle(&session.entity, obstacle, config.surface_height) {
            return end(session, TerminalCause::Obstacle { index });
        }

        if !obstacle.passed && session.entity.left() > obstacle.right() {
            obstacle.passed = true;
            session.score += 1;
            log::debug!("Score {} (frame {})", session.score, session.frames);
        }

        offscreen |= obstacle.right() < 0.0;
    }

    if offscreen {
        session.obstacles.retain(|o| o.right() >= 0.0);
    }

    TickOutcome::Continue
}

fn end(session: &mut Session, cause: TerminalCause) -> TickOutcome {
    session.terminate(cause);
    TickOutcome::Terminal(cause)
}

/// Append an obstacle at the right edge once the last one has scrolled far enough
fn spawn_if_due(session: &mut Session, config: &GameConfig) {
    let due = match session.obstacles.last() {
        None => true,
        Some(last) => last.x < config.surface_width - config.spawn_spacing,
    };
    if !due {
        return;
    }

    let gap_top = session.rng().random_range(config.gap_height_range());
    session.obstacles.push(Obstacle::new(
        config.surface_width,
        config.obstacle_width,
        gap_top,
        config.gap_size,
    ));
    log::debug!(
        "Spawned obstacle #{} gap {:.0}..{:.0}",
        session.obstacles.len(),
        gap_top,
        gap_top + config.gap_size
    );
}
