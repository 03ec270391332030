//! Session state and core simulation types
//!
//! A [`Session`] is one play-through. It exclusively owns the entity and the
//! obstacle sequence; restart discards it and builds a new one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::GameConfig;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    /// Entity top reached the top edge of the surface
    Ceiling,
    /// Entity bottom reached the bottom edge of the surface
    Floor,
    /// Entity overlapped a solid segment of the obstacle at this index
    Obstacle { index: usize },
}

/// Whether the session is still being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    /// Frozen; waiting for a restart
    Terminal(TerminalCause),
}

/// The player-controlled object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner; x never changes during a session
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels per frame, positive = down)
    pub velocity: f32,
    pub gravity: f32,
    pub impulse_velocity: f32,
}

impl Entity {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.entity_start,
            size: config.entity_size,
            velocity: 0.0,
            gravity: config.gravity,
            impulse_velocity: config.impulse_velocity,
        }
    }

    /// Apply gravity and integrate one frame
    pub fn fall(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
    }

    /// Instantaneous upward kick
    pub fn impulse(&mut self) {
        self.velocity = self.impulse_velocity;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }
}

/// A scrolling barrier pair with an opening between `gap_top` and `gap_bottom`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the upper solid segment
    pub gap_top: f32,
    /// Top of the lower solid segment
    pub gap_bottom: f32,
    /// Set the first time the entity clears the right edge
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, gap_top: f32, gap_size: f32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_bottom: gap_top + gap_size,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Height of the upper solid segment
    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.gap_top
    }

    /// Solid segment above the gap
    pub fn upper_segment(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, 0.0), Vec2::new(self.right(), self.gap_top))
    }

    /// Solid segment below the gap, down to the bottom of the surface
    pub fn lower_segment(&self, surface_height: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom),
            Vec2::new(self.right(), surface_height),
        )
    }
}

/// One play-through
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the spawn RNG was built from
    pub seed: u64,
    /// Scheduler generation this session is bound to (liveness token)
    pub epoch: u64,
    pub entity: Entity,
    /// Spawn order == left-to-right screen order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub status: SessionStatus,
    /// Frames simulated so far
    pub frames: u64,
    rng: Pcg32,
}

impl Session {
    pub fn new(config: &GameConfig, seed: u64, epoch: u64) -> Self {
        Self {
            seed,
            epoch,
            entity: Entity::new(config),
            obstacles: Vec::new(),
            score: 0,
            status: SessionStatus::Running,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn terminal_cause(&self) -> Option<TerminalCause> {
        match self.status {
            SessionStatus::Running => None,
            SessionStatus::Terminal(cause) => Some(cause),
        }
    }

    /// Freeze the session; the first cause wins
    pub fn terminate(&mut self, cause: TerminalCause) {
        if self.is_running() {
            self.status = SessionStatus::Terminal(cause);
        }
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
