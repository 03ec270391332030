//! Session lifecycle
//!
//! [`Arcade`] is the state machine the host talks to. Inputs arrive as
//! [`Input`] values; each transition returns [`Effects`] describing what the
//! host has to do with its frame primitive (request, cancel) and its surface.
//!
//! ```text
//!  Idle --Open--> Running --collision--> Terminal --RestartOrImpulse--> Running
//!   ^               |                      |
//!   +-----Close-----+----------Close-------+
//! ```

use crate::config::{ConfigError, GameConfig};
use crate::renderer::{Frame, render};
use crate::scheduler::{FrameTicket, HostFrameId, Scheduler};
use crate::sim::{Session, TickOutcome, tick};

/// Externally visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadePhase {
    /// No session exists
    Idle,
    /// Session is ticking
    Running,
    /// Session ended, overlay shown, waiting for restart
    Terminal,
}

/// Host inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Game surface opened
    Open,
    /// Game surface closed
    Close,
    /// Keyboard impulse; ignored unless running
    Impulse,
    /// Pointer down on the surface: impulse while running, restart when terminal
    RestartOrImpulse,
}

/// Work the host must carry out after a transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Platform frame request to cancel
    pub cancel_frame: Option<HostFrameId>,
    /// Frame to request from the platform
    pub request_frame: Option<FrameTicket>,
    /// Wipe the drawing surface
    pub clear_surface: bool,
}

/// Result of running one scheduled frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub outcome: TickOutcome,
    /// What to paint
    pub frame: Frame,
    /// Next frame to request; `None` once the loop has stopped
    pub next: Option<FrameTicket>,
}

pub struct Arcade {
    config: GameConfig,
    session: Option<Session>,
    scheduler: Scheduler,
    /// Seed for the next session
    seed: u64,
}

impl Arcade {
    /// Validate `config` and build an idle arcade
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
            scheduler: Scheduler::new(),
            seed,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> ArcadePhase {
        match &self.session {
            None => ArcadePhase::Idle,
            Some(s) if s.is_running() => ArcadePhase::Running,
            Some(_) => ArcadePhase::Terminal,
        }
    }

    /// Score for the host label (0 when idle)
    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    /// True while a frame is pending
    pub fn is_looping(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Apply a host input
    pub fn handle(&mut self, input: Input) -> Effects {
        match (input, self.phase()) {
            (Input::Open, phase) => {
                if phase != ArcadePhase::Idle {
                    log::info!("Open while {:?}; discarding current session", phase);
                }
                self.start_session()
            }
            (Input::Close, ArcadePhase::Idle) => {
                log::debug!("Close ignored: no session");
                Effects::default()
            }
            (Input::Close, _) => {
                let cancel_frame = self.scheduler.cancel();
                if let Some(session) = self.session.take() {
                    log::info!("Closed at score {}", session.score);
                }
                Effects {
                    cancel_frame,
                    request_frame: None,
                    clear_surface: true,
                }
            }
            (Input::Impulse | Input::RestartOrImpulse, ArcadePhase::Running) => {
                if let Some(session) = self.session.as_mut() {
                    session.entity.impulse();
                }
                Effects::default()
            }
            (Input::RestartOrImpulse, ArcadePhase::Terminal) => {
                log::info!("Restarting after score {}", self.score());
                self.start_session()
            }
            (input, phase) => {
                log::debug!("{:?} ignored while {:?}", input, phase);
                Effects::default()
            }
        }
    }

    pub fn open(&mut self) -> Effects {
        self.handle(Input::Open)
    }

    pub fn close(&mut self) -> Effects {
        self.handle(Input::Close)
    }

    pub fn impulse(&mut self) -> Effects {
        self.handle(Input::Impulse)
    }

    pub fn restart_or_impulse(&mut self) -> Effects {
        self.handle(Input::RestartOrImpulse)
    }

    /// Replace any session with a fresh one and start a new loop generation
    fn start_session(&mut self) -> Effects {
        let (ticket, stale) = self.scheduler.start();
        let seed = self.next_seed();
        self.session = Some(Session::new(&self.config, seed, ticket.generation()));
        log::info!("Session started (seed {})", seed);
        Effects {
            cancel_frame: stale,
            request_frame: Some(ticket),
            clear_surface: false,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self.seed;
        self.seed = self
            .seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        seed
    }

    /// Remember the platform id of the request made for `ticket`
    pub fn bind_frame(&mut self, ticket: FrameTicket, host_id: HostFrameId) {
        self.scheduler.bind(ticket, host_id);
    }

    /// Run a fired frame: step, then render, then reschedule unless terminal
    ///
    /// Returns `None` for stale frames (cancelled, superseded or duplicated);
    /// those leave every piece of state untouched.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> Option<FrameOutput> {
        if !self.scheduler.begin(ticket) {
            log::debug!("Dropping stale frame {:?}", ticket);
            return None;
        }
        let session = match self.session.as_mut() {
            Some(s) if s.epoch == ticket.generation() && s.is_running() => s,
            _ => {
                log::debug!("Frame {:?} has no live session", ticket);
                return None;
            }
        };

        let outcome = tick(session, &self.config);
        let frame = render(session, &self.config);
        let next = match outcome {
            TickOutcome::Continue => Some(self.scheduler.reschedule()),
            TickOutcome::Terminal(cause) => {
                log::info!("Game over ({:?}) with score {}", cause, session.score);
                None
            }
            TickOutcome::Frozen => None,
        };

        Some(FrameOutput {
            outcome,
            frame,
            next,
        })
    }

    /// Paint the current session without advancing it
    pub fn snapshot(&self) -> Option<Frame> {
        self.session.as_ref().map(|s| render(s, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TerminalCause;
    use crate::sim::autopilot::wants_impulse;

    fn arcade() -> Arcade {
        Arcade::new(GameConfig::default(), 2024).unwrap()
    }

    /// Run frames until the loop stops or `limit` frames have run
    fn pump(arcade: &mut Arcade, mut ticket: FrameTicket, limit: usize) -> Option<FrameTicket> {
        for _ in 0..limit {
            let output = arcade.on_frame(ticket).expect("live frame");
            match output.next {
                Some(next) => ticket = next,
                None => return None,
            }
        }
        Some(ticket)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            surface_height: 200.0,
            entity_start: glam::Vec2::new(10.0, 10.0),
            ..Default::default()
        };
        assert!(matches!(
            Arcade::new(config, 1),
            Err(ConfigError::SurfaceTooShort { .. })
        ));
    }

    #[test]
    fn test_inputs_before_open_are_noops() {
        let mut arcade = arcade();
        assert_eq!(arcade.impulse(), Effects::default());
        assert_eq!(arcade.restart_or_impulse(), Effects::default());
        assert_eq!(arcade.close(), Effects::default());
        assert_eq!(arcade.phase(), ArcadePhase::Idle);
        assert_eq!(arcade.score(), 0);
        assert!(arcade.snapshot().is_none());
    }

    #[test]
    fn test_open_starts_loop() {
        let mut arcade = arcade();
        let effects = arcade.open();
        assert!(effects.request_frame.is_some());
        assert_eq!(effects.cancel_frame, None);
        assert_eq!(arcade.phase(), ArcadePhase::Running);
        assert!(arcade.is_looping());

        let session = arcade.session().unwrap();
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_frame_steps_then_reschedules() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        let output = arcade.on_frame(ticket).unwrap();
        assert_eq!(output.outcome, TickOutcome::Continue);
        assert!(output.next.is_some());
        assert!(!output.frame.is_empty());
        assert_eq!(arcade.session().unwrap().frames, 1);
        assert!(arcade.is_looping());
    }

    #[test]
    fn test_free_fall_ends_in_terminal() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        assert_eq!(pump(&mut arcade, ticket, 500), None);

        assert_eq!(arcade.phase(), ArcadePhase::Terminal);
        assert!(!arcade.is_looping());
        let session = arcade.session().unwrap();
        assert_eq!(session.terminal_cause(), Some(TerminalCause::Floor));
        assert!(session.entity.bottom() >= arcade.config().surface_height);

        // Snapshot of a terminal session carries the overlay
        let frame = arcade.snapshot().unwrap();
        assert_eq!(frame.texts().next(), Some("Game Over!"));
    }

    #[test]
    fn test_terminal_frame_paints_overlay() {
        let mut arcade = arcade();
        let mut ticket = arcade.open().request_frame.unwrap();
        let last = loop {
            let output = arcade.on_frame(ticket).unwrap();
            match output.next {
                Some(next) => ticket = next,
                None => break output,
            }
        };
        assert!(matches!(last.outcome, TickOutcome::Terminal(_)));
        let texts: Vec<&str> = last.frame.texts().collect();
        assert_eq!(texts, vec!["Game Over!", "Score: 0", "Click to restart"]);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut arcade = arcade();
        let mut ticket = arcade.open().request_frame.unwrap();
        while arcade.score() == 0 {
            let session = arcade.session().unwrap();
            if wants_impulse(session, arcade.config()) {
                arcade.impulse();
            }
            ticket = arcade
                .on_frame(ticket)
                .and_then(|o| o.next)
                .expect("autopilot crashed before the first obstacle");
        }
        assert_eq!(arcade.score(), 1);
        assert_eq!(arcade.phase(), ArcadePhase::Running);
        assert!(arcade.session().unwrap().obstacles[0].passed);
    }

    #[test]
    fn test_restart_after_terminal() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        pump(&mut arcade, ticket, 500);
        let old_seed = arcade.session().unwrap().seed;

        let effects = arcade.restart_or_impulse();
        let ticket = effects.request_frame.expect("restart requests a frame");
        assert_eq!(arcade.phase(), ArcadePhase::Running);
        assert!(arcade.is_looping());

        let session = arcade.session().unwrap();
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.entity.pos, arcade.config().entity_start);
        assert_eq!(session.entity.velocity, 0.0);
        assert_eq!(session.frames, 0);
        assert_ne!(session.seed, old_seed);

        assert!(arcade.on_frame(ticket).is_some());
    }

    #[test]
    fn test_pointer_restarts_exactly_once() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        pump(&mut arcade, ticket, 500);

        let restart = arcade.restart_or_impulse();
        assert!(restart.request_frame.is_some());

        // Second pointer press is an impulse on the new session, not another restart
        let again = arcade.restart_or_impulse();
        assert_eq!(again, Effects::default());
        let session = arcade.session().unwrap();
        assert_eq!(session.frames, 0);
        assert_eq!(session.entity.velocity, arcade.config().impulse_velocity);
    }

    #[test]
    fn test_keyboard_does_not_restart() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        pump(&mut arcade, ticket, 500);

        assert_eq!(arcade.impulse(), Effects::default());
        assert_eq!(arcade.phase(), ArcadePhase::Terminal);
        assert!(!arcade.is_looping());
    }

    #[test]
    fn test_impulse_sets_velocity() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        arcade.on_frame(ticket);
        arcade.impulse();
        assert_eq!(arcade.session().unwrap().entity.velocity, -8.0);
    }

    #[test]
    fn test_close_stops_pending_frame() {
        let mut arcade = arcade();
        let ticket = arcade.open().request_frame.unwrap();
        arcade.bind_frame(ticket, 41);
        let next = arcade.on_frame(ticket).unwrap().next.unwrap();
        arcade.bind_frame(next, 42);

        let effects = arcade.close();
        assert_eq!(effects.cancel_frame, Some(42));
        assert!(effects.clear_surface);
        assert_eq!(effects.request_frame, None);
        assert_eq!(arcade.phase(), ArcadePhase::Idle);
        assert!(!arcade.is_looping());

        // The already-queued frame fires anyway
        assert!(arcade.on_frame(next).is_none());
        assert!(arcade.session().is_none());
    }

    #[test]
    fn test_stale_frame_after_reopen_is_ignored() {
        let mut arcade = arcade();
        let old = arcade.open().request_frame.unwrap();
        arcade.close();
        let new = arcade.open().request_frame.unwrap();

        assert!(arcade.on_frame(old).is_none());
        assert_eq!(arcade.session().unwrap().frames, 0);
        assert!(arcade.on_frame(new).is_some());
        assert_eq!(arcade.session().unwrap().frames, 1);
    }

    #[test]
    fn test_open_while_running_replaces_session() {
        let mut arcade = arcade();
        let first = arcade.open().request_frame.unwrap();
        arcade.bind_frame(first, 5);
        arcade.on_frame(first);
        assert_eq!(arcade.session().unwrap().frames, 1);

        let effects = arcade.open();
        // The first loop had already consumed its bound frame; nothing left to cancel
        assert_eq!(effects.cancel_frame, None);
        let second = effects.request_frame.unwrap();
        assert_ne!(first.generation(), second.generation());
        assert_eq!(arcade.session().unwrap().frames, 0);
    }

    #[test]
    fn test_looping_iff_running() {
        let mut arcade = arcade();
        assert_eq!(arcade.is_looping(), arcade.phase() == ArcadePhase::Running);
        let mut ticket = arcade.open().request_frame.unwrap();
        loop {
            assert_eq!(arcade.is_looping(), arcade.phase() == ArcadePhase::Running);
            match arcade.on_frame(ticket).and_then(|o| o.next) {
                Some(next) => ticket = next,
                None => break,
            }
        }
        assert_eq!(arcade.is_looping(), arcade.phase() == ArcadePhase::Running);
        arcade.close();
        assert_eq!(arcade.is_looping(), arcade.phase() == ArcadePhase::Running);
    }
}
