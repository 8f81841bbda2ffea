//! Session control
//!
//! A [`Session`] owns one [`GameState`] and the handle of the timer driving
//! it. Event sources (key listeners, the restart control) are registered once
//! by the front end; `start`/`restart` only touch state and the timer.

use crate::config::{ConfigError, GameConfig};
use crate::renderer::{RenderSurface, draw_frame};
use crate::sim::{GameEvent, GameState, Score, handle_key, tick};

/// Identifier of a running periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

/// Failures reported by the pieces a session drives
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("tick source could not start a timer: {0}")]
    TimerUnavailable(String),
}

/// Periodic tick source (`setInterval` in the browser)
pub trait TickSource {
    /// Begin firing every `interval_ms` milliseconds
    fn start(&mut self, interval_ms: u32) -> Result<TimerId, SessionError>;
    /// Stop a timer returned by `start`
    fn stop(&mut self, id: TimerId);
}

/// Text surface showing the score line
pub trait ScoreDisplay {
    fn show(&mut self, text: &str);
}

/// One match: state, config and the active timer
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    timer: Option<TimerId>,
}

impl Session {
    /// Build a stopped session. Configs that cannot lay out a playable arena
    /// are rejected here rather than on the first key press or tick.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, seed);
        Ok(Self {
            config,
            state,
            timer: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Show the score, launch the ball and begin ticking.
    /// A timer that is already running is replaced, never stacked.
    pub fn start(
        &mut self,
        ticker: &mut impl TickSource,
        display: &mut impl ScoreDisplay,
    ) -> Result<(), SessionError> {
        if let Some(old) = self.timer.take() {
            ticker.stop(old);
        }

        display.show(&self.state.score.to_string());
        self.state.launch_ball();
        self.timer = Some(ticker.start(self.config.tick_interval_ms)?);

        log::info!(
            "Session started (seed {}, {} ms ticks)",
            self.state.seed,
            self.config.tick_interval_ms
        );
        Ok(())
    }

    /// Cancel the timer, reset everything and start again
    pub fn restart(
        &mut self,
        ticker: &mut impl TickSource,
        display: &mut impl ScoreDisplay,
    ) -> Result<(), SessionError> {
        self.stop(ticker);
        self.state.reset();
        log::info!("Session restarted");
        self.start(ticker, display)
    }

    /// Cancel the timer, leaving state as it is
    pub fn stop(&mut self, ticker: &mut impl TickSource) {
        if let Some(id) = self.timer.take() {
            ticker.stop(id);
        }
    }

    /// Handle a key press immediately. Returns whether it was a game key.
    pub fn on_key(&mut self, key: &str) -> bool {
        handle_key(
            &mut self.state,
            &self.config.keys,
            self.config.paddle_step,
            key,
        )
    }

    /// Advance physics one tick, refresh the score on goals, then redraw.
    /// Ignored while no timer is running.
    pub fn on_tick(
        &mut self,
        surface: &mut impl RenderSurface,
        display: &mut impl ScoreDisplay,
    ) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let events = tick(&mut self.state);
        if events.iter().any(|e| matches!(e, GameEvent::Goal { .. })) {
            display.show(&self.state.score.to_string());
        }

        self.render(surface);
        events
    }

    /// Redraw the current state without advancing it
    pub fn render(&self, surface: &mut impl RenderSurface) {
        draw_frame(&self.state, &self.config.palette, surface);
    }
}

/// Tick source driven by hand (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualTicker {
    next_id: i32,
    /// Timers started and not yet stopped, with their intervals
    pub active: Vec<(TimerId, u32)>,
    /// Every timer ever stopped
    pub stopped: Vec<TimerId>,
}

impl TickSource for ManualTicker {
    fn start(&mut self, interval_ms: u32) -> Result<TimerId, SessionError> {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.active.push((id, interval_ms));
        Ok(id)
    }

    fn stop(&mut self, id: TimerId) {
        self.active.retain(|(active, _)| *active != id);
        self.stopped.push(id);
    }
}

/// Score display that remembers what it was asked to show
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<String>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&str> {
        self.shown.last().map(String::as_str)
    }
}

impl ScoreDisplay for RecordingDisplay {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Frame};
    use crate::sim::Side;
    use glam::{IVec2, Vec2};

    struct Harness {
        session: Session,
        ticker: ManualTicker,
        display: RecordingDisplay,
        frame: Frame,
    }

    impl Harness {
        fn new(seed: u64) -> Self {
            let config = GameConfig::default();
            let frame = Frame::new(config.arena_width, config.arena_height);
            Self {
                session: Session::new(config, seed).expect("default config is valid"),
                ticker: ManualTicker::default(),
                display: RecordingDisplay::default(),
                frame,
            }
        }

        fn start(&mut self) {
            self.session
                .start(&mut self.ticker, &mut self.display)
                .expect("manual ticker never fails");
        }

        fn restart(&mut self) {
            self.session
                .restart(&mut self.ticker, &mut self.display)
                .expect("manual ticker never fails");
        }

        fn tick(&mut self) -> Vec<GameEvent> {
            self.frame.clear();
            self.session.on_tick(&mut self.frame, &mut self.display)
        }
    }

    #[test]
    fn test_start_shows_score_and_launches() {
        let mut h = Harness::new(1);
        h.start();

        assert_eq!(h.display.last(), Some("0 : 0"));
        assert_eq!(h.ticker.active.len(), 1);
        assert_eq!(h.ticker.active[0].1, 20);
        let dir = h.session.state().ball.dir;
        assert_eq!(dir.x.abs(), 1);
        assert_eq!(dir.y.abs(), 1);
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut h = Harness::new(1);
        h.session.state_mut().ball.dir = IVec2::new(1, 1);
        assert!(h.tick().is_empty());
        assert!(h.frame.commands.is_empty());
        assert_eq!(h.session.state().ball.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_tick_renders_after_physics() {
        let mut h = Harness::new(1);
        h.start();
        h.tick();

        let ball = h.session.state().ball;
        assert_eq!(h.frame.commands.len(), 4);
        assert_eq!(
            h.frame.commands[3],
            DrawCommand::Circle {
                center: ball.pos,
                radius: 13.0,
                color: h.session.config().palette.ball,
            }
        );
        assert_ne!(ball.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_goal_updates_display() {
        let mut h = Harness::new(1);
        h.start();
        {
            let state = h.session.state_mut();
            state.ball.pos = Vec2::new(790.0, 250.0);
            state.ball.dir = IVec2::new(1, 0);
        }

        h.tick();
        h.tick();
        assert_eq!(h.display.last(), Some("0 : 0"));

        let events = h.tick();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::Goal {
                scorer: Side::Left,
                ..
            }]
        ));
        assert_eq!(h.display.last(), Some("1 : 0"));
        assert_eq!(h.session.state().ball.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_restart_resets_and_replaces_timer() {
        let mut h = Harness::new(1);
        h.start();
        let first = h.session.timer().expect("running");

        {
            let state = h.session.state_mut();
            state.score = Score { left: 3, right: 2 };
            state.left.pos.y = 200.0;
            state.right.pos.y = 40.0;
            state.ball.pos = Vec2::new(100.0, 100.0);
            state.ball.speed = 8.0;
        }

        h.restart();

        let state = h.session.state();
        assert_eq!(state.score, Score::default());
        assert_eq!(state.left.pos, Vec2::new(0.0, 0.0));
        assert_eq!(state.right.pos, Vec2::new(775.0, 380.0));
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.ball.speed, 5.0);
        assert_eq!(h.display.last(), Some("0 : 0"));

        let second = h.session.timer().expect("running");
        assert_ne!(first, second);
        assert_eq!(h.ticker.stopped, vec![first]);
        assert_eq!(h.ticker.active.len(), 1);
        assert_eq!(h.ticker.active[0].0, second);
    }

    #[test]
    fn test_repeated_restarts_keep_one_timer() {
        let mut h = Harness::new(1);
        h.start();
        for _ in 0..5 {
            h.restart();
        }
        assert_eq!(h.ticker.active.len(), 1);
        assert_eq!(h.ticker.stopped.len(), 5);
    }

    #[test]
    fn test_double_start_replaces_timer() {
        let mut h = Harness::new(1);
        h.start();
        h.start();
        assert_eq!(h.ticker.active.len(), 1);
        assert_eq!(h.ticker.stopped.len(), 1);
    }

    #[test]
    fn test_score_persists_across_goals() {
        let mut h = Harness::new(42);
        h.start();
        let mut last = Score::default();
        for _ in 0..5000 {
            h.tick();
            let score = h.session.score();
            assert!(score.left >= last.left && score.right >= last.right);
            last = score;
        }
        // Untouched paddles let plenty of balls through
        assert!(last.left + last.right > 0);
    }

    #[test]
    fn test_keys_move_paddles_between_ticks() {
        let mut h = Harness::new(1);
        h.start();
        assert!(h.session.on_key("s"));
        assert!(h.session.on_key("ArrowUp"));
        assert!(!h.session.on_key("Shift"));
        assert_eq!(h.session.state().left.pos.y, 40.0);
        assert_eq!(h.session.state().right.pos.y, 340.0);

        h.tick();
        assert!(matches!(
            h.frame.commands[1],
            DrawCommand::Rect { origin, .. } if origin == Vec2::new(0.0, 40.0)
        ));
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut h = Harness::new(1);
        h.start();
        h.session.stop(&mut h.ticker);
        assert!(!h.session.is_running());
        let before = h.session.state().ball.pos;
        h.tick();
        assert_eq!(h.session.state().ball.pos, before);
    }

    #[test]
    fn test_new_rejects_oversized_paddles() {
        let config = GameConfig {
            arena_height: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(config, 1),
            Err(ConfigError::PaddleTooLarge { .. })
        ));
    }

    #[test]
    fn test_new_rejects_ball_wider_than_arena() {
        let config = GameConfig {
            ball_radius: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(config, 1),
            Err(ConfigError::BallTooLarge { .. })
        ));
    }
}
