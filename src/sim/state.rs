//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; the session owns
//! exactly one of these.

use std::fmt;

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::GameConfig;

/// Which player / paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Left,
    Right,
}

/// Fixed playing field, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A paddle, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    /// Initial placement: left paddle at the top, right paddle at the bottom
    pub fn initial(side: Side, arena: &Arena, size: Vec2) -> Self {
        let pos = match side {
            Side::Left => Vec2::ZERO,
            Side::Right => Vec2::new(arena.width - size.x, arena.height - size.y),
        };
        Self { pos, size }
    }

    /// Lowest allowed y for the top edge
    #[inline]
    pub fn max_y(&self, arena: &Arena) -> f32 {
        arena.height - self.size.y
    }

    /// Vertical extent covered by the paddle (inclusive)
    #[inline]
    pub fn covers_y(&self, y: f32) -> bool {
        y >= self.pos.y && y <= self.pos.y + self.size.y
    }

    /// Move vertically by `dy`, clamped to the arena
    pub fn shift(&mut self, dy: f32, arena: &Arena) {
        self.pos.y = (self.pos.y + dy).clamp(0.0, self.max_y(arena));
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Per-axis direction, each component in {-1, 0, 1}
    pub dir: IVec2,
    pub radius: f32,
    /// Distance travelled per tick along each moving axis
    pub speed: f32,
}

impl Ball {
    /// Displacement applied by one tick
    #[inline]
    pub fn step(&self) -> Vec2 {
        self.dir.as_vec2() * self.speed
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.left, self.right)
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// Ball reflected off the top or bottom edge
    WallBounce,
    /// Ball reflected off a paddle; carries the boosted speed
    PaddleHit { side: Side, speed: f32 },
    /// Ball left the arena; `scorer` gained a point
    Goal { scorer: Side, score: Score },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub arena: Arena,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Speed restored after every goal
    pub start_speed: f32,
    /// Speed multiplier per paddle hit
    pub speed_growth: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed. The ball starts centered
    /// and motionless until [`GameState::launch_ball`]. `config` must pass
    /// [`GameConfig::validate`].
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let arena = Arena {
            width: config.arena_width,
            height: config.arena_height,
        };
        let paddle_size = Vec2::new(config.paddle_width, config.paddle_height);

        Self {
            seed,
            arena,
            left: Paddle::initial(Side::Left, &arena, paddle_size),
            right: Paddle::initial(Side::Right, &arena, paddle_size),
            ball: Ball {
                pos: arena.center(),
                dir: IVec2::ZERO,
                radius: config.ball_radius,
                speed: config.ball_start_speed,
            },
            score: Score::default(),
            start_speed: config.ball_start_speed,
            speed_growth: config.speed_growth,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restore paddles, ball, speed and score to their initial values.
    /// The RNG keeps its stream so restarted matches don't replay.
    pub fn reset(&mut self) {
        let size = self.left.size;
        self.left = Paddle::initial(Side::Left, &self.arena, size);
        self.right = Paddle::initial(Side::Right, &self.arena, size);
        self.ball.pos = self.arena.center();
        self.ball.dir = IVec2::ZERO;
        self.ball.speed = self.start_speed;
        self.score = Score::default();
        self.time_ticks = 0;
    }

    /// Recenter the ball after a goal. Scores are untouched.
    pub fn reset_ball(&mut self) {
        self.ball.pos = self.arena.center();
        self.ball.speed = self.start_speed;
        self.launch_ball();
    }

    /// Pick a fresh diagonal direction: two independent fair coin flips
    pub fn launch_ball(&mut self) {
        let x = if self.rng.random_bool(0.5) { 1 } else { -1 };
        let y = if self.rng.random_bool(0.5) { 1 } else { -1 };
        self.ball.dir = IVec2::new(x, y);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(&GameConfig::default(), 7)
    }

    #[test]
    fn test_initial_layout() {
        let state = state();
        assert_eq!(state.left.pos, Vec2::new(0.0, 0.0));
        assert_eq!(state.right.pos, Vec2::new(775.0, 380.0));
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.ball.dir, IVec2::ZERO);
        assert_eq!(state.ball.speed, 5.0);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_launch_is_diagonal() {
        let mut state = state();
        for _ in 0..100 {
            state.launch_ball();
            assert_eq!(state.ball.dir.x.abs(), 1);
            assert_eq!(state.ball.dir.y.abs(), 1);
        }
    }

    #[test]
    fn test_launch_covers_all_diagonals() {
        let mut state = state();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            state.launch_ball();
            seen.insert((state.ball.dir.x, state.ball.dir.y));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_launch_diagonals_equally_likely() {
        let mut state = GameState::new(&GameConfig::default(), 2024);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..40_000 {
            state.launch_ball();
            *counts.entry((state.ball.dir.x, state.ball.dir.y)).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 4);
        for (dir, count) in counts {
            // 25% each, within 4 points of a percent
            assert!((9_600..=10_400).contains(&count), "{:?} launched {} times", dir, count);
        }
    }

    #[test]
    fn test_same_seed_same_launches() {
        let config = GameConfig::default();
        let mut a = GameState::new(&config, 99999);
        let mut b = GameState::new(&config, 99999);
        for _ in 0..32 {
            a.launch_ball();
            b.launch_ball();
            assert_eq!(a.ball.dir, b.ball.dir);
        }
    }

    #[test]
    fn test_reset_ball_keeps_score() {
        let mut state = state();
        state.score = Score { left: 2, right: 1 };
        state.ball.pos = Vec2::new(810.0, 40.0);
        state.ball.speed = 9.0;

        state.reset_ball();

        assert_eq!(state.score, Score { left: 2, right: 1 });
        assert_eq!(state.ball.pos, state.arena.center());
        assert_eq!(state.ball.speed, state.start_speed);
        assert_ne!(state.ball.dir.x, 0);
        assert_ne!(state.ball.dir.y, 0);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = state();
        state.score = Score { left: 3, right: 2 };
        state.left.pos.y = 200.0;
        state.right.pos.y = 40.0;
        state.ball.speed = 7.5;
        state.launch_ball();

        state.reset();

        assert_eq!(state.score, Score::default());
        assert_eq!(state.left.pos.y, 0.0);
        assert_eq!(state.right.pos.y, 380.0);
        assert_eq!(state.ball.pos, state.arena.center());
        assert_eq!(state.ball.speed, 5.0);
    }

    #[test]
    fn test_paddle_shift_clamps() {
        let arena = Arena {
            width: 800.0,
            height: 500.0,
        };
        let mut paddle = Paddle::initial(Side::Left, &arena, Vec2::new(25.0, 120.0));
        paddle.shift(-40.0, &arena);
        assert_eq!(paddle.pos.y, 0.0);
        paddle.shift(1000.0, &arena);
        assert_eq!(paddle.pos.y, 380.0);
    }

    #[test]
    fn test_score_display() {
        let mut score = Score::default();
        score.award(Side::Left);
        score.award(Side::Left);
        score.award(Side::Right);
        assert_eq!(score.to_string(), "2 : 1");
        assert_eq!(score.get(Side::Left), 2);
    }
}
