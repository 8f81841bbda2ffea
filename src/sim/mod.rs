//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{goal_scorer, hits_paddle, hits_wall};
pub use input::{PaddleMove, Vertical, apply_move, handle_key};
pub use state::{Arena, Ball, GameEvent, GameState, Paddle, Score, Side};
pub use tick::tick;
