//! Keyboard input mapping
//!
//! Key presses are discrete: each recognized press moves one paddle by a fixed
//! step immediately, independent of the tick cadence.

use super::state::{GameState, Side};
use crate::config::KeyBindings;

/// Vertical direction requested for a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// A resolved paddle command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleMove {
    pub side: Side,
    pub dir: Vertical,
}

impl KeyBindings {
    /// Resolve a key identifier to the paddle move it requests
    pub fn resolve(&self, key: &str) -> Option<PaddleMove> {
        let (side, dir) = if key == self.left_up {
            (Side::Left, Vertical::Up)
        } else if key == self.left_down {
            (Side::Left, Vertical::Down)
        } else if key == self.right_up {
            (Side::Right, Vertical::Up)
        } else if key == self.right_down {
            (Side::Right, Vertical::Down)
        } else {
            return None;
        };
        Some(PaddleMove { side, dir })
    }
}

/// Move a paddle one step, clamped to the arena
pub fn apply_move(state: &mut GameState, mv: PaddleMove, step: f32) {
    let dy = match mv.dir {
        Vertical::Up => -step,
        Vertical::Down => step,
    };
    let arena = state.arena;
    state.paddle_mut(mv.side).shift(dy, &arena);
}

/// Handle a key press. Returns whether the key was bound to a paddle.
pub fn handle_key(state: &mut GameState, keys: &KeyBindings, step: f32, key: &str) -> bool {
    match keys.resolve(key) {
        Some(mv) => {
            apply_move(state, mv, step);
            log::trace!("{:?} paddle {:?} -> y={}", mv.side, mv.dir, state.paddle(mv.side).pos.y);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn setup() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        (GameState::new(&config, 1), config)
    }

    #[test]
    fn test_resolve_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.resolve("w"),
            Some(PaddleMove {
                side: Side::Left,
                dir: Vertical::Up
            })
        );
        assert_eq!(
            keys.resolve("ArrowDown"),
            Some(PaddleMove {
                side: Side::Right,
                dir: Vertical::Down
            })
        );
        assert_eq!(keys.resolve("W"), None);
        assert_eq!(keys.resolve("Enter"), None);
    }

    #[test]
    fn test_left_up_at_top_is_noop() {
        let (mut state, config) = setup();
        assert_eq!(state.left.pos.y, 0.0);
        assert!(handle_key(&mut state, &config.keys, config.paddle_step, "w"));
        assert_eq!(state.left.pos.y, 0.0);
    }

    #[test]
    fn test_left_down_moves_one_step() {
        let (mut state, config) = setup();
        handle_key(&mut state, &config.keys, config.paddle_step, "s");
        assert_eq!(state.left.pos.y, 40.0);
        // Right paddle untouched
        assert_eq!(state.right.pos.y, 380.0);
    }

    #[test]
    fn test_right_paddle_clamps_at_bottom() {
        let (mut state, config) = setup();
        handle_key(&mut state, &config.keys, config.paddle_step, "ArrowDown");
        assert_eq!(state.right.pos.y, 380.0);
        handle_key(&mut state, &config.keys, config.paddle_step, "ArrowUp");
        assert_eq!(state.right.pos.y, 340.0);
    }

    #[test]
    fn test_partial_step_is_clamped() {
        let (mut state, config) = setup();
        state.left.pos.y = 20.0;
        handle_key(&mut state, &config.keys, config.paddle_step, "w");
        assert_eq!(state.left.pos.y, 0.0);

        state.right.pos.y = 370.0;
        handle_key(&mut state, &config.keys, config.paddle_step, "ArrowDown");
        assert_eq!(state.right.pos.y, 380.0);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let (mut state, config) = setup();
        let before = (state.left, state.right);
        assert!(!handle_key(&mut state, &config.keys, config.paddle_step, "x"));
        assert_eq!((state.left, state.right), before);
    }
}
