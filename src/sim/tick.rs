//! Fixed timestep simulation tick
//!
//! One call advances the ball, resolves wall and paddle contacts, then checks
//! the goal lines. Only the current (position, direction, speed) matters.

use super::collision::{clamp_to_walls, face_x, goal_scorer, hits_paddle, hits_wall};
use super::state::{GameEvent, GameState, Side};

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Advance
    let step = state.ball.step();
    state.ball.pos += step;

    // Top/bottom walls
    if hits_wall(&state.ball, &state.arena) {
        state.ball.dir.y = -state.ball.dir.y;
        clamp_to_walls(&mut state.ball, &state.arena);
        events.push(GameEvent::WallBounce);
    }

    // Paddles. Both are tested before either is resolved; a double hit
    // boosts and reflects once and the left face wins the clamp.
    let left_hit = hits_paddle(&state.ball, &state.left, Side::Left);
    let right_hit = hits_paddle(&state.ball, &state.right, Side::Right);
    let hit_side = if left_hit {
        Some(Side::Left)
    } else if right_hit {
        Some(Side::Right)
    } else {
        None
    };

    if let Some(side) = hit_side {
        state.ball.speed *= state.speed_growth;
        state.ball.dir.x = -state.ball.dir.x;
        state.ball.pos.x = face_x(state.paddle(side), side, state.ball.radius);
        log::debug!("{:?} paddle hit, speed {:.2}", side, state.ball.speed);
        events.push(GameEvent::PaddleHit {
            side,
            speed: state.ball.speed,
        });
    }

    // Goal lines
    if let Some(scorer) = goal_scorer(&state.ball, &state.arena) {
        state.score.award(scorer);
        state.reset_ball();
        log::info!("{:?} scores: {}", scorer, state.score);
        events.push(GameEvent::Goal {
            scorer,
            score: state.score,
        });
    }

    events
}
