//! Collision tests for the ball against arena edges and paddles
//!
//! All checks are axis-aligned: the ball is a circle, paddles are rectangles
//! pinned to the left and right edges.

use super::state::{Arena, Ball, Paddle, Side};

/// Ball touches (or has passed) the top or bottom edge
#[inline]
pub fn hits_wall(ball: &Ball, arena: &Arena) -> bool {
    ball.pos.y <= ball.radius || ball.pos.y >= arena.height - ball.radius
}

/// Ball center kept inside the band where it doesn't overlap the walls
#[inline]
pub fn clamp_to_walls(ball: &mut Ball, arena: &Arena) {
    ball.pos.y = ball.pos.y.clamp(ball.radius, arena.height - ball.radius);
}

/// X coordinate of the ball center when resting against a paddle's face
#[inline]
pub fn face_x(paddle: &Paddle, side: Side, radius: f32) -> f32 {
    match side {
        Side::Left => paddle.pos.x + paddle.size.x + radius,
        Side::Right => paddle.pos.x - radius,
    }
}

/// Ball has reached the paddle face while within the paddle's vertical span
pub fn hits_paddle(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    let face = face_x(paddle, side, ball.radius);
    let x_hit = match side {
        Side::Left => ball.pos.x <= face,
        Side::Right => ball.pos.x >= face,
    };
    x_hit && paddle.covers_y(ball.pos.y)
}

/// Which side's goal line the ball has crossed, if any. Returns the scorer.
#[inline]
pub fn goal_scorer(ball: &Ball, arena: &Arena) -> Option<Side> {
    if ball.pos.x > arena.width {
        Some(Side::Left)
    } else if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else {
        None
    }
}
