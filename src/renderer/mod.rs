//! Rendering module
//!
//! The scene is drawn through [`RenderSurface`], so the same drawing code
//! feeds the headless [`Frame`] recorder and the WebGPU pipeline.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{DrawCommand, Frame};
pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;

use crate::config::Palette;
use crate::sim::GameState;

/// Minimal fill-only 2D drawing surface in arena coordinates
/// (top-left origin, y down)
pub trait RenderSurface {
    fn fill_background(&mut self, color: [f32; 4]);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [f32; 4]);
}

/// Full redraw: board, both paddles, then the ball on top
pub fn draw_frame(state: &GameState, palette: &Palette, surface: &mut impl RenderSurface) {
    surface.fill_background(palette.board);

    for (paddle, color) in [
        (&state.left, palette.left_paddle),
        (&state.right, palette.right_paddle),
    ] {
        surface.fill_rect(
            paddle.pos.x,
            paddle.pos.y,
            paddle.size.x,
            paddle.size.y,
            color,
        );
    }

    let ball = &state.ball;
    surface.fill_circle(ball.pos.x, ball.pos.y, ball.radius, palette.ball);
}
