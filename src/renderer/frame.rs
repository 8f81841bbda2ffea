//! Recorded draw commands
//!
//! A [`Frame`] is the headless render surface: it keeps the primitives in
//! the order they were issued and can tessellate them for the GPU.

use glam::Vec2;

use super::RenderSurface;
use super::shapes;
use super::vertex::Vertex;

/// A single fill primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Background {
        color: [f32; 4],
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// Draw commands for one full redraw of an arena
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Surface size; backgrounds cover all of it
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Drop recorded commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Convert the commands to a triangle list, painter's order
    pub fn tessellate(&self, circle_segments: u32) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Background { color } => {
                    vertices.extend_from_slice(&shapes::rect(Vec2::ZERO, self.size, color));
                }
                DrawCommand::Rect {
                    origin,
                    size,
                    color,
                } => {
                    vertices.extend_from_slice(&shapes::rect(origin, size, color));
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    vertices.extend(shapes::circle(center, radius, color, circle_segments));
                }
            }
        }
        vertices
    }
}

impl RenderSurface for Frame {
    fn fill_background(&mut self, color: [f32; 4]) {
        self.commands.push(DrawCommand::Background { color });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::Circle {
            center: Vec2::new(cx, cy),
            radius: r,
            color,
        });
    }
}
