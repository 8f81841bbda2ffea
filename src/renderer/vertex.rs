//! Vertex format shared by the tessellator and the GPU pipeline
//!
//! [`Frame::tessellate`](super::Frame::tessellate) emits a plain triangle list
//! in arena coordinates (top-left origin, y down). The pipeline maps each
//! vertex to clip space with [`Vertex::to_clip_space`] before upload.

use bytemuck::{Pod, Zeroable};

use super::pipeline::arena_to_ndc;

/// Corner of a filled triangle: position plus flat RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same vertex with its arena position mapped to normalized device coordinates
    pub fn to_clip_space(self, arena: (f32, f32)) -> Self {
        let (x, y) = arena_to_ndc(arena, self.position[0], self.position[1]);
        Self::new(x, y, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
