//! Draw submission contract
//!
//! Rendering components never talk to the GPU. Each tick they compute the
//! parameters of one draw (mesh, destination half-extents, UV cell, colors and
//! the combined transform) and push a [`DrawCall`] into the scene's
//! [`DrawQueue`]. The hosting runtime hands the queue to a [`GraphicsBackend`],
//! which owns buffers, shaders and the actual submission.

use crate::foundation::math::{Mat4, Vec2, Vec4};

/// Built-in quad meshes understood by backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit quad with texture coordinates
    TexturedQuad,
    /// Unit quad drawn with a solid color
    SolidQuad,
}

/// Everything a backend needs to issue one draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Mesh to draw
    pub mesh: MeshKind,
    /// Texture to sample, `None` for solid meshes
    pub texture: Option<String>,
    /// Half width and half height of the destination rectangle
    pub half_extents: Vec2,
    /// Top-left corner of the UV cell
    pub uv_offset: Vec2,
    /// Size of the UV cell
    pub uv_size: Vec2,
    /// Color added to each fragment
    pub add_color: Vec4,
    /// Color multiplied with each fragment
    pub mul_color: Vec4,
    /// Projection * model
    pub transform: Mat4,
}

/// Draw calls collected during one tick, in submission order
#[derive(Debug, Default)]
pub struct DrawQueue {
    calls: Vec<DrawCall>,
}

impl DrawQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a draw call
    pub fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    /// Number of queued calls
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing was queued
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Queued calls in order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Remove all calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Submit every queued call to `backend`, then empty the queue
    pub fn submit(&mut self, backend: &mut dyn GraphicsBackend) {
        for call in self.calls.drain(..) {
            backend.draw(&call);
        }
    }
}

/// Graphics backend collaborator
pub trait GraphicsBackend {
    /// Submit one draw
    fn draw(&mut self, call: &DrawCall);
}

/// Backend that keeps every submitted call; used by headless hosts and tests
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Calls received so far
    pub calls: Vec<DrawCall>,
}

impl GraphicsBackend for RecordingBackend {
    fn draw(&mut self, call: &DrawCall) {
        self.calls.push(call.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_call() -> DrawCall {
        DrawCall {
            mesh: MeshKind::SolidQuad,
            texture: None,
            half_extents: Vec2::new(0.5, 0.5),
            uv_offset: Vec2::zeros(),
            uv_size: Vec2::new(1.0, 1.0),
            add_color: Vec4::zeros(),
            mul_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            transform: Mat4::identity(),
        }
    }

    #[test]
    fn test_submit_drains_queue_in_order() {
        let mut queue = DrawQueue::new();
        let mut second = solid_call();
        second.half_extents = Vec2::new(2.0, 2.0);
        queue.push(solid_call());
        queue.push(second.clone());

        let mut backend = RecordingBackend::default();
        queue.submit(&mut backend);

        assert!(queue.is_empty());
        assert_eq!(backend.calls.len(), 2);
        assert_eq!(backend.calls[1], second);
    }
}
