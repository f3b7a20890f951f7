//! Per-tick context handed to components

use crate::config::DEFAULT_PIXELS_PER_UNIT;
use crate::foundation::math::{Mat4, OrthoBounds};
use crate::render::DrawQueue;
use crate::scene::SceneResources;

/// Counters gathered during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Game objects updated
    pub objects_updated: usize,
    /// Component updates run
    pub components_updated: usize,
    /// Draw calls queued
    pub draw_calls: usize,
}

/// What a component can reach during `update` besides its own object
pub struct FrameContext<'a> {
    /// Scene textures and animations (read-only during a tick)
    pub resources: &'a SceneResources,
    /// Draws queued this tick
    pub draw_queue: &'a mut DrawQueue,
    /// Counters for this tick
    pub stats: &'a mut FrameStats,
    /// Projection applied to every model matrix
    pub projection: Mat4,
    /// Default texture pixels per world unit
    pub pixels_per_unit: u32,
}

impl<'a> FrameContext<'a> {
    /// Context with the default projection and pixel density
    pub fn new(resources: &'a SceneResources, draw_queue: &'a mut DrawQueue, stats: &'a mut FrameStats) -> Self {
        Self {
            resources,
            draw_queue,
            stats,
            projection: OrthoBounds::default().to_matrix(),
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
        }
    }
}
