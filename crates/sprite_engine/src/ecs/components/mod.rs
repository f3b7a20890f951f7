//! Built-in components
//!
//! Each component module exposes a `TYPE_NAME` and a `construct` factory;
//! [`register_builtins`] wires them into a registry.

pub mod animator;
pub mod box_renderer;
pub mod cage;
pub mod mover;
pub mod renderer;
pub mod stats_logger;

pub use animator::Animator;
pub use box_renderer::BoxRenderer;
pub use cage::Cage;
pub use mover::Mover;
pub use renderer::Renderer;
pub use stats_logger::StatsLogger;

use crate::ecs::ComponentRegistry;

/// Register every built-in component type
pub fn register_builtins(registry: &mut ComponentRegistry) {
    registry.register(renderer::TYPE_NAME, renderer::construct);
    registry.register(box_renderer::TYPE_NAME, box_renderer::construct);
    registry.register(mover::TYPE_NAME, mover::construct);
    registry.register(cage::TYPE_NAME, cage::construct);
    registry.register(animator::TYPE_NAME, animator::construct);
    registry.register(stats_logger::TYPE_NAME, stats_logger::construct);
}

/// Positional factory argument as `f32`, falling back to `default` when
/// missing or not numeric
pub(crate) fn arg_f32(args: &[crate::attr::AttrValue], index: usize, type_name: &str, default: f32) -> f32 {
    match args.get(index) {
        None => default,
        Some(value) => value.as_f32().unwrap_or_else(|| {
            log::warn!("{type_name}: argument {index} ({value}) is not a number, using {default}");
            default
        }),
    }
}
