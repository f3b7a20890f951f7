//! # Sprite Engine
//!
//! Runtime core of a small 2D engine. Game objects are named bags of keyed
//! components; scenes own objects, textures and animations and drive the frame
//! tick; whole scenes can be described in data and loaded at startup.
//!
//! ## Features
//!
//! - **Keyed Components**: Priority-ordered components addressed by key
//! - **Attribute Protocol**: Read and write component state by name
//! - **Data-Driven Scenes**: JSON, RON and TOML scene descriptions
//! - **Keyframe Animation**: Timelines of attribute writes
//! - **Backend Agnostic**: Renderers queue draw calls for any graphics backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     sprite_engine::foundation::logging::init();
//!
//!     let mut scene = load_scene_from_file("assets/scenes/demo.ron")?;
//!     scene.load_textures();
//!
//!     let mut backend = RecordingBackend::default();
//!     for tick in 0..60 {
//!         scene.update(f64::from(tick) / 60.0);
//!         scene.flush(&mut backend);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod animation;
pub mod attr;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod loader;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{Action, Animation, AnimationPlayer, PlaybackState},
        attr::{AttrError, AttrValue, Coerce},
        config::{Config, RuntimeConfig},
        ecs::{
            components::{Animator, BoxRenderer, Cage, Mover, Renderer, StatsLogger},
            registry::{construct_component, register_component},
            Component, ComponentRegistry, EntityError, GameObject,
        },
        foundation::math::{Mat4, Transform2D, Vec2, Vec4},
        loader::{load_scene_from_file, load_scene_from_str, LoadError, SceneFormat, SceneLoader},
        render::{DrawCall, DrawQueue, GraphicsBackend, RecordingBackend},
        scene::{FrameContext, Scene, SceneError, Texture},
    };
}
