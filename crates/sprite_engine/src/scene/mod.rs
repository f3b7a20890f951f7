//! Scenes
//!
//! A scene owns its game objects and named resources and drives the frame
//! tick. Objects are updated in creation order; only the components inside an
//! object are sorted by priority. Dropping the scene drops everything it owns.

mod frame;
mod resources;

pub use frame::{FrameContext, FrameStats};
pub use resources::{SceneError, SceneResources, Texture};

use crate::animation::Animation;
use crate::config::RuntimeConfig;
use crate::ecs::GameObject;
use crate::render::{DrawQueue, GraphicsBackend};
use std::path::PathBuf;

/// Owner of game objects, textures and animations
#[derive(Debug)]
pub struct Scene {
    /// Scene name
    pub name: String,
    config: RuntimeConfig,
    objects: Vec<GameObject>,
    resources: SceneResources,
    draw_queue: DrawQueue,
    stats: FrameStats,
    last_time: f64,
}

impl Scene {
    /// Create an empty scene with the default runtime configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, RuntimeConfig::default())
    }

    /// Create an empty scene
    pub fn with_config(name: impl Into<String>, config: RuntimeConfig) -> Self {
        Self {
            name: name.into(),
            config,
            objects: Vec::new(),
            resources: SceneResources::default(),
            draw_queue: DrawQueue::new(),
            stats: FrameStats::default(),
            last_time: 0.0,
        }
    }

    /// Runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create a game object at the end of the update order
    pub fn new_game_object(&mut self, name: impl Into<String>) -> &mut GameObject {
        self.objects.push(GameObject::new(name));
        let index = self.objects.len() - 1;
        &mut self.objects[index]
    }

    /// First game object called `name`
    pub fn find_game_object(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.name() == name)
    }

    /// First game object called `name`, mutably
    pub fn find_game_object_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.name() == name)
    }

    /// Game objects in creation order
    pub fn game_objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Textures and animations
    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// Register a texture backed by an image file. The image is not read
    /// until [`Scene::load_textures`].
    pub fn new_texture_from_filename(
        &mut self,
        name: impl Into<String>,
        filename: impl Into<PathBuf>,
    ) -> Result<&mut Texture, SceneError> {
        let name = name.into();
        let filename = filename.into();
        if name.is_empty() {
            return Err(SceneError::MissingTextureName);
        }
        if filename.as_os_str().is_empty() {
            return Err(SceneError::MissingFilename(name));
        }
        Ok(self.resources.insert_texture(Texture::from_file(name, filename)))
    }

    /// Register an already-described texture
    pub fn add_texture(&mut self, texture: Texture) -> &mut Texture {
        self.resources.insert_texture(texture)
    }

    /// Look up a texture
    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.resources.texture(name)
    }

    /// Register an empty animation; add frames through the returned reference
    pub fn add_animation(&mut self, name: impl Into<String>, fps: u32, looping: bool) -> &mut Animation {
        self.resources.insert_animation(Animation::new(name, fps, looping))
    }

    /// Look up an animation
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.resources.animation(name)
    }

    /// Read dimensions of every texture not loaded yet. Failures are logged and
    /// the texture stays not ready. Returns the number of textures loaded.
    pub fn load_textures(&mut self) -> usize {
        let mut loaded = 0;
        for texture in self.resources.textures_mut().filter(|texture| !texture.is_ready()) {
            match texture.load() {
                Ok(()) => loaded += 1,
                Err(err) => log::warn!("{}", err),
            }
        }
        loaded
    }

    /// Advance the scene to timestamp `now` (seconds).
    ///
    /// The delta time is the difference from the previous call, or from zero
    /// on the first call. A clock running backwards yields zero. Every object is updated in
    /// creation order. Draws queued by the previous tick are discarded, so
    /// [`Scene::flush`] them before ticking again.
    pub fn update(&mut self, now: f64) {
        let delta_time = if now >= self.last_time {
            (now - self.last_time) as f32
        } else {
            log::warn!("Scene {}: time went backwards ({} -> {})", self.name, self.last_time, now);
            0.0
        };
        self.last_time = now;

        self.draw_queue.clear();
        self.stats = FrameStats::default();

        let mut frame = FrameContext {
            resources: &self.resources,
            draw_queue: &mut self.draw_queue,
            stats: &mut self.stats,
            projection: self.config.projection.to_matrix(),
            pixels_per_unit: self.config.pixels_per_unit,
        };
        for object in &mut self.objects {
            object.update(delta_time, &mut frame);
            frame.stats.objects_updated += 1;
        }

        self.stats.draw_calls = self.draw_queue.len();
    }

    /// Timestamp of the last tick, zero before the first one
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Counters of the last tick
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Draws queued by the last tick
    pub fn draw_queue(&self) -> &DrawQueue {
        &self.draw_queue
    }

    /// Submit the last tick's draws to `backend`
    pub fn flush(&mut self, backend: &mut dyn GraphicsBackend) {
        self.draw_queue.submit(backend);
    }
}
