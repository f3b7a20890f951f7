//! Keyframe animation
//!
//! An [`Animation`] is a named timeline of frames; every frame is a list of
//! attribute writes ([`Action`]s). Playback state lives in an
//! [`AnimationPlayer`] so one definition stored in the scene can drive any
//! number of game objects independently.

use crate::attr::AttrValue;

/// One attribute write: `set_attr(component, attr, value)` on the target object
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Key of the target component within the game object
    pub component: String,
    /// Attribute name
    pub attr: String,
    /// Value to write
    pub value: AttrValue,
}

impl Action {
    /// Create an action
    pub fn new(component: impl Into<String>, attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            component: component.into(),
            attr: attr.into(),
            value: value.into(),
        }
    }
}

/// A single time step of an animation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Writes applied when playback enters this frame
    pub actions: Vec<Action>,
}

/// Named, keyframed timeline of attribute writes
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Animation name, unique within a scene
    pub name: String,
    /// Frames per second; zero makes the animation inert
    pub fps: u32,
    /// Wrap to the first frame after the last one
    pub looping: bool,
    frames: Vec<Frame>,
}

impl Animation {
    /// Create an animation without frames
    pub fn new(name: impl Into<String>, fps: u32, looping: bool) -> Self {
        Self {
            name: name.into(),
            fps,
            looping,
            frames: Vec::new(),
        }
    }

    /// Append a frame; frame order is playback order
    pub fn add_frame(&mut self, actions: Vec<Action>) -> &mut Self {
        self.frames.push(Frame { actions });
        self
    }

    /// Frames in playback order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Seconds spent on each frame, `None` when `fps` is zero
    pub fn frame_duration(&self) -> Option<f32> {
        (self.fps > 0).then(|| 1.0 / self.fps as f32)
    }
}

/// Playback state of one animation instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    /// Not started, or stopped explicitly
    Stopped,
    /// Showing `frame`, `elapsed` seconds into it
    Playing {
        /// Index of the current frame
        frame: usize,
        /// Time accumulated in the current frame
        elapsed: f32,
    },
    /// A non-looping animation went past its last frame
    Finished,
}

/// Drives an [`Animation`] forward in time
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    state: PlaybackState,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    /// Create a stopped player
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Stopped,
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the player is advancing frames
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Whether a non-looping animation ran to completion
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Index of the frame being shown, if playing
    pub fn current_frame(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Playing { frame, .. } => Some(frame),
            _ => None,
        }
    }

    /// (Re)start from the first frame, applying its actions immediately
    pub fn play<F>(&mut self, animation: &Animation, mut apply: F)
    where
        F: FnMut(&Action),
    {
        self.state = PlaybackState::Playing { frame: 0, elapsed: 0.0 };
        if let Some(first) = animation.frames().first() {
            first.actions.iter().for_each(&mut apply);
        }
    }

    /// Return to `Stopped` without applying anything
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Advance by `delta_time` seconds, applying the actions of every frame
    /// entered along the way. Several frames may be entered in one call after
    /// a long tick. Returns the number of frames whose actions were applied.
    pub fn tick<F>(&mut self, animation: &Animation, delta_time: f32, mut apply: F) -> usize
    where
        F: FnMut(&Action),
    {
        let PlaybackState::Playing { mut frame, mut elapsed } = self.state else {
            return 0;
        };
        let frame_count = animation.frame_count();
        let Some(duration) = animation.frame_duration() else {
            return 0;
        };
        if frame_count == 0 {
            return 0;
        }

        elapsed += delta_time.max(0.0);
        let total = f64::from(elapsed);
        let duration = f64::from(duration);
        let mut steps = (total / duration).floor() as u64;
        elapsed = (total - steps as f64 * duration).max(0.0) as f32;

        // The last full cycle rewrites every frame, so earlier whole cycles are skipped
        let cycle = frame_count as u64;
        if animation.looping && steps > cycle {
            frame = ((frame as u64 + (steps - cycle) % cycle) % cycle) as usize;
            steps = cycle;
        }

        let mut entered = 0;
        for _ in 0..steps {
            if frame + 1 < frame_count {
                frame += 1;
            } else if animation.looping {
                frame = 0;
            } else {
                self.state = PlaybackState::Finished;
                return entered;
            }
            animation.frames()[frame].actions.iter().for_each(&mut apply);
            entered += 1;
        }

        self.state = PlaybackState::Playing { frame, elapsed };
        entered
    }
}
