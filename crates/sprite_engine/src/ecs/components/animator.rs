//! Plays a scene animation on the owning object
//!
//! The animation definition stays in the scene; the animator only holds the
//! playback state and applies each entered frame's actions to sibling
//! components through the attribute protocol. Failed actions are logged and
//! skipped so one bad key never stops the timeline.

use crate::animation::{Action, AnimationPlayer};
use crate::attr::{AttrError, AttrValue, Coerce};
use crate::ecs::{Component, GameObject};
use crate::scene::FrameContext;

/// Registered type name
pub const TYPE_NAME: &str = "Animator";

/// Drives one named animation against its own game object
#[derive(Debug, Clone)]
pub struct Animator {
    animation: Option<String>,
    /// Requested state; playback starts on the next update
    playing: bool,
    player: AnimationPlayer,
    missing_reported: bool,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Animator {
    /// Create an animator that starts playing `animation` on its first update
    pub fn new(animation: Option<&str>) -> Self {
        Self {
            animation: animation.map(str::to_string),
            playing: true,
            player: AnimationPlayer::new(),
            missing_reported: false,
        }
    }

    /// Playback state
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    fn apply(object: &mut GameObject, action: &Action) {
        if let Err(err) = object.set_attr(&action.component, &action.attr, &action.value) {
            log::warn!(
                "{}: animation action {}.{} = {} failed: {}",
                object.name(),
                action.component,
                action.attr,
                action.value,
                err
            );
        }
    }
}

impl Component for Animator {
    fn update(&mut self, object: &mut GameObject, frame: &mut FrameContext<'_>) {
        let Some(name) = self.animation.as_deref() else {
            return;
        };
        let Some(animation) = frame.resources.animation(name) else {
            if !self.missing_reported {
                log::warn!("{}: animation {} not found in scene", object.name(), name);
                self.missing_reported = true;
            }
            return;
        };

        if !self.playing {
            return;
        }
        if self.player.is_playing() || self.player.is_finished() {
            self.player
                .tick(animation, object.delta_time(), |action| Self::apply(object, action));
        } else {
            log::debug!("{}: playing animation {}", object.name(), name);
            self.player.play(animation, |action| Self::apply(object, action));
        }
    }

    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        match name {
            "animation" => Ok(AttrValue::from(self.animation.clone().unwrap_or_default())),
            "playing" => Ok(AttrValue::from(self.playing)),
            "finished" => Ok(AttrValue::from(self.player.is_finished())),
            "frame" => Ok(self
                .player
                .current_frame()
                .map_or(AttrValue::Int(-1), |frame| AttrValue::Int(frame as i64))),
            _ => Err(AttrError::not_found(name, TYPE_NAME)),
        }
    }

    fn set_attr(&mut self, name: &str, value: &AttrValue) -> Result<(), AttrError> {
        let coerce = Coerce::new(name, TYPE_NAME, value);
        match name {
            "animation" => {
                let animation = coerce.string()?;
                self.animation = (!animation.is_empty()).then_some(animation);
                self.player.stop();
                self.missing_reported = false;
            }
            "playing" => {
                self.playing = coerce.bool()?;
                // Stopping a finished player makes the next update replay it
                if !self.playing || self.player.is_finished() {
                    self.player.stop();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

/// Factory: `(animation?, playing = true)`
pub fn construct(args: &[AttrValue]) -> Box<dyn Component> {
    let mut animator = Animator::new(args.first().and_then(AttrValue::as_str));
    if let Some(playing) = args.get(1).and_then(AttrValue::as_bool) {
        animator.playing = playing;
    }
    Box::new(animator)
}
