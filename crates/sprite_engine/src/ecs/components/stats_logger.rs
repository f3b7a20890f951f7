//! Per-frame diagnostics
//!
//! Logs the number of draw calls queued so far in the frame whenever it
//! changes. Give it a high priority (or attach it to the last object) so it
//! observes the whole frame.

use crate::attr::{AttrError, AttrValue};
use crate::ecs::{Component, GameObject};
use crate::scene::FrameContext;

/// Registered type name
pub const TYPE_NAME: &str = "StatsLogger";

/// Logs draw call counts when they change
#[derive(Debug, Clone, Default)]
pub struct StatsLogger {
    last_draw_calls: Option<usize>,
}

impl Component for StatsLogger {
    fn update(&mut self, object: &mut GameObject, frame: &mut FrameContext<'_>) {
        let draw_calls = frame.draw_queue.len();
        if self.last_draw_calls != Some(draw_calls) {
            log::info!("{}: draw calls = {}", object.name(), draw_calls);
        }
        self.last_draw_calls = Some(draw_calls);
    }

    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        match name {
            "drawCalls" => Ok(AttrValue::Int(self.last_draw_calls.unwrap_or(0) as i64)),
            _ => Err(AttrError::not_found(name, TYPE_NAME)),
        }
    }

    fn set_attr(&mut self, _name: &str, _value: &AttrValue) -> Result<(), AttrError> {
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

/// Factory: no arguments
pub fn construct(_args: &[AttrValue]) -> Box<dyn Component> {
    Box::new(StatsLogger::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn test_sees_draws_of_earlier_components() {
        let mut scene = Scene::new("stats");
        let boxes = scene.new_game_object("boxes");
        boxes.set_order(9999);
        boxes.add_component_by_name("stats", TYPE_NAME, &[]).unwrap();
        boxes.set_order(0);
        boxes.add_component_by_name("a", "BoxRenderer", &[]).unwrap();
        boxes.add_component_by_name("b", "BoxRenderer", &[]).unwrap();

        scene.update(0.0);

        let boxes = scene.find_game_object("boxes").unwrap();
        assert_eq!(boxes.get_attr("stats", "drawCalls").unwrap(), AttrValue::Int(2));
        assert_eq!(scene.stats().draw_calls, 2);
    }
}
