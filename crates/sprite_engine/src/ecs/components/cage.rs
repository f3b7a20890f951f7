//! Keeps an object inside an axis-aligned box

use crate::attr::{AttrError, AttrValue, Coerce};
use crate::ecs::{Component, GameObject};
use crate::foundation::math::Vec2;
use crate::scene::FrameContext;

/// Registered type name
pub const TYPE_NAME: &str = "Cage";

/// Clamps the object position into `[min, max]` every tick.
///
/// Put it after movement components so the clamped position is the one
/// renderers see.
#[derive(Debug, Clone)]
pub struct Cage {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl Default for Cage {
    fn default() -> Self {
        Self {
            min: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            max: Vec2::new(f32::INFINITY, f32::INFINITY),
        }
    }
}

impl Cage {
    /// Create a cage from its corners
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Clamp a point into the cage; a max below its min wins
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }
}

impl Component for Cage {
    fn update(&mut self, object: &mut GameObject, _frame: &mut FrameContext<'_>) {
        object.transform.position = self.clamp(object.transform.position);
    }

    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        match name {
            "minX" => Ok(AttrValue::from(self.min.x)),
            "minY" => Ok(AttrValue::from(self.min.y)),
            "maxX" => Ok(AttrValue::from(self.max.x)),
            "maxY" => Ok(AttrValue::from(self.max.y)),
            _ => Err(AttrError::not_found(name, TYPE_NAME)),
        }
    }

    fn set_attr(&mut self, name: &str, value: &AttrValue) -> Result<(), AttrError> {
        let coerce = Coerce::new(name, TYPE_NAME, value);
        match name {
            "minX" => self.min.x = coerce.f32()?,
            "minY" => self.min.y = coerce.f32()?,
            "maxX" => self.max.x = coerce.f32()?,
            "maxY" => self.max.y = coerce.f32()?,
            _ => {}
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

/// Factory: `(minX, minY, maxX, maxY)`, unbounded where omitted
pub fn construct(args: &[AttrValue]) -> Box<dyn Component> {
    Box::new(Cage::new(
        super::arg_f32(args, 0, TYPE_NAME, f32::NEG_INFINITY),
        super::arg_f32(args, 1, TYPE_NAME, f32::NEG_INFINITY),
        super::arg_f32(args, 2, TYPE_NAME, f32::INFINITY),
        super::arg_f32(args, 3, TYPE_NAME, f32::INFINITY),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn test_mover_then_cage() {
        let mut scene = Scene::new("cage");
        let object = scene.new_game_object("ship");
        object
            .add_component("move", Box::new(crate::ecs::components::Mover::new(10.0, -1.0)))
            .unwrap();
        object.add_component("cage", Box::new(Cage::new(-5.0, -5.0, 5.0, 5.0))).unwrap();

        scene.update(0.0);
        scene.update(1.0);

        let ship = scene.find_game_object("ship").unwrap();
        assert_eq!(ship.position(), Vec2::new(5.0, -1.0));
    }

    #[test]
    fn test_unbounded_by_default() {
        let cage = construct(&[]);
        assert_eq!(cage.get_attr("maxX").unwrap(), AttrValue::Float(f64::INFINITY));
        let partial = Cage::new(0.0, 0.0, f32::INFINITY, f32::INFINITY);
        assert_eq!(partial.clamp(Vec2::new(-3.0, 100.0)), Vec2::new(0.0, 100.0));
    }
}
