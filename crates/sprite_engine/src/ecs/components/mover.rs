//! Constant-velocity movement

use crate::attr::{AttrError, AttrValue, Coerce};
use crate::ecs::{Component, GameObject};
use crate::foundation::math::Vec2;
use crate::scene::FrameContext;

/// Registered type name
pub const TYPE_NAME: &str = "Mover";

/// Moves its object by `velocity * dt` and spins it by `angular_velocity * dt`
#[derive(Debug, Clone, Default)]
pub struct Mover {
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Angular velocity in radians per second
    pub angular_velocity: f32,
}

impl Mover {
    /// Create a mover with a linear velocity
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vec2::new(vx, vy),
            angular_velocity: 0.0,
        }
    }
}

impl Component for Mover {
    fn update(&mut self, object: &mut GameObject, _frame: &mut FrameContext<'_>) {
        let dt = object.delta_time();
        object.add_position(self.velocity.x * dt, self.velocity.y * dt);
        object.transform.rotation += self.angular_velocity * dt;
    }

    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        match name {
            "velocityX" => Ok(AttrValue::from(self.velocity.x)),
            "velocityY" => Ok(AttrValue::from(self.velocity.y)),
            "angularVelocity" => Ok(AttrValue::from(self.angular_velocity)),
            _ => Err(AttrError::not_found(name, TYPE_NAME)),
        }
    }

    fn set_attr(&mut self, name: &str, value: &AttrValue) -> Result<(), AttrError> {
        let coerce = Coerce::new(name, TYPE_NAME, value);
        match name {
            "velocityX" => self.velocity.x = coerce.f32()?,
            "velocityY" => self.velocity.y = coerce.f32()?,
            "angularVelocity" => self.angular_velocity = coerce.f32()?,
            _ => {}
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

/// Factory: `(velocityX = 0, velocityY = 0)`
pub fn construct(args: &[AttrValue]) -> Box<dyn Component> {
    Box::new(Mover::new(
        super::arg_f32(args, 0, TYPE_NAME, 0.0),
        super::arg_f32(args, 1, TYPE_NAME, 0.0),
    ))
}
