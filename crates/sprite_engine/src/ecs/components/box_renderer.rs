//! Solid-color box renderer

use crate::attr::{AttrError, AttrValue, Coerce};
use crate::ecs::{Component, GameObject};
use crate::foundation::math::{Vec2, Vec4};
use crate::render::{DrawCall, MeshKind};
use crate::scene::FrameContext;

/// Registered type name
pub const TYPE_NAME: &str = "BoxRenderer";

/// Draws an untextured rectangle of `width` x `height` world units
#[derive(Debug, Clone)]
pub struct BoxRenderer {
    /// Width in world units
    pub width: f32,
    /// Height in world units
    pub height: f32,
    color: Vec4,
}

impl BoxRenderer {
    /// Create a transparent black box
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            color: Vec4::zeros(),
        }
    }

    /// Fill color as RGBA
    pub fn color(&self) -> Vec4 {
        self.color
    }

    fn channel(name: &str) -> Option<usize> {
        match name {
            "red" | "r" | "R" => Some(0),
            "green" | "g" | "G" => Some(1),
            "blue" | "b" | "blu" | "B" => Some(2),
            "alpha" | "a" | "A" => Some(3),
            _ => None,
        }
    }
}

impl Component for BoxRenderer {
    fn update(&mut self, object: &mut GameObject, frame: &mut FrameContext<'_>) {
        frame.draw_queue.push(DrawCall {
            mesh: MeshKind::SolidQuad,
            texture: None,
            half_extents: Vec2::new(self.width / 2.0, self.height / 2.0),
            uv_offset: Vec2::zeros(),
            uv_size: Vec2::new(1.0, 1.0),
            add_color: self.color,
            mul_color: Vec4::zeros(),
            transform: frame.projection * object.transform.to_matrix(),
        });
    }

    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        match name {
            "width" => Ok(AttrValue::from(self.width)),
            "height" => Ok(AttrValue::from(self.height)),
            _ => Self::channel(name)
                .map(|channel| AttrValue::from(self.color[channel]))
                .ok_or_else(|| AttrError::not_found(name, TYPE_NAME)),
        }
    }

    fn set_attr(&mut self, name: &str, value: &AttrValue) -> Result<(), AttrError> {
        let coerce = Coerce::new(name, TYPE_NAME, value);
        match name {
            "width" => self.width = coerce.f32()?,
            "height" => self.height = coerce.f32()?,
            _ => {
                if let Some(channel) = Self::channel(name) {
                    self.color[channel] = coerce.f32()?;
                }
            }
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

/// Factory: `(width = 1, height = 1)`
pub fn construct(args: &[AttrValue]) -> Box<dyn Component> {
    let width = super::arg_f32(args, 0, TYPE_NAME, 1.0);
    let height = super::arg_f32(args, 1, TYPE_NAME, 1.0);
    Box::new(BoxRenderer::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawQueue;
    use crate::scene::{FrameStats, SceneResources};
    use approx::assert_relative_eq;

    #[test]
    fn test_color_aliases() {
        let mut solid = BoxRenderer::new(2.0, 1.0);
        solid.set_attr("r", &AttrValue::Float(1.0)).unwrap();
        solid.set_attr("blu", &AttrValue::Int(1)).unwrap();
        solid.set_attr("Alpha", &AttrValue::Float(1.0)).unwrap();

        assert_eq!(solid.color(), Vec4::new(1.0, 0.0, 1.0, 0.0));
        assert_eq!(solid.get_attr("blue").unwrap(), AttrValue::Float(1.0));
        assert!(solid.get_attr("Alpha").is_err());
    }

    #[test]
    fn test_draw_uses_half_extents_and_transform() {
        let resources = SceneResources::default();
        let mut queue = DrawQueue::new();
        let mut stats = FrameStats::default();
        let mut object = GameObject::new("box");
        object.set_position(2.0, 3.0);

        let mut solid = BoxRenderer::new(4.0, 2.0);
        let mut frame = FrameContext::new(&resources, &mut queue, &mut stats);
        solid.update(&mut object, &mut frame);

        let call = &queue.calls()[0];
        assert_eq!(call.mesh, MeshKind::SolidQuad);
        assert_relative_eq!(call.half_extents, Vec2::new(2.0, 1.0));

        let center = call.transform * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let expected = frame_projection() * Vec4::new(2.0, 3.0, 0.0, 1.0);
        assert_relative_eq!(center, expected, epsilon = 1e-6);
    }

    fn frame_projection() -> crate::foundation::math::Mat4 {
        crate::foundation::math::OrthoBounds::default().to_matrix()
    }
}
