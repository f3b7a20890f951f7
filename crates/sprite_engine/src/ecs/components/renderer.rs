//! Sprite renderer
//!
//! Draws one cell of a sprite-sheet texture at the owning object's transform.
//! The texture is looked up by name every tick, so a renderer may reference a
//! texture that is not loaded yet; it simply draws nothing until it is.

use crate::attr::{AttrError, AttrValue, Coerce};
use crate::ecs::{Component, GameObject};
use crate::foundation::math::{Vec2, Vec4};
use crate::render::{DrawCall, MeshKind};
use crate::scene::FrameContext;

/// Registered type name
pub const TYPE_NAME: &str = "Renderer";

/// Textured sprite renderer with additive and multiplicative tinting
#[derive(Debug, Clone)]
pub struct Renderer {
    texture: Option<String>,
    index: u32,
    /// Overrides the scene's pixels-per-unit when set
    pixels_per_unit: Option<u32>,
    add_color: Vec4,
    mul_color: Vec4,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Renderer {
    /// Create a renderer, optionally bound to a texture name
    pub fn new(texture: Option<&str>) -> Self {
        Self {
            texture: texture.map(str::to_string),
            index: 0,
            pixels_per_unit: None,
            add_color: Vec4::zeros(),
            mul_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Override the pixels-per-unit ratio used to size the sprite
    pub fn set_pixels_per_unit(&mut self, pixels: u32) {
        self.pixels_per_unit = (pixels > 0).then_some(pixels);
    }

    /// Sprite-sheet cell index
    pub fn index(&self) -> u32 {
        self.index
    }

    fn color_channel(name: &str) -> Option<(bool, usize)> {
        let (additive, channel) = match name {
            "addR" => (true, 0),
            "addG" => (true, 1),
            "addB" => (true, 2),
            "addA" => (true, 3),
            "mulR" => (false, 0),
            "mulG" => (false, 1),
            "mulB" => (false, 2),
            "mulA" => (false, 3),
            _ => return None,
        };
        Some((additive, channel))
    }
}

impl Component for Renderer {
    fn update(&mut self, object: &mut GameObject, frame: &mut FrameContext<'_>) {
        let Some(name) = self.texture.as_deref() else {
            return;
        };
        let Some(texture) = frame.resources.texture(name) else {
            return;
        };
        let Some(cell) = texture.cell_size() else {
            return;
        };

        let pixels_per_unit = self.pixels_per_unit.unwrap_or(frame.pixels_per_unit).max(1) as f32;
        let (uv_offset, uv_size) = texture.uv_rect(self.index);

        frame.draw_queue.push(DrawCall {
            mesh: MeshKind::TexturedQuad,
            texture: Some(texture.name.clone()),
            half_extents: cell / pixels_per_unit,
            uv_offset,
            uv_size,
            add_color: self.add_color,
            mul_color: self.mul_color,
            transform: frame.projection * object.transform.to_matrix(),
        });
    }

    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        match name {
            "index" => Ok(AttrValue::from(self.index)),
            "texture" => Ok(AttrValue::from(self.texture.clone().unwrap_or_default())),
            "pixelsPerUnit" => Ok(AttrValue::from(self.pixels_per_unit.unwrap_or(0))),
            _ => match Self::color_channel(name) {
                Some((true, channel)) => Ok(AttrValue::from(self.add_color[channel])),
                Some((false, channel)) => Ok(AttrValue::from(self.mul_color[channel])),
                None => Err(AttrError::not_found(name, TYPE_NAME)),
            },
        }
    }

    fn set_attr(&mut self, name: &str, value: &AttrValue) -> Result<(), AttrError> {
        let coerce = Coerce::new(name, TYPE_NAME, value);
        match name {
            "index" => self.index = coerce.u32()?,
            "texture" => {
                let texture = coerce.string()?;
                self.texture = (!texture.is_empty()).then_some(texture);
            }
            "pixelsPerUnit" => self.set_pixels_per_unit(coerce.u32()?),
            _ => match Self::color_channel(name) {
                Some((true, channel)) => self.add_color[channel] = coerce.f32()?,
                Some((false, channel)) => self.mul_color[channel] = coerce.f32()?,
                None => {}
            },
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

/// Factory: renderers start unbound; the texture is set through attributes
pub fn construct(_args: &[AttrValue]) -> Box<dyn Component> {
    Box::new(Renderer::default())
}
