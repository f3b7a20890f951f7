//! Scene description documents
//!
//! Loading is two passes. Text is first deserialized into the permissive
//! `Raw*` structures, where every key is optional. [`RawScene::validate`] then
//! checks every required key at every nesting level and produces a
//! [`SceneDescription`] in which nothing is optional any more. Only a valid
//! description is ever turned into live objects.

use crate::attr::AttrValue;
use crate::ecs::ComponentRegistry;
use crate::loader::LoadError;
use serde::Deserialize;
use std::collections::HashSet;

/// Top-level document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawScene {
    /// Scene name
    pub name: Option<String>,
    /// Texture declarations
    pub textures: Vec<RawTexture>,
    /// Game object declarations
    pub objects: Vec<RawObject>,
    /// Animation declarations
    pub animations: Vec<RawAnimation>,
}

/// `textures[]` entry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTexture {
    /// Required
    pub name: Option<String>,
    /// Required
    pub filename: Option<String>,
    /// Sprite-sheet rows
    pub rows: Option<u32>,
    /// Sprite-sheet columns
    pub cols: Option<u32>,
}

/// `objects[]` entry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawObject {
    /// Required
    pub name: Option<String>,
    /// Components, attached in list order
    pub components: Vec<RawComponent>,
    /// Attribute writes, applied after every component exists
    pub attrs: Vec<RawAttr>,
}

/// `objects[].components[]` entry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawComponent {
    /// Component key (required)
    pub name: Option<String>,
    /// Registered type name (required)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Factory arguments
    pub args: Vec<AttrValue>,
}

/// Attribute write, used both by `objects[].attrs[]` and animation frames
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAttr {
    /// Component key (required)
    pub component: Option<String>,
    /// Attribute name (required)
    pub key: Option<String>,
    /// Value (required)
    pub value: Option<AttrValue>,
}

/// `animations[]` entry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAnimation {
    /// Required
    pub name: Option<String>,
    /// Frames per second, defaults to 0 (inert)
    pub fps: Option<AttrValue>,
    /// Defaults to false
    #[serde(rename = "loop")]
    pub looping: Option<bool>,
    /// One list of actions per frame
    pub frames: Vec<Vec<RawAttr>>,
}

/// Validated texture declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    /// Texture name
    pub name: String,
    /// Image path
    pub filename: String,
    /// Sprite-sheet rows
    pub rows: u32,
    /// Sprite-sheet columns
    pub cols: u32,
}

/// Validated component declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDesc {
    /// Component key
    pub key: String,
    /// Registered type name
    pub type_name: String,
    /// Factory arguments
    pub args: Vec<AttrValue>,
}

/// Validated attribute write
#[derive(Debug, Clone, PartialEq)]
pub struct AttrDesc {
    /// Component key
    pub component: String,
    /// Attribute name
    pub key: String,
    /// Value
    pub value: AttrValue,
}

/// Validated game object declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDesc {
    /// Object name
    pub name: String,
    /// Components in attach order
    pub components: Vec<ComponentDesc>,
    /// Attribute writes in application order
    pub attrs: Vec<AttrDesc>,
}

/// Validated animation declaration
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDesc {
    /// Animation name
    pub name: String,
    /// Frames per second
    pub fps: u32,
    /// Wrap after the last frame
    pub looping: bool,
    /// Actions of each frame
    pub frames: Vec<Vec<AttrDesc>>,
}

/// A fully validated scene description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    /// Scene name (empty if the document has none)
    pub name: String,
    /// Textures
    pub textures: Vec<TextureDesc>,
    /// Game objects in creation order
    pub objects: Vec<ObjectDesc>,
    /// Animations
    pub animations: Vec<AnimationDesc>,
}

fn required<T>(value: Option<T>, location: &str, key: &'static str) -> Result<T, LoadError> {
    value.ok_or_else(|| LoadError::MissingKey {
        location: location.to_string(),
        key,
    })
}

impl RawAttr {
    fn validate(self, location: &str) -> Result<AttrDesc, LoadError> {
        Ok(AttrDesc {
            component: required(self.component, location, "component")?,
            key: required(self.key, location, "key")?,
            value: required(self.value, location, "value")?,
        })
    }
}

impl RawScene {
    /// Check every required key and every component type against `registry`.
    ///
    /// The first problem found aborts validation.
    pub fn validate(self, registry: &ComponentRegistry) -> Result<SceneDescription, LoadError> {
        let mut description = SceneDescription {
            name: self.name.unwrap_or_default(),
            ..Default::default()
        };

        for (index, texture) in self.textures.into_iter().enumerate() {
            let location = format!("textures[{index}]");
            description.textures.push(TextureDesc {
                name: required(texture.name, &location, "name")?,
                filename: required(texture.filename, &location, "filename")?,
                rows: texture.rows.unwrap_or(1),
                cols: texture.cols.unwrap_or(1),
            });
        }

        for (index, object) in self.objects.into_iter().enumerate() {
            let location = format!("objects[{index}]");
            let name = required(object.name, &location, "name")?;

            let mut keys = HashSet::new();
            let mut components = Vec::with_capacity(object.components.len());
            for (slot, component) in object.components.into_iter().enumerate() {
                let location = format!("{location}.components[{slot}]");
                let key = required(component.name, &location, "name")?;
                let type_name = required(component.kind, &location, "type")?;
                if !registry.contains(&type_name) {
                    return Err(LoadError::UnknownComponentType { location, type_name });
                }
                if !keys.insert(key.clone()) {
                    return Err(LoadError::DuplicateComponent { location, key });
                }
                components.push(ComponentDesc {
                    key,
                    type_name,
                    args: component.args,
                });
            }

            let attrs = object
                .attrs
                .into_iter()
                .enumerate()
                .map(|(slot, attr)| attr.validate(&format!("{location}.attrs[{slot}]")))
                .collect::<Result<Vec<_>, _>>()?;

            description.objects.push(ObjectDesc { name, components, attrs });
        }

        for (index, animation) in self.animations.into_iter().enumerate() {
            let location = format!("animations[{index}]");
            let name = required(animation.name, &location, "name")?;
            let fps = match animation.fps {
                None => 0,
                Some(value) => value.as_u32().ok_or_else(|| LoadError::InvalidValue {
                    location: location.clone(),
                    key: "fps",
                    expected: "a non-negative number",
                })?,
            };

            let mut frames = Vec::with_capacity(animation.frames.len());
            for (frame_index, frame) in animation.frames.into_iter().enumerate() {
                let actions = frame
                    .into_iter()
                    .enumerate()
                    .map(|(slot, action)| action.validate(&format!("{location}.frames[{frame_index}][{slot}]")))
                    .collect::<Result<Vec<_>, _>>()?;
                frames.push(actions);
            }

            description.animations.push(AnimationDesc {
                name,
                fps,
                looping: animation.looping.unwrap_or(false),
                frames,
            });
        }

        Ok(description)
    }
}
