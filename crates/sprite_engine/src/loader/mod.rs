//! Scene description loader
//!
//! Builds a live [`Scene`] from a declarative document with four top-level
//! sections: `name`, `textures`, `objects` and `animations`. Documents can be
//! written in JSON, RON or TOML; the format is picked from the file extension.
//!
//! Structural problems (a missing required key, an unknown component type,
//! a malformed document) abort the whole load and no scene is returned.
//! Attribute writes that a component rejects are logged and skipped.

pub mod document;

pub use document::{RawScene, SceneDescription};

use crate::animation::Action;
use crate::config::RuntimeConfig;
use crate::ecs::registry::{self, ComponentRegistry};
use crate::ecs::EntityError;
use crate::scene::{Scene, SceneError};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scene loading errors. All of them are fatal for the load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Document could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Document is not well-formed
    #[error("{format} parse error: {message}")]
    Parse {
        /// Document format
        format: SceneFormat,
        /// Parser message
        message: String,
    },

    /// File extension is not a known format
    #[error("unsupported scene format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A required key is absent
    #[error("{location} requires a {key}")]
    MissingKey {
        /// Where in the document, e.g. `objects[2].attrs[0]`
        location: String,
        /// Missing key
        key: &'static str,
    },

    /// A key holds a value of the wrong kind
    #[error("{location}: {key} must be {expected}")]
    InvalidValue {
        /// Where in the document
        location: String,
        /// Offending key
        key: &'static str,
        /// What was expected
        expected: &'static str,
    },

    /// Component type is not registered
    #[error("{location}: unknown component type {type_name}")]
    UnknownComponentType {
        /// Where in the document
        location: String,
        /// Requested type
        type_name: String,
    },

    /// Two components of one object share a key
    #[error("{location}: duplicate component {key}")]
    DuplicateComponent {
        /// Where in the document
        location: String,
        /// Repeated key
        key: String,
    },

    /// Resource registration failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Object construction failed
    #[error(transparent)]
    Entity(#[from] EntityError),
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    /// `.json`
    Json,
    /// `.ron`
    Ron,
    /// `.toml`
    Toml,
}

impl fmt::Display for SceneFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Ron => "RON",
            Self::Toml => "TOML",
        })
    }
}

impl SceneFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("ron") => Ok(Self::Ron),
            Some("toml") => Ok(Self::Toml),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Deserialize `text` into the permissive document structure
    pub fn parse(self, text: &str) -> Result<RawScene, LoadError> {
        let parse_error = |message: String| LoadError::Parse { format: self, message };
        match self {
            Self::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
            Self::Ron => ron::Options::default()
                .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
                .from_str(text)
                .map_err(|e| parse_error(e.to_string())),
            Self::Toml => toml::from_str(text).map_err(|e| parse_error(e.to_string())),
        }
    }
}

/// Turns scene documents into scenes
#[derive(Debug, Clone)]
pub struct SceneLoader {
    registry: ComponentRegistry,
    config: RuntimeConfig,
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneLoader {
    /// Loader using the process-wide component registry as it is now
    pub fn new() -> Self {
        Self {
            registry: registry::global_snapshot(),
            config: RuntimeConfig::default(),
        }
    }

    /// Use `registry` to resolve component types
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Configuration given to loaded scenes
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Load a scene file, picking the format from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Scene, LoadError> {
        let path = path.as_ref();
        let format = SceneFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading scene from {:?}", path);
        self.load_str(&text, format)
    }

    /// Load a scene from text
    pub fn load_str(&self, text: &str, format: SceneFormat) -> Result<Scene, LoadError> {
        let description = format.parse(text)?.validate(&self.registry)?;
        self.build(description)
    }

    /// Construct a scene from a validated description.
    ///
    /// Textures come first, then objects (all components of an object are
    /// attached before any of its attributes is written), then animations.
    pub fn build(&self, description: SceneDescription) -> Result<Scene, LoadError> {
        let mut scene = Scene::with_config(description.name, self.config.clone());

        for texture in description.textures {
            let registered = scene.new_texture_from_filename(texture.name, texture.filename)?;
            registered.set_rows(texture.rows);
            registered.set_cols(texture.cols);
        }

        for object in description.objects {
            let game_object = scene.new_game_object(object.name);
            for component in &object.components {
                game_object.add_component_from(&self.registry, component.key.as_str(), &component.type_name, &component.args)?;
            }
            for attr in &object.attrs {
                if let Err(err) = game_object.set_attr(&attr.component, &attr.key, &attr.value) {
                    log::warn!(
                        "{}: cannot set {}.{} = {}: {}",
                        game_object.name(),
                        attr.component,
                        attr.key,
                        attr.value,
                        err
                    );
                }
            }
            log::debug!("Created {} with {} component(s)", game_object.name(), game_object.component_count());
        }

        for animation in description.animations {
            let target = scene.add_animation(animation.name, animation.fps, animation.looping);
            for frame in animation.frames {
                target.add_frame(
                    frame
                        .into_iter()
                        .map(|action| Action::new(action.component, action.key, action.value))
                        .collect(),
                );
            }
        }

        log::info!(
            "Loaded scene {:?}: {} object(s), {} texture(s), {} animation(s)",
            scene.name,
            scene.game_objects().len(),
            scene.resources().texture_count(),
            scene.resources().animation_count()
        );
        Ok(scene)
    }
}

/// Load a scene file with the process-wide registry and default configuration
pub fn load_scene_from_file(path: impl AsRef<Path>) -> Result<Scene, LoadError> {
    SceneLoader::new().load_file(path)
}

/// Load a scene from text with the process-wide registry and default configuration
pub fn load_scene_from_str(text: &str, format: SceneFormat) -> Result<Scene, LoadError> {
    SceneLoader::new().load_str(text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrValue;

    const ROUND_TRIP: &str = r#"{
        "name": "level1",
        "textures": [{"name": "t1", "filename": "x.png"}],
        "objects": [{
            "name": "o1",
            "components": [{"name": "r", "type": "Renderer"}],
            "attrs": [{"component": "r", "key": "index", "value": 2}]
        }]
    }"#;

    #[test]
    fn test_round_trip_json() {
        let scene = load_scene_from_str(ROUND_TRIP, SceneFormat::Json).unwrap();

        assert_eq!(scene.name, "level1");
        assert_eq!(scene.game_objects().len(), 1);
        let object = scene.find_game_object("o1").unwrap();
        assert_eq!(object.get_attr("r", "index").unwrap(), AttrValue::Int(2));
        assert_eq!(scene.texture("t1").unwrap().filename(), Some(Path::new("x.png")));
    }

    #[test]
    fn test_missing_object_name_aborts() {
        let text = r#"{
            "textures": [{"name": "t1", "filename": "x.png"}],
            "objects": [
                {"name": "ok", "components": [{"name": "r", "type": "Renderer"}]},
                {"components": [{"name": "r", "type": "Renderer"}]}
            ]
        }"#;
        let err = load_scene_from_str(text, SceneFormat::Json).unwrap_err();
        match err {
            LoadError::MissingKey { location, key } => {
                assert_eq!(location, "objects[1]");
                assert_eq!(key, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_nested_keys_abort() {
        let cases = [
            (r#"{"textures": [{"filename": "x.png"}]}"#, "textures[0]", "name"),
            (r#"{"textures": [{"name": "t"}]}"#, "textures[0]", "filename"),
            (r#"{"objects": [{"name": "o", "components": [{"name": "r"}]}]}"#, "objects[0].components[0]", "type"),
            (r#"{"objects": [{"name": "o", "attrs": [{"component": "r", "key": "index"}]}]}"#, "objects[0].attrs[0]", "value"),
            (r#"{"animations": [{"fps": 2}]}"#, "animations[0]", "name"),
            (
                r#"{"animations": [{"name": "a", "frames": [[{"component": "r", "key": "index", "value": 1}], [{"key": "index", "value": 2}]]}]}"#,
                "animations[0].frames[1][0]",
                "component",
            ),
        ];

        for (text, expected_location, expected_key) in cases {
            match load_scene_from_str(text, SceneFormat::Json) {
                Err(LoadError::MissingKey { location, key }) => {
                    assert_eq!(location, expected_location);
                    assert_eq!(key, expected_key);
                }
                Err(other) => panic!("{text}: unexpected error {other}"),
                Ok(_) => panic!("{text}: load should fail"),
            }
        }
    }

    #[test]
    fn test_unknown_component_type_aborts() {
        let text = r#"{"objects": [{"name": "o", "components": [{"name": "x", "type": "Teleporter"}]}]}"#;
        assert!(matches!(
            load_scene_from_str(text, SceneFormat::Json),
            Err(LoadError::UnknownComponentType { ref type_name, .. }) if type_name == "Teleporter"
        ));
    }

    #[test]
    fn test_duplicate_component_aborts() {
        let text = r#"{"objects": [{"name": "o", "components": [
            {"name": "r", "type": "Renderer"},
            {"name": "r", "type": "BoxRenderer"}
        ]}]}"#;
        assert!(matches!(
            load_scene_from_str(text, SceneFormat::Json),
            Err(LoadError::DuplicateComponent { .. })
        ));
    }

    #[test]
    fn test_rejected_attributes_are_skipped() {
        let text = r#"{"objects": [{"name": "o",
            "components": [{"name": "r", "type": "Renderer"}],
            "attrs": [
                {"component": "r", "key": "index", "value": "two"},
                {"component": "ghost", "key": "index", "value": 1},
                {"component": "r", "key": "unknownAttr", "value": 1},
                {"component": "r", "key": "texture", "value": "t1"}
            ]}]}"#;
        let scene = load_scene_from_str(text, SceneFormat::Json).unwrap();
        let object = scene.find_game_object("o").unwrap();
        assert_eq!(object.get_attr("r", "index").unwrap(), AttrValue::Int(0));
        assert_eq!(object.get_attr("r", "texture").unwrap(), AttrValue::from("t1"));
    }

    #[test]
    fn test_components_exist_before_attrs() {
        // `attrs` is listed before `components` in the document
        let text = r#"{"objects": [{"name": "o",
            "attrs": [{"component": "box", "key": "width", "value": 3}],
            "components": [{"name": "box", "type": "BoxRenderer", "args": [1, 2]}]
        }]}"#;
        let scene = load_scene_from_str(text, SceneFormat::Json).unwrap();
        let object = scene.find_game_object("o").unwrap();
        assert_eq!(object.get_attr("box", "width").unwrap(), AttrValue::Float(3.0));
        assert_eq!(object.get_attr("box", "height").unwrap(), AttrValue::Float(2.0));
    }

    #[test]
    fn test_animation_frames_do_not_accumulate() {
        let text = r#"{"animations": [{"name": "walk", "fps": 4, "loop": true, "frames": [
            [{"component": "r", "key": "index", "value": 0}],
            [{"component": "r", "key": "index", "value": 1}, {"component": "r", "key": "addR", "value": 0.5}]
        ]}]}"#;
        let scene = load_scene_from_str(text, SceneFormat::Json).unwrap();
        let walk = scene.animation("walk").unwrap();

        assert_eq!(walk.fps, 4);
        assert!(walk.looping);
        assert_eq!(walk.frame_count(), 2);
        assert_eq!(walk.frames()[0].actions.len(), 1);
        assert_eq!(walk.frames()[1].actions.len(), 2);
        assert_eq!(walk.frames()[1].actions[1], Action::new("r", "addR", 0.5));
    }

    #[test]
    fn test_animation_defaults_and_bad_fps() {
        let scene = load_scene_from_str(r#"{"animations": [{"name": "idle"}]}"#, SceneFormat::Json).unwrap();
        let idle = scene.animation("idle").unwrap();
        assert_eq!((idle.fps, idle.looping, idle.frame_count()), (0, false, 0));

        assert!(matches!(
            load_scene_from_str(r#"{"animations": [{"name": "a", "fps": "fast"}]}"#, SceneFormat::Json),
            Err(LoadError::InvalidValue { key: "fps", .. })
        ));
    }

    #[test]
    fn test_ron_and_toml_documents() {
        let ron_text = r#"(
            name: "ron_scene",
            textures: [(name: "sheet", filename: "sheet.png", rows: 2, cols: 4)],
            objects: [(
                name: "o1",
                components: [(name: "r", type: "Renderer")],
                attrs: [(component: "r", key: "index", value: 2)],
            )],
            animations: [(name: "walk", fps: 2, loop: true, frames: [[(component: "r", key: "index", value: 3)]])],
        )"#;
        let scene = load_scene_from_str(ron_text, SceneFormat::Ron).unwrap();
        assert_eq!(scene.texture("sheet").unwrap().cols(), 4);
        assert_eq!(
            scene.find_game_object("o1").unwrap().get_attr("r", "index").unwrap(),
            AttrValue::Int(2)
        );
        assert_eq!(scene.animation("walk").unwrap().frame_count(), 1);

        let toml_text = r#"
            name = "toml_scene"

            [[textures]]
            name = "t1"
            filename = "x.png"

            [[objects]]
            name = "o1"
            components = [{ name = "r", type = "Renderer" }]
            attrs = [{ component = "r", key = "index", value = 2 }]
        "#;
        let scene = load_scene_from_str(toml_text, SceneFormat::Toml).unwrap();
        assert_eq!(scene.name, "toml_scene");
        assert_eq!(
            scene.find_game_object("o1").unwrap().get_attr("r", "index").unwrap(),
            AttrValue::Int(2)
        );
    }

    #[test]
    fn test_demo_scene_runs() {
        let mut scene = load_scene_from_str(include_str!("../../assets/scenes/demo.ron"), SceneFormat::Ron).unwrap();
        assert_eq!(scene.name, "demo");
        assert_eq!(scene.game_objects().len(), 3);
        assert!(!scene.texture("hero").unwrap().is_ready());

        scene.update(0.0);
        scene.update(0.125);

        let hero = scene.find_game_object("hero").unwrap();
        assert_eq!(hero.get_attr("sprite", "index").unwrap(), AttrValue::Int(1));
        assert_eq!(hero.get_attr("sprite", "pixelsPerUnit").unwrap(), AttrValue::Int(32));
        assert_eq!(hero.position().x, 0.125);

        // Only the ground box draws until the hero texture is loaded
        assert_eq!(scene.stats().draw_calls, 1);
        let hud = scene.find_game_object("hud").unwrap();
        assert_eq!(hud.get_attr("stats", "drawCalls").unwrap(), AttrValue::Int(1));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            load_scene_from_str(r#"{"objects": 3}"#, SceneFormat::Json),
            Err(LoadError::Parse { format: SceneFormat::Json, .. })
        ));
        assert!(matches!(
            load_scene_from_str("{not json", SceneFormat::Json),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("level.json");
        std::fs::write(&json, ROUND_TRIP).unwrap();
        let scene = load_scene_from_file(&json).unwrap();
        assert!(scene.find_game_object("o1").is_some());

        let yaml = dir.path().join("level.yaml");
        std::fs::write(&yaml, "name: x").unwrap();
        assert!(matches!(load_scene_from_file(&yaml), Err(LoadError::UnsupportedFormat(_))));

        assert!(matches!(
            load_scene_from_file(dir.path().join("missing.json")),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_custom_registry_and_config() {
        let text = r#"{"objects": [{"name": "o", "components": [{"name": "r", "type": "Renderer"}]}]}"#;
        let loader = SceneLoader::new().with_registry(ComponentRegistry::new());
        assert!(matches!(
            loader.load_str(text, SceneFormat::Json),
            Err(LoadError::UnknownComponentType { .. })
        ));

        let config = RuntimeConfig {
            pixels_per_unit: 16,
            ..RuntimeConfig::default()
        };
        let scene = SceneLoader::new().with_config(config).load_str(text, SceneFormat::Json).unwrap();
        assert_eq!(scene.config().pixels_per_unit, 16);
    }
}
