//! Component registry
//!
//! Maps a component type name to a factory so components can be created from
//! data. A process-wide instance is created on first use, pre-populated with
//! the built-in components; applications add their own types with
//! [`register_component`] during startup, before loading scenes. After that the
//! registry is only read.

use crate::attr::AttrValue;
use crate::ecs::{components, Component};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use thiserror::Error;

/// Builds a component from positional arguments, applying its own defaults
pub type ComponentFactory = Arc<dyn Fn(&[AttrValue]) -> Box<dyn Component> + Send + Sync>;

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No factory registered under this name
    #[error("unknown component type: {0}")]
    UnknownType(String),
}

/// Type name to factory mapping
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in component types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        components::register_builtins(&mut registry);
        registry
    }

    /// Register `factory` under `type_name`. Registering a name again replaces
    /// the previous factory.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn(&[AttrValue]) -> Box<dyn Component> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        if self.factories.insert(type_name.clone(), Arc::new(factory)).is_some() {
            log::debug!("Component type {} re-registered", type_name);
        }
    }

    /// Construct a component of `type_name` from `args`
    pub fn construct(&self, type_name: &str, args: &[AttrValue]) -> Result<Box<dyn Component>, RegistryError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))?;
        Ok((**factory)(args))
    }

    /// Whether `type_name` is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn global() -> &'static RwLock<ComponentRegistry> {
    static REGISTRY: OnceLock<RwLock<ComponentRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(ComponentRegistry::with_builtins()))
}

/// Register a component type in the process-wide registry
pub fn register_component<F>(type_name: impl Into<String>, factory: F)
where
    F: Fn(&[AttrValue]) -> Box<dyn Component> + Send + Sync + 'static,
{
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(type_name, factory);
}

/// Construct a component through the process-wide registry
pub fn construct_component(type_name: &str, args: &[AttrValue]) -> Result<Box<dyn Component>, RegistryError> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .construct(type_name, args)
}

/// Copy of the process-wide registry; factories are shared, not duplicated
pub fn global_snapshot() -> ComponentRegistry {
    global().read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrError;
    use crate::ecs::GameObject;
    use crate::scene::FrameContext;

    struct Tagged {
        tag: &'static str,
    }

    impl Component for Tagged {
        fn update(&mut self, _object: &mut GameObject, _frame: &mut FrameContext<'_>) {}

        fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError> {
            match name {
                "tag" => Ok(AttrValue::from(self.tag)),
                _ => Err(AttrError::not_found(name, self.type_name())),
            }
        }

        fn set_attr(&mut self, _name: &str, _value: &AttrValue) -> Result<(), AttrError> {
            Ok(())
        }

        fn type_name(&self) -> &'static str {
            "Tagged"
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ComponentRegistry::with_builtins();
        for name in ["Renderer", "BoxRenderer", "Mover", "Cage", "Animator", "StatsLogger"] {
            assert!(registry.contains(name), "{name} should be registered");
        }
    }

    #[test]
    fn test_unknown_type() {
        let registry = ComponentRegistry::new();
        let err = registry.construct("Nope", &[]).err();
        assert_eq!(err, Some(RegistryError::UnknownType("Nope".to_string())));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ComponentRegistry::new();
        registry.register("Tagged", |_args: &[AttrValue]| -> Box<dyn Component> { Box::new(Tagged { tag: "first" }) });
        registry.register("Tagged", |_args: &[AttrValue]| -> Box<dyn Component> { Box::new(Tagged { tag: "second" }) });

        let component = registry.construct("Tagged", &[]).unwrap();
        assert_eq!(component.get_attr("tag").unwrap(), AttrValue::from("second"));
        assert_eq!(registry.type_names(), vec!["Tagged"]);
    }

    #[test]
    fn test_factory_applies_defaults() {
        let registry = ComponentRegistry::with_builtins();

        let unit = registry.construct("BoxRenderer", &[]).unwrap();
        assert_eq!(unit.get_attr("width").unwrap(), AttrValue::Float(1.0));
        assert_eq!(unit.get_attr("height").unwrap(), AttrValue::Float(1.0));

        let wide = registry.construct("BoxRenderer", &[AttrValue::Int(4)]).unwrap();
        assert_eq!(wide.get_attr("width").unwrap(), AttrValue::Float(4.0));
        assert_eq!(wide.get_attr("height").unwrap(), AttrValue::Float(1.0));
    }

    #[test]
    fn test_global_registration() {
        register_component("GlobalTagged", |_args: &[AttrValue]| -> Box<dyn Component> {
            Box::new(Tagged { tag: "global" })
        });

        let component = construct_component("GlobalTagged", &[]).unwrap();
        assert_eq!(component.type_name(), "Tagged");
        assert!(global_snapshot().contains("GlobalTagged"));
        assert!(global_snapshot().contains("Renderer"));
    }
}
