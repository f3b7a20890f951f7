//! Game objects
//!
//! A [`GameObject`] is a named bag of keyed components plus a 2D transform and
//! the delta time of the current tick. Components run in ascending priority;
//! components sharing a priority run in insertion order.

use crate::attr::{AttrError, AttrValue};
use crate::ecs::registry::{self, ComponentRegistry, RegistryError};
use crate::ecs::Component;
use crate::foundation::math::{Transform2D, Vec2};
use crate::scene::FrameContext;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by component management and attribute routing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    /// A component already uses this key
    #[error("{object} already has a component named {key}")]
    DuplicateKey {
        /// Game object name
        object: String,
        /// Component key
        key: String,
    },

    /// No component under this key
    #[error("component {0} not found")]
    ComponentNotFound(String),

    /// The component is inside its own update and cannot be reached
    #[error("component {0} is updating and cannot be accessed")]
    ComponentBusy(String),

    /// Construction by type name failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The component rejected an attribute access
    #[error(transparent)]
    Attr(#[from] AttrError),
}

struct ComponentSlot {
    /// `None` while the component is running its own update
    component: Option<Box<dyn Component>>,
    priority: i32,
    sequence: u64,
}

/// Named container of components with spatial and timing state
pub struct GameObject {
    name: String,

    /// Position, rotation and scale
    pub transform: Transform2D,

    delta_time: f32,
    components: HashMap<String, ComponentSlot>,
    update_order: Vec<String>,
    next_sequence: u64,
    default_priority: i32,
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("components", &self.update_order)
            .finish_non_exhaustive()
    }
}

impl GameObject {
    /// Objects are created through [`crate::scene::Scene::new_game_object`]
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform2D::default(),
            delta_time: 0.0,
            components: HashMap::new(),
            update_order: Vec::new(),
            next_sequence: 0,
            default_priority: 0,
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds elapsed since the previous tick
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Move to an absolute position
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.transform.position = Vec2::new(x, y);
    }

    /// Move by a relative offset
    pub fn add_position(&mut self, dx: f32, dy: f32) {
        self.transform.position += Vec2::new(dx, dy);
    }

    /// Attach `component` under `key` and call its `start`.
    ///
    /// Fails without touching the existing component if `key` is taken.
    pub fn add_component(&mut self, key: impl Into<String>, mut component: Box<dyn Component>) -> Result<(), EntityError> {
        let key = key.into();
        if self.components.contains_key(&key) {
            return Err(EntityError::DuplicateKey {
                object: self.name.clone(),
                key,
            });
        }

        component.start(self);

        // start() may have attached components of its own
        if self.components.contains_key(&key) {
            return Err(EntityError::DuplicateKey {
                object: self.name.clone(),
                key,
            });
        }

        log::trace!("{}: attached {} as {}", self.name, component.type_name(), key);
        let slot = ComponentSlot {
            component: Some(component),
            priority: self.default_priority,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.components.insert(key, slot);
        self.resort();
        Ok(())
    }

    /// Construct a component through the process-wide registry and attach it
    pub fn add_component_by_name(&mut self, key: impl Into<String>, type_name: &str, args: &[AttrValue]) -> Result<(), EntityError> {
        let component = registry::construct_component(type_name, args)?;
        self.add_component(key, component)
    }

    /// Construct a component through `registry` and attach it
    pub fn add_component_from(
        &mut self,
        registry: &ComponentRegistry,
        key: impl Into<String>,
        type_name: &str,
        args: &[AttrValue],
    ) -> Result<(), EntityError> {
        let component = registry.construct(type_name, args)?;
        self.add_component(key, component)
    }

    /// Priority given to components attached from now on (default 0)
    pub fn set_order(&mut self, priority: i32) {
        self.default_priority = priority;
    }

    /// Change the priority of an attached component
    pub fn set_component_order(&mut self, key: &str, priority: i32) -> Result<(), EntityError> {
        let slot = self
            .components
            .get_mut(key)
            .ok_or_else(|| EntityError::ComponentNotFound(key.to_string()))?;
        slot.priority = priority;
        self.resort();
        Ok(())
    }

    /// Priority of an attached component
    pub fn component_order(&self, key: &str) -> Option<i32> {
        self.components.get(key).map(|slot| slot.priority)
    }

    fn resort(&mut self) {
        let mut order: Vec<(i32, u64, &String)> = self
            .components
            .iter()
            .map(|(key, slot)| (slot.priority, slot.sequence, key))
            .collect();
        order.sort_unstable();
        self.update_order = order.into_iter().map(|(_, _, key)| key.clone()).collect();
    }

    /// Component keys in update order
    pub fn component_keys(&self) -> &[String] {
        &self.update_order
    }

    /// Whether a component is attached under `key`
    pub fn has_component(&self, key: &str) -> bool {
        self.components.contains_key(key)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Borrow a component. `None` if absent or currently updating.
    pub fn component(&self, key: &str) -> Option<&dyn Component> {
        self.components.get(key).and_then(|slot| slot.component.as_deref())
    }

    fn slot_mut(&mut self, key: &str) -> Result<&mut Box<dyn Component>, EntityError> {
        self.components
            .get_mut(key)
            .ok_or_else(|| EntityError::ComponentNotFound(key.to_string()))?
            .component
            .as_mut()
            .ok_or_else(|| EntityError::ComponentBusy(key.to_string()))
    }

    /// Route an attribute write to the component under `key`
    pub fn set_attr(&mut self, key: &str, attr: &str, value: &AttrValue) -> Result<(), EntityError> {
        self.slot_mut(key)?.set_attr(attr, value)?;
        Ok(())
    }

    /// Route an attribute read to the component under `key`
    pub fn get_attr(&self, key: &str, attr: &str) -> Result<AttrValue, EntityError> {
        let slot = self
            .components
            .get(key)
            .ok_or_else(|| EntityError::ComponentNotFound(key.to_string()))?;
        let component = slot
            .component
            .as_ref()
            .ok_or_else(|| EntityError::ComponentBusy(key.to_string()))?;
        Ok(component.get_attr(attr)?)
    }

    /// Run one tick: record `delta_time`, then update every component in the
    /// order fixed at the start of the tick. Components attached during the
    /// tick first run on the next one.
    pub(crate) fn update(&mut self, delta_time: f32, frame: &mut FrameContext<'_>) {
        self.delta_time = delta_time;

        let order = self.update_order.clone();
        for key in &order {
            let Some(mut component) = self.components.get_mut(key).and_then(|slot| slot.component.take()) else {
                continue;
            };
            component.update(self, frame);
            frame.stats.components_updated += 1;
            if let Some(slot) = self.components.get_mut(key) {
                slot.component = Some(component);
            }
        }
    }
}
