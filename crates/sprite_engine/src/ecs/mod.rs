//! Entity-Component model
//!
//! Game objects own keyed, dynamically-dispatched components that run once
//! per tick in priority order. Component types can be instantiated by name
//! through the process-wide registry, which is how scene documents build
//! live objects.

pub mod component;
pub mod components;
pub mod entity;
pub mod registry;

pub use component::Component;
pub use entity::{EntityError, GameObject};
pub use registry::{ComponentFactory, ComponentRegistry, RegistryError};
