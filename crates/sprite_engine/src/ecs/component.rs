//! Component trait

use crate::attr::{AttrError, AttrValue};
use crate::ecs::GameObject;
use crate::scene::FrameContext;

/// A unit of behavior and state attached to a [`GameObject`] under a key.
///
/// Every component speaks the attribute protocol: `set_attr` coerces
/// loosely-typed values into native fields and silently ignores names it does
/// not know, while `get_attr` reports unknown names as [`AttrError::NotFound`].
/// Writers stay tolerant so scene documents can target a superset of
/// attributes; readers stay strict.
pub trait Component: 'static {
    /// Called once when the component is attached
    fn start(&mut self, _object: &mut GameObject) {}

    /// Called once per tick, in the owning object's component order.
    ///
    /// The component is detached from `object` for the duration of the call,
    /// so attribute access to its own key reports it as busy.
    fn update(&mut self, object: &mut GameObject, frame: &mut FrameContext<'_>);

    /// Read an attribute
    fn get_attr(&self, name: &str) -> Result<AttrValue, AttrError>;

    /// Write an attribute; unknown names are a no-op
    fn set_attr(&mut self, name: &str, value: &AttrValue) -> Result<(), AttrError>;

    /// Registered type name of the concrete component
    fn type_name(&self) -> &'static str;
}
