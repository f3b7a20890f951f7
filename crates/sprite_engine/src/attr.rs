//! Dynamically-typed attribute values
//!
//! Components expose their configuration through string-named attributes.
//! Values cross that boundary as loosely-typed scalars and every component
//! coerces them into its own native field types with the functions below.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A loosely-typed scalar as found in scene documents and animation actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag
    Bool(bool),
    /// Integer number
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// Text
    Str(String),
}

impl AttrValue {
    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    /// Numeric cast to `f32`
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Self::Int(value) => Some(value as f32),
            Self::Float(value) => Some(value as f32),
            _ => None,
        }
    }

    /// Numeric cast to `u32`. Fractions are truncated; negative, non-finite
    /// and out-of-range numbers are rejected.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Self::Int(value) => u32::try_from(value).ok(),
            Self::Float(value) if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) => {
                Some(value as u32)
            }
            _ => None,
        }
    }

    /// Numeric cast to `i32`. Fractions are truncated.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Self::Int(value) => i32::try_from(value).ok(),
            Self::Float(value)
                if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) =>
            {
                Some(value as i32)
            }
            _ => None,
        }
    }

    /// Direct check for a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Direct check for a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Truthiness of an attribute read: only `Ok(Bool(true))` counts as true.
///
/// Handy for polling flag attributes of sibling components where a missing
/// attribute should simply read as "off".
pub fn is_true<E>(value: Result<AttrValue, E>) -> bool {
    matches!(value, Ok(AttrValue::Bool(true)))
}

/// Attribute protocol errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttrError {
    /// The value could not be coerced into the attribute's native type
    #[error("{attr} attribute of {component} expects {expected}, got {found}")]
    Coercion {
        /// Attribute name
        attr: String,
        /// Concrete component type name
        component: &'static str,
        /// Native type of the attribute
        expected: &'static str,
        /// Kind of the rejected value
        found: &'static str,
    },

    /// Attribute read on a name the component does not expose
    #[error("{attr} attribute of {component} not found")]
    NotFound {
        /// Attribute name
        attr: String,
        /// Concrete component type name
        component: &'static str,
    },
}

impl AttrError {
    /// Build a "not found" error for `attr` on `component`
    pub fn not_found(attr: &str, component: &'static str) -> Self {
        Self::NotFound {
            attr: attr.to_string(),
            component,
        }
    }
}

/// Typed coercion helpers that produce descriptive [`AttrError`]s.
///
/// Components call these from `set_attr` so every failure names both the
/// attribute and the concrete component type.
pub struct Coerce<'a> {
    attr: &'a str,
    component: &'static str,
    value: &'a AttrValue,
}

impl<'a> Coerce<'a> {
    /// Start coercing `value` for `attr` of `component`
    pub fn new(attr: &'a str, component: &'static str, value: &'a AttrValue) -> Self {
        Self { attr, component, value }
    }

    fn error(&self, expected: &'static str) -> AttrError {
        AttrError::Coercion {
            attr: self.attr.to_string(),
            component: self.component,
            expected,
            found: self.value.kind(),
        }
    }

    /// Coerce to `f32`
    pub fn f32(&self) -> Result<f32, AttrError> {
        self.value.as_f32().ok_or_else(|| self.error("a number"))
    }

    /// Coerce to `u32`
    pub fn u32(&self) -> Result<u32, AttrError> {
        self.value.as_u32().ok_or_else(|| self.error("an unsigned integer"))
    }

    /// Coerce to `i32`
    pub fn i32(&self) -> Result<i32, AttrError> {
        self.value.as_i32().ok_or_else(|| self.error("an integer"))
    }

    /// Coerce to an owned string
    pub fn string(&self) -> Result<String, AttrError> {
        self.value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.error("a string"))
    }

    /// Coerce to `bool`
    pub fn bool(&self) -> Result<bool, AttrError> {
        self.value.as_bool().ok_or_else(|| self.error("a bool"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_casts() {
        assert_eq!(AttrValue::Int(3).as_f32(), Some(3.0));
        assert_eq!(AttrValue::Float(2.5).as_f32(), Some(2.5));
        assert_eq!(AttrValue::Float(2.9).as_u32(), Some(2));
        assert_eq!(AttrValue::Int(7).as_u32(), Some(7));
        assert_eq!(AttrValue::Float(-4.5).as_i32(), Some(-4));
    }

    #[test]
    fn test_unsigned_cast_rejects_negative_and_non_finite() {
        assert_eq!(AttrValue::Int(-1).as_u32(), None);
        assert_eq!(AttrValue::Float(-0.5).as_u32(), None);
        assert_eq!(AttrValue::Float(f64::NAN).as_u32(), None);
        assert_eq!(AttrValue::Int(i64::from(u32::MAX) + 1).as_u32(), None);
    }

    #[test]
    fn test_strings_and_bools_are_not_cast() {
        assert_eq!(AttrValue::Str("1".into()).as_f32(), None);
        assert_eq!(AttrValue::Int(1).as_bool(), None);
        assert_eq!(AttrValue::Bool(true).as_str(), None);
        assert_eq!(AttrValue::Str("abc".into()).as_str(), Some("abc"));
    }

    #[test]
    fn test_coercion_error_names_attribute_and_component() {
        let value = AttrValue::Str("two".into());
        let err = Coerce::new("index", "Renderer", &value).u32().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("index"));
        assert!(message.contains("Renderer"));
        assert!(message.contains("string"));
    }

    #[test]
    fn test_is_true() {
        assert!(is_true::<AttrError>(Ok(AttrValue::Bool(true))));
        assert!(!is_true::<AttrError>(Ok(AttrValue::Bool(false))));
        assert!(!is_true::<AttrError>(Ok(AttrValue::Int(1))));
        assert!(!is_true(Err(AttrError::not_found("A", "Keyboard"))));
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<AttrValue> = serde_json::from_str(r#"[true, 2, 2.5, "hero"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                AttrValue::Bool(true),
                AttrValue::Int(2),
                AttrValue::Float(2.5),
                AttrValue::Str("hero".into()),
            ]
        );

        let from_ron: Vec<AttrValue> = ron::from_str(r#"[false, 4, 0.25, "t1"]"#).unwrap();
        assert_eq!(from_ron[1], AttrValue::Int(4));
        assert_eq!(from_ron[2], AttrValue::Float(0.25));
    }
}
