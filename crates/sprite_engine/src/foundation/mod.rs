//! Foundation module - Core utilities and types
//!
//! - Math types and the 2D transform shared by every game object
//! - Logging initialization

pub mod math;
pub mod logging;
