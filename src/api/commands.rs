//! Command modules
//!
//! - `settings`: the settings page bound to the target-language preference

pub mod settings;
