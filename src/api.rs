//! Surfaces other than the popup itself

pub mod commands;
