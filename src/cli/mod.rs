//! Command-line interface for pomodo.

pub mod args;
pub mod commands;
