//! CLI module

pub mod actions;
pub mod args;
pub mod context;

pub use args::{Cli, Commands};
pub use context::Context;
