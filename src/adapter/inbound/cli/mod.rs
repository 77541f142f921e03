//! CLI module graph and command dispatch.

pub mod command;
pub mod concentration;
pub mod diagnostic;
pub mod dispatch;
pub mod operator;
pub mod output;
pub mod render;
pub mod rules;
pub mod score;
pub mod snapshot;

pub use dispatch::execute;
