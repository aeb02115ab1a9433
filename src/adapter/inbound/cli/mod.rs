//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod handler;
pub mod interrupt;
pub mod menu;
pub mod output;
pub mod progress;
pub mod render;
pub mod run;
pub mod watch;
