//! CLI commands

pub mod about;
pub mod list;
pub mod show;
pub mod tags;
