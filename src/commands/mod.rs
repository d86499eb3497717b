//! Command handlers invoked by the CLI.

pub mod config;
mod services;
mod show;
mod update;

pub use config::{Config, DEFAULT_REPO};
pub use show::show;
pub use update::update;
