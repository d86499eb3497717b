pub mod commands;
pub mod format;
pub mod http;
pub mod page;
pub mod provider;
pub mod runtime;
pub mod slot;
pub mod updater;
