pub mod commands;
pub mod connection;
pub mod consts;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod reporter;
