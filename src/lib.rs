pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod notify;
pub mod selection;
pub mod tui;

mod tui_shell;
