//! UI layer for the directory window: app shell and the card/dialog widgets.

pub mod app;
pub mod widgets;

pub use app::{CateringDirectoryApp, StartupConfig};
