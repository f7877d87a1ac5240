// Terminal UI implementation using ratatui
// The pretty face of searchdeck

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, Tab};
pub use runner::run_tui;
