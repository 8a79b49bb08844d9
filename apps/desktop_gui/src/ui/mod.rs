//! UI layer for desktop GUI: app shell, panels, widgets, and category theme.

pub mod app;
pub mod panels;
pub mod theme;
pub mod widgets;

pub use app::EmailTriageApp;
