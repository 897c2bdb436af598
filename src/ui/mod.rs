//! UI module - HUD and full-screen menus.

mod hud;
mod plugin;

pub use plugin::UiPlugin;
