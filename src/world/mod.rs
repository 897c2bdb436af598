//! World module - level data, construction, and progression.

mod builder;
mod data;
mod error;
mod plugin;

pub use builder::{LevelEntity, LevelProgress, MapBounds};
pub use data::{CurrentLevel, LevelDefinition, LevelRegistry, PlatformDef};
pub use error::DataLoadError;
pub use plugin::WorldPlugin;
