//! Error types for level data loading.

use thiserror::Error;

/// Errors that can occur when loading the level manifest or a level file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The manifest lists no levels.
    #[error("Level manifest '{0}' lists no levels")]
    EmptyManifest(String),

    /// A level's map dimensions are unusable.
    #[error("Level '{name}' has invalid map size {width}x{height}")]
    InvalidMapSize {
        name: String,
        width: f32,
        height: f32,
    },

    /// A spawn point lies outside the map bounds.
    #[error("Level '{name}' places a spawn at ({x}, {y}) outside its map")]
    SpawnOutOfBounds { name: String, x: f32, y: f32 },
}
