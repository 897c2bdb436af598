//! Level data structures and RON loading.
//!
//! Levels are described by RON files under `assets/data/levels/`, listed in
//! play order by the `assets/data/levels.ron` manifest. Any load or
//! validation failure is fatal at startup.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// A static platform rectangle. `x`/`y` is the center of the platform; the
/// level floor runs along y = 0.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One level as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub map_width: f32,
    pub map_height: f32,
    pub player_spawn: (f32, f32),
    pub enemy_spawns: Vec<(f32, f32)>,
    pub platforms: Vec<PlatformDef>,
}

impl LevelDefinition {
    fn validate(&self) -> Result<(), DataLoadError> {
        if self.map_width <= 0.0 || self.map_height <= 0.0 {
            return Err(DataLoadError::InvalidMapSize {
                name: self.name.clone(),
                width: self.map_width,
                height: self.map_height,
            });
        }
        let in_bounds = |&(x, y): &(f32, f32)| x >= 0.0 && x <= self.map_width && y >= 0.0;
        for spawn in std::iter::once(&self.player_spawn).chain(&self.enemy_spawns) {
            if !in_bounds(spawn) {
                return Err(DataLoadError::SpawnOutOfBounds {
                    name: self.name.clone(),
                    x: spawn.0,
                    y: spawn.1,
                });
            }
        }
        Ok(())
    }
}

/// The ordered list of level file stems, as read from the manifest.
#[derive(Debug, Deserialize)]
struct LevelManifest {
    levels: Vec<String>,
}

/// Resource storing all loaded levels in play order.
#[derive(Debug, Resource, Default)]
pub struct LevelRegistry {
    pub levels: Vec<LevelDefinition>,
}

impl LevelRegistry {
    /// Load the manifest and every level it lists, in order.
    pub fn load(data_dir: &Path) -> Result<LevelRegistry, DataLoadError> {
        let manifest_path = data_dir.join("levels.ron");
        let manifest: LevelManifest = read_ron(&manifest_path)?;
        if manifest.levels.is_empty() {
            return Err(DataLoadError::EmptyManifest(
                manifest_path.display().to_string(),
            ));
        }

        let mut levels = Vec::with_capacity(manifest.levels.len());
        for stem in &manifest.levels {
            let path = data_dir.join("levels").join(format!("{stem}.ron"));
            let level: LevelDefinition = read_ron(&path)?;
            level.validate()?;
            levels.push(level);
        }
        Ok(LevelRegistry { levels })
    }

    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn read_ron<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Resource indicating which level of the registry is being played.
#[derive(Resource, Default, Debug)]
pub struct CurrentLevel(pub usize);

impl CurrentLevel {
    pub fn is_last(&self, registry: &LevelRegistry) -> bool {
        self.0 + 1 >= registry.len()
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_map_size() {
        let level = LevelDefinition {
            name: "broken".into(),
            map_width: 0.0,
            map_height: 720.0,
            player_spawn: (100.0, 100.0),
            enemy_spawns: vec![],
            platforms: vec![],
        };
        assert!(matches!(
            level.validate(),
            Err(DataLoadError::InvalidMapSize { .. })
        ));
    }

    #[test]
    fn rejects_spawn_outside_map() {
        let level = LevelDefinition {
            name: "broken".into(),
            map_width: 2000.0,
            map_height: 720.0,
            player_spawn: (100.0, 100.0),
            enemy_spawns: vec![(2500.0, 100.0)],
            platforms: vec![],
        };
        assert!(matches!(
            level.validate(),
            Err(DataLoadError::SpawnOutOfBounds { .. })
        ));
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let err = LevelRegistry::load(Path::new("does/not/exist")).unwrap_err();
        assert!(matches!(err, DataLoadError::ReadError { .. }));
    }

    #[test]
    fn current_level_tracks_progression() {
        let registry = LevelRegistry {
            levels: vec![
                LevelDefinition {
                    name: "one".into(),
                    map_width: 2000.0,
                    map_height: 720.0,
                    player_spawn: (100.0, 100.0),
                    enemy_spawns: vec![],
                    platforms: vec![],
                },
                LevelDefinition {
                    name: "two".into(),
                    map_width: 2000.0,
                    map_height: 720.0,
                    player_spawn: (100.0, 100.0),
                    enemy_spawns: vec![],
                    platforms: vec![],
                },
            ],
        };
        let mut current = CurrentLevel::default();
        assert!(!current.is_last(&registry));
        current.advance();
        assert!(current.is_last(&registry));
    }
}
