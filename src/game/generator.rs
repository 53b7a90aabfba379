//! Random world generation from JSON description lists.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::config::{GameConfig, MIN_GRID_SIZE};

use super::world::{Direction, Room, Thing, World};
use super::{GameError, GameResult};

const EMBEDDED_THINGS: &str = include_str!("../../assets/things.json");
const EMBEDDED_GENERATOR: &str = include_str!("../../assets/generator.json");

pub const THINGS_FILE: &str = "things.json";
pub const GENERATOR_FILE: &str = "generator.json";

#[derive(Debug, Clone, Deserialize)]
struct DescriptionEntry {
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ThingsFile {
    things: Vec<Thing>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeneratorFile {
    rooms: Vec<DescriptionEntry>,
    walls: Vec<DescriptionEntry>,
    features: Vec<DescriptionEntry>,
}

/// Word lists a room is assembled from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorAssets {
    pub rooms: Vec<String>,
    pub walls: Vec<String>,
    pub features: Vec<String>,
}

/// Everything needed to build a world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldAssets {
    pub generator: GeneratorAssets,
    pub things: Vec<Thing>,
}

impl WorldAssets {
    /// Assets compiled into the binary
    pub fn embedded() -> GameResult<Self> {
        Self::from_json(EMBEDDED_THINGS, EMBEDDED_GENERATOR)
    }

    /// `things.json` and `generator.json` from `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> GameResult<Self> {
        let dir = dir.as_ref();
        let things = read_asset(&dir.join(THINGS_FILE))?;
        let generator = read_asset(&dir.join(GENERATOR_FILE))?;
        Self::from_json(&things, &generator)
    }

    pub fn from_settings(config: &GameConfig) -> GameResult<Self> {
        match &config.assets_dir {
            Some(dir) => {
                tracing::info!(dir = %dir, "Loading world assets from directory");
                Self::load_dir(dir)
            }
            None => Self::embedded(),
        }
    }

    pub fn from_json(things: &str, generator: &str) -> GameResult<Self> {
        let things: ThingsFile = serde_json::from_str(things).map_err(GameError::InvalidAssets)?;
        let generator: GeneratorFile =
            serde_json::from_str(generator).map_err(GameError::InvalidAssets)?;

        let assets = Self {
            generator: GeneratorAssets {
                rooms: descriptions(generator.rooms),
                walls: descriptions(generator.walls),
                features: descriptions(generator.features),
            },
            things: things.things,
        };
        assets.validate()?;
        Ok(assets)
    }

    fn validate(&self) -> GameResult<()> {
        for (list, entries) in [
            ("rooms", &self.generator.rooms),
            ("walls", &self.generator.walls),
            ("features", &self.generator.features),
        ] {
            if entries.is_empty() {
                return Err(GameError::EmptyAssetList(list));
            }
        }
        // A world without trophies is won before the first command
        if self.things.is_empty() {
            return Err(GameError::EmptyAssetList("things"));
        }
        Ok(())
    }
}

fn descriptions(entries: Vec<DescriptionEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.description).collect()
}

fn read_asset(path: &Path) -> GameResult<String> {
    std::fs::read_to_string(path).map_err(|source| GameError::AssetsIo {
        path: path.display().to_string(),
        source,
    })
}

/// Builds a fresh square grid world per call
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    assets: WorldAssets,
    grid_size: usize,
    seed: Option<u64>,
}

impl WorldGenerator {
    pub fn new(assets: WorldAssets, grid_size: usize) -> GameResult<Self> {
        if grid_size < MIN_GRID_SIZE {
            return Err(GameError::GridTooSmall {
                size: grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        Ok(Self {
            assets,
            grid_size,
            seed: None,
        })
    }

    pub fn from_settings(config: &GameConfig) -> GameResult<Self> {
        let generator = Self::new(WorldAssets::from_settings(config)?, config.grid_size)?;
        Ok(match config.seed {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        })
    }

    /// Generate the same world every time
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn generate(&self) -> World {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with(&mut rng)
    }

    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> World {
        let room_count = self.grid_size * self.grid_size;
        let mut rooms: Vec<Room> = (0..room_count).map(|_| self.random_room(rng)).collect();

        self.connect_rooms(&mut rooms, rng);

        for thing in &self.assets.things {
            let index = rng.random_range(0..room_count);
            rooms[index].things.push(thing.clone());
        }

        let start = rng.random_range(0..room_count);
        tracing::debug!(
            rooms = room_count,
            trophies = self.assets.things.len(),
            start,
            "World generated"
        );
        World::new(rooms, start, self.assets.things.len())
    }

    fn random_room<R: Rng>(&self, rng: &mut R) -> Room {
        let assets = &self.assets.generator;
        let description = pick(&assets.rooms, rng);
        Room::new(
            format!("A {} room", description),
            format!(
                "You are standing inside a {} room. You are surrounded by {}. {}",
                description,
                pick(&assets.walls, rng),
                pick(&assets.features, rng)
            ),
        )
    }

    fn connect_rooms<R: Rng>(&self, rooms: &mut [Room], rng: &mut R) {
        let n = self.grid_size;

        for row in 0..n {
            for col in 0..n {
                let cell = row * n + col;
                if row + 1 < n {
                    link(rooms, cell, cell + n, Direction::South);
                }
                if col + 1 < n {
                    link(rooms, cell, cell + 1, Direction::East);
                }
            }
        }

        // interior rooms start fully open; give each at least one wall
        for row in 1..n - 1 {
            for col in 1..n - 1 {
                let cell = row * n + col;
                if rooms[cell].walls().next().is_some() {
                    continue;
                }
                let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
                if let Some(other) = rooms[cell].exit(direction) {
                    rooms[cell].set_exit(direction, None);
                    rooms[other].set_exit(direction.opposite(), None);
                }
            }
        }
    }
}

fn link(rooms: &mut [Room], from: usize, to: usize, direction: Direction) {
    rooms[from].set_exit(direction, Some(to));
    rooms[to].set_exit(direction.opposite(), Some(from));
}

fn pick<'a, R: Rng>(entries: &'a [String], rng: &mut R) -> &'a str {
    &entries[rng.random_range(0..entries.len())]
}
