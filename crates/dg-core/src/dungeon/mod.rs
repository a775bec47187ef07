//! Dungeon system
//!
//! Contains room geometry, generation parameters and the placement algorithm.

mod config;
mod generation;
mod room;

pub use config::{
    ConfigError, DungeonConfig, NormalizedConfig, SizeRange, DEFAULT_GRID_SIDE, DEFAULT_MAX_AREA,
    DEFAULT_MAX_ROOMS, MAX_GRID_SIDE,
};
pub use generation::{Dungeon, GenerationStats, ATTEMPTS_PER_ROOM, PLACEMENT_TRIES};
pub use room::{Bounds, Direction, Room, MIN_ROOM_SIDE};
