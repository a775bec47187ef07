//! dg-core: seeded room-and-door dungeon generation
//!
//! This crate produces dungeon layouts with no I/O and no rendering: a tile
//! grid, the rooms that make it up and the doors joining them. Presentation
//! code consumes those results.
//!
//! The same seed and configuration always reproduce the same layout.

pub mod dungeon;
pub mod tile;

mod rng;

pub use dungeon::{Dungeon, DungeonConfig};
pub use rng::{RandomSource, Seed, SeededRandom};
pub use tile::{TileGrid, TileKind};
