//! Room placement and door carving
//!
//! Generation grows the dungeon outward from a room centered on the grid.
//! Every new room is attached flush against a randomly chosen accepted room
//! and joined to it by a pair of facing doors, one in each wall.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::config::{ConfigError, DungeonConfig, NormalizedConfig};
use super::room::{Bounds, Direction, Room};
use crate::rng::{RandomSource, SeededRandom};
use crate::tile::{TileGrid, TileKind};

/// Growth attempts allowed per requested room
pub const ATTEMPTS_PER_ROOM: usize = 5;

/// Placement tries for a single candidate room
pub const PLACEMENT_TRIES: usize = 150;

/// Summary of one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    /// Accepted rooms, seed room included
    pub rooms: usize,
    /// Door tiles in the compiled grid
    pub doors: usize,
    /// Growth attempts made after the seed room
    pub attempts: usize,
    /// Growth attempts whose candidate was never placed
    pub abandoned: usize,
}

/// Candidate position flush against an accepted room
#[derive(Debug, Clone, Copy)]
struct Attachment {
    col: i32,
    row: i32,
    target: Bounds,
}

/// Coordinates along a shared boundary where a padded door may go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DoorSpan {
    side: Direction,
    lo: i32,
    hi: i32,
}

/// Door span between a room and the room it sits flush against
///
/// `side` is where `room` lies relative to `target`. Returns `None` when the
/// rooms are not flush or their shared boundary is too short for the padding.
fn door_span(room: &Bounds, target: &Bounds, padding: i32) -> Option<DoorSpan> {
    let side = room.side_of(target)?;
    let (lo, hi) = if side.is_vertical() {
        (room.left.max(target.left), room.right.min(target.right))
    } else {
        (room.top.max(target.top), room.bottom.min(target.bottom))
    };
    let (lo, hi) = (lo + padding, hi - padding);
    (lo <= hi).then_some(DoorSpan { side, lo, hi })
}

/// A generated dungeon layout
///
/// Generation runs to completion inside the constructor; the value is
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dungeon<R: RandomSource = SeededRandom> {
    config: NormalizedConfig,
    random: R,
    rooms: Vec<Room>,
    tiles: TileGrid,
    stats: GenerationStats,
}

impl Dungeon<SeededRandom> {
    /// Generate a dungeon from a configuration
    ///
    /// Without a configured seed the generator is seeded from entropy;
    /// [`Dungeon::seed`] reports the value used.
    pub fn new(config: &DungeonConfig) -> Result<Self, ConfigError> {
        let random = match &config.seed {
            Some(seed) => SeededRandom::new(seed.clone()),
            None => SeededRandom::from_entropy(),
        };
        Self::with_random(config, random)
    }

    /// Numeric seed this layout was generated from
    pub fn seed(&self) -> u64 {
        self.random.seed()
    }
}

impl<R: RandomSource> Dungeon<R> {
    /// Generate a dungeon drawing from the given random source
    ///
    /// `config.seed` is ignored; the source is used as supplied.
    pub fn with_random(config: &DungeonConfig, random: R) -> Result<Self, ConfigError> {
        let config = config.normalize()?;
        let mut dungeon = Self {
            tiles: TileGrid::new(config.cols, config.rows, TileKind::Empty),
            config,
            random,
            rooms: Vec::new(),
            stats: GenerationStats::default(),
        };

        dungeon.generate();
        dungeon.tiles = dungeon.compile_tiles();
        dungeon.stats.rooms = dungeon.rooms.len();
        dungeon.stats.doors = dungeon.tiles.count(TileKind::Door);

        info!(
            "generated {}x{} dungeon: {} rooms, {} doors, {} of {} attempts abandoned",
            dungeon.config.cols,
            dungeon.config.rows,
            dungeon.stats.rooms,
            dungeon.stats.doors,
            dungeon.stats.abandoned,
            dungeon.stats.attempts
        );
        Ok(dungeon)
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Parameters after normalization
    pub fn config(&self) -> &NormalizedConfig {
        &self.config
    }

    /// Accepted rooms in acceptance order; the first is the seed room
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Composited world grid
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    pub fn door_count(&self) -> usize {
        self.stats.doors
    }

    /// Index of the room covering a world cell
    pub fn room_at(&self, col: i32, row: i32) -> Option<usize> {
        self.rooms.iter().position(|room| room.contains(col, row))
    }

    fn generate(&mut self) {
        // Seed room in the middle of the grid. It always fits: normalization
        // keeps room sides at most two cells short of the grid.
        let mut room = self.create_random_room();
        room.set_position(
            (self.config.cols / 2) as i32 - (room.cols() / 2) as i32,
            (self.config.rows / 2) as i32 - (room.rows() / 2) as i32,
        );
        debug!(
            "seed room {}x{} at ({}, {})",
            room.cols(),
            room.rows(),
            room.col(),
            room.row()
        );
        self.rooms.push(room);

        let budget = self.config.max_rooms.saturating_mul(ATTEMPTS_PER_ROOM);
        while self.rooms.len() < self.config.max_rooms && self.stats.attempts < budget {
            self.stats.attempts += 1;
            if !self.generate_room() {
                self.stats.abandoned += 1;
            }
        }
    }

    /// Random room size within the configured ranges and area cap
    fn create_random_room(&mut self) -> Room {
        let NormalizedConfig {
            room_cols,
            room_rows,
            max_area,
            ..
        } = self.config;

        loop {
            let cols = self.random.random_integer(room_cols.min as i32, room_cols.max as i32) as usize;
            let rows = self.random.random_integer(room_rows.min as i32, room_rows.max as i32) as usize;
            if max_area.is_none_or(|cap| cols * rows <= cap) {
                return Room::new(cols, rows);
            }
        }
    }

    /// Try to attach one freshly sized room. Returns false if it never fit.
    fn generate_room(&mut self) -> bool {
        let mut room = self.create_random_room();
        let padding = self.config.door_padding as i32;

        for _ in 0..PLACEMENT_TRIES {
            let Some(attachment) = self.find_room_attachment(&room) else {
                continue;
            };
            room.set_position(attachment.col, attachment.row);
            if !self.can_fit_room(&room) {
                continue;
            }
            let Some(span) = door_span(&room.bounds(), &attachment.target, padding) else {
                continue;
            };

            let doors = self.pick_door_pair(&room.bounds(), &attachment.target, span);
            debug!(
                "room {} ({}x{}) at ({}, {}), {} of ({}, {})",
                self.rooms.len(),
                room.cols(),
                room.rows(),
                room.col(),
                room.row(),
                span.side,
                attachment.target.left,
                attachment.target.top
            );
            self.rooms.push(room);
            for (col, row) in doors {
                self.carve_door(col, row);
            }
            return true;
        }

        debug!(
            "abandoned {}x{} room after {} tries",
            room.cols(),
            room.rows(),
            PLACEMENT_TRIES
        );
        false
    }

    /// Check grid containment and overlap against every accepted room
    fn can_fit_room(&self, room: &Room) -> bool {
        let cols = self.config.cols as i32;
        let rows = self.config.rows as i32;
        if room.col() < 0 || room.col() + room.cols() as i32 > cols - 1 {
            return false;
        }
        if room.row() < 0 || room.row() + room.rows() as i32 > rows - 1 {
            return false;
        }

        !self.rooms.iter().any(|other| room.overlaps(other))
    }

    /// Pick an accepted room and a side of it to place `room` against
    ///
    /// The perpendicular coordinate keeps `2 * door_padding` of shared wall
    /// at either end, enough for a padded door in both rooms. Returns `None`
    /// when the rooms are too narrow for that.
    fn find_room_attachment(&mut self, room: &Room) -> Option<Attachment> {
        let target = self.random.random_pick(&self.rooms).bounds();
        let pad = 2 * self.config.door_padding as i32;
        let cols = room.cols() as i32;
        let rows = room.rows() as i32;

        let direction = Direction::ALL[self.random.random_integer(0, 3) as usize];
        let (col, row) = match direction {
            Direction::North => (
                self.random_in(target.left - (cols - 1) + pad, target.right - pad)?,
                target.top - rows,
            ),
            Direction::West => (
                target.left - cols,
                self.random_in(target.top - (rows - 1) + pad, target.bottom - pad)?,
            ),
            Direction::East => (
                target.right + 1,
                self.random_in(target.top - (rows - 1) + pad, target.bottom - pad)?,
            ),
            Direction::South => (
                self.random_in(target.left - (cols - 1) + pad, target.right - pad)?,
                target.bottom + 1,
            ),
        };

        Some(Attachment { col, row, target })
    }

    fn random_in(&mut self, min: i32, max: i32) -> Option<i32> {
        (min <= max).then(|| self.random.random_integer(min, max))
    }

    /// World cells of the two facing doors: `room`'s first, `target`'s second
    fn pick_door_pair(&mut self, room: &Bounds, target: &Bounds, span: DoorSpan) -> [(i32, i32); 2] {
        let at = self.random.random_integer(span.lo, span.hi);
        match span.side {
            Direction::North => [(at, room.bottom), (at, target.top)],
            Direction::South => [(at, room.top), (at, target.bottom)],
            Direction::West => [(room.right, at), (target.left, at)],
            Direction::East => [(room.left, at), (target.right, at)],
        }
    }

    /// Carve a door into whichever accepted room covers the cell
    fn carve_door(&mut self, col: i32, row: i32) {
        let carved = self
            .rooms
            .iter_mut()
            .find(|room| room.contains(col, row))
            .is_some_and(|room| room.carve_door(col, row));
        debug_assert!(carved, "no wall to carve at ({col}, {row})");
    }

    fn compile_tiles(&self) -> TileGrid {
        let mut tiles = TileGrid::new(self.config.cols, self.config.rows, TileKind::Empty);
        for room in &self.rooms {
            tiles.blit(room.tiles(), room.col() as usize, room.row() as usize);
        }
        tiles
    }
}

impl<R: RandomSource> fmt::Display for Dungeon<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tiles, f)
    }
}
