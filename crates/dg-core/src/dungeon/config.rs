//! Generation parameters
//!
//! [`DungeonConfig`] is the caller-facing value (all fields optional in
//! serialized form). [`DungeonConfig::normalize`] clamps it once into the
//! [`NormalizedConfig`] the generator actually runs with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::room::MIN_ROOM_SIDE;
use crate::rng::Seed;

/// Default grid width and height
pub const DEFAULT_GRID_SIDE: usize = 40;

/// Default cap on `cols * rows` of a generated room
pub const DEFAULT_MAX_AREA: usize = 150;

/// Default target number of rooms
pub const DEFAULT_MAX_ROOMS: usize = 50;

/// Largest grid side; world coordinates are `i32`
pub const MAX_GRID_SIDE: usize = 1 << 15;

/// Free cells a grid needs beyond the smallest room: the room must keep
/// `col >= 0` and `col + cols <= grid - 1` when centered.
const GRID_MARGIN: usize = 2;

/// Configuration errors that clamping cannot repair
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid is {cols}x{rows}, each side must be at least {min}")]
    GridTooSmall { cols: usize, rows: usize, min: usize },

    #[error("grid is {cols}x{rows}, each side must be at most {max}")]
    GridTooLarge { cols: usize, rows: usize, max: usize },

    #[error("minimum room {axis} of {min} does not fit a grid {axis} of {grid}")]
    RoomTooLarge {
        axis: &'static str,
        min: usize,
        grid: usize,
    },
}

/// Inclusive size range for one room axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    pub max: usize,
}

impl SizeRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::new(5, 10)
    }
}

/// Dungeon generation parameters as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Grid width
    pub cols: usize,
    /// Grid height
    pub rows: usize,
    /// Seed for the random source; `None` draws one from entropy
    pub seed: Option<Seed>,
    /// Minimum distance a door keeps from a room corner
    pub door_padding: usize,
    pub room_cols: SizeRange,
    pub room_rows: SizeRange,
    /// Cap on `cols * rows` of a single room
    pub max_area: Option<usize>,
    /// Upper bound on the number of rooms
    pub max_rooms: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_GRID_SIDE,
            rows: DEFAULT_GRID_SIDE,
            seed: None,
            door_padding: 1,
            room_cols: SizeRange::default(),
            room_rows: SizeRange::default(),
            max_area: Some(DEFAULT_MAX_AREA),
            max_rooms: DEFAULT_MAX_ROOMS,
        }
    }
}

/// Clamped parameters the generator runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedConfig {
    pub cols: usize,
    pub rows: usize,
    pub door_padding: usize,
    pub room_cols: SizeRange,
    pub room_rows: SizeRange,
    pub max_area: Option<usize>,
    pub max_rooms: usize,
}

impl DungeonConfig {
    /// Builder-style seed setter
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Clamp the configuration into the values generation uses.
    ///
    /// Room minimums are raised to [`MIN_ROOM_SIDE`], maximums to at least the
    /// minimum and at most what a centered room can occupy, the area cap to at
    /// least the smallest room, `door_padding` to the longer grid side, and
    /// `max_rooms` to at least one.
    pub fn normalize(&self) -> Result<NormalizedConfig, ConfigError> {
        let min_grid = MIN_ROOM_SIDE + GRID_MARGIN;
        if self.cols < min_grid || self.rows < min_grid {
            return Err(ConfigError::GridTooSmall {
                cols: self.cols,
                rows: self.rows,
                min: min_grid,
            });
        }
        if self.cols > MAX_GRID_SIDE || self.rows > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                cols: self.cols,
                rows: self.rows,
                max: MAX_GRID_SIDE,
            });
        }

        let room_cols = clamp_range(self.room_cols, self.cols, "width")?;
        let room_rows = clamp_range(self.room_rows, self.rows, "height")?;
        let min_area = room_cols.min * room_rows.min;

        Ok(NormalizedConfig {
            cols: self.cols,
            rows: self.rows,
            door_padding: self.door_padding.min(self.cols.max(self.rows)),
            room_cols,
            room_rows,
            max_area: self.max_area.map(|area| area.max(min_area)),
            max_rooms: self.max_rooms.max(1),
        })
    }
}

fn clamp_range(range: SizeRange, grid: usize, axis: &'static str) -> Result<SizeRange, ConfigError> {
    let limit = grid - GRID_MARGIN;
    let min = range.min.max(MIN_ROOM_SIDE);
    if min > limit {
        return Err(ConfigError::RoomTooLarge { axis, min, grid });
    }
    Ok(SizeRange::new(min, range.max.max(min).min(limit)))
}
