//! Rooms and their bounding boxes
//!
//! A room owns a local tile grid: a wall ring around a floor interior.
//! Doors are carved into the wall ring after the room has been placed.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::tile::{TileGrid, TileKind};

/// Smallest room side that still leaves a floor interior
pub const MIN_ROOM_SIDE: usize = 3;

/// Side of a room another room is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    North,
    West,
    East,
    South,
}

impl Direction {
    /// Directions in the order attachment draws index them
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::East,
        Direction::South,
    ];

    /// Whether rooms on this side share a horizontal boundary
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// Inclusive world-space extent of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Check if this box intersects another (coinciding edges count)
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    /// Check if a world cell lies inside this box
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.left && col <= self.right && row >= self.top && row <= self.bottom
    }

    /// Which side of `other` this box sits flush against, if any
    ///
    /// Only edges are compared; the boxes may not share any span along the
    /// boundary.
    pub fn side_of(&self, other: &Bounds) -> Option<Direction> {
        if self.bottom + 1 == other.top {
            Some(Direction::North)
        } else if self.right + 1 == other.left {
            Some(Direction::West)
        } else if self.left == other.right + 1 {
            Some(Direction::East)
        } else if self.top == other.bottom + 1 {
            Some(Direction::South)
        } else {
            None
        }
    }
}

/// Rectangular room with its own wall-bordered tile grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    cols: usize,
    rows: usize,
    col: i32,
    row: i32,
    tiles: TileGrid,
}

impl Room {
    /// Create an unplaced room. Both sides must be at least [`MIN_ROOM_SIDE`].
    pub fn new(cols: usize, rows: usize) -> Self {
        debug_assert!(cols >= MIN_ROOM_SIDE && rows >= MIN_ROOM_SIDE);

        let mut tiles = TileGrid::new(cols, rows, TileKind::Floor);
        for x in 0..cols {
            tiles.set(x, 0, TileKind::Wall);
            tiles.set(x, rows - 1, TileKind::Wall);
        }
        for y in 0..rows {
            tiles.set(0, y, TileKind::Wall);
            tiles.set(cols - 1, y, TileKind::Wall);
        }

        Self {
            cols,
            rows,
            col: 0,
            row: 0,
            tiles,
        }
    }

    /// Move the room's top-left corner to a world cell
    pub fn set_position(&mut self, col: i32, row: i32) {
        self.col = col;
        self.row = row;
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn left(&self) -> i32 {
        self.col
    }

    pub fn right(&self) -> i32 {
        self.col + self.cols as i32 - 1
    }

    pub fn top(&self) -> i32 {
        self.row
    }

    pub fn bottom(&self) -> i32 {
        self.row + self.rows as i32 - 1
    }

    /// Get center point of room
    pub fn center(&self) -> (i32, i32) {
        (
            self.col + (self.cols / 2) as i32,
            self.row + (self.rows / 2) as i32,
        )
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.left(),
            top: self.top(),
            right: self.right(),
            bottom: self.bottom(),
        }
    }

    /// Get room area including walls
    pub fn area(&self) -> usize {
        self.cols * self.rows
    }

    /// Local tile grid
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn overlaps(&self, other: &Room) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    /// Check if a world cell is inside the room, walls included
    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.bounds().contains(col, row)
    }

    /// Which side of `other` this room sits flush against
    pub fn side_of(&self, other: &Room) -> Option<Direction> {
        self.bounds().side_of(&other.bounds())
    }

    /// Local `(col, row)` of every door, in row-major order
    pub fn door_locations(&self) -> Vec<(usize, usize)> {
        let mut doors = Vec::new();
        for (y, line) in self.tiles.iter_rows().enumerate() {
            for (x, kind) in line.iter().enumerate() {
                if kind.is_door() {
                    doors.push((x, y));
                }
            }
        }
        doors
    }

    /// Turn the wall at a world cell into a door
    ///
    /// Returns true if the cell holds a door afterwards. Floor cells and
    /// cells outside the room are left untouched.
    pub fn carve_door(&mut self, col: i32, row: i32) -> bool {
        if !self.contains(col, row) {
            return false;
        }
        let x = (col - self.col) as usize;
        let y = (row - self.row) as usize;
        match self.tiles.get(x, y) {
            Some(TileKind::Wall) => self.tiles.set(x, y, TileKind::Door),
            Some(TileKind::Door) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(cols: usize, rows: usize, col: i32, row: i32) -> Room {
        let mut room = Room::new(cols, rows);
        room.set_position(col, row);
        room
    }

    #[test]
    fn test_room_tiles() {
        let room = Room::new(5, 4);
        assert_eq!(room.tiles().cols(), 5);
        assert_eq!(room.tiles().rows(), 4);
        assert_eq!(room.tiles().count(TileKind::Floor), 3 * 2);
        assert_eq!(room.tiles().count(TileKind::Wall), 5 * 4 - 3 * 2);
        assert_eq!(room.tiles().get(0, 0), Some(TileKind::Wall));
        assert_eq!(room.tiles().get(1, 1), Some(TileKind::Floor));
    }

    #[test]
    fn test_smallest_room_has_one_floor() {
        let room = Room::new(3, 3);
        assert_eq!(room.tiles().count(TileKind::Floor), 1);
        assert_eq!(room.tiles().get(1, 1), Some(TileKind::Floor));
    }

    #[test]
    fn test_room_bounds() {
        let room = placed(5, 4, 10, 20);
        assert_eq!(
            room.bounds(),
            Bounds {
                left: 10,
                top: 20,
                right: 14,
                bottom: 23
            }
        );
        assert_eq!(room.center(), (12, 22));
        assert_eq!(room.area(), 20);
    }

    #[test]
    fn test_unplaced_room_sits_at_origin() {
        let room = Room::new(4, 6);
        assert_eq!((room.col(), room.row()), (0, 0));
        assert_eq!(room.right(), 3);
        assert_eq!(room.bottom(), 5);
    }

    #[test]
    fn test_room_overlap() {
        let room1 = placed(5, 5, 5, 5);
        let room2 = placed(5, 5, 8, 8);
        let room3 = placed(5, 5, 15, 15);

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
        assert!(!room3.overlaps(&room1));
    }

    #[test]
    fn test_coinciding_edges_overlap() {
        let room1 = placed(5, 5, 0, 0);
        let room2 = placed(5, 5, 4, 0);
        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
    }

    #[test]
    fn test_flush_rooms_do_not_overlap() {
        let room1 = placed(5, 5, 0, 0);
        let room2 = placed(5, 5, 5, 2);
        assert!(!room1.overlaps(&room2));
        assert_eq!(room2.side_of(&room1), Some(Direction::East));
        assert_eq!(room1.side_of(&room2), Some(Direction::West));
    }

    #[test]
    fn test_side_of() {
        let target = placed(5, 5, 10, 10);
        assert_eq!(placed(4, 3, 11, 7).side_of(&target), Some(Direction::North));
        assert_eq!(placed(4, 3, 11, 15).side_of(&target), Some(Direction::South));
        assert_eq!(placed(3, 4, 7, 11).side_of(&target), Some(Direction::West));
        assert_eq!(placed(3, 4, 15, 11).side_of(&target), Some(Direction::East));
        assert_eq!(placed(3, 3, 30, 30).side_of(&target), None);
    }

    #[test]
    fn test_no_doors_on_fresh_room() {
        assert!(Room::new(6, 6).door_locations().is_empty());
    }

    #[test]
    fn test_carve_door() {
        let mut room = placed(5, 5, 10, 10);
        assert!(room.carve_door(12, 10));
        assert!(room.carve_door(14, 12));
        // interior floor stays floor
        assert!(!room.carve_door(12, 12));
        // outside the room
        assert!(!room.carve_door(20, 20));
        assert_eq!(room.door_locations(), vec![(2, 0), (4, 2)]);
        assert_eq!(room.tiles().get(2, 2), Some(TileKind::Floor));
    }

    #[test]
    fn test_carve_door_twice() {
        let mut room = placed(5, 5, 0, 0);
        assert!(room.carve_door(0, 2));
        assert!(room.carve_door(0, 2));
        assert_eq!(room.door_locations(), vec![(0, 2)]);
    }

    #[test]
    fn test_door_locations_row_major() {
        let mut room = placed(6, 5, 0, 0);
        room.carve_door(5, 3);
        room.carve_door(0, 3);
        room.carve_door(3, 0);
        assert_eq!(room.door_locations(), vec![(3, 0), (0, 3), (5, 3)]);
    }

    #[test]
    fn test_direction_order() {
        assert_eq!(Direction::ALL[0], Direction::North);
        assert_eq!(Direction::ALL[3], Direction::South);
        assert!(Direction::North.is_vertical());
        assert!(!Direction::East.is_vertical());
    }
}
