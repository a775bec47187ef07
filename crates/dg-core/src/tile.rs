//! Tile kinds and row-major tile grids

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    /// Not covered by any room
    #[default]
    Empty = 0,
    Wall = 1,
    Floor = 2,
    Door = 3,
}

impl TileKind {
    /// ASCII glyph used by text dumps
    pub const fn to_ascii(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Door => '+',
        }
    }

    pub const fn is_door(self) -> bool {
        matches!(self, TileKind::Door)
    }
}

/// Rectangular grid of tiles stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    cols: usize,
    rows: usize,
    cells: Vec<TileKind>,
}

impl TileGrid {
    /// Create a grid filled with one kind
    pub fn new(cols: usize, rows: usize, fill: TileKind) -> Self {
        Self {
            cols,
            rows,
            cells: vec![fill; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn idx(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    /// Tile at `(col, row)`, or `None` outside the grid
    pub fn get(&self, col: usize, row: usize) -> Option<TileKind> {
        self.idx(col, row).map(|i| self.cells[i])
    }

    /// Overwrite one tile. Returns false if the cell is outside the grid.
    pub fn set(&mut self, col: usize, row: usize, kind: TileKind) -> bool {
        match self.idx(col, row) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|&&t| t == kind).count()
    }

    /// Copy `src` into this grid with its top-left corner at `(col, row)`.
    ///
    /// Cells falling outside this grid are skipped.
    pub fn blit(&mut self, src: &TileGrid, col: usize, row: usize) {
        for (dy, line) in src.iter_rows().enumerate() {
            for (dx, &kind) in line.iter().enumerate() {
                self.set(col + dx, row + dy, kind);
            }
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.iter_rows() {
            let text: String = line.iter().map(|t| t.to_ascii()).collect();
            writeln!(f, "{}", text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tile_values() {
        assert_eq!(TileKind::Empty as u8, 0);
        assert_eq!(TileKind::Wall as u8, 1);
        assert_eq!(TileKind::Floor as u8, 2);
        assert_eq!(TileKind::Door as u8, 3);
        assert_eq!(TileKind::default(), TileKind::Empty);
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let glyphs: Vec<char> = TileKind::iter().map(TileKind::to_ascii).collect();
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_get_set() {
        let mut grid = TileGrid::new(4, 3, TileKind::Empty);
        assert!(grid.set(3, 2, TileKind::Door));
        assert_eq!(grid.get(3, 2), Some(TileKind::Door));
        assert_eq!(grid.get(4, 2), None);
        assert_eq!(grid.get(0, 3), None);
        assert!(!grid.set(4, 0, TileKind::Wall));
        assert_eq!(grid.count(TileKind::Door), 1);
        assert_eq!(grid.count(TileKind::Empty), 11);
    }

    #[test]
    fn test_blit_clips() {
        let mut world = TileGrid::new(5, 5, TileKind::Empty);
        let patch = TileGrid::new(3, 3, TileKind::Floor);
        world.blit(&patch, 3, 3);
        assert_eq!(world.count(TileKind::Floor), 4);
        assert_eq!(world.get(4, 4), Some(TileKind::Floor));
        assert_eq!(world.get(2, 2), Some(TileKind::Empty));
    }

    #[test]
    fn test_display() {
        let mut grid = TileGrid::new(3, 2, TileKind::Wall);
        grid.set(1, 1, TileKind::Door);
        assert_eq!(grid.to_string(), "###\n#+#\n");
    }
}
