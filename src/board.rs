//! Playfield grid and collision detection

use crate::score::Score;
use crate::shape::BLOCKS;
use tracing::info;

/// Playfield dimensions
pub const LINES: usize = 20;
pub const COLS: usize = 10;

/// Empty cell value
pub const EMPTY: u8 = 0;

/// A grid position. Row 0 is the top, x grows rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this position lies on the playfield
    pub fn in_bounds(&self) -> bool {
        (0..COLS as i32).contains(&self.x) && (0..LINES as i32).contains(&self.y)
    }
}

/// Result of one compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compaction {
    pub rows_cleared: u32,
    pub game_over: bool,
}

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Stored as [row][col], row 0 is top
    cells: [[u8; COLS]; LINES],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; COLS]; LINES],
        }
    }

    /// Get the cell at a position, None if out of bounds
    pub fn get(&self, at: Coord) -> Option<u8> {
        if !at.in_bounds() {
            return None;
        }
        Some(self.cells[at.y as usize][at.x as usize])
    }

    /// Set a cell. Returns false if out of bounds.
    pub fn set(&mut self, at: Coord, value: u8) -> bool {
        if !at.in_bounds() {
            return false;
        }
        self.cells[at.y as usize][at.x as usize] = value;
        true
    }

    /// Read-only view of all rows, top first
    pub fn rows(&self) -> &[[u8; COLS]; LINES] {
        &self.cells
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8; COLS] {
        &mut self.cells[y]
    }

    /// True if any block is off the playfield or on an occupied cell
    pub fn collides(&self, blocks: &[Coord; BLOCKS]) -> bool {
        blocks
            .iter()
            .any(|&at| self.get(at).is_none_or(|cell| cell != EMPTY))
    }

    /// Write `color` into every block's cell.
    ///
    /// The blocks must already have passed `collides`; an out-of-range
    /// block panics.
    pub fn commit(&mut self, blocks: &[Coord; BLOCKS], color: u8) {
        for at in blocks {
            assert!(at.in_bounds(), "commit outside the grid at {at:?}");
            self.cells[at.y as usize][at.x as usize] = color;
        }
    }

    /// Drop full rows and credit them to `score`.
    ///
    /// One descending pass over rows `LINES-1..=1` with a separate write
    /// slot: every source row is copied into the slot, and the slot only
    /// moves up after a row that is not full, so a full row gets
    /// overwritten by the next source row. Rows above the final slot are
    /// left as they were. Any block seen in row 1 ends the round.
    pub fn compact_and_score(&mut self, score: &mut Score) -> Compaction {
        let mut result = Compaction::default();
        let mut slot = LINES - 1;

        for row in (1..LINES).rev() {
            let mut filled = 0;
            for col in 0..COLS {
                let cell = self.cells[row][col];
                if cell != EMPTY {
                    if row == 1 {
                        result.game_over = true;
                    }
                    filled += 1;
                }
                self.cells[slot][col] = cell;
            }

            if filled < COLS {
                slot -= 1;
            } else {
                result.rows_cleared += 1;
                if score.add_row() {
                    info!(score = score.points, bombs = score.bombs, "bomb earned");
                }
            }
        }

        if result.rows_cleared > 0 {
            info!(
                rows = result.rows_cleared,
                score = score.points,
                "rows cleared"
            );
        }
        result
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|&cell| cell != EMPTY)
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.cells[y].iter().all(|&cell| cell == EMPTY)
    }

    /// Check if the grid is completely empty
    pub fn is_empty(&self) -> bool {
        (0..LINES).all(|y| self.is_row_empty(y))
    }

    /// Height of each column's stack, 0 for an empty column
    pub fn column_heights(&self) -> [i32; COLS] {
        let mut heights = [0; COLS];
        for (x, height) in heights.iter_mut().enumerate() {
            if let Some(top) = (0..LINES).find(|&y| self.cells[y][x] != EMPTY) {
                *height = (LINES - top) as i32;
            }
        }
        heights
    }
}
