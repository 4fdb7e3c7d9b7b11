//! Active falling piece logic

use crate::board::{Compaction, Coord, Grid};
use crate::score::Score;
use crate::shape::{BLOCKS, Shape};
use crate::spawner::Spawner;
use tracing::debug;

/// Where every new piece is placed; shape offsets are relative to it
pub const SPAWN_ORIGIN: Coord = Coord::new(0, 0);

/// Index of the block rotations pivot around
const PIVOT: usize = 1;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    /// Cell value written on lock
    pub color: u8,
    /// Absolute positions of the 4 blocks
    blocks: [Coord; BLOCKS],
    /// Positions before the most recent attempted move
    shadow: [Coord; BLOCKS],
}

impl Piece {
    /// Create a new piece at the spawn origin
    pub fn new(shape: Shape) -> Self {
        Self::at(shape, SPAWN_ORIGIN)
    }

    /// Create a piece with its layout placed at `origin`
    pub fn at(shape: Shape, origin: Coord) -> Self {
        let blocks = shape.cells_at(origin);
        Self {
            shape,
            color: shape.color_id(),
            blocks,
            shadow: blocks,
        }
    }

    pub fn blocks(&self) -> &[Coord; BLOCKS] {
        &self.blocks
    }

    /// Positions held before the last attempted move
    pub fn shadow(&self) -> &[Coord; BLOCKS] {
        &self.shadow
    }

    /// Apply `step` to every block; roll the whole piece back if the result
    /// collides. Returns true if the move stuck.
    fn try_move(&mut self, grid: &Grid, step: impl Fn(Coord) -> Coord) -> bool {
        self.shadow = self.blocks;
        self.blocks = self.blocks.map(step);
        if grid.collides(&self.blocks) {
            self.blocks = self.shadow;
            false
        } else {
            true
        }
    }

    /// Shift horizontally by `dx`, all or nothing
    pub fn translate(&mut self, dx: i32, grid: &Grid) -> bool {
        self.try_move(grid, |c| Coord::new(c.x + dx, c.y))
    }

    /// Rotate 90° about block 1. No wall kicks: a blocked rotation is dropped.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let pivot = self.blocks[PIVOT];
        self.try_move(grid, |c| {
            let dx = c.y - pivot.y;
            let dy = c.x - pivot.x;
            Coord::new(pivot.x - dx, pivot.y + dy)
        })
    }

    /// Try to move down one row
    pub fn move_down(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, |c| Coord::new(c.x, c.y + 1))
    }

    /// Move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, grid: &Grid) -> i32 {
        let mut distance = 0;
        while self.move_down(grid) {
            distance += 1;
        }
        distance
    }
}

/// Outcome of a gravity step that locked the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub cells: [Coord; BLOCKS],
    pub color: u8,
    pub compaction: Compaction,
}

/// Owns the falling piece, the gravity timer and the shape source
#[derive(Debug, Clone)]
pub struct PieceController {
    piece: Piece,
    spawner: Spawner,
    /// Seconds accumulated since the last gravity step
    timer: f32,
}

impl PieceController {
    pub fn new(mut spawner: Spawner) -> Self {
        let piece = Piece::new(spawner.next());
        Self {
            piece,
            spawner,
            timer: 0.0,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Swap in a specific piece
    pub fn set_piece(&mut self, piece: Piece) {
        self.piece = piece;
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Replace the current piece with a random one at the spawn origin
    pub fn spawn(&mut self) {
        self.piece = Piece::new(self.spawner.next());
        debug!(shape = ?self.piece.shape, "spawned");
    }

    pub fn translate(&mut self, dx: i32, grid: &Grid) -> bool {
        self.piece.translate(dx, grid)
    }

    pub fn rotate_once(&mut self, grid: &Grid) -> bool {
        self.piece.rotate(grid)
    }

    /// Advance the gravity timer by `dt` seconds.
    ///
    /// Once the timer exceeds `delay` the piece moves down a row. If it can't,
    /// its last valid position is written into the grid, full rows are
    /// compacted into `score`, and a new piece spawns. The timer restarts
    /// after every step, locked or not.
    pub fn gravity_tick(
        &mut self,
        dt: f32,
        delay: f32,
        grid: &mut Grid,
        score: &mut Score,
    ) -> Option<Landing> {
        self.timer += dt;
        if self.timer <= delay {
            return None;
        }
        self.timer = 0.0;

        if self.piece.move_down(grid) {
            return None;
        }

        let cells = *self.piece.shadow();
        let color = self.piece.color;
        grid.commit(&cells, color);
        debug!(?cells, color, "locked");

        let compaction = grid.compact_and_score(score);
        self.spawn();
        Some(Landing {
            cells,
            color,
            compaction,
        })
    }
}
