//! Greedy auto-player
//!
//! Tries three moves (shift right, shift left, rotate), previews each with
//! a hard drop on a copy of the piece, and keeps the one that leaves the
//! flattest skyline with a nudge toward the right side of the well.

use crate::board::{COLS, Coord, Grid, LINES};
use crate::piece::Piece;
use crate::shape::BLOCKS;
use tracing::trace;

/// A candidate move, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    ShiftRight,
    ShiftLeft,
    Rotate,
}

impl Candidate {
    pub fn all() -> [Candidate; 3] {
        [Candidate::ShiftRight, Candidate::ShiftLeft, Candidate::Rotate]
    }

    /// Horizontal shift this move asks for
    pub fn dx(&self) -> i32 {
        match self {
            Candidate::ShiftRight => 1,
            Candidate::ShiftLeft => -1,
            Candidate::Rotate => 0,
        }
    }

    pub fn rotates(&self) -> bool {
        matches!(self, Candidate::Rotate)
    }

    /// Apply this move to `piece`, subject to the usual collision rollback
    pub fn apply(&self, piece: &mut Piece, grid: &Grid) -> bool {
        match self {
            Candidate::Rotate => piece.rotate(grid),
            _ => piece.translate(self.dx(), grid),
        }
    }
}

/// The move picked for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub candidate: Candidate,
    pub score: i32,
}

/// Negated spread between the tallest and shortest column once the piece's
/// blocks are counted in. 0 means a perfectly level skyline.
pub fn evaluate_flatness(grid: &Grid, blocks: &[Coord; BLOCKS]) -> i32 {
    let mut heights = grid.column_heights();
    for block in blocks {
        if (0..COLS as i32).contains(&block.x) {
            let height = LINES as i32 - block.y;
            let column = &mut heights[block.x as usize];
            *column = (*column).max(height);
        }
    }

    let max = heights.iter().copied().max().unwrap_or(0);
    let min = heights.iter().copied().min().unwrap_or(0);
    -(max - min)
}

/// Score one candidate against a private copy of `piece`
pub fn score_candidate(grid: &Grid, piece: &Piece, candidate: Candidate) -> i32 {
    let mut trial = piece.clone();
    candidate.apply(&mut trial, grid);
    trial.hard_drop(grid);

    let rightward = trial.blocks()[0].x - COLS as i32 / 2;
    evaluate_flatness(grid, trial.blocks()) + rightward
}

/// Pick the best candidate for `piece`. Neither argument is modified.
///
/// Ties go to the earlier candidate in `Candidate::all()` order.
pub fn decide(grid: &Grid, piece: &Piece) -> Decision {
    let [first, rest @ ..] = Candidate::all();
    let mut best = Decision {
        candidate: first,
        score: score_candidate(grid, piece, first),
    };
    trace!(candidate = ?first, score = best.score, "ai candidate");

    for candidate in rest {
        let score = score_candidate(grid, piece, candidate);
        trace!(?candidate, score, "ai candidate");
        if score > best.score {
            best = Decision { candidate, score };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn test_flatness_of_empty_grid() {
        let grid = Grid::new();
        // Blocks outside the columns are ignored
        let blocks = [Coord::new(-1, 19); BLOCKS];
        assert_eq!(evaluate_flatness(&grid, &blocks), 0);
    }

    #[test]
    fn test_flatness_counts_piece() {
        let grid = Grid::new();
        let piece = Piece::at(Shape::I, Coord::new(2, 16));
        // Column 3 reaches height 4, others 0
        assert_eq!(evaluate_flatness(&grid, piece.blocks()), -4);
    }

    #[test]
    fn test_flatness_uses_stack_tops() {
        let mut grid = Grid::new();
        for x in 0..COLS as i32 {
            grid.set(Coord::new(x, 19), 1);
        }
        grid.set(Coord::new(0, 17), 1);
        let blocks = [Coord::new(5, 18); BLOCKS];
        // Heights: col 0 = 3, col 5 = 2, rest 1
        assert_eq!(evaluate_flatness(&grid, &blocks), -2);
    }

    #[test]
    fn test_prefers_right_on_tie() {
        let grid = Grid::new();
        let piece = Piece::at(Shape::O, Coord::new(4, 0));
        let right = score_candidate(&grid, &piece, Candidate::ShiftRight);
        let rotate = score_candidate(&grid, &piece, Candidate::Rotate);
        assert_eq!(right, rotate);

        let decision = decide(&grid, &piece);
        assert_eq!(decision.candidate, Candidate::ShiftRight);
        assert_eq!(decision.score, right);
    }

    #[test]
    fn test_decide_leaves_inputs_untouched() {
        let mut grid = Grid::new();
        grid.set(Coord::new(3, 19), 2);
        let piece = Piece::at(Shape::T, Coord::new(4, 2));
        let grid_before = grid.clone();
        let piece_before = piece.clone();

        decide(&grid, &piece);
        assert_eq!(grid, grid_before);
        assert_eq!(piece, piece_before);
    }

    #[test]
    fn test_blocked_shift_is_scored_in_place() {
        let grid = Grid::new();
        let piece = Piece::at(Shape::O, Coord::new(COLS as i32 - 2, 0));
        let mut dropped = piece.clone();
        dropped.hard_drop(&grid);
        let expected =
            evaluate_flatness(&grid, dropped.blocks()) + dropped.blocks()[0].x - COLS as i32 / 2;
        assert_eq!(
            score_candidate(&grid, &piece, Candidate::ShiftRight),
            expected
        );
    }
}
