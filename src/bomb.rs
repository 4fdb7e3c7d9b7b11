//! Bottom-row bomb
//!
//! Spending a bomb wipes the bottom row and drops the whole stack by one.

use crate::board::{COLS, EMPTY, Grid, LINES};
use tracing::info;

/// Detonate a bomb if one is held and return the remaining count.
///
/// With no bombs the grid is left untouched.
pub fn use_bomb(grid: &mut Grid, bombs: u32) -> u32 {
    if bombs == 0 {
        return 0;
    }

    *grid.row_mut(LINES - 1) = [EMPTY; COLS];
    for y in (1..LINES).rev() {
        let above = grid.rows()[y - 1];
        *grid.row_mut(y) = above;
    }
    *grid.row_mut(0) = [EMPTY; COLS];

    info!(remaining = bombs - 1, "bomb used");
    bombs - 1
}
