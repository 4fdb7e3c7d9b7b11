//! Generated-board invariants for collision, movement, bombs and compaction

use proptest::prelude::*;
use tetrs_remix::bomb::use_bomb;
use tetrs_remix::piece::Piece;
use tetrs_remix::score::Score;
use tetrs_remix::shape::{BLOCKS, Shape};
use tetrs_remix::{COLS, Coord, Grid, LINES};

fn grid_from(cells: &[u8]) -> Grid {
    let mut grid = Grid::new();
    for (i, &value) in cells.iter().enumerate() {
        let at = Coord::new((i % COLS) as i32, (i / COLS) as i32);
        grid.set(at, value);
    }
    grid
}

/// Sparse boards: mostly empty cells, some occupied with shape colors
fn arb_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(
        prop_oneof![3 => Just(0u8), 1 => 1u8..=7],
        LINES * COLS,
    )
    .prop_map(|cells| grid_from(&cells))
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (0..Shape::all().len()).prop_map(Shape::from_index)
}

fn arb_coord() -> impl Strategy<Value = Coord> {
    (-3i32..COLS as i32 + 3, -3i32..LINES as i32 + 3).prop_map(|(x, y)| Coord::new(x, y))
}

fn reference_collides(grid: &Grid, blocks: &[Coord; BLOCKS]) -> bool {
    blocks.iter().any(|b| {
        b.x < 0
            || b.y < 0
            || b.x >= COLS as i32
            || b.y >= LINES as i32
            || grid.rows()[b.y as usize][b.x as usize] != 0
    })
}

proptest! {
    #[test]
    fn collides_matches_bounds_and_occupancy(
        grid in arb_grid(),
        blocks in prop::array::uniform4(arb_coord()),
    ) {
        let before = grid.clone();
        prop_assert_eq!(grid.collides(&blocks), reference_collides(&grid, &blocks));
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn moves_are_all_or_nothing(
        grid in arb_grid(),
        shape in arb_shape(),
        x in 0i32..COLS as i32 - 1,
        y in 0i32..LINES as i32 - 4,
        dx in -2i32..=2,
    ) {
        let mut piece = Piece::at(shape, Coord::new(x, y));
        let before = *piece.blocks();

        if !piece.translate(dx, &grid) {
            prop_assert_eq!(piece.blocks(), &before);
        }
        let before = *piece.blocks();
        if !piece.rotate(&grid) {
            prop_assert_eq!(piece.blocks(), &before);
        }
    }

    #[test]
    fn accepted_moves_never_overlap(
        grid in arb_grid(),
        shape in arb_shape(),
        x in 0i32..COLS as i32 - 1,
        y in 0i32..LINES as i32 - 4,
        dx in -2i32..=2,
    ) {
        let mut piece = Piece::at(shape, Coord::new(x, y));
        if piece.translate(dx, &grid) {
            prop_assert!(!grid.collides(piece.blocks()));
        }
        if piece.rotate(&grid) {
            prop_assert!(!grid.collides(piece.blocks()));
        }
    }

    #[test]
    fn four_rotations_return_home(
        shape in arb_shape(),
        x in 3i32..COLS as i32 - 4,
        y in 3i32..LINES as i32 - 6,
    ) {
        let grid = Grid::new();
        let mut piece = Piece::at(shape, Coord::new(x, y));
        let home = *piece.blocks();
        for _ in 0..4 {
            prop_assert!(piece.rotate(&grid));
        }
        prop_assert_eq!(piece.blocks(), &home);
    }

    #[test]
    fn bomb_consumes_one_and_shifts(grid in arb_grid(), bombs in 0u32..4) {
        let before = grid.clone();
        let mut after = grid.clone();
        let left = use_bomb(&mut after, bombs);

        if bombs == 0 {
            prop_assert_eq!(left, 0);
            prop_assert_eq!(after, before);
        } else {
            prop_assert_eq!(left, bombs - 1);
            prop_assert!(after.is_row_empty(0));
            for y in 1..LINES {
                prop_assert_eq!(after.rows()[y], before.rows()[y - 1]);
            }
        }
    }

    #[test]
    fn compaction_scores_each_full_row_once(
        grid in arb_grid(),
        full_rows in prop::collection::btree_set(2usize..LINES, 0..4),
        points in 0u32..10,
    ) {
        let mut grid = grid;
        // Keep row 1 clear so only the scored rows matter
        for x in 0..COLS as i32 {
            grid.set(Coord::new(x, 1), 0);
        }
        for &y in &full_rows {
            for x in 0..COLS as i32 {
                grid.set(Coord::new(x, y as i32), 1);
            }
        }
        let full = (2..LINES).filter(|&y| grid.is_row_full(y)).count() as u32;

        let mut score = Score { points, bombs: 0 };
        let result = grid.compact_and_score(&mut score);

        prop_assert_eq!(result.rows_cleared, full);
        prop_assert!(!result.game_over);
        prop_assert_eq!(score.points, points + full);
        let crossings = (points + full) / 3 - points / 3;
        prop_assert_eq!(score.bombs, crossings);
    }
}
