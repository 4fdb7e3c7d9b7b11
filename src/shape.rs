//! Tetromino layouts
//!
//! Every shape is four cells packed into a 2-wide, 4-tall box. A packed
//! offset `n` in `0..8` decodes to `x = n % 2`, `y = n / 2`.

use crate::board::Coord;

/// Number of distinct shapes
pub const SHAPE_COUNT: usize = 7;

/// Blocks per piece
pub const BLOCKS: usize = 4;

/// The 7 shapes, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    Z,
    S,
    T,
    L,
    J,
    O,
}

impl Shape {
    /// All shapes in table order (index 0 = I)
    pub fn all() -> [Shape; SHAPE_COUNT] {
        [
            Shape::I,
            Shape::Z,
            Shape::S,
            Shape::T,
            Shape::L,
            Shape::J,
            Shape::O,
        ]
    }

    /// Look up a shape by table index.
    ///
    /// Panics on an index outside `0..SHAPE_COUNT`: that means the spawner
    /// itself is broken, not that a player did something odd.
    pub fn from_index(index: usize) -> Shape {
        assert!(index < SHAPE_COUNT, "shape index {index} out of range");
        Self::all()[index]
    }

    pub fn index(&self) -> usize {
        match self {
            Shape::I => 0,
            Shape::Z => 1,
            Shape::S => 2,
            Shape::T => 3,
            Shape::L => 4,
            Shape::J => 5,
            Shape::O => 6,
        }
    }

    /// Cell value this shape leaves behind on the grid (1..=7)
    pub fn color_id(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Packed offsets; block 1 is the rotation pivot
    pub fn offsets(&self) -> [u8; BLOCKS] {
        match self {
            Shape::I => [1, 3, 5, 7],
            Shape::Z => [2, 4, 5, 7],
            Shape::S => [3, 5, 4, 6],
            Shape::T => [3, 5, 4, 7],
            Shape::L => [2, 3, 5, 7],
            Shape::J => [3, 5, 7, 6],
            Shape::O => [2, 3, 4, 5],
        }
    }

    /// Absolute cells of this shape placed at `origin`
    pub fn cells_at(&self, origin: Coord) -> [Coord; BLOCKS] {
        self.offsets()
            .map(|n| Coord::new(origin.x + i32::from(n % 2), origin.y + i32::from(n / 2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, shape) in Shape::all().iter().enumerate() {
            assert_eq!(shape.index(), i);
            assert_eq!(Shape::from_index(i), *shape);
        }
    }

    #[test]
    #[should_panic]
    fn test_bad_index_panics() {
        Shape::from_index(SHAPE_COUNT);
    }

    #[test]
    fn test_i_piece_decodes_to_column() {
        let cells = Shape::I.cells_at(Coord::new(0, 0));
        assert_eq!(
            cells,
            [
                Coord::new(1, 0),
                Coord::new(1, 1),
                Coord::new(1, 2),
                Coord::new(1, 3)
            ]
        );
    }

    #[test]
    fn test_offsets_stay_in_box() {
        for shape in Shape::all() {
            for cell in shape.cells_at(Coord::new(0, 0)) {
                assert!((0..2).contains(&cell.x));
                assert!((0..4).contains(&cell.y));
            }
        }
    }

    #[test]
    fn test_color_ids_are_distinct_and_nonzero() {
        let ids: Vec<u8> = Shape::all().iter().map(|s| s.color_id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
