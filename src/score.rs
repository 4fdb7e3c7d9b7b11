//! Score and bomb tally

/// A bomb is granted each time the score lands on a multiple of this
pub const ROWS_PER_BOMB: u32 = 3;

/// Score tracking for one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Rows cleared so far
    pub points: u32,
    /// Bombs held
    pub bombs: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one cleared row. Returns true if it earned a bomb.
    pub fn add_row(&mut self) -> bool {
        self.points += 1;
        if self.points % ROWS_PER_BOMB == 0 {
            self.bombs += 1;
            true
        } else {
            false
        }
    }
}
