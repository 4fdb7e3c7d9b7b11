//! One playing round: grid, falling piece, score and the tick contract

use crate::ai::{self, Decision};
use crate::board::{COLS, Coord, Grid, LINES};
use crate::bomb;
use crate::difficulty::{Difficulty, FAST_DROP_DELAY};
use crate::piece::{Landing, Piece, PieceController};
use crate::score::Score;
use crate::shape::BLOCKS;
use crate::spawner::Spawner;
use tracing::{debug, info, trace};

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A new piece has just been placed at the spawn origin
    Spawning,
    /// The piece is under player (or AI) control
    Falling,
    /// The piece could not move down and is being written into the grid
    Locking,
    /// Full rows have been compacted
    Cleared,
    /// A lock reached row 1; no more ticks are consumed
    GameOver,
}

/// Inputs sampled once per tick by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inputs {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate: bool,
    pub soft_drop: bool,
    pub use_bomb: bool,
    pub toggle_ai: bool,
}

impl Inputs {
    /// Net horizontal shift; left and right together cancel out
    pub fn dx(&self) -> i32 {
        i32::from(self.move_right) - i32::from(self.move_left)
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub landing: Option<Landing>,
    pub ai_decision: Option<Decision>,
    pub bomb_used: bool,
}

/// Read-only view for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub cells: [[u8; COLS]; LINES],
    pub piece: [Coord; BLOCKS],
    pub color: u8,
    pub score: u32,
    pub bombs: u32,
    pub game_over: bool,
    pub difficulty: Difficulty,
    pub ai_enabled: bool,
}

/// A single round
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    controller: PieceController,
    score: Score,
    difficulty: Difficulty,
    ai_enabled: bool,
    phase: Phase,
}

impl GameSession {
    /// Start a new round with a random seed
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_spawner(difficulty, Spawner::new())
    }

    /// Start a new round whose pieces follow `seed`
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_spawner(difficulty, Spawner::with_seed(seed))
    }

    fn with_spawner(difficulty: Difficulty, spawner: Spawner) -> Self {
        info!(?difficulty, seed = spawner.seed(), "new round");
        Self {
            grid: Grid::new(),
            controller: PieceController::new(spawner),
            score: Score::new(),
            difficulty,
            ai_enabled: false,
            phase: Phase::Spawning,
        }
    }

    /// Throw the current round away and start over
    pub fn restart(&mut self, difficulty: Difficulty) {
        *self = Self::new(difficulty);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for scripted setups
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn piece(&self) -> &Piece {
        self.controller.piece()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Mutable score access, for scripted setups
    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    /// Replace the falling piece, for scripted setups
    pub fn set_piece(&mut self, piece: Piece) {
        self.controller.set_piece(piece);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether the round still accepts input
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Spawning | Phase::Falling)
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    pub fn set_ai_enabled(&mut self, enabled: bool) {
        if self.is_active() && self.ai_enabled != enabled {
            self.ai_enabled = enabled;
            info!(enabled, "auto-player toggled");
        }
    }

    /// Delay for the next gravity step given the held inputs
    pub fn effective_delay(&self, soft_drop: bool) -> f32 {
        if soft_drop || self.ai_enabled {
            FAST_DROP_DELAY
        } else {
            self.difficulty.delay()
        }
    }

    /// Spend a bomb if one is held. Returns true if the grid changed.
    pub fn use_bomb(&mut self) -> bool {
        if !self.is_active() || self.score.bombs == 0 {
            return false;
        }
        self.score.bombs = bomb::use_bomb(&mut self.grid, self.score.bombs);
        true
    }

    /// Advance the round by `dt` seconds.
    ///
    /// Order within a tick: bomb, AI toggle, then either the AI's move or
    /// the player's shift and rotation, then gravity. Does nothing once the
    /// round is over.
    pub fn tick(&mut self, dt: f32, inputs: Inputs) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == Phase::GameOver {
            return report;
        }
        self.enter(Phase::Falling);

        if inputs.use_bomb {
            report.bomb_used = self.use_bomb();
        }
        if inputs.toggle_ai {
            self.set_ai_enabled(!self.ai_enabled);
        }

        if self.ai_enabled {
            let decision = ai::decide(&self.grid, self.controller.piece());
            debug!(candidate = ?decision.candidate, score = decision.score, "ai move");
            if decision.candidate.rotates() {
                self.controller.rotate_once(&self.grid);
            } else {
                self.controller
                    .translate(decision.candidate.dx(), &self.grid);
            }
            report.ai_decision = Some(decision);
        } else {
            let dx = inputs.dx();
            if dx != 0 {
                self.controller.translate(dx, &self.grid);
            }
            if inputs.rotate {
                self.controller.rotate_once(&self.grid);
            }
        }

        let delay = self.effective_delay(inputs.soft_drop);
        let landing = self
            .controller
            .gravity_tick(dt, delay, &mut self.grid, &mut self.score);

        if let Some(landing) = landing {
            self.enter(Phase::Locking);
            self.enter(Phase::Cleared);
            if landing.compaction.game_over {
                self.enter(Phase::GameOver);
                info!(score = self.score.points, "game over");
            } else {
                self.enter(Phase::Spawning);
            }
            report.landing = Some(landing);
        }

        report
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            trace!(from = ?self.phase, to = ?phase, "phase");
            self.phase = phase;
        }
    }

    /// Copy of everything the renderer needs
    pub fn snapshot(&self) -> Snapshot {
        let piece = self.controller.piece();
        Snapshot {
            cells: *self.grid.rows(),
            piece: *piece.blocks(),
            color: piece.color,
            score: self.score.points,
            bombs: self.score.bombs,
            game_over: self.is_game_over(),
            difficulty: self.difficulty,
            ai_enabled: self.ai_enabled,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
