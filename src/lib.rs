//! TETRS remix - falling blocks, a bottom-row bomb, and a greedy auto-player.
//!
//! The library is the simulation only. A host creates a [`GameSession`],
//! feeds it elapsed time and sampled [`Inputs`] once per frame through
//! [`GameSession::tick`], and draws whatever [`GameSession::snapshot`]
//! returns.

pub mod ai;
pub mod board;
pub mod bomb;
pub mod difficulty;
pub mod game;
pub mod piece;
pub mod score;
pub mod settings;
pub mod shape;
pub mod spawner;

pub use board::{COLS, Coord, Grid, LINES};
pub use difficulty::Difficulty;
pub use game::{GameSession, Inputs, Phase, Snapshot, TickReport};
pub use settings::Settings;
