//! Noughts core - tic-tac-toe rules engine and minimax solver
//!
//! This crate holds the game logic only. Front-ends own a [`GameEngine`],
//! feed it cells, and ask an [`AiSolver`] for the computer's reply.
//!
//! # Architecture
//!
//! - **Engine**: move list, derived board, win/draw detection, undo
//! - **Solver**: exhaustive minimax with random tie-breaking
//! - **Rules**: pure line and draw checks shared by both
//! - **Invariants**: session properties checked after every mutation in debug builds
//!
//! # Example
//!
//! ```
//! use noughts_core::{AiSolver, GameEngine, MoveOutcome, Player};
//!
//! let mut engine = GameEngine::new();
//! assert_eq!(engine.apply_move_at(1, 1).unwrap(), MoveOutcome::Continue);
//!
//! let reply = AiSolver::new()
//!     .best_move(engine.current_player(), &engine.board())
//!     .unwrap();
//! assert!(engine.is_valid_move(reply));
//! assert_eq!(engine.current_player(), Player::Circle);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
pub mod invariants;
pub mod rules;
mod session;
mod solver;
mod types;

pub use engine::{GameEngine, MoveOutcome, Rejection, RoundStatus, UndoOutcome};
pub use error::CellError;
pub use rules::{Slope, WinLine, is_player_winning};
pub use session::GameSession;
pub use solver::{AiSolver, Score, minimax_score};
pub use types::{Board, Cell, Player, Square};
