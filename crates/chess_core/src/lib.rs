pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod game;
pub mod openings;
pub mod rules;
pub mod state;
pub mod types;

// Re-export core game logic (not search-specific)
pub use board::*;
pub use error::*;
pub use eval::{evaluate, evaluate_normalised};
pub use fen::{board_from_fen, board_to_fen};
pub use game::*;
pub use openings::*;
pub use rules::pseudo_legal_destinations;
pub use state::GameState;
pub use types::*;
