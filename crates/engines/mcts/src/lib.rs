//! Monte Carlo tree search engine.
//!
//! The search is generic over the [`game::GameAdapter`] capability seam and
//! never sees a board representation; [`adapter`] instantiates it for chess
//! and is the only module that touches `chess_core` types directly.

pub mod adapter;
pub mod game;
pub mod search;
pub mod tree;

pub use adapter::{search_move, ChessGame};
pub use game::GameAdapter;
pub use search::{Mcts, MctsConfig};
pub use tree::{Node, NodeId, Tree};
