//! Core Connect Four game logic: board representation, player types,
//! starting-player choice and the game state machine.

mod board;
mod player;
mod start;
mod state;

pub use board::{Board, Cell, Position, CONNECT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use player::Player;
pub use start::StartingPlayer;
pub use state::{Game, GameRecord, GameStatus, Placement};
