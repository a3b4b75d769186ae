//! # Connect Four
//!
//! A two-player Connect Four game engine. Players alternate dropping pieces
//! into the columns of a grid (7x6 by default) until one of them gets four in
//! a row or the board fills up. Rendering and input handling are left to the
//! caller, which drives a [`game::Game`] one column at a time.
//!
//! ## Modules
//!
//! - [`game`]: Board, players, starting-player choice and the game state machine
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;

pub use config::GameConfig;
pub use error::{ConfigError, MoveError, RecordError};
pub use game::{Board, Cell, Game, GameRecord, GameStatus, Placement, Player, Position};
