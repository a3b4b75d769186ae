use std::fmt;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::board::{Board, Position, CONNECT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::player::Player;
use super::start::StartingPlayer;
use crate::config::GameConfig;
use crate::error::{MoveError, RecordError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    /// Won and Draw accept no further moves
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(player) => write!(f, "{player} won"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// Where an accepted piece landed and what the game looks like afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    pub status: GameStatus,
}

/// Everything needed to rebuild a game: dimensions, who started and the
/// columns played in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub width: usize,
    pub height: usize,
    pub starting_player: Player,
    pub moves: Vec<usize>,
}

/// A single game of Connect Four.
///
/// A game only moves forward: once it is won or drawn every further drop is
/// rejected, and a rematch is a new `Game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    starting_player: Player,
    current_player: Player,
    status: GameStatus,
    moves: Vec<usize>,
}

impl Game {
    /// Create a game with a starting player drawn from the thread RNG
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, &mut rand::rng())
    }

    /// Create a game with a starting player drawn from `rng`
    pub fn with_rng<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        Self::with_starting_player(width, height, StartingPlayer::Random.choose(rng))
    }

    /// Create a game where `player` moves first. A board with no cells is
    /// already full, so such a game starts out drawn.
    pub fn with_starting_player(width: usize, height: usize, player: Player) -> Self {
        info!("new {width}x{height} game, {player} starts");
        let board = Board::new(width, height);
        let status = if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };
        Game {
            board,
            starting_player: player,
            current_player: player,
            status,
            moves: Vec::new(),
        }
    }

    /// Create a game from configuration. A configured seed makes the
    /// starting player reproducible.
    pub fn from_config(config: &GameConfig) -> Self {
        let player = match config.seed {
            Some(seed) => config
                .starting_player
                .choose(&mut StdRng::seed_from_u64(seed)),
            None => config.starting_player.choose(&mut rand::rng()),
        };
        Self::with_starting_player(config.width, config.height, player)
    }

    /// Rebuild a game by replaying a record's moves from its starting player.
    pub fn replay(record: &GameRecord) -> Result<Self, RecordError> {
        if record.width.checked_mul(record.height).is_none() {
            return Err(RecordError::InvalidDimensions {
                width: record.width,
                height: record.height,
            });
        }
        let mut game =
            Self::with_starting_player(record.width, record.height, record.starting_player);
        for (index, &column) in record.moves.iter().enumerate() {
            game.drop_piece(column)
                .map_err(|source| RecordError::IllegalMove {
                    index,
                    column,
                    source,
                })?;
        }
        Ok(game)
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.board.width()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// The player to move, or the player who made the final move once the
    /// game is over
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get the player who moved first
    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    /// Get current game status
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Columns played so far, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Number of accepted moves
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// The four cells of the winning line, if the game has been won
    pub fn winning_line(&self) -> Option<[Position; CONNECT]> {
        self.status
            .winner()
            .and_then(|player| self.board.winning_line(player))
    }

    /// Drop the current player's piece into `column`.
    ///
    /// A rejected move leaves the game unchanged. After an accepted move the
    /// win check runs before the draw check, and the turn only passes when
    /// the game goes on.
    pub fn drop_piece(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            trace!("rejected drop into column {column}: game is {}", self.status);
            return Err(MoveError::GameOver {
                status: self.status,
            });
        }

        let player = self.current_player;
        let row = self.board.drop_piece(column, player).map_err(|err| {
            trace!("rejected drop by {player}: {err}");
            err
        })?;
        self.moves.push(column);

        self.status = if self.board.has_line(player) {
            GameStatus::Won(player)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            self.current_player = player.other();
            GameStatus::InProgress
        };

        debug!(
            "move {}: {player} -> row {row}, column {column}",
            self.moves.len()
        );
        if self.is_terminal() {
            info!("game over after {} moves: {}", self.moves.len(), self.status);
        }

        Ok(Placement {
            row,
            column,
            player,
            status: self.status,
        })
    }

    /// A fresh game on a board of the same size
    pub fn rematch(&self) -> Game {
        Game::new(self.width(), self.height())
    }

    /// A fresh game on a board of the same size, starting player drawn from `rng`
    pub fn rematch_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Game {
        Game::with_rng(self.width(), self.height(), rng)
    }

    /// Capture dimensions, starting player and moves for a later [`Game::replay`]
    pub fn record(&self) -> GameRecord {
        GameRecord {
            width: self.width(),
            height: self.height(),
            starting_player: self.starting_player,
            moves: self.moves.clone(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
