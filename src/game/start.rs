use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;

/// How the first player of a new game is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingPlayer {
    /// Uniformly at random from the two players
    #[default]
    Random,
    One,
    Two,
}

impl StartingPlayer {
    /// Resolve to a concrete player, drawing from `rng` only for `Random`.
    pub fn choose<R: Rng + ?Sized>(self, rng: &mut R) -> Player {
        match self {
            StartingPlayer::Random => {
                if rng.random_bool(0.5) {
                    Player::One
                } else {
                    Player::Two
                }
            }
            StartingPlayer::One => Player::One,
            StartingPlayer::Two => Player::Two,
        }
    }
}

impl From<Player> for StartingPlayer {
    fn from(player: Player) -> Self {
        match player {
            Player::One => StartingPlayer::One,
            Player::Two => StartingPlayer::Two,
        }
    }
}
