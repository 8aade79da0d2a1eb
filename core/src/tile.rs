use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Canonical player-visible state stored by the board engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine that was revealed and ended the game.
    Exploded,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Exploded)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Full description of one cell as seen by a caller.
///
/// `is_mine` is `None` while the game is still being played and becomes known
/// once it has been won or lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub coords: Coord2,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
    pub is_mine: Option<bool>,
}

/// Render-ready tile, covering both in-game and end-of-game visuals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Closed,
    Open(u8),
    Flag,
    Exploded,
    // these are only used to show result after the game finishes:
    Mine,
    IncorrectFlag,
}
