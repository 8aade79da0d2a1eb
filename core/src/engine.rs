use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won
/// - NotStarted -> Lost, only for boards built from a fixed layout
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No cell revealed yet, mines not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a caller needs to render a lost game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LossReport {
    pub triggered: Coord2,
    pub mines: Vec<Coord2>,
    pub misflagged: Vec<Coord2>,
}

/// Result of a reveal: outcome plus every cell whose revealed or flag state changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub changed: Vec<Coord2>,
    pub loss: Option<LossReport>,
}

impl RevealReport {
    fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            changed: Vec::new(),
            loss: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagReport {
    pub outcome: MarkOutcome,
    pub flag_count: CellCount,
}

/// One game of minesweeper, from the first click to a win or a loss.
///
/// Mines are not placed until the first reveal, which is guaranteed to land on a
/// safe cell. Use [`Board::from_layout`] for a board with a known layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    seed: u64,
    mine_layout: Option<MineLayout>,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            mine_layout: None,
            cells: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::NotStarted,
            triggered_mine: None,
        }
    }

    pub fn new_game(rows: Coord, cols: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((rows, cols), mines)?;
        Ok(Self::new(config, seed))
    }

    /// Board whose mines are already known, the first reveal only starts the game.
    pub fn from_layout(mine_layout: MineLayout) -> Result<Self> {
        let config = mine_layout.game_config()?;
        let mut board = Self::new(config, 0);
        board.mine_layout = Some(mine_layout);
        Ok(board)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Value behind the mine counter, `mines - flags`.
    pub fn flags_remaining(&self) -> i32 {
        i32::from(self.config.mines()) - i32::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// `None` until the first reveal placed the mines.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Adjacent counts are only disclosed for revealed cells until the game ends,
    /// same for whether the cell holds a mine.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        let state = self.cells[coords.to_nd_index()];
        let finished_layout = self.mine_layout.as_ref().filter(|_| self.is_finished());

        let adjacent_mines = match (state, finished_layout) {
            (CellState::Revealed(count), _) => count,
            (_, Some(layout)) => layout.adjacent_mine_count(coords),
            (_, None) => 0,
        };

        Ok(CellView {
            coords,
            is_revealed: state.is_revealed(),
            is_flagged: state.is_flagged(),
            adjacent_mines,
            is_mine: finished_layout.map(|layout| layout.contains_mine(coords)),
        })
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.config.validate_coords(coords)?;
        let lost = matches!(self.state, GameState::Lost);
        let has_mine = self
            .mine_layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords));

        Ok(match self.cells[coords.to_nd_index()] {
            CellState::Revealed(count) => Tile::Open(count),
            CellState::Exploded => Tile::Exploded,
            CellState::Flagged if lost && !has_mine => Tile::IncorrectFlag,
            CellState::Flagged => Tile::Flag,
            CellState::Hidden if lost && has_mine => Tile::Mine,
            CellState::Hidden => Tile::Closed,
        })
    }

    /// Flags or unflags a hidden cell. Placing a flag is refused once every mine
    /// has one; removing a flag always works.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.config.validate_coords(coords)?;

        let outcome = if self.state.is_final() {
            NoChange
        } else {
            match self.cells[coords.to_nd_index()] {
                Hidden if self.flagged_count >= self.config.mines() => {
                    log::debug!("Flag limit of {} reached, ignoring {:?}", self.config.mines(), coords);
                    NoChange
                }
                Hidden => {
                    self.cells[coords.to_nd_index()] = Flagged;
                    self.flagged_count += 1;
                    Changed
                }
                Flagged => {
                    self.cells[coords.to_nd_index()] = Hidden;
                    self.flagged_count -= 1;
                    Changed
                }
                Revealed(_) | Exploded => NoChange,
            }
        };

        Ok(FlagReport {
            outcome,
            flag_count: self.flagged_count,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.config.validate_coords(coords)?;

        if self.state.is_final() || self.cells[coords.to_nd_index()] != CellState::Hidden {
            return Ok(RevealReport::unchanged());
        }

        let layout = self.mine_layout.get_or_insert_with(|| {
            RandomMinefieldGenerator::new(self.seed, coords).generate(self.config)
        });

        if layout.contains_mine(coords) {
            self.cells[coords.to_nd_index()] = CellState::Exploded;
            self.triggered_mine = Some(coords);
            let loss = LossReport {
                triggered: coords,
                mines: layout.iter_mines().collect(),
                misflagged: self
                    .cells
                    .indexed_iter()
                    .filter(|&(_, &cell)| cell == CellState::Flagged)
                    .map(|((row, col), _)| (row as Coord, col as Coord))
                    .filter(|&pos| !layout.contains_mine(pos))
                    .collect(),
            };
            self.set_state(GameState::Lost);
            return Ok(RevealReport {
                outcome: RevealOutcome::HitMine,
                changed: vec![coords],
                loss: Some(loss),
            });
        }

        let layout_safe_cells = layout.safe_cell_count();
        let mut changed = flood_reveal(layout, &mut self.cells, coords);
        self.revealed_count += changed.len() as CellCount;

        if self.revealed_count == layout_safe_cells {
            changed.extend(self.flag_all_mines());
            self.set_state(GameState::Won);
            Ok(RevealReport {
                outcome: RevealOutcome::Won,
                changed,
                loss: None,
            })
        } else {
            if self.state.is_initial() {
                self.set_state(GameState::InProgress);
            }
            Ok(RevealReport {
                outcome: RevealOutcome::Revealed,
                changed,
                loss: None,
            })
        }
    }

    fn flag_all_mines(&mut self) -> Vec<Coord2> {
        let Some(layout) = self.mine_layout.as_ref() else {
            return Vec::new();
        };

        let mut flagged = Vec::new();
        for pos in layout.iter_mines() {
            let cell = &mut self.cells[pos.to_nd_index()];
            if *cell == CellState::Hidden {
                *cell = CellState::Flagged;
                flagged.push(pos);
            }
        }
        self.flagged_count += flagged.len() as CellCount;
        flagged
    }

    fn set_state(&mut self, state: GameState) {
        log::debug!("Game state {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

/// Opens `start` and, through zero-count cells, everything connected to it.
///
/// Uses a work-list with a visited set, so every cell is opened at most once and
/// the depth does not depend on the board size. Flagged cells block the fill.
fn flood_reveal(layout: &MineLayout, cells: &mut Array2<CellState>, start: Coord2) -> Vec<Coord2> {
    let mut opened = Vec::new();
    let mut visited = BTreeSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    while let Some(visit_coords) = to_visit.pop_front() {
        let cell = &mut cells[visit_coords.to_nd_index()];
        if *cell != CellState::Hidden {
            continue;
        }

        let count = layout.adjacent_mine_count(visit_coords);
        *cell = CellState::Revealed(count);
        opened.push(visit_coords);
        log::trace!("Opened {:?}, adjacent mines: {}", visit_coords, count);

        if count == 0 {
            for pos in layout.iter_neighbors(visit_coords) {
                if !layout.contains_mine(pos) && visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    opened
}
