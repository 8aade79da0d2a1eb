use alloc::vec::Vec;

use super::*;
use crate::types::coords_from_flat;

/// Purely random generation that keeps the starting cell free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let (rows, cols) = config.size();
        let total_cells = usize::from(config.total_cells());
        let start_index = usize::from(self.start.0) * usize::from(cols) + usize::from(self.start.1);

        // every cell but the start one is a candidate
        let mut candidates: Vec<usize> = (0..total_cells).filter(|&i| i != start_index).collect();
        let mines = usize::from(config.mines()).min(candidates.len());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, mines);

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &index in chosen.iter() {
            mine_mask[coords_from_flat(index, cols).to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on {}x{} board, start cell {:?} kept safe",
            mines,
            rows,
            cols,
            self.start
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
