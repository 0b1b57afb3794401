use alloc::vec::Vec;
use rand::{SeedableRng, rngs::SmallRng};

use super::*;

/// Deterministic, non-cryptographic source used for seeded games and tests.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Fisher-Yates: walking from the last index down to 1, swap each element with a uniformly
/// chosen one at or before it.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Places mines on the first `mines` positions of a shuffled list of every position, so each
/// placement of that many mines is equally likely.
#[derive(Clone, Debug)]
pub struct ShuffleGenerator<R> {
    rng: R,
}

impl<R: Rng> ShuffleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl ShuffleGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(seeded_rng(seed))
    }
}

impl<R: Rng> MineGenerator for ShuffleGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        place_mines(config, &mut self.rng)
    }
}

impl<R: Rng> MineGenerator for &mut ShuffleGenerator<R> {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        place_mines(config, &mut self.rng)
    }
}

/// Rejects the same configs as [`GameConfig::new`], so unchecked configs cannot slip through.
pub(crate) fn place_mines<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<MineLayout> {
    config.validate()?;

    let mut all_positions: Vec<Coord2> = positions(config.size).collect();
    shuffle_in_place(&mut all_positions, rng);

    let mut mine_mask: Array2<bool> = Array2::default((config.size, config.size).to_nd_index());
    for &coords in all_positions.iter().take(config.mines.into()) {
        mine_mask[coords.to_nd_index()] = true;
    }

    log::debug!(
        "Placed {} mines on a {}x{} board",
        config.mines,
        config.size,
        config.size
    );
    Ok(MineLayout {
        mine_mask,
        mine_count: config.mines,
    })
}
