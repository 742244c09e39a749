use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::state::{GameState, Position};

/// Places food on a uniformly random free cell
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    /// Spawner seeded from the OS entropy source
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spawner, used for reproducible games and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    /// Pick a free cell, or `None` when the snake covers the whole board
    pub fn pick(&mut self, state: &GameState) -> Option<Position> {
        state.free_cells().choose(&mut self.rng).copied()
    }

    /// Put food on the board. Returns false when the board is full, leaving
    /// `state.food` untouched.
    pub fn spawn(&mut self, state: &mut GameState) -> bool {
        match self.pick(state) {
            Some(pos) => {
                state.food = Some(pos);
                true
            }
            None => false,
        }
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}
