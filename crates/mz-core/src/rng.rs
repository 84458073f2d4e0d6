//! Random number generation for level layouts
//!
//! Uses a seeded ChaCha RNG so that a level can be regenerated from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Level generation random number generator
///
/// Wraps ChaCha8Rng and remembers its seed so a level can be reported and
/// regenerated.
#[derive(Debug, Clone)]
pub struct MazeRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MazeRng {
    /// Stream fully determined by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the thread RNG; the seed stays readable for replays
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `0..n`. Returns 0 if n is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform value in `lo..=hi`. Returns `lo` if the range is empty.
    pub fn between(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Returns true with probability percent/100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rng.gen_range(0..100) < percent
    }

    /// Returns true with probability 1/2
    pub fn coin(&mut self) -> bool {
        self.percent(50)
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len())])
        }
    }

    /// Insertion shuffle whose comparisons swap with `swap_percent` probability.
    ///
    /// With 55 the result leans slightly toward reversing the input order,
    /// which breaks up the evenly spread branching of a uniform shuffle.
    pub fn biased_shuffle<T>(&mut self, items: &mut [T], swap_percent: u32) {
        for i in 1..items.len() {
            let mut j = i;
            while j > 0 && self.percent(swap_percent) {
                items.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}

impl Default for MazeRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
