//! Rank-biased roulette wheel selection.
//!
//! Rank `i` (0 = best) gets weight `ratio^(i + 1)`, so selection pressure
//! depends only on rank and never on the numeric scale of the scores. The
//! cumulative weights are computed once; a draw is a uniform value located
//! by binary search.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Whitley (1989), "The GENITOR Algorithm and Selection Pressure"

use rand::Rng;

/// Collisions tolerated by [`RouletteWheel::spin_twice`] before it falls
/// back to the neighbouring rank.
const MAX_RESPINS: usize = 64;

/// Precomputed rank-biased selection wheel.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::RouletteWheel;
/// use u_knapsack::random::create_rng;
///
/// let wheel = RouletteWheel::new(100, 0.8);
/// let mut rng = create_rng(42);
/// let rank = wheel.spin(10, &mut rng).unwrap();
/// assert!(rank < 10);
/// ```
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    /// Builds a wheel over the top `entries` ranks.
    ///
    /// `ratio` must lie in `(0, 1)`.
    pub fn new(entries: usize, ratio: f64) -> Self {
        let mut cumulative = Vec::with_capacity(entries);
        let mut weight = 1.0;
        let mut total = 0.0;
        for _ in 0..entries {
            weight *= ratio;
            total += weight;
            cumulative.push(total);
        }
        Self { cumulative }
    }

    /// Number of ranks the wheel covers.
    pub fn entries(&self) -> usize {
        self.cumulative.len()
    }

    /// Selection probability of `rank` among `population_len` candidates.
    pub fn probability(&self, rank: usize, population_len: usize) -> f64 {
        let m = population_len.min(self.cumulative.len());
        if rank >= m {
            return 0.0;
        }
        let lower = if rank == 0 {
            0.0
        } else {
            self.cumulative[rank - 1]
        };
        (self.cumulative[rank] - lower) / self.cumulative[m - 1]
    }

    /// Draws one rank among the first `population_len` ranks.
    ///
    /// Returns `None` when there is nothing to draw from.
    pub fn spin<R: Rng>(&self, population_len: usize, rng: &mut R) -> Option<usize> {
        let m = population_len.min(self.cumulative.len());
        if m == 0 {
            return None;
        }
        let total = self.cumulative[m - 1];
        if total <= 0.0 {
            return Some(0);
        }
        let x = rng.random_range(0.0..total);
        let rank = self.cumulative[..m].partition_point(|&c| c <= x);
        Some(rank.min(m - 1))
    }

    /// Draws two distinct ranks, re-spinning the second on collision.
    ///
    /// Returns `None` when fewer than two ranks are available.
    pub fn spin_twice<R: Rng>(&self, population_len: usize, rng: &mut R) -> Option<(usize, usize)> {
        let m = population_len.min(self.cumulative.len());
        if m < 2 {
            return None;
        }
        let first = self.spin(m, rng)?;
        for _ in 0..MAX_RESPINS {
            let second = self.spin(m, rng)?;
            if second != first {
                return Some((first, second));
            }
        }
        Some((first, (first + 1) % m))
    }
}
