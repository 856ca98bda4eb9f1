//! Selection strategies for the GA.
//!
//! Selection determines which individuals enter the parent pool.
//! Different strategies provide different selection pressure.
//!
//! All strategies operate on a slice of fitness values indexed by
//! population position, assume **maximization**, and break ties in favour
//! of the lower index so the outcome depends only on the random stream.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` individuals at random, select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are fitness shifted so the worst individual gets a small
    /// positive weight, which keeps the infeasibility sentinel selectable
    /// but unlikely.
    Roulette,

    /// Linear rank-based selection.
    ///
    /// Selection probability is proportional to rank position, not raw
    /// fitness value, which avoids the scaling problems of roulette.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects one index into `fitness`.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(fitness, *k, rng),
            Selection::Roulette => roulette(fitness, rng),
            Selection::Rank => rank(&ranked_indices(fitness), rng),
        }
    }

    /// Draws `count` indices with replacement.
    ///
    /// Equivalent to calling [`select`](Self::select) `count` times, but
    /// ranks the population only once.
    pub fn select_many<R: Rng>(&self, fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Rank => {
                let order = ranked_indices(fitness);
                (0..count).map(|_| rank(&order, rng)).collect()
            }
            _ => (0..count).map(|_| self.select(fitness, rng)).collect(),
        }
    }
}

/// Indices sorted by fitness, best first; equal fitness keeps index order.
pub(crate) fn ranked_indices(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    order
}

fn beats(fitness: &[f64], challenger: usize, holder: usize) -> bool {
    fitness[challenger] > fitness[holder]
        || (fitness[challenger] == fitness[holder] && challenger < holder)
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if beats(fitness, idx, best_idx) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection on shifted fitness.
///
/// weight_i = fitness_i - min_fitness + epsilon
fn roulette<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let min_fitness = fitness
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .fold(f64::INFINITY, f64::min);

    let epsilon = 1e-10;

    let weights: Vec<f64> = fitness
        .iter()
        .map(|&f| {
            let w = f - min_fitness + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Linear ranking over a precomputed best-first order.
///
/// weight of rank r (0 = best) is n - r.
fn rank<R: Rng>(order: &[usize], rng: &mut R) -> usize {
    let n = order.len();
    if n == 1 {
        return order[0];
    }

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1]
}
