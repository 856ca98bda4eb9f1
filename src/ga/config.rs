//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::{Error, Result};

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, selection strategy, operator rates,
/// termination conditions, parallelism and the random seed.
///
/// The builders store values as given. Range checks happen in
/// [`validate`](Self::validate), which every run calls before the first
/// generation, so an out-of-range value is reported instead of being
/// silently adjusted.
///
/// # Defaults
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 10);
/// assert_eq!(config.stagnation_limit, None);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_elite_ratio(0.1)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation (at least 2).
    pub population_size: usize,

    /// Number of generations bred after the initial population (at least 1).
    pub max_generations: usize,

    /// Strategy used to fill the parent pool.
    pub selection: Selection,

    /// Fraction of the population carried over unchanged, in `[0, 1)`.
    ///
    /// The elite count is `round(population_size * elite_ratio)`, and at
    /// least 1 whenever the ratio is positive.
    pub elite_ratio: f64,

    /// Fraction of the population admitted to the parent pool, in `(0, 1]`.
    ///
    /// The pool size is `round(population_size * parent_ratio)`, at least 2.
    pub parent_ratio: f64,

    /// Per-gene swap probability used by uniform crossover, in `[0, 1]`.
    pub crossover_rate: f64,

    /// Per-gene flip probability used by mutation, in `[0, 1]`.
    pub mutation_rate: f64,

    /// Generations without strict improvement before stopping.
    ///
    /// `None` disables stagnation-based termination.
    pub stagnation_limit: Option<usize>,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed. Identical inputs and seed give identical runs.
    pub seed: u64,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so a run may overshoot by
    /// one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 10,
            selection: Selection::default(),
            elite_ratio: 0.01,
            parent_ratio: 0.3,
            crossover_rate: 0.5,
            mutation_rate: 0.1,
            stagnation_limit: None,
            parallel: true,
            seed: 0,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection of size `k`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the parent pool ratio.
    pub fn with_parent_ratio(mut self, ratio: f64) -> Self {
        self.parent_ratio = ratio;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Stops after `limit` generations without strict improvement.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = Some(limit);
        self
    }

    /// Disables stagnation-based termination.
    pub fn without_stagnation_limit(mut self) -> Self {
        self.stagnation_limit = None;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of elites copied into each new generation.
    ///
    /// At least 1 whenever `elite_ratio` is positive, even if the product
    /// rounds to zero.
    pub fn elite_count(&self) -> usize {
        let n = (self.population_size as f64 * self.elite_ratio).round() as usize;
        if self.elite_ratio > 0.0 {
            n.max(1)
        } else {
            n
        }
    }

    /// Number of parents drawn into the pool each generation.
    pub fn parent_count(&self) -> usize {
        ((self.population_size as f64 * self.parent_ratio).round() as usize).max(2)
    }

    /// Preset for quick answers: small population, few generations.
    ///
    /// - Population: 30, Generations: 100, Stagnation limit: 25
    ///
    /// No time limit is set, so a seed reproduces the same run on any
    /// machine. Chain [`with_time_limit_ms`](Self::with_time_limit_ms) to
    /// bound wall-clock time.
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            max_generations: 100,
            elite_ratio: 0.05,
            stagnation_limit: Some(25),
            ..Self::default()
        }
    }

    /// Preset balancing solution quality and run time.
    ///
    /// - Population: 100, Generations: 300, Stagnation limit: 60
    ///
    /// No time limit is set, so a seed reproduces the same run on any
    /// machine. Chain [`with_time_limit_ms`](Self::with_time_limit_ms) to
    /// bound wall-clock time.
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            elite_ratio: 0.05,
            mutation_rate: 0.02,
            stagnation_limit: Some(60),
            ..Self::default()
        }
    }

    /// Preset for large catalogs: large population, many generations.
    ///
    /// - Population: 200, Generations: 1000, Stagnation limit: 150
    ///
    /// No time limit is set, so a seed reproduces the same run on any
    /// machine. Chain [`with_time_limit_ms`](Self::with_time_limit_ms) to
    /// bound wall-clock time.
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 1000,
            elite_ratio: 0.05,
            mutation_rate: 0.01,
            stagnation_limit: Some(150),
            ..Self::default()
        }
    }

    /// Picks a preset from the number of catalog items.
    ///
    /// - `item_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ item_count < 500` → [`balanced()`](Self::balanced)
    /// - `item_count ≥ 500` → [`quality()`](Self::quality)
    pub fn auto_select(item_count: usize) -> Self {
        if item_count < 50 {
            Self::fast()
        } else if item_count < 500 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::config("population_size", "must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(Error::config("max_generations", "must be at least 1"));
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)?;
        if !(0.0..1.0).contains(&self.elite_ratio) {
            return Err(Error::config(
                "elite_ratio",
                format!("must be in [0, 1), got {}", self.elite_ratio),
            ));
        }
        if self.elite_count() >= self.population_size {
            return Err(Error::config(
                "elite_ratio",
                "too high: elites fill entire population",
            ));
        }
        if !(self.parent_ratio > 0.0 && self.parent_ratio <= 1.0) {
            return Err(Error::config(
                "parent_ratio",
                format!("must be in (0, 1], got {}", self.parent_ratio),
            ));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(Error::config("selection", "tournament size must be at least 1"));
        }
        if self.stagnation_limit == Some(0) {
            return Err(Error::config(
                "stagnation_limit",
                "must be at least 1 (use None to disable)",
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(Error::config("time_limit_ms", "must be positive or None"));
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::config(field, format!("must be in [0, 1], got {p}")))
    }
}
