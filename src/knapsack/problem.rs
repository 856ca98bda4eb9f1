//! Knapsack problem definition and solver entry points.

use super::catalog::{Capacity, Catalog};
use super::chromosome::Chromosome;
use super::objective;
use super::solution::Solution;
use crate::error::{Error, Result};
use crate::ga::{GaConfig, GaProblem, GaRunner, GenerationStats, Termination};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::instrument;

/// Two-dimensional 0/1 knapsack over a borrowed catalog.
#[derive(Debug, Clone)]
pub struct KnapsackProblem<'a> {
    catalog: &'a Catalog,
    capacity: Capacity,
    init_probability: f64,
}

/// Outcome of a knapsack run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Optimization {
    /// The best load found.
    pub solution: Solution,
    /// Fitness of the best chromosome (total value when feasible).
    pub best_fitness: f64,
    /// Generation in which the best chromosome first appeared.
    pub best_generation: usize,
    /// Generations bred after the initial population.
    pub generations: usize,
    pub termination: Termination,
    /// Per-generation statistics; empty for an empty catalog.
    pub history: Vec<GenerationStats>,
}

impl<'a> KnapsackProblem<'a> {
    pub fn new(catalog: &'a Catalog, capacity: Capacity) -> Self {
        Self {
            catalog,
            capacity,
            init_probability: 0.5,
        }
    }

    /// Sets the probability that a gene is set in the initial population.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `p` is outside `[0, 1]`.
    pub fn with_init_probability(mut self, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::config(
                "init_probability",
                format!("must be in [0, 1], got {p}"),
            ));
        }
        self.init_probability = p;
        Ok(self)
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    /// Runs the search to completion.
    pub fn solve(&self, config: &GaConfig) -> Result<Optimization> {
        self.solve_with_cancel(config, None)
    }

    /// Runs the search, stopping early if `cancel` is raised.
    ///
    /// The flag is checked once per generation; a cancelled run still
    /// returns the best load found so far. If no feasible chromosome was
    /// ever seen, the result is the empty load, which always fits.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `config` fails validation. Nothing is
    /// searched in that case.
    #[instrument(
        level = "info",
        skip(self, config, cancel),
        fields(items = self.catalog.len(), seed = config.seed)
    )]
    pub fn solve_with_cancel(
        &self,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Optimization> {
        config.validate()?;

        if self.catalog.is_empty() {
            tracing::debug!("empty catalog, nothing to search");
            return Ok(Optimization {
                solution: Solution::empty(),
                best_fitness: 0.0,
                best_generation: 0,
                generations: 0,
                termination: Termination::Trivial,
                history: Vec::new(),
            });
        }

        let result = GaRunner::run_with_cancel(self, config, cancel)?;
        let (solution, best_fitness) = if result.best_fitness == objective::INFEASIBLE_FITNESS {
            (Solution::empty(), 0.0)
        } else {
            (
                Solution::extract(self.catalog, result.best.genes())?,
                result.best_fitness,
            )
        };

        if solution.is_empty() {
            tracing::warn!(
                generations = result.generations,
                "no feasible non-empty load found; returning the empty load"
            );
        }
        tracing::info!(
            count = solution.metrics().count,
            total_weight = solution.metrics().total_weight,
            total_volume = solution.metrics().total_volume,
            total_value = solution.metrics().total_value,
            generations = result.generations,
            best_generation = result.best_generation,
            termination = ?result.termination,
            "knapsack search finished"
        );

        Ok(Optimization {
            solution,
            best_fitness,
            best_generation: result.best_generation,
            generations: result.generations,
            termination: result.termination,
            history: result.history,
        })
    }
}

impl GaProblem for KnapsackProblem<'_> {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::random(self.catalog.len(), self.init_probability, rng)
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        objective::fitness(self.catalog, &self.capacity, individual.genes())
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rate: f64,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        parent1.uniform_crossover(parent2, rate, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rate: f64, rng: &mut R) {
        individual.mutate(rate, rng);
    }

    fn on_generation(&self, stats: &GenerationStats) {
        tracing::debug!(
            generation = stats.generation,
            best = stats.best_fitness,
            generation_best = stats.generation_best,
            mean = stats.mean_fitness,
            "generation"
        );
    }
}

/// Selects the most valuable load that fits both limits.
///
/// Convenience wrapper around [`KnapsackProblem::solve`].
///
/// # Errors
/// [`Error::InvalidCapacity`] for a negative or non-finite limit,
/// [`Error::InvalidConfig`] for an invalid configuration.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::GaConfig;
/// use u_knapsack::knapsack::{optimize, Catalog};
///
/// let catalog = Catalog::from_triples([
///     (2.0, 3.0, 10.0),
///     (4.0, 1.0, 20.0),
///     (3.0, 2.0, 15.0),
/// ])?;
/// let config = GaConfig::default()
///     .with_max_generations(20)
///     .with_mutation_rate(0.3)
///     .with_seed(7);
///
/// let solution = optimize(&catalog, 5.0, 4.0, &config)?;
/// assert_eq!(solution.indices(), &[1]);
/// assert_eq!(solution.metrics().total_value, 20.0);
/// # Ok::<(), u_knapsack::Error>(())
/// ```
pub fn optimize(
    catalog: &Catalog,
    max_weight: f64,
    max_volume: f64,
    config: &GaConfig,
) -> Result<Solution> {
    let capacity = Capacity::new(max_weight, max_volume)?;
    KnapsackProblem::new(catalog, capacity)
        .solve(config)
        .map(|run| run.solution)
}
