//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.
//!
//! One generation:
//!
//! 1. Rank the current population (best first, ties by index).
//! 2. Copy the top `elite_count` individuals unchanged.
//! 3. Draw a parent pool of `parent_count` indices with the configured
//!    [`Selection`](super::Selection).
//! 4. Pick pairs uniformly from the pool (with replacement), cross them
//!    over and append children until the population is full. A single
//!    remaining slot takes the first child only.
//! 5. Mutate every non-elite member, then evaluate what is not cached.

use super::config::GaConfig;
use super::population::Population;
use super::selection::ranked_indices;
use super::types::{compare, Fitness, GaProblem, Individual};
use crate::error::Result;
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `max_generations` generations were bred.
    MaxGenerations,
    /// `stagnation_limit` generations passed without strict improvement.
    Stagnation,
    /// The cancellation flag was raised.
    Cancelled,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// There was nothing to search (zero-length genome).
    Trivial,
}

/// Snapshot taken after each generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Best fitness seen so far in the run.
    pub best_fitness: f64,
    /// Best fitness within this generation.
    pub generation_best: f64,
    /// Mean fitness within this generation.
    pub mean_fitness: f64,
    /// Number of individuals in this generation.
    pub population_size: usize,
    /// Fitness evaluations performed for this generation.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
///
/// Contains the best solution found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Generation in which `best` first appeared.
    pub best_generation: usize,

    /// Number of generations bred after the initial population.
    pub generations: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// One entry per generation, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

impl<I: Individual> GaResult<I> {
    /// Whether the run was terminated due to stagnation.
    pub fn stagnated(&self) -> bool {
        self.termination == Termination::Stagnation
    }

    /// Whether the run was cancelled externally.
    pub fn cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) before
    /// doing any work if the configuration is invalid.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the next generation boundary and returns the best solution found so
    /// far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let started = Instant::now();
        let mut rng = create_rng(config.seed);
        let elite_count = config.elite_count();
        let parent_count = config.parent_count();

        // 1. Initialize and evaluate
        let mut population = Population::new(
            (0..config.population_size)
                .map(|_| problem.create_individual(&mut rng))
                .collect(),
        );
        let evaluations = population.evaluate(problem, config.parallel);

        // 2. Track best
        let mut best = initial_best(&population);
        let mut best_generation = 0usize;
        let mut history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        record(
            problem,
            &mut history,
            0,
            &population,
            best.fitness_or_worst(),
            evaluations,
        );

        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut termination = Termination::MaxGenerations;

        // 3. Evolutionary loop
        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    termination = Termination::Cancelled;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    termination = Termination::TimeLimit;
                    break;
                }
            }

            let fitness = population.fitness_values();
            let ranked = ranked_indices(&fitness);

            // Elite preservation
            let mut next_gen: Vec<P::Individual> = ranked[..elite_count]
                .iter()
                .map(|&i| population[i].clone())
                .collect();

            // Parent pool
            let pool = config.selection.select_many(&fitness, parent_count, &mut rng);

            // Offspring
            while next_gen.len() < config.population_size {
                let p1 = pool[rng.random_range(0..pool.len())];
                let p2 = pool[rng.random_range(0..pool.len())];
                let (c1, c2) = problem.crossover(
                    &population[p1],
                    &population[p2],
                    config.crossover_rate,
                    &mut rng,
                );
                next_gen.push(c1);
                if next_gen.len() < config.population_size {
                    next_gen.push(c2);
                }
            }

            for child in &mut next_gen[elite_count..] {
                problem.mutate(child, config.mutation_rate, &mut rng);
            }

            population = Population::new(next_gen);
            let evaluations = population.evaluate(problem, config.parallel);
            generations = gen;

            // Update best (strict improvement only)
            if let Some(gen_best) = population.best() {
                if compare(gen_best.fitness_or_worst(), best.fitness_or_worst()).is_gt() {
                    best = gen_best.clone();
                    best_generation = gen;
                    stagnation_counter = 0;
                } else {
                    stagnation_counter += 1;
                }
            }

            record(
                problem,
                &mut history,
                gen,
                &population,
                best.fitness_or_worst(),
                evaluations,
            );

            if let Some(limit) = config.stagnation_limit {
                if stagnation_counter >= limit {
                    termination = Termination::Stagnation;
                    break;
                }
            }
        }

        tracing::debug!(
            generations,
            best_generation,
            best_fitness = best.fitness_or_worst().to_f64(),
            termination = ?termination,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GA run finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness_or_worst(),
            best,
            best_generation,
            generations,
            termination,
            history,
        })
    }
}

fn initial_best<I: Individual>(population: &Population<I>) -> I {
    population
        .best()
        .cloned()
        .expect("validated population_size >= 2")
}

fn record<P: GaProblem>(
    problem: &P,
    history: &mut Vec<GenerationStats>,
    generation: usize,
    population: &Population<P::Individual>,
    best_fitness: <P::Individual as Individual>::Fitness,
    evaluations: usize,
) {
    let stats = GenerationStats {
        generation,
        best_fitness: best_fitness.to_f64(),
        generation_best: population
            .best()
            .map_or(f64::NEG_INFINITY, |b| b.fitness_or_worst().to_f64()),
        mean_fitness: population.mean_fitness(),
        population_size: population.len(),
        evaluations,
    };
    tracing::trace!(
        generation,
        best = stats.best_fitness,
        generation_best = stats.generation_best,
        mean = stats.mean_fitness,
        "generation complete"
    );
    problem.on_generation(&stats);
    history.push(stats);
}

// ============================================================================
// Tests
// ============================================================================
