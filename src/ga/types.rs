//! Core trait definitions for the GA framework.
//!
//! The two central traits — [`Individual`] and [`GaProblem`] — define the
//! contract between the generic GA engine and domain-specific problem
//! implementations.

use super::runner::GenerationStats;
use rand::Rng;
use std::cmp::Ordering;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// **Higher fitness is considered better (maximization).**
///
/// Implemented for `f64`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Stands in for individuals that have not been evaluated yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::NEG_INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Total order over fitness values; incomparable values (NaN) tie.
pub(crate) fn compare<F: Fitness>(a: F, b: F) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// A candidate solution in the GA population.
///
/// Individuals cache their own fitness. The engine calls
/// [`GaProblem::evaluate`] only for individuals whose cache is empty and
/// stores the result via [`set_fitness`](Individual::set_fitness).
/// Implementations must clear the cache whenever their genes change.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<f64>,
///     fitness: Option<f64>,
/// }
///
/// impl Individual for MySolution {
///     type Fitness = f64;
///     fn fitness(&self) -> Option<f64> { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = Some(f); }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the cached fitness, or `None` if not yet evaluated.
    fn fitness(&self) -> Option<Self::Fitness>;

    /// Stores the fitness of this individual.
    ///
    /// Called by the GA framework after evaluation.
    fn set_fitness(&mut self, fitness: Self::Fitness);

    /// Cached fitness, with unevaluated individuals ranked last.
    fn fitness_or_worst(&self) -> Self::Fitness {
        self.fitness().unwrap_or_else(Self::Fitness::worst)
    }
}

/// Defines a GA optimization problem.
///
/// This is the trait that plugs domain-specific logic into the generic
/// engine:
///
/// 1. **Initialization**: How to create random individuals
/// 2. **Evaluation**: How to compute fitness
/// 3. **Crossover**: How to recombine two parents into two children
/// 4. **Mutation**: How to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon. Evaluation must not consume
/// randomness, so parallel and sequential runs stay identical.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Must be pure: the same individual always yields the same fitness.
    /// Higher values are better.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces two offspring from two parents.
    ///
    /// `rate` is the configured crossover probability; how it is applied
    /// (per pair, per gene) is up to the problem. Parents are borrowed and
    /// must not change.
    ///
    /// The default implementation clones both parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rate: f64,
        _rng: &mut R,
    ) -> (Self::Individual, Self::Individual) {
        (parent1.clone(), parent2.clone())
    }

    /// Mutates an exclusively owned individual in place.
    ///
    /// `rate` is the configured mutation probability. The default
    /// implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {}

    /// Called after every generation (including the initial one).
    ///
    /// Useful for progress reporting. The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}
