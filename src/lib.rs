//! Cargo load selection as a two-dimensional 0/1 knapsack.
//!
//! Given items with weight, volume and value, select the subset with the
//! highest total value that respects a maximum total weight and a maximum
//! total volume. The search is a seeded genetic algorithm:
//!
//! - **Genetic Algorithm (GA)**: Population-based evolutionary search with
//!   elitism, a selection-biased parent pool, uniform crossover and per-gene
//!   mutation. Generic over the problem through [`ga::GaProblem`].
//! - **Knapsack**: Item catalog, capacity limits, the feasibility-penalized
//!   objective, binary chromosomes and result extraction.
//!
//! Runs are reproducible: every random draw comes from one generator seeded
//! by [`ga::GaConfig::seed`], and parallel evaluation does not change the
//! outcome.
//!
//! # Quick start
//!
//! ```
//! use u_knapsack::ga::GaConfig;
//! use u_knapsack::knapsack::{optimize, Catalog};
//!
//! let catalog = Catalog::from_triples([(1.0, 1.0, 3.0), (2.0, 1.0, 4.0)])?;
//! let solution = optimize(&catalog, 3.0, 2.0, &GaConfig::default().with_seed(1))?;
//! assert!(solution.metrics().total_weight <= 3.0);
//! # Ok::<(), u_knapsack::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod knapsack;
pub mod random;

pub use error::{Error, Result};
