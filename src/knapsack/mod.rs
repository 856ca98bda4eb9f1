//! Two-dimensional 0/1 knapsack.
//!
//! Chooses the subset of catalog items with the highest total value whose
//! total weight and total volume both stay within their limits. The search
//! is the generic [`ga`](crate::ga) engine driven by [`KnapsackProblem`].
//!
//! # Pipeline
//!
//! [`Catalog`] + [`Capacity`] + [`GaConfig`](crate::ga::GaConfig)
//! → [`KnapsackProblem::solve`] → best [`Chromosome`]
//! → [`Solution`] (selected items in catalog order + [`Metrics`]).
//!
//! # Submodules
//!
//! - [`objective`]: feasibility-penalized fitness

mod catalog;
mod chromosome;
pub mod objective;
mod problem;
mod solution;

pub use catalog::{Capacity, Catalog, Item};
pub use chromosome::Chromosome;
pub use problem::{optimize, KnapsackProblem, Optimization};
pub use solution::{Metrics, Solution};
