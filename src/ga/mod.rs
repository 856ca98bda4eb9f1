//! Genetic Algorithm framework.
//!
//! A generic GA engine built on trait-based abstractions. A problem plugs
//! in by implementing [`GaProblem`], which specifies how to create,
//! evaluate, crossover, and mutate individuals. Fitness is maximized.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with a cached fitness
//! - [`GaProblem`]: Problem definition — initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, presets)
//! - [`Population`]: One generation of individuals
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

mod config;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use population::Population;
pub use runner::{GaResult, GaRunner, GenerationStats, Termination};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual};
