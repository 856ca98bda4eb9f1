//! Binary selection chromosome.
//!
//! Gene `i` says whether catalog item `i` is loaded. A chromosome owns its
//! genes outright; operators build new vectors or mutate through `&mut`, so
//! an elite carried into the next generation can only change on a clone.
//!
//! # Operators
//!
//! - [`Chromosome::uniform_crossover`]: per-gene swap between two children
//! - [`Chromosome::mutate`]: per-gene bit flip

use crate::ga::Individual;
use rand::Rng;

/// A candidate selection with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<bool>,
    fitness: Option<f64>,
}

impl Chromosome {
    /// Wraps a gene vector; the fitness starts unevaluated.
    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// The all-false selection of length `n`.
    pub fn empty(n: usize) -> Self {
        Self::from_genes(vec![false; n])
    }

    /// Random selection where each gene is set with probability `p`.
    ///
    /// # Panics
    /// Panics if `p` is outside `[0, 1]`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Self {
        Self::from_genes((0..n).map(|_| rng.random_bool(p)).collect())
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<bool> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.genes.get(index).copied().unwrap_or(false)
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Indices of selected items in ascending order.
    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
    }

    /// Sets one gene, clearing the cached fitness if it changed.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, selected: bool) {
        if self.genes[index] != selected {
            self.genes[index] = selected;
            self.fitness = None;
        }
    }

    /// Uniform crossover.
    ///
    /// Children start as copies of `self` and `other`; at each position the
    /// two children exchange their genes with probability `rate`. Neither
    /// parent is modified.
    ///
    /// # Panics
    /// Panics if the parents differ in length or `rate` is outside `[0, 1]`.
    pub fn uniform_crossover<R: Rng>(&self, other: &Self, rate: f64, rng: &mut R) -> (Self, Self) {
        assert_eq!(self.len(), other.len(), "parents must have equal length");

        let mut a = self.genes.clone();
        let mut b = other.genes.clone();
        for (x, y) in a.iter_mut().zip(b.iter_mut()) {
            if rng.random_bool(rate) {
                std::mem::swap(x, y);
            }
        }
        (Self::from_genes(a), Self::from_genes(b))
    }

    /// Flips each gene independently with probability `rate`.
    ///
    /// Returns the number of flipped genes. The cached fitness is cleared
    /// when at least one gene flipped.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) -> usize {
        if rate <= 0.0 {
            return 0;
        }
        let mut flips = 0;
        for gene in self.genes.iter_mut() {
            if rng.random_bool(rate) {
                *gene = !*gene;
                flips += 1;
            }
        }
        if flips > 0 {
            self.fitness = None;
        }
        flips
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}
