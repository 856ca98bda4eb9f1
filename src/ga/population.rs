//! Population container.
//!
//! A [`Population`] is the ordered set of individuals of one generation.
//! Its length is fixed when it is built and never changes; the runner
//! creates a fresh population every generation.

use super::types::{compare, Fitness, GaProblem, Individual};
use std::ops::Index;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One generation of individuals.
#[derive(Debug, Clone)]
pub struct Population<I> {
    members: Vec<I>,
}

impl<I: Individual> Population<I> {
    /// Wraps a vector of individuals.
    pub fn new(members: Vec<I>) -> Self {
        Self { members }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Individuals in population order.
    pub fn members(&self) -> &[I] {
        &self.members
    }

    /// Iterates over the individuals.
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.members.iter()
    }

    /// Evaluates every individual without a cached fitness.
    ///
    /// Returns the number of evaluations performed. Each evaluation reads
    /// only its own individual and writes only its own fitness slot, so the
    /// parallel path produces exactly the same values as the sequential one.
    pub fn evaluate<P>(&mut self, problem: &P, parallel: bool) -> usize
    where
        P: GaProblem<Individual = I>,
    {
        let eval = |ind: &mut I| -> usize {
            if ind.fitness().is_none() {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
                1
            } else {
                0
            }
        };

        #[cfg(feature = "parallel")]
        {
            if parallel {
                return self.members.par_iter_mut().map(eval).sum();
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        self.members.iter_mut().map(eval).sum()
    }

    /// Fitness of each individual as `f64`, unevaluated ones as worst.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.members
            .iter()
            .map(|ind| ind.fitness_or_worst().to_f64())
            .collect()
    }

    /// Index of the best individual; the lowest index wins ties.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, ind) in self.members.iter().enumerate() {
            match best {
                Some(b)
                    if compare(ind.fitness_or_worst(), self.members[b].fitness_or_worst())
                        .is_le() => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// The best individual, if any.
    pub fn best(&self) -> Option<&I> {
        self.best_index().map(|i| &self.members[i])
    }

    /// Mean fitness over the population (0 when empty).
    pub fn mean_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .members
            .iter()
            .map(|ind| ind.fitness_or_worst().to_f64())
            .sum();
        sum / self.members.len() as f64
    }

    /// Consumes the population, returning its individuals.
    pub fn into_members(self) -> Vec<I> {
        self.members
    }
}

impl<I> Index<usize> for Population<I> {
    type Output = I;

    fn index(&self, index: usize) -> &I {
        &self.members[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct Scored {
        value: f64,
        fitness: Option<f64>,
    }

    impl Individual for Scored {
        type Fitness = f64;
        fn fitness(&self) -> Option<f64> {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = Some(f);
        }
    }

    struct Identity {
        calls: AtomicUsize,
    }

    impl GaProblem for Identity {
        type Individual = Scored;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Scored {
            Scored {
                value: rng.random_range(0.0..1.0),
                fitness: None,
            }
        }

        fn evaluate(&self, ind: &Scored) -> f64 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            ind.value
        }
    }

    fn scored(values: &[f64]) -> Population<Scored> {
        Population::new(
            values
                .iter()
                .map(|&value| Scored {
                    value,
                    fitness: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_evaluate_skips_cached() {
        let problem = Identity {
            calls: AtomicUsize::new(0),
        };
        let mut pop = scored(&[1.0, 2.0, 3.0]);
        pop.members[1].set_fitness(20.0);

        assert_eq!(pop.evaluate(&problem, false), 2);
        assert_eq!(problem.calls.load(Ordering::Relaxed), 2);
        assert_eq!(pop.fitness_values(), vec![1.0, 20.0, 3.0]);

        assert_eq!(pop.evaluate(&problem, true), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = Identity {
            calls: AtomicUsize::new(0),
        };
        let values: Vec<f64> = (0..64).map(|i| (i * 7 % 13) as f64).collect();
        let mut a = scored(&values);
        let mut b = scored(&values);
        a.evaluate(&problem, false);
        b.evaluate(&problem, true);
        assert_eq!(a.fitness_values(), b.fitness_values());
    }

    #[test]
    fn test_best_index_prefers_first_on_tie() {
        let problem = Identity {
            calls: AtomicUsize::new(0),
        };
        let mut pop = scored(&[2.0, 9.0, 4.0, 9.0]);
        pop.evaluate(&problem, false);
        assert_eq!(pop.best_index(), Some(1));
        assert_eq!(pop.best().map(|b| b.value), Some(9.0));
        assert!((pop.mean_fitness() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_unevaluated_ranks_last() {
        let pop = scored(&[5.0, 1.0]);
        assert_eq!(pop.fitness_values(), vec![f64::NEG_INFINITY; 2]);
        assert_eq!(pop.best_index(), Some(0));
    }

    #[test]
    fn test_empty_population() {
        let pop: Population<Scored> = Population::new(Vec::new());
        assert!(pop.is_empty());
        assert_eq!(pop.best_index(), None);
        assert_eq!(pop.mean_fitness(), 0.0);
    }
}
