//! End-to-end knapsack scenarios and search properties.

use proptest::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_knapsack::ga::{GaConfig, Selection, Termination};
use u_knapsack::knapsack::{optimize, Capacity, Catalog, Item, KnapsackProblem};
use u_knapsack::Error;

/// Routes engine logs to the test harness; set `RUST_LOG=u_knapsack=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn three_items() -> Catalog {
    Catalog::from_triples([(2.0, 3.0, 10.0), (4.0, 1.0, 20.0), (3.0, 2.0, 15.0)]).unwrap()
}

/// Deterministic pseudo-random catalog.
fn synthetic_catalog(n: usize) -> Catalog {
    Catalog::new(
        (0..n)
            .map(|i| {
                let w = ((i * 37 + 11) % 23 + 1) as f64;
                let v = ((i * 53 + 7) % 17 + 1) as f64;
                let val = ((i * 29 + 3) % 41 + 5) as f64;
                Item::new(w, v, val)
            })
            .collect(),
    )
    .unwrap()
}

/// Exhaustive optimum for small catalogs.
fn brute_force(catalog: &Catalog, capacity: &Capacity) -> f64 {
    let n = catalog.len();
    let mut best = 0.0f64;
    for mask in 0u32..(1 << n) {
        let (mut w, mut v, mut val) = (0.0, 0.0, 0.0);
        for (i, item) in catalog.iter().enumerate() {
            if mask & (1 << i) != 0 {
                w += item.weight;
                v += item.volume;
                val += item.value;
            }
        }
        if capacity.admits(w, v) {
            best = best.max(val);
        }
    }
    best
}

#[test]
fn three_item_catalog_converges_to_item_one() {
    init_tracing();
    let catalog = three_items();
    for seed in 0..5 {
        // At the default mutation rate (0.1) a 10-member population can
        // settle on item 2 within 20 generations for a few seeds.
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(20)
            .with_mutation_rate(0.3)
            .with_seed(seed);

        let solution = optimize(&catalog, 5.0, 4.0, &config).unwrap();

        assert_eq!(solution.indices(), &[1], "seed {seed}");
        assert_eq!(solution.items(), &[Item::new(4.0, 1.0, 20.0)]);
        let m = solution.metrics();
        assert_eq!((m.count, m.total_weight, m.total_volume, m.total_value), (1, 4.0, 1.0, 20.0));
    }
}

#[test]
fn zero_capacity_yields_empty_load() {
    let catalog = synthetic_catalog(15);
    for seed in 0..5 {
        let config = GaConfig::default().with_seed(seed);
        let solution = optimize(&catalog, 0.0, 0.0, &config).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.metrics().count, 0);
        assert_eq!(solution.metrics().total_value, 0.0);
    }
}

#[test]
fn empty_catalog_yields_empty_load() {
    let catalog = Catalog::new(Vec::new()).unwrap();
    let problem = KnapsackProblem::new(&catalog, Capacity::new(100.0, 100.0).unwrap());
    let run = problem.solve(&GaConfig::default()).unwrap();

    assert!(run.solution.is_empty());
    assert_eq!(run.solution.metrics().total_weight, 0.0);
    assert_eq!(run.solution.metrics().total_volume, 0.0);
    assert_eq!(run.solution.metrics().total_value, 0.0);
    assert_eq!(run.generations, 0);
    assert_eq!(run.termination, Termination::Trivial);
}

#[test]
fn invalid_inputs_are_rejected_up_front() {
    let catalog = three_items();

    let err = optimize(&catalog, 5.0, 4.0, &GaConfig::default().with_mutation_rate(1.5));
    assert!(matches!(err, Err(Error::InvalidConfig { field: "mutation_rate", .. })));

    let err = optimize(&catalog, 5.0, f64::INFINITY, &GaConfig::default());
    assert!(matches!(err, Err(Error::InvalidCapacity { field: "max_volume", .. })));

    let err = Catalog::from_triples([(1.0, 1.0, 1.0), (-2.0, 1.0, 1.0)]);
    assert!(matches!(err, Err(Error::InvalidItem { index: 1, field: "weight", .. })));
}

#[test]
fn larger_catalog_finds_a_good_feasible_load() {
    let catalog = synthetic_catalog(18);
    let capacity = Capacity::new(60.0, 45.0).unwrap();
    let optimum = brute_force(&catalog, &capacity);

    let config = GaConfig::balanced().with_seed(11);
    let run = KnapsackProblem::new(&catalog, capacity).solve(&config).unwrap();

    assert!(run.solution.fits(&capacity));
    assert!(run.solution.metrics().total_value <= optimum);
    assert!(
        run.solution.metrics().total_value >= 0.8 * optimum,
        "expected within 20% of {optimum}, got {}",
        run.solution.metrics().total_value
    );
}

#[test]
fn identical_inputs_give_identical_runs() {
    let catalog = synthetic_catalog(40);
    let capacity = Capacity::new(150.0, 120.0).unwrap();
    let problem = KnapsackProblem::new(&catalog, capacity);

    for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
        let config = GaConfig::default()
            .with_population_size(40)
            .with_max_generations(60)
            .with_elite_ratio(0.05)
            .with_selection(selection)
            .with_seed(2024);

        let a = problem.solve(&config.clone().with_parallel(false)).unwrap();
        let b = problem.solve(&config.clone().with_parallel(false)).unwrap();
        let c = problem.solve(&config.with_parallel(true)).unwrap();

        assert_eq!(a.solution, b.solution, "{selection:?}");
        assert_eq!(a.history, b.history, "{selection:?}");
        assert_eq!(a.solution, c.solution, "{selection:?} parallel");
        assert_eq!(a.history, c.history, "{selection:?} parallel");
    }
}

#[test]
fn elitism_keeps_generation_best_from_regressing() {
    let catalog = synthetic_catalog(30);
    let capacity = Capacity::new(90.0, 70.0).unwrap();
    let config = GaConfig::default()
        .with_population_size(30)
        .with_max_generations(80)
        .with_elite_ratio(0.1)
        .with_mutation_rate(0.2)
        .with_seed(5);

    let run = KnapsackProblem::new(&catalog, capacity).solve(&config).unwrap();

    for pair in run.history.windows(2) {
        assert!(pair[1].generation_best >= pair[0].generation_best);
    }
}

#[test]
fn default_config_keeps_generation_best_from_regressing() {
    let catalog = synthetic_catalog(30);
    let capacity = Capacity::new(90.0, 70.0).unwrap();

    for seed in 0..20 {
        let config = GaConfig::default().with_max_generations(30).with_seed(seed);
        assert_eq!(config.elite_count(), 1);

        let run = KnapsackProblem::new(&catalog, capacity).solve(&config).unwrap();

        for pair in run.history.windows(2) {
            assert!(
                pair[1].generation_best >= pair[0].generation_best,
                "seed {seed}: generation {} best {} -> {}",
                pair[1].generation,
                pair[0].generation_best,
                pair[1].generation_best
            );
        }
    }
}

#[test]
fn stagnation_limit_stops_early() {
    let catalog = three_items();
    let config = GaConfig::default()
        .with_max_generations(10_000)
        .with_stagnation_limit(15)
        .with_seed(3);

    let run = KnapsackProblem::new(&catalog, Capacity::new(5.0, 4.0).unwrap())
        .solve(&config)
        .unwrap();

    assert_eq!(run.termination, Termination::Stagnation);
    assert_eq!(run.generations, run.best_generation + 15);
}

#[test]
fn cancellation_returns_feasible_best_so_far() {
    init_tracing();
    let catalog = synthetic_catalog(300);
    let capacity = Capacity::new(500.0, 400.0).unwrap();
    let config = GaConfig::default()
        .with_population_size(100)
        .with_max_generations(usize::MAX - 1)
        .with_seed(8);

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        flag.store(true, Ordering::Relaxed);
    });

    let problem = KnapsackProblem::new(&catalog, capacity);
    let run = problem.solve_with_cancel(&config, Some(cancel)).unwrap();

    assert_eq!(run.termination, Termination::Cancelled);
    assert!(run.solution.fits(&capacity));
}

fn catalog_strategy() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((0.0..20.0f64, 0.0..20.0f64, 0.0..50.0f64), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn solution_always_fits_and_reports_true_totals(
        triples in catalog_strategy(),
        max_weight in 0.0..60.0f64,
        max_volume in 0.0..60.0f64,
        seed in any::<u64>(),
    ) {
        let catalog = Catalog::from_triples(triples).unwrap();
        let capacity = Capacity::new(max_weight, max_volume).unwrap();
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(15)
            .with_parallel(false)
            .with_seed(seed);

        let run = KnapsackProblem::new(&catalog, capacity).solve(&config).unwrap();
        let solution = &run.solution;

        prop_assert!(solution.fits(&capacity));
        prop_assert!(run.best_fitness >= 0.0);

        let (mut w, mut v, mut val) = (0.0, 0.0, 0.0);
        for &i in solution.indices() {
            let item = catalog.get(i).unwrap();
            w += item.weight;
            v += item.volume;
            val += item.value;
        }
        prop_assert!(solution.indices().windows(2).all(|p| p[0] < p[1]));
        prop_assert_eq!(solution.metrics().count, solution.indices().len());
        prop_assert_eq!(solution.metrics().total_weight, w);
        prop_assert_eq!(solution.metrics().total_volume, v);
        prop_assert_eq!(solution.metrics().total_value, val);
        prop_assert_eq!(run.best_fitness, val);
        prop_assert!(val <= brute_force(&catalog, &capacity));
    }

    #[test]
    fn history_is_monotonic_with_constant_population(
        triples in catalog_strategy(),
        population in 2usize..20,
        seed in any::<u64>(),
    ) {
        let catalog = Catalog::from_triples(triples).unwrap();
        let capacity = Capacity::new(30.0, 30.0).unwrap();
        let config = GaConfig::default()
            .with_population_size(population)
            .with_max_generations(12)
            .with_elite_ratio(0.0)
            .with_seed(seed);

        let run = KnapsackProblem::new(&catalog, capacity).solve(&config).unwrap();

        for pair in run.history.windows(2) {
            prop_assert!(pair[1].best_fitness >= pair[0].best_fitness);
        }
        prop_assert!(run.history.iter().all(|s| s.population_size == population));
    }

    #[test]
    fn same_seed_same_solution(
        triples in catalog_strategy(),
        seed in any::<u64>(),
    ) {
        let catalog = Catalog::from_triples(triples).unwrap();
        let config = GaConfig::default().with_seed(seed);

        let a = optimize(&catalog, 25.0, 25.0, &config).unwrap();
        let b = optimize(&catalog, 25.0, 25.0, &config).unwrap();
        prop_assert_eq!(a, b);
    }
}
