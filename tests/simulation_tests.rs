//! End-to-end simulation tests

use std::sync::Mutex;

use cattery::prelude::*;

/// Returns the same value for every draw of each kind
struct ConstantSource {
    uniform: f64,
    uniform_int: usize,
    gaussian: f64,
}

impl RandomSource for ConstantSource {
    fn uniform(&mut self) -> f64 {
        self.uniform
    }

    fn uniform_int(&mut self, max_exclusive: usize) -> usize {
        self.uniform_int.min(max_exclusive - 1)
    }

    fn gaussian(&mut self) -> f64 {
        self.gaussian
    }
}

/// Elitist strategy that records the cattery size and litter size of every cycle
struct Recording {
    inner: ElitistStrategy<MeanTraitFitness>,
    cycles: Mutex<Vec<(usize, usize)>>,
}

impl BreedingStrategy for Recording {
    fn apply(
        &self,
        cattery: &Cattery,
        now: SimDuration,
        rng: &mut dyn RandomSource,
    ) -> BreedingResult {
        let result = self.inner.apply(cattery, now, rng);
        self.cycles
            .lock()
            .unwrap()
            .push((cattery.len(), result.new_cats.len()));
        result
    }
}

fn small_config() -> SimulationConfig {
    SimulationConfig {
        total_trait_count: 100,
        fitness_trait_indices: (0..50).collect(),
        total_generations_to_simulate: 5,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_constant_source_records_every_generation() {
    let engine = SimulationEngine::elitist(small_config()).unwrap();
    let mut source = ConstantSource {
        uniform: 0.4,
        uniform_int: 0,
        gaussian: 0.1,
    };

    let report = engine.run(&mut source).unwrap();

    assert_eq!(report.num_generations(), 6);
    assert_eq!(report.termination, TerminationReason::Completed);
    assert_eq!(report.baseline().unwrap().population_size, 1);
    // 4.5 + 0.1 * 1.5 rounds to 5 kittens per litter, one litter per cycle
    for stats in &report.generations[1..] {
        assert_eq!(stats.population_size, 5);
    }
}

#[test]
fn test_selection_improves_fitness() {
    let config = SimulationConfig {
        mortality_half_life: SimDuration::ZERO,
        total_generations_to_simulate: 10,
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config).unwrap();

    let mut baseline = 0.0;
    let mut last = 0.0;
    let mut baseline_max = 0.0;
    let mut last_max = 0.0;
    for seed in 0..5 {
        let report = engine.run(&mut RngSource::seeded(seed)).unwrap();
        assert_eq!(report.num_generations(), 11);
        baseline += report.baseline().unwrap().average_fitness;
        last += report.last().unwrap().average_fitness;
        baseline_max += report.baseline().unwrap().max_fitness;
        last_max += report.last().unwrap().max_fitness;
    }

    assert!(last > baseline, "baseline {baseline}, last {last}");
    assert!(last_max > baseline_max);
}

#[test]
fn test_single_founder_is_best_of_pool() {
    let config = SimulationConfig {
        initial_population_size: 1,
        initial_population_selection_pool_size: 10,
        total_generations_to_simulate: 0,
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config.clone()).unwrap();
    let report = engine.run(&mut RngSource::seeded(99)).unwrap();

    // Replay the founding draws
    let fitness = MeanTraitFitness::from_config(&config);
    let mut replay = RngSource::seeded(99);
    let best = (0..10)
        .map(|_| {
            let sex = Sex::coin_flip(&mut replay);
            let cat = Cat::random(
                sex,
                SimDuration::ZERO,
                config.total_trait_count,
                config.founder_trait_std_dev(),
                &mut replay,
            );
            fitness.fitness(&cat)
        })
        .fold(f64::NEG_INFINITY, f64::max);

    let baseline = report.baseline().unwrap();
    assert_eq!(baseline.population_size, 1);
    assert_eq!(baseline.max_fitness, best);
    assert_eq!(baseline.fitness_std_dev, 0.0);
}

#[test]
fn test_disabled_mortality_never_removes_cats() {
    let config = SimulationConfig {
        mortality_half_life: SimDuration::days(-30),
        total_generations_to_simulate: 8,
        ..small_config()
    };
    let strategy = Recording {
        inner: ElitistStrategy::from_config(&config),
        cycles: Mutex::new(Vec::new()),
    };
    let engine = SimulationEngine::builder()
        .fitness(MeanTraitFitness::from_config(&config))
        .strategy(strategy)
        .config(config)
        .build()
        .unwrap();

    engine.run(&mut RngSource::seeded(5)).unwrap();

    let cycles = engine.strategy().cycles.lock().unwrap();
    assert_eq!(cycles.len(), 8);
    for pair in cycles.windows(2) {
        let (size, kittens) = pair[0];
        assert_eq!(pair[1].0, size + kittens);
    }
}

#[test]
fn test_lethal_mortality_ends_run_early() {
    let config = SimulationConfig {
        mortality_half_life: SimDuration::days(1),
        breeding_cycle_duration: SimDuration::days(300),
        total_generations_to_simulate: 10,
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config).unwrap();
    let report = engine.run(&mut RngSource::seeded(8)).unwrap();

    assert!(report.went_extinct());
    assert_eq!(report.termination, TerminationReason::Extinct { generation: 1 });
    assert_eq!(report.num_generations(), 1);
}

#[test]
fn test_seeded_runs_are_identical() {
    let config = SimulationConfig {
        fitness_percentiles: vec![10, 50, 90],
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config).unwrap();

    let a = engine.run(&mut RngSource::seeded(2024)).unwrap();
    let b = engine.run(&mut RngSource::seeded(2024)).unwrap();
    assert_eq!(
        serde_json::to_string(&a.generations).unwrap(),
        serde_json::to_string(&b.generations).unwrap()
    );

    let c = engine.run(&mut RngSource::seeded(2025)).unwrap();
    assert_ne!(a.generations, c.generations);
}

#[test]
fn test_founder_fitness_is_standardized() {
    let config = SimulationConfig {
        initial_population_size: 1000,
        initial_population_selection_pool_size: 1000,
        total_generations_to_simulate: 0,
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config).unwrap();
    let report = engine.run(&mut RngSource::seeded(1)).unwrap();

    let baseline = report.baseline().unwrap();
    assert_eq!(baseline.population_size, 1000);
    assert!(baseline.average_fitness.abs() < 0.15, "mean {}", baseline.average_fitness);
    assert!(
        (baseline.fitness_std_dev - 1.0).abs() < 0.1,
        "std {}",
        baseline.fitness_std_dev
    );
    assert!((baseline.average_fitness_quotient - 100.0).abs() < 2.25);
}

#[test]
fn test_barren_cycles_record_empty_cohorts() {
    let config = SimulationConfig {
        litter_size_mean: 0.0,
        litter_size_std_dev: 0.0,
        mortality_half_life: SimDuration::ZERO,
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config).unwrap();
    let report = engine.run(&mut RngSource::seeded(4)).unwrap();

    assert_eq!(report.num_generations(), 6);
    for stats in &report.generations[1..] {
        assert!(stats.is_empty());
        assert_eq!(stats.average_fitness, 0.0);
        assert_eq!(stats.average_fitness_quotient, 0.0);
    }
}

#[test]
fn test_percentiles_reported() {
    let config = SimulationConfig {
        initial_population_size: 50,
        initial_population_selection_pool_size: 100,
        fitness_percentiles: vec![10, 50, 90],
        ..small_config()
    };
    let engine = SimulationEngine::elitist(config).unwrap();
    let report = engine.run(&mut RngSource::seeded(6)).unwrap();

    let baseline = report.baseline().unwrap();
    let p10 = baseline.percentiles[&10];
    let p50 = baseline.percentiles[&50];
    let p90 = baseline.percentiles[&90];
    assert!(baseline.min_fitness <= p10 && p10 <= p50 && p50 <= p90);
    assert!(p90 <= baseline.max_fitness);
}

#[test]
fn test_run_from_json_config() {
    let config = SimulationConfig::from_json(
        r#"{
            "total_trait_count": 20,
            "fitness_trait_indices": [0, 1, 2, 3, 4],
            "breeding_cycle_duration": 240.0,
            "total_generations_to_simulate": 3
        }"#,
    )
    .unwrap();
    let engine = SimulationEngine::elitist(config).unwrap();
    let report = engine.run(&mut RngSource::seeded(12)).unwrap();

    assert_eq!(report.config.breeding_cycle_duration, SimDuration::days(240));
    assert!(report.num_generations() <= 4);
    assert!(report.summary().contains("Simulation Summary"));
}
