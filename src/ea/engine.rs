//! Generational loop.
//!
//! [`EvolutionEngine`] owns a population, an equally sized offspring buffer
//! and one random stream, and repeats:
//! evaluation → selection → crossover → mutation → elitism → buffer swap.
//!
//! # Random streams
//!
//! All randomness comes from the engine's master [`Pcg32`]. In
//! [`Execution::Sequential`] mode every draw is taken from it directly, slot
//! by slot. In [`Execution::Concurrent`] mode the calling thread first forks
//! one child stream per population slot (in slot order) and each rayon task
//! draws only from its own child, so no stream is ever shared between
//! threads and a fixed seed still reproduces the run exactly.

use super::config::{EaConfig, Execution};
use super::genome::Genome;
use super::selection::{Selector, Tournament};
use super::types::{Fitness, GenePolicy};
use crate::error::ConfigError;
use crate::random::Pcg32;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Progress report for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats<F> {
    /// Generations completed by the engine, including this one.
    pub generation: usize,

    /// Best fitness among the individuals that entered this generation.
    pub best_fitness: F,

    /// Wall-clock time since the start of the current run.
    pub elapsed: Duration,
}

/// Evolves a population of [`Genome`]s.
///
/// # Usage
///
/// ```
/// use u_evolve::ea::{EaConfig, EvolutionEngine, Execution, FnPolicy};
/// use u_evolve::random::{Pcg32, UniformSampler};
///
/// let range = UniformSampler::new(-5.0f64, 5.0).unwrap();
/// let policy = FnPolicy::new(
///     move |rng: &mut Pcg32| range.sample(rng),
///     move |_gene: &f64, rng: &mut Pcg32| range.sample(rng),
///     |genes: &[f64], _x: &(), target: &f64| (genes[0] - target).powi(2),
/// );
/// let config = EaConfig::new(1)
///     .with_population_size(50)
///     .with_execution(Execution::Sequential)
///     .with_seed(42);
///
/// let mut engine = EvolutionEngine::new(policy, config).unwrap();
/// engine.run(&(), &1.5, 20, 0.2);
///
/// let (best, fitness) = engine.best_individual(&(), &1.5);
/// assert_eq!(best.len(), 1);
/// assert!(fitness < 0.5);
/// ```
pub struct EvolutionEngine<P: GenePolicy, S = Tournament> {
    policy: P,
    selector: S,
    config: EaConfig,
    population: Vec<Genome<P>>,
    offspring: Vec<Genome<P>>,
    fitness: Vec<P::Fitness>,
    rng: Pcg32,
    generation: usize,
}

impl<P: GenePolicy> EvolutionEngine<P> {
    /// Builds an engine with binary tournament selection.
    ///
    /// Fails with a [`ConfigError`] if the configuration is invalid.
    pub fn new(policy: P, config: EaConfig) -> Result<Self, ConfigError> {
        Self::with_selector(policy, Tournament::binary(), config)
    }
}

impl<P: GenePolicy, S: Selector<P>> EvolutionEngine<P, S> {
    /// Builds an engine with a custom parent selector.
    pub fn with_selector(policy: P, selector: S, config: EaConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_entropy(),
        };

        let population = initial_population(&policy, &config, &mut rng)?;
        // Offspring slots only provide storage; every slot is overwritten
        // before it is read.
        let offspring = population.clone();

        log::info!(
            "initialized {} genomes of {} genes ({:?}, elitism = {})",
            config.population_size,
            config.genome_len,
            config.execution,
            config.elitism
        );

        Ok(Self {
            policy,
            selector,
            fitness: Vec::with_capacity(config.population_size),
            config,
            population,
            offspring,
            rng,
            generation: 0,
        })
    }

    /// Runs `generations` generations, logging progress at debug level.
    ///
    /// `p_mutation` is clamped to `[0, 1]`.
    pub fn run(&mut self, x: &P::Input, y: &P::Target, generations: usize, p_mutation: f64) {
        self.run_with_observer(x, y, generations, p_mutation, |stats| {
            log::debug!(
                "generation {}: best fitness = {:?} [{:.3}s]",
                stats.generation,
                stats.best_fitness,
                stats.elapsed.as_secs_f64()
            );
        });
    }

    /// Runs `generations` generations, reporting each one to `observer`.
    pub fn run_with_observer<O>(
        &mut self,
        x: &P::Input,
        y: &P::Target,
        generations: usize,
        p_mutation: f64,
        mut observer: O,
    ) where
        O: FnMut(&GenerationStats<P::Fitness>),
    {
        let p_mutation = p_mutation.clamp(0.0, 1.0);
        log::info!(
            "evolving {} individuals for {} generations (p_mutation = {})",
            self.population.len(),
            generations,
            p_mutation
        );

        let started_at = Instant::now();
        for _ in 0..generations {
            let best_fitness = self.step(x, y, p_mutation);
            self.generation += 1;
            observer(&GenerationStats {
                generation: self.generation,
                best_fitness,
                elapsed: started_at.elapsed(),
            });
        }

        log::info!(
            "finished {} generations in {:.3}s",
            generations,
            started_at.elapsed().as_secs_f64()
        );
    }

    /// Evaluates the population and returns its best individual.
    ///
    /// On equal fitness the individual in the lowest slot wins.
    pub fn best_individual(&self, x: &P::Input, y: &P::Target) -> (&Genome<P>, P::Fitness) {
        let parallel = self.is_parallel();
        let mut fitness = Vec::with_capacity(self.population.len());
        evaluate_population(&self.policy, &self.population, x, y, parallel, &mut fitness);
        let (idx, best) = find_best(&fitness, parallel);
        (&self.population[idx], best)
    }

    /// The current population.
    pub fn population(&self) -> &[Genome<P>] {
        &self.population
    }

    /// Generations completed so far, across all runs.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EaConfig {
        &self.config
    }

    /// The gene policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    fn is_parallel(&self) -> bool {
        self.config.execution == Execution::Concurrent
    }

    /// One generation. Returns the best fitness of the incoming population.
    fn step(&mut self, x: &P::Input, y: &P::Target, p_mutation: f64) -> P::Fitness {
        let parallel = self.is_parallel();
        evaluate_population(
            &self.policy,
            &self.population,
            x,
            y,
            parallel,
            &mut self.fitness,
        );

        let breeder = Breeder {
            policy: &self.policy,
            selector: &self.selector,
            population: &self.population,
            fitness: &self.fitness,
            p_mutation,
        };
        if parallel {
            let streams: Vec<Pcg32> = (0..self.offspring.len())
                .map(|slot| self.rng.fork(slot as u64))
                .collect();
            self.offspring
                .par_iter_mut()
                .zip(streams)
                .for_each(|(child, mut stream)| breeder.breed_into(child, &mut stream));
        } else {
            for child in self.offspring.iter_mut() {
                breeder.breed_into(child, &mut self.rng);
            }
        }

        let (best_idx, best_fitness) = find_best(&self.fitness, parallel);
        if self.config.elitism {
            // Move, not copy: the displaced child lands in the outgoing
            // population, which becomes the stale buffer below.
            std::mem::swap(&mut self.offspring[0], &mut self.population[best_idx]);
        }
        std::mem::swap(&mut self.population, &mut self.offspring);

        best_fitness
    }
}

/// Read-only view of one generation, shared by every offspring task.
struct Breeder<'a, P: GenePolicy, S> {
    policy: &'a P,
    selector: &'a S,
    population: &'a [Genome<P>],
    fitness: &'a [P::Fitness],
    p_mutation: f64,
}

impl<P: GenePolicy, S: Selector<P>> Breeder<'_, P, S> {
    fn breed_into(&self, child: &mut Genome<P>, rng: &mut Pcg32) {
        let first = self.selector.select(self.population, self.fitness, rng);
        let second = self.selector.select(self.population, self.fitness, rng);
        assert!(
            first < self.population.len() && second < self.population.len(),
            "selector returned an out-of-range index"
        );
        self.population[first].crossover_into(&self.population[second], rng, child);
        child.mutate(self.policy, self.p_mutation, rng);
    }
}

fn initial_population<P: GenePolicy>(
    policy: &P,
    config: &EaConfig,
    rng: &mut Pcg32,
) -> Result<Vec<Genome<P>>, ConfigError> {
    let len = config.genome_len;
    match config.execution {
        Execution::Sequential => (0..config.population_size)
            .map(|_| Genome::random(policy, len, rng))
            .collect(),
        Execution::Concurrent => {
            let streams: Vec<Pcg32> = (0..config.population_size)
                .map(|slot| rng.fork(slot as u64))
                .collect();
            streams
                .into_par_iter()
                .map(|mut stream| Genome::random(policy, len, &mut stream))
                .collect()
        }
    }
}

/// Evaluate all individuals into `out`, in slot order.
fn evaluate_population<P: GenePolicy>(
    policy: &P,
    population: &[Genome<P>],
    x: &P::Input,
    y: &P::Target,
    parallel: bool,
    out: &mut Vec<P::Fitness>,
) {
    if parallel {
        population
            .par_iter()
            .map(|genome| genome.evaluate(policy, x, y))
            .collect_into_vec(out);
    } else {
        out.clear();
        out.extend(population.iter().map(|genome| genome.evaluate(policy, x, y)));
    }
}

/// Find the slot with the best (lowest) fitness.
fn find_best<F: Fitness>(fitness: &[F], parallel: bool) -> (usize, F) {
    let best = if parallel {
        fitness.par_iter().copied().enumerate().reduce_with(fitter)
    } else {
        fitness.iter().copied().enumerate().reduce(fitter)
    };
    best.expect("population must not be empty")
}

/// Lower fitness wins; otherwise the lower slot does.
fn fitter<F: Fitness>(a: (usize, F), b: (usize, F)) -> (usize, F) {
    if b.1 < a.1 || (!(a.1 < b.1) && b.0 < a.0) {
        b
    } else {
        a
    }
}

// ============================================================================
// Tests
// ============================================================================
