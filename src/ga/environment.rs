//! The evolutionary scheduler.
//!
//! [`Environment`] owns a population and an ordered pipeline of
//! [`GeneticOperation`]s and applies them cyclically:
//!
//! ```text
//! start ─► op[0] ─► op[1] ─► … ─► op[n-1] ─┐
//!            ▲                              │ generation += 1
//!            └──────────────────────────────┘
//! ```
//!
//! The loop never ends on its own. Something must request a stop: an
//! operator through [`OperationContext::stop`] (see [`GenerationLimit`] and
//! [`FitnessThreshold`]), the owner through [`Environment::stop`], or another
//! thread through a cloned [`StopHandle`]. Stop requests are observed between
//! operators, never inside one; [`Environment::resume`] re-enters at the
//! operator that would have run next.
//!
//! # Example
//!
//! ```
//! use u_genetics::ga::{
//!     AlleleMutation, Environment, EnvironmentConfig, Gene, Genome,
//!     GenerationLimit, Organism, SelectionOperation, Trait, ValueFitness,
//! };
//!
//! let genome: Genome = (0..8)
//!     .map(|i| Gene::new(format!("bit{i}"), [Trait::from(0), Trait::from(1)]))
//!     .collect();
//! let config = EnvironmentConfig::default().with_population_size(30).with_seed(42);
//!
//! let mut env = Environment::<Organism>::random(&genome, &config)
//!     .expect("valid config")
//!     .with_operation(ValueFitness::new(1))
//!     .with_operation(GenerationLimit::new(20))
//!     .with_operation(SelectionOperation::tournament())
//!     .with_operation(AlleleMutation::default().with_rate(0.1));
//!
//! env.start();
//! assert_eq!(env.current_generation(), 20);
//! assert!(env.fittest().is_some());
//! ```

use super::config::EnvironmentConfig;
use super::error::{GeneticError, Result};
use super::operation::{FnOperation, GeneticOperation, OperationContext, StopHandle};
use super::types::{random_population, Genetic, Genome, Population};
use crate::random::{create_rng, GeneticRng};

/// Runs a pipeline of operators over a population until told to stop.
pub struct Environment<G: Genetic> {
    population: Population<G>,
    operations: Vec<Box<dyn GeneticOperation<G>>>,
    cursor: usize,
    generation: usize,
    rng: GeneticRng,
    stop: StopHandle,
}

impl<G: Genetic> Environment<G> {
    /// Wraps an existing population. `config.population_size` is ignored.
    pub fn new(population: Population<G>, config: &EnvironmentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self {
            population,
            operations: Vec::new(),
            cursor: 0,
            generation: 0,
            rng,
            stop: StopHandle::new(),
        }
    }

    /// Creates `config.population_size` random entities from `genome`.
    ///
    /// # Errors
    /// `InsufficientPopulation` if the configuration is invalid.
    pub fn random(genome: &Genome, config: &EnvironmentConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|msg| GeneticError::insufficient_population(msg))?;
        let mut env = Self::new(Vec::new(), config);
        env.population = random_population(genome, config.population_size, &mut env.rng);
        Ok(env)
    }

    /// Appends an operator to the pipeline.
    pub fn with_operation<O>(mut self, operation: O) -> Self
    where
        O: GeneticOperation<G> + 'static,
    {
        self.add_operation(operation);
        self
    }

    /// Appends a closure to the pipeline under `name`.
    pub fn with_operation_fn<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&mut Population<G>, &mut OperationContext<'_>) + 'static,
    {
        self.with_operation(FnOperation::new::<G>(name, f))
    }

    /// Appends an operator to the pipeline.
    pub fn add_operation<O>(&mut self, operation: O)
    where
        O: GeneticOperation<G> + 'static,
    {
        self.operations.push(Box::new(operation));
    }

    /// Runs the pipeline from its first operator with the generation counter
    /// at zero. Returns once a stop has been requested.
    pub fn start(&mut self) {
        self.cursor = 0;
        self.generation = 0;
        self.stop.clear();
        log::info!(
            "environment started: {} members, {} operations",
            self.population.len(),
            self.operations.len()
        );
        self.run();
    }

    /// Requests the running loop to stop before its next operator.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Clears a pending stop and continues from the operator that would have
    /// run next, keeping the generation counter.
    pub fn resume(&mut self) {
        self.stop.clear();
        log::info!(
            "environment resumed at generation {}, step {}",
            self.generation,
            self.cursor
        );
        self.run();
    }

    fn run(&mut self) {
        if self.operations.is_empty() {
            log::warn!("environment has no operations; nothing to run");
            return;
        }

        let _running = RunningGuard::new(self.stop.clone());
        while !self.stop.is_stop_requested() {
            if self.cursor >= self.operations.len() {
                self.cursor = 0;
            }
            let operation = &mut self.operations[self.cursor];
            let mut ctx = OperationContext::new(&mut self.rng, self.generation, &self.stop);
            operation.apply(&mut self.population, &mut ctx);
            log::trace!("applied {} (step {})", operation.name(), self.cursor);

            self.cursor += 1;
            if self.cursor == self.operations.len() {
                self.cursor = 0;
                self.generation += 1;
                log::debug!(
                    "generation {} complete, best fitness {:?}",
                    self.generation,
                    self.fittest().map(|m| m.fitness())
                );
            }
        }
        drop(_running);

        log::info!(
            "environment stopped at generation {}, step {}",
            self.generation,
            self.cursor
        );
    }

    pub fn population(&self) -> &[G] {
        &self.population
    }

    /// Mutable access between runs, e.g. to seed or inspect members.
    pub fn population_mut(&mut self) -> &mut Population<G> {
        &mut self.population
    }

    pub fn into_population(self) -> Population<G> {
        self.population
    }

    /// Member with the largest fitness. `None` for an empty population.
    pub fn fittest(&self) -> Option<&G> {
        self.population
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }

    /// Number of completed passes through the pipeline.
    pub fn current_generation(&self) -> usize {
        self.generation
    }

    /// Index of the operator that will run next.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// A handle that can stop this environment from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

/// Holds the running flag for the duration of a run, and clears it on the
/// way out even if an operator panics.
struct RunningGuard(StopHandle);

impl RunningGuard {
    fn new(stop: StopHandle) -> Self {
        stop.set_running(true);
        Self(stop)
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.set_running(false);
    }
}

// ============================================================================
// Termination operators
// ============================================================================

/// Requests a stop once `generations` passes have completed.
///
/// Place it first in the pipeline to stop with the counter exactly at the
/// limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationLimit {
    pub generations: usize,
}

impl GenerationLimit {
    pub fn new(generations: usize) -> Self {
        Self { generations }
    }
}

impl<G: Genetic> GeneticOperation<G> for GenerationLimit {
    fn apply(&mut self, _population: &mut Population<G>, ctx: &mut OperationContext<'_>) {
        if ctx.generation() >= self.generations {
            log::info!("generation limit {} reached", self.generations);
            ctx.stop();
        }
    }

    fn name(&self) -> &str {
        "generation limit"
    }
}

/// Requests a stop once any member's fitness reaches `threshold`.
///
/// Place it after the fitness operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessThreshold {
    pub threshold: f64,
}

impl FitnessThreshold {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl<G: Genetic> GeneticOperation<G> for FitnessThreshold {
    fn apply(&mut self, population: &mut Population<G>, ctx: &mut OperationContext<'_>) {
        if population.iter().any(|m| m.fitness() >= self.threshold) {
            log::info!(
                "fitness threshold {} reached at generation {}",
                self.threshold,
                ctx.generation()
            );
            ctx.stop();
        }
    }

    fn name(&self) -> &str {
        "fitness threshold"
    }
}
