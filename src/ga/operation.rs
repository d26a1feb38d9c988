//! The uniform operator contract.
//!
//! Fitness scoring, selection, crossover, mutation and any caller-defined
//! step all implement [`GeneticOperation`]: take the population by mutable
//! reference, change it in place, return nothing. The scheduler lends each
//! operator an [`OperationContext`] carrying the shared random source, the
//! generation counter, and the stop control.

use super::types::{Genetic, Population};
use crate::random::GeneticRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A step in an evolutionary pipeline.
pub trait GeneticOperation<G: Genetic> {
    /// Applies the operator to `population` in place.
    fn apply(&mut self, population: &mut Population<G>, ctx: &mut OperationContext<'_>);

    /// Short label used in log output.
    fn name(&self) -> &str {
        "operation"
    }
}

/// Adapter turning a closure into a [`GeneticOperation`].
///
/// Usually created through
/// [`Environment::with_operation_fn`](super::Environment::with_operation_fn).
pub struct FnOperation<F> {
    name: String,
    f: F,
}

impl<F> FnOperation<F> {
    pub fn new<G>(name: impl Into<String>, f: F) -> Self
    where
        G: Genetic,
        F: FnMut(&mut Population<G>, &mut OperationContext<'_>),
    {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<G, F> GeneticOperation<G> for FnOperation<F>
where
    G: Genetic,
    F: FnMut(&mut Population<G>, &mut OperationContext<'_>),
{
    fn apply(&mut self, population: &mut Population<G>, ctx: &mut OperationContext<'_>) {
        (self.f)(population, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Shared run control for an environment.
///
/// Cloning yields another handle to the same flags, so a run can be stopped
/// from inside an operator, from the owner, or from another thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stop_requested: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to end before the next operator runs.
    pub fn stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Relaxed)
    }

    /// Whether an environment loop is currently executing.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub(crate) fn clear(&self) {
        self.stop_requested.store(false, Ordering::Relaxed);
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }
}

/// What an operator may see of the run that is executing it.
pub struct OperationContext<'a> {
    rng: &'a mut GeneticRng,
    generation: usize,
    stop: &'a StopHandle,
}

impl<'a> OperationContext<'a> {
    /// Builds a context. Environments do this for every step; tests and
    /// callers driving operators by hand can do it directly.
    pub fn new(rng: &'a mut GeneticRng, generation: usize, stop: &'a StopHandle) -> Self {
        Self {
            rng,
            generation,
            stop,
        }
    }

    /// The run's random source.
    pub fn rng(&mut self) -> &mut GeneticRng {
        &mut *self.rng
    }

    /// Number of completed passes through the pipeline.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Requests the run to stop once this operator returns.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }
}
