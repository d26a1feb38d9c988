//! Positional crossover operators.
//!
//! All operators work on chromosome slices and return new chromosomes;
//! parents are never modified. Unless stated otherwise the two parents must
//! have the same length, otherwise the operator fails with
//! [`UnableToReproduce`](GeneticError::UnableToReproduce).
//!
//! - [`single_point`]: split both parents at a fixed offset, O(n)
//! - [`random_single_point`]: [`single_point`] at a random interior offset
//! - [`uniform`]: per-position coin flip at a fixed rate, O(n)
//! - [`uniform_with_rates`]: per-position coin flip with a rate vector, O(n)
//! - [`revolving`]: Revolving Random Crossover (RRC), a wrapping block copy, O(n)
//!
//! [`Crossover`] bundles these as a strategy value, and
//! [`CrossoverOperation`] applies a strategy across a whole population.

use super::error::{GeneticError, Result};
use super::operation::{GeneticOperation, OperationContext};
use super::types::{Chromosome, Genetic, Trait};
use rand::Rng;

/// Default share of parent-1 traits copied by [`revolving`].
pub const DEFAULT_REVOLVING_PROPORTION: f64 = 0.7;

/// Default rate used by [`Crossover::Uniform`] when built via `Default`.
pub const DEFAULT_UNIFORM_RATE: f64 = 0.5;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover at `point`.
///
/// Returns `(p1[..point] ++ p2[point..], p2[..point] ++ p1[point..])`.
///
/// # Errors
/// `UnableToReproduce` if the parents differ in length or `point` is not
/// strictly inside the chromosome (`0 < point < len`).
///
/// # Examples
///
/// ```
/// use u_genetics::ga::{chromosome_string, crossover, Trait};
///
/// let a = vec![Trait::from(1); 6];
/// let b = vec![Trait::from(0); 6];
/// let (c1, c2) = crossover::single_point(&a, &b, 3).unwrap();
/// assert_eq!(chromosome_string(&c1), "111000");
/// assert_eq!(chromosome_string(&c2), "000111");
/// ```
pub fn single_point(
    parent1: &[Trait],
    parent2: &[Trait],
    point: usize,
) -> Result<(Chromosome, Chromosome)> {
    ensure_equal_length(parent1, parent2)?;
    let n = parent1.len();
    if point == 0 || point >= n {
        return Err(GeneticError::unable_to_reproduce(format!(
            "crossover point {point} outside (0, {n})"
        ))
        .with_members([parent1.to_vec(), parent2.to_vec()]));
    }

    let mut child1 = Vec::with_capacity(n);
    child1.extend_from_slice(&parent1[..point]);
    child1.extend_from_slice(&parent2[point..]);

    let mut child2 = Vec::with_capacity(n);
    child2.extend_from_slice(&parent2[..point]);
    child2.extend_from_slice(&parent1[point..]);

    Ok((child1, child2))
}

/// Single-point crossover at a point drawn uniformly from `[1, len - 1)`.
///
/// # Errors
/// - `UnableToReproduce` if the parents differ in length
/// - `InsufficientTraits` if `len <= 2`
pub fn random_single_point<R: Rng>(
    parent1: &[Trait],
    parent2: &[Trait],
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    ensure_equal_length(parent1, parent2)?;
    let n = parent1.len();
    if n <= 2 {
        return Err(GeneticError::insufficient_traits(format!(
            "random single-point crossover needs more than 2 traits, got {n}"
        ))
        .with_members([parent1.to_vec(), parent2.to_vec()]));
    }
    let point = rng.random_range(1..n - 1);
    single_point(parent1, parent2, point)
}

/// Uniform crossover at a fixed rate.
///
/// For every position a value `u` is drawn from `[0, 1)`; the child takes
/// `parent1[i]` when `u < rate`, otherwise `parent2[i]`. A rate of `1.0` or
/// more returns `parent1` unchanged; a rate of `0.0` or less returns
/// `parent2`.
///
/// # Errors
/// - `InsufficientTraits` if either parent is empty
/// - `UnableToReproduce` if the parents differ in length
pub fn uniform<R: Rng>(
    parent1: &[Trait],
    parent2: &[Trait],
    rate: f64,
    rng: &mut R,
) -> Result<Chromosome> {
    if parent1.is_empty() || parent2.is_empty() {
        return Err(GeneticError::insufficient_traits(
            "uniform crossover needs at least one trait",
        )
        .with_members([parent1.to_vec(), parent2.to_vec()]));
    }
    ensure_equal_length(parent1, parent2)?;
    if rate >= 1.0 {
        return Ok(parent1.to_vec());
    }

    Ok(parent1
        .iter()
        .zip(parent2)
        .map(|(a, b)| {
            if rng.random_range(0.0..1.0) < rate {
                a.clone()
            } else {
                b.clone()
            }
        })
        .collect())
}

/// Uniform crossover with one rate per position.
///
/// `rates[i]` is the probability that position `i` comes from `parent1`
/// (a draw `u < rates[i]` selects `parent1`).
///
/// # Errors
/// `UnableToReproduce` if the parents differ in length or `rates` does not
/// have exactly one entry per position.
pub fn uniform_with_rates<R: Rng>(
    parent1: &[Trait],
    parent2: &[Trait],
    rates: &[f64],
    rng: &mut R,
) -> Result<Chromosome> {
    ensure_equal_length(parent1, parent2)?;
    if rates.len() != parent1.len() {
        return Err(GeneticError::unable_to_reproduce(format!(
            "{} rates for a chromosome of {} traits",
            rates.len(),
            parent1.len()
        ))
        .with_members([parent1.to_vec(), parent2.to_vec()]));
    }

    Ok(parent1
        .iter()
        .zip(parent2)
        .zip(rates)
        .map(|((a, b), &rate)| {
            if rng.random_range(0.0..1.0) < rate {
                a.clone()
            } else {
                b.clone()
            }
        })
        .collect())
}

/// Revolving Random Crossover (RRC).
///
/// The child starts as a copy of `parent2`. A splice point `s` is drawn from
/// `[0, len)` and `count = floor(proportion * len)` consecutive positions
/// starting at `s` are copied from `parent1`, wrapping past the end back to
/// index 0. With `variable` set, the count is instead drawn from
/// `[0, count)` (zero when `count` is zero).
///
/// # Algorithm
///
/// ```text
/// len = 10, proportion = 0.7, s = 6
/// positions copied: 6 7 8 9 0 1 2
/// ```
///
/// # Errors
/// - `InsufficientTraits` if the parents are empty
/// - `UnableToReproduce` if the parents differ in length, the proportion
///   is negative or not finite, or `count` exceeds the chromosome length
pub fn revolving<R: Rng>(
    parent1: &[Trait],
    parent2: &[Trait],
    proportion: f64,
    variable: bool,
    rng: &mut R,
) -> Result<Chromosome> {
    ensure_equal_length(parent1, parent2)?;
    let n = parent1.len();
    if n == 0 {
        return Err(GeneticError::insufficient_traits(
            "revolving crossover needs at least one trait",
        ));
    }
    if !proportion.is_finite() || proportion < 0.0 {
        return Err(GeneticError::unable_to_reproduce(format!(
            "invalid revolving proportion {proportion}"
        )));
    }
    let count = (proportion * n as f64).floor() as usize;
    if count > n {
        return Err(GeneticError::unable_to_reproduce(format!(
            "cannot copy {count} traits from a chromosome of {n}"
        ))
        .with_members([parent1.to_vec(), parent2.to_vec()]));
    }

    let splice = rng.random_range(0..n);
    let swaps = if variable && count > 0 {
        rng.random_range(0..count)
    } else if variable {
        0
    } else {
        count
    };

    let mut child = parent2.to_vec();
    for offset in 0..swaps {
        let idx = (splice + offset) % n;
        child[idx] = parent1[idx].clone();
    }
    Ok(child)
}

fn ensure_equal_length(parent1: &[Trait], parent2: &[Trait]) -> Result<()> {
    if parent1.len() != parent2.len() {
        return Err(GeneticError::unable_to_reproduce(format!(
            "chromosome lengths differ: {} vs {}",
            parent1.len(),
            parent2.len()
        ))
        .with_members([parent1.to_vec(), parent2.to_vec()]));
    }
    Ok(())
}

// ============================================================================
// Strategy
// ============================================================================

/// A crossover strategy, for use where the operator is chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// [`single_point`] at a fixed offset. Two children.
    SinglePoint(usize),
    /// [`random_single_point`]. Two children.
    RandomSinglePoint,
    /// [`uniform`] at the given rate. One child.
    Uniform(f64),
    /// [`uniform_with_rates`]. One child.
    UniformRates(Vec<f64>),
    /// [`revolving`]. One child.
    Revolving { proportion: f64, variable: bool },
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::RandomSinglePoint
    }
}

impl Crossover {
    /// RRC with the default proportion of 0.7.
    pub fn revolving() -> Self {
        Crossover::Revolving {
            proportion: DEFAULT_REVOLVING_PROPORTION,
            variable: false,
        }
    }

    /// Produces two children from `parent1` and `parent2`.
    ///
    /// Single-child strategies are run twice with the parents swapped, so
    /// the population size is preserved.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[Trait],
        parent2: &[Trait],
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        match self {
            Crossover::SinglePoint(point) => single_point(parent1, parent2, *point),
            Crossover::RandomSinglePoint => random_single_point(parent1, parent2, rng),
            Crossover::Uniform(rate) => Ok((
                uniform(parent1, parent2, *rate, rng)?,
                uniform(parent2, parent1, *rate, rng)?,
            )),
            Crossover::UniformRates(rates) => Ok((
                uniform_with_rates(parent1, parent2, rates, rng)?,
                uniform_with_rates(parent2, parent1, rates, rng)?,
            )),
            Crossover::Revolving {
                proportion,
                variable,
            } => Ok((
                revolving(parent1, parent2, *proportion, *variable, rng)?,
                revolving(parent2, parent1, *proportion, *variable, rng)?,
            )),
        }
    }
}

// ============================================================================
// Population operator
// ============================================================================

/// Applies a [`Crossover`] strategy to neighbouring pairs
/// `(0, 1), (2, 3), ...` of the population.
///
/// Each pair is recombined with probability `rate`; both parents are then
/// replaced by the two children. A pair that fails to reproduce is logged
/// and left as it was. With an odd population the last member is untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossoverOperation {
    /// Strategy used for each pair.
    pub strategy: Crossover,
    /// Probability of recombining a pair (0.0–1.0).
    pub rate: f64,
}

impl Default for CrossoverOperation {
    fn default() -> Self {
        Self {
            strategy: Crossover::default(),
            rate: 1.0,
        }
    }
}

impl CrossoverOperation {
    pub fn new(strategy: Crossover) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the per-pair crossover probability.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate.clamp(0.0, 1.0);
        self
    }
}

impl<G: Genetic> GeneticOperation<G> for CrossoverOperation {
    fn apply(&mut self, population: &mut Vec<G>, ctx: &mut OperationContext<'_>) {
        let rng = ctx.rng();
        for pair in population.chunks_exact_mut(2) {
            if rng.random_range(0.0..1.0) >= self.rate {
                continue;
            }
            match self
                .strategy
                .apply(pair[0].chromosome(), pair[1].chromosome(), rng)
            {
                Ok((child1, child2)) => {
                    pair[0] = pair[0].offspring(child1);
                    pair[1] = pair[1].offspring(child2);
                }
                Err(err) => log::debug!("crossover skipped pair: {err}"),
            }
        }
    }

    fn name(&self) -> &str {
        "crossover"
    }
}

// ============================================================================
// Tests
// ============================================================================
