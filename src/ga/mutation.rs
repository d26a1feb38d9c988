//! Single-entity mutation operators.
//!
//! - [`allele_mutation`]: replace one random position with another allele of
//!   its gene, O(a) for `a` alleles, plus O(n) when shuffling
//! - [`lamarck_mutation`]: adopt differing traits from a fitter peer, O(n + p)
//!
//! [`AlleleMutation`] and [`LamarckMutation`] apply them to every member of
//! a population.

use super::error::{GeneticError, Result};
use super::operation::{GeneticOperation, OperationContext};
use super::types::{Genetic, Population, Trait};
use crate::random::{choose, shuffle};
use rand::Rng;

/// Default per-entity mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.03;

/// Default number of traits adopted by a Lamarckian mutation.
pub const DEFAULT_LAMARCK_LIMIT: usize = 1;

/// Allele mutation.
///
/// With probability `rate` (values above 1.0 are treated as 1.0), picks one
/// chromosome position uniformly and replaces its trait with a different
/// allele of that position's gene, as mapped by
/// [`Genome::locus`](super::Genome::locus). When `shuffle_after` is set, the
/// whole chromosome is then shuffled.
///
/// Returns `true` if a position was mutated. Nothing happens when the
/// chromosome is empty, the position has no gene in the genome, or the gene
/// offers no alternative allele.
///
/// Shuffling destroys positional meaning: do not combine it with positional
/// crossover on the same species.
pub fn allele_mutation<G: Genetic, R: Rng>(
    entity: &mut G,
    rate: f64,
    shuffle_after: bool,
    rng: &mut R,
) -> bool {
    let rate = rate.min(1.0);
    let len = entity.chromosome().len();
    if len == 0 || rng.random_range(0.0..1.0) >= rate {
        return false;
    }

    let idx = rng.random_range(0..len);
    let current = &entity.chromosome()[idx];
    let replacement = entity.genome().locus(idx).and_then(|gene| {
        let alternatives: Vec<&Trait> = gene.alleles().iter().filter(|a| *a != current).collect();
        choose(&alternatives, rng).map(|t| (*t).clone())
    });

    let Some(replacement) = replacement else {
        return false;
    };
    entity.chromosome_mut()[idx] = replacement;
    if shuffle_after {
        shuffle(entity.chromosome_mut(), rng);
    }
    true
}

/// Lamarckian mutation: adopt traits from a fitter peer.
///
/// Picks one peer with strictly greater fitness uniformly at random, then
/// visits chromosome positions in random order, copying the peer's trait
/// wherever it differs, until `limit` traits have been copied. Returns the
/// number of traits copied; `Ok(0)` when no peer is fitter.
///
/// Assign fitness to `entity` and `peers` before calling.
///
/// # Errors
/// `InsufficientPopulation` if `peers` is empty.
pub fn lamarck_mutation<G: Genetic, R: Rng>(
    entity: &mut G,
    peers: &[G],
    limit: usize,
    rng: &mut R,
) -> Result<usize> {
    if peers.is_empty() {
        return Err(GeneticError::insufficient_population(
            "lamarckian mutation needs at least one peer",
        )
        .with_members([entity.chromosome().to_vec()]));
    }

    let fitness = entity.fitness();
    let fitter: Vec<&G> = peers.iter().filter(|p| p.fitness() > fitness).collect();
    let Some(model) = choose(&fitter, rng) else {
        return Ok(0);
    };

    let source = model.chromosome();
    let mut positions: Vec<usize> = (0..entity.chromosome().len().min(source.len())).collect();
    shuffle(&mut positions, rng);

    let chromosome = entity.chromosome_mut();
    let mut adopted = 0;
    for idx in positions {
        if adopted >= limit {
            break;
        }
        if chromosome[idx] != source[idx] {
            chromosome[idx] = source[idx].clone();
            adopted += 1;
        }
    }
    Ok(adopted)
}

// ============================================================================
// Population operators
// ============================================================================

/// Applies [`allele_mutation`] to every member.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlleleMutation {
    /// Probability of mutating each member (0.0–1.0).
    pub rate: f64,
    /// Shuffle a mutated chromosome afterwards.
    pub shuffle: bool,
}

impl Default for AlleleMutation {
    fn default() -> Self {
        Self {
            rate: DEFAULT_MUTATION_RATE,
            shuffle: false,
        }
    }
}

impl AlleleMutation {
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

impl<G: Genetic> GeneticOperation<G> for AlleleMutation {
    fn apply(&mut self, population: &mut Population<G>, ctx: &mut OperationContext<'_>) {
        let rng = ctx.rng();
        let mut mutated = 0usize;
        for member in population.iter_mut() {
            if allele_mutation(member, self.rate, self.shuffle, rng) {
                mutated += 1;
            }
        }
        log::trace!("allele mutation changed {mutated} members");
    }

    fn name(&self) -> &str {
        "allele mutation"
    }
}

/// Applies [`lamarck_mutation`] to every member, using a snapshot of the
/// population taken before the pass as the peer pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LamarckMutation {
    /// Maximum traits adopted per member.
    pub limit: usize,
}

impl Default for LamarckMutation {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LAMARCK_LIMIT,
        }
    }
}

impl LamarckMutation {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl<G: Genetic> GeneticOperation<G> for LamarckMutation {
    fn apply(&mut self, population: &mut Population<G>, ctx: &mut OperationContext<'_>) {
        if population.is_empty() {
            return;
        }
        let peers = population.clone();
        let rng = ctx.rng();
        for member in population.iter_mut() {
            if let Err(err) = lamarck_mutation(member, &peers, self.limit, rng) {
                log::debug!("lamarckian mutation skipped a member: {err}");
            }
        }
    }

    fn name(&self) -> &str {
        "lamarckian mutation"
    }
}
