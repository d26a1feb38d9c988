//! Core data model for the GA framework.
//!
//! - [`Trait`]: one allele value
//! - [`Gene`]: a named locus and its candidate alleles
//! - [`Genome`]: the ordered genes shared by a species
//! - [`Chromosome`]: one entity's ordered traits
//! - [`Genetic`]: the contract between the generic operators and a
//!   domain-specific candidate solution

use super::crossover;
use super::error::Result;
use rand::Rng;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of traits, one per genome position.
pub type Chromosome = Vec<Trait>;

/// A population of entities. Order only matters to operators that say so.
pub type Population<G> = Vec<G>;

// ============================================================================
// Trait
// ============================================================================

/// A caller-defined allele value usable inside [`Trait::Custom`].
///
/// Implemented automatically for every `'static` type that is
/// `Eq + Hash + Debug + Display + Send + Sync`. Two custom values compare
/// equal only when they have the same concrete type and equal values.
pub trait Allele: Any + fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Allele) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> Allele for T
where
    T: Any + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Allele) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// The concrete allele occupying one chromosome position.
///
/// Equality and hashing delegate to the wrapped value. Values of different
/// kinds are never equal (`Int(1) != Bool(true)`).
///
/// # Examples
///
/// ```
/// use u_genetics::ga::Trait;
///
/// assert_eq!(Trait::from(1), Trait::Int(1));
/// assert_eq!(Trait::from("A"), Trait::Str("A".into()));
/// assert_ne!(Trait::from(1), Trait::from(true));
/// assert_eq!(Trait::from('x').to_string(), "x");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Trait {
    Bool(bool),
    Int(i64),
    Char(char),
    Str(String),
    /// Caller-defined value. Not serializable.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Arc<dyn Allele>),
}

impl Trait {
    /// Wraps a caller-defined value.
    pub fn custom<T: Allele>(value: T) -> Self {
        Trait::Custom(Arc::new(value))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Trait::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Trait::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Trait::Char(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Trait::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the custom value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Trait::Custom(value) => value.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Trait {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Trait::Bool(a), Trait::Bool(b)) => a == b,
            (Trait::Int(a), Trait::Int(b)) => a == b,
            (Trait::Char(a), Trait::Char(b)) => a == b,
            (Trait::Str(a), Trait::Str(b)) => a == b,
            (Trait::Custom(a), Trait::Custom(b)) => a.dyn_eq(b.as_ref()),
            _ => false,
        }
    }
}

impl Eq for Trait {}

impl Hash for Trait {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Trait::Bool(v) => v.hash(state),
            Trait::Int(v) => v.hash(state),
            Trait::Char(v) => v.hash(state),
            Trait::Str(v) => v.hash(state),
            Trait::Custom(v) => v.dyn_hash(state),
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trait::Bool(v) => write!(f, "{v}"),
            Trait::Int(v) => write!(f, "{v}"),
            Trait::Char(v) => write!(f, "{v}"),
            Trait::Str(v) => f.write_str(v),
            Trait::Custom(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Trait {
    fn from(v: bool) -> Self {
        Trait::Bool(v)
    }
}

impl From<i32> for Trait {
    fn from(v: i32) -> Self {
        Trait::Int(i64::from(v))
    }
}

impl From<i64> for Trait {
    fn from(v: i64) -> Self {
        Trait::Int(v)
    }
}

impl From<char> for Trait {
    fn from(v: char) -> Self {
        Trait::Char(v)
    }
}

impl From<&str> for Trait {
    fn from(v: &str) -> Self {
        Trait::Str(v.to_owned())
    }
}

impl From<String> for Trait {
    fn from(v: String) -> Self {
        Trait::Str(v)
    }
}

/// Concatenates the printable form of every trait, without separators.
///
/// ```
/// use u_genetics::ga::{chromosome_string, Trait};
///
/// let c = vec![Trait::from(1), Trait::from(1), Trait::from(0)];
/// assert_eq!(chromosome_string(&c), "110");
/// ```
pub fn chromosome_string(chromosome: &[Trait]) -> String {
    chromosome.iter().map(|t| t.to_string()).collect()
}

// ============================================================================
// Gene / Genome
// ============================================================================

/// A named locus and the alleles it may take.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gene {
    name: String,
    alleles: Vec<Trait>,
}

impl Gene {
    /// Creates a gene, e.g. `Gene::new("Eye Color", ["Brown", "Hazel"].map(Trait::from))`.
    pub fn new<I>(name: impl Into<String>, alleles: I) -> Self
    where
        I: IntoIterator<Item = Trait>,
    {
        Self {
            name: name.into(),
            alleles: alleles.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alleles(&self) -> &[Trait] {
        &self.alleles
    }

    /// Returns a uniformly random allele, or `None` if the gene has none.
    pub fn random_trait<R: Rng>(&self, rng: &mut R) -> Option<Trait> {
        crate::random::choose(&self.alleles, rng).cloned()
    }
}

/// The ordered gene set of a species.
///
/// Cloning is cheap: all clones share the same immutable gene list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Genome {
    genes: Arc<Vec<Gene>>,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes: Arc::new(genes),
        }
    }

    /// Number of genes, including genes without alleles.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene(&self, index: usize) -> Option<&Gene> {
        self.genes.get(index)
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Gene> {
        self.genes.iter()
    }

    /// Genes that contribute a chromosome position, in position order.
    ///
    /// Genes without alleles are skipped, so the `i`-th item describes
    /// chromosome position `i`.
    pub fn loci(&self) -> impl Iterator<Item = &Gene> {
        self.genes.iter().filter(|gene| !gene.alleles.is_empty())
    }

    /// The gene describing chromosome position `position`.
    pub fn locus(&self, position: usize) -> Option<&Gene> {
        self.loci().nth(position)
    }

    /// Length of the chromosomes built by [`random_chromosome`](Self::random_chromosome).
    pub fn chromosome_len(&self) -> usize {
        self.loci().count()
    }

    /// Draws one random trait per gene. Genes without alleles are skipped.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        self.loci()
            .filter_map(|gene| gene.random_trait(rng))
            .collect()
    }
}

impl FromIterator<Gene> for Genome {
    fn from_iter<I: IntoIterator<Item = Gene>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Genetic
// ============================================================================

/// A candidate solution: fitness, chromosome and a handle to the species'
/// genome.
///
/// Larger fitness is better. Fitness semantics (range, normalization) are
/// owned by the implementor.
///
/// # Implementing
///
/// ```
/// use u_genetics::ga::{Chromosome, Genetic, Genome, Trait};
///
/// #[derive(Debug, Clone)]
/// struct Cryptid {
///     fitness: f64,
///     chromosome: Chromosome,
///     genome: Genome,
/// }
///
/// impl Genetic for Cryptid {
///     fn fitness(&self) -> f64 { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = f; }
///     fn chromosome(&self) -> &[Trait] { &self.chromosome }
///     fn chromosome_mut(&mut self) -> &mut Chromosome { &mut self.chromosome }
///     fn genome(&self) -> &Genome { &self.genome }
///     fn from_chromosome(genome: &Genome, chromosome: Chromosome) -> Self {
///         Cryptid { fitness: 0.0, chromosome, genome: genome.clone() }
///     }
/// }
/// ```
pub trait Genetic: Clone + fmt::Debug {
    fn fitness(&self) -> f64;

    fn set_fitness(&mut self, fitness: f64);

    fn chromosome(&self) -> &[Trait];

    fn chromosome_mut(&mut self) -> &mut Chromosome;

    /// The genome shared by every member of this entity's species.
    fn genome(&self) -> &Genome;

    /// Builds an entity of this species from an explicit chromosome.
    fn from_chromosome(genome: &Genome, chromosome: Chromosome) -> Self;

    fn set_chromosome(&mut self, chromosome: Chromosome) {
        *self.chromosome_mut() = chromosome;
    }

    /// An entity with an empty chromosome.
    fn empty(genome: &Genome) -> Self {
        Self::from_chromosome(genome, Vec::new())
    }

    /// An entity with one random allele per gene.
    fn random<R: Rng>(genome: &Genome, rng: &mut R) -> Self {
        Self::from_chromosome(genome, genome.random_chromosome(rng))
    }

    /// A new entity of the same species carrying `chromosome`.
    fn offspring(&self, chromosome: Chromosome) -> Self {
        Self::from_chromosome(self.genome(), chromosome)
    }

    /// Printable form of the chromosome. See [`chromosome_string`].
    fn chromosome_string(&self) -> String {
        chromosome_string(self.chromosome())
    }

    /// Produces one child with `other`.
    ///
    /// The default is single-point crossover at the chromosome midpoint,
    /// keeping the first child. Override to plug in any other strategy.
    ///
    /// # Errors
    /// [`UnableToReproduce`](super::GeneticError::UnableToReproduce) when the
    /// chromosomes differ in length or are too short to split.
    fn reproduce<R: Rng>(&self, other: &Self, _rng: &mut R) -> Result<Self> {
        let point = self.chromosome().len() / 2;
        let (child, _) = crossover::single_point(self.chromosome(), other.chromosome(), point)?;
        Ok(self.offspring(child))
    }
}

/// Creates `size` random entities from `genome`.
pub fn random_population<G: Genetic, R: Rng>(
    genome: &Genome,
    size: usize,
    rng: &mut R,
) -> Population<G> {
    (0..size).map(|_| G::random(genome, rng)).collect()
}

/// Creates `size` entities whose chromosomes hold `length` traits drawn
/// uniformly from a flat trait collection, ignoring per-gene domains.
///
/// Returns entities with empty chromosomes when `traits` is empty.
pub fn random_population_from<G: Genetic, R: Rng>(
    genome: &Genome,
    traits: &[Trait],
    size: usize,
    length: usize,
    rng: &mut R,
) -> Population<G> {
    (0..size)
        .map(|_| {
            let chromosome = (0..length)
                .filter_map(|_| crate::random::choose(traits, rng).cloned())
                .collect();
            G::from_chromosome(genome, chromosome)
        })
        .collect()
}
