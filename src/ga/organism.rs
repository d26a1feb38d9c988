//! A ready-made [`Genetic`] entity.

use super::types::{Chromosome, Genetic, Genome, Trait};

/// A plain candidate solution: fitness, chromosome, genome handle.
///
/// Reproduces with the trait's default strategy (single-point crossover at
/// the midpoint). Wrap or replace it when a domain needs custom reproduction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Organism {
    fitness: f64,
    chromosome: Chromosome,
    genome: Genome,
}

impl Organism {
    pub fn new(genome: &Genome, chromosome: Chromosome) -> Self {
        Self {
            fitness: 0.0,
            chromosome,
            genome: genome.clone(),
        }
    }

    /// Sets the fitness, builder style.
    pub fn with_fitness(mut self, fitness: f64) -> Self {
        self.fitness = fitness;
        self
    }
}

impl Genetic for Organism {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    fn chromosome(&self) -> &[Trait] {
        &self.chromosome
    }

    fn chromosome_mut(&mut self) -> &mut Chromosome {
        &mut self.chromosome
    }

    fn genome(&self) -> &Genome {
        &self.genome
    }

    fn from_chromosome(genome: &Genome, chromosome: Chromosome) -> Self {
        Self::new(genome, chromosome)
    }
}
