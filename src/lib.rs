//! Domain-agnostic genetic algorithm engine.
//!
//! Provides a discrete chromosome model and a library of evolutionary
//! operators that compose into a cyclic pipeline:
//!
//! - **Data model**: traits (allele values), genes, genomes and the
//!   [`Genetic`](ga::Genetic) contract every candidate solution implements.
//! - **Fitness**: Hamming, positional match and value-count scoring.
//! - **Selection**: tournament and fitness-proportionate selection, plus a
//!   generational breeding operator.
//! - **Crossover**: single-point, uniform (fixed rate or per-gene rates) and
//!   Revolving Random Crossover.
//! - **Mutation**: allele mutation and Lamarckian trait adoption.
//! - **Environment**: a scheduler that cycles operators over a population
//!   until stopped.
//!
//! # Architecture
//!
//! All randomness flows through an explicit [`rand::Rng`] argument or the
//! generator an [`Environment`](ga::Environment) lends to its operators, so
//! seeded runs are reproducible. The crate installs no logger; it reports
//! through the [`log`] facade.

pub mod ga;
pub mod random;
