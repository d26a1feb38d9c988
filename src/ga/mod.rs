//! Genetic Algorithm engine.
//!
//! A generic, domain-agnostic GA engine built around a discrete chromosome
//! model and a composable operator pipeline. Users describe the search space
//! as a [`Genome`], implement [`Genetic`] for their candidate type (or use
//! [`Organism`]), and run an [`Environment`] over a list of operators.
//!
//! # Core Traits
//!
//! - [`Genetic`]: A candidate solution with fitness, chromosome and genome
//! - [`GeneticOperation`]: One pipeline step applied to the whole population
//!
//! # Key Types
//!
//! - [`Trait`], [`Gene`], [`Genome`], [`Chromosome`]: the data model
//! - [`Environment`]: Cycles the operator pipeline until stopped
//! - [`EnvironmentConfig`]: Initial population size and seed
//! - [`GeneticError`]: Structural failures of operators
//!
//! # Operators
//!
//! | Category | Functions | Pipeline form |
//! |----------|-----------|---------------|
//! | Fitness | [`fitness`] | [`HammingFitness`], [`MatchFitness`], [`ValueFitness`] |
//! | Selection | [`selection`] | [`SelectionOperation`] |
//! | Crossover | [`crossover`] | [`CrossoverOperation`] |
//! | Mutation | [`mutation`] | [`AlleleMutation`], [`LamarckMutation`] |
//! | Termination | | [`GenerationLimit`], [`FitnessThreshold`] |
//!
//! [`schema`] holds a population diagnostic outside the loop.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod crossover;
mod environment;
mod error;
pub mod fitness;
pub mod mutation;
mod operation;
mod organism;
pub mod schema;
pub mod selection;
mod types;

pub use config::EnvironmentConfig;
pub use crossover::{Crossover, CrossoverOperation};
pub use environment::{Environment, FitnessThreshold, GenerationLimit};
pub use error::{ErrorKind, GeneticError, Result};
pub use fitness::{HammingFitness, MatchFitness, ValueFitness};
pub use mutation::{AlleleMutation, LamarckMutation};
pub use operation::{FnOperation, GeneticOperation, OperationContext, StopHandle};
pub use organism::Organism;
pub use schema::{find_schema, SchemaConfig};
pub use selection::{Breeding, Selection, SelectionOperation};
pub use types::{
    chromosome_string, random_population, random_population_from, Allele, Chromosome, Gene,
    Genetic, Genome, Population, Trait,
};
