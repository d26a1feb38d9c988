//! Built-in fitness functions.
//!
//! Each function overwrites the fitness of every member and touches nothing
//! else: no reordering, no errors. The score is the share of matching
//! positions, so it lies in `[0, 1]`.
//!
//! | Function | Compares | Denominator |
//! |----------|----------|-------------|
//! | [`hamming_fitness`] | chromosome string vs target string, per character | target length |
//! | [`match_fitness`] | chromosome vs target chromosome, per trait | target length |
//! | [`value_fitness`] | every trait vs one value | chromosome length |
//!
//! An empty denominator yields a fitness of `0.0`.

use super::operation::{GeneticOperation, OperationContext};
use super::types::{Genetic, Population, Trait};

/// Scores each member by per-character agreement between its
/// [`chromosome_string`](super::chromosome_string) and `target`.
///
/// See [Hamming distance](https://en.wikipedia.org/wiki/Hamming_distance).
/// Characters past the shorter of the two strings never match.
pub fn hamming_fitness<G: Genetic>(population: &mut [G], target: &str) {
    let target_len = target.chars().count();
    if target_len == 0 {
        log::warn!("hamming fitness called with an empty target; scoring every member 0");
    }
    for member in population.iter_mut() {
        let matching = member
            .chromosome_string()
            .chars()
            .zip(target.chars())
            .filter(|(a, b)| a == b)
            .count();
        member.set_fitness(ratio(matching, target_len));
    }
}

/// Scores each member by positional agreement with `target`.
pub fn match_fitness<G: Genetic>(population: &mut [G], target: &[Trait]) {
    for member in population.iter_mut() {
        let matching = member
            .chromosome()
            .iter()
            .zip(target)
            .filter(|(a, b)| a == b)
            .count();
        member.set_fitness(ratio(matching, target.len()));
    }
}

/// Scores each member by the share of its traits equal to `value`.
pub fn value_fitness<G: Genetic>(population: &mut [G], value: &Trait) {
    for member in population.iter_mut() {
        let chromosome = member.chromosome();
        let matching = chromosome.iter().filter(|t| *t == value).count();
        let len = chromosome.len();
        member.set_fitness(ratio(matching, len));
    }
}

fn ratio(matching: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Pipeline form of [`hamming_fitness`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HammingFitness {
    pub target: String,
}

impl HammingFitness {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl<G: Genetic> GeneticOperation<G> for HammingFitness {
    fn apply(&mut self, population: &mut Population<G>, _ctx: &mut OperationContext<'_>) {
        hamming_fitness(population, &self.target);
    }

    fn name(&self) -> &str {
        "hamming fitness"
    }
}

/// Pipeline form of [`match_fitness`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchFitness {
    pub target: Vec<Trait>,
}

impl MatchFitness {
    pub fn new(target: Vec<Trait>) -> Self {
        Self { target }
    }
}

impl<G: Genetic> GeneticOperation<G> for MatchFitness {
    fn apply(&mut self, population: &mut Population<G>, _ctx: &mut OperationContext<'_>) {
        match_fitness(population, &self.target);
    }

    fn name(&self) -> &str {
        "match fitness"
    }
}

/// Pipeline form of [`value_fitness`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueFitness {
    pub value: Trait,
}

impl ValueFitness {
    pub fn new(value: impl Into<Trait>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl<G: Genetic> GeneticOperation<G> for ValueFitness {
    fn apply(&mut self, population: &mut Population<G>, _ctx: &mut OperationContext<'_>) {
        value_fitness(population, &self.value);
    }

    fn name(&self) -> &str {
        "value fitness"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Genome, Organism, StopHandle};
    use crate::random::create_rng;

    fn organism(values: &[i64]) -> Organism {
        Organism::new(
            &Genome::default(),
            values.iter().map(|&v| Trait::Int(v)).collect(),
        )
    }

    fn letters(s: &str) -> Organism {
        Organism::new(&Genome::default(), s.chars().map(Trait::from).collect())
    }

    #[test]
    fn test_hamming_fitness() {
        let mut pop = vec![letters("hello"), letters("hxllo"), letters("abcde")];
        hamming_fitness(&mut pop, "hello");
        assert!((pop[0].fitness() - 1.0).abs() < 1e-12);
        assert!((pop[1].fitness() - 0.8).abs() < 1e-12);
        assert!(pop[2].fitness().abs() < 1e-12);
    }

    #[test]
    fn test_hamming_length_mismatch() {
        // extra characters in either string never match
        let mut pop = vec![letters("hel"), letters("helloworld")];
        hamming_fitness(&mut pop, "hello");
        assert!((pop[0].fitness() - 0.6).abs() < 1e-12);
        assert!((pop[1].fitness() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hamming_empty_target() {
        let mut pop = vec![letters("abc")];
        pop[0].set_fitness(0.5);
        hamming_fitness(&mut pop, "");
        assert_eq!(pop[0].fitness(), 0.0);
    }

    #[test]
    fn test_match_fitness() {
        let target: Vec<Trait> = [1, 0, 1, 0].iter().map(|&v| Trait::Int(v)).collect();
        let mut pop = vec![organism(&[1, 0, 1, 0]), organism(&[1, 1, 1, 1]), organism(&[0, 1, 0, 1])];
        match_fitness(&mut pop, &target);
        assert!((pop[0].fitness() - 1.0).abs() < 1e-12);
        assert!((pop[1].fitness() - 0.5).abs() < 1e-12);
        assert!(pop[2].fitness().abs() < 1e-12);
    }

    #[test]
    fn test_value_fitness() {
        let mut pop = vec![organism(&[1, 1, 0, 0, 0]), organism(&[]), organism(&[1])];
        value_fitness(&mut pop, &Trait::from(1));
        assert!((pop[0].fitness() - 0.4).abs() < 1e-12);
        assert_eq!(pop[1].fitness(), 0.0);
        assert!((pop[2].fitness() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fitness_preserves_order() {
        let mut pop = vec![organism(&[0, 0]), organism(&[1, 1])];
        let before: Vec<_> = pop.iter().map(|o| o.chromosome().to_vec()).collect();
        value_fitness(&mut pop, &Trait::from(1));
        let after: Vec<_> = pop.iter().map(|o| o.chromosome().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_operations_delegate() {
        let mut rng = create_rng(42);
        let stop = StopHandle::new();
        let mut pop = vec![letters("abc")];

        let mut ctx = OperationContext::new(&mut rng, 0, &stop);
        HammingFitness::new("abd").apply(&mut pop, &mut ctx);
        assert!((pop[0].fitness() - 2.0 / 3.0).abs() < 1e-12);

        ValueFitness::new('a').apply(&mut pop, &mut ctx);
        assert!((pop[0].fitness() - 1.0 / 3.0).abs() < 1e-12);

        MatchFitness::new(vec![Trait::from('a')]).apply(&mut pop, &mut ctx);
        assert!((pop[0].fitness() - 1.0).abs() < 1e-12);
    }
}
