//! Selection strategies.
//!
//! Selection picks parents from a scored population. All strategies treat
//! **larger fitness as better**, and all assume fitness has already been
//! assigned.
//!
//! [`SelectionOperation`] turns a strategy into a generational operator: it
//! breeds a complete replacement population from selected parents.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)

use super::error::{GeneticError, Result};
use super::operation::{GeneticOperation, OperationContext};
use super::types::{Genetic, Population};
use rand::Rng;

/// Default tournament group size.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Selection strategy for choosing one parent.
///
/// # Examples
///
/// ```
/// use u_genetics::ga::Selection;
///
/// // Best of 3 uniformly sampled members
/// let sel = Selection::Tournament(3);
///
/// // Fitness-proportionate (roulette wheel)
/// let sel = Selection::Proportionate;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Sample `k` members with replacement and keep the fittest.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Probability of selection is `fitness / total fitness`.
    ///
    /// # Panics
    /// Panics when the total fitness is not positive. See
    /// [`fitness_proportionate`].
    ///
    /// # Complexity
    /// O(n) per selection
    Proportionate,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(DEFAULT_TOURNAMENT_SIZE)
    }
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// # Errors
    /// `InsufficientPopulation` if `population` is empty.
    pub fn select<G: Genetic, R: Rng>(&self, population: &[G], rng: &mut R) -> Result<usize> {
        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Proportionate => fitness_proportionate(population, rng),
        }
    }

    /// Number of members one pair of parents draws from the population.
    fn sample_size(&self) -> Option<usize> {
        match self {
            Selection::Tournament(k) => Some(2 * (*k).max(1)),
            Selection::Proportionate => None,
        }
    }
}

/// Tournament selection: sample `k` members with replacement, return the
/// index of the fittest. Ties go to the earliest sample.
///
/// # Errors
/// `InsufficientPopulation` if `population` is empty.
pub fn tournament<G: Genetic, R: Rng>(population: &[G], k: usize, rng: &mut R) -> Result<usize> {
    if population.is_empty() {
        return Err(GeneticError::insufficient_population(
            "cannot run a tournament on an empty population",
        ));
    }
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    Ok(best_idx)
}

/// Fitness-proportionate (roulette wheel) selection by cumulative sum.
///
/// Draws a target `r` in `[0, F)` where `F` is the total fitness, then walks
/// the population adding each member's fitness to a running sum. The walk
/// stops at the first member reached once the running sum is `>= r`; if it
/// never is, the last member scanned is returned.
///
/// # Errors
/// `InsufficientPopulation` if `population` is empty.
///
/// # Panics
/// Panics if the total fitness is not positive: proportionate selection is
/// undefined there. Assign fitness before selecting.
pub fn fitness_proportionate<G: Genetic, R: Rng>(population: &[G], rng: &mut R) -> Result<usize> {
    if population.is_empty() {
        return Err(GeneticError::insufficient_population(
            "fitness-proportionate selection needs a non-empty population",
        ));
    }

    let total: f64 = population.iter().map(|m| m.fitness()).sum();
    assert!(
        total > 0.0,
        "total fitness must be positive for proportionate selection, got {total}"
    );

    let target = rng.random_range(0.0..total);
    let mut sum = 0.0;
    let mut selected = 0;
    for (i, member) in population.iter().enumerate() {
        if sum >= target {
            break;
        }
        sum += member.fitness();
        selected = i;
    }
    Ok(selected)
}

// ============================================================================
// Generational operator
// ============================================================================

/// Result of [`SelectionOperation::breed`].
#[derive(Debug, Clone)]
pub struct Breeding<G> {
    /// Exactly as many children as the parent population had members.
    pub offspring: Vec<G>,
    /// Non-fatal condition met while breeding (currently only a population
    /// too small for the tournament size).
    pub warning: Option<GeneticError>,
}

/// Breeds a full replacement generation from selected parents.
///
/// Until the offspring count equals the population size: select a primary
/// and a secondary parent with [`selection`](Self::selection), call
/// [`Genetic::reproduce`], and keep the child. A failed reproduction is
/// logged and retried. On completion the population is replaced by exactly
/// the offspring.
///
/// With [`Selection::Tournament`]`(k)` this is classic tournament selection:
/// `2k` members are sampled per pair. A population smaller than `2k` is
/// reported as an `InsufficientPopulation` warning in
/// [`Breeding::warning`] and the run proceeds.
///
/// After [`max_attempts`](Self::max_attempts) failed reproductions in a
/// single call, breeding is abandoned and the previous population is kept.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionOperation {
    /// How each parent is chosen.
    pub selection: Selection,

    /// Failed reproductions tolerated per call.
    ///
    /// `None` means `100 × population size`.
    pub max_attempts: Option<usize>,
}

impl Default for SelectionOperation {
    fn default() -> Self {
        Self::tournament()
    }
}

impl SelectionOperation {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            max_attempts: None,
        }
    }

    /// Tournament selection with groups of 3.
    pub fn tournament() -> Self {
        Self::new(Selection::Tournament(DEFAULT_TOURNAMENT_SIZE))
    }

    /// Fitness-proportionate selection for both parents.
    pub fn proportionate() -> Self {
        Self::new(Selection::Proportionate)
    }

    /// Sets the tournament group size.
    pub fn with_tournament_size(self, k: usize) -> Self {
        Self {
            selection: Selection::Tournament(k.max(1)),
            ..self
        }
    }

    /// Sets the number of failed reproductions tolerated per call.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Breeds the next generation.
    ///
    /// The returned offspring has exactly `population.len()` members. A
    /// tournament population smaller than `2k` still breeds and is reported
    /// as an `InsufficientPopulation` warning.
    ///
    /// # Errors
    /// `UnableToReproduce` once `max_attempts` reproductions have failed;
    /// the error carries the chromosomes of the last failing pair.
    pub fn breed<G: Genetic, R: Rng>(
        &self,
        population: &[G],
        rng: &mut R,
    ) -> Result<Breeding<G>> {
        let target = population.len();
        let warning = self
            .selection
            .sample_size()
            .filter(|&needed| target < needed)
            .map(|needed| {
                GeneticError::insufficient_population(format!(
                    "tournament wants {needed} members per pairing, population has {target}"
                ))
            });

        let max_attempts = self.max_attempts.unwrap_or(target.saturating_mul(100));
        let mut offspring = Vec::with_capacity(target);
        let mut failures = 0usize;

        while offspring.len() < target {
            let primary = &population[self.selection.select(population, rng)?];
            let secondary = &population[self.selection.select(population, rng)?];

            match primary.reproduce(secondary, rng) {
                Ok(child) => offspring.push(child),
                Err(err) => {
                    log::debug!("reproduction failed, retrying: {err}");
                    failures += 1;
                    if failures >= max_attempts {
                        return Err(GeneticError::unable_to_reproduce(format!(
                            "gave up after {failures} failed reproductions"
                        ))
                        .with_members([
                            primary.chromosome().to_vec(),
                            secondary.chromosome().to_vec(),
                        ]));
                    }
                }
            }
        }
        Ok(Breeding { offspring, warning })
    }
}

impl<G: Genetic> GeneticOperation<G> for SelectionOperation {
    fn apply(&mut self, population: &mut Population<G>, ctx: &mut OperationContext<'_>) {
        match self.breed(population, ctx.rng()) {
            Ok(breeding) => {
                if let Some(warning) = &breeding.warning {
                    log::warn!("{warning}");
                }
                *population = breeding.offspring;
            }
            Err(err) => log::error!("selection kept the previous generation: {err}"),
        }
    }

    fn name(&self) -> &str {
        match self.selection {
            Selection::Tournament(_) => "tournament selection",
            Selection::Proportionate => "proportionate selection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Chromosome, Genome, Organism, StopHandle, Trait};
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Organism> {
        let genome = Genome::default();
        fitnesses
            .iter()
            .map(|&f| Organism::new(&genome, vec![Trait::from(1); 4]).with_fitness(f))
            .collect()
    }

    #[derive(Debug, Clone)]
    struct Sterile {
        fitness: f64,
        chromosome: Chromosome,
        genome: Genome,
    }

    impl Genetic for Sterile {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
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
            Sterile {
                fitness: 1.0,
                chromosome,
                genome: genome.clone(),
            }
        }
        fn reproduce<R: Rng>(&self, _other: &Self, _rng: &mut R) -> Result<Self> {
            Err(GeneticError::unable_to_reproduce("sterile"))
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[0.1, 0.5, 1.0, 0.2]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let idx = Selection::Tournament(4).select(&pop, &mut rng).expect("non-empty");
            counts[idx] += 1;
        }
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[0.1, 0.5, 1.0, 0.2]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            let idx = Selection::Tournament(1).select(&pop, &mut rng).expect("non-empty");
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_proportionate_matches_shares() {
        let pop = make_population(&[1.0, 3.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 2];
        let n = 20000;
        for _ in 0..n {
            let idx = fitness_proportionate(&pop, &mut rng).expect("non-empty");
            counts[idx] += 1;
        }
        // fitness 3 of a total 4 wins three draws in four
        let share = counts[1] as f64 / n as f64;
        assert!((share - 0.75).abs() < 0.02, "expected share near 0.75, got {share}");
    }

    #[test]
    fn test_proportionate_single_member() {
        let pop = make_population(&[0.3]);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert_eq!(fitness_proportionate(&pop, &mut rng).expect("non-empty"), 0);
        }
    }

    #[test]
    fn test_proportionate_indices_in_range() {
        let pop = make_population(&[0.0, 0.0, 2.0, 0.0, 1.0]);
        let mut rng = create_rng(9);
        for _ in 0..1000 {
            let idx = fitness_proportionate(&pop, &mut rng).expect("non-empty");
            assert!(idx < pop.len());
        }
    }

    #[test]
    fn test_empty_population_errors() {
        let pop: Vec<Organism> = vec![];
        let mut rng = create_rng(42);
        let err = fitness_proportionate(&pop, &mut rng).unwrap_err();
        assert_eq!(err.kind(), crate::ga::ErrorKind::InsufficientPopulation);
        let err = Selection::Tournament(3).select(&pop, &mut rng).unwrap_err();
        assert_eq!(err.kind(), crate::ga::ErrorKind::InsufficientPopulation);
    }

    #[test]
    #[should_panic(expected = "total fitness must be positive")]
    fn test_proportionate_zero_total_panics() {
        let pop = make_population(&[0.0, 0.0, 0.0]);
        let mut rng = create_rng(42);
        let _ = fitness_proportionate(&pop, &mut rng);
    }

    #[test]
    #[should_panic(expected = "total fitness must be positive")]
    fn test_proportionate_negative_total_panics() {
        let pop = make_population(&[-1.0, 0.5]);
        let mut rng = create_rng(42);
        let _ = fitness_proportionate(&pop, &mut rng);
    }

    #[test]
    fn test_breed_replaces_population() {
        let pop = make_population(&[0.1, 0.9, 0.4, 0.7, 0.2, 0.6, 0.3, 0.8]);
        let mut rng = create_rng(42);
        let breeding = SelectionOperation::tournament()
            .breed(&pop, &mut rng)
            .expect("equal-length parents");
        assert_eq!(breeding.offspring.len(), pop.len());
        assert!(breeding.warning.is_none());
    }

    #[test]
    fn test_breed_reports_small_tournament_population() {
        let pop = make_population(&[0.5, 0.9]);
        let mut rng = create_rng(42);
        let breeding = SelectionOperation::tournament()
            .breed(&pop, &mut rng)
            .expect("equal-length parents");
        assert_eq!(breeding.offspring.len(), 2);
        assert_eq!(
            breeding.warning.map(|w| w.kind()),
            Some(crate::ga::ErrorKind::InsufficientPopulation)
        );

        let breeding = SelectionOperation::proportionate()
            .breed(&pop, &mut rng)
            .expect("equal-length parents");
        assert!(breeding.warning.is_none());
    }

    #[test]
    fn test_tournament_small_population_terminates() {
        // fewer than 2 × 3 members: warned about, but still completes
        let mut pop = make_population(&[0.5, 0.9]);
        let mut rng = create_rng(42);
        let stop = StopHandle::new();
        let mut op = SelectionOperation::tournament();
        let mut ctx = OperationContext::new(&mut rng, 0, &stop);
        op.apply(&mut pop, &mut ctx);
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_breed_gives_up_and_keeps_population() {
        let genome = Genome::default();
        let mut pop: Vec<Sterile> = (0..4)
            .map(|i| Sterile::from_chromosome(&genome, vec![Trait::from(i)]))
            .collect();
        let before: Vec<Chromosome> = pop.iter().map(|s| s.chromosome.clone()).collect();

        let mut rng = create_rng(42);
        let err = SelectionOperation::tournament()
            .with_max_attempts(10)
            .breed(&pop, &mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), crate::ga::ErrorKind::UnableToReproduce);
        assert_eq!(err.members().len(), 2);

        let stop = StopHandle::new();
        let mut op = SelectionOperation::tournament().with_max_attempts(10);
        let mut ctx = OperationContext::new(&mut rng, 0, &stop);
        op.apply(&mut pop, &mut ctx);
        let after: Vec<Chromosome> = pop.iter().map(|s| s.chromosome.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_breed_empty_population() {
        let pop: Vec<Organism> = vec![];
        let mut rng = create_rng(42);
        let breeding = SelectionOperation::tournament()
            .breed(&pop, &mut rng)
            .expect("nothing to breed");
        assert!(breeding.offspring.is_empty());
    }

    #[test]
    fn test_proportionate_operation() {
        let mut pop = make_population(&[0.2, 0.4, 0.6, 0.8]);
        let mut rng = create_rng(42);
        let stop = StopHandle::new();
        let mut op = SelectionOperation::proportionate();
        let mut ctx = OperationContext::new(&mut rng, 0, &stop);
        op.apply(&mut pop, &mut ctx);
        assert_eq!(pop.len(), 4);
    }

    #[test]
    fn test_builders() {
        let op = SelectionOperation::default().with_tournament_size(5);
        assert_eq!(op.selection, Selection::Tournament(5));
        assert_eq!(SelectionOperation::default().selection, Selection::Tournament(3));
        assert_eq!(op.with_max_attempts(7).max_attempts, Some(7));
    }
}
