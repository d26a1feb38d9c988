//! Schema detection.
//!
//! A schema is a contiguous run of traits shared by a sizeable share of
//! the distinct chromosomes that reached the same fitness. Members are
//! grouped by fitness (optionally by fitness bucket), members with zero
//! fitness are ignored, and within each group every window of
//! `minimum_matching_genes` traits is tested against the group's distinct
//! chromosomes.
//!
//! A window is reported when at least `floor((u - 1) / 2)` *other* distinct
//! chromosomes of its group contain it, `u` being the group's distinct
//! chromosome count. A group with a single distinct chromosome therefore
//! reports all of its windows.
//!
//! This is a diagnostic; it plays no part in the evolutionary loop. Assign
//! fitness before calling.
//!
//! # Complexity
//! O(u² · n²) per group for `u` distinct chromosomes of length `n`.

use super::types::{Genetic, Trait};
use std::collections::HashMap;

/// Parameters for [`find_schema`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaConfig {
    /// Length of a schema window.
    pub minimum_matching_genes: usize,

    /// Width of the fitness buckets members are grouped by.
    ///
    /// `None` groups by exact fitness, which splits nearly-equal real
    /// fitness values into separate groups.
    pub bucket_width: Option<f64>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            minimum_matching_genes: 3,
            bucket_width: None,
        }
    }
}

impl SchemaConfig {
    pub fn with_minimum_matching_genes(mut self, n: usize) -> Self {
        self.minimum_matching_genes = n;
        self
    }

    /// Groups members by `floor(fitness / width)`. Non-positive or
    /// non-finite widths fall back to exact grouping.
    pub fn with_bucket_width(mut self, width: f64) -> Self {
        self.bucket_width = (width.is_finite() && width > 0.0).then_some(width);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.minimum_matching_genes == 0 {
            return Err("minimum_matching_genes must be at least 1".into());
        }
        if let Some(width) = self.bucket_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(format!("bucket_width must be positive and finite, got {width}"));
            }
        }
        Ok(())
    }

    fn bucket(&self, fitness: f64) -> u64 {
        match self.bucket_width {
            Some(width) if width.is_finite() && width > 0.0 => (fitness / width).floor().to_bits(),
            _ => fitness.to_bits(),
        }
    }
}

/// Finds trait windows common to members of equal fitness.
///
/// Results are distinct and ordered by first discovery (group order follows
/// the population). Returns nothing for an invalid config or when the first
/// member's chromosome is shorter than the window.
pub fn find_schema<G: Genetic>(population: &[G], config: &SchemaConfig) -> Vec<Vec<Trait>> {
    let window = config.minimum_matching_genes;
    if let Err(reason) = config.validate() {
        log::warn!("schema detection skipped: {reason}");
        return Vec::new();
    }
    match population.first() {
        Some(first) if first.chromosome().len() >= window => {}
        _ => return Vec::new(),
    }

    // fitness bucket -> distinct chromosomes, both in first-seen order
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<Vec<&[Trait]>> = Vec::new();
    for member in population.iter().filter(|m| m.fitness() != 0.0) {
        let slot = *index.entry(config.bucket(member.fitness())).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        let chromosome = member.chromosome();
        if !groups[slot].contains(&chromosome) {
            groups[slot].push(chromosome);
        }
    }

    let mut schema: Vec<Vec<Trait>> = Vec::new();
    for distinct in &groups {
        let threshold = (distinct.len() - 1) / 2;
        for chromosome in distinct {
            for subset in chromosome.windows(window) {
                let holders = distinct
                    .iter()
                    .filter(|other| other.windows(window).any(|w| w == subset))
                    .count();
                // the chromosome itself is always a holder
                if holders - 1 >= threshold && !schema.iter().any(|s| s.as_slice() == subset) {
                    schema.push(subset.to_vec());
                }
            }
        }
    }
    schema
}
