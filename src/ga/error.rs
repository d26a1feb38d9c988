//! Error type shared by all genetic operators.
//!
//! Every variant except [`GeneticError::Custom`] carries an optional
//! human-readable message and the chromosomes of the members involved, so a
//! caller can inspect exactly which parents failed to reproduce.

use super::types::Chromosome;
use thiserror::Error;

/// Result alias used throughout the GA module.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Failures produced by genetic operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneticError {
    /// An operation needed more members than were available.
    #[error("insufficient population: {}", .message.as_deref().unwrap_or("not enough members"))]
    InsufficientPopulation {
        message: Option<String>,
        members: Vec<Chromosome>,
    },

    /// A chromosome had too few positions for the operator.
    #[error("insufficient traits: {}", .message.as_deref().unwrap_or("chromosome too short"))]
    InsufficientTraits {
        message: Option<String>,
        members: Vec<Chromosome>,
    },

    /// Two parents are structurally incompatible, or the entity rejected
    /// the pairing.
    #[error("unable to reproduce: {}", .message.as_deref().unwrap_or("incompatible chromosomes"))]
    UnableToReproduce {
        message: Option<String>,
        members: Vec<Chromosome>,
    },

    /// Loss of genetic diversity. Never raised by the built-in operators;
    /// reserved for caller diagnostics.
    #[error("threatened population: {}", .message.as_deref().unwrap_or("diversity lost"))]
    ThreatenedPopulation {
        message: Option<String>,
        members: Vec<Chromosome>,
    },

    /// Caller-defined failure.
    #[error("{0}")]
    Custom(String),
}

/// Discriminant of a [`GeneticError`], convenient for matching in tests
/// and retry policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InsufficientPopulation,
    InsufficientTraits,
    UnableToReproduce,
    ThreatenedPopulation,
    Custom,
}

impl GeneticError {
    pub fn insufficient_population(message: impl Into<String>) -> Self {
        GeneticError::InsufficientPopulation {
            message: Some(message.into()),
            members: Vec::new(),
        }
    }

    pub fn insufficient_traits(message: impl Into<String>) -> Self {
        GeneticError::InsufficientTraits {
            message: Some(message.into()),
            members: Vec::new(),
        }
    }

    pub fn unable_to_reproduce(message: impl Into<String>) -> Self {
        GeneticError::UnableToReproduce {
            message: Some(message.into()),
            members: Vec::new(),
        }
    }

    pub fn threatened_population(message: impl Into<String>) -> Self {
        GeneticError::ThreatenedPopulation {
            message: Some(message.into()),
            members: Vec::new(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        GeneticError::Custom(message.into())
    }

    /// Attaches the chromosomes of the offending members.
    ///
    /// Has no effect on [`GeneticError::Custom`].
    pub fn with_members<I>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = Chromosome>,
    {
        if let Some(slot) = self.members_slot() {
            slot.extend(members);
        }
        self
    }

    /// Returns the discriminant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeneticError::InsufficientPopulation { .. } => ErrorKind::InsufficientPopulation,
            GeneticError::InsufficientTraits { .. } => ErrorKind::InsufficientTraits,
            GeneticError::UnableToReproduce { .. } => ErrorKind::UnableToReproduce,
            GeneticError::ThreatenedPopulation { .. } => ErrorKind::ThreatenedPopulation,
            GeneticError::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns the message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            GeneticError::InsufficientPopulation { message, .. }
            | GeneticError::InsufficientTraits { message, .. }
            | GeneticError::UnableToReproduce { message, .. }
            | GeneticError::ThreatenedPopulation { message, .. } => message.as_deref(),
            GeneticError::Custom(message) => Some(message),
        }
    }

    /// Returns the chromosomes of the members involved in the failure.
    pub fn members(&self) -> &[Chromosome] {
        match self {
            GeneticError::InsufficientPopulation { members, .. }
            | GeneticError::InsufficientTraits { members, .. }
            | GeneticError::UnableToReproduce { members, .. }
            | GeneticError::ThreatenedPopulation { members, .. } => members,
            GeneticError::Custom(_) => &[],
        }
    }

    fn members_slot(&mut self) -> Option<&mut Vec<Chromosome>> {
        match self {
            GeneticError::InsufficientPopulation { members, .. }
            | GeneticError::InsufficientTraits { members, .. }
            | GeneticError::UnableToReproduce { members, .. }
            | GeneticError::ThreatenedPopulation { members, .. } => Some(members),
            GeneticError::Custom(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Trait;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            GeneticError::insufficient_population("x").kind(),
            ErrorKind::InsufficientPopulation
        );
        assert_eq!(
            GeneticError::insufficient_traits("x").kind(),
            ErrorKind::InsufficientTraits
        );
        assert_eq!(
            GeneticError::unable_to_reproduce("x").kind(),
            ErrorKind::UnableToReproduce
        );
        assert_eq!(
            GeneticError::threatened_population("x").kind(),
            ErrorKind::ThreatenedPopulation
        );
        assert_eq!(GeneticError::custom("x").kind(), ErrorKind::Custom);
    }

    #[test]
    fn test_display() {
        let err = GeneticError::unable_to_reproduce("lengths differ: 3 vs 6");
        assert_eq!(err.to_string(), "unable to reproduce: lengths differ: 3 vs 6");

        let bare = GeneticError::InsufficientTraits {
            message: None,
            members: vec![],
        };
        assert_eq!(bare.to_string(), "insufficient traits: chromosome too short");

        assert_eq!(GeneticError::custom("boom").to_string(), "boom");
    }

    #[test]
    fn test_with_members() {
        let a = vec![Trait::from(1), Trait::from(0)];
        let b = vec![Trait::from(0)];
        let err = GeneticError::unable_to_reproduce("mismatch")
            .with_members([a.clone(), b.clone()]);
        assert_eq!(err.members(), &[a.clone(), b]);
        assert_eq!(err.message(), Some("mismatch"));

        let custom = GeneticError::custom("c").with_members([a]);
        assert!(custom.members().is_empty());
    }
}
