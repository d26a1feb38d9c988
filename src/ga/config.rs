//! Environment configuration.
//!
//! [`EnvironmentConfig`] holds the parameters an [`Environment`](super::Environment)
//! needs before its first generation. Operator parameters live on the
//! operators themselves.

/// Default number of individuals created by [`Environment::random`](super::Environment::random).
pub const DEFAULT_POPULATION_SIZE: usize = 1000;

/// Configuration for an evolutionary run.
///
/// # Defaults
///
/// ```
/// use u_genetics::ga::EnvironmentConfig;
///
/// let config = EnvironmentConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert!(config.seed.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetics::ga::EnvironmentConfig;
///
/// let config = EnvironmentConfig::default()
///     .with_population_size(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentConfig {
    /// Number of individuals generated for a random initial population.
    ///
    /// Ignored when the population is supplied directly.
    pub population_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            seed: None,
        }
    }
}

impl EnvironmentConfig {
    /// Sets the initial population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.population_size, 1000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EnvironmentConfig::default()
            .with_population_size(64)
            .with_seed(7);
        assert_eq!(config.population_size, 64);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_empty_population() {
        let config = EnvironmentConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let config = EnvironmentConfig::default().with_seed(3);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: EnvironmentConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }
}
