//! Constructive builder configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the [`ConstructiveBuilder`](super::ConstructiveBuilder).
///
/// # Examples
///
/// ```
/// use u_timetable::construct::BuilderConfig;
///
/// let config = BuilderConfig::default().with_max_restarts(10);
/// assert_eq!(config.max_restarts, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuilderConfig {
    /// Number of grid wipes allowed after a deadlock before the builder
    /// gives up and returns its best partial schedule.
    ///
    /// 0 returns the first deadlocked partial schedule as is.
    pub max_restarts: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { max_restarts: 100 }
    }
}

impl BuilderConfig {
    /// Sets the restart cap.
    pub fn with_max_restarts(mut self, n: usize) -> Self {
        self.max_restarts = n;
        self
    }

    /// Validates the configuration.
    ///
    /// Every restart cap is valid; the method exists so that enclosing
    /// configurations can validate uniformly.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.max_restarts, 100);
        assert!(config.validate().is_ok());
    }
}
