//! DP solver configuration.

use crate::model::ProblemInstance;

/// Configuration for the DP solver.
///
/// ```
/// use u_knapsack::dp::DpConfig;
///
/// let config = DpConfig::default();
/// assert_eq!(config.max_cells, 100_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpConfig {
    /// Largest `n × capacity` state space the solver accepts.
    pub max_cells: u64,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            max_cells: 100_000_000,
        }
    }
}

impl DpConfig {
    /// Sets the state-space threshold.
    pub fn with_max_cells(mut self, cells: u64) -> Self {
        self.max_cells = cells;
        self
    }

    /// Whether the instance's state space is within the threshold.
    pub fn is_applicable(&self, instance: &ProblemInstance) -> bool {
        instance.state_space() <= self.max_cells
            && usize::try_from(instance.capacity()).is_ok_and(|c| c < usize::MAX)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cells == 0 {
            return Err("max_cells must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicability_threshold() {
        let inst = ProblemInstance::load(1000, &[(1, 1); 10]).unwrap();
        assert!(DpConfig::default().with_max_cells(10_000).is_applicable(&inst));
        assert!(!DpConfig::default().with_max_cells(9_999).is_applicable(&inst));
    }

    #[test]
    fn test_validate() {
        assert!(DpConfig::default().validate().is_ok());
        assert!(DpConfig::default().with_max_cells(0).validate().is_err());
    }
}
