//! Numeric settings for a single run.

use crate::grid::Grid;
use crate::types::{TurmiteError, DEFAULT_GRID_SIZE, DEFAULT_SCALE, DEFAULT_STEPS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Edge length of the square grid.
    pub size: usize,
    /// Number of steps to simulate.
    pub steps: usize,
    /// Pixels per cell in the rendered image.
    pub scale: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            steps: DEFAULT_STEPS,
            scale: DEFAULT_SCALE,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), TurmiteError> {
        if self.size == 0 {
            return Err(TurmiteError::ValidationError(
                "Grid size must be at least 1".to_string(),
            ));
        }
        if self.scale == 0 {
            return Err(TurmiteError::ValidationError(
                "Scale must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// A fresh background grid of the configured size.
    pub fn new_grid(&self) -> Result<Grid, TurmiteError> {
        self.validate()?;
        Grid::new(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.size, 100);
        assert_eq!(config.steps, 100_000);
        assert_eq!(config.scale, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = RunConfig {
            size: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.new_grid().is_err());

        let config = RunConfig {
            scale: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_new_grid() {
        let config = RunConfig {
            size: 7,
            steps: 10,
            scale: 1,
        };
        assert_eq!(config.new_grid().unwrap().size(), 7);
    }
}
