//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Field dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of rows
    pub depth: i32,
    /// Number of columns
    pub width: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            depth: 80,
            width: 120,
        }
    }
}

impl FieldConfig {
    /// Cell count, or `None` when it does not fit the `i32` grid indices
    pub fn checked_cell_count(&self) -> Option<i32> {
        self.depth.checked_mul(self.width)
    }

    pub fn cell_count(&self) -> usize {
        (self.depth.max(0) as usize) * (self.width.max(0) as usize)
    }
}

/// Initial population seeded into the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub foxes: usize,
    pub rabbits: usize,
}

impl PopulationConfig {
    /// Animals to seed, or `None` when the counts overflow
    pub fn total(&self) -> Option<usize> {
        self.foxes.checked_add(self.rabbits)
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        // 2% foxes and 8% rabbits on the default 80x120 field
        Self {
            foxes: 192,
            rabbits: 768,
        }
    }
}

/// Top-level simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub field: FieldConfig,
    pub population: PopulationConfig,
    /// Number of steps to run
    pub num_steps: u64,
    /// Random seed for reproducibility; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Steps between census log lines (0 disables them)
    pub report_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            population: PopulationConfig::default(),
            num_steps: 500,
            seed: None,
            report_interval: 50,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded simulation configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field.depth <= 0 || self.field.width <= 0 {
            return Err(Error::InvalidConfig(format!(
                "field dimensions must be positive, got {}x{}",
                self.field.depth, self.field.width
            )));
        }

        if self.field.checked_cell_count().is_none() {
            return Err(Error::InvalidConfig(format!(
                "field of {}x{} cells is too large",
                self.field.depth, self.field.width
            )));
        }

        let requested = self.population.total().ok_or_else(|| {
            Error::InvalidConfig(format!(
                "population of {} foxes and {} rabbits is too large",
                self.population.foxes, self.population.rabbits
            ))
        })?;
        let available = self.field.cell_count();
        if requested > available {
            return Err(Error::InsufficientSpace {
                requested,
                available,
            });
        }

        Ok(())
    }
}
