//! Population census used by the reporting side.

use crate::Species;
use serde::{Deserialize, Serialize};

/// Live animal counts per species at one observation point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub rabbits: usize,
    pub foxes: usize,
}

impl PopulationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, species: Species) {
        match species {
            Species::Rabbit => self.rabbits += 1,
            Species::Fox => self.foxes += 1,
        }
    }

    pub fn get(&self, species: Species) -> usize {
        match species {
            Species::Rabbit => self.rabbits,
            Species::Fox => self.foxes,
        }
    }

    pub fn total(&self) -> usize {
        self.rabbits + self.foxes
    }

    /// A run stays viable while more than one species is alive
    pub fn is_viable(&self) -> bool {
        Species::all()
            .iter()
            .filter(|species| self.get(**species) > 0)
            .count()
            > 1
    }
}

impl FromIterator<Species> for PopulationCounts {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut counts = Self::new();
        for species in iter {
            counts.increment(species);
        }
        counts
    }
}
