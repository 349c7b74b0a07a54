//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle for an animal in the population.
///
/// The field stores handles rather than owning the animals, so the same
/// id can be looked up in the driver's population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimalId(pub u64);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cell address in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Chebyshev distance: 1 for every one of the eight neighbours
    pub fn chebyshev_distance(&self, other: &Location) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Species tag carried by every animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Rabbit,
    Fox,
}

impl Species {
    pub fn all() -> [Species; 2] {
        [Species::Rabbit, Species::Fox]
    }

    /// Fixed parameters for this species
    pub fn params(&self) -> &'static SpeciesParams {
        match self {
            Species::Rabbit => &RABBIT,
            Species::Fox => &FOX,
        }
    }

    /// Single-character glyph used when rendering a field
    pub fn glyph(&self) -> char {
        match self {
            Species::Rabbit => 'R',
            Species::Fox => 'F',
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Rabbit => write!(f, "rabbit"),
            Species::Fox => write!(f, "fox"),
        }
    }
}

/// What a predator eats and how long one meal lasts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diet {
    /// The species this predator hunts
    pub prey: Species,
    /// Steps a predator can go on one meal
    pub food_value: i32,
}

/// Per-species constants governing reproduction and mortality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParams {
    /// Age at which breeding becomes possible
    pub breeding_age: u32,
    /// Oldest age an animal can survive
    pub max_age: u32,
    /// Chance of breeding in a step once old enough
    pub breeding_probability: f64,
    /// Upper bound on births in a single litter
    pub max_litter_size: u32,
    /// Present for predators only
    pub diet: Option<Diet>,
}

pub const RABBIT: SpeciesParams = SpeciesParams {
    breeding_age: 5,
    max_age: 40,
    breeding_probability: 0.12,
    max_litter_size: 4,
    diet: None,
};

pub const FOX: SpeciesParams = SpeciesParams {
    breeding_age: 15,
    max_age: 150,
    breeding_probability: 0.08,
    max_litter_size: 2,
    diet: Some(Diet {
        prey: Species::Rabbit,
        food_value: 9,
    }),
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_location_equality_and_hash() {
        let a = Location::new(3, 4);
        let b = Location::new(3, 4);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&Location::new(4, 3)));
    }

    #[test]
    fn test_location_offset() {
        let loc = Location::new(5, 5);
        assert_eq!(loc.offset(-1, 1), Location::new(4, 6));
        assert_eq!(loc.chebyshev_distance(&Location::new(6, 4)), 1);
        assert_eq!(loc.chebyshev_distance(&Location::new(8, 5)), 3);
    }

    #[test]
    fn test_species_params() {
        assert!(Species::Rabbit.params().diet.is_none());

        let diet = Species::Fox.params().diet.unwrap();
        assert_eq!(diet.prey, Species::Rabbit);
        assert_eq!(diet.food_value, 9);

        for species in Species::all() {
            let params = species.params();
            assert!(params.breeding_age < params.max_age);
            assert!(params.max_litter_size >= 1);
            assert!((0.0..=1.0).contains(&params.breeding_probability));
        }
    }

    #[test]
    fn test_species_display() {
        assert_eq!(Species::Fox.to_string(), "fox");
        assert_eq!(Species::Rabbit.glyph(), 'R');
        assert_eq!(AnimalId(7).to_string(), "#7");
    }
}
