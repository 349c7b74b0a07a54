//! Predator-prey world simulation.
//!
//! This crate implements the bounded grid where foxes and rabbits live,
//! breed, hunt and die, and the driver that steps them.

pub mod actor;
pub mod animal;
pub mod field;
pub mod population;
pub mod simulation;

pub use actor::{Actor, Environment};
pub use animal::{Animal, DeathCause};
pub use field::{Field, Occupant};
pub use population::Population;
pub use simulation::{Simulation, SimulationResult, StopReason};
