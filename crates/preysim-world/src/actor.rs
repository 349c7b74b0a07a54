//! The per-step actor contract.

use crate::field::Field;
use crate::population::Population;
use preysim_core::AnimalId;
use rand::RngCore;

/// Everything an actor may touch while it acts.
///
/// The driver builds one of these per `act` call. The acting animal is
/// held outside `population` for the duration of the call.
pub struct Environment<'a> {
    pub field: &'a mut Field,
    pub population: &'a mut Population,
    pub rng: &'a mut dyn RngCore,
}

/// Anything that takes part in a simulation step
pub trait Actor {
    /// Do whatever this actor does in one step. Actors created during the
    /// step are recorded in `new_actors` and must not act until the next one.
    fn act(&mut self, env: &mut Environment<'_>, new_actors: &mut Vec<AnimalId>);

    /// Whether the actor should stay in the active population
    fn is_active(&self) -> bool;
}
