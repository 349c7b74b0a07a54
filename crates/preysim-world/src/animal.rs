//! Animal state and the shared lifecycle of every species.

use crate::actor::{Actor, Environment};
use crate::field::{Field, Occupant};
use preysim_core::{AnimalId, Location, Species, SpeciesParams};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Why an animal left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Overcrowding,
    Eaten,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeathCause::OldAge => "old_age",
            DeathCause::Starvation => "starvation",
            DeathCause::Overcrowding => "overcrowding",
            DeathCause::Eaten => "eaten",
        };
        f.write_str(name)
    }
}

/// An animal in the simulation.
///
/// A live animal always occupies exactly one field cell and that cell
/// records this animal. A dead animal has no location and is never
/// placed again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    id: AnimalId,
    species: Species,
    age: u32,
    alive: bool,
    location: Option<Location>,
    food_level: Option<i32>,
    cause_of_death: Option<DeathCause>,
}

impl Animal {
    /// Create a newborn (age zero, not hungry) and place it on the field
    pub fn new(id: AnimalId, species: Species, field: &mut Field, location: Location) -> Self {
        let mut animal = Self {
            id,
            species,
            age: 0,
            alive: true,
            location: None,
            food_level: species.params().diet.map(|diet| diet.food_value),
            cause_of_death: None,
        };
        animal.set_location(field, location);
        animal
    }

    /// Create an animal for world seeding with a random age and, for
    /// predators, a random food level
    pub fn with_random_age<R: Rng + ?Sized>(
        id: AnimalId,
        species: Species,
        field: &mut Field,
        location: Location,
        rng: &mut R,
    ) -> Self {
        let mut animal = Self::new(id, species, field, location);
        let params = species.params();
        animal.age = rng.gen_range(0..params.max_age);
        animal.food_level = params.diet.map(|diet| rng.gen_range(0..diet.food_value));
        animal
    }

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn params(&self) -> &'static SpeciesParams {
        self.species.params()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Steps left before starving; `None` for species that do not eat
    pub fn food_level(&self) -> Option<i32> {
        self.food_level
    }

    /// Has no effect on species that do not eat
    pub fn set_food_level(&mut self, level: i32) {
        if self.food_level.is_some() {
            self.food_level = Some(level);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn cause_of_death(&self) -> Option<DeathCause> {
        self.cause_of_death
    }

    fn occupant(&self) -> Occupant {
        Occupant {
            id: self.id,
            species: self.species,
        }
    }

    /// Move to `new_location`, vacating the current cell first
    pub fn set_location(&mut self, field: &mut Field, new_location: Location) {
        if let Some(old) = self.location {
            field.clear(old);
        }
        self.location = Some(new_location);
        field.place(self.occupant(), new_location);
    }

    /// Mark the animal dead and vacate its cell
    pub fn set_dead(&mut self, field: &mut Field, cause: DeathCause) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.cause_of_death = Some(cause);

        if let Some(location) = self.location.take() {
            field.clear(location);
        }

        trace!(
            animal_id = %self.id,
            species = %self.species,
            age = self.age,
            cause = %cause,
            "Animal died"
        );
    }

    /// Grow one step older; past the species' max age the animal dies
    pub fn increment_age(&mut self, field: &mut Field) {
        self.age += 1;
        if self.age > self.params().max_age {
            self.set_dead(field, DeathCause::OldAge);
        }
    }

    /// Burn one step of food; an empty stomach kills
    pub fn increment_hunger(&mut self, field: &mut Field) {
        let Some(level) = self.food_level.as_mut() else {
            return;
        };
        *level -= 1;
        if *level <= 0 {
            self.set_dead(field, DeathCause::Starvation);
        }
    }

    pub fn can_breed(&self) -> bool {
        self.age >= self.params().breeding_age
    }

    /// Number of births this step (may be zero).
    ///
    /// The breeding draw is only taken for animals old enough to breed.
    pub fn breed<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let params = self.params();
        if self.can_breed() && rng.gen::<f64>() <= params.breeding_probability {
            rng.gen_range(1..=params.max_litter_size)
        } else {
            0
        }
    }

    /// Place newborns of the same species into free adjacent cells.
    ///
    /// Births beyond the number of free cells are lost.
    pub fn give_birth(&self, env: &mut Environment<'_>, new_actors: &mut Vec<AnimalId>) {
        let Some(location) = self.location else {
            return;
        };

        let free = env.field.free_adjacent_locations(location, &mut *env.rng);
        let births = self.breed(&mut *env.rng) as usize;

        for birth_location in free.into_iter().take(births) {
            let young = env.population.spawn(self.species, env.field, birth_location);
            new_actors.push(young);

            debug!(
                parent_id = %self.id,
                offspring_id = %young,
                species = %self.species,
                row = birth_location.row,
                col = birth_location.col,
                "Animal born"
            );
        }
    }

    /// Eat the first live prey found next to us.
    ///
    /// Returns where the meal was, or `None` when nothing was eaten or the
    /// species does not hunt.
    pub fn find_food(&mut self, env: &mut Environment<'_>) -> Option<Location> {
        let diet = self.params().diet?;
        let location = self.location?;

        for candidate in env.field.adjacent_locations(location, &mut *env.rng) {
            let Some(occupant) = env.field.object_at(candidate) else {
                continue;
            };
            if occupant.species != diet.prey {
                continue;
            }

            if let Some(prey) = env.population.get_mut(occupant.id) {
                if prey.is_active() {
                    prey.set_dead(env.field, DeathCause::Eaten);
                    self.food_level = Some(diet.food_value);
                    return Some(candidate);
                }
            }
        }

        None
    }

    fn free_location(&self, field: &Field, rng: &mut dyn RngCore) -> Option<Location> {
        self.location
            .and_then(|location| field.free_adjacent_location(location, rng))
    }
}

impl Actor for Animal {
    fn act(&mut self, env: &mut Environment<'_>, new_actors: &mut Vec<AnimalId>) {
        self.increment_age(env.field);
        if self.alive {
            self.increment_hunger(env.field);
        }
        if !self.alive {
            return;
        }

        self.give_birth(env, new_actors);

        let destination = match self.find_food(env) {
            Some(meal) => Some(meal),
            None => self.free_location(env.field, &mut *env.rng),
        };

        match destination {
            Some(location) => self.set_location(env.field, location),
            None => self.set_dead(env.field, DeathCause::Overcrowding),
        }
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}
