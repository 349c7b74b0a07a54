//! Ownership of every animal, keyed by handle.

use crate::actor::{Actor, Environment};
use crate::animal::Animal;
use crate::field::Field;
use preysim_core::{AnimalId, Location, Species};
use rand::{Rng, RngCore};
use std::collections::HashMap;

/// The animals of one simulation. The field only refers to them by id.
#[derive(Debug, Default)]
pub struct Population {
    animals: HashMap<AnimalId, Animal>,
    next_id: u64,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> AnimalId {
        let id = AnimalId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a newborn at `location`
    pub fn spawn(&mut self, species: Species, field: &mut Field, location: Location) -> AnimalId {
        let id = self.allocate_id();
        self.animals
            .insert(id, Animal::new(id, species, field, location));
        id
    }

    /// Add an animal with randomized age for world seeding
    pub fn spawn_seeded<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        field: &mut Field,
        location: Location,
        rng: &mut R,
    ) -> AnimalId {
        let id = self.allocate_id();
        self.animals
            .insert(id, Animal::with_random_age(id, species, field, location, rng));
        id
    }

    pub fn get(&self, id: AnimalId) -> Option<&Animal> {
        self.animals.get(&id)
    }

    pub fn get_mut(&mut self, id: AnimalId) -> Option<&mut Animal> {
        self.animals.get_mut(&id)
    }

    /// Take an animal out, either for good or while it acts; in the
    /// latter case hand it back with [`Population::restore`]
    pub fn remove(&mut self, id: AnimalId) -> Option<Animal> {
        self.animals.remove(&id)
    }

    pub fn restore(&mut self, animal: Animal) {
        self.animals.insert(animal.id(), animal);
    }

    /// Let one animal act if it is still active.
    ///
    /// Returns whether the animal acted.
    pub fn act_one(
        &mut self,
        id: AnimalId,
        field: &mut Field,
        rng: &mut dyn RngCore,
        new_actors: &mut Vec<AnimalId>,
    ) -> bool {
        let Some(mut animal) = self.remove(id) else {
            return false;
        };

        let active = animal.is_active();
        if active {
            let mut env = Environment {
                field,
                population: self,
                rng,
            };
            animal.act(&mut env, new_actors);
        }

        self.restore(animal);
        active
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animal> + '_ {
        self.animals.values()
    }

    /// Drop every animal. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        self.animals.clear();
    }
}
