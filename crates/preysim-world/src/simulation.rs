//! Simulation driver: seeding, stepping and run bookkeeping.

use crate::field::Field;
use crate::population::Population;
use preysim_core::{AnimalId, Error, Location, PopulationCounts, Result, SimulationConfig, Species};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, event, info, instrument, Level};

pub struct Simulation {
    field: Field,
    population: Population,
    /// Animals that act next step, in acting order
    active: Vec<AnimalId>,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    step: u64,
    history: Vec<PopulationCounts>,
}

impl Simulation {
    /// Build a simulation and seed the field with the configured population
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut sim = Self {
            field: Field::from_config(&config.field),
            population: Population::new(),
            active: Vec::new(),
            config,
            rng,
            step: 0,
            history: Vec::new(),
        };
        sim.populate()?;

        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Ids of the animals that will act next step, in order
    pub fn active(&self) -> &[AnimalId] {
        &self.active
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn census(&self) -> PopulationCounts {
        self.field.census()
    }

    /// Counts recorded at step 0 and after every step since
    pub fn history(&self) -> &[PopulationCounts] {
        &self.history
    }

    pub fn is_viable(&self) -> bool {
        self.census().is_viable()
    }

    /// Place a newborn by hand on a free cell.
    ///
    /// It joins the active population right away and acts next step.
    pub fn add_animal(&mut self, species: Species, location: Location) -> Result<AnimalId> {
        if !self.field.contains(location) {
            return Err(Error::InvalidConfig(format!(
                "location {} is outside the {}x{} field",
                location, self.field.depth, self.field.width
            )));
        }
        if self.field.object_at(location).is_some() {
            return Err(Error::InvalidConfig(format!(
                "location {} is already occupied",
                location
            )));
        }

        let id = self.population.spawn(species, &mut self.field, location);
        self.active.push(id);
        Ok(id)
    }

    /// Empty the field and reseed it from the configuration
    pub fn reset(&mut self) -> Result<()> {
        self.field.clear_all();
        self.population.clear();
        self.active.clear();
        self.history.clear();
        self.step = 0;
        self.populate()
    }

    /// Seed foxes and rabbits at random free cells with randomized ages
    fn populate(&mut self) -> Result<()> {
        let mut free: Vec<Location> = self
            .field
            .locations()
            .filter(|loc| self.field.object_at(*loc).is_none())
            .collect();

        let foxes = self.config.population.foxes;
        let rabbits = self.config.population.rabbits;
        let requested = self.config.population.total().ok_or_else(|| {
            Error::InvalidConfig(format!(
                "population of {} foxes and {} rabbits is too large",
                foxes, rabbits
            ))
        })?;
        if requested > free.len() {
            return Err(Error::InsufficientSpace {
                requested,
                available: free.len(),
            });
        }

        free.shuffle(&mut self.rng);

        let species = std::iter::repeat(Species::Fox)
            .take(foxes)
            .chain(std::iter::repeat(Species::Rabbit).take(rabbits));

        for (species, location) in species.zip(free) {
            let id = self
                .population
                .spawn_seeded(species, &mut self.field, location, &mut self.rng);
            self.active.push(id);
        }

        let counts = self.census();
        self.history.push(counts);
        debug!(
            foxes = counts.foxes,
            rabbits = counts.rabbits,
            depth = self.field.depth,
            width = self.field.width,
            "Seeded field"
        );

        Ok(())
    }

    /// Run the configured number of steps, stopping early once only one
    /// species (or none) is left
    #[instrument(skip(self), fields(num_steps = self.config.num_steps))]
    pub fn run(&mut self) -> SimulationResult {
        self.run_for(self.config.num_steps)
    }

    pub fn run_for(&mut self, num_steps: u64) -> SimulationResult {
        info!(
            "Starting simulation for {} steps on a {}x{} field",
            num_steps, self.field.depth, self.field.width
        );

        let mut stop_reason = StopReason::Completed;

        for _ in 0..num_steps {
            if !self.is_viable() {
                stop_reason = StopReason::Extinction;
                break;
            }

            let counts = self.step();

            let interval = self.config.report_interval;
            if interval > 0 && self.step % interval == 0 {
                self.emit_census(counts);
            }
        }

        let final_counts = self.census();
        info!(
            event = "run_complete",
            final_step = self.step,
            stop_reason = ?stop_reason,
            foxes = final_counts.foxes,
            rabbits = final_counts.rabbits,
            "Simulation finished"
        );

        self.collect_results(stop_reason)
    }

    /// Execute one simulation step.
    ///
    /// Every animal active at the start of the step acts once, in order.
    /// Newborns are held back until the sweep is over, then dead animals
    /// are dropped.
    pub fn step(&mut self) -> PopulationCounts {
        let mut newborns = Vec::new();

        for &id in &self.active {
            self.population
                .act_one(id, &mut self.field, &mut self.rng, &mut newborns);
        }

        self.active.extend(newborns);

        let population = &mut self.population;
        self.active.retain(|id| {
            let alive = population.get(*id).is_some_and(|animal| animal.is_alive());
            if !alive {
                population.remove(*id);
            }
            alive
        });

        self.step += 1;
        let counts = self.census();
        self.history.push(counts);
        counts
    }

    fn emit_census(&self, counts: PopulationCounts) {
        info!(
            event = "population_census",
            step = self.step,
            foxes = counts.foxes,
            rabbits = counts.rabbits,
            total = counts.total(),
            "Population census"
        );

        event!(
            Level::INFO,
            gauge_name = "population_foxes",
            gauge_value = counts.foxes,
            step = self.step,
            "Fox population gauge"
        );

        event!(
            Level::INFO,
            gauge_name = "population_rabbits",
            gauge_value = counts.rabbits,
            step = self.step,
            "Rabbit population gauge"
        );
    }

    fn collect_results(&self, stop_reason: StopReason) -> SimulationResult {
        SimulationResult {
            final_step: self.step,
            stop_reason,
            final_counts: self.census(),
            history: self.history.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Ran every requested step
    Completed,
    /// Fewer than two species were left
    Extinction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub final_step: u64,
    pub stop_reason: StopReason,
    pub final_counts: PopulationCounts,
    pub history: Vec<PopulationCounts>,
}
