use preysim_core::{FieldConfig, PopulationConfig, SimulationConfig};
use preysim_world::{Simulation, StopReason};
use proptest::prelude::*;
use std::collections::HashSet;

fn config(depth: i32, width: i32, foxes: usize, rabbits: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        field: FieldConfig { depth, width },
        population: PopulationConfig { foxes, rabbits },
        num_steps: 50,
        seed: Some(seed),
        report_interval: 0,
    }
}

/// Field occupancy and the population agree in both directions
fn assert_consistent(sim: &Simulation) {
    let field = sim.field();

    for (location, occupant) in field.occupants() {
        let animal = sim
            .population()
            .get(occupant.id)
            .expect("occupant missing from population");
        assert!(animal.is_alive());
        assert_eq!(animal.location(), Some(location));
        assert_eq!(animal.species(), occupant.species);
    }

    for animal in sim.population().iter() {
        let location = animal.location().expect("live animal without a location");
        assert_eq!(field.object_at(location).map(|o| o.id), Some(animal.id()));
    }

    let active: HashSet<_> = sim.active().iter().copied().collect();
    assert_eq!(active.len(), sim.active().len());
    assert_eq!(active.len(), sim.population().len());
    assert_eq!(field.occupants().count(), sim.population().len());
}

#[test]
fn default_sized_run_stays_consistent() {
    let mut sim = Simulation::new(SimulationConfig {
        seed: Some(2024),
        report_interval: 0,
        ..Default::default()
    })
    .unwrap();

    assert_consistent(&sim);
    for _ in 0..40 {
        if !sim.is_viable() {
            break;
        }
        sim.step();
        assert_consistent(&sim);
    }
}

#[test]
fn crowded_field_runs() {
    let mut sim = Simulation::new(config(6, 6, 12, 24, 5)).unwrap();
    let result = sim.run();

    assert_consistent(&sim);
    assert!(result.final_step <= 50);
    if result.stop_reason == StopReason::Extinction {
        assert!(!result.final_counts.is_viable());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn occupancy_is_symmetric_every_step(
        depth in 1i32..15,
        width in 1i32..15,
        fox_share in 0usize..20,
        rabbit_share in 0usize..60,
        seed in any::<u64>(),
    ) {
        let cells = (depth * width) as usize;
        let foxes = cells * fox_share / 100;
        let rabbits = cells * rabbit_share / 100;

        let mut sim = Simulation::new(config(depth, width, foxes, rabbits, seed)).unwrap();
        assert_consistent(&sim);

        for _ in 0..20 {
            let before = sim.census().total();
            let counts = sim.step();
            assert_consistent(&sim);

            // Litters are bounded per parent
            prop_assert!(counts.total() <= before * 5);
            prop_assert!(counts.total() <= cells);
        }
    }
}
