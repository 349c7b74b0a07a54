//! Bounded 2D occupancy grid.

use preysim_core::{AnimalId, FieldConfig, Location, PopulationCounts, Species};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the field records for an occupied cell.
///
/// The field does not own animals; it holds the handle of the animal in
/// the population plus its species tag for read-only reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: AnimalId,
    pub species: Species,
}

/// A fixed-size, non-wrapping grid of `depth x width` cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub depth: i32,
    pub width: i32,
    cells: Vec<Option<Occupant>>,
}

impl Field {
    pub fn new(depth: i32, width: i32) -> Self {
        let size = depth.max(0) as usize * width.max(0) as usize;
        Self {
            depth,
            width,
            cells: vec![None; size],
        }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(config.depth, config.width)
    }

    /// Whether the location lies inside the grid
    pub fn contains(&self, location: Location) -> bool {
        (0..self.depth).contains(&location.row) && (0..self.width).contains(&location.col)
    }

    /// Record `occupant` at `location`.
    ///
    /// Any previous occupant record is overwritten. Callers clear a cell
    /// before reusing it; placing onto an occupied cell is a caller bug.
    pub fn place(&mut self, occupant: Occupant, location: Location) {
        debug_assert!(self.contains(location), "place out of bounds: {}", location);
        let index = self.location_to_index(location);
        self.cells[index] = Some(occupant);
    }

    /// Remove any occupant record. Clearing an empty cell is a no-op.
    pub fn clear(&mut self, location: Location) {
        if self.contains(location) {
            let index = self.location_to_index(location);
            self.cells[index] = None;
        }
    }

    /// Empty every cell
    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn object_at(&self, location: Location) -> Option<Occupant> {
        if !self.contains(location) {
            return None;
        }
        self.cells[self.location_to_index(location)]
    }

    /// The in-bounds neighbours of `location`, excluding the location itself.
    ///
    /// The order is shuffled on every call so that movement and birth
    /// placement carry no directional bias.
    pub fn adjacent_locations<R: Rng + ?Sized>(&self, location: Location, rng: &mut R) -> Vec<Location> {
        let mut locations = Vec::with_capacity(8);

        for drow in -1..=1 {
            for dcol in -1..=1 {
                if drow == 0 && dcol == 0 {
                    continue;
                }

                let neighbor = location.offset(drow, dcol);
                if self.contains(neighbor) {
                    locations.push(neighbor);
                }
            }
        }

        locations.shuffle(rng);
        locations
    }

    /// Adjacent locations whose cell is empty, in shuffled order
    pub fn free_adjacent_locations<R: Rng + ?Sized>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Vec<Location> {
        self.adjacent_locations(location, rng)
            .into_iter()
            .filter(|loc| self.object_at(*loc).is_none())
            .collect()
    }

    /// First free adjacent location, if any
    pub fn free_adjacent_location<R: Rng + ?Sized>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Option<Location> {
        self.free_adjacent_locations(location, rng).into_iter().next()
    }

    fn location_to_index(&self, location: Location) -> usize {
        location.row as usize * self.width as usize + location.col as usize
    }

    /// Get location from index
    pub fn index_to_location(&self, index: usize) -> Location {
        let width = self.width as usize;
        Location::new((index / width) as i32, (index % width) as i32)
    }

    /// Iterator over all locations in row-major order
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_location(i))
    }

    /// Iterator over occupied cells
    pub fn occupants(&self) -> impl Iterator<Item = (Location, Occupant)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|occupant| (self.index_to_location(i), occupant)))
    }

    /// Per-species counts of what currently occupies the field
    pub fn census(&self) -> PopulationCounts {
        self.occupants().map(|(_, occupant)| occupant.species).collect()
    }

    /// One line per row: species glyphs for occupied cells, `.` for empty
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.depth.max(0) as usize);

        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.width as usize == 0 {
                out.push('\n');
            }
            out.push(cell.map_or('.', |occupant| occupant.species.glyph()));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn rabbit(id: u64) -> Occupant {
        Occupant {
            id: AnimalId(id),
            species: Species::Rabbit,
        }
    }

    #[test]
    fn test_field_creation() {
        let field = Field::new(10, 12);
        assert_eq!(field.depth, 10);
        assert_eq!(field.width, 12);
        assert_eq!(field.cells.len(), 120);
        assert_eq!(field.occupants().count(), 0);
    }

    #[test]
    fn test_wide_field_indexing() {
        // 3 x 800_000 cells: row * width passes i32::MAX for the last row
        let mut field = Field::new(3, 800_000);
        let corner = Location::new(2, 799_999);

        field.place(rabbit(1), corner);
        assert_eq!(field.object_at(corner), Some(rabbit(1)));
        assert_eq!(field.index_to_location(2_399_999), corner);
    }

    #[test]
    fn test_place_and_clear() {
        let mut field = Field::new(5, 5);
        let loc = Location::new(2, 3);

        field.place(rabbit(1), loc);
        assert_eq!(field.object_at(loc), Some(rabbit(1)));

        field.clear(loc);
        assert_eq!(field.object_at(loc), None);

        // Clearing an empty cell is fine
        field.clear(loc);
        assert_eq!(field.object_at(loc), None);
    }

    #[test]
    fn test_place_overwrites() {
        let mut field = Field::new(3, 3);
        let loc = Location::new(1, 1);
        field.place(rabbit(1), loc);
        field.place(rabbit(2), loc);
        assert_eq!(field.object_at(loc).map(|o| o.id), Some(AnimalId(2)));
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let field = Field::new(3, 3);
        assert_eq!(field.object_at(Location::new(-1, 0)), None);
        assert_eq!(field.object_at(Location::new(0, 3)), None);
        assert!(!field.contains(Location::new(3, 0)));
    }

    #[test]
    fn test_adjacent_counts() {
        let field = Field::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(field.adjacent_locations(Location::new(5, 5), &mut rng).len(), 8);
        assert_eq!(field.adjacent_locations(Location::new(0, 0), &mut rng).len(), 3);
        assert_eq!(field.adjacent_locations(Location::new(0, 5), &mut rng).len(), 5);
        assert_eq!(field.adjacent_locations(Location::new(9, 9), &mut rng).len(), 3);

        let single = Field::new(1, 1);
        assert!(single.adjacent_locations(Location::new(0, 0), &mut rng).is_empty());
    }

    #[test]
    fn test_adjacent_order_is_shuffled() {
        let field = Field::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let origin = Location::new(5, 5);

        let first_choices: HashSet<Location> = (0..200)
            .map(|_| field.adjacent_locations(origin, &mut rng)[0])
            .collect();

        // Every neighbour should get a turn at the front
        assert_eq!(first_choices.len(), 8);
    }

    #[test]
    fn test_free_adjacent_locations() {
        let mut field = Field::new(3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let center = Location::new(1, 1);

        field.place(rabbit(1), Location::new(0, 0));
        field.place(rabbit(2), Location::new(2, 2));

        let free = field.free_adjacent_locations(center, &mut rng);
        assert_eq!(free.len(), 6);
        assert!(!free.contains(&Location::new(0, 0)));
        assert!(!free.contains(&Location::new(2, 2)));

        for loc in field.adjacent_locations(center, &mut rng) {
            field.place(rabbit(10), loc);
        }
        assert!(field.free_adjacent_locations(center, &mut rng).is_empty());
        assert_eq!(field.free_adjacent_location(center, &mut rng), None);
    }

    #[test]
    fn test_census_and_render() {
        let mut field = Field::new(2, 3);
        field.place(rabbit(1), Location::new(0, 1));
        field.place(
            Occupant {
                id: AnimalId(2),
                species: Species::Fox,
            },
            Location::new(1, 2),
        );

        let counts = field.census();
        assert_eq!(counts.rabbits, 1);
        assert_eq!(counts.foxes, 1);
        assert_eq!(field.render(), ".R.\n..F");

        field.clear_all();
        assert_eq!(field.census().total(), 0);
    }

    #[test]
    fn test_index_roundtrip() {
        let field = Field::new(4, 7);
        let locations: Vec<Location> = field.locations().collect();
        assert_eq!(locations.len(), 28);
        assert_eq!(locations[0], Location::new(0, 0));
        assert_eq!(locations[8], Location::new(1, 1));
        assert_eq!(field.index_to_location(27), Location::new(3, 6));
    }

    proptest! {
        #[test]
        fn adjacent_locations_stay_in_bounds(
            depth in 1i32..20,
            width in 1i32..20,
            row in 0i32..20,
            col in 0i32..20,
            seed in any::<u64>(),
        ) {
            let field = Field::new(depth, width);
            let origin = Location::new(row % depth, col % width);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let adjacent = field.adjacent_locations(origin, &mut rng);
            let unique: HashSet<Location> = adjacent.iter().copied().collect();

            prop_assert_eq!(unique.len(), adjacent.len());
            prop_assert!(adjacent.len() <= 8);
            for loc in adjacent {
                prop_assert!(field.contains(loc));
                prop_assert_ne!(loc, origin);
                prop_assert_eq!(loc.chebyshev_distance(&origin), 1);
            }
        }
    }
}
