use crate::error::FlockError;
use crate::lattice::{Dimension, Heading, Lattice};
use glam::{IVec3, UVec3};
use rand::Rng;
use rand::seq::SliceRandom;

// --- Helper Functions ---

/// How many of each occupant to scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    pub fish: usize,
    pub predators: usize,
    pub obstacles: usize,
}

impl Population {
    pub fn total(&self) -> usize {
        self.fish + self.predators + self.obstacles
    }
}

// scatter: distinct random cells for every occupant, random fish headings
pub fn scatter<R: Rng + ?Sized>(
    dimension: Dimension,
    extent: UVec3,
    population: Population,
    rng: &mut R,
) -> Result<Lattice, FlockError> {
    let empty = Lattice::new(dimension, extent)?;
    if population.total() > empty.len() {
        return Err(FlockError::InvalidConfig("population does not fit the lattice"));
    }

    let all_cells: Vec<IVec3> = empty.iter().map(|(coord, _)| coord).collect();
    let mut picked: Vec<IVec3> = all_cells
        .choose_multiple(rng, population.total())
        .copied()
        .collect();
    // choose_multiple does not promise a random order.
    picked.shuffle(rng);

    let heading_count = dimension.headings().len() as u8;
    let (fish, rest) = picked.split_at(population.fish);
    let (predators, obstacles) = rest.split_at(population.predators);
    let agents: Vec<(IVec3, Heading)> = fish
        .iter()
        .map(|&coord| (coord, Heading::new(rng.gen_range(0..heading_count))))
        .collect();

    Lattice::with_occupants(dimension, extent, &agents, predators, obstacles)
}
