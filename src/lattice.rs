// --- File: lattice.rs ---
// Toroidal occupancy grid shared by every stage of a tick. Queries expect
// coordinates already wrapped with `Lattice::wrap`; anything else is
// reported as OutOfRange rather than silently wrapped.
use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{PLANAR_HEADINGS, VOLUMETRIC_HEADINGS, VOLUMETRIC_PREDATOR_STEPS};
use crate::error::FlockError;

/// Number of participating axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    pub fn axes(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Fixed direction table that [`Heading`] indexes into.
    pub fn headings(self) -> &'static [IVec3] {
        match self {
            Dimension::Two => &PLANAR_HEADINGS,
            Dimension::Three => &VOLUMETRIC_HEADINGS,
        }
    }

    /// Offsets a predator may draw from when wandering.
    pub fn predator_steps(self) -> &'static [IVec3] {
        match self {
            Dimension::Two => &PLANAR_HEADINGS,
            Dimension::Three => &VOLUMETRIC_PREDATOR_STEPS,
        }
    }

    /// Looks up the heading whose direction vector equals `offset`.
    pub fn heading_for(self, offset: IVec3) -> Option<Heading> {
        self.headings()
            .iter()
            .position(|&direction| direction == offset)
            .map(|index| Heading(index as u8))
    }
}

/// Index into the direction table of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Heading(u8);

impl Heading {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Unit-step direction vector, or `None` if the index is outside the table.
    pub fn vector(self, dimension: Dimension) -> Option<IVec3> {
        dimension.headings().get(self.0 as usize).copied()
    }

    pub fn is_valid(self, dimension: Dimension) -> bool {
        (self.0 as usize) < dimension.headings().len()
    }
}

/// Occupant tag of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Empty,
    Agent,
    Predator,
    Obstacle,
}

/// Stored cell state. Only agents carry a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Agent(Heading),
    Predator,
    Obstacle,
}

impl Cell {
    pub fn occupant(self) -> Occupant {
        match self {
            Cell::Empty => Occupant::Empty,
            Cell::Agent(_) => Occupant::Agent,
            Cell::Predator => Occupant::Predator,
            Cell::Obstacle => Occupant::Obstacle,
        }
    }

    pub fn heading(self) -> Option<Heading> {
        match self {
            Cell::Agent(heading) => Some(heading),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Occupant counts of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Census {
    pub agents: usize,
    pub predators: usize,
    pub obstacles: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.agents + self.predators + self.obstacles
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    dimension: Dimension,
    extent: UVec3,
    cells: Vec<Cell>,
}

impl Lattice {
    /// Creates an empty lattice. In 2D the z extent must be 1.
    pub fn new(dimension: Dimension, extent: UVec3) -> Result<Self, FlockError> {
        if extent.x == 0 || extent.y == 0 || extent.z == 0 {
            return Err(FlockError::InvalidConfig("lattice extent must be non-zero"));
        }
        if dimension == Dimension::Two && extent.z != 1 {
            return Err(FlockError::InvalidConfig("planar lattice must have z extent 1"));
        }
        let len = extent.x as usize * extent.y as usize * extent.z as usize;
        Ok(Self {
            dimension,
            extent,
            cells: vec![Cell::Empty; len],
        })
    }

    /// Builds a populated lattice, rejecting overlapping placements.
    pub fn with_occupants(
        dimension: Dimension,
        extent: UVec3,
        agents: &[(IVec3, Heading)],
        predators: &[IVec3],
        obstacles: &[IVec3],
    ) -> Result<Self, FlockError> {
        let mut lattice = Self::new(dimension, extent)?;
        let placements = agents
            .iter()
            .map(|&(coord, heading)| (coord, Cell::Agent(heading)))
            .chain(predators.iter().map(|&coord| (coord, Cell::Predator)))
            .chain(obstacles.iter().map(|&coord| (coord, Cell::Obstacle)));
        for (coord, cell) in placements {
            if !lattice.cell_at(coord)?.is_empty() {
                return Err(FlockError::CellOccupied { coord });
            }
            lattice.set(coord, cell)?;
        }
        Ok(lattice)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn extent(&self) -> UVec3 {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: IVec3) -> bool {
        coord.cmpge(IVec3::ZERO).all() && coord.cmplt(self.extent.as_ivec3()).all()
    }

    /// Per-axis modulo onto the torus.
    pub fn wrap(&self, coord: IVec3) -> IVec3 {
        let extent = self.extent.as_ivec3();
        IVec3::new(
            coord.x.rem_euclid(extent.x),
            coord.y.rem_euclid(extent.y),
            coord.z.rem_euclid(extent.z),
        )
    }

    #[inline]
    fn index_of(&self, coord: IVec3) -> Result<usize, FlockError> {
        if !self.contains(coord) {
            return Err(FlockError::OutOfRange {
                coord,
                extent: self.extent,
            });
        }
        let width = self.extent.x as usize;
        let plane = width * self.extent.y as usize;
        Ok(coord.x as usize + coord.y as usize * width + coord.z as usize * plane)
    }

    #[inline]
    fn coord_of(&self, index: usize) -> IVec3 {
        let width = self.extent.x as usize;
        let plane = width * self.extent.y as usize;
        IVec3::new(
            (index % width) as i32,
            ((index % plane) / width) as i32,
            (index / plane) as i32,
        )
    }

    pub fn cell_at(&self, coord: IVec3) -> Result<Cell, FlockError> {
        self.index_of(coord).map(|index| self.cells[index])
    }

    pub fn occupant_at(&self, coord: IVec3) -> Result<Occupant, FlockError> {
        self.cell_at(coord).map(Cell::occupant)
    }

    /// `Ok(None)` for any cell that does not hold an agent.
    pub fn heading_at(&self, coord: IVec3) -> Result<Option<Heading>, FlockError> {
        self.cell_at(coord).map(Cell::heading)
    }

    /// Wraps first, so it cannot fail. Used by neighbor and movement arithmetic.
    #[inline]
    pub(crate) fn cell_wrapping(&self, coord: IVec3) -> Cell {
        let wrapped = self.wrap(coord);
        let width = self.extent.x as usize;
        let plane = width * self.extent.y as usize;
        self.cells[wrapped.x as usize + wrapped.y as usize * width + wrapped.z as usize * plane]
    }

    /// Overwrites one cell. Global invariants are the engine's concern.
    pub fn set(&mut self, coord: IVec3, cell: Cell) -> Result<(), FlockError> {
        if let Cell::Agent(heading) = cell {
            if !heading.is_valid(self.dimension) {
                return Err(FlockError::InvalidHeading {
                    index: heading.index(),
                });
            }
        }
        let index = self.index_of(coord)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Every cell in scan order (z outermost, x innermost).
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &cell)| (self.coord_of(index), cell))
    }

    pub fn positions_of(&self, occupant: Occupant) -> Vec<IVec3> {
        self.iter()
            .filter(|(_, cell)| cell.occupant() == occupant)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Obstacle coordinates in scan order. Fixed for the life of a run.
    pub fn obstacle_positions(&self) -> Vec<IVec3> {
        self.positions_of(Occupant::Obstacle)
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for cell in &self.cells {
            match cell {
                Cell::Agent(_) => census.agents += 1,
                Cell::Predator => census.predators += 1,
                Cell::Obstacle => census.obstacles += 1,
                Cell::Empty => {}
            }
        }
        census
    }
}

// --- End of File: lattice.rs ---
