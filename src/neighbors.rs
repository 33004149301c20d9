// --- File: neighbors.rs ---
// Box neighborhoods on the torus, in a fixed visiting order.
use glam::IVec3;

use crate::error::FlockError;
use crate::lattice::{Cell, Dimension, Heading, Lattice, Occupant};

/// One cell of a box neighborhood, seen from the querying cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Wrapped lattice coordinate.
    pub coord: IVec3,
    /// Unwrapped offset from the querying cell.
    pub offset: IVec3,
    pub cell: Cell,
}

impl Neighbor {
    pub fn occupant(&self) -> Occupant {
        self.cell.occupant()
    }

    pub fn heading(&self) -> Option<Heading> {
        self.cell.heading()
    }
}

/// Chebyshev neighborhood of a fixed radius.
///
/// Offsets are precomputed once in a fixed nested order (z outermost, x
/// innermost) with the zero offset left out, so every query over the same
/// radius visits cells in the same order. On a lattice narrower than
/// `2 * radius + 1` along some axis a cell can be reached by more than one
/// offset; configuration validation keeps radii below that.
#[derive(Debug, Clone)]
pub struct NeighborQuery {
    dimension: Dimension,
    offsets: Vec<IVec3>,
}

impl NeighborQuery {
    pub fn new(dimension: Dimension, radius: u32) -> Self {
        let r = radius as i32;
        let depth = match dimension {
            Dimension::Two => 0..=0,
            Dimension::Three => -r..=r,
        };
        let mut offsets = Vec::new();
        for dz in depth {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    offsets.push(IVec3::new(dx, dy, dz));
                }
            }
        }
        Self { dimension, offsets }
    }

    pub fn offsets(&self) -> &[IVec3] {
        &self.offsets
    }

    /// Lazily yields every neighbor of `coord`. `coord` must already be wrapped.
    pub fn around<'a>(
        &'a self,
        lattice: &'a Lattice,
        coord: IVec3,
    ) -> Result<impl Iterator<Item = Neighbor> + 'a, FlockError> {
        if lattice.dimension() != self.dimension {
            return Err(FlockError::DimensionMismatch);
        }
        if !lattice.contains(coord) {
            return Err(FlockError::OutOfRange {
                coord,
                extent: lattice.extent(),
            });
        }
        Ok(self.offsets.iter().map(move |&offset| {
            let target = coord + offset;
            Neighbor {
                coord: lattice.wrap(target),
                offset,
                cell: lattice.cell_wrapping(target),
            }
        }))
    }

    pub fn collect(&self, lattice: &Lattice, coord: IVec3) -> Result<Vec<Neighbor>, FlockError> {
        Ok(self.around(lattice, coord)?.collect())
    }
}

/// Materialized box neighborhood of `coord` at `radius`.
pub fn neighbors(lattice: &Lattice, coord: IVec3, radius: u32) -> Result<Vec<Neighbor>, FlockError> {
    NeighborQuery::new(lattice.dimension(), radius).collect(lattice, coord)
}

// --- End of File: neighbors.rs ---
