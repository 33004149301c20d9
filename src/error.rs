// --- File: error.rs ---
use glam::{IVec3, UVec3};
use thiserror::Error;

use crate::lattice::{Census, Occupant};

/// Errors surfaced by lattice access, configuration and tick commits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    /// A coordinate was not wrapped into the lattice before use.
    #[error("coordinate {coord} is outside the lattice extent {extent}")]
    OutOfRange { coord: IVec3, extent: UVec3 },

    /// The occupant census changed across a tick. Indicates an engine bug.
    #[error("occupant census changed across tick: {before:?} -> {after:?}")]
    InvariantViolation { before: Census, after: Census },

    /// An obstacle cell changed across a tick. Indicates an engine bug.
    #[error("obstacle layout changed across tick")]
    ObstacleMoved,

    /// Two occupants were placed on the same cell during ingestion.
    #[error("cell {coord} is already occupied")]
    CellOccupied { coord: IVec3 },

    /// A cell did not hold the occupant an operation requires.
    #[error("cell {coord} does not hold {expected:?}")]
    WrongOccupant { coord: IVec3, expected: Occupant },

    /// A heading index does not exist in the direction table of the lattice.
    #[error("heading index {index} is not valid for this dimension")]
    InvalidHeading { index: u8 },

    /// The lattice handed to the engine does not match its configuration.
    #[error("lattice shape does not match configuration")]
    DimensionMismatch,

    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
// --- End of File: error.rs ---
