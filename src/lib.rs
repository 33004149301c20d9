//! Grid-quantized flocking: fish steer by separation, alignment, cohesion and
//! flee rules on a toroidal 2D or 3D lattice shared with wandering predators
//! and fixed obstacles.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod movement;
pub mod neighbors;
pub mod steering;
pub mod utils;

pub use config::{Discretization, FlockConfig, MoveOrder, SteeringRadii, SteeringWeights};
pub use engine::{FlockEngine, SimRng, TickPhase, TickReport};
pub use error::FlockError;
pub use lattice::{Cell, Census, Dimension, Heading, Lattice, Occupant};
pub use movement::{MoveOutcome, NextLattice, fallback_offsets};
pub use neighbors::{Neighbor, NeighborQuery, neighbors};
pub use steering::{SteeringModel, SteeringVectors};
