// --- File: steering.rs ---
// Separation, alignment, cohesion and flee steering, and the quantization
// of their weighted sum into a discrete heading.
use std::f32::consts::TAU;

use glam::{IVec3, Vec3};

use crate::config::{Discretization, FlockConfig, SteeringWeights};
use crate::constants::{FLEE_MIN_DISTANCE, PLANAR_HEADINGS, PLANAR_SECTORS, SEPARATION_MIN_DISTANCE};
use crate::error::FlockError;
use crate::lattice::{Dimension, Heading, Lattice, Occupant};
use crate::neighbors::NeighborQuery;

/// The four raw (unweighted) steering vectors of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringVectors {
    pub separation: Vec3,
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub flee: Vec3,
}

impl SteeringVectors {
    /// Weighted sum, normalized to unit length when non-zero.
    pub fn combine(&self, weights: &SteeringWeights) -> Vec3 {
        let total = self.separation * weights.separation
            + self.alignment * weights.alignment
            + self.cohesion * weights.cohesion
            + self.flee * weights.flee;
        total.normalize_or_zero()
    }
}

impl Discretization {
    /// Maps a unit steering total onto the heading table of `dimension`.
    /// A total that quantizes to nothing keeps `previous`.
    pub fn quantize(
        self,
        dimension: Dimension,
        total: Vec3,
        threshold: f32,
        previous: Heading,
    ) -> Heading {
        match self {
            Discretization::AxisThreshold => {
                let step = |component: f32| {
                    if component > threshold {
                        1
                    } else if component < -threshold {
                        -1
                    } else {
                        0
                    }
                };
                let mut direction = IVec3::new(step(total.x), step(total.y), step(total.z));
                if dimension == Dimension::Two {
                    direction.z = 0;
                }
                if direction == IVec3::ZERO {
                    return previous;
                }
                dimension.heading_for(direction).unwrap_or(previous)
            }
            Discretization::AngularSector => {
                if total.x == 0.0 && total.y == 0.0 {
                    return previous;
                }
                let angle = total.y.atan2(total.x);
                let sector = ((angle / (TAU / PLANAR_SECTORS as f32)).round() as i32)
                    .rem_euclid(PLANAR_SECTORS as i32) as usize;
                dimension
                    .heading_for(PLANAR_HEADINGS[sector])
                    .unwrap_or(previous)
            }
        }
    }
}

/// Per-agent steering evaluated against a read-only lattice snapshot.
#[derive(Debug, Clone)]
pub struct SteeringModel {
    dimension: Dimension,
    weights: SteeringWeights,
    discretization: Discretization,
    axis_threshold: f32,
    separation: NeighborQuery,
    alignment: NeighborQuery,
    cohesion: NeighborQuery,
    flee: NeighborQuery,
}

impl SteeringModel {
    pub fn new(config: &FlockConfig) -> Self {
        let dimension = config.dimension;
        Self {
            dimension,
            weights: config.weights,
            discretization: config.discretization,
            axis_threshold: config.axis_threshold,
            separation: NeighborQuery::new(dimension, config.radii.separation),
            alignment: NeighborQuery::new(dimension, config.radii.alignment),
            cohesion: NeighborQuery::new(dimension, config.radii.cohesion),
            flee: NeighborQuery::new(dimension, config.radii.flee),
        }
    }

    /// Mean push away from every occupied neighbor, obstacles included.
    pub fn separation(&self, lattice: &Lattice, coord: IVec3) -> Result<Vec3, FlockError> {
        let mut push = Vec3::ZERO;
        let mut count = 0usize;
        for neighbor in self.separation.around(lattice, coord)? {
            if neighbor.occupant() == Occupant::Empty {
                continue;
            }
            let offset = neighbor.offset.as_vec3();
            push -= offset / offset.length().max(SEPARATION_MIN_DISTANCE);
            count += 1;
        }
        if count == 0 {
            return Ok(Vec3::ZERO);
        }
        Ok(push / count as f32)
    }

    /// Unit mean of neighboring agents' headings.
    pub fn alignment(&self, lattice: &Lattice, coord: IVec3) -> Result<Vec3, FlockError> {
        let mut sum = Vec3::ZERO;
        for neighbor in self.alignment.around(lattice, coord)? {
            let Some(direction) = neighbor
                .heading()
                .and_then(|heading| heading.vector(self.dimension))
            else {
                continue;
            };
            sum += direction.as_vec3().normalize();
        }
        Ok(sum.normalize_or_zero())
    }

    /// Unit vector toward the centroid of neighboring agents.
    pub fn cohesion(&self, lattice: &Lattice, coord: IVec3) -> Result<Vec3, FlockError> {
        let mut centroid = Vec3::ZERO;
        let mut count = 0usize;
        for neighbor in self.cohesion.around(lattice, coord)? {
            if neighbor.occupant() != Occupant::Agent {
                continue;
            }
            centroid += neighbor.offset.as_vec3();
            count += 1;
        }
        if count == 0 {
            return Ok(Vec3::ZERO);
        }
        Ok((centroid / count as f32).normalize_or_zero())
    }

    /// Additive push away from every predator in range. Not averaged.
    pub fn flee(&self, lattice: &Lattice, coord: IVec3) -> Result<Vec3, FlockError> {
        let mut push = Vec3::ZERO;
        for neighbor in self.flee.around(lattice, coord)? {
            if neighbor.occupant() != Occupant::Predator {
                continue;
            }
            let offset = neighbor.offset.as_vec3();
            push -= offset / offset.length().max(FLEE_MIN_DISTANCE);
        }
        Ok(push)
    }

    pub fn vectors(&self, lattice: &Lattice, coord: IVec3) -> Result<SteeringVectors, FlockError> {
        Ok(SteeringVectors {
            separation: self.separation(lattice, coord)?,
            alignment: self.alignment(lattice, coord)?,
            cohesion: self.cohesion(lattice, coord)?,
            flee: self.flee(lattice, coord)?,
        })
    }

    /// Weighted, normalized steering total for the cell at `coord`.
    pub fn total(&self, lattice: &Lattice, coord: IVec3) -> Result<Vec3, FlockError> {
        Ok(self.vectors(lattice, coord)?.combine(&self.weights))
    }

    /// Heading the agent at `coord` wants to take this tick.
    pub fn desired_heading(&self, lattice: &Lattice, coord: IVec3) -> Result<Heading, FlockError> {
        let previous = lattice
            .heading_at(coord)?
            .ok_or(FlockError::WrongOccupant {
                coord,
                expected: Occupant::Agent,
            })?;
        let total = self.total(lattice, coord)?;
        Ok(self
            .discretization
            .quantize(self.dimension, total, self.axis_threshold, previous))
    }
}

// --- End of File: steering.rs ---
