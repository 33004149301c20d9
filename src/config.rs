// --- File: config.rs ---
use crate::constants::*;
use crate::error::FlockError;
use crate::lattice::Dimension;
use glam::UVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
    pub flee: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            separation: SEPARATION_WEIGHT,
            alignment: ALIGNMENT_WEIGHT,
            cohesion: COHESION_WEIGHT,
            flee: FLEE_WEIGHT,
        }
    }
}

impl SteeringWeights {
    /// All weights zero: agents keep their heading every tick.
    pub fn inert() -> Self {
        Self {
            separation: 0.0,
            alignment: 0.0,
            cohesion: 0.0,
            flee: 0.0,
        }
    }

    fn all(&self) -> [f32; 4] {
        [self.separation, self.alignment, self.cohesion, self.flee]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringRadii {
    pub separation: u32,
    pub alignment: u32,
    pub cohesion: u32,
    pub flee: u32,
}

impl Default for SteeringRadii {
    fn default() -> Self {
        Self {
            separation: SEPARATION_RADIUS,
            alignment: ALIGNMENT_RADIUS,
            cohesion: COHESION_RADIUS,
            flee: FLEE_RADIUS,
        }
    }
}

impl SteeringRadii {
    pub fn max(&self) -> u32 {
        self.separation
            .max(self.alignment)
            .max(self.cohesion)
            .max(self.flee)
    }

    fn min(&self) -> u32 {
        self.separation
            .min(self.alignment)
            .min(self.cohesion)
            .min(self.flee)
    }
}

/// How a continuous steering total becomes a discrete heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discretization {
    /// Each axis maps to -1/0/+1 around a strict threshold.
    AxisThreshold,
    /// Nearest of 8 polar sectors. Planar lattices only.
    AngularSector,
}

/// Order in which agents claim cells during move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOrder {
    /// Lattice scan order. Fully deterministic without a seed.
    Scan,
    /// Scan order shuffled by the engine RNG each tick.
    Shuffled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub dimension: Dimension,
    pub extent: UVec3,
    pub weights: SteeringWeights,
    pub radii: SteeringRadii,
    pub discretization: Discretization,
    pub axis_threshold: f32,
    pub move_order: MoveOrder,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    /// Compare occupant census and obstacle layout before committing a tick.
    pub verify_invariants: bool,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self::volumetric(DEFAULT_VOLUME_SIZE)
    }
}

impl FlockConfig {
    /// 2D preset: angular-sector headings, shuffled move order.
    pub fn planar(width: u32, height: u32) -> Self {
        Self {
            dimension: Dimension::Two,
            extent: UVec3::new(width, height, 1),
            weights: SteeringWeights::default(),
            radii: SteeringRadii::default(),
            discretization: Discretization::AngularSector,
            axis_threshold: AXIS_THRESHOLD,
            move_order: MoveOrder::Shuffled,
            rng_seed: None,
            verify_invariants: true,
        }
    }

    /// 3D preset: axis-threshold headings, scan move order.
    pub fn volumetric(size: u32) -> Self {
        Self {
            dimension: Dimension::Three,
            extent: UVec3::splat(size),
            discretization: Discretization::AxisThreshold,
            move_order: MoveOrder::Scan,
            ..Self::planar(size, size)
        }
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        if self.extent.x == 0 || self.extent.y == 0 || self.extent.z == 0 {
            return Err(FlockError::InvalidConfig("extent must be non-zero on every axis"));
        }
        if self.dimension == Dimension::Two && self.extent.z != 1 {
            return Err(FlockError::InvalidConfig("planar extent must have z = 1"));
        }
        if self.dimension == Dimension::Three
            && self.discretization == Discretization::AngularSector
        {
            return Err(FlockError::InvalidConfig(
                "angular-sector discretization requires a planar lattice",
            ));
        }
        if self
            .weights
            .all()
            .iter()
            .any(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err(FlockError::InvalidConfig("weights must be finite and non-negative"));
        }
        if self.radii.min() == 0 {
            return Err(FlockError::InvalidConfig("radii must be at least one cell"));
        }
        let span = self
            .radii
            .max()
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .ok_or(FlockError::InvalidConfig("radius too large"))?;
        let too_narrow = match self.dimension {
            Dimension::Two => self.extent.x < span || self.extent.y < span,
            Dimension::Three => self.extent.min_element() < span,
        };
        if too_narrow {
            return Err(FlockError::InvalidConfig(
                "extent must be at least 2 * radius + 1 on every axis",
            ));
        }
        if !(0.0..1.0).contains(&self.axis_threshold) {
            return Err(FlockError::InvalidConfig("axis threshold must lie in [0, 1)"));
        }
        Ok(())
    }
}

// --- End of File: config.rs ---
