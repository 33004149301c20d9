// --- File: constants.rs ---
use glam::IVec3;

// --- Default Behavior Weights ---
pub const SEPARATION_WEIGHT: f32 = 1.5;
pub const ALIGNMENT_WEIGHT: f32 = 1.0;
pub const COHESION_WEIGHT: f32 = 1.0;
pub const FLEE_WEIGHT: f32 = 2.0;

// --- Default Behavior Radii (Chebyshev, in cells) ---
pub const SEPARATION_RADIUS: u32 = 1;
pub const ALIGNMENT_RADIUS: u32 = 2;
pub const COHESION_RADIUS: u32 = 2;
pub const FLEE_RADIUS: u32 = 3;

// Lower bounds on the distance used to scale push-away contributions.
pub const SEPARATION_MIN_DISTANCE: f32 = 0.1;
pub const FLEE_MIN_DISTANCE: f32 = 1.0;

// Per-axis cutoff for axis-threshold discretization. Comparison is strict.
pub const AXIS_THRESHOLD: f32 = 0.33;

pub const PLANAR_SECTORS: usize = 8;

// --- Driver Defaults ---
pub const DEFAULT_VOLUME_SIZE: u32 = 25;
pub const DEFAULT_PLANE_WIDTH: u32 = 80;
pub const DEFAULT_PLANE_HEIGHT: u32 = 60;
pub const INITIAL_FISH_COUNT: usize = 100;
pub const INITIAL_PREDATOR_COUNT: usize = 5;
pub const INITIAL_OBSTACLE_COUNT: usize = 20;
pub const DEFAULT_TICKS: u64 = 50;

// --- Direction Tables ---

// Polar order: index k points at k * 45 degrees from +x toward +y.
pub const PLANAR_HEADINGS: [IVec3; 8] = [
    IVec3::new(1, 0, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(-1, -1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(1, -1, 0),
];

// Every non-zero vector in {-1,0,1}^3; z outermost, x innermost.
pub const VOLUMETRIC_HEADINGS: [IVec3; 26] = [
    IVec3::new(-1, -1, -1),
    IVec3::new(0, -1, -1),
    IVec3::new(1, -1, -1),
    IVec3::new(-1, 0, -1),
    IVec3::new(0, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 1, -1),
    IVec3::new(0, 1, -1),
    IVec3::new(1, 1, -1),
    IVec3::new(-1, -1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(-1, -1, 1),
    IVec3::new(0, -1, 1),
    IVec3::new(1, -1, 1),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 0, 1),
    IVec3::new(1, 0, 1),
    IVec3::new(-1, 1, 1),
    IVec3::new(0, 1, 1),
    IVec3::new(1, 1, 1),
];

// Predators in 3D only step to face and edge neighbors, never corners.
pub const VOLUMETRIC_PREDATOR_STEPS: [IVec3; 18] = [
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, 0, -1),
    IVec3::new(0, 0, 1),
    IVec3::new(-1, -1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(-1, 0, -1),
    IVec3::new(-1, 0, 1),
    IVec3::new(1, 0, -1),
    IVec3::new(1, 0, 1),
    IVec3::new(0, -1, -1),
    IVec3::new(0, -1, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(0, 1, 1),
];

// --- End of File: constants.rs ---
