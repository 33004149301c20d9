// --- File: engine.rs ---
// One tick: headings from the pre-tick snapshot, then predators and agents
// placed into the next lattice, then an atomic swap.
use crate::config::{FlockConfig, MoveOrder};
use crate::error::FlockError;
use crate::lattice::{Census, Heading, Lattice, Occupant};
use crate::movement::{MoveOutcome, NextLattice};
use crate::steering::SteeringModel;
use glam::{IVec3, UVec3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::Arc;

pub type SimRng = StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    Idle,
    ComputingHeadings,
    ApplyingMoves,
}

/// What happened during the most recent tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub tick: u64,
    pub agents_direct: usize,
    pub agents_fallback: usize,
    pub agents_blocked: usize,
    pub predators_moved: usize,
    pub predators_blocked: usize,
    pub census: Census,
}

pub struct FlockEngine {
    config: FlockConfig,
    steering: SteeringModel,
    current: Arc<Lattice>,
    rng: SimRng,
    phase: TickPhase,
    tick: u64,
    last_report: Option<TickReport>,
}

impl FlockEngine {
    /// Takes ownership of a populated lattice. Placement is the caller's job.
    pub fn new(config: FlockConfig, lattice: Lattice) -> Result<Self, FlockError> {
        config.validate()?;
        if lattice.dimension() != config.dimension || lattice.extent() != config.extent {
            return Err(FlockError::DimensionMismatch);
        }
        let rng = match config.rng_seed {
            Some(seed) => SimRng::seed_from_u64(seed),
            None => SimRng::from_entropy(),
        };
        log::debug!(
            "Flock engine ready: {:?} lattice {}, {:?}",
            config.dimension,
            config.extent,
            lattice.census()
        );
        Ok(Self {
            steering: SteeringModel::new(&config),
            config,
            current: Arc::new(lattice),
            rng,
            phase: TickPhase::Idle,
            tick: 0,
            last_report: None,
        })
    }

    // --- Read-only surface for renderers and drivers ---

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.current
    }

    /// Cheap handle on the committed lattice. Later ticks never mutate it.
    pub fn snapshot(&self) -> Arc<Lattice> {
        Arc::clone(&self.current)
    }

    pub fn extent(&self) -> UVec3 {
        self.current.extent()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    /// Desired heading of every agent against the committed lattice, in scan order.
    pub fn compute_headings(&self) -> Result<Vec<(IVec3, Heading)>, FlockError> {
        desired_headings(&self.steering, &self.current)
    }

    // --- Tick ---

    /// Advances the whole population one tick. On error the committed
    /// lattice is left untouched.
    pub fn step(&mut self) -> Result<(), FlockError> {
        let result = self.advance();
        self.set_phase(TickPhase::Idle);
        if let Err(err) = &result {
            log::warn!("Tick {} aborted: {}", self.tick + 1, err);
        }
        result
    }

    fn advance(&mut self) -> Result<(), FlockError> {
        let snapshot = Arc::clone(&self.current);

        self.set_phase(TickPhase::ComputingHeadings);
        let steering = &self.steering;
        let rng = &mut self.rng;
        // Predator draws only read the snapshot, so they overlap with steering.
        let (headings, predator_steps) = rayon::join(
            || desired_headings(steering, &snapshot),
            || draw_predator_steps(rng, &snapshot),
        );
        let mut headings = headings?;

        self.set_phase(TickPhase::ApplyingMoves);
        if self.config.move_order == MoveOrder::Shuffled {
            headings.shuffle(&mut self.rng);
        }

        let mut report = TickReport {
            tick: self.tick + 1,
            ..TickReport::default()
        };
        let mut next = NextLattice::seeded_from(&snapshot)?;
        for (from, step) in predator_steps {
            if next.move_predator(from, step)? {
                report.predators_moved += 1;
            } else {
                report.predators_blocked += 1;
            }
        }
        for outcome in next.place_agents(&headings)? {
            match outcome {
                MoveOutcome::Direct => report.agents_direct += 1,
                MoveOutcome::Fallback => report.agents_fallback += 1,
                MoveOutcome::Blocked => report.agents_blocked += 1,
            }
        }
        let next = next.into_lattice();

        if self.config.verify_invariants {
            verify_tick(&snapshot, &next)?;
        }

        report.census = next.census();
        self.current = Arc::new(next);
        self.tick = report.tick;
        log::debug!(
            "Tick {}: agents direct={} fallback={} blocked={}, predators moved={} blocked={}",
            report.tick,
            report.agents_direct,
            report.agents_fallback,
            report.agents_blocked,
            report.predators_moved,
            report.predators_blocked
        );
        self.last_report = Some(report);
        Ok(())
    }

    fn set_phase(&mut self, phase: TickPhase) {
        if self.phase != phase {
            log::trace!("Tick phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

fn desired_headings(
    steering: &SteeringModel,
    lattice: &Lattice,
) -> Result<Vec<(IVec3, Heading)>, FlockError> {
    lattice
        .positions_of(Occupant::Agent)
        .par_iter()
        .map(|&coord| {
            steering
                .desired_heading(lattice, coord)
                .map(|heading| (coord, heading))
        })
        .collect()
}

fn draw_predator_steps(rng: &mut SimRng, lattice: &Lattice) -> Vec<(IVec3, IVec3)> {
    let steps = lattice.dimension().predator_steps();
    lattice
        .positions_of(Occupant::Predator)
        .into_iter()
        .map(|coord| (coord, steps.choose(rng).copied().unwrap_or(IVec3::ZERO)))
        .collect()
}

fn verify_tick(before: &Lattice, after: &Lattice) -> Result<(), FlockError> {
    let (census_before, census_after) = (before.census(), after.census());
    if census_before != census_after {
        return Err(FlockError::InvariantViolation {
            before: census_before,
            after: census_after,
        });
    }
    if before.obstacle_positions() != after.obstacle_positions() {
        return Err(FlockError::ObstacleMoved);
    }
    Ok(())
}

// --- End of File: engine.rs ---
