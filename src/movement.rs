// --- File: movement.rs ---
// Building the next lattice state: predator steps, then agent placement
// with the fixed fallback order.
use std::collections::HashMap;

use crate::error::FlockError;
use crate::lattice::{Cell, Heading, Lattice, Occupant};
use glam::IVec3;

/// How an agent ended up after move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Took its desired offset.
    Direct,
    /// Took a later candidate from the fallback list.
    Fallback,
    /// Every candidate was occupied; stayed on its pre-tick cell.
    Blocked,
}

/// Candidate offsets for an agent that wants to step along `desired`.
///
/// Order: `desired` itself; then its projections onto proper subsets of its
/// non-zero axes, larger subsets first and lower axis indices first within
/// a size; then `desired` with one non-zero axis negated, in axis order.
/// Zero and repeated offsets are dropped.
pub fn fallback_offsets(desired: IVec3) -> Vec<IVec3> {
    let components = desired.to_array();
    let axes: Vec<usize> = (0..3).filter(|&axis| components[axis] != 0).collect();
    let mut candidates = vec![desired];

    let full = (1u32 << axes.len()) - 1;
    let mut masks: Vec<u32> = (1..full).collect();
    masks.sort_by_key(|mask| (std::cmp::Reverse(mask.count_ones()), *mask));
    for mask in masks {
        let mut projected = [0; 3];
        for (bit, &axis) in axes.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                projected[axis] = components[axis];
            }
        }
        candidates.push(IVec3::from_array(projected));
    }

    for &axis in &axes {
        let mut reflected = components;
        reflected[axis] = -reflected[axis];
        candidates.push(IVec3::from_array(reflected));
    }

    let mut unique: Vec<IVec3> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate != IVec3::ZERO && !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// Where an agent is in the placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Pending,
    Resolving,
    Done,
}

/// Lattice for tick T+1 while it is being built.
///
/// Starts with the obstacles and predators of the current lattice and no
/// agents. Agent homes stay reserved against predators for the whole tick
/// and against other agents until their owner has been placed, so a blocked
/// agent can always stay where it was.
#[derive(Debug, Clone)]
pub struct NextLattice<'a> {
    current: &'a Lattice,
    lattice: Lattice,
}

impl<'a> NextLattice<'a> {
    pub fn seeded_from(current: &'a Lattice) -> Result<Self, FlockError> {
        let mut lattice = Lattice::new(current.dimension(), current.extent())?;
        for (coord, cell) in current.iter() {
            if matches!(cell, Cell::Obstacle | Cell::Predator) {
                lattice.set(coord, cell)?;
            }
        }
        Ok(Self { current, lattice })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    /// Single attempt along `step`. The target must be free in the working
    /// lattice and must not be an agent's home. Returns whether it moved.
    pub fn move_predator(&mut self, from: IVec3, step: IVec3) -> Result<bool, FlockError> {
        if self.lattice.occupant_at(from)? != Occupant::Predator {
            return Err(FlockError::WrongOccupant {
                coord: from,
                expected: Occupant::Predator,
            });
        }
        let target = self.lattice.wrap(from + step);
        if !self.lattice.cell_at(target)?.is_empty()
            || self.current.occupant_at(target)? == Occupant::Agent
        {
            return Ok(false);
        }
        self.lattice.set(from, Cell::Empty)?;
        self.lattice.set(target, Cell::Predator)?;
        Ok(true)
    }

    /// Places every agent of `moves` (pre-tick cell, desired heading) and
    /// returns the outcomes in the same order.
    ///
    /// Agents are taken in the order given. A candidate cell that is still
    /// the home of an unplaced agent is settled by placing that agent first,
    /// so a follower can step into the cell its leader vacates. The home of
    /// an agent whose placement is in progress counts as occupied, which
    /// breaks cycles. The heading stored is the one of the offset taken; a
    /// blocked agent stays and stores its desired heading.
    pub fn place_agents(
        &mut self,
        moves: &[(IVec3, Heading)],
    ) -> Result<Vec<MoveOutcome>, FlockError> {
        let dimension = self.lattice.dimension();
        let mut homes: HashMap<IVec3, usize> = HashMap::with_capacity(moves.len());
        let mut candidates = Vec::with_capacity(moves.len());
        for (slot, &(from, desired)) in moves.iter().enumerate() {
            if self.current.occupant_at(from)? != Occupant::Agent {
                return Err(FlockError::WrongOccupant {
                    coord: from,
                    expected: Occupant::Agent,
                });
            }
            if homes.insert(from, slot).is_some() {
                return Err(FlockError::CellOccupied { coord: from });
            }
            let direction = desired.vector(dimension).ok_or(FlockError::InvalidHeading {
                index: desired.index(),
            })?;
            candidates.push(fallback_offsets(direction));
        }

        let mut state = vec![Placement::Pending; moves.len()];
        let mut outcomes = vec![MoveOutcome::Blocked; moves.len()];
        for root in 0..moves.len() {
            if state[root] != Placement::Pending {
                continue;
            }
            state[root] = Placement::Resolving;
            // (agent, rank of the next candidate to try)
            let mut stack = vec![(root, 0usize)];
            while let Some(&(slot, rank)) = stack.last() {
                let (from, desired) = moves[slot];
                let Some(&offset) = candidates[slot].get(rank) else {
                    self.lattice.set(from, Cell::Agent(desired))?;
                    homes.remove(&from);
                    state[slot] = Placement::Done;
                    outcomes[slot] = MoveOutcome::Blocked;
                    stack.pop();
                    continue;
                };

                let target = self.lattice.wrap(from + offset);
                let owner = homes.get(&target).copied();
                if let Some(owner) = owner.filter(|&owner| state[owner] == Placement::Pending) {
                    state[owner] = Placement::Resolving;
                    stack.push((owner, 0));
                    continue;
                }
                if owner.is_some() || !self.lattice.cell_at(target)?.is_empty() {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    continue;
                }

                let heading = dimension.heading_for(offset).unwrap_or(desired);
                self.lattice.set(target, Cell::Agent(heading))?;
                homes.remove(&from);
                state[slot] = Placement::Done;
                outcomes[slot] = if rank == 0 {
                    MoveOutcome::Direct
                } else {
                    MoveOutcome::Fallback
                };
                stack.pop();
            }
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Dimension;
    use glam::UVec3;

    fn heading(dimension: Dimension, x: i32, y: i32, z: i32) -> Heading {
        dimension.heading_for(IVec3::new(x, y, z)).unwrap()
    }

    #[test]
    fn diagonal_fallbacks_in_volume() {
        let order = fallback_offsets(IVec3::new(1, -1, 1));
        assert_eq!(
            order,
            vec![
                IVec3::new(1, -1, 1),
                IVec3::new(1, -1, 0),
                IVec3::new(1, 0, 1),
                IVec3::new(0, -1, 1),
                IVec3::new(1, 0, 0),
                IVec3::new(0, -1, 0),
                IVec3::new(0, 0, 1),
                IVec3::new(-1, -1, 1),
                IVec3::new(1, 1, 1),
                IVec3::new(1, -1, -1),
            ]
        );
    }

    #[test]
    fn planar_diagonal_and_straight_fallbacks() {
        assert_eq!(
            fallback_offsets(IVec3::new(-1, 1, 0)),
            vec![
                IVec3::new(-1, 1, 0),
                IVec3::new(-1, 0, 0),
                IVec3::new(0, 1, 0),
                IVec3::new(1, 1, 0),
                IVec3::new(-1, -1, 0),
            ]
        );
        assert_eq!(
            fallback_offsets(IVec3::new(0, 1, 0)),
            vec![IVec3::new(0, 1, 0), IVec3::new(0, -1, 0)]
        );
    }

    #[test]
    fn every_fallback_is_a_single_step() {
        for &direction in Dimension::Three.headings() {
            for offset in fallback_offsets(direction) {
                assert!(offset.abs().max_element() <= 1);
                assert_ne!(offset, IVec3::ZERO);
            }
        }
    }

    fn row_of_agents(width: u32, agents: &[(i32, Heading)]) -> Lattice {
        let placed: Vec<(IVec3, Heading)> = agents
            .iter()
            .map(|&(x, heading)| (IVec3::new(x, 2, 0), heading))
            .collect();
        Lattice::with_occupants(Dimension::Two, UVec3::new(width, 6, 1), &placed, &[], &[]).unwrap()
    }

    fn agent_moves(lattice: &Lattice) -> Vec<(IVec3, Heading)> {
        lattice
            .positions_of(Occupant::Agent)
            .into_iter()
            .map(|coord| (coord, lattice.heading_at(coord).unwrap().unwrap()))
            .collect()
    }

    #[test]
    fn seeded_lattice_holds_obstacles_and_predators_only() {
        let current = Lattice::with_occupants(
            Dimension::Two,
            UVec3::new(6, 6, 1),
            &[(IVec3::new(1, 1, 0), Heading::new(0))],
            &[IVec3::new(2, 2, 0)],
            &[IVec3::new(3, 3, 0)],
        )
        .unwrap();
        let next = NextLattice::seeded_from(&current).unwrap();
        assert_eq!(next.lattice().occupant_at(IVec3::new(1, 1, 0)).unwrap(), Occupant::Empty);
        assert_eq!(
            next.lattice().occupant_at(IVec3::new(2, 2, 0)).unwrap(),
            Occupant::Predator
        );
        assert_eq!(next.lattice().obstacle_positions(), current.obstacle_positions());
    }

    #[test]
    fn agent_moves_directly_when_free() {
        let dimension = Dimension::Two;
        let from = IVec3::new(2, 2, 0);
        let current = Lattice::with_occupants(
            dimension,
            UVec3::new(6, 6, 1),
            &[(from, Heading::new(0))],
            &[],
            &[],
        )
        .unwrap();
        let mut next = NextLattice::seeded_from(&current).unwrap();
        let north_east = heading(dimension, 1, 1, 0);

        assert_eq!(
            next.place_agents(&[(from, north_east)]).unwrap(),
            vec![MoveOutcome::Direct]
        );
        let next = next.into_lattice();
        assert_eq!(next.occupant_at(from).unwrap(), Occupant::Empty);
        assert_eq!(next.heading_at(IVec3::new(3, 3, 0)).unwrap(), Some(north_east));
    }

    #[test]
    fn blocked_agent_falls_back_and_records_taken_heading() {
        let dimension = Dimension::Two;
        let from = IVec3::new(2, 2, 0);
        let current = Lattice::with_occupants(
            dimension,
            UVec3::new(6, 6, 1),
            &[(from, Heading::new(0))],
            &[],
            &[IVec3::new(3, 3, 0), IVec3::new(3, 2, 0)],
        )
        .unwrap();
        let mut next = NextLattice::seeded_from(&current).unwrap();

        let outcomes = next.place_agents(&[(from, heading(dimension, 1, 1, 0))]).unwrap();
        assert_eq!(outcomes, vec![MoveOutcome::Fallback]);
        assert_eq!(
            next.lattice().heading_at(IVec3::new(2, 3, 0)).unwrap(),
            Some(heading(dimension, 0, 1, 0))
        );
    }

    #[test]
    fn fully_blocked_agent_stays_home_with_desired_heading() {
        let dimension = Dimension::Two;
        let from = IVec3::new(2, 2, 0);
        let walls: Vec<IVec3> = dimension
            .headings()
            .iter()
            .map(|&offset| from + offset)
            .collect();
        let current = Lattice::with_occupants(
            dimension,
            UVec3::new(6, 6, 1),
            &[(from, Heading::new(0))],
            &[],
            &walls,
        )
        .unwrap();
        let mut next = NextLattice::seeded_from(&current).unwrap();
        let desired = heading(dimension, -1, 0, 0);

        assert_eq!(
            next.place_agents(&[(from, desired)]).unwrap(),
            vec![MoveOutcome::Blocked]
        );
        assert_eq!(next.lattice().heading_at(from).unwrap(), Some(desired));
        assert_eq!(next.lattice().census(), current.census());
    }

    #[test]
    fn follower_steps_into_vacated_cell_either_way() {
        let east = Heading::new(0);
        let west = Heading::new(4);
        for (pair, expected) in [
            ([(1, east), (2, east)], [(2, east), (3, east)]),
            ([(4, west), (5, west)], [(3, west), (4, west)]),
        ] {
            let current = row_of_agents(8, &pair);
            let mut next = NextLattice::seeded_from(&current).unwrap();
            let outcomes = next.place_agents(&agent_moves(&current)).unwrap();
            assert_eq!(outcomes, vec![MoveOutcome::Direct; 2]);
            for (x, heading) in expected {
                assert_eq!(
                    next.lattice().heading_at(IVec3::new(x, 2, 0)).unwrap(),
                    Some(heading)
                );
            }
        }
    }

    #[test]
    fn head_on_pair_never_swaps() {
        let east = Heading::new(0);
        let current = row_of_agents(8, &[(2, east), (3, Heading::new(4))]);
        let mut next = NextLattice::seeded_from(&current).unwrap();

        let outcomes = next.place_agents(&agent_moves(&current)).unwrap();

        // The agent ahead is settled first and may not enter the home of the
        // one waiting on it.
        assert_eq!(outcomes, vec![MoveOutcome::Direct, MoveOutcome::Fallback]);
        let next = next.into_lattice();
        assert_eq!(next.heading_at(IVec3::new(3, 2, 0)).unwrap(), Some(east));
        assert_eq!(next.heading_at(IVec3::new(4, 2, 0)).unwrap(), Some(east));
        assert_eq!(next.census().agents, 2);
    }

    #[test]
    fn closed_ring_around_torus_stays_put() {
        let east = Heading::new(0);
        let ring: Vec<(i32, Heading)> = (0..6).map(|x| (x, east)).collect();
        let current = row_of_agents(6, &ring);
        let mut next = NextLattice::seeded_from(&current).unwrap();

        let outcomes = next.place_agents(&agent_moves(&current)).unwrap();

        assert_eq!(outcomes, vec![MoveOutcome::Blocked; 6]);
        assert_eq!(next.into_lattice(), current);
    }

    #[test]
    fn predator_rejects_occupied_target_and_agent_homes() {
        let from = IVec3::new(1, 1, 0);
        let current = Lattice::with_occupants(
            Dimension::Two,
            UVec3::new(5, 5, 1),
            &[(IVec3::new(2, 1, 0), Heading::new(0))],
            &[from],
            &[IVec3::new(1, 2, 0)],
        )
        .unwrap();
        let mut next = NextLattice::seeded_from(&current).unwrap();

        assert!(!next.move_predator(from, IVec3::new(1, 0, 0)).unwrap());
        assert!(!next.move_predator(from, IVec3::new(0, 1, 0)).unwrap());
        assert!(next.move_predator(from, IVec3::new(-1, -1, 0)).unwrap());
        assert_eq!(
            next.lattice().occupant_at(IVec3::new(0, 0, 0)).unwrap(),
            Occupant::Predator
        );
        assert_eq!(next.lattice().occupant_at(from).unwrap(), Occupant::Empty);
    }

    #[test]
    fn placing_a_non_agent_is_an_error() {
        let current = Lattice::with_occupants(
            Dimension::Two,
            UVec3::new(5, 5, 1),
            &[(IVec3::new(3, 3, 0), Heading::new(0))],
            &[],
            &[IVec3::new(1, 1, 0)],
        )
        .unwrap();
        let mut next = NextLattice::seeded_from(&current).unwrap();
        assert!(matches!(
            next.place_agents(&[(IVec3::new(1, 1, 0), Heading::new(0))]),
            Err(FlockError::WrongOccupant {
                expected: Occupant::Agent,
                ..
            })
        ));

        let twice = [(IVec3::new(3, 3, 0), Heading::new(0)); 2];
        assert_eq!(
            next.place_agents(&twice),
            Err(FlockError::CellOccupied {
                coord: IVec3::new(3, 3, 0)
            })
        );
    }
}
// --- End of File: movement.rs ---
