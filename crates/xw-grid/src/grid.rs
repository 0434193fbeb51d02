//! Occupancy grid.
//!
//! # Data layout
//!
//! Cells are stored row-major in a flat `Vec<Slot>`: cell `(x, y)` lives at
//! `y * width + x`.  Each slot holds an optional vehicle and a (usually
//! empty) list of pedestrians, so the common "is anything ahead of me?"
//! query is a single indexed load.

use xw_core::{AgentId, AgentKind, Cell};

use crate::{GridError, GridResult};

/// An agent standing in a cell, with enough type information to apply the
/// blocking rules without consulting the agent store.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub agent: AgentId,
    pub kind:  AgentKind,
}

#[derive(Clone, Debug, Default)]
struct Slot {
    vehicle:     Option<Occupant>,
    pedestrians: Vec<AgentId>,
}

impl Slot {
    #[inline]
    fn is_empty(&self) -> bool {
        self.vehicle.is_none() && self.pedestrians.is_empty()
    }
}

/// Fixed-size `width × height` occupancy grid.
///
/// Read operations never mutate.  The scheduler is the only caller of
/// [`place`][Self::place] and [`remove`][Self::remove], and only during its
/// apply phase.
#[derive(Clone, Debug)]
pub struct Grid {
    width:  u32,
    height: u32,
    slots:  Vec<Slot>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            slots: vec![Slot::default(); width as usize * height as usize],
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` if `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    #[inline]
    fn slot(&self, cell: Cell) -> Option<&Slot> {
        self.index(cell).map(|i| &self.slots[i])
    }

    // ── Occupancy queries ─────────────────────────────────────────────────

    /// The blocking occupant of `cell`: its vehicle if there is one, otherwise
    /// the first pedestrian to arrive.  `None` for empty or out-of-bounds
    /// cells.
    pub fn occupant_at(&self, cell: Cell) -> Option<Occupant> {
        let slot = self.slot(cell)?;
        slot.vehicle.or_else(|| {
            slot.pedestrians
                .first()
                .map(|&agent| Occupant { agent, kind: AgentKind::Pedestrian })
        })
    }

    /// The vehicle in `cell`, if any.
    #[inline]
    pub fn vehicle_at(&self, cell: Cell) -> Option<Occupant> {
        self.slot(cell).and_then(|s| s.vehicle)
    }

    /// All pedestrians in `cell`, in arrival order.
    #[inline]
    pub fn pedestrians_at(&self, cell: Cell) -> &[AgentId] {
        self.slot(cell).map_or(&[], |s| s.pedestrians.as_slice())
    }

    /// `true` if nothing at all stands in `cell`.  Out-of-bounds cells are
    /// reported empty.
    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.slot(cell).is_none_or(Slot::is_empty)
    }

    /// `true` if an agent of `kind` may not enter `cell`.
    pub fn blocks(&self, kind: AgentKind, cell: Cell) -> bool {
        self.blocker(kind, cell).is_some()
    }

    /// `true` if a vehicle may not enter `cell`.
    #[inline]
    pub fn blocks_vehicle(&self, cell: Cell) -> bool {
        self.blocks(AgentKind::Vehicle, cell)
    }

    /// `true` if a pedestrian may not enter `cell`.
    #[inline]
    pub fn blocks_pedestrian(&self, cell: Cell) -> bool {
        self.blocks(AgentKind::Pedestrian, cell)
    }

    /// The agent that would block an agent of `kind` from entering `cell`.
    fn blocker(&self, kind: AgentKind, cell: Cell) -> Option<AgentId> {
        let slot = self.slot(cell)?;
        if let Some(v) = slot.vehicle {
            return Some(v.agent);
        }
        if kind.is_vehicle() {
            return slot.pedestrians.first().copied();
        }
        None
    }

    /// Number of vehicles currently on the grid.
    pub fn vehicle_count(&self) -> usize {
        self.slots.iter().filter(|s| s.vehicle.is_some()).count()
    }

    /// Number of pedestrians currently on the grid.
    pub fn pedestrian_count(&self) -> usize {
        self.slots.iter().map(|s| s.pedestrians.len()).sum()
    }

    // ── Mutation (apply phase only) ───────────────────────────────────────

    /// Check that an agent of `kind` could be placed in `cell` right now.
    ///
    /// # Errors
    ///
    /// - [`GridError::OutOfBounds`] if `cell` is outside the grid.
    /// - [`GridError::OccupiedCell`] if `cell` holds an agent that blocks
    ///   `kind` (see the crate-level blocking rules).
    pub fn check(&self, kind: AgentKind, cell: Cell) -> GridResult<()> {
        self.checked_index(kind, cell).map(|_| ())
    }

    fn checked_index(&self, kind: AgentKind, cell: Cell) -> GridResult<usize> {
        let Some(i) = self.index(cell) else {
            return Err(GridError::OutOfBounds { cell, width: self.width, height: self.height });
        };
        if let Some(occupant) = self.blocker(kind, cell) {
            return Err(GridError::OccupiedCell { cell, occupant });
        }
        Ok(i)
    }

    /// Put `agent` into `cell`.  Fails as [`check`][Self::check] does.
    pub fn place(&mut self, agent: AgentId, kind: AgentKind, cell: Cell) -> GridResult<()> {
        let i = self.checked_index(kind, cell)?;
        let slot = &mut self.slots[i];
        if kind.is_vehicle() {
            slot.vehicle = Some(Occupant { agent, kind });
        } else {
            slot.pedestrians.push(agent);
        }
        Ok(())
    }

    /// Move `agent` from `from` to `to`.
    ///
    /// The target is checked before anything changes, so on error the agent
    /// is still in `from`.
    pub fn relocate(
        &mut self,
        agent: AgentId,
        kind:  AgentKind,
        from:  Cell,
        to:    Cell,
    ) -> GridResult<()> {
        self.check(kind, to)?;
        if !self.remove(agent, from) {
            return Err(GridError::NotPresent { agent, cell: from });
        }
        self.place(agent, kind, to)
    }

    /// Take `agent` out of `cell`.  Returns `false` if it was not there.
    pub fn remove(&mut self, agent: AgentId, cell: Cell) -> bool {
        let Some(i) = self.index(cell) else {
            return false;
        };
        let slot = &mut self.slots[i];
        if slot.vehicle.is_some_and(|v| v.agent == agent) {
            slot.vehicle = None;
            return true;
        }
        match slot.pedestrians.iter().position(|&p| p == agent) {
            Some(pos) => {
                slot.pedestrians.remove(pos);
                true
            }
            None => false,
        }
    }
}
