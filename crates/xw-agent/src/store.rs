//! `AgentStore`: every live agent, keyed and iterated by `AgentId`.
//!
//! Agents come and go every tick, so the store is a `BTreeMap` rather than
//! dense arrays: removal is O(log n), ids are never reused, and iteration is
//! always in ascending id order, which the apply phase relies on for
//! determinism.

use std::collections::BTreeMap;

use xw_core::{AgentId, AgentKind, Cell, Tick};

use crate::{Agent, AgentBody};

/// The set of agents currently on the grid.
#[derive(Clone, Debug)]
pub struct AgentStore {
    agents:  BTreeMap<AgentId, Agent>,
    next_id: AgentId,
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStore {
    pub fn new() -> Self {
        Self { agents: BTreeMap::new(), next_id: AgentId(0) }
    }

    /// Insert a new agent and return its freshly allocated id.
    pub fn spawn(&mut self, cell: Cell, spawn_tick: Tick, body: AgentBody) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        self.agents.insert(id, Agent { id, cell, spawn_tick, wait_counter: 0, body });
        id
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Take an agent out of the store.  Its id stays retired.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// All live agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Live agents of one kind in ascending id order.
    pub fn iter_kind(&self, kind: AgentKind) -> impl Iterator<Item = &Agent> {
        self.agents.values().filter(move |a| a.kind() == kind)
    }

    /// Ids of all live agents in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn count(&self, kind: AgentKind) -> usize {
        self.iter_kind(kind).count()
    }

    /// Number of agents ever spawned, including those that have exited.
    #[inline]
    pub fn total_spawned(&self) -> u32 {
        self.next_id.0
    }
}
