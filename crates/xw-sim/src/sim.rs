//! The `Sim` struct and its tick loop.

use log::{debug, info, trace};

use xw_agent::{Agent, AgentBody, AgentStore, Pedestrian, Vehicle};
use xw_behavior::{BehaviorModel, Geometry, Intent, SimContext};
use xw_core::{AgentId, AgentKind, Cell, SimClock, SimConfig, SimRng, Tick};
use xw_grid::Grid;
use xw_signal::{Controller, Demand, Signal, SignalEvent};

use crate::{AgentView, MetricsSeries, NoopObserver, SimObserver, SimResult, TickMetrics};

// ── Running totals ────────────────────────────────────────────────────────────

/// Cumulative counters over exited agents.
#[derive(Clone, Debug, Default)]
pub(crate) struct Totals {
    pub cars_passed:           u64,
    pub total_travel_time:     u64,
    pub pedestrians_crossed:   u64,
    pub total_pedestrian_time: u64,
    pub emergencies_cleared:   u64,
}

/// Mean of `total` over `count` items, 0 when there are none.
fn mean(total: u64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { total as f64 / count as f64 }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` holds all simulation state and drives the five-phase tick loop:
///
/// 1. **Spawn**: three Bernoulli draws (vehicle, pedestrian, emergency
///    vehicle); each spawn needs an empty entry cell.
/// 2. **Signal**: the controller updates from the demand measured on the
///    post-spawn grid.
/// 3. **Decide** (optionally parallel with the `parallel` feature): every
///    live agent produces one [`Intent`] against a read-only [`SimContext`].
/// 4. **Apply** (sequential): pedestrians first, then vehicles, each in
///    ascending `AgentId` order.  A move into a cell taken earlier in the
///    phase is downgraded to a hold.
/// 5. **Metrics**: a [`TickMetrics`] row is appended to the series.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    /// Configuration the run was built from.
    pub config: SimConfig,

    /// Simulation clock: the tick the next `step()` will process.
    pub clock: SimClock,

    /// The behavior model.  Called once per live agent per tick.
    pub behavior: B,

    pub(crate) geometry:   Geometry,
    pub(crate) grid:       Grid,
    pub(crate) agents:     AgentStore,
    pub(crate) controller: Controller,
    pub(crate) rng:        SimRng,
    pub(crate) metrics:    MetricsSeries,
    pub(crate) totals:     Totals,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Process one tick.
    ///
    /// Returns a copy of the row just appended to [`metrics`][Self::metrics];
    /// drivers that only need the series can ignore it.
    pub fn step(&mut self) -> TickMetrics {
        self.step_with(&mut NoopObserver)
    }

    /// Process one tick, reporting to `observer`.
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> TickMetrics {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let row = self.process_tick(now, observer);
        self.metrics.push(row);
        observer.on_tick_end(now, &row);
        observer.on_snapshot(now, &self.agents, self.controller.signal());

        self.clock.advance();
        row
    }

    /// Run exactly `n` ticks from the current position, then call
    /// `observer.on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step_with(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> TickMetrics {
        // ── Phase 1: spawn ────────────────────────────────────────────────
        self.spawn_phase(now);

        // ── Phase 2: signal ───────────────────────────────────────────────
        let demand = self.measure_demand();
        if let Some(event) = self.controller.update(&demand) {
            match event {
                SignalEvent::OverrideBegan => {
                    info!("{now}: emergency override began, {} request(s)", demand.priority_requests);
                }
                SignalEvent::OverrideCleared => info!("{now}: emergency override cleared"),
                _ => {}
            }
        }

        // ── Phase 3: decide ───────────────────────────────────────────────
        let mut intents = self.compute_intents(now);

        // ── Phase 4: apply ────────────────────────────────────────────────
        //
        // Pedestrians before vehicles, ascending id within each class.  The
        // sort is stable and intents arrive in id order already.
        intents.sort_by_key(|&(id, kind, _)| (kind.is_vehicle(), id));
        for (id, _, intent) in intents {
            self.apply_intent(id, intent, now, observer);
        }

        // ── Phase 5: metrics ──────────────────────────────────────────────
        let row = self.measure(now);
        debug!(
            "{now}: {} / {}, {} vehicles, {} pedestrians, queue {}",
            row.vehicle_phase,
            row.pedestrian_phase,
            row.live_vehicles + row.live_emergency,
            row.live_pedestrians,
            row.queue_length,
        );
        row
    }

    fn spawn_phase(&mut self, now: Tick) {
        // Always draw all three so the RNG stream does not depend on which
        // spawns succeed.
        let vehicle    = self.rng.gen_bool(self.config.spawn_rate);
        let pedestrian = self.rng.gen_bool(self.config.pedestrian_spawn_rate);
        let emergency  = self.rng.gen_bool(self.config.emergency_spawn_rate);

        let entry = self.config.lane_entry();
        if vehicle {
            self.try_spawn(now, entry, AgentBody::Vehicle(Vehicle::regular()));
        }

        if pedestrian {
            let rows = self.config.sidewalk_rows();
            let edges = [0, self.config.width - 1];
            let row = self.rng.choose(&rows).copied().unwrap_or(0);
            let x = self.rng.choose(&edges).copied().unwrap_or(0);
            let cell = Cell::new(x, row);
            let target = self.config.opposite_row(row);
            let body = Pedestrian::new(cell, target, self.geometry.crossing_column);
            self.try_spawn(now, cell, AgentBody::Pedestrian(body));
        }

        if emergency {
            if self.controller.signal().emergency_active() || self.priority_requests() > 0 {
                trace!("{now}: emergency spawn suppressed, override active");
            } else {
                self.try_spawn(now, entry, AgentBody::Vehicle(Vehicle::emergency()));
            }
        }
    }

    /// Spawn into `cell` only if nothing at all stands there.
    fn try_spawn(&mut self, now: Tick, cell: Cell, body: AgentBody) -> Option<AgentId> {
        if !self.grid.is_empty(cell) {
            trace!("{now}: spawn rejected, {cell} occupied");
            return None;
        }
        self.place_new(now, cell, body).ok()
    }

    /// Insert a new agent into the grid and the store.
    fn place_new(&mut self, now: Tick, cell: Cell, body: AgentBody) -> SimResult<AgentId> {
        let kind = match &body {
            AgentBody::Vehicle(v) if v.is_emergency => AgentKind::EmergencyVehicle,
            AgentBody::Vehicle(_) => AgentKind::Vehicle,
            AgentBody::Pedestrian(_) => AgentKind::Pedestrian,
        };
        self.grid.check(kind, cell)?;
        let id = self.agents.spawn(cell, now, body);
        self.grid.place(id, kind, cell)?;
        trace!("{now}: spawned {kind} {id} at {cell}");
        Ok(id)
    }

    fn priority_requests(&self) -> u32 {
        let cc = self.geometry.crossing_column;
        self.agents.iter().filter(|a| a.requests_priority(cc)).count() as u32
    }

    fn measure_demand(&self) -> Demand {
        let mut demand = Demand { priority_requests: self.priority_requests(), ..Demand::default() };
        for agent in self.agents.iter() {
            if agent.is_waiting_pedestrian() {
                demand.pedestrians_waiting += 1;
            } else if agent.is_crossing_pedestrian() {
                demand.pedestrians_crossing += 1;
            }
        }
        demand
    }

    /// Compute one intent per live agent.
    ///
    /// With the `parallel` Cargo feature, decisions run on Rayon's thread
    /// pool.  Results come back in ascending id order either way.
    fn compute_intents(&self, now: Tick) -> Vec<(AgentId, AgentKind, Intent)> {
        let ctx = SimContext::new(
            now,
            self.geometry,
            self.controller.signal(),
            &self.grid,
            &self.agents,
        );
        let behavior = &self.behavior;

        #[cfg(not(feature = "parallel"))]
        {
            self.agents
                .iter()
                .map(|agent| (agent.id, agent.kind(), behavior.decide(agent, &ctx)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let live: Vec<&Agent> = self.agents.iter().collect();
            live.par_iter()
                .map(|agent| (agent.id, agent.kind(), behavior.decide(agent, &ctx)))
                .collect()
        }
    }

    /// Apply a single agent's intent during the sequential write phase.
    fn apply_intent<O: SimObserver>(
        &mut self,
        id:       AgentId,
        intent:   Intent,
        now:      Tick,
        observer: &mut O,
    ) {
        let cc = self.geometry.crossing_column;
        let Some(agent) = self.agents.get_mut(id) else {
            return;
        };

        match intent {
            Intent::Hold => agent.record_hold(),

            // ── MoveTo: relocate, or hold if the cell was taken ───────────
            Intent::MoveTo(to) => {
                match self.grid.relocate(id, agent.kind(), agent.cell, to) {
                    Ok(()) => {
                        agent.record_move(to, cc);
                        if agent.mark_cleared(cc) {
                            self.totals.emergencies_cleared += 1;
                            info!("{now}: emergency vehicle {id} cleared the crossing at {to}");
                        }
                    }
                    Err(e) => {
                        trace!("{now}: {id} held: {e}");
                        agent.record_hold();
                    }
                }
            }

            // ── Exit: remove and account ──────────────────────────────────
            Intent::Exit => {
                let cell = agent.cell;
                let removed = self.grid.remove(id, cell);
                if !removed {
                    debug!("{now}: {id} exited but was not in the grid at {cell}");
                }
                debug_assert!(removed, "grid and agent store disagree about {id}");
                let Some(mut agent) = self.agents.remove(id) else {
                    return;
                };
                agent.record_exit();

                let elapsed = now.since(agent.spawn_tick);
                match agent.kind() {
                    AgentKind::Vehicle => {
                        self.totals.cars_passed += 1;
                        self.totals.total_travel_time += elapsed;
                    }
                    AgentKind::Pedestrian => {
                        self.totals.pedestrians_crossed += 1;
                        self.totals.total_pedestrian_time += elapsed;
                    }
                    AgentKind::EmergencyVehicle => {}
                }
                trace!("{now}: {id} exited after {elapsed} ticks");
                observer.on_agent_exit(now, &agent);
            }
        }
    }

    fn measure(&self, now: Tick) -> TickMetrics {
        let signal = self.controller.signal();
        TickMetrics {
            tick:                 now,
            cars_passed:          self.totals.cars_passed,
            avg_travel_time:      self.compute_avg_travel_time(),
            avg_waiting_time:     self.compute_avg_waiting_time(),
            queue_length:         self.queue_length(),
            pedestrians_crossed:  self.totals.pedestrians_crossed,
            avg_pedestrian_time:  self.compute_avg_pedestrian_time(),
            pedestrian_wait_time: self.compute_avg_pedestrian_waiting_time(),
            pedestrians_waiting:  self.pedestrians_waiting(),
            emergency_active:     signal.emergency_active(),
            emergencies_cleared:  self.totals.emergencies_cleared,
            vehicle_phase:        signal.vehicle_phase(),
            pedestrian_phase:     signal.pedestrian_phase(),
            live_vehicles:        self.agents.count(AgentKind::Vehicle) as u32,
            live_emergency:       self.agents.count(AgentKind::EmergencyVehicle) as u32,
            live_pedestrians:     self.agents.count(AgentKind::Pedestrian) as u32,
        }
    }

    // ── Counters and metric accessors ─────────────────────────────────────

    /// Regular vehicles that have left the grid.
    pub fn cars_passed(&self) -> u64 {
        self.totals.cars_passed
    }

    pub fn pedestrians_crossed(&self) -> u64 {
        self.totals.pedestrians_crossed
    }

    pub fn emergencies_cleared(&self) -> u64 {
        self.totals.emergencies_cleared
    }

    /// Mean travel time of exited regular vehicles, 0 if none.
    pub fn compute_avg_travel_time(&self) -> f64 {
        mean(self.totals.total_travel_time, self.totals.cars_passed)
    }

    /// Mean wait counter over live regular vehicles, 0 if none.
    pub fn compute_avg_waiting_time(&self) -> f64 {
        let (sum, n) = self
            .agents
            .iter_kind(AgentKind::Vehicle)
            .fold((0u64, 0u64), |(s, n), a| (s + u64::from(a.wait_counter), n + 1));
        mean(sum, n)
    }

    /// Live regular vehicles before the crossing column that are held.
    pub fn queue_length(&self) -> u32 {
        let cc = self.geometry.crossing_column;
        self.agents
            .iter_kind(AgentKind::Vehicle)
            .filter(|a| a.cell.x < cc && a.wait_counter > 0)
            .count() as u32
    }

    /// Mean spawn-to-exit time of exited pedestrians, 0 if none.
    pub fn compute_avg_pedestrian_time(&self) -> f64 {
        mean(self.totals.total_pedestrian_time, self.totals.pedestrians_crossed)
    }

    /// Mean wait counter over live pedestrians, 0 if none.
    pub fn compute_avg_pedestrian_waiting_time(&self) -> f64 {
        let (sum, n) = self
            .agents
            .iter_kind(AgentKind::Pedestrian)
            .fold((0u64, 0u64), |(s, n), a| (s + u64::from(a.wait_counter), n + 1));
        mean(sum, n)
    }

    /// Pedestrians standing at the crossing column.
    pub fn pedestrians_waiting(&self) -> u32 {
        self.agents.iter().filter(|a| a.is_waiting_pedestrian()).count() as u32
    }

    pub fn emergency_active(&self) -> bool {
        self.controller.signal().emergency_active()
    }

    // ── Read-only state ───────────────────────────────────────────────────

    pub fn signal(&self) -> &Signal {
        self.controller.signal()
    }

    /// Per-tick metrics of every processed tick.
    pub fn metrics(&self) -> &MetricsSeries {
        &self.metrics
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent_store(&self) -> &AgentStore {
        &self.agents
    }

    /// Views of every live agent in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        let threshold = self.config.wait_threshold;
        self.agents.iter().map(move |a| AgentView::of(a, threshold))
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    // ── Manual placement ──────────────────────────────────────────────────

    /// Place a regular vehicle in the lane at column `x`.
    pub fn spawn_vehicle_at(&mut self, x: u32) -> SimResult<AgentId> {
        let cell = Cell::new(x, self.geometry.vehicle_lane);
        self.place_new(self.clock.current_tick, cell, AgentBody::Vehicle(Vehicle::regular()))
    }

    /// Place an emergency vehicle at the lane entry.
    pub fn spawn_emergency(&mut self) -> SimResult<AgentId> {
        self.spawn_emergency_at(0)
    }

    /// Place an emergency vehicle in the lane at column `x`.
    pub fn spawn_emergency_at(&mut self, x: u32) -> SimResult<AgentId> {
        let cell = Cell::new(x, self.geometry.vehicle_lane);
        self.place_new(self.clock.current_tick, cell, AgentBody::Vehicle(Vehicle::emergency()))
    }

    /// Place a pedestrian at `cell`, headed for the sidewalk opposite its row.
    pub fn spawn_pedestrian_at(&mut self, cell: Cell) -> SimResult<AgentId> {
        let target_row = self.config.opposite_row(cell.y);
        let body = Pedestrian::new(cell, target_row, self.geometry.crossing_column);
        self.place_new(self.clock.current_tick, cell, AgentBody::Pedestrian(body))
    }
}
