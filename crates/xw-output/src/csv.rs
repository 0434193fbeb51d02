//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_metrics.csv`, one row per tick, columns named after the model's
//!   data collector (`CarsPassed`, `AvgTravelTime`, …)
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentSnapshotRow, OutputResult, TickMetricsRow};
use crate::writer::OutputWriter;

pub const METRICS_HEADER: [&str; 12] = [
    "Tick",
    "CarsPassed",
    "AvgTravelTime",
    "AvgWaitingTime",
    "QueueLength",
    "PedestriansCrossed",
    "AvgPedestrianTime",
    "PedestrianWaitTime",
    "EmergencyActive",
    "EmergenciesCleared",
    "VehiclePhase",
    "PedestrianPhase",
];

pub const SNAPSHOT_HEADER: [&str; 7] =
    ["tick", "agent_id", "kind", "x", "y", "wait_counter", "tier"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    metrics:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join("tick_metrics.csv"))?;
        metrics.write_record(METRICS_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        Ok(Self { metrics, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.tick.to_string(),
            row.cars_passed.to_string(),
            row.avg_travel_time.to_string(),
            row.avg_waiting_time.to_string(),
            row.queue_length.to_string(),
            row.pedestrians_crossed.to_string(),
            row.avg_pedestrian_time.to_string(),
            row.pedestrian_wait_time.to_string(),
            (row.emergency_active as u8).to_string(),
            row.emergencies_cleared.to_string(),
            row.vehicle_phase.to_owned(),
            row.pedestrian_phase.to_owned(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.kind.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.wait_counter.to_string(),
                row.tier.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
