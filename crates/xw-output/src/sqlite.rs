//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `tick_metrics` and `agent_snapshots`.

use std::path::Path;

use rusqlite::Connection;

use crate::{AgentSnapshotRow, OutputResult, TickMetricsRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_metrics (
                 tick                 INTEGER PRIMARY KEY,
                 cars_passed          INTEGER NOT NULL,
                 avg_travel_time      REAL    NOT NULL,
                 avg_waiting_time     REAL    NOT NULL,
                 queue_length         INTEGER NOT NULL,
                 pedestrians_crossed  INTEGER NOT NULL,
                 avg_pedestrian_time  REAL    NOT NULL,
                 pedestrian_wait_time REAL    NOT NULL,
                 emergency_active     INTEGER NOT NULL,
                 emergencies_cleared  INTEGER NOT NULL,
                 vehicle_phase        TEXT    NOT NULL,
                 pedestrian_phase     TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 tick         INTEGER NOT NULL,
                 agent_id     INTEGER NOT NULL,
                 kind         TEXT    NOT NULL,
                 x            INTEGER NOT NULL,
                 y            INTEGER NOT NULL,
                 wait_counter INTEGER NOT NULL,
                 tier         TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_metrics \
             (tick, cars_passed, avg_travel_time, avg_waiting_time, queue_length, \
              pedestrians_crossed, avg_pedestrian_time, pedestrian_wait_time, \
              emergency_active, emergencies_cleared, vehicle_phase, pedestrian_phase) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                row.tick,
                row.cars_passed,
                row.avg_travel_time,
                row.avg_waiting_time,
                row.queue_length,
                row.pedestrians_crossed,
                row.avg_pedestrian_time,
                row.pedestrian_wait_time,
                row.emergency_active as i64,
                row.emergencies_cleared,
                row.vehicle_phase,
                row.pedestrian_phase,
            ],
        )?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (tick, agent_id, kind, x, y, wait_counter, tier) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.agent_id,
                    row.kind,
                    row.x,
                    row.y,
                    row.wait_counter,
                    row.tier,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
