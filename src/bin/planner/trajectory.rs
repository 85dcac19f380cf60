// Per-Transition JSONL Toll Trajectory Recorder
// Outputs one JSON line per costed transition, in traversal order

use measure_planner::{Path, TollState};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TollSnapshot {
    pub step: usize,
    pub from: String,
    pub to: String,
    pub infection_rate: u32,
    pub infections_toll: i64,
    pub death_toll: i64,
    pub social_toll: u32,
}

impl TollSnapshot {
    /// Snapshot of `state` as left behind by `path`.
    pub fn from_step(step: usize, path: &Path, state: &TollState) -> Self {
        Self {
            step,
            from: path.from.clone(),
            to: path.to.clone(),
            infection_rate: state.infection_rate,
            infections_toll: state.infections_toll,
            death_toll: state.death_toll,
            social_toll: state.social_toll,
        }
    }
}

/// Accumulates toll snapshots and writes them as JSONL
#[derive(Default)]
pub struct TrajectoryRecorder {
    snapshots: Vec<TollSnapshot>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, path: &Path, state: &TollState) {
        let step = self.snapshots.len();
        self.snapshots.push(TollSnapshot::from_step(step, path, state));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
