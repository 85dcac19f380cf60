// Run Summary Report
// Structured JSON output describing one generated transition table

use serde::Serialize;

use crate::emitter::EmitError;
use crate::toll::TollState;
use crate::types::{Path, TransitionTable};

// ─── Statistics (per-payload aggregation) ───────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        Self {
            mean,
            std_dev: variance.sqrt(),
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Run Report ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub version: &'static str,
    pub measures: usize,
    pub path_count: usize,
    pub output: String,
    /// Seed of the social randomizer, if one was given.
    pub seed: Option<u64>,
    pub final_tolls: TollState,
    pub infections: Stats,
    pub deaths: Stats,
    pub paths: Vec<Path>,
}

impl RunReport {
    pub fn from_table(
        table: &TransitionTable,
        measures: usize,
        output: &str,
        seed: Option<u64>,
        timestamp: String,
    ) -> Self {
        let infections: Vec<f64> = table.paths.iter().map(|p| p.payload.infections as f64).collect();
        let deaths: Vec<f64> = table.paths.iter().map(|p| p.payload.deaths as f64).collect();
        Self {
            timestamp,
            version: env!("CARGO_PKG_VERSION"),
            measures,
            path_count: table.len(),
            output: output.to_string(),
            seed,
            final_tolls: table.final_state,
            infections: Stats::from_samples(&infections),
            deaths: Stats::from_samples(&deaths),
            paths: table.paths.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write(&self, path: &std::path::Path) -> Result<(), EmitError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
