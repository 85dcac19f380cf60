// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Pandemic Measures Planner - Planning Problem Emitter
//
// Writes the `(:init ...)` block consumed by the planner: a fixed preamble,
// then one record per path in table order. Writes are incremental and not
// rolled back, so a failing sink leaves the preamble plus a prefix of the
// records behind.

use std::fs::File;
use std::io::Write;

use rand::Rng;
use tracing::{debug, info};

use crate::types::{Path, TransitionTable};

/// Initial facts written once at the top of the problem file. The counters
/// are seeded literals, independent of the computed tolls.
pub const PREAMBLE: &str = "(:init \n (at gov initState) \n (= (research) 0) \n (= (total_infections) 1000) \n (= (total_deaths) 0) \n (= (total_social_impact) 0) \n";

/// Default file name of the generated problem.
pub const DEFAULT_OUTPUT: &str = "data.pddl";

/// Upper bound (exclusive) of the randomized social value per record.
const SOCIAL_SAMPLE_BOUND: u32 = 10;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ─── Record Template ─────────────────────────────────────────────────────────

/// Format one path record.
///
/// `infection_rate` is the scratch rate at write time, not a per-path
/// figure. `social` is sampled per record and unrelated to the payload's
/// social toll.
pub fn format_record(path: &Path, infection_rate: u32, social: u32) -> String {
    let from = &path.from;
    let to = &path.to;
    format!(
        "(accessible_measure gov '{from}')\n        \
         (= (infection_rate_consequence {to}) {infection_rate})\n        \
         (= (death_required '{from}' '{to}') {deaths})\n        \
         (= (infections_required '{from}' '{to}') {infections})\n        \
         (= (social_required '{from}' '{to}') {social})\n",
        deaths = path.payload.deaths,
        infections = path.payload.infections,
    )
}

/// Draw the emitted social value, uniform in `0..=9`.
pub fn sample_social<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(0..SOCIAL_SAMPLE_BOUND)
}

// ─── Emitter ─────────────────────────────────────────────────────────────────

/// Streams the preamble and path records into any `Write` sink.
pub struct RecordEmitter<W: Write> {
    sink: W,
    records_written: usize,
}

impl<W: Write> RecordEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, records_written: 0 }
    }

    pub fn write_preamble(&mut self) -> Result<(), EmitError> {
        self.sink.write_all(PREAMBLE.as_bytes())?;
        Ok(())
    }

    pub fn write_path<R: Rng>(
        &mut self,
        path: &Path,
        infection_rate: u32,
        rng: &mut R,
    ) -> Result<(), EmitError> {
        let record = format_record(path, infection_rate, sample_social(rng));
        self.sink.write_all(record.as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand the sink back.
    pub fn finish(mut self) -> Result<W, EmitError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Write the whole table to `sink`: preamble first, then every path in
/// table order. Returns the number of records written.
pub fn emit_table<W: Write, R: Rng>(
    table: &TransitionTable,
    sink: W,
    rng: &mut R,
) -> Result<usize, EmitError> {
    let rate = table.last_infection_rate();
    let mut emitter = RecordEmitter::new(sink);
    emitter.write_preamble()?;
    for path in &table.paths {
        emitter.write_path(path, rate, rng)?;
        debug!(from = %path.from, to = %path.to, "record written");
    }
    let written = emitter.records_written();
    emitter.finish()?;
    Ok(written)
}

/// Create (or truncate) `path` and stream the table into it.
pub fn write_problem_file<R: Rng>(
    path: &std::path::Path,
    table: &TransitionTable,
    rng: &mut R,
) -> Result<usize, EmitError> {
    let file = File::create(path)?;
    let written = emit_table(table, file, rng)?;
    info!(output = %path.display(), records = written, "problem file written");
    Ok(written)
}

/// Render the same text [`emit_table`] would write, as a string.
pub fn render_problem<R: Rng>(table: &TransitionTable, rng: &mut R) -> String {
    let rate = table.last_infection_rate();
    let mut out = String::from(PREAMBLE);
    for path in &table.paths {
        out.push_str(&format_record(path, rate, sample_social(rng)));
    }
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toll::TollState;
    use crate::params::ModelParams;
    use crate::types::Payload;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn path(from: &str, to: &str, infections: i64, deaths: i64) -> Path {
        Path {
            from: from.to_string(),
            to: to.to_string(),
            payload: Payload { infections, deaths, social: 5 },
        }
    }

    fn table(paths: Vec<Path>, rate: u32) -> TransitionTable {
        let mut final_state = TollState::initial(&ModelParams::default());
        final_state.set_rates(rate);
        TransitionTable { paths, final_state }
    }

    /// Accepts `budget` bytes, then fails every write.
    struct FailingSink {
        written: Vec<u8>,
        budget: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.written.len() + buf.len() > self.budget {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn record_template() {
        let p = path("School closure", "Research", 149_995, 5_099);
        let record = format_record(&p, 2, 7);
        let expected = "(accessible_measure gov 'School closure')\n        \
(= (infection_rate_consequence Research) 2)\n        \
(= (death_required 'School closure' 'Research') 5099)\n        \
(= (infections_required 'School closure' 'Research') 149995)\n        \
(= (social_required 'School closure' 'Research') 7)\n";
        assert_eq!(record, expected);
    }

    #[test]
    fn preamble_comes_first_then_records() {
        let t = table(vec![path("a", "b", 10, 0), path("a", "c", 20, 0)], 3);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut out = Vec::new();
        let written = emit_table(&t, &mut out, &mut rng).expect("test: Vec sink cannot fail");
        let text = String::from_utf8(out).expect("test: output is UTF-8");

        assert_eq!(written, 2);
        assert!(text.starts_with(PREAMBLE));
        assert_eq!(text.matches("(accessible_measure gov").count(), 2);
        assert_eq!(text.matches("(infection_rate_consequence b) 3)").count(), 1);
        assert_eq!(text.matches("(infection_rate_consequence c) 3)").count(), 1);
    }

    #[test]
    fn social_sample_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 10];
        for _ in 0..2_000 {
            let s = sample_social(&mut rng);
            assert!(s <= 9, "sample out of range: {}", s);
            seen[s as usize] = true;
        }
        assert!(seen.iter().all(|&b| b), "expected every value 0..=9 over 2000 draws");
    }

    #[test]
    fn render_matches_emitted_bytes_for_same_seed() {
        let t = table(vec![path("a", "b", 10, 0), path("b", "c", 4, 0)], 1);
        let mut out = Vec::new();
        emit_table(&t, &mut out, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let rendered = render_problem(&t, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(rendered.as_bytes(), out.as_slice());
    }

    #[test]
    fn failing_sink_leaves_partial_output() {
        let t = table(vec![path("a", "b", 10, 0), path("a", "c", 20, 0), path("b", "c", 5, 0)], 1);
        let one_record = format_record(&t.paths[0], 1, 0).len();
        let mut sink = FailingSink { written: Vec::new(), budget: PREAMBLE.len() + one_record };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = emit_table(&t, &mut sink, &mut rng).expect_err("test: sink should fail");
        assert!(matches!(err, EmitError::Io(_)), "expected Io, got: {err}");

        let partial = String::from_utf8(sink.written).unwrap();
        assert!(partial.starts_with(PREAMBLE));
        assert_eq!(partial.matches("(accessible_measure gov").count(), 1);
    }

    #[test]
    fn empty_table_writes_only_preamble() {
        let t = table(Vec::new(), 0);
        let mut out = Vec::new();
        let written = emit_table(&t, &mut out, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(written, 0);
        assert_eq!(out, PREAMBLE.as_bytes());
    }
}
