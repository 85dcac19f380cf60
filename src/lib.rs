// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Pandemic Measures Planner

pub mod types;
pub mod params;
pub mod catalog;
pub mod toll;
pub mod cost_model;
pub mod enumeration;
pub mod emitter;
pub mod report;
pub mod planner;

pub use types::*;
pub use catalog::{CatalogError, MeasureCatalog};
pub use cost_model::{compute_transition, segment_distance, CostError};
pub use emitter::EmitError;
pub use enumeration::{generate_all_transitions, transition_pairs};
pub use params::{ModelParams, ParamsError};
pub use planner::{Planner, PlannerError};
pub use toll::TollState;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Transition table over the shipped catalog, exposed to JS.
#[wasm_bindgen]
pub struct PlannerSession {
    measures: usize,
    table: TransitionTable,
}

#[wasm_bindgen]
impl PlannerSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PlannerSession, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let planner = Planner::default();
        let table = planner
            .build_table()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { measures: planner.catalog().len(), table })
    }

    pub fn measure_count(&self) -> usize {
        self.measures
    }

    pub fn path_count(&self) -> usize {
        self.table.len()
    }

    pub fn paths(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.table.paths).unwrap_or(JsValue::NULL)
    }

    pub fn final_tolls(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.table.final_state).unwrap_or(JsValue::NULL)
    }

    /// Problem file text, social values drawn from a ChaCha8 stream seeded
    /// with `seed`.
    pub fn render_problem(&self, seed: u64) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        emitter::render_problem(&self.table, &mut rng)
    }
}
