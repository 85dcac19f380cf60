// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Pandemic Measures Planner - Pipeline Driver

use rand::Rng;
use tracing::info;

use crate::catalog::{CatalogError, MeasureCatalog};
use crate::cost_model::CostError;
use crate::emitter::{self, EmitError};
use crate::enumeration;
use crate::params::{ModelParams, ParamsError};
use crate::toll::TollState;
use crate::types::{Path, TransitionTable};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

// ─── Planner ─────────────────────────────────────────────────────────────────

/// Catalog plus parameters; computes the transition table and writes it.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    catalog: MeasureCatalog,
    params: ModelParams,
}

impl Planner {
    /// Pair a catalog with a parameter set, rejecting invalid parameters.
    pub fn new(catalog: MeasureCatalog, params: ModelParams) -> Result<Self, PlannerError> {
        params.validate()?;
        Ok(Self { catalog, params })
    }

    pub fn catalog(&self) -> &MeasureCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Compute the full table in memory.
    pub fn build_table(&self) -> Result<TransitionTable, PlannerError> {
        Ok(enumeration::generate_all_transitions(self.catalog.measures(), &self.params)?)
    }

    /// Compute the full table, reporting each step to `on_step`.
    pub fn build_table_observed<F>(&self, on_step: F) -> Result<TransitionTable, PlannerError>
    where
        F: FnMut(&Path, &TollState),
    {
        Ok(enumeration::generate_all_transitions_observed(
            self.catalog.measures(),
            &self.params,
            on_step,
        )?)
    }

    /// Compute the table, then write it to `output`. Nothing is written if
    /// the computation fails.
    pub fn write_problem<R: Rng>(
        &self,
        output: &std::path::Path,
        rng: &mut R,
    ) -> Result<(TransitionTable, usize), PlannerError> {
        let table = self.build_table()?;
        let written = emitter::write_problem_file(output, &table, rng)?;
        info!(measures = self.catalog.len(), records = written, "planning problem ready");
        Ok((table, written))
    }
}
