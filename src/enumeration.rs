// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Pandemic Measures Planner - Enumeration Engine

use std::collections::VecDeque;

use tracing::info;

use crate::cost_model::{compute_transition, CostError};
use crate::params::ModelParams;
use crate::toll::TollState;
use crate::types::{Measure, Path, TransitionTable};

// ─── Pair Enumeration ────────────────────────────────────────────────────────

/// Ordered `(from, to)` index pairs in traversal order.
///
/// Works on a copy of the catalog: the front measure is paired with every
/// other measure still present, then removed for good before the next
/// source is taken. Measures are compared by position, not name, so
/// duplicate names still produce their pairs. For `n` measures this yields
/// `n * (n - 1) / 2` pairs, each directed from the earlier catalog entry to
/// the later one.
pub fn transition_pairs(catalog: &[Measure]) -> Vec<(usize, usize)> {
    let n = catalog.len();
    let mut working: VecDeque<usize> = (0..n).collect();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    while let Some(&from) = working.front() {
        for &to in working.iter() {
            if to != from {
                pairs.push((from, to));
            }
        }
        working.pop_front();
        info!(source = %catalog[from].name, remaining = working.len(), "source pass complete");
    }

    pairs
}

// ─── Toll Fold ───────────────────────────────────────────────────────────────

/// Cost `pairs` in order, threading the toll state from `initial`.
///
/// `on_step` sees every path together with the state right after it. A pair
/// naming an index outside `catalog` is an error, not a panic.
pub fn fold_transitions<F>(
    catalog: &[Measure],
    pairs: &[(usize, usize)],
    initial: TollState,
    params: &ModelParams,
    mut on_step: F,
) -> Result<TransitionTable, CostError>
where
    F: FnMut(&Path, &TollState),
{
    let mut state = initial;
    let mut paths = Vec::with_capacity(pairs.len());
    let lookup = move |index: usize| {
        catalog.get(index).ok_or(CostError::UnknownMeasure { index, len: catalog.len() })
    };

    for &(from_idx, to_idx) in pairs {
        let from = lookup(from_idx)?;
        let to = lookup(to_idx)?;
        let (next, payload) = compute_transition(state, from, to, params)?;
        state = next;

        let path = Path { from: from.name.clone(), to: to.name.clone(), payload };
        on_step(&path, &state);
        paths.push(path);
    }

    Ok(TransitionTable { paths, final_state: state })
}

// ─── Entry Points ────────────────────────────────────────────────────────────

/// Enumerate and cost every transition of `catalog`, starting from the
/// initial tolls in `params`.
pub fn generate_all_transitions(
    catalog: &[Measure],
    params: &ModelParams,
) -> Result<TransitionTable, CostError> {
    generate_all_transitions_observed(catalog, params, |_, _| {})
}

/// Same as [`generate_all_transitions`], reporting each step to `on_step`.
pub fn generate_all_transitions_observed<F>(
    catalog: &[Measure],
    params: &ModelParams,
    on_step: F,
) -> Result<TransitionTable, CostError>
where
    F: FnMut(&Path, &TollState),
{
    let pairs = transition_pairs(catalog);
    let table = fold_transitions(catalog, &pairs, TollState::initial(params), params, on_step)?;
    info!(
        measures = catalog.len(),
        paths = table.len(),
        infections_toll = table.final_state.infections_toll,
        death_toll = table.final_state.death_toll,
        social_toll = table.final_state.social_toll,
        "transition table complete"
    );
    Ok(table)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
