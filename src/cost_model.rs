// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Transition cost model.
//!
//! Costs moving from one measure to another given the current tolls:
//!
//! ```text
//! distance   = |to.segment - from.segment| + 1
//! infections = floor((max_infections - infections_toll) * distance / 100)
//! deaths     = floor(infections * death_ratio)
//! ```
//!
//! Infections are a share of the remaining capacity below `max_infections`,
//! so each successive transition yields less as the toll grows. The rate is
//! not clamped to its documented 1..=10 range.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::params::{ModelParams, DOCUMENTED_MAX_RATE};
use crate::toll::TollState;
use crate::types::{Measure, Payload};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Raised when a transition's arithmetic leaves the `i64` range, or when a
/// pair names a measure the catalog does not have.
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("arithmetic overflow costing transition '{from}' -> '{to}'")]
    Overflow { from: String, to: String },

    #[error("no measure at catalog index {index} (catalog has {len})")]
    UnknownMeasure { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Cost model
// ---------------------------------------------------------------------------

/// Segment distance between two measures, always at least 1.
pub fn segment_distance(from: &Measure, to: &Measure) -> u32 {
    from.segment.abs_diff(to.segment).saturating_add(1)
}

/// Cost the transition `from -> to` against `state`.
///
/// Takes the toll state by value and hands back the advanced state with the
/// payload. The input state is the one the infections are computed from;
/// the returned state has the new payload folded in.
pub fn compute_transition(
    mut state: TollState,
    from: &Measure,
    to: &Measure,
    params: &ModelParams,
) -> Result<(TollState, Payload), CostError> {
    let overflow = || CostError::Overflow { from: from.name.clone(), to: to.name.clone() };

    let distance = segment_distance(from, to);
    if distance > DOCUMENTED_MAX_RATE {
        warn!(
            from = %from.name,
            to = %to.name,
            distance,
            "segment distance above documented rate range, using it unclamped"
        );
    }
    state.set_rates(distance);

    let remaining = Decimal::from(params.max_infections) - Decimal::from(state.infections_toll);
    let share = Decimal::from(state.infection_rate) / dec!(100);
    let infections = remaining
        .checked_mul(share)
        .and_then(|v| v.floor().to_i64())
        .ok_or_else(overflow)?;
    let deaths = Decimal::from(infections)
        .checked_mul(params.death_ratio)
        .and_then(|v| v.floor().to_i64())
        .ok_or_else(overflow)?;

    if state.infections_toll.checked_add(infections).is_none()
        || state.death_toll.checked_add(deaths).is_none()
    {
        return Err(overflow());
    }
    let social = state.apply_delta(infections, deaths, params);

    debug!(
        from = %from.name,
        to = %to.name,
        rate = distance,
        infections,
        deaths,
        social,
        "transition costed"
    );

    Ok((state, Payload { infections, deaths, social }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
