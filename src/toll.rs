// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Toll accumulator.
//!
//! Running totals of infections, deaths and social impact across one run,
//! plus the scratch rates derived for the transition currently being costed.
//! The state is an explicit value threaded through the cost model, so the
//! update order is the traversal order and nothing else:
//!
//! ```text
//! infections_toll += infections
//! death_toll      += deaths
//! social_toll      = min(social_toll + social_step, max_social)
//! ```

use serde::{Deserialize, Serialize};

use crate::params::ModelParams;

// ---------------------------------------------------------------------------
// TollState
// ---------------------------------------------------------------------------

/// Cumulative tolls and the scratch rates of the last costed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TollState {
    pub infections_toll: i64,
    pub death_toll: i64,
    /// Saturates at `max_social`; never decreases.
    pub social_toll: u32,
    /// Scratch rate, recomputed before every cost calculation. Zero until
    /// the first transition.
    pub infection_rate: u32,
    /// Scratch rate, always equal to `infection_rate` once set.
    pub death_rate: u32,
}

impl TollState {
    /// Starting tolls for a run. The social seed is capped at `max_social`.
    pub fn initial(params: &ModelParams) -> Self {
        Self {
            infections_toll: params.initial_infections_toll,
            death_toll: params.initial_death_toll,
            social_toll: params.initial_social_toll.min(params.max_social),
            infection_rate: 0,
            death_rate: 0,
        }
    }

    /// Read-only snapshot.
    pub fn current_state(&self) -> TollState {
        *self
    }

    /// Overwrite both scratch rates with the segment distance of the
    /// transition about to be costed.
    pub fn set_rates(&mut self, distance: u32) {
        self.infection_rate = distance;
        self.death_rate = distance;
    }

    /// Fold one transition's deltas into the running totals.
    ///
    /// Infections and deaths are added unconditionally. The social toll
    /// moves up by the flat step and saturates; the returned value is the
    /// new social toll.
    pub fn apply_delta(&mut self, infections: i64, deaths: i64, params: &ModelParams) -> u32 {
        self.infections_toll += infections;
        self.death_toll += deaths;
        self.social_toll = self
            .social_toll
            .saturating_add(params.social_step)
            .min(params.max_social);
        self.social_toll
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
