// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Pandemic Measures Planner - Type Definitions

use serde::{Deserialize, Serialize};

use crate::toll::TollState;

// ─── Measure ─────────────────────────────────────────────────────────────────

/// Deltas a measure would apply when taken again.
///
/// Carried with the catalog but never read by the cost model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepeatImpact {
    pub infection_change: i32,
    pub death_change: i32,
    pub social_change: i32,
}

/// A governmental intervention with a severity tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub name: String,
    /// Severity tier, 1 = mildest.
    pub segment: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_impact: Option<RepeatImpact>,
}

impl Measure {
    pub fn new(name: impl Into<String>, segment: u32) -> Self {
        Self { name: name.into(), segment, repeat_impact: None }
    }

    pub fn with_repeat_impact(mut self, impact: RepeatImpact) -> Self {
        self.repeat_impact = Some(impact);
        self
    }
}

// ─── Payload / Path ──────────────────────────────────────────────────────────

/// Cost of one transition between two measures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    pub infections: i64,
    pub deaths: i64,
    /// Social toll after this transition, in `[0, max_social]`.
    pub social: u32,
}

/// A directed transition `from -> to` and what it costs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Path {
    pub from: String,
    pub to: String,
    pub payload: Payload,
}

// ─── Transition Table ────────────────────────────────────────────────────────

/// Every generated path in traversal order, plus the toll state left behind
/// by the last transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitionTable {
    pub paths: Vec<Path>,
    pub final_state: TollState,
}

impl TransitionTable {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Scratch infection rate as of the last computed transition.
    ///
    /// This is the value every emitted record carries, since the whole
    /// table is computed before the first record is written.
    pub fn last_infection_rate(&self) -> u32 {
        self.final_state.infection_rate
    }
}
