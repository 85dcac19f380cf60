// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Model parameters for the transition-cost model.
//!
//! All values are compile-time defaults; [`ModelParams::default`] reproduces
//! the planner's reference run exactly. A custom parameter set can be
//! deserialized from JSON for what-if runs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Population ceiling for cumulative infections.
pub const MAX_INFECTIONS: i64 = 15_000_000;

/// Saturation point of the social toll.
pub const MAX_SOCIAL: u32 = 100;

/// Flat social increase per transition.
pub const SOCIAL_STEP: u32 = 5;

/// Share of newly computed infections that become deaths (3.4%).
pub const DEATH_RATIO: Decimal = dec!(0.034);

/// Documented upper bound of the scratch rates. Not enforced.
pub const DOCUMENTED_MAX_RATE: u32 = 10;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("{field} is {value}, tolls cannot start negative")]
    NegativeToll { field: &'static str, value: i64 },

    #[error("initial infections toll {toll} exceeds the ceiling {max}")]
    TollAboveCeiling { toll: i64, max: i64 },

    #[error("death ratio {0} is outside [0, 1]")]
    DeathRatioOutOfRange(Decimal),

    #[error("invalid parameter JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ModelParams
// ---------------------------------------------------------------------------

/// Constants driving the toll accumulator and the cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Population ceiling; infections are a share of what remains below it.
    pub max_infections: i64,
    /// Social toll saturation point.
    pub max_social: u32,
    /// Social increase applied on every transition.
    pub social_step: u32,
    /// Deaths per new infection.
    pub death_ratio: Decimal,
    /// Infections already counted when the run starts.
    pub initial_infections_toll: i64,
    /// Deaths already counted when the run starts.
    pub initial_death_toll: i64,
    /// Social toll when the run starts.
    pub initial_social_toll: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            max_infections: MAX_INFECTIONS,
            max_social: MAX_SOCIAL,
            social_step: SOCIAL_STEP,
            death_ratio: DEATH_RATIO,
            initial_infections_toll: 460,
            initial_death_toll: 8,
            initial_social_toll: 0,
        }
    }
}

impl ModelParams {
    /// Parse a parameter set from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter sets that would produce negative payloads: the
    /// starting tolls must sit in `0..=max_infections` and the death ratio
    /// in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.initial_infections_toll < 0 {
            return Err(ParamsError::NegativeToll {
                field: "initial_infections_toll",
                value: self.initial_infections_toll,
            });
        }
        if self.initial_death_toll < 0 {
            return Err(ParamsError::NegativeToll {
                field: "initial_death_toll",
                value: self.initial_death_toll,
            });
        }
        if self.initial_infections_toll > self.max_infections {
            return Err(ParamsError::TollAboveCeiling {
                toll: self.initial_infections_toll,
                max: self.max_infections,
            });
        }
        if self.death_ratio < Decimal::ZERO || self.death_ratio > Decimal::ONE {
            return Err(ParamsError::DeathRatioOutOfRange(self.death_ratio));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let p = ModelParams::default();
        assert_eq!(p.max_infections, 15_000_000);
        assert_eq!(p.max_social, 100);
        assert_eq!(p.social_step, 5);
        assert_eq!(p.death_ratio, dec!(0.034));
        assert_eq!(p.initial_infections_toll, 460);
        assert_eq!(p.initial_death_toll, 8);
        assert_eq!(p.initial_social_toll, 0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = ModelParams::from_json(r#"{ "max_social": 40 }"#)
            .expect("test: partial params should parse");
        assert_eq!(p.max_social, 40);
        assert_eq!(p.max_infections, MAX_INFECTIONS);
        assert_eq!(p.initial_death_toll, 8);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = ModelParams::from_json("{ max_social: }").expect_err("test: bad JSON");
        assert!(matches!(err, ParamsError::Parse(_)), "got: {err}");
    }

    #[test]
    fn defaults_validate() {
        assert!(ModelParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_initial_toll_above_ceiling() {
        let err = ModelParams::from_json(r#"{ "initial_infections_toll": 20000000 }"#)
            .expect_err("test: toll above ceiling");
        assert!(
            matches!(err, ParamsError::TollAboveCeiling { toll: 20_000_000, max: MAX_INFECTIONS }),
            "got: {err}"
        );
    }

    #[test]
    fn rejects_negative_initial_tolls() {
        let err = ModelParams::from_json(r#"{ "initial_infections_toll": -1 }"#)
            .expect_err("test: negative infections toll");
        assert!(
            matches!(err, ParamsError::NegativeToll { field: "initial_infections_toll", value: -1 }),
            "got: {err}"
        );

        let p = ModelParams { initial_death_toll: -8, ..ModelParams::default() };
        let err = p.validate().expect_err("test: negative death toll");
        assert!(
            matches!(err, ParamsError::NegativeToll { field: "initial_death_toll", value: -8 }),
            "got: {err}"
        );
    }

    #[test]
    fn rejects_death_ratio_outside_unit_range() {
        let err = ModelParams::from_json(r#"{ "death_ratio": "-1" }"#)
            .expect_err("test: negative ratio");
        assert!(matches!(err, ParamsError::DeathRatioOutOfRange(_)), "got: {err}");

        let p = ModelParams { death_ratio: dec!(1.5), ..ModelParams::default() };
        assert!(matches!(p.validate(), Err(ParamsError::DeathRatioOutOfRange(_))));

        let edge = ModelParams { death_ratio: dec!(1), ..ModelParams::default() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn out_of_range_toll_and_ratio_reported_before_use() {
        // Would otherwise yield negative infections with positive deaths.
        let json = r#"{ "initial_infections_toll": 20000000, "death_ratio": "-1" }"#;
        assert!(ModelParams::from_json(json).is_err());
    }
}
