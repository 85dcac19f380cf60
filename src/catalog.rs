// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Pandemic Measures Planner - Measure Catalog

use std::collections::HashSet;

use crate::types::{Measure, RepeatImpact};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog contains no measures")]
    Empty,

    #[error("measure #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("measure '{name}' has segment {segment}, segments start at 1")]
    InvalidSegment { name: String, segment: u32 },

    #[error("measure '{0}' appears more than once")]
    DuplicateName(String),

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Ordered list of measures. Order decides enumeration and removal order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureCatalog {
    measures: Vec<Measure>,
}

impl MeasureCatalog {
    /// Build a catalog, rejecting empty names, zero segments and duplicate
    /// names.
    pub fn new(measures: Vec<Measure>) -> Result<Self, CatalogError> {
        if measures.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, m) in measures.iter().enumerate() {
            if m.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if m.segment < 1 {
                return Err(CatalogError::InvalidSegment {
                    name: m.name.clone(),
                    segment: m.segment,
                });
            }
            if !seen.insert(m.name.as_str()) {
                return Err(CatalogError::DuplicateName(m.name.clone()));
            }
        }
        Ok(Self { measures })
    }

    /// Load a catalog from a JSON array of measures.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let measures: Vec<Measure> = serde_json::from_str(json)?;
        Self::new(measures)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The 13 measures a government can take, mildest segment first.
    pub fn shipped() -> Self {
        Self { measures: shipped_measures() }
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Index of a measure in catalog order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.measures.iter().position(|m| m.name == name)
    }
}

impl Default for MeasureCatalog {
    fn default() -> Self {
        Self::shipped()
    }
}

fn shipped_measures() -> Vec<Measure> {
    vec![
        Measure::new("School closure", 1),
        Measure::new("Ban events of more than 100 people", 1),
        Measure::new("Educate public on preventive measures", 1),
        Measure::new("Close Border", 2),
        Measure::new("Remote work", 2),
        Measure::new("Research", 2),
        Measure::new("Speech", 2).with_repeat_impact(RepeatImpact {
            infection_change: 0,
            death_change: 0,
            social_change: -5,
        }),
        Measure::new("Quarantine", 3).with_repeat_impact(RepeatImpact {
            infection_change: -5,
            death_change: -5,
            social_change: 5,
        }),
        Measure::new("Rationing supplies", 3),
        Measure::new("Lockdown", 3).with_repeat_impact(RepeatImpact {
            infection_change: -10,
            death_change: -10,
            social_change: 10,
        }),
        Measure::new("Official Speech", 4),
        Measure::new("Open Border", 4),
        Measure::new("Social Event", 5),
    ]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
