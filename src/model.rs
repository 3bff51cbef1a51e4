//! Core data types for the population checker
//!
//! This module defines the values that flow through the application:
//! - `Prefecture`: One directory entry (code + display name)
//! - `PopulationPoint`: One year/value sample of a population series
//! - `PopulationDataset`: The series held for one selected prefecture
//! - `Selection`: The ordered, duplicate-free set of selected codes

use serde::{Deserialize, Serialize};

/// Numeric prefecture identifier (1 = Hokkaido ... 47 = Okinawa)
pub type PrefCode = i32;

/// A prefecture as listed by the directory endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prefecture {
    /// Unique prefecture code
    #[serde(rename = "prefCode")]
    pub code: PrefCode,
    /// Display name
    #[serde(rename = "prefName")]
    pub name: String,
}

impl Prefecture {
    pub fn new(code: PrefCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// A single year/value sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationPoint {
    /// Year label as delivered by the API (e.g. "1960")
    pub label: String,
    /// Population count
    pub value: f64,
}

impl PopulationPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Population series for one successfully fetched prefecture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationDataset {
    #[serde(rename = "prefCode")]
    pub prefecture_code: PrefCode,
    #[serde(rename = "data")]
    pub points: Vec<PopulationPoint>,
}

impl PopulationDataset {
    pub fn new(prefecture_code: PrefCode, points: Vec<PopulationPoint>) -> Self {
        Self {
            prefecture_code,
            points,
        }
    }

    /// Values in series order, as plotted
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// The currently selected prefecture codes
///
/// Order follows the order the user picked them in; duplicates are
/// collapsed on construction so the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    codes: Vec<PrefCode>,
}

impl Selection {
    /// Build a selection from raw codes, dropping duplicates
    pub fn new(codes: impl IntoIterator<Item = PrefCode>) -> Self {
        let mut unique = Vec::new();
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self { codes: unique }
    }

    /// The empty selection
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn codes(&self) -> &[PrefCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: PrefCode) -> bool {
        self.codes.contains(&code)
    }
}

impl FromIterator<PrefCode> for Selection {
    fn from_iter<T: IntoIterator<Item = PrefCode>>(iter: T) -> Self {
        Self::new(iter)
    }
}
