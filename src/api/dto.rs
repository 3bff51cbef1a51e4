//! Data Transfer Objects
//!
//! Response envelopes of the population API and the decoding rules that
//! turn them into model values. Both the native and the browser client
//! decode through these functions so they agree on what counts as a
//! well-formed payload.

use serde::Deserialize;

use super::error::{ApiError, ApiResult};
use crate::model::{PopulationDataset, PopulationPoint, PrefCode, Prefecture};

// ============================================
// PREFECTURE DTOs
// ============================================

/// `GET /api/prefectures` response
#[derive(Debug, Deserialize)]
pub struct PrefecturesResponse {
    pub result: Vec<Prefecture>,
}

// ============================================
// POPULATION DTOs
// ============================================

/// `GET /api/population/{prefCode}` response
#[derive(Debug, Deserialize)]
pub struct PopulationResponse {
    #[serde(default)]
    pub result: Option<PopulationResult>,
}

/// Body of a population response
#[derive(Debug, Deserialize)]
pub struct PopulationResult {
    /// Groupings of series (total, young, working age, elderly ...)
    #[serde(default)]
    pub data: Vec<PopulationGroup>,
}

/// One named grouping of a population response
#[derive(Debug, Deserialize)]
pub struct PopulationGroup {
    #[serde(default)]
    pub label: Option<String>,
    pub data: Vec<PopulationPoint>,
}

impl PopulationResponse {
    /// Keep the first grouping's series; anything else is discarded
    pub fn into_dataset(self, code: PrefCode) -> ApiResult<PopulationDataset> {
        let group = self
            .result
            .and_then(|result| result.data.into_iter().next())
            .ok_or(ApiError::MissingSeries { code })?;

        Ok(PopulationDataset::new(code, group.data))
    }
}

/// Decode a prefecture list body
pub fn decode_prefectures(body: &str) -> ApiResult<Vec<Prefecture>> {
    let response: PrefecturesResponse = serde_json::from_str(body)?;
    Ok(response.result)
}

/// Decode a population body for `code`
pub fn decode_population(code: PrefCode, body: &str) -> ApiResult<PopulationDataset> {
    let response: PopulationResponse = serde_json::from_str(body)?;
    response.into_dataset(code)
}
