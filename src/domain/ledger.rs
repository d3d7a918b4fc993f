//! Flattened rows forwarded to the external ledger.
//!
//! One row per calculation and one per captured lead, shaped for append-only
//! spreadsheet-style storage: scalars only, list fields comma-joined.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::calculation::{CalculationInput, CalculationResult};
use super::project::{ContactInfo, UserSelection};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRow {
    pub timestamp: DateTime<Utc>,
    pub project_id: Uuid,
    pub pricing_version: String,
    pub area: f64,
    pub floors: u8,
    pub wall_material: &'static str,
    pub foundation_type: &'static str,
    pub finish_level: &'static str,
    pub engineering_options: String,
    pub extras: String,
    pub promo_multiplier: f64,
    pub base_rate_per_m2: f64,
    pub base_price: f64,
    pub total_price: f64,
}

impl CalculationRow {
    pub fn new(project_id: Uuid, input: &CalculationInput, result: &CalculationResult) -> Self {
        Self {
            timestamp: Utc::now(),
            project_id,
            pricing_version: result.pricing_version.clone(),
            area: input.area,
            floors: input.floors,
            wall_material: input.wall_material.as_str(),
            foundation_type: input.foundation_type.as_str(),
            finish_level: input.finish_level.as_str(),
            engineering_options: input
                .engineering_options
                .iter()
                .map(|o| o.as_str())
                .collect::<Vec<_>>()
                .join(","),
            extras: input
                .extras
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(","),
            promo_multiplier: input.promo_multiplier,
            base_rate_per_m2: result.base_rate_per_m2,
            base_price: result.base_price,
            total_price: result.total_price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRow {
    pub timestamp: DateTime<Utc>,
    pub project_id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub plot_id: Option<String>,
    pub house_project_id: Option<String>,
    pub construction_format: Option<&'static str>,
}

impl LeadRow {
    pub fn new(project_id: Uuid, selection: &UserSelection, contact: Option<&ContactInfo>) -> Self {
        Self {
            timestamp: Utc::now(),
            project_id,
            name: contact.and_then(|c| c.name.clone()).unwrap_or_default(),
            phone: contact.and_then(|c| c.phone.clone()).unwrap_or_default(),
            email: contact.and_then(|c| c.email.clone()).unwrap_or_default(),
            plot_id: selection.plot_id.clone(),
            house_project_id: selection.house_project_id.clone(),
            construction_format: selection.construction_format.map(|f| f.as_str()),
        }
    }
}
