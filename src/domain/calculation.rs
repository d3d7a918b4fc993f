//! Calculation input/output types.
//!
//! The wire format is camelCase fields with snake_case enum values, matching
//! what the web frontend already sends and renders.

use serde::{Deserialize, Serialize};

/// Wall material of the house frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WallMaterial {
    Wood,
    Brick,
    AeratedConcrete,
}

impl WallMaterial {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Brick => "brick",
            Self::AeratedConcrete => "aerated_concrete",
        }
    }
}

/// Foundation construction type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoundationType {
    Slab,
    Strip,
    Pile,
}

impl FoundationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slab => "slab",
            Self::Strip => "strip",
            Self::Pile => "pile",
        }
    }
}

/// Finish level the customer orders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishLevel {
    Shell,
    Basic,
    Turnkey,
}

impl FinishLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Basic => "basic",
            Self::Turnkey => "turnkey",
        }
    }
}

/// Selectable engineering systems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineeringOption {
    HeatingRadiators,
    WarmFloor,
    Ventilation,
    WaterSupply,
    Septic,
    Electricity,
}

impl EngineeringOption {
    /// Fixed enumeration order used for price items regardless of the order
    /// options arrive in the request.
    pub const ALL: [Self; 6] = [
        Self::HeatingRadiators,
        Self::WarmFloor,
        Self::Ventilation,
        Self::WaterSupply,
        Self::Septic,
        Self::Electricity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeatingRadiators => "heating_radiators",
            Self::WarmFloor => "warm_floor",
            Self::Ventilation => "ventilation",
            Self::WaterSupply => "water_supply",
            Self::Septic => "septic",
            Self::Electricity => "electricity",
        }
    }
}

/// Selectable extras.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Extra {
    Terrace,
    Fireplace,
    PanoramicWindows,
    Garage,
}

impl Extra {
    /// Fixed enumeration order used for price items.
    pub const ALL: [Self; 4] = [
        Self::Terrace,
        Self::Fireplace,
        Self::PanoramicWindows,
        Self::Garage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terrace => "terrace",
            Self::Fireplace => "fireplace",
            Self::PanoramicWindows => "panoramic_windows",
            Self::Garage => "garage",
        }
    }
}

/// Input to the pricing engine. Range validation happens at the API boundary
/// via [`CalculationInput::validate`]; the engine itself assumes in-contract
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Heated area, m².
    pub area: f64,
    pub floors: u8,
    pub wall_material: WallMaterial,
    pub foundation_type: FoundationType,
    pub finish_level: FinishLevel,
    #[serde(default)]
    pub engineering_options: Vec<EngineeringOption>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default = "default_promo_multiplier")]
    pub promo_multiplier: f64,
}

fn default_promo_multiplier() -> f64 {
    1.0
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl CalculationInput {
    pub const MIN_AREA: f64 = 10.0;
    pub const MAX_AREA: f64 = 1000.0;
    pub const MIN_PROMO: f64 = 0.5;
    pub const MAX_PROMO: f64 = 1.5;
    pub const MAX_PROJECT_NAME_LEN: usize = 120;

    /// Range checks for everything serde cannot enforce structurally.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if !(Self::MIN_AREA..=Self::MAX_AREA).contains(&self.area) {
            errors.push(FieldError::new(
                "area",
                format!(
                    "must be between {} and {} m2",
                    Self::MIN_AREA,
                    Self::MAX_AREA
                ),
            ));
        }
        if !matches!(self.floors, 1..=3) {
            errors.push(FieldError::new("floors", "must be 1, 2 or 3"));
        }
        if !(Self::MIN_PROMO..=Self::MAX_PROMO).contains(&self.promo_multiplier) {
            errors.push(FieldError::new(
                "promoMultiplier",
                format!(
                    "must be between {} and {}",
                    Self::MIN_PROMO,
                    Self::MAX_PROMO
                ),
            ));
        }
        if let Some(name) = &self.project_name {
            if name.is_empty() || name.chars().count() > Self::MAX_PROJECT_NAME_LEN {
                errors.push(FieldError::new(
                    "projectName",
                    format!("must be 1..={} characters", Self::MAX_PROJECT_NAME_LEN),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// How a price item's amount was derived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceItemKind {
    Fixed,
    PerM2,
    Percent,
}

/// One line of the cost breakdown. `amount` is the cached final contribution,
/// computed when the result was produced, not re-derived on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: PriceItemKind,
    /// Currency per m² for `per_m2`, a fraction for `percent`, the flat
    /// amount for `fixed`.
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub amount: f64,
    pub category: String,
}

/// Construction stage identifiers, in build order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    Design,
    Foundation,
    Frame,
    Engineering,
    Finishing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageEstimate {
    pub key: StageKey,
    pub label: String,
    pub weeks: u32,
}

/// Output of the pricing engine. Immutable once produced; `pricing_version`
/// travels with any persisted copy so historical results stay interpretable
/// after rule changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub pricing_version: String,
    pub base_rate_per_m2: f64,
    pub base_price: f64,
    pub items: Vec<PriceItem>,
    pub total_price: f64,
    pub stages: Vec<StageEstimate>,
    pub duration_weeks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CalculationInput {
        serde_json::from_value(serde_json::json!({
            "area": 100.0,
            "floors": 1,
            "wallMaterial": "wood",
            "foundationType": "slab",
            "finishLevel": "basic"
        }))
        .unwrap()
    }

    #[test]
    fn defaults_applied_on_deserialize() {
        let input = valid_input();
        assert!(input.engineering_options.is_empty());
        assert!(input.extras.is_empty());
        assert_eq!(input.promo_multiplier, 1.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_area() {
        let mut input = valid_input();
        input.area = 5.0;
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "area");

        input.area = 1500.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_bad_floors_and_promo() {
        let mut input = valid_input();
        input.floors = 4;
        input.promo_multiplier = 0.1;
        let errors = input.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["floors", "promoMultiplier"]);
    }

    #[test]
    fn unknown_enum_value_fails_deserialization() {
        let result: Result<CalculationInput, _> = serde_json::from_value(serde_json::json!({
            "area": 100.0,
            "floors": 1,
            "wallMaterial": "straw",
            "foundationType": "slab",
            "finishLevel": "basic"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn price_item_kind_serializes_as_type() {
        let item = PriceItem {
            id: "foundation_slab".into(),
            label: "Фундамент".into(),
            kind: PriceItemKind::PerM2,
            unit_price: 18000.0,
            quantity: Some(100.0),
            amount: 1_800_000.0,
            category: "foundation".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "per_m2");
        assert_eq!(json["unitPrice"], 18000.0);
    }
}
