//! Pricing engine.
//!
//! Pure and deterministic: the same input always produces the same
//! [`CalculationResult`], with no I/O and no shared state. Rates are
//! hand-coded per pricing version; any rule change must bump
//! [`PRICING_VERSION`] so persisted results stay interpretable.

use crate::domain::calculation::{
    CalculationInput, CalculationResult, EngineeringOption, Extra, FinishLevel, FoundationType,
    PriceItem, PriceItemKind, StageEstimate, StageKey, WallMaterial,
};

pub const PRICING_VERSION: &str = "2025-10-01";

/// Base construction rate, currency per m².
fn base_rate_per_m2(material: WallMaterial) -> f64 {
    match material {
        WallMaterial::Wood => 75_000.0,
        WallMaterial::Brick => 95_000.0,
        WallMaterial::AeratedConcrete => 85_000.0,
    }
}

fn floor_coefficient(floors: u8) -> f64 {
    match floors {
        1 => 1.0,
        2 => 1.08,
        _ => 1.15, // 3 floors
    }
}

fn finish_multiplier(level: FinishLevel) -> f64 {
    match level {
        FinishLevel::Shell => 0.85,
        FinishLevel::Basic => 1.0,
        FinishLevel::Turnkey => 1.2,
    }
}

/// Exactly one foundation item per calculation.
fn foundation_cost(foundation: FoundationType, area: f64) -> PriceItem {
    let unit_price = match foundation {
        FoundationType::Slab => 18_000.0,
        FoundationType::Strip => 14_000.0,
        FoundationType::Pile => 12_000.0,
    };
    PriceItem {
        id: format!("foundation_{}", foundation.as_str()),
        label: format!("Фундамент ({})", foundation.as_str()),
        kind: PriceItemKind::PerM2,
        unit_price,
        quantity: Some(area),
        amount: unit_price * area,
        category: "foundation".into(),
    }
}

/// One item per selected option, in the fixed [`EngineeringOption::ALL`]
/// order. Duplicate selections have no extra effect.
fn engineering_costs(input: &CalculationInput) -> Vec<PriceItem> {
    let area = input.area;
    let mut items = Vec::new();

    for option in EngineeringOption::ALL {
        if !input.engineering_options.contains(&option) {
            continue;
        }
        let item = match option {
            EngineeringOption::HeatingRadiators => PriceItem {
                id: "eng_heating".into(),
                label: "Отопление (радиаторы)".into(),
                kind: PriceItemKind::PerM2,
                unit_price: 2_800.0,
                quantity: Some(area),
                amount: 2_800.0 * area,
                category: "engineering".into(),
            },
            EngineeringOption::WarmFloor => PriceItem {
                id: "eng_warm_floor".into(),
                label: "Тёплый пол (водяной)".into(),
                kind: PriceItemKind::PerM2,
                unit_price: 1_900.0,
                // warm floor covers 60% of the floor area
                quantity: Some(area * 0.6),
                amount: 1_900.0 * area * 0.6,
                category: "engineering".into(),
            },
            EngineeringOption::Ventilation => PriceItem {
                id: "eng_ventilation".into(),
                label: "Вентиляция приточно-вытяжная".into(),
                kind: PriceItemKind::Fixed,
                unit_price: 250_000.0,
                quantity: None,
                amount: 250_000.0,
                category: "engineering".into(),
            },
            EngineeringOption::WaterSupply => PriceItem {
                id: "eng_water".into(),
                label: "Водоснабжение".into(),
                kind: PriceItemKind::Fixed,
                unit_price: 180_000.0,
                quantity: None,
                amount: 180_000.0,
                category: "engineering".into(),
            },
            EngineeringOption::Septic => PriceItem {
                id: "eng_septic".into(),
                label: "Канализация (септик)".into(),
                kind: PriceItemKind::Fixed,
                unit_price: 220_000.0,
                quantity: None,
                amount: 220_000.0,
                category: "engineering".into(),
            },
            EngineeringOption::Electricity => PriceItem {
                id: "eng_electric".into(),
                label: "Электрика".into(),
                kind: PriceItemKind::PerM2,
                unit_price: 900.0,
                quantity: Some(area),
                amount: 900.0 * area,
                category: "engineering".into(),
            },
        };
        items.push(item);
    }

    items
}

/// One item per selected extra, in the fixed [`Extra::ALL`] order. Percent
/// items get their amount in a second pass inside [`compute_price`], since it
/// depends on the base price.
fn extras_costs(input: &CalculationInput) -> Vec<PriceItem> {
    let area = input.area;
    let mut items = Vec::new();

    for extra in Extra::ALL {
        if !input.extras.contains(&extra) {
            continue;
        }
        let item = match extra {
            Extra::Terrace => {
                let unit_price = 14_000.0;
                let quantity = (area * 0.2).clamp(12.0, 40.0);
                PriceItem {
                    id: "extra_terrace".into(),
                    label: "Терраса".into(),
                    kind: PriceItemKind::PerM2,
                    unit_price,
                    quantity: Some(quantity),
                    amount: unit_price * quantity,
                    category: "extras".into(),
                }
            }
            Extra::Fireplace => PriceItem {
                id: "extra_fireplace".into(),
                label: "Камин".into(),
                kind: PriceItemKind::Fixed,
                unit_price: 180_000.0,
                quantity: None,
                amount: 180_000.0,
                category: "extras".into(),
            },
            Extra::PanoramicWindows => PriceItem {
                id: "extra_panoramic".into(),
                label: "Панорамное остекление".into(),
                kind: PriceItemKind::Percent,
                unit_price: 0.06,
                quantity: None,
                amount: 0.0, // filled in once the base price is known
                category: "extras".into(),
            },
            Extra::Garage => PriceItem {
                id: "extra_garage".into(),
                label: "Гараж (пристрой)".into(),
                kind: PriceItemKind::Fixed,
                unit_price: 700_000.0,
                quantity: None,
                amount: 700_000.0,
                category: "extras".into(),
            },
        };
        items.push(item);
    }

    items
}

fn estimate_stages(input: &CalculationInput, base_price: f64) -> Vec<StageEstimate> {
    let complexity_factor = match input.floors {
        1 => 1.0,
        2 => 1.15,
        _ => 1.3,
    };
    let weeks = ((base_price / 1_000_000.0) * 3.0 * complexity_factor).round();

    let stage = |key, label: &str, fraction: f64, lo: f64, hi: f64| StageEstimate {
        key,
        label: label.into(),
        weeks: (weeks * fraction).round().clamp(lo, hi) as u32,
    };

    vec![
        stage(StageKey::Design, "Проектирование", 0.15, 1.0, 4.0),
        stage(StageKey::Foundation, "Фундамент", 0.2, 1.0, 6.0),
        stage(StageKey::Frame, "Коробка", 0.35, 2.0, 12.0),
        stage(StageKey::Engineering, "Инженерия", 0.15, 1.0, 6.0),
        stage(StageKey::Finishing, "Отделка", 0.15, 1.0, 8.0),
    ]
}

/// Compute the full itemized price and stage estimate for a validated input.
///
/// Total for in-contract input; on out-of-contract input (e.g. zero area) the
/// amounts degrade toward zero but the call still returns.
pub fn compute_price(input: &CalculationInput) -> CalculationResult {
    let area = input.area;
    let base_rate = base_rate_per_m2(input.wall_material);
    let floor_coeff = floor_coefficient(input.floors);
    let finish_mult = finish_multiplier(input.finish_level);
    let promo = input.promo_multiplier;

    let base_price = (area * base_rate * floor_coeff * finish_mult).round();

    let mut items = Vec::new();
    items.push(foundation_cost(input.foundation_type, area));
    items.extend(engineering_costs(input));
    items.extend(extras_costs(input));

    // Percent surcharge applied on top of the base price. Each percent item's
    // own amount also enters the items total below, so a percent extra
    // contributes twice to the final price; changing that requires a new
    // PRICING_VERSION.
    let percent_add: f64 = items
        .iter()
        .filter(|i| i.kind == PriceItemKind::Percent)
        .map(|i| i.unit_price)
        .sum();
    let percent_amount = (base_price * percent_add).round();

    for item in &mut items {
        if item.kind == PriceItemKind::Percent {
            item.amount = (base_price * item.unit_price).round();
        }
    }

    let items_total: f64 = items.iter().map(|i| i.amount).sum();
    let total_price = ((base_price + percent_amount + items_total) * promo).round();

    let stages = estimate_stages(input, base_price);
    let duration_weeks = stages.iter().map(|s| s.weeks).sum();

    CalculationResult {
        pricing_version: PRICING_VERSION.into(),
        base_rate_per_m2: base_rate,
        base_price,
        items,
        total_price,
        stages,
        duration_weeks,
    }
}
