//! Stock levels and reorder suggestions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Material, Measurement, StockSnapshot};
use crate::stock_register::{sheets_per_unit, to_units};

/// How urgently a material needs restocking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Healthy,
    Low,
    OutOfStock,
}

impl StockStatus {
    pub fn needs_reorder(&self) -> bool {
        !matches!(self, StockStatus::Healthy)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::Healthy => write!(f, "Healthy"),
            StockStatus::Low => write!(f, "Low"),
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// Classify a material's current stock against its reorder threshold
pub fn stock_status(material: &Material) -> StockStatus {
    match material.current_stock {
        s if s <= 0 => StockStatus::OutOfStock,
        s if s <= material.reorder_threshold => StockStatus::Low,
        _ => StockStatus::Healthy,
    }
}

/// Current stock of one material, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStockLevel {
    pub material_id: String,
    pub material_name: String,
    pub measurement: String,
    pub sheets_per_unit: i64,
    pub current_sheets: i64,
    pub current_stock: StockSnapshot,
    /// Current stock as a percentage of max stock; zero when max is unset
    pub fill_percent: Decimal,
    pub status: StockStatus,
}

impl MaterialStockLevel {
    pub fn for_material(material: &Material, measurements: &[Measurement]) -> Self {
        let factor = sheets_per_unit(material, measurements);
        let fill_percent = if material.max_stock > 0 {
            (Decimal::from(material.current_stock) * Decimal::from(100)
                / Decimal::from(material.max_stock))
            .round_dp(2)
        } else {
            Decimal::ZERO
        };

        Self {
            material_id: material.id.clone(),
            material_name: material.name.clone(),
            measurement: material.material_type.clone(),
            sheets_per_unit: factor,
            current_sheets: material.current_stock,
            current_stock: to_units(material.current_stock, factor),
            fill_percent,
            status: stock_status(material),
        }
    }
}

/// Deterministic restock proposal for one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSuggestion {
    pub material_id: String,
    pub material_name: String,
    pub status: StockStatus,
    /// Whole units to order
    pub units_to_order: i64,
    /// Sheets those units add
    pub sheets_to_order: i64,
    /// Stock after the order arrives, in sheets
    pub projected_sheets: i64,
}

/// Propose an order that refills the material to its max stock.
///
/// Returns `None` for healthy materials. Shortfalls are rounded up to whole
/// units and at least one unit is always ordered.
pub fn suggest_reorder(
    material: &Material,
    measurements: &[Measurement],
) -> Option<ReorderSuggestion> {
    let status = stock_status(material);
    if !status.needs_reorder() {
        return None;
    }

    let factor = sheets_per_unit(material, measurements);
    let target = material.max_stock.max(material.reorder_threshold);
    let shortfall = target.saturating_sub(material.current_stock).max(0);
    let units_to_order = (shortfall / factor + i64::from(shortfall % factor != 0)).max(1);
    let sheets_to_order = units_to_order.saturating_mul(factor);

    Some(ReorderSuggestion {
        material_id: material.id.clone(),
        material_name: material.name.clone(),
        status,
        units_to_order,
        sheets_to_order,
        projected_sheets: material.current_stock.saturating_add(sheets_to_order),
    })
}

/// Stock levels of every material needing reorder, emptiest first
pub fn low_stock_materials(
    materials: &[Material],
    measurements: &[Measurement],
) -> Vec<MaterialStockLevel> {
    let mut levels: Vec<MaterialStockLevel> = materials
        .iter()
        .filter(|m| stock_status(m).needs_reorder())
        .map(|m| MaterialStockLevel::for_material(m, measurements))
        .collect();
    levels.sort_by(|a, b| {
        a.fill_percent
            .cmp(&b.fill_percent)
            .then(a.current_sheets.cmp(&b.current_sheets))
    });
    levels
}
