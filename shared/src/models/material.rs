//! Material and measurement reference data

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stocked material (paper, board, film...)
///
/// All stock figures are expressed in sheets, the smallest countable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[validate(length(min = 1, message = "Material id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: String,
    /// Name of the measurement this material is counted in (e.g. "Ream")
    #[serde(rename = "type", default)]
    pub material_type: String,
    #[validate(range(min = 0, message = "Current stock cannot be negative"))]
    pub current_stock: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Max stock cannot be negative"))]
    pub max_stock: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Reorder threshold cannot be negative"))]
    pub reorder_threshold: i64,
}

/// A unit of measure and its size in sheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1, message = "Measurement name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Sheets per unit must be at least 1"))]
    pub sheets_per_unit: i64,
}

impl Measurement {
    pub fn new(name: impl Into<String>, sheets_per_unit: i64) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase(),
            name,
            sheets_per_unit,
        }
    }
}
