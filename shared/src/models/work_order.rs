//! Work order (stock consumption) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A production work order consuming materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    #[validate(length(min = 1, message = "Work order id is required"))]
    pub id: String,
    #[serde(default)]
    pub job_id: Option<String>,
    pub date: DateTime<Utc>,
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub materials_used: Vec<MaterialUsage>,
}

/// Work order lifecycle status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Other,
}

impl WorkOrderStatus {
    /// Only completed orders have touched stock
    pub fn affects_stock(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed)
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkOrderStatus::Pending => write!(f, "Pending"),
            WorkOrderStatus::InProgress => write!(f, "In Progress"),
            WorkOrderStatus::Completed => write!(f, "Completed"),
            WorkOrderStatus::Cancelled => write!(f, "Cancelled"),
            WorkOrderStatus::Other => write!(f, "Other"),
        }
    }
}

/// Quantity of one material consumed by a work order, in sheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    #[validate(length(min = 1, message = "Material id is required"))]
    pub material_id: String,
    #[validate(range(min = 0, message = "Quantity used cannot be negative"))]
    pub quantity_used: i64,
}

impl WorkOrder {
    /// Usage lines referring to the given material id
    pub fn usage_of<'a>(
        &'a self,
        material_id: &'a str,
    ) -> impl Iterator<Item = &'a MaterialUsage> {
        self.materials_used
            .iter()
            .filter(move |usage| usage.material_id == material_id)
    }
}
