//! Validation utilities for data gathered from the inventory API
//!
//! The ledger builder never rejects input; these checks are for callers that
//! want to flag bad records before building.

use rust_decimal::Decimal;
use thiserror::Error;
use validator::Validate;

use crate::models::{Material, Measurement, Onboarding, WorkOrder};

/// A record failed validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{record} {id}: {field} {message}")]
pub struct ValidationError {
    pub record: &'static str,
    pub id: String,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(record: &'static str, id: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            record,
            id: id.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Take the first failing field out of a derive-based validation result
    fn from_validator(record: &'static str, id: &str, errors: validator::ValidationErrors) -> Self {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("record".to_string(), "is invalid".to_string()));
        Self::new(record, id, &field, message)
    }
}

pub fn validate_measurement(measurement: &Measurement) -> Result<(), ValidationError> {
    measurement
        .validate()
        .map_err(|e| ValidationError::from_validator("Measurement", &measurement.name, e))
}

pub fn validate_material(material: &Material) -> Result<(), ValidationError> {
    material
        .validate()
        .map_err(|e| ValidationError::from_validator("Material", &material.id, e))?;
    if material.max_stock > 0 && material.reorder_threshold > material.max_stock {
        return Err(ValidationError::new(
            "Material",
            &material.id,
            "reorder_threshold",
            "Reorder threshold cannot exceed max stock",
        ));
    }
    Ok(())
}

pub fn validate_onboarding(onboarding: &Onboarding) -> Result<(), ValidationError> {
    onboarding
        .validate()
        .map_err(|e| ValidationError::from_validator("Onboarding", &onboarding.id, e))?;
    if onboarding.items.is_empty() {
        return Err(ValidationError::new(
            "Onboarding",
            &onboarding.id,
            "items",
            "Onboarding must have at least one item",
        ));
    }
    for item in &onboarding.items {
        item.validate()
            .map_err(|e| ValidationError::from_validator("Onboarding", &onboarding.id, e))?;
        if item.amount < Decimal::ZERO {
            return Err(ValidationError::new(
                "Onboarding",
                &onboarding.id,
                "amount",
                "Amount cannot be negative",
            ));
        }
    }
    Ok(())
}

pub fn validate_work_order(work_order: &WorkOrder) -> Result<(), ValidationError> {
    work_order
        .validate()
        .map_err(|e| ValidationError::from_validator("WorkOrder", &work_order.id, e))?;
    for usage in &work_order.materials_used {
        usage
            .validate()
            .map_err(|e| ValidationError::from_validator("WorkOrder", &work_order.id, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaterialUsage, OnboardingItem, WorkOrderStatus};
    use chrono::Utc;

    fn material() -> Material {
        Material {
            id: "mat-1".to_string(),
            name: "A4 Paper".to_string(),
            material_type: "Ream".to_string(),
            current_stock: 100,
            max_stock: 1000,
            reorder_threshold: 200,
        }
    }

    #[test]
    fn test_validate_measurement() {
        assert!(validate_measurement(&Measurement::new("Ream", 500)).is_ok());

        let err = validate_measurement(&Measurement::new("Ream", 0)).unwrap_err();
        assert_eq!(err.field, "sheets_per_unit");
        assert_eq!(err.message, "Sheets per unit must be at least 1");
    }

    #[test]
    fn test_validate_material() {
        assert!(validate_material(&material()).is_ok());

        let mut negative = material();
        negative.current_stock = -1;
        assert_eq!(validate_material(&negative).unwrap_err().field, "current_stock");

        let mut inverted = material();
        inverted.reorder_threshold = 2000;
        assert_eq!(
            validate_material(&inverted).unwrap_err().field,
            "reorder_threshold"
        );
    }

    #[test]
    fn test_validate_onboarding() {
        let mut onboarding = Onboarding {
            id: "onb-1".to_string(),
            date: Utc::now(),
            supplier: None,
            is_reverted: false,
            items: vec![],
        };
        assert_eq!(validate_onboarding(&onboarding).unwrap_err().field, "items");

        onboarding.items.push(OnboardingItem {
            paper_type: "A4 Paper".to_string(),
            quantity: 2,
            amount: Decimal::from(100),
        });
        assert!(validate_onboarding(&onboarding).is_ok());

        onboarding.items[0].quantity = 0;
        assert_eq!(validate_onboarding(&onboarding).unwrap_err().field, "quantity");

        onboarding.items[0].quantity = 1;
        onboarding.items[0].amount = Decimal::from(-1);
        assert_eq!(validate_onboarding(&onboarding).unwrap_err().field, "amount");
    }

    #[test]
    fn test_validate_work_order() {
        let mut work_order = WorkOrder {
            id: "wo-1".to_string(),
            job_id: None,
            date: Utc::now(),
            status: WorkOrderStatus::Completed,
            materials_used: vec![MaterialUsage {
                material_id: "mat-1".to_string(),
                quantity_used: 10,
            }],
        };
        assert!(validate_work_order(&work_order).is_ok());

        work_order.materials_used[0].material_id.clear();
        let err = validate_work_order(&work_order).unwrap_err();
        assert_eq!(err.field, "material_id");
        assert_eq!(err.to_string(), "WorkOrder wo-1: material_id Material id is required");
    }
}
