//! Onboarding (stock receipt) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A receipt of new stock from a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Onboarding {
    #[validate(length(min = 1, message = "Onboarding id is required"))]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub supplier: Option<String>,
    /// Set once the receipt has been undone at the source of truth
    #[serde(default)]
    pub is_reverted: bool,
    #[serde(default)]
    pub items: Vec<OnboardingItem>,
}

/// One line of a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingItem {
    /// Material name this line refers to
    #[validate(length(min = 1, message = "Paper type is required"))]
    pub paper_type: String,
    /// Units received (reams, packets...)
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i64,
    /// Total amount paid for the line
    #[serde(default)]
    pub amount: Decimal,
}
