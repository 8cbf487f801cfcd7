//! Stock ledger models
//!
//! Ledger entries are derived from receipts and work orders on demand and are
//! never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of stock movement a ledger entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryType {
    Onboarding,
    OnboardingReversal,
    WorkOrder,
    WorkOrderReversal,
}

impl LedgerEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Onboarding => "ONBOARDING",
            LedgerEntryType::OnboardingReversal => "ONBOARDING_REVERSAL",
            LedgerEntryType::WorkOrder => "WORK_ORDER",
            LedgerEntryType::WorkOrderReversal => "WORK_ORDER_REVERSAL",
        }
    }
}

impl std::fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stock level split into whole units and leftover sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub units: i64,
    pub extra_sheets: i64,
}

impl StockSnapshot {
    /// Total sheets represented by this snapshot
    pub fn total_sheets(&self, sheets_per_unit: i64) -> i64 {
        self.units
            .saturating_mul(sheets_per_unit)
            .saturating_add(self.extra_sheets)
    }
}

impl std::fmt::Display for StockSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.extra_sheets == 0 {
            write!(f, "{} units", self.units)
        } else {
            write!(f, "{} units + {} sheets", self.units, self.extra_sheets)
        }
    }
}

/// One reconstructed stock movement with balances either side of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    /// Job the consuming work order belongs to; `None` for receipts
    pub job_id: Option<String>,
    /// Receipt or work order this entry was derived from
    pub source_id: String,
    #[serde(rename = "type")]
    pub entry_type: LedgerEntryType,
    /// Signed change in whole units
    pub quantity: i64,
    /// Signed change in sheets left over after whole units
    pub extra_sheets: i64,
    /// Signed change in sheets
    pub sheet_change: i64,
    pub date: DateTime<Utc>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub stock_before: StockSnapshot,
    pub stock_after: StockSnapshot,
}
