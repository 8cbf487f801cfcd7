//! Stock ledger reconstruction
//!
//! Replays receipts and completed work orders against a material's current
//! stock to produce its history, newest first, with the balance before and
//! after every movement. The builder is a pure function of its inputs: it
//! never fails, and calling it twice with the same inputs yields the same
//! ledger. Sheet arithmetic saturates at the `i64` bounds instead of
//! overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    collect_events, LedgerEntry, LedgerEntryType, Material, Measurement, Onboarding, StockEvent,
    StockSnapshot, WorkOrder,
};
use crate::types::DateRange;

/// Sheets in one unit of the material's measurement.
///
/// Falls back to 1 when no measurement matches the material's type, or when
/// the matching measurement carries a factor below 1.
pub fn sheets_per_unit(material: &Material, measurements: &[Measurement]) -> i64 {
    measurements
        .iter()
        .find(|m| m.name == material.material_type)
        .map(|m| m.sheets_per_unit)
        .filter(|&factor| factor >= 1)
        .unwrap_or(1)
}

/// Split a sheet count into whole units and leftover sheets.
///
/// Division truncates toward zero and the remainder takes the sign of
/// `total_sheets`, so `units * sheets_per_unit + extra_sheets == total_sheets`
/// holds for negative counts too.
pub fn to_units(total_sheets: i64, sheets_per_unit: i64) -> StockSnapshot {
    if sheets_per_unit <= 1 {
        return StockSnapshot {
            units: total_sheets,
            extra_sheets: 0,
        };
    }
    StockSnapshot {
        units: total_sheets / sheets_per_unit,
        extra_sheets: total_sheets % sheets_per_unit,
    }
}

/// Build the ledger for `material` from the given event history.
///
/// Entries are ordered by date, newest first. Entries sharing a date keep
/// their input order: receipts before work orders, each in the order given.
pub fn build_stock_ledger(
    material: &Material,
    onboardings: &[Onboarding],
    work_orders: &[WorkOrder],
    measurements: &[Measurement],
) -> Vec<LedgerEntry> {
    let factor = sheets_per_unit(material, measurements);

    let mut entries: Vec<LedgerEntry> = collect_events(onboardings, work_orders)
        .iter()
        .flat_map(|event| raw_entries(event, material, factor))
        .collect();

    // Stable, so same-date entries keep their input order
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let mut running_total = material.current_stock;
    for entry in &mut entries {
        let before = running_total.saturating_sub(entry.sheet_change);
        entry.stock_after = to_units(running_total, factor);
        entry.stock_before = to_units(before, factor);
        running_total = before;
    }

    entries
}

/// Resolve the material by id and build its ledger.
///
/// An unknown id yields an empty ledger.
pub fn build_ledger_for_material(
    material_id: &str,
    materials: &[Material],
    onboardings: &[Onboarding],
    work_orders: &[WorkOrder],
    measurements: &[Measurement],
) -> Vec<LedgerEntry> {
    materials
        .iter()
        .find(|m| m.id == material_id)
        .map(|material| build_stock_ledger(material, onboardings, work_orders, measurements))
        .unwrap_or_default()
}

/// Entries a single event contributes, without balances
fn raw_entries(event: &StockEvent, material: &Material, factor: i64) -> Vec<LedgerEntry> {
    match event {
        StockEvent::Onboarding(onboarding) => onboarding
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.paper_type == material.name)
            .map(|(index, item)| {
                let sign = if onboarding.is_reverted { -1 } else { 1 };
                let quantity = if onboarding.is_reverted {
                    item.quantity.saturating_neg()
                } else {
                    item.quantity
                };
                let unit_price = if item.quantity > 0 {
                    item.amount / Decimal::from(item.quantity)
                } else {
                    Decimal::ZERO
                };
                let entry_type = if onboarding.is_reverted {
                    LedgerEntryType::OnboardingReversal
                } else {
                    LedgerEntryType::Onboarding
                };

                LedgerEntry {
                    id: format!("{}-{}", onboarding.id, index),
                    job_id: None,
                    source_id: onboarding.id.clone(),
                    entry_type,
                    quantity,
                    extra_sheets: 0,
                    sheet_change: quantity.saturating_mul(factor),
                    date: onboarding.date,
                    unit_price,
                    total_price: Decimal::from(sign) * item.amount,
                    supplier: onboarding.supplier.clone(),
                    stock_before: StockSnapshot::default(),
                    stock_after: StockSnapshot::default(),
                }
            })
            .collect(),
        StockEvent::WorkOrder(work_order) => {
            if !work_order.status.affects_stock() {
                return Vec::new();
            }
            let mut usages = work_order.usage_of(&material.id).peekable();
            if usages.peek().is_none() {
                return Vec::new();
            }
            let used = usages.fold(0i64, |total, usage| total.saturating_add(usage.quantity_used));
            let sheet_change = used.saturating_neg();
            let change = to_units(sheet_change, factor);

            vec![LedgerEntry {
                id: work_order.id.clone(),
                job_id: work_order.job_id.clone(),
                source_id: work_order.id.clone(),
                entry_type: LedgerEntryType::WorkOrder,
                quantity: change.units,
                extra_sheets: change.extra_sheets,
                sheet_change,
                date: work_order.date,
                unit_price: Decimal::ZERO,
                total_price: Decimal::ZERO,
                supplier: None,
                stock_before: StockSnapshot::default(),
                stock_after: StockSnapshot::default(),
            }]
        }
    }
}

/// Keep only entries dated inside `range`; balances are left as built
pub fn filter_by_date_range(entries: Vec<LedgerEntry>, range: &DateRange) -> Vec<LedgerEntry> {
    entries
        .into_iter()
        .filter(|entry| range.contains(entry.date))
        .collect()
}

/// Totals over a built ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub entry_count: usize,
    /// Units received by receipts that still stand
    pub units_received: i64,
    /// Units taken back out by reverted receipts
    pub units_reversed: i64,
    /// Sheets consumed by completed work orders
    pub sheets_consumed: i64,
    /// Net spend on receipts, reversals deducted
    pub total_spend: Decimal,
    /// Stock before the oldest entry, in sheets
    pub opening_sheets: i64,
    /// Stock after the newest entry, in sheets
    pub closing_sheets: i64,
    pub opening_stock: StockSnapshot,
    pub closing_stock: StockSnapshot,
}

impl LedgerSummary {
    /// Summarize a newest-first ledger built with the given factor
    pub fn from_entries(entries: &[LedgerEntry], sheets_per_unit: i64) -> Self {
        let mut units_received = 0i64;
        let mut units_reversed = 0i64;
        let mut sheets_consumed = 0i64;
        let mut total_spend = Decimal::ZERO;

        for entry in entries {
            match entry.entry_type {
                LedgerEntryType::Onboarding => {
                    units_received = units_received.saturating_add(entry.quantity)
                }
                LedgerEntryType::OnboardingReversal => {
                    units_reversed = units_reversed.saturating_sub(entry.quantity)
                }
                LedgerEntryType::WorkOrder | LedgerEntryType::WorkOrderReversal => {
                    sheets_consumed = sheets_consumed.saturating_sub(entry.sheet_change)
                }
            }
            total_spend = total_spend.saturating_add(entry.total_price);
        }

        let closing_stock = entries.first().map(|e| e.stock_after).unwrap_or_default();
        let opening_stock = entries.last().map(|e| e.stock_before).unwrap_or_default();

        Self {
            entry_count: entries.len(),
            units_received,
            units_reversed,
            sheets_consumed,
            total_spend,
            opening_sheets: opening_stock.total_sheets(sheets_per_unit),
            closing_sheets: closing_stock.total_sheets(sheets_per_unit),
            opening_stock,
            closing_stock,
        }
    }
}
