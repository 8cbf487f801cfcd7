//! Stock register service: ledgers, summaries, exports and reorder advice

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    build_stock_ledger, filter_by_date_range, low_stock_materials, sheets_per_unit,
    suggest_reorder, DateRange, LedgerEntry, LedgerSummary, Material, MaterialStockLevel,
    ReorderSuggestion,
};

use crate::error::{AppError, AppResult};
use crate::external::{InventoryApiClient, InventorySnapshot, ReorderAdvisorClient};

/// Stock register service
#[derive(Clone)]
pub struct StockRegisterService {
    inventory: InventoryApiClient,
    advisor: Option<ReorderAdvisorClient>,
}

/// A material's ledger along with its current stock level
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLedger {
    pub material: Material,
    pub stock: MaterialStockLevel,
    pub sheets_per_unit: i64,
    pub entries: Vec<LedgerEntry>,
}

/// Ledger summary for one material
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLedgerSummary {
    pub material_id: String,
    pub material_name: String,
    pub sheets_per_unit: i64,
    #[serde(flatten)]
    pub summary: LedgerSummary,
}

/// Where reorder advice text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    Advisor,
    Computed,
}

/// Reorder suggestions for every material needing restock
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderAdvice {
    pub materials: Vec<MaterialStockLevel>,
    pub suggestions: Vec<ReorderSuggestion>,
    pub advice: String,
    pub source: AdviceSource,
}

/// One flat CSV row of a ledger export
#[derive(Debug, Serialize)]
struct LedgerCsvRow<'a> {
    date: DateTime<Utc>,
    entry_type: &'static str,
    reference: &'a str,
    job_id: &'a str,
    supplier: &'a str,
    quantity: i64,
    extra_sheets: i64,
    sheet_change: i64,
    unit_price: Decimal,
    total_price: Decimal,
    before_units: i64,
    before_sheets: i64,
    after_units: i64,
    after_sheets: i64,
}

impl StockRegisterService {
    /// Create a new StockRegisterService instance
    pub fn new(inventory: InventoryApiClient, advisor: Option<ReorderAdvisorClient>) -> Self {
        Self { inventory, advisor }
    }

    /// Ledger for a material, optionally restricted to a date range
    pub async fn material_ledger(
        &self,
        material_id: &str,
        range: Option<DateRange>,
    ) -> AppResult<MaterialLedger> {
        let snapshot = self.inventory.snapshot().await?;
        Self::ledger_from_snapshot(&snapshot, material_id, range.as_ref())
    }

    /// Totals over a material's full ledger
    pub async fn ledger_summary(&self, material_id: &str) -> AppResult<MaterialLedgerSummary> {
        let ledger = self.material_ledger(material_id, None).await?;
        Ok(Self::summarize(&ledger))
    }

    /// Materials at or below their reorder threshold
    pub async fn low_stock(&self) -> AppResult<Vec<MaterialStockLevel>> {
        let (materials, measurements) = tokio::try_join!(
            self.inventory.list_materials(),
            self.inventory.list_measurements(),
        )?;
        Ok(low_stock_materials(&materials, &measurements))
    }

    /// Reorder suggestions, with advisor text when the advisor is reachable
    pub async fn reorder_advice(&self) -> AppResult<ReorderAdvice> {
        let (materials, measurements) = tokio::try_join!(
            self.inventory.list_materials(),
            self.inventory.list_measurements(),
        )?;

        let levels = low_stock_materials(&materials, &measurements);
        let suggestions: Vec<ReorderSuggestion> = levels
            .iter()
            .filter_map(|level| materials.iter().find(|m| m.id == level.material_id))
            .filter_map(|material| suggest_reorder(material, &measurements))
            .collect();

        if levels.is_empty() {
            return Ok(ReorderAdvice {
                materials: levels,
                suggestions,
                advice: "All materials are above their reorder thresholds.".to_string(),
                source: AdviceSource::Computed,
            });
        }

        if let Some(advisor) = &self.advisor {
            let prompt = Self::build_reorder_prompt(&levels, &suggestions);
            match advisor.complete(&prompt).await {
                Ok(advice) if !advice.is_empty() => {
                    return Ok(ReorderAdvice {
                        materials: levels,
                        suggestions,
                        advice,
                        source: AdviceSource::Advisor,
                    });
                }
                Ok(_) => tracing::warn!("Reorder advisor returned empty advice"),
                Err(e) => {
                    tracing::warn!(error = %e, "Reorder advisor unavailable, using computed advice")
                }
            }
        }

        Ok(ReorderAdvice {
            advice: Self::computed_advice(&suggestions),
            materials: levels,
            suggestions,
            source: AdviceSource::Computed,
        })
    }

    /// Build a material's ledger from already-fetched inventory data
    pub fn ledger_from_snapshot(
        snapshot: &InventorySnapshot,
        material_id: &str,
        range: Option<&DateRange>,
    ) -> AppResult<MaterialLedger> {
        let material = snapshot
            .materials
            .iter()
            .find(|m| m.id == material_id)
            .ok_or_else(|| AppError::NotFound(format!("Material {}", material_id)))?;

        Ok(Self::ledger_for(material.clone(), snapshot, range))
    }

    /// Build a ledger for a material that need not be in the snapshot
    pub fn ledger_for(
        material: Material,
        snapshot: &InventorySnapshot,
        range: Option<&DateRange>,
    ) -> MaterialLedger {
        let entries = build_stock_ledger(
            &material,
            &snapshot.onboardings,
            &snapshot.work_orders,
            &snapshot.measurements,
        );
        let entries = match range {
            Some(range) => filter_by_date_range(entries, range),
            None => entries,
        };

        tracing::debug!(
            material_id = %material.id,
            entries = entries.len(),
            "Built stock ledger"
        );

        MaterialLedger {
            sheets_per_unit: sheets_per_unit(&material, &snapshot.measurements),
            stock: MaterialStockLevel::for_material(&material, &snapshot.measurements),
            material,
            entries,
        }
    }

    pub fn summarize(ledger: &MaterialLedger) -> MaterialLedgerSummary {
        MaterialLedgerSummary {
            material_id: ledger.material.id.clone(),
            material_name: ledger.material.name.clone(),
            sheets_per_unit: ledger.sheets_per_unit,
            summary: LedgerSummary::from_entries(&ledger.entries, ledger.sheets_per_unit),
        }
    }

    /// Export ledger entries as CSV
    pub fn export_to_csv(entries: &[LedgerEntry]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for entry in entries {
            let row = LedgerCsvRow {
                date: entry.date,
                entry_type: entry.entry_type.as_str(),
                reference: &entry.source_id,
                job_id: entry.job_id.as_deref().unwrap_or(""),
                supplier: entry.supplier.as_deref().unwrap_or(""),
                quantity: entry.quantity,
                extra_sheets: entry.extra_sheets,
                sheet_change: entry.sheet_change,
                unit_price: entry.unit_price.round_dp(2),
                total_price: entry.total_price.round_dp(2),
                before_units: entry.stock_before.units,
                before_sheets: entry.stock_before.extra_sheets,
                after_units: entry.stock_after.units,
                after_sheets: entry.stock_after.extra_sheets,
            };
            wtr.serialize(row)
                .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Export(format!("UTF-8 conversion error: {}", e)))
    }

    /// Prompt describing low-stock materials for the advisor
    pub fn build_reorder_prompt(
        levels: &[MaterialStockLevel],
        suggestions: &[ReorderSuggestion],
    ) -> String {
        let mut prompt = String::from(
            "You are an inventory planner for a print shop. The following materials are at or \
             below their reorder threshold. Recommend what to reorder and in what priority, \
             briefly.\n\n",
        );
        for level in levels {
            prompt.push_str(&format!(
                "- {} ({}): {} in stock, {}% of max, status {}\n",
                level.material_name,
                level.measurement,
                level.current_stock,
                level.fill_percent,
                level.status,
            ));
        }
        if !suggestions.is_empty() {
            prompt.push_str("\nRefill-to-max quantities:\n");
            for suggestion in suggestions {
                prompt.push_str(&format!(
                    "- {}: {} units ({} sheets)\n",
                    suggestion.material_name, suggestion.units_to_order, suggestion.sheets_to_order,
                ));
            }
        }
        prompt
    }

    fn computed_advice(suggestions: &[ReorderSuggestion]) -> String {
        suggestions
            .iter()
            .map(|s| {
                format!(
                    "Order {} units of {} ({}).",
                    s.units_to_order, s.material_name, s.status
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use shared::{
        LedgerEntryType, MaterialUsage, Measurement, Onboarding, OnboardingItem, StockStatus,
        WorkOrder, WorkOrderStatus,
    };

    fn snapshot() -> InventorySnapshot {
        InventorySnapshot {
            materials: vec![Material {
                id: "mat-a4".to_string(),
                name: "A4 Paper".to_string(),
                material_type: "Ream".to_string(),
                current_stock: 1200,
                max_stock: 5000,
                reorder_threshold: 1500,
            }],
            measurements: vec![Measurement::new("Ream", 500)],
            onboardings: vec![Onboarding {
                id: "onb-1".to_string(),
                date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
                supplier: Some("Paper Mill Ltd".to_string()),
                is_reverted: false,
                items: vec![OnboardingItem {
                    paper_type: "A4 Paper".to_string(),
                    quantity: 2,
                    amount: Decimal::from(1000),
                }],
            }],
            work_orders: vec![WorkOrder {
                id: "wo-1".to_string(),
                job_id: Some("job-7".to_string()),
                date: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
                status: WorkOrderStatus::Completed,
                materials_used: vec![MaterialUsage {
                    material_id: "mat-a4".to_string(),
                    quantity_used: 200,
                }],
            }],
        }
    }

    #[test]
    fn test_ledger_from_snapshot() {
        let ledger =
            StockRegisterService::ledger_from_snapshot(&snapshot(), "mat-a4", None).unwrap();
        assert_eq!(ledger.sheets_per_unit, 500);
        assert_eq!(ledger.entries.len(), 2);
        assert_eq!(ledger.entries[0].entry_type, LedgerEntryType::WorkOrder);
        assert_eq!(ledger.stock.status, StockStatus::Low);
    }

    #[test]
    fn test_unknown_material_is_not_found() {
        let result = StockRegisterService::ledger_from_snapshot(&snapshot(), "nope", None);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_ledger_date_range() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let ledger =
            StockRegisterService::ledger_from_snapshot(&snapshot(), "mat-a4", Some(&range))
                .unwrap();
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].source_id, "wo-1");
    }

    #[test]
    fn test_summary() {
        let ledger =
            StockRegisterService::ledger_from_snapshot(&snapshot(), "mat-a4", None).unwrap();
        let summary = StockRegisterService::summarize(&ledger);
        assert_eq!(summary.material_name, "A4 Paper");
        assert_eq!(summary.summary.closing_sheets, 1200);
        assert_eq!(summary.summary.opening_sheets, 400);
        assert_eq!(summary.summary.total_spend, Decimal::from(1000));
    }

    #[test]
    fn test_export_to_csv() {
        let ledger =
            StockRegisterService::ledger_from_snapshot(&snapshot(), "mat-a4", None).unwrap();
        let csv = StockRegisterService::export_to_csv(&ledger.entries).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,entry_type,reference,job_id,supplier"));
        assert!(lines[1].contains("WORK_ORDER,wo-1,job-7,"));
        assert!(lines[2].contains("ONBOARDING,onb-1,,Paper Mill Ltd,2,0,1000"));
    }

    #[test]
    fn test_reorder_prompt_lists_materials() {
        let snapshot = snapshot();
        let levels = low_stock_materials(&snapshot.materials, &snapshot.measurements);
        let suggestions: Vec<ReorderSuggestion> = snapshot
            .materials
            .iter()
            .filter_map(|m| suggest_reorder(m, &snapshot.measurements))
            .collect();

        let prompt = StockRegisterService::build_reorder_prompt(&levels, &suggestions);
        assert!(prompt.contains("- A4 Paper (Ream): 2 units + 200 sheets in stock"));
        assert!(prompt.contains("- A4 Paper: 8 units (4000 sheets)"));

        let advice = StockRegisterService::computed_advice(&suggestions);
        assert_eq!(advice, "Order 8 units of A4 Paper (Low).");
    }
}
