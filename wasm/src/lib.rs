//! WebAssembly module for the Stock Register platform
//!
//! Provides client-side computation for:
//! - Stock ledger reconstruction
//! - Ledger summaries
//! - Unit/sheet formatting
//! - Stock status classification

use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reorder::*;
pub use shared::stock_register::*;
pub use shared::types::*;

/// Everything the ledger builder needs, as sent by the page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInput {
    pub material: Material,
    #[serde(default)]
    pub onboardings: Vec<Onboarding>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

/// Report a bad payload in the browser console and hand it back as a JS error
fn js_error(message: String) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_input(input_json: &str) -> Result<LedgerInput, JsValue> {
    serde_json::from_str(input_json)
        .map_err(|e| js_error(format!("Invalid ledger input JSON: {}", e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| js_error(format!("Failed to serialize result: {}", e)))
}

/// Build the stock ledger for one material, newest entry first
#[wasm_bindgen]
pub fn build_stock_ledger(input_json: &str) -> Result<String, JsValue> {
    let input = parse_input(input_json)?;
    let ledger = shared::build_stock_ledger(
        &input.material,
        &input.onboardings,
        &input.work_orders,
        &input.measurements,
    );
    to_json(&ledger)
}

/// Summarize the stock ledger for one material
#[wasm_bindgen]
pub fn summarize_stock_ledger(input_json: &str) -> Result<String, JsValue> {
    let input = parse_input(input_json)?;
    let ledger = shared::build_stock_ledger(
        &input.material,
        &input.onboardings,
        &input.work_orders,
        &input.measurements,
    );
    let factor = sheets_per_unit(&input.material, &input.measurements);
    to_json(&LedgerSummary::from_entries(&ledger, factor))
}

/// Format a sheet count as units plus leftover sheets
#[wasm_bindgen]
pub fn format_stock(total_sheets: i64, sheets_per_unit: i64) -> String {
    to_units(total_sheets, sheets_per_unit).to_string()
}

/// Stock status of a material ("Healthy", "Low", "Out of Stock")
#[wasm_bindgen]
pub fn stock_status_of(material_json: &str) -> Result<String, JsValue> {
    let material: Material = serde_json::from_str(material_json)
        .map_err(|e| js_error(format!("Invalid material JSON: {}", e)))?;
    Ok(format!("{}", stock_status(&material)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "material": {
            "id": "mat-a4",
            "name": "A4 Paper",
            "type": "Ream",
            "currentStock": 1200,
            "maxStock": 5000,
            "reorderThreshold": 1000
        },
        "onboardings": [{
            "id": "onb-1",
            "date": "2024-03-01T09:00:00Z",
            "supplier": "Paper Mill Ltd",
            "isReverted": false,
            "items": [{ "paperType": "A4 Paper", "quantity": 2, "amount": "1000" }]
        }],
        "workOrders": [{
            "id": "wo-1",
            "jobId": "job-1",
            "date": "2024-03-05T09:00:00Z",
            "status": "Completed",
            "materialsUsed": [{ "materialId": "mat-a4", "quantityUsed": 200 }]
        }],
        "measurements": [{ "id": "ream", "name": "Ream", "sheetsPerUnit": 500 }]
    }"#;

    #[test]
    fn test_build_stock_ledger_json() {
        let output = build_stock_ledger(INPUT).unwrap();
        let entries: serde_json::Value = serde_json::from_str(&output).unwrap();
        let entries = entries.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["type"], "WORK_ORDER");
        assert_eq!(entries[0]["sheetChange"], -200);
        assert_eq!(entries[0]["stockAfter"]["units"], 2);
        assert_eq!(entries[0]["stockAfter"]["extraSheets"], 200);
        assert_eq!(entries[1]["type"], "ONBOARDING");
        assert_eq!(entries[1]["sheetChange"], 1000);
    }

    #[test]
    fn test_summarize_stock_ledger_json() {
        let output = summarize_stock_ledger(INPUT).unwrap();
        let summary: LedgerSummary = serde_json::from_str(&output).unwrap();
        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.closing_sheets, 1200);
        assert_eq!(summary.opening_sheets, 400);
    }

    #[test]
    fn test_format_stock() {
        assert_eq!(format_stock(1200, 500), "2 units + 200 sheets");
        assert_eq!(format_stock(1000, 500), "2 units");
        assert_eq!(format_stock(42, 1), "42 units");
    }
}
