//! HTTP handlers for stock register endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{
    validate_material, validate_measurement, validate_onboarding, validate_work_order, DateRange,
    MaterialStockLevel,
};

use crate::error::{AppError, AppResult};
use crate::external::InventorySnapshot;
use crate::models::LedgerRequest;
use crate::services::stock_register::{
    MaterialLedger, MaterialLedgerSummary, ReorderAdvice, StockRegisterService,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl LedgerQuery {
    /// Date window requested, if any bound was given
    pub fn date_range(&self) -> AppResult<Option<DateRange>> {
        if self.from.is_none() && self.to.is_none() {
            return Ok(None);
        }
        let start = self.from.unwrap_or(NaiveDate::MIN);
        let end = self.to.unwrap_or(NaiveDate::MAX);
        if start > end {
            return Err(AppError::Validation {
                field: "from".to_string(),
                message: "Start date must not be after end date".to_string(),
            });
        }
        Ok(Some(DateRange::new(start, end)))
    }
}

/// Get the stock ledger for a material
pub async fn get_material_ledger(
    State(state): State<AppState>,
    Path(material_id): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<MaterialLedger>> {
    let range = query.date_range()?;
    let ledger = state.service.material_ledger(&material_id, range).await?;
    Ok(Json(ledger))
}

/// Get ledger totals for a material
pub async fn get_ledger_summary(
    State(state): State<AppState>,
    Path(material_id): Path<String>,
) -> AppResult<Json<MaterialLedgerSummary>> {
    let summary = state.service.ledger_summary(&material_id).await?;
    Ok(Json(summary))
}

/// Download a material's ledger as CSV
pub async fn export_material_ledger(
    State(state): State<AppState>,
    Path(material_id): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<impl IntoResponse> {
    let range = query.date_range()?;
    let ledger = state.service.material_ledger(&material_id, range).await?;
    let csv = StockRegisterService::export_to_csv(&ledger.entries)?;
    let disposition = format!("attachment; filename=\"stock_ledger_{}.csv\"", material_id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Compute a ledger from inputs supplied in the request body
pub async fn build_ledger(Json(request): Json<LedgerRequest>) -> AppResult<Json<MaterialLedger>> {
    validate_material(&request.material)?;
    for measurement in &request.measurements {
        validate_measurement(measurement)?;
    }
    for onboarding in &request.onboardings {
        validate_onboarding(onboarding)?;
    }
    for work_order in &request.work_orders {
        validate_work_order(work_order)?;
    }

    let snapshot = InventorySnapshot {
        materials: Vec::new(),
        measurements: request.measurements,
        onboardings: request.onboardings,
        work_orders: request.work_orders,
    };
    let ledger = StockRegisterService::ledger_for(request.material, &snapshot, None);
    Ok(Json(ledger))
}

/// List materials at or below their reorder threshold
pub async fn get_low_stock(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MaterialStockLevel>>> {
    let levels = state.service.low_stock().await?;
    Ok(Json(levels))
}

/// Get reorder suggestions for low-stock materials
pub async fn get_reorder_suggestions(
    State(state): State<AppState>,
) -> AppResult<Json<ReorderAdvice>> {
    let advice = state.service.reorder_advice().await?;
    Ok(Json(advice))
}
