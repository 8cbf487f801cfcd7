//! Request models for the Stock Register server

use serde::Deserialize;
use shared::{Material, Measurement, Onboarding, WorkOrder};

/// Inputs for computing a ledger without the inventory API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRequest {
    pub material: Material,
    #[serde(default)]
    pub onboardings: Vec<Onboarding>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}
