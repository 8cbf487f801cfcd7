//! Stock-affecting events as a single tagged type

use serde::{Deserialize, Serialize};

use super::{Onboarding, WorkOrder};

/// Any event that can move a material's stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StockEvent {
    Onboarding(Onboarding),
    WorkOrder(WorkOrder),
}

impl From<Onboarding> for StockEvent {
    fn from(onboarding: Onboarding) -> Self {
        StockEvent::Onboarding(onboarding)
    }
}

impl From<WorkOrder> for StockEvent {
    fn from(work_order: WorkOrder) -> Self {
        StockEvent::WorkOrder(work_order)
    }
}

/// Merge receipts and work orders into one event list, receipts first
pub fn collect_events(onboardings: &[Onboarding], work_orders: &[WorkOrder]) -> Vec<StockEvent> {
    onboardings
        .iter()
        .cloned()
        .map(StockEvent::from)
        .chain(work_orders.iter().cloned().map(StockEvent::from))
        .collect()
}
