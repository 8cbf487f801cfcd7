//! External API integrations

pub mod inventory_api;
pub mod reorder_advisor;

pub use inventory_api::{InventoryApiClient, InventorySnapshot};
pub use reorder_advisor::ReorderAdvisorClient;
