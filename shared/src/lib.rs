//! Shared types and models for the Stock Register platform
//!
//! This crate contains types and stock computations shared between the
//! backend, the browser front-end (via WASM), and other components.

pub mod models;
pub mod reorder;
pub mod stock_register;
pub mod types;
pub mod validation;

pub use models::*;
pub use reorder::*;
pub use stock_register::*;
pub use types::*;
pub use validation::*;
