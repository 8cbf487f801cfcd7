//! HTTP handlers

pub mod health;
pub mod stock_register;

pub use health::*;
pub use stock_register::*;
