//! Business logic services for the Stock Register platform

pub mod stock_register;

pub use stock_register::StockRegisterService;
