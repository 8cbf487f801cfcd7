//! Domain models for the Stock Register platform

mod event;
mod ledger;
mod material;
mod onboarding;
mod work_order;

pub use event::*;
pub use ledger::*;
pub use material::*;
pub use onboarding::*;
pub use work_order::*;
