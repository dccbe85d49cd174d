//! The payroll simulation engine.
//!
//! [`PayrollState`] is a plain value holding the catalog, roster, clock and
//! credentials. Its operations are split by concern across this module's
//! children. [`PayrollEngine`] wraps the state and writes durable snapshots
//! after each mutation.

mod catalog;
mod claims;
mod clock;
mod promotion;
mod roster;
mod scheduler;
mod service;
mod state;

pub use catalog::PositionCatalog;
pub use claims::ClaimOutcome;
pub use clock::SimulatedClock;
pub use promotion::PromotionOffer;
pub use roster::NewHire;
pub use scheduler::{BOOTSTRAP_LOOKBACK_MONTHS, CycleReport, PROGRESSION_MONTH};
pub use service::PayrollEngine;
pub use state::{DEFAULT_EMAIL_DOMAIN, PayrollState};
