//! Configuration loading for the payroll engine.
//!
//! This module loads the position catalog, the starting roster and the
//! process settings from a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Payslips issued by: {}", config.settings().company_name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CatalogConfig, CategoryEntry, DEFAULT_COMPANY_NAME, PayrollSettings, PositionEntry};
