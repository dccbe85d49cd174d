//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::DEFAULT_COMPANY_NAME;
use crate::engine::PayrollEngine;

/// Shared application state.
///
/// The engine sits behind a single mutex so every mutating request is
/// applied in full before the next one starts.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<Mutex<PayrollEngine>>,
    company_name: Arc<str>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            company_name: Arc::from(DEFAULT_COMPANY_NAME),
        }
    }

    /// Sets the company name printed on payslips.
    pub fn with_company_name(mut self, name: impl AsRef<str>) -> Self {
        self.company_name = Arc::from(name.as_ref());
        self
    }

    /// The company name printed on payslips.
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Locks the engine.
    ///
    /// A poisoned lock is recovered: every engine operation commits only
    /// on success, so the state behind it is always consistent.
    pub fn engine(&self) -> MutexGuard<'_, PayrollEngine> {
        match self.engine.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
