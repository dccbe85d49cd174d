//! The payroll engine: state plus durable side effects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::PayrollResult;
use crate::models::{Employee, EmployeeId};
use crate::persistence::PersistenceSink;

use super::{ClaimOutcome, CycleReport, NewHire, PayrollState, PromotionOffer};

/// Wraps a [`PayrollState`] and writes snapshots after mutations.
///
/// Snapshot failures are logged and never undo or fail the operation that
/// triggered them.
pub struct PayrollEngine {
    state: PayrollState,
    sink: Box<dyn PersistenceSink + Send>,
}

impl std::fmt::Debug for PayrollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayrollEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PayrollEngine {
    /// Creates an engine over a state and a snapshot sink.
    pub fn new(state: PayrollState, sink: Box<dyn PersistenceSink + Send>) -> Self {
        Self { state, sink }
    }

    /// Read access to the full state.
    pub fn state(&self) -> &PayrollState {
        &self.state
    }

    /// Replays recent history up to the real date. See
    /// [`PayrollState::bootstrap`].
    pub fn bootstrap(&mut self, today: NaiveDate) -> PayrollResult<Vec<CycleReport>> {
        let reports = self.state.bootstrap(today)?;
        if reports.iter().any(|r| !r.ranks_advanced.is_empty()) {
            self.persist_roster();
        }
        Ok(reports)
    }

    /// Runs one monthly cycle.
    pub fn advance_month(&mut self) -> PayrollResult<CycleReport> {
        let report = self.state.advance_month()?;
        if !report.ranks_advanced.is_empty() {
            self.persist_roster();
        }
        Ok(report)
    }

    /// Runs twelve monthly cycles.
    pub fn advance_year(&mut self) -> PayrollResult<Vec<CycleReport>> {
        (0..12).map(|_| self.advance_month()).collect()
    }

    /// Hires an employee and persists roster and credentials.
    pub fn hire(&mut self, hire: NewHire) -> PayrollResult<EmployeeId> {
        let id = self.state.hire(hire)?;
        self.persist_roster();
        self.persist_credentials();
        Ok(id)
    }

    /// Dismisses an employee and persists roster and credentials.
    pub fn dismiss(&mut self, id: EmployeeId) -> PayrollResult<Employee> {
        let employee = self.state.dismiss(id)?;
        self.persist_roster();
        self.persist_credentials();
        Ok(employee)
    }

    /// Records a part-time claim.
    pub fn submit_claim(
        &mut self,
        id: EmployeeId,
        hours: Decimal,
    ) -> PayrollResult<ClaimOutcome> {
        self.state.submit_claim(id, hours)
    }

    /// Offers a promotion, optionally on behalf of another employee.
    pub fn offer_promotion(
        &mut self,
        offered_by: Option<EmployeeId>,
        id: EmployeeId,
        title: &str,
    ) -> PayrollResult<PromotionOffer> {
        match offered_by {
            Some(by) => self.state.offer_promotion_by(by, id, title),
            None => self.state.offer_promotion(id, title),
        }
    }

    /// Accepts an outstanding offer and persists the roster.
    pub fn accept_promotion(&mut self, id: EmployeeId) -> PayrollResult<PromotionOffer> {
        let offer = self.state.accept_promotion(id)?;
        self.persist_roster();
        Ok(offer)
    }

    /// Rejects an outstanding offer.
    pub fn reject_promotion(&mut self, id: EmployeeId) -> PayrollResult<()> {
        self.state.reject_promotion(id)
    }

    fn persist_roster(&mut self) {
        let records = self.state.roster_records();
        if let Err(e) = self.sink.write_roster(&records) {
            warn!(error = %e, "Failed to persist roster");
        }
    }

    fn persist_credentials(&mut self) {
        if let Err(e) = self.sink.write_credentials(self.state.credentials()) {
            warn!(error = %e, "Failed to persist credentials");
        }
    }
}
