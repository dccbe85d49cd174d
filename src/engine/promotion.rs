//! Promotion offers and decisions.
//!
//! An offer moves an employee from no offer to a pending offer. Accepting
//! moves them onto the offered position at a rank credited for time spent
//! at the top of their previous scale; rejecting simply drops the offer.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::calculation::promotion_rank;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, EmployeeId, Position};

use super::PayrollState;

/// An outstanding promotion offer and the rank it would start at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionOffer {
    /// The employee the offer is for.
    pub employee_id: EmployeeId,
    /// The offered position.
    pub position: Arc<Position>,
    /// The rank the employee would enter the position at today.
    pub rank: u32,
}

impl PayrollState {
    /// Offers an employee a new position.
    pub fn offer_promotion(
        &mut self,
        id: EmployeeId,
        title: &str,
    ) -> PayrollResult<PromotionOffer> {
        let employee = self.find_employee(id)?;
        if employee.is_part_time() {
            return Err(PayrollError::IneligiblePromotionTarget {
                employee_id: id,
                reason: "Only full-time employees can be promoted.".to_string(),
            });
        }
        let position = self.catalog.lookup(title)?;

        let today = self.today();
        let employee = self.find_employee_mut(id)?;
        employee.set_pending_promotion(Some(Arc::clone(&position)));
        info!(
            employee_id = id,
            position = %position.title(),
            "Promotion offered"
        );
        Ok(proposed_offer(employee, position, today))
    }

    /// Offers a promotion on behalf of another employee.
    ///
    /// Nobody may promote themselves.
    pub fn offer_promotion_by(
        &mut self,
        offered_by: EmployeeId,
        id: EmployeeId,
        title: &str,
    ) -> PayrollResult<PromotionOffer> {
        self.find_employee(offered_by)?;
        if offered_by == id {
            return Err(PayrollError::IneligiblePromotionTarget {
                employee_id: id,
                reason: "Employees cannot promote themselves.".to_string(),
            });
        }
        self.offer_promotion(id, title)
    }

    /// The employee's outstanding offer, if any, with its proposed rank.
    pub fn pending_offer(&self, id: EmployeeId) -> PayrollResult<Option<PromotionOffer>> {
        let employee = self.find_employee(id)?;
        Ok(employee
            .pending_promotion()
            .map(|position| proposed_offer(employee, Arc::clone(position), self.today())))
    }

    /// Moves the employee onto the offered position.
    ///
    /// The new rank is computed before the position changes, so credit for
    /// time at the top of the old scale is carried across.
    pub fn accept_promotion(&mut self, id: EmployeeId) -> PayrollResult<PromotionOffer> {
        let offer = self
            .pending_offer(id)?
            .ok_or(PayrollError::NoPendingPromotion { employee_id: id })?;

        let today = self.today();
        let employee = self.find_employee_mut(id)?;
        employee.set_position(Arc::clone(&offer.position));
        employee.set_rank(offer.rank);
        employee.set_last_promotion_date(today);
        employee.set_pending_promotion(None);

        info!(
            employee_id = id,
            position = %offer.position.title(),
            rank = offer.rank,
            "Promotion accepted"
        );
        Ok(offer)
    }

    /// Declines the outstanding offer.
    pub fn reject_promotion(&mut self, id: EmployeeId) -> PayrollResult<()> {
        let employee = self.find_employee_mut(id)?;
        if !employee.promotion_due() {
            return Err(PayrollError::NoPendingPromotion { employee_id: id });
        }
        employee.set_pending_promotion(None);
        info!(employee_id = id, "Promotion rejected");
        Ok(())
    }
}

fn proposed_offer(
    employee: &Employee,
    position: Arc<Position>,
    today: NaiveDate,
) -> PromotionOffer {
    let rank = promotion_rank(employee.reached_top_of_scale_date(), today, &position);
    PromotionOffer {
        employee_id: employee.id(),
        position,
        rank,
    }
}
