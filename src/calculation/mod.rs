//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculations the scheduler relies on:
//! statutory deductions, the part-time claim window and the starting rank
//! for promotions.

mod claim_window;
mod deductions;
mod promotion_rank;

pub use claim_window::{is_claim_on_time, second_friday};
pub use deductions::{
    Deductions, PAYE_CUT_OFF, USC_BAND_1_CEILING, USC_BAND_2_CEILING, USC_BAND_3_CEILING,
    calculate_net_pay, calculate_paye, calculate_prsi, calculate_union_fee, calculate_usc,
    prsi_rate, union_fee_rate,
};
pub use promotion_rank::promotion_rank;
