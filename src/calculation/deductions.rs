//! Statutory deduction calculations.
//!
//! This module maps a gross base pay to PRSI, USC, income tax (PAYE), union
//! fees and net pay. The tier formulas are reproduced exactly as the payroll
//! office defines them: the USC tiers above the first apply their rate to
//! the whole base pay, and the upper PAYE branch only taxes the amount above
//! the cut-off.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// PRSI rate (4%).
pub fn prsi_rate() -> Decimal {
    Decimal::new(4, 2)
}

/// Union fee rate (10%).
pub fn union_fee_rate() -> Decimal {
    Decimal::new(1, 1)
}

/// Upper bound of the first USC band.
pub const USC_BAND_1_CEILING: i64 = 12012;
/// Upper bound of the second USC band.
pub const USC_BAND_2_CEILING: i64 = 21295;
/// Upper bound of the third USC band.
pub const USC_BAND_3_CEILING: i64 = 70044;
/// Standard-rate cut-off for PAYE.
pub const PAYE_CUT_OFF: i64 = 36800;

/// Calculates PRSI: 4% of base pay.
///
/// ```
/// use payroll_engine::calculation::calculate_prsi;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_prsi(Decimal::new(1000, 0)), Decimal::new(40, 0));
/// ```
pub fn calculate_prsi(base_pay: Decimal) -> Decimal {
    base_pay * prsi_rate()
}

/// Calculates the Universal Social Charge across four tiers.
///
/// | Base pay            | USC                                                        |
/// |---------------------|------------------------------------------------------------|
/// | ≤ 12012             | `0.5% × b`                                                 |
/// | ≤ 21295             | `12012 × 0.5% + (b − 12012) × 2%`                          |
/// | ≤ 70044             | `12012 × 0.5% + (21295 − 12012) × 2% + b × 4.5%`           |
/// | above               | `… + (70044 − 21295) × 4.5% + b × 8%`                      |
///
/// ```
/// use payroll_engine::calculation::calculate_usc;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_usc(Decimal::new(12012, 0)), Decimal::new(6006, 2));
/// ```
pub fn calculate_usc(base_pay: Decimal) -> Decimal {
    let band_1 = Decimal::from(USC_BAND_1_CEILING);
    let band_2 = Decimal::from(USC_BAND_2_CEILING);
    let band_3 = Decimal::from(USC_BAND_3_CEILING);

    let rate_1 = Decimal::new(5, 3);
    let rate_2 = Decimal::new(2, 2);
    let rate_3 = Decimal::new(45, 3);
    let rate_4 = Decimal::new(8, 2);

    if base_pay <= band_1 {
        base_pay * rate_1
    } else if base_pay <= band_2 {
        band_1 * rate_1 + (base_pay - band_1) * rate_2
    } else if base_pay <= band_3 {
        band_1 * rate_1 + (band_2 - band_1) * rate_2 + base_pay * rate_3
    } else {
        band_1 * rate_1 + (band_2 - band_1) * rate_2 + (band_3 - band_2) * rate_3 + base_pay * rate_4
    }
}

/// Calculates PAYE income tax.
///
/// Base pay up to the cut-off is taxed at 20%. Above the cut-off only the
/// excess is taxed, at 40%.
///
/// ```
/// use payroll_engine::calculation::calculate_paye;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_paye(Decimal::new(36800, 0)), Decimal::new(7360, 0));
/// assert_eq!(calculate_paye(Decimal::new(40000, 0)), Decimal::new(1280, 0));
/// ```
pub fn calculate_paye(base_pay: Decimal) -> Decimal {
    let cut_off = Decimal::from(PAYE_CUT_OFF);
    if base_pay <= cut_off {
        base_pay * Decimal::new(2, 1)
    } else {
        (base_pay - cut_off) * Decimal::new(4, 1)
    }
}

/// Calculates union fees: 10% of base pay.
pub fn calculate_union_fee(base_pay: Decimal) -> Decimal {
    base_pay * union_fee_rate()
}

/// Gross pay minus every deduction, including the insurance amount.
pub fn calculate_net_pay(base_pay: Decimal, insurance: Decimal) -> Decimal {
    Deductions::calculate(base_pay, insurance).net_pay
}

/// An itemised deduction breakdown for one pay event.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::Deductions;
/// use rust_decimal::Decimal;
///
/// let deductions = Deductions::calculate(Decimal::new(3000, 0), Decimal::new(60, 0));
/// assert_eq!(deductions.prsi, Decimal::new(120, 0));
/// assert_eq!(deductions.net_pay, deductions.gross_pay - deductions.total);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Gross base pay the deductions were computed from.
    pub gross_pay: Decimal,
    /// Health insurance deduction.
    pub insurance: Decimal,
    /// Universal Social Charge.
    pub usc: Decimal,
    /// Income tax.
    pub paye: Decimal,
    /// Pay-related social insurance.
    pub prsi: Decimal,
    /// Union fees.
    pub union_fee: Decimal,
    /// Sum of all deductions.
    pub total: Decimal,
    /// Gross pay less total deductions.
    pub net_pay: Decimal,
}

impl Deductions {
    /// Computes every deduction for a base pay and insurance amount.
    pub fn calculate(base_pay: Decimal, insurance: Decimal) -> Self {
        let usc = calculate_usc(base_pay);
        let paye = calculate_paye(base_pay);
        let prsi = calculate_prsi(base_pay);
        let union_fee = calculate_union_fee(base_pay);
        let total = usc + paye + union_fee + prsi + insurance;

        Self {
            gross_pay: base_pay,
            insurance,
            usc,
            paye,
            prsi,
            union_fee,
            total,
            net_pay: base_pay - total,
        }
    }
}
