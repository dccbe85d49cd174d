//! Property tests for the pay-scale, deduction and calendar rules.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{Deductions, is_claim_on_time, promotion_rank, second_friday};
use payroll_engine::models::{Employee, InsuranceTier, NewEmployee, Position};

fn position(points: usize) -> Position {
    let scale = (0..points)
        .map(|i| Decimal::from(30000 + 1500 * i as i64))
        .collect();
    Position::new("Other", "Lecturer", scale).unwrap()
}

fn employee(points: usize, rank: u32) -> Employee {
    Employee::new(NewEmployee {
        id: 1000,
        name: "Aoife Ryan".to_string(),
        phone: "0870000000".to_string(),
        email_domain: "ul.ie".to_string(),
        position: Arc::new(position(points)),
        rank,
        last_promotion_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        insurance_tier: InsuranceTier::Standard,
        part_time: false,
    })
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #[test]
    fn rank_is_always_on_the_scale(points in 1usize..10, rank in 0u32..50) {
        let employee = employee(points, rank);
        prop_assert!(employee.rank() >= 1);
        prop_assert!(employee.rank() <= points as u32);
        prop_assert!(employee.annual_salary().is_ok());
    }

    #[test]
    fn increments_never_pass_the_top(points in 1usize..10, rank in 1u32..10, steps in 0usize..20) {
        let mut employee = employee(points, rank);
        let today = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();
        for _ in 0..steps {
            employee.increment_rank(today);
        }
        prop_assert!(employee.rank() <= points as u32);
        if employee.rank() == points as u32 {
            prop_assert!(employee.reached_top_of_scale_date().is_some());
        }
    }

    #[test]
    fn net_pay_is_gross_less_deductions(cents in 0i64..20_000_000, tier in 0usize..4) {
        let insurance = [40, 60, 100, 140][tier];
        let d = Deductions::calculate(Decimal::new(cents, 2), Decimal::from(insurance));
        prop_assert_eq!(d.net_pay, d.gross_pay - d.total);
        prop_assert_eq!(d.total, d.usc + d.paye + d.union_fee + d.prsi + d.insurance);
    }

    #[test]
    fn second_friday_falls_on_the_eighth_to_fourteenth(date in any_date()) {
        let friday = second_friday(date);
        prop_assert_eq!(friday.weekday(), Weekday::Fri);
        prop_assert!((8..=14).contains(&friday.day()));
        prop_assert_eq!(friday.month(), date.month());
        prop_assert_eq!(friday.year(), date.year());
    }

    #[test]
    fn claims_on_the_deadline_are_late(date in any_date()) {
        prop_assert!(!is_claim_on_time(Some(second_friday(date)), date));
    }

    #[test]
    fn promotion_rank_stays_on_the_new_scale(
        points in 1usize..10,
        top in proptest::option::of(any_date()),
        today in any_date(),
    ) {
        let rank = promotion_rank(top, today, &position(points));
        prop_assert!(rank >= 1);
        prop_assert!(rank <= points as u32);
    }
}
