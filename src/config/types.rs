//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::PayrollResult;
use crate::models::Position;

/// Default company name printed on payslips.
pub const DEFAULT_COMPANY_NAME: &str = "UL Payroll System";

/// Process-wide settings from `payroll.yaml`.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayrollSettings {
    /// Company name printed on payslips.
    pub company_name: String,
    /// Domain used to derive employee email addresses.
    pub email_domain: String,
    /// Directory that receives roster and credential snapshots.
    pub output_dir: String,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            email_domain: crate::engine::DEFAULT_EMAIL_DOMAIN.to_string(),
            output_dir: ".".to_string(),
        }
    }
}

/// A position as written in `positions.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PositionEntry {
    /// Position title.
    pub title: String,
    /// Annual salaries, rank 1 first.
    pub pay_scale: Vec<Decimal>,
}

/// A category of positions in `positions.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    /// Category name, e.g. "Administrative".
    pub name: String,
    /// Positions in this category.
    pub positions: Vec<PositionEntry>,
}

/// The position catalog file structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// All categories in file order.
    pub categories: Vec<CategoryEntry>,
}

impl CatalogConfig {
    /// Flattens the categories into validated positions.
    pub fn positions(&self) -> PayrollResult<Vec<Position>> {
        self.categories
            .iter()
            .flat_map(|category| {
                category.positions.iter().map(|entry| {
                    Position::new(&category.name, &entry.title, entry.pay_scale.clone())
                })
            })
            .collect()
    }
}
