//! Position model and pay-scale lookups.
//!
//! A [`Position`] is an immutable catalog entry: a unique title, a category
//! and an ordered pay scale of annual salaries indexed by rank.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// The fixed set of categories that drive id bands and role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCategory {
    /// Administrative staff (ids in the 2000 band).
    Administrative,
    /// Human resources staff (ids in the 3000 band).
    HumanResources,
    /// Everyone else (ids in the 1000 band).
    Other,
}

impl PositionCategory {
    /// Classifies a normalised category name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Administrative" => PositionCategory::Administrative,
            "Human Resources" => PositionCategory::HumanResources,
            _ => PositionCategory::Other,
        }
    }

    /// First employee id handed out for this category.
    pub fn id_band(self) -> u32 {
        match self {
            PositionCategory::Administrative => 2000,
            PositionCategory::HumanResources => 3000,
            PositionCategory::Other => 1000,
        }
    }

    /// The role suffix shown next to the employment type.
    pub fn role_name(self) -> &'static str {
        match self {
            PositionCategory::Administrative => "Administrator",
            PositionCategory::HumanResources => "Human Resources",
            PositionCategory::Other => "Basic Employee",
        }
    }
}

/// A position in the university catalog.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Position, PositionCategory};
/// use rust_decimal::Decimal;
///
/// let position = Position::new(
///     "HUMAN RESOURCES",
///     "HR Officer",
///     vec![Decimal::new(40000, 0), Decimal::new(42000, 0)],
/// )
/// .unwrap();
///
/// assert_eq!(position.category(), "Human Resources");
/// assert_eq!(position.category_kind(), PositionCategory::HumanResources);
/// assert_eq!(position.max_rank(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    title: String,
    category: String,
    pay_scale: Vec<Decimal>,
}

impl Position {
    /// Creates a position, normalising the category name.
    ///
    /// Returns `InvalidRecord` if the pay scale is empty.
    pub fn new(
        category: &str,
        title: impl Into<String>,
        pay_scale: Vec<Decimal>,
    ) -> PayrollResult<Self> {
        let title = title.into();
        if pay_scale.is_empty() {
            return Err(PayrollError::InvalidRecord {
                line: title,
                message: "pay scale must contain at least one point".to_string(),
            });
        }

        Ok(Self {
            title,
            category: normalise_category(category),
            pay_scale,
        })
    }

    /// The unique title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The normalised category name (e.g. "Human Resources").
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The category classified into the fixed set.
    pub fn category_kind(&self) -> PositionCategory {
        PositionCategory::from_name(&self.category)
    }

    /// The annual salaries, lowest rank first.
    pub fn pay_scale(&self) -> &[Decimal] {
        &self.pay_scale
    }

    /// The highest rank on this scale.
    pub fn max_rank(&self) -> u32 {
        self.pay_scale.len() as u32
    }

    /// Clamps a requested rank into `[1, max_rank]`.
    pub fn clamp_rank(&self, rank: u32) -> u32 {
        rank.clamp(1, self.max_rank())
    }

    /// Resolves the annual salary for a rank.
    ///
    /// Rank `r` maps to `pay_scale[r - 1]`. Ranks outside the scale are
    /// reported as `InvalidRank` rather than clamped here; callers store
    /// ranks already clamped through [`Position::clamp_rank`].
    pub fn annual_salary(&self, rank: u32) -> PayrollResult<Decimal> {
        rank.checked_sub(1)
            .and_then(|index| self.pay_scale.get(index as usize))
            .copied()
            .ok_or(PayrollError::InvalidRank {
                rank,
                scale_len: self.pay_scale.len(),
            })
    }
}

/// Title-cases each word of a category, leaving the token `UL` untouched.
fn normalise_category(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            if word == "UL" {
                return word.to_string();
            }
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
