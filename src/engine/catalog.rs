//! Position catalog with case-insensitive title lookup.

use std::sync::Arc;

use crate::error::{PayrollError, PayrollResult};
use crate::models::Position;

/// The immutable set of positions employees can hold.
///
/// Positions are shared with employees through `Arc`, so an employee's
/// position reference stays valid for the lifetime of the catalog.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::PositionCatalog;
/// use payroll_engine::models::Position;
/// use rust_decimal::Decimal;
///
/// let catalog = PositionCatalog::new(vec![
///     Position::new("Other", "Lecturer", vec![Decimal::new(40000, 0)]).unwrap(),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.lookup("LECTURER").unwrap().title(), "Lecturer");
/// assert!(catalog.lookup("Janitor").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionCatalog {
    positions: Vec<Arc<Position>>,
}

impl PositionCatalog {
    /// Builds a catalog, rejecting duplicate titles (ignoring case).
    pub fn new(positions: Vec<Position>) -> PayrollResult<Self> {
        let mut catalog = Self::default();
        for position in positions {
            if catalog.lookup(position.title()).is_ok() {
                return Err(PayrollError::InvalidRecord {
                    line: position.title().to_string(),
                    message: "duplicate position title".to_string(),
                });
            }
            catalog.positions.push(Arc::new(position));
        }
        Ok(catalog)
    }

    /// Finds a position by title, ignoring case.
    pub fn lookup(&self, title: &str) -> PayrollResult<Arc<Position>> {
        let wanted = title.trim().to_lowercase();
        self.positions
            .iter()
            .find(|p| p.title().to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| PayrollError::UnknownPosition {
                title: title.to_string(),
            })
    }

    /// All positions in catalog order.
    pub fn positions(&self) -> &[Arc<Position>] {
        &self.positions
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the catalog holds no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
