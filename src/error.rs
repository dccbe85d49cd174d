//! Error types for the payroll engine.
//!
//! Every fallible operation in the crate returns [`PayrollError`]. All
//! variants describe recoverable, operator-facing failures; none of them
//! leaves the roster or the simulated clock half-modified.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::UnknownPosition {
///     title: "Dean of Snacks".to_string(),
/// };
/// assert_eq!(error.to_string(), "Dean of Snacks, no such position exists");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// No position in the catalog carries the requested title.
    #[error("{title}, no such position exists")]
    UnknownPosition {
        /// The title that was looked up.
        title: String,
    },

    /// A rank resolved outside the bounds of its pay scale.
    #[error("Rank {rank} out of bounds for a pay scale of {scale_len} points")]
    InvalidRank {
        /// The offending rank.
        rank: u32,
        /// The number of points on the pay scale.
        scale_len: usize,
    },

    /// A promotion was offered to someone who cannot receive it.
    #[error("Employee {employee_id} cannot be promoted: {reason}")]
    IneligiblePromotionTarget {
        /// The target employee.
        employee_id: u32,
        /// Why the target is ineligible.
        reason: String,
    },

    /// No employee with the given id exists on the roster.
    #[error("ID Number does not exist: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: u32,
    },

    /// A promotion decision was made with no offer outstanding.
    #[error("Employee {employee_id} has no pending promotion offer")]
    NoPendingPromotion {
        /// The employee without an offer.
        employee_id: u32,
    },

    /// A pay claim was submitted for a full-time employee.
    #[error("Employee {employee_id} is not part-time and cannot submit pay claims")]
    NotPartTime {
        /// The full-time employee.
        employee_id: u32,
    },

    /// Claimed hours were negative.
    #[error("Invalid claimed hours: {hours}")]
    InvalidHours {
        /// The rejected hours value.
        hours: Decimal,
    },

    /// A roster or catalog record could not be parsed.
    #[error("Invalid record '{line}': {message}")]
    InvalidRecord {
        /// The raw record text.
        line: String,
        /// A description of the problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The simulated calendar cannot move any further.
    #[error("Simulated calendar cannot advance past {date}")]
    CalendarOverflow {
        /// The date the clock was stuck on.
        date: NaiveDate,
    },

    /// Writing a durability snapshot failed.
    #[error("Failed to persist '{path}': {message}")]
    Persistence {
        /// The file being written.
        path: String,
        /// The underlying I/O error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
