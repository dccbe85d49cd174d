//! Roster record codec.
//!
//! The roster travels as one comma-separated line per employee:
//!
//! ```text
//! name,phone,positionTitle,rank,dd/MM/yy,InsuranceTier[,Parttime]
//! ```
//!
//! Six fields describe a full-time employee; a seventh field marks a
//! part-time one. The same shape is used for loading and for durability
//! snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

use super::{Employee, InsuranceTier};

/// Format of dates inside roster records.
pub const ROSTER_DATE_FORMAT: &str = "%d/%m/%y";

/// Marker written in the seventh field for part-time employees.
pub const PART_TIME_MARKER: &str = "Parttime";

/// One employee in roster-record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Title of the current position.
    pub position_title: String,
    /// Current rank.
    pub rank: u32,
    /// Date of the last promotion.
    pub last_promotion_date: NaiveDate,
    /// Health insurance tier.
    pub insurance_tier: InsuranceTier,
    /// Whether the employee is part-time.
    pub part_time: bool,
}

impl RosterRecord {
    /// Parses a single roster line.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::RosterRecord;
    ///
    /// let record = RosterRecord::parse_line("Aoife Ryan,0871234567,Lecturer,2,01/09/22,Basic").unwrap();
    /// assert_eq!(record.rank, 2);
    /// assert!(!record.part_time);
    /// ```
    pub fn parse_line(line: &str) -> PayrollResult<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let part_time = match fields.len() {
            6 => false,
            7 => true,
            n => {
                return Err(invalid(
                    line,
                    format!("expected 6 or 7 fields, found {}", n),
                ));
            }
        };

        let rank = fields[3]
            .parse::<u32>()
            .map_err(|_| invalid(line, format!("rank '{}' is not a number", fields[3])))?;
        let last_promotion_date = parse_roster_date(fields[4])
            .ok_or_else(|| invalid(line, format!("date '{}' is not dd/MM/yy", fields[4])))?;
        let insurance_tier = InsuranceTier::parse(fields[5])
            .ok_or_else(|| invalid(line, format!("unknown insurance tier '{}'", fields[5])))?;

        Ok(Self {
            name: fields[0].to_string(),
            phone: fields[1].to_string(),
            position_title: fields[2].to_string(),
            rank,
            last_promotion_date,
            insurance_tier,
            part_time,
        })
    }

    /// Parses every non-blank line of a roster file.
    pub fn parse_all(content: &str) -> PayrollResult<Vec<Self>> {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse_line)
            .collect()
    }

    /// Renders the record back into its line form.
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{},{},{},{},{},{}",
            self.name,
            self.phone,
            self.position_title,
            self.rank,
            self.last_promotion_date.format(ROSTER_DATE_FORMAT),
            self.insurance_tier
        );
        if self.part_time {
            line.push(',');
            line.push_str(PART_TIME_MARKER);
        }
        line
    }
}

impl From<&Employee> for RosterRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name().to_string(),
            phone: employee.phone().to_string(),
            position_title: employee.position().title().to_string(),
            rank: employee.rank(),
            last_promotion_date: employee.last_promotion_date(),
            insurance_tier: employee.insurance_tier(),
            part_time: employee.is_part_time(),
        }
    }
}

/// Parses `dd/MM/yy`, reading two-digit years as 20yy.
fn parse_roster_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn invalid(line: &str, message: String) -> PayrollError {
    PayrollError::InvalidRecord {
        line: line.to_string(),
        message,
    }
}
