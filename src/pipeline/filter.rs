//! Range filters over income statements
//!
//! All bounds are inclusive and optional; a missing bound leaves that side of
//! the range unconstrained. Criteria are combined conjunctively.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::data::FinancialStatement;

/// Errors produced when turning user text into filter bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterInputError {
    /// Date text is not `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    #[error("Invalid date: '{0}'. Use YYYY, YYYY-MM or YYYY-MM-DD")]
    InvalidDate(String),

    /// Amount text is not a number
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
}

/// An inclusive range with optional ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
        }
    }
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    /// Whether neither end is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `value` lies within both set ends
    ///
    /// A value that does not compare with a set end (NaN) is outside.
    pub fn contains(&self, value: &T) -> bool {
        let above_start = self.start.as_ref().map_or(true, |start| value >= start);
        let below_end = self.end.as_ref().map_or(true, |end| value <= end);
        above_start && below_end
    }
}

/// Active filter ranges for the statements table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub date: Bounds<NaiveDate>,
    pub revenue: Bounds<f64>,
    pub net_income: Bounds<f64>,
}

impl FilterCriteria {
    /// Whether no bound is set at all
    pub fn is_empty(&self) -> bool {
        self.date.is_unbounded() && self.revenue.is_unbounded() && self.net_income.is_unbounded()
    }

    pub fn matches(&self, statement: &FinancialStatement) -> bool {
        self.date.contains(&statement.date)
            && self.revenue.contains(&statement.revenue)
            && self.net_income.contains(&statement.net_income)
    }
}

/// Returns the statements that satisfy every bound, in input order
pub fn apply_filters(
    statements: &[FinancialStatement],
    criteria: &FilterCriteria,
) -> Vec<FinancialStatement> {
    statements
        .iter()
        .filter(|statement| criteria.matches(statement))
        .cloned()
        .collect()
}

/// Which end of a range a date input describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Start,
    End,
}

/// Parses a date bound from user text
///
/// Partial dates widen to the whole period: `2021` as a start is
/// 2021-01-01 and as an end is 2021-12-31; `2021-06` covers all of June.
/// Empty text means no bound.
pub fn parse_date_bound(text: &str, end: RangeEnd) -> Result<Option<NaiveDate>, FilterInputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let invalid = || FilterInputError::InvalidDate(text.to_string());

    let parts: Vec<&str> = text.split('-').collect();
    let date = match parts.as_slice() {
        [year] => {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            match end {
                RangeEnd::Start => NaiveDate::from_ymd_opt(year, 1, 1),
                RangeEnd::End => NaiveDate::from_ymd_opt(year, 12, 31),
            }
        }
        [year, month] => {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(year, month, 1);
            match end {
                RangeEnd::Start => first,
                RangeEnd::End => first.and_then(last_day_of_month),
            }
        }
        [_, _, _] => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
        _ => None,
    };

    date.map(Some).ok_or_else(invalid)
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|next| next.pred_opt())
}

/// Parses an amount bound from user text; empty text means no bound
pub fn parse_amount_bound(text: &str) -> Result<Option<f64>, FilterInputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| FilterInputError::InvalidAmount(text.to_string()))
}
