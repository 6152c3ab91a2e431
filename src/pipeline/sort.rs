//! Column sorting for income statements

use std::cmp::Ordering;

use crate::data::{parse_currency, FieldValue, FinancialStatement, StatementField};

/// Sort direction for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Active sort column and direction; defaults to newest date first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: StatementField,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: StatementField::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortKey {
    pub fn new(field: StatementField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Sort key after the user selects `field`
    ///
    /// Selecting the active column while it is descending flips it to
    /// ascending. Any other selection sorts `field` descending.
    pub fn toggle(&self, field: StatementField) -> Self {
        let direction = if self.field == field && self.direction == SortDirection::Descending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        Self { field, direction }
    }
}

/// Compares two field values in ascending order
///
/// Text with a leading `$` is compared as a number when both sides parse.
/// Values that cannot be ordered (NaN, or text against a number) compare
/// equal so that a stable sort leaves them in input order.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => match (a, b) {
            (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

fn numeric(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(text) if text.starts_with('$') => parse_currency(text),
        FieldValue::Text(_) => None,
    }
}

/// Returns a copy of `statements` ordered by `key`
///
/// The sort is stable: statements with equal values keep their input order
/// in both directions.
pub fn sort_statements(statements: &[FinancialStatement], key: SortKey) -> Vec<FinancialStatement> {
    let mut sorted = statements.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_values(&key.field.value(a), &key.field.value(b));
        match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}
