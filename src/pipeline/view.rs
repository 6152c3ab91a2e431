//! Derived table and chart data

use chrono::NaiveDate;

use super::filter::{apply_filters, FilterCriteria};
use super::sort::{sort_statements, SortKey};
use crate::data::FinancialStatement;

/// What the statements table should show
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutcome {
    /// The API returned no statements for this ticker
    NoData,
    /// Statements exist but every one is hidden by the filters
    AllFiltered,
    /// Filtered and sorted statements to display
    Rows(Vec<FinancialStatement>),
}

/// Result of running the filter/sort pipeline over fetched statements
#[derive(Debug, Clone, PartialEq)]
pub struct StatementView {
    pub outcome: TableOutcome,
    /// Statements after filtering, in input order
    pub filtered: Vec<FinancialStatement>,
    /// Number of statements removed by the filters
    pub hidden: usize,
}

impl StatementView {
    /// Sorted rows, or an empty slice when nothing is displayable
    pub fn rows(&self) -> &[FinancialStatement] {
        match &self.outcome {
            TableOutcome::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Filters then sorts `statements`
pub fn derive_view(
    statements: &[FinancialStatement],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> StatementView {
    let filtered = apply_filters(statements, criteria);
    let hidden = statements.len() - filtered.len();

    let outcome = if statements.is_empty() {
        TableOutcome::NoData
    } else if filtered.is_empty() {
        TableOutcome::AllFiltered
    } else {
        TableOutcome::Rows(sort_statements(&filtered, sort))
    };

    StatementView {
        outcome,
        filtered,
        hidden,
    }
}

/// Revenue points for the chart, oldest first; missing revenue is skipped
pub fn revenue_series(statements: &[FinancialStatement]) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = statements
        .iter()
        .filter(|statement| !statement.revenue.is_nan())
        .map(|statement| (statement.date, statement.revenue))
        .collect();
    points.sort_by_key(|(date, _)| *date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StatementField;
    use crate::pipeline::{Bounds, SortDirection};

    fn statement(year: i32, revenue: f64) -> FinancialStatement {
        FinancialStatement {
            date: NaiveDate::from_ymd_opt(year, 6, 30).unwrap(),
            revenue,
            net_income: 1.0,
            gross_profit: 1.0,
            operating_income: 1.0,
            eps: 1.0,
        }
    }

    #[test]
    fn test_no_data_is_distinct_from_all_filtered() {
        let criteria = FilterCriteria {
            revenue: Bounds::new(Some(1e12), None),
            ..Default::default()
        };

        let empty = derive_view(&[], &criteria, SortKey::default());
        let hidden = derive_view(&[statement(2020, 5.0)], &criteria, SortKey::default());

        assert_eq!(empty.outcome, TableOutcome::NoData);
        assert_eq!(empty.hidden, 0);
        assert_eq!(hidden.outcome, TableOutcome::AllFiltered);
        assert_eq!(hidden.hidden, 1);
        assert!(hidden.rows().is_empty());
    }

    #[test]
    fn test_rows_are_filtered_and_sorted() {
        let data = vec![statement(2020, 10.0), statement(2021, 30.0), statement(2022, 20.0)];
        let criteria = FilterCriteria {
            revenue: Bounds::new(Some(15.0), None),
            ..Default::default()
        };

        let view = derive_view(
            &data,
            &criteria,
            SortKey::new(StatementField::Revenue, SortDirection::Ascending),
        );

        let revenues: Vec<f64> = view.rows().iter().map(|s| s.revenue).collect();
        assert_eq!(revenues, vec![20.0, 30.0]);
        assert_eq!(view.hidden, 1);
        assert_eq!(view.filtered.len(), 2);
    }

    #[test]
    fn test_revenue_series_is_chronological() {
        let data = vec![statement(2023, 3.0), statement(2021, 1.0), statement(2022, 2.0)];

        let series = revenue_series(&data);

        let values: Vec<f64> = series.iter().map(|(_, revenue)| *revenue).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_revenue_series_skips_missing_revenue() {
        let data = vec![statement(2022, f64::NAN), statement(2021, 1.0)];

        let series = revenue_series(&data);

        assert_eq!(series, vec![(NaiveDate::from_ymd_opt(2021, 6, 30).unwrap(), 1.0)]);
    }
}
