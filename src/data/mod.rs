//! Core data models for incomeview
//!
//! This module contains the income-statement record returned by the
//! financial-data API, the reporting period, and the table columns used
//! for sorting and display.

pub mod income;

pub use income::{FetchError, IncomeStatementClient};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One fiscal-period income statement as returned by the API
///
/// Amount fields accept either JSON numbers or currency strings such as
/// `"$1234.5"`. A null or missing amount is stored as NaN. Unknown fields in
/// the response are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    /// Statement date (end of the fiscal period)
    pub date: NaiveDate,
    /// Total revenue
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub revenue: f64,
    /// Net income
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub net_income: f64,
    /// Gross profit
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub gross_profit: f64,
    /// Operating income
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub operating_income: f64,
    /// Earnings per share
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub eps: f64,
}

/// Reporting period requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Period {
    #[default]
    Annual,
    Quarter,
}

impl Period {
    /// Value used in the `period` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Annual => "annual",
            Period::Quarter => "quarter",
        }
    }

    /// Parses a period name, accepting a few common spellings
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "annual" | "year" | "yearly" => Some(Period::Annual),
            "quarter" | "quarterly" | "q" => Some(Period::Quarter),
            _ => None,
        }
    }
}

/// A column of the statements table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementField {
    Date,
    Revenue,
    NetIncome,
    GrossProfit,
    Eps,
    OperatingIncome,
}

/// A comparable value extracted from a statement field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl StatementField {
    /// All columns in display order
    pub const ALL: [StatementField; 6] = [
        StatementField::Date,
        StatementField::Revenue,
        StatementField::NetIncome,
        StatementField::GrossProfit,
        StatementField::Eps,
        StatementField::OperatingIncome,
    ];

    /// Column header text
    pub fn title(&self) -> &'static str {
        match self {
            StatementField::Date => "Date",
            StatementField::Revenue => "Revenue",
            StatementField::NetIncome => "Net Income",
            StatementField::GrossProfit => "Gross Profit",
            StatementField::Eps => "EPS",
            StatementField::OperatingIncome => "Operating Income",
        }
    }

    /// Column for a 1-based position, as used by the number-key shortcuts
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Extracts the sortable value of this field
    ///
    /// Dates are exposed as ISO text so that lexical order is chronological.
    pub fn value(&self, statement: &FinancialStatement) -> FieldValue {
        match self {
            StatementField::Date => {
                FieldValue::Text(statement.date.format("%Y-%m-%d").to_string())
            }
            StatementField::Revenue => FieldValue::Number(statement.revenue),
            StatementField::NetIncome => FieldValue::Number(statement.net_income),
            StatementField::GrossProfit => FieldValue::Number(statement.gross_profit),
            StatementField::Eps => FieldValue::Number(statement.eps),
            StatementField::OperatingIncome => FieldValue::Number(statement.operating_income),
        }
    }
}

/// Parses a currency string, stripping one leading `$` if present
///
/// Returns `None` if the remainder is not a valid number.
pub fn parse_currency(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    digits.trim().parse::<f64>().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn missing_amount() -> f64 {
    f64::NAN
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(missing_amount()),
        Some(RawAmount::Number(n)) => Ok(n),
        Some(RawAmount::Text(text)) => parse_currency(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid currency amount: {:?}", text))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE_2023: &str = r#"{
        "date": "2023-09-30",
        "symbol": "AAPL",
        "reportedCurrency": "USD",
        "calendarYear": "2023",
        "period": "FY",
        "revenue": 383285000000,
        "grossProfit": 169148000000,
        "operatingIncome": 114301000000,
        "netIncome": 96995000000,
        "eps": 6.16
    }"#;

    #[test]
    fn test_statement_deserializes_api_record() {
        let statement: FinancialStatement =
            serde_json::from_str(APPLE_2023).expect("Failed to deserialize statement");

        assert_eq!(statement.date, NaiveDate::from_ymd_opt(2023, 9, 30).unwrap());
        assert_eq!(statement.revenue, 383_285_000_000.0);
        assert_eq!(statement.net_income, 96_995_000_000.0);
        assert_eq!(statement.gross_profit, 169_148_000_000.0);
        assert_eq!(statement.operating_income, 114_301_000_000.0);
        assert!((statement.eps - 6.16).abs() < 1e-9);
    }

    #[test]
    fn test_statement_accepts_currency_strings() {
        let json = r#"{
            "date": "2020-12-31",
            "revenue": "$1500.5",
            "netIncome": "-20",
            "grossProfit": 700,
            "operatingIncome": "$ 300",
            "eps": "$0.42"
        }"#;

        let statement: FinancialStatement = serde_json::from_str(json).unwrap();

        assert_eq!(statement.revenue, 1500.5);
        assert_eq!(statement.net_income, -20.0);
        assert_eq!(statement.operating_income, 300.0);
        assert!((statement.eps - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_statement_rejects_non_numeric_amount() {
        let json = r#"{
            "date": "2020-12-31",
            "revenue": "lots",
            "netIncome": 1,
            "grossProfit": 1,
            "operatingIncome": 1,
            "eps": 1
        }"#;

        let result: Result<FinancialStatement, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_statement_tolerates_null_and_missing_amounts() {
        let json = r#"{
            "date": "2020-12-31",
            "revenue": 1000,
            "netIncome": null,
            "grossProfit": 400,
            "eps": 0.5
        }"#;

        let statement: FinancialStatement = serde_json::from_str(json).unwrap();

        assert_eq!(statement.revenue, 1000.0);
        assert!(statement.net_income.is_nan());
        assert!(statement.operating_income.is_nan());
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$12.5"), Some(12.5));
        assert_eq!(parse_currency("12.5"), Some(12.5));
        assert_eq!(parse_currency(" $-3 "), Some(-3.0));
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("abc"), None);
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!(Period::from_str("annual"), Some(Period::Annual));
        assert_eq!(Period::from_str("Quarter"), Some(Period::Quarter));
        assert_eq!(Period::from_str("q"), Some(Period::Quarter));
        assert_eq!(Period::from_str("monthly"), None);
        assert_eq!(Period::default(), Period::Annual);
    }

    #[test]
    fn test_field_from_position() {
        assert_eq!(StatementField::from_position(1), Some(StatementField::Date));
        assert_eq!(
            StatementField::from_position(6),
            Some(StatementField::OperatingIncome)
        );
        assert_eq!(StatementField::from_position(0), None);
        assert_eq!(StatementField::from_position(7), None);
    }

    #[test]
    fn test_field_titles() {
        let titles: Vec<&str> = StatementField::ALL.iter().map(|f| f.title()).collect();
        assert_eq!(
            titles,
            vec!["Date", "Revenue", "Net Income", "Gross Profit", "EPS", "Operating Income"]
        );
    }

    #[test]
    fn test_date_value_is_iso_text() {
        let statement: FinancialStatement = serde_json::from_str(APPLE_2023).unwrap();
        assert_eq!(
            StatementField::Date.value(&statement),
            FieldValue::Text("2023-09-30".to_string())
        );
        assert_eq!(
            StatementField::Revenue.value(&statement),
            FieldValue::Number(383_285_000_000.0)
        );
    }
}
