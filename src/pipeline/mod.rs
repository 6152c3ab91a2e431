//! Filter and sort pipeline for fetched income statements
//!
//! Everything here is a pure function of the fetched list, the active filter
//! criteria and the sort key. The view is recomputed whenever any of them
//! changes.

pub mod filter;
pub mod sort;
pub mod view;

pub use filter::{
    apply_filters, parse_amount_bound, parse_date_bound, Bounds, FilterCriteria, FilterInputError,
    RangeEnd,
};
pub use sort::{compare_values, sort_statements, SortDirection, SortKey};
pub use view::{derive_view, revenue_series, StatementView, TableOutcome};
