//! incomeview library
//!
//! Exposes the fetch-and-cache layer, the filter/sort pipeline and the
//! terminal UI so the binary and integration tests can share them.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod format;
pub mod logging;
pub mod pipeline;
pub mod ui;
