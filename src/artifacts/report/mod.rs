//! Report rendering
//!
//! - `csv_report`: The two-header-row CSV comparison report

pub mod csv_report;
