//! Dashboard module
//!
//! Provides the home page and the reports page, both built from the pure
//! summaries in [aggregation](self::aggregation).

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod reports;

pub use handlers::get_dashboard_page;
pub use reports::get_reports_page;

#[cfg(test)]
pub(crate) use aggregation::totals;
