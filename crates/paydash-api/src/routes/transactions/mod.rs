//! Transaction routes - Query endpoint, summary, dashboard page
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_summary, api_transactions, run_query};
pub use page::page_dashboard;
