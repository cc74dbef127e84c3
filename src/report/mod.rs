//! Report rendering for the payroll summary engine.
//!
//! This module turns indexed [`ReportRow`](crate::models::ReportRow)s into a
//! standalone, filterable HTML page.

mod html;

pub use html::{COLUMNS, escape_html, render_html, write_html};
