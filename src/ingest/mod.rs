//! Payroll export ingest for the payroll summary engine.
//!
//! This module parses `.xlsx` and CSV payroll exports into
//! [`PayRecord`](crate::models::PayRecord)s and keeps uploaded tables in an
//! in-memory [`RecordStore`].

mod columns;
mod csv_loader;
mod format;
mod store;
mod xlsx_loader;

pub use columns::{
    EMPLOYEE_NAME_COLUMN, PAY_DATE_COLUMN, STORE_NAME_COLUMN, WEEK_1_COLUMN, WEEK_2_COLUMN,
    parse_pay_date,
};
pub use csv_loader::{load_csv_file, read_csv};
pub use format::{ALLOWED_EXTENSIONS, ExportFormat, is_allowed_file, load_export, read_export};
pub use store::{DEFAULT_TABLE, RecordStore, TableInfo};
pub use xlsx_loader::{load_xlsx_file, read_xlsx};
