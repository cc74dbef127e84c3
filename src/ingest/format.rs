//! Export format detection and dispatch.

use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayRecord;

use super::csv_loader::{load_csv_file, read_csv};
use super::xlsx_loader::{load_xlsx_file, read_xlsx};

/// File extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "csv"];

/// The payroll export formats the engine can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Excel workbook; the first worksheet is read.
    Xlsx,
    /// Comma-separated text with a header row.
    Csv,
}

impl ExportFormat {
    /// Detects the format from a file name's extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_summary::ingest::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::from_filename("october.XLSX"), Some(ExportFormat::Xlsx));
    /// assert_eq!(ExportFormat::from_filename("october.csv"), Some(ExportFormat::Csv));
    /// assert_eq!(ExportFormat::from_filename("october.xls"), None);
    /// assert_eq!(ExportFormat::from_filename(".csv"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (stem, ext) = filename.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        if ext.eq_ignore_ascii_case("xlsx") {
            Some(Self::Xlsx)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Returns true if `filename` has an accepted payroll export extension.
///
/// # Examples
///
/// ```
/// use payroll_summary::ingest::is_allowed_file;
///
/// assert!(is_allowed_file("october.xlsx"));
/// assert!(is_allowed_file("october.CSV"));
/// assert!(!is_allowed_file("october.txt"));
/// assert!(!is_allowed_file("csv"));
/// ```
pub fn is_allowed_file(filename: &str) -> bool {
    ExportFormat::from_filename(filename).is_some()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn unsupported(path: &Path) -> EngineError {
    EngineError::InvalidRecord {
        row: 0,
        field: "file".to_string(),
        message: format!(
            "'{}' is not a payroll export (expected .{})",
            path.display(),
            ALLOWED_EXTENSIONS.join(" or .")
        ),
    }
}

/// Fails unless `path` carries the extension of `expected`.
pub(super) fn check_extension(path: &Path, expected: ExportFormat) -> EngineResult<()> {
    match ExportFormat::from_filename(&file_name(path)) {
        Some(format) if format == expected => Ok(()),
        _ => Err(EngineError::InvalidRecord {
            row: 0,
            field: "file".to_string(),
            message: format!(
                "'{}' is not a .{} payroll export",
                path.display(),
                expected.extension()
            ),
        }),
    }
}

/// Reads pay records from an uploaded export body in the given format.
pub fn read_export(bytes: &[u8], format: ExportFormat) -> EngineResult<Vec<PayRecord>> {
    match format {
        ExportFormat::Xlsx => read_xlsx(Cursor::new(bytes)),
        ExportFormat::Csv => read_csv(bytes),
    }
}

/// Reads pay records from an export file, choosing the reader by extension.
///
/// # Returns
///
/// Returns an error if the extension is neither `.xlsx` nor `.csv`, or for
/// any of the reasons the format's reader fails.
pub fn load_export<P: AsRef<Path>>(path: P) -> EngineResult<Vec<PayRecord>> {
    let path = path.as_ref();
    match ExportFormat::from_filename(&file_name(path)) {
        Some(ExportFormat::Xlsx) => load_xlsx_file(path),
        Some(ExportFormat::Csv) => load_csv_file(path),
        None => Err(unsupported(path)),
    }
}
