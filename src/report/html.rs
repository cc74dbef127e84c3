//! HTML rendering of the employee summary table.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::ReportSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::ReportRow;

/// Column headings, in display order.
pub const COLUMNS: [&str; 7] = [
    "Index",
    "Employee Name",
    "Store Name",
    "YTD Hours",
    "Last Pay Date",
    "Pay Date Count",
    "Start Date",
];

const STYLE: &str = r#"        table, th, td {
            border: 1px solid black;
            border-collapse: collapse;
        }
        th, td {
            padding: 8px;
            text-align: left;
        }"#;

// Cell 1 is the employee name, cell 2 the store name.
const FILTER_SCRIPT: &str = r#"        function filterTable() {
            var inputStore = document.getElementById("storeFilter").value.toLowerCase();
            var inputEmployee = document.getElementById("employeeFilter").value.toLowerCase();
            var rows = document.getElementById("dataTable").getElementsByTagName("tr");

            for (var i = 1; i < rows.length; i++) {
                var cells = rows[i].getElementsByTagName("td");
                if (cells.length < 3) {
                    continue;
                }
                var employee = (cells[1].textContent || cells[1].innerText).toLowerCase();
                var store = (cells[2].textContent || cells[2].innerText).toLowerCase();
                var visible = store.indexOf(inputStore) > -1 && employee.indexOf(inputEmployee) > -1;
                rows[i].style.display = visible ? "" : "none";
            }
        }"#;

/// Escapes text for use in HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use payroll_summary::report::escape_html;
///
/// assert_eq!(escape_html("Tom & Jerry's <Deli>"), "Tom &amp; Jerry&#39;s &lt;Deli&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders the report rows as a standalone HTML document.
///
/// The page holds a bordered table with one row per employee and two text
/// inputs that hide rows whose store or employee cell does not contain the
/// typed text (case-insensitive).
///
/// # Examples
///
/// ```
/// use payroll_summary::config::ReportSettings;
/// use payroll_summary::report::render_html;
///
/// let html = render_html(&[], &ReportSettings::default());
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains("<title>Employee Data</title>"));
/// ```
pub fn render_html(rows: &[ReportRow], settings: &ReportSettings) -> String {
    let title = escape_html(&settings.title);
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
{STYLE}
    </style>
    <script>
{FILTER_SCRIPT}
    </script>
</head>
<body>

<h2>{title}</h2>

<label for="storeFilter">Filter by Store Name:</label>
<input type="text" id="storeFilter" onkeyup="filterTable()" placeholder="Search for store names..">

<label for="employeeFilter">Filter by Employee Name:</label>
<input type="text" id="employeeFilter" onkeyup="filterTable()" placeholder="Search for employee names..">

<br><br>

<table id="dataTable">
    <thead>
        <tr>
"#
    );

    for column in COLUMNS {
        let _ = writeln!(html, "            <th>{}</th>", column);
    }
    html.push_str("        </tr>\n    </thead>\n    <tbody>\n");

    for row in rows {
        let summary = &row.summary;
        let _ = write!(
            html,
            "        <tr>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n        </tr>\n",
            row.index,
            escape_html(&summary.employee_name),
            escape_html(&summary.store_name),
            summary.ytd_hours,
            summary.last_pay_date.format("%Y-%m-%d"),
            summary.pay_date_count,
            summary.start_date.format("%Y-%m-%d"),
        );
    }

    html.push_str("    </tbody>\n</table>\n\n</body>\n</html>\n");
    html
}

/// Renders the report and writes it to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `ReportWriteError` if the directory or file cannot be written.
pub fn write_html<P: AsRef<Path>>(
    path: P,
    rows: &[ReportRow],
    settings: &ReportSettings,
) -> EngineResult<()> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let to_error = |e: std::io::Error| EngineError::ReportWriteError {
        path: path_str.clone(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, render_html(rows, settings)).map_err(to_error)?;

    info!(path = %path_str, rows = rows.len(), "Report written");
    Ok(())
}
