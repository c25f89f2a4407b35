// 📐 Schema layer - CSV header validation
// Absent columns are tolerated (blank-filled or derived); a file with
// neither `date` nor `year` cannot produce a timeline and is rejected.

use std::fmt;

/// Columns the loader understands, in input order
pub const EXPECTED_COLUMNS: [&str; 12] = [
    "id",
    "congress",
    "volume",
    "chapter",
    "title",
    "date",
    "year",
    "subject_category",
    "relief_category",
    "summary",
    "pdf_link",
    "details_link",
];

#[derive(Debug, Clone)]
pub struct ColumnIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ColumnIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of checking a CSV header row against the expected column set
#[derive(Debug, Clone, Default)]
pub struct SchemaReport {
    /// Expected columns not present in the file
    pub missing: Vec<String>,
    /// Columns in the file the dashboard ignores
    pub unrecognized: Vec<String>,
    /// Human-readable diagnostics for degraded-but-loadable files
    pub warnings: Vec<ColumnIssue>,
}

impl SchemaReport {
    /// A file is loadable as long as the year axis can be established,
    /// either directly or derived from the enactment date.
    pub fn is_loadable(&self) -> bool {
        !(self.missing.iter().any(|c| c == "date") && self.missing.iter().any(|c| c == "year"))
    }

    pub fn has_column(&self, name: &str) -> bool {
        !self.missing.iter().any(|c| c == name)
    }
}

/// Check a CSV header row against the expected column set.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> SchemaReport {
    let mut report = SchemaReport::default();

    for expected in EXPECTED_COLUMNS {
        if !headers.iter().any(|h| h.as_ref() == expected) {
            report.missing.push(expected.to_string());
        }
    }

    for header in headers {
        let name = header.as_ref();
        if !EXPECTED_COLUMNS.contains(&name) {
            report.unrecognized.push(name.to_string());
        }
    }

    for missing in &report.missing {
        let message = match missing.as_str() {
            "id" => "absent - sequential ids will be assigned",
            "year" => "absent - derived from enactment date",
            "date" => "absent - timeline falls back to the year column",
            "subject_category" | "relief_category" => {
                "absent - category filters will show no options"
            }
            _ => "absent - left blank",
        };
        report.warnings.push(ColumnIssue {
            field: missing.clone(),
            message: message.to_string(),
        });
    }

    report
}
