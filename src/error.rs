use std::fmt;
use std::path::PathBuf;

/// Failures the pipeline reports by kind. Everything else travels as a plain boxed error.
#[derive(Debug)]
pub enum MetricsError {
    FileNotFound(PathBuf),
    MissingColumns(Vec<String>),
    BadNumber { row: usize, column: String, value: String },
    NoData,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::FileNotFound(p) => write!(f, "File not found at {}", p.display()),
            MetricsError::MissingColumns(cols) => write!(f, "Missing column(s) in header: {}", cols.join(", ")),
            MetricsError::BadNumber { row, column, value } =>
                write!(f, "Row {} column {}: \"{}\" is not a number", row, column, value),
            MetricsError::NoData => write!(f, "No rows with a Mode value to plot"),
        }
    }
}

impl std::error::Error for MetricsError {}
