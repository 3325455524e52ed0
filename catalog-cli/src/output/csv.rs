//! CSV output formatting for data export.
//!
//! Cells containing commas, quotes or newlines are quoted. Array fields are
//! joined with `;` so a course's prerequisites stay in one cell.

use super::Column;
use serde::Serialize;

/// CSV output formatter
pub struct CsvOutput;

impl CsvOutput {
    /// Format an array of items as CSV with specified columns
    ///
    /// An empty slice yields just the header row.
    pub fn format_with_columns<T: Serialize>(data: &[T], columns: &[Column]) -> String {
        let mut output = columns
            .iter()
            .map(|c| Self::escape_value(&c.name))
            .collect::<Vec<_>>()
            .join(",");

        for item in data {
            if let Ok(json) = serde_json::to_value(item) {
                let row: Vec<String> = columns
                    .iter()
                    .map(|col| {
                        json.get(&col.key)
                            .map(Self::value_to_csv)
                            .unwrap_or_default()
                    })
                    .collect();
                output.push('\n');
                output.push_str(&row.join(","));
            }
        }

        output
    }

    /// Convert a JSON value to a CSV cell
    fn value_to_csv(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => Self::escape_value(s),
            serde_json::Value::Array(arr) => {
                let joined = arr
                    .iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(";");
                Self::escape_value(&joined)
            }
            serde_json::Value::Object(obj) => {
                Self::escape_value(&format!("{{{} fields}}", obj.len()))
            }
        }
    }

    /// Escape a string value for CSV
    ///
    /// Wraps in quotes if the value contains comma, newline, or quote.
    /// Doubles any existing quotes.
    fn escape_value(s: &str) -> String {
        if s.contains(',') || s.contains('\n') || s.contains('\r') || s.contains('"') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
