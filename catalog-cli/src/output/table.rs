//! Table output formatting using the `tabled` crate
//!
//! Rounded tables by default, blank style in compact mode. Column widths are
//! capped to the terminal when truncation is enabled.

use super::{truncate, Column, OutputConfig};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
    Table,
};

/// Placeholder printed instead of an empty table
pub const NO_RESULTS: &str = "(no results)";

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows as a table with the given columns
    ///
    /// Each row is serialized and its fields are picked out by `Column::key`.
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        config: &OutputConfig,
    ) -> String {
        if data.is_empty() {
            return NO_RESULTS.to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.name.as_str()));

        for item in data {
            let json = serde_json::to_value(item).unwrap_or_default();
            let row: Vec<String> = columns
                .iter()
                .map(|col| {
                    let value = json.get(&col.key).cloned().unwrap_or_default();
                    Self::format_value(&value, col, config)
                })
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        Self::apply_style(&mut table, config);

        let term_width = config.effective_width();
        let available_width = (term_width.saturating_sub(columns.len() * 3)) / columns.len().max(1);

        for (i, col) in columns.iter().enumerate() {
            let max_width = col.max_width.unwrap_or(available_width);

            if config.should_truncate() && max_width > 0 {
                table.with(Modify::new(Columns::single(i)).with(Width::truncate(max_width)));
            }
        }

        if config.should_truncate() {
            table.with(Width::wrap(term_width));
        }

        table.to_string()
    }

    /// Format a two-column label/value table
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();
        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        Self::apply_style(&mut table, config);
        table.with(Modify::new(Columns::first()).with(Alignment::right()));

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }

    /// Create a simple table from rows of strings
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return NO_RESULTS.to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());
        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();
        Self::apply_style(&mut table, config);

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }

    fn apply_style(table: &mut Table, config: &OutputConfig) {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
    }

    fn format_value(value: &serde_json::Value, col: &Column, config: &OutputConfig) -> String {
        let s = Self::value_to_string(value);

        if config.should_truncate() {
            if let Some(max_width) = col.max_width {
                return truncate(&s, max_width);
            }
        }
        s
    }

    /// Convert a JSON value to a display string
    fn value_to_string(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => arr
                .iter()
                .map(Self::value_to_string)
                .collect::<Vec<_>>()
                .join(", "),
            serde_json::Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Course;

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            Course::new("CS100", "Intro", Vec::new()),
            Course::new(
                "CS200",
                "Data Structures",
                vec!["CS100".to_string(), "MATH201".to_string()],
            ),
        ];

        let columns = vec![
            Column::new("Course Number", "course_number"),
            Column::new("Course Name", "course_name"),
            Column::new("Prerequisites", "prerequisites"),
        ];

        let config = OutputConfig::new(super::super::OutputFormat::Table).without_truncation();
        let output = TableOutput::format_with_columns(&data, &columns, &config);

        assert!(output.contains("Course Number"));
        assert!(output.contains("Data Structures"));
        assert!(output.contains("CS100, MATH201"));
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<Course> = vec![];
        let columns = vec![Column::new("Course Number", "course_number")];
        let config = OutputConfig::new(super::super::OutputFormat::Table);

        let output = TableOutput::format_with_columns(&data, &columns, &config);
        assert_eq!(output, NO_RESULTS);
    }

    #[test]
    fn test_key_value_table() {
        let pairs = vec![
            ("Course Number", "CS101".to_string()),
            ("Prerequisites", "None".to_string()),
        ];

        let config = OutputConfig::new(super::super::OutputFormat::Table).without_truncation();
        let output = TableOutput::format_key_value(&pairs, &config);

        assert!(output.contains("Course Number"));
        assert!(output.contains("None"));
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec!["3".to_string(), "Invalid prerequisite".to_string()],
            vec!["7".to_string(), "Incorrect formatting".to_string()],
        ];

        let config = OutputConfig::new(super::super::OutputFormat::Table).without_truncation();
        let output = TableOutput::from_rows(&["Line", "Problem"], &rows, &config);

        assert!(output.contains("Line"));
        assert!(output.contains("Incorrect formatting"));
        assert_eq!(TableOutput::from_rows(&["Line"], &[], &config), NO_RESULTS);
    }
}
