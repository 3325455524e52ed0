//! List command - every course in the file, in ascending course-number order

use std::path::Path;

use catalog_core::{Course, IngestOptions};
use serde::Serialize;

use super::{load_catalog, warn_diagnostics};
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter, TableOutput};

/// Printed instead of a table when the catalog holds no courses.
pub const EMPTY_CATALOG: &str = "No courses available to print.";

/// Courses in ascending order, as printed by `list` and menu option 2.
#[derive(Debug, Serialize)]
pub struct CourseList {
    pub count: usize,
    pub courses: Vec<Course>,
}

impl<'a> FromIterator<&'a Course> for CourseList {
    fn from_iter<I: IntoIterator<Item = &'a Course>>(iter: I) -> Self {
        let courses: Vec<Course> = iter.into_iter().cloned().collect();
        Self {
            count: courses.len(),
            courses,
        }
    }
}

impl Outputter for CourseList {
    fn to_table(&self, config: &OutputConfig) -> String {
        if self.courses.is_empty() {
            return EMPTY_CATALOG.to_string();
        }
        let columns = [
            Column::new("Course Number", "course_number").with_max_width(16),
            Column::new("Course Name", "course_name"),
        ];
        TableOutput::format_with_columns(&self.courses, &columns, config)
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let columns = [
            Column::new("course_number", "course_number"),
            Column::new("course_name", "course_name"),
            Column::new("prerequisites", "prerequisites"),
        ];
        CsvOutput::format_with_columns(&self.courses, &columns)
    }
}

/// Run the list command
pub fn run(path: &Path, options: &IngestOptions, config: OutputConfig) -> anyhow::Result<()> {
    let (index, report) = load_catalog(path, options)?;
    warn_diagnostics(&report, &config);

    let list: CourseList = index.iter().collect();
    tracing::debug!("Listing {} courses from {}", list.count, report.source);
    Output::with_config(list, config).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use catalog_core::CourseIndex;

    fn sample_list() -> CourseList {
        let index: CourseIndex = [
            Course::new("CS300", "Algorithms", vec!["CS200".to_string()]),
            Course::new("CS100", "Intro", Vec::new()),
            Course::new("CS200", "Data Structures", vec!["CS100".to_string()]),
        ]
        .into_iter()
        .collect();
        index.iter().collect()
    }

    fn plain(format: OutputFormat) -> OutputConfig {
        OutputConfig::new(format).without_colors().without_truncation()
    }

    #[test]
    fn test_list_is_ascending() {
        let list = sample_list();
        assert_eq!(list.count, 3);
        let numbers: Vec<_> = list.courses.iter().map(|c| c.course_number.as_str()).collect();
        assert_eq!(numbers, vec!["CS100", "CS200", "CS300"]);
    }

    #[test]
    fn test_table_shows_number_and_name() {
        let output = sample_list().render(&plain(OutputFormat::Table));
        assert!(output.contains("Course Number"));
        assert!(output.contains("Data Structures"));
        assert!(output.find("CS100").unwrap() < output.find("CS300").unwrap());
    }

    #[test]
    fn test_empty_list_message() {
        let list: CourseList = CourseIndex::new().iter().collect();
        assert_eq!(list.render(&plain(OutputFormat::Table)), EMPTY_CATALOG);
        assert_eq!(
            list.render(&plain(OutputFormat::Csv)),
            "course_number,course_name,prerequisites"
        );
    }

    #[test]
    fn test_csv_includes_prerequisites() {
        let output = sample_list().render(&plain(OutputFormat::Csv));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], "CS100,Intro,");
        assert_eq!(lines[3], "CS300,Algorithms,CS200");
    }

    #[test]
    fn test_json_has_count() {
        let output = sample_list().render(&plain(OutputFormat::Json).compact());
        assert!(output.starts_with(r#"{"count":3,"courses":[{"course_number":"CS100""#));
    }
}
