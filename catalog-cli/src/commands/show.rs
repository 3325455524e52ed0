//! Show command - details for a single course
//!
//! Lookup is exact and case-sensitive. A missing course is a normal result,
//! not an error.

use std::path::Path;

use catalog_core::{Course, IngestOptions};
use serde::Serialize;

use super::{load_catalog, warn_diagnostics};
use crate::output::{paint, Column, CsvOutput, Output, OutputConfig, Outputter, Paint, TableOutput};

/// Result of looking up one course number.
#[derive(Debug, Serialize)]
pub struct CourseLookup {
    pub query: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
}

impl CourseLookup {
    pub fn new(query: impl Into<String>, course: Option<&Course>) -> Self {
        Self {
            query: query.into(),
            found: course.is_some(),
            course: course.cloned(),
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("Course {} not found.", self.query)
    }
}

impl Outputter for CourseLookup {
    fn to_table(&self, config: &OutputConfig) -> String {
        let Some(course) = &self.course else {
            return paint(&self.not_found_message(), config, Paint::Warning);
        };

        let prerequisites = course
            .prerequisite_list()
            .unwrap_or_else(|| "None".to_string());
        let pairs = [
            ("Course Number", course.course_number.clone()),
            ("Course Name", course.course_name.clone()),
            ("Prerequisites", prerequisites),
        ];
        TableOutput::format_key_value(&pairs, config)
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let columns = [
            Column::new("course_number", "course_number"),
            Column::new("course_name", "course_name"),
            Column::new("prerequisites", "prerequisites"),
        ];
        CsvOutput::format_with_columns(self.course.as_slice(), &columns)
    }
}

/// Run the show command
pub fn run(
    path: &Path,
    course_number: &str,
    options: &IngestOptions,
    config: OutputConfig,
) -> anyhow::Result<()> {
    let (index, report) = load_catalog(path, options)?;
    warn_diagnostics(&report, &config);

    let lookup = CourseLookup::new(course_number, index.lookup(course_number));
    if !lookup.found {
        tracing::debug!("{} has no course {}", report.source, course_number);
    }
    Output::with_config(lookup, config).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn plain(format: OutputFormat) -> OutputConfig {
        OutputConfig::new(format).without_colors().without_truncation()
    }

    #[test]
    fn test_found_course_table() {
        let course = Course::new(
            "CS300",
            "Algorithms",
            vec!["CS200".to_string(), "MATH201".to_string()],
        );
        let output = CourseLookup::new("CS300", Some(&course)).render(&plain(OutputFormat::Table));

        assert!(output.contains("Course Number"));
        assert!(output.contains("Algorithms"));
        assert!(output.contains("CS200, MATH201"));
    }

    #[test]
    fn test_no_prerequisites_prints_none() {
        let course = Course::new("CS100", "Intro", Vec::new());
        let output = CourseLookup::new("CS100", Some(&course)).render(&plain(OutputFormat::Table));
        assert!(output.contains("None"));
    }

    #[test]
    fn test_not_found() {
        let lookup = CourseLookup::new("cs100", None);
        assert!(!lookup.found);
        assert_eq!(
            lookup.render(&plain(OutputFormat::Table)),
            "Course cs100 not found."
        );
        assert_eq!(
            lookup.render(&plain(OutputFormat::Json).compact()),
            r#"{"query":"cs100","found":false}"#
        );
        assert_eq!(
            lookup.render(&plain(OutputFormat::Csv)),
            "course_number,course_name,prerequisites"
        );
    }
}
