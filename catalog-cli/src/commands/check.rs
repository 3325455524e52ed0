//! Check command - validate a course file and report every problem
//!
//! Prints the ingestion counters, the resulting tree height and one row per
//! rejected line. With `--strict`, any rejected line fails the command.

use std::path::Path;

use catalog_core::{DiagnosticKind, IngestOptions, IngestReport};
use serde::Serialize;

use super::load_catalog;
use crate::output::{paint, Column, CsvOutput, Output, OutputConfig, Outputter, Paint, TableOutput};

#[derive(Debug, Serialize)]
pub struct CheckResult {
    #[serde(flatten)]
    pub report: IngestReport,
    pub tree_height: usize,
}

impl Outputter for CheckResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let report = &self.report;
        let pairs = [
            ("Source", report.source.clone()),
            ("Lines processed", report.lines_processed.to_string()),
            ("Known course numbers", report.known_keys.to_string()),
            ("Inserted", report.inserted.to_string()),
            ("Duplicates skipped", report.duplicates_skipped.to_string()),
            ("Rejected", report.rejected().to_string()),
            ("Tree height", self.tree_height.to_string()),
        ];
        let mut output = TableOutput::format_key_value(&pairs, config);
        output.push('\n');

        if report.is_clean() {
            output.push_str(&paint("No problems found.", config, Paint::Success));
            return output;
        }

        let rows: Vec<Vec<String>> = report
            .diagnostics
            .iter()
            .map(|d| {
                let problem = match &d.kind {
                    DiagnosticKind::MalformedLine { fields } => {
                        format!("Incorrect formatting ({} fields)", fields)
                    }
                    DiagnosticKind::UnknownPrerequisite { prerequisite } => {
                        format!("Invalid prerequisite '{}'", prerequisite)
                    }
                };
                vec![d.line.to_string(), problem]
            })
            .collect();
        output.push_str(&TableOutput::from_rows(&["Line", "Problem"], &rows, config));
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let columns = [
            Column::new("line", "line"),
            Column::new("kind", "kind"),
            Column::new("fields", "fields"),
            Column::new("prerequisite", "prerequisite"),
        ];
        CsvOutput::format_with_columns(&self.report.diagnostics, &columns)
    }
}

/// Run the check command
pub fn run(
    path: &Path,
    strict: bool,
    options: &IngestOptions,
    config: OutputConfig,
) -> anyhow::Result<()> {
    let (index, report) = load_catalog(path, options)?;
    let rejected = report.rejected();

    let result = CheckResult {
        report,
        tree_height: index.height(),
    };
    Output::with_config(result, config).render()?;

    if strict && rejected > 0 {
        anyhow::bail!("{} rejected line(s) in {}", rejected, path.display());
    }
    Ok(())
}
