//! Two-pass course file ingestion.
//!
//! A course file is plain text with one record per line:
//!
//! ```text
//! CSCI100, Introduction to Computer Science
//! CSCI200, Data Structures, CSCI101
//! MATH201, Discrete Mathematics
//! ```
//!
//! Field 0 is the course number, field 1 the course name, and any further
//! fields are prerequisite course numbers. Whitespace around fields is
//! trimmed, empty prerequisite fields are ignored and blank lines are skipped.
//!
//! # Passes
//!
//! 1. **Key collection**: the first field of every non-blank line is
//!    lowercased into a known-keys set. Nothing else is checked.
//! 2. **Validation**: the source is reopened and each line is checked. Lines
//!    with fewer than two fields, or a prerequisite whose lowercase form is
//!    not a known key, become [`Diagnostic`]s and are skipped whole. Valid
//!    lines are staged as [`Course`]s.
//!
//! Staged courses are inserted into the [`CourseIndex`] only after the
//! second pass has read the entire source, so an I/O failure at any point
//! leaves the index untouched.
//!
//! Known keys come from every line, including lines the second pass later
//! rejects, so a prerequisite may name a course that never reaches the index.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::index::CourseIndex;
use crate::types::Course;

// ============================================================================
// Line sources
// ============================================================================

/// Something that can be read as course-file lines, more than once.
///
/// Each call to [`open`](LineSource::open) must return a reader positioned at
/// the first line; ingestion opens the source once per pass.
pub trait LineSource {
    /// Name used in errors and reports (usually a path).
    fn name(&self) -> String;

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

/// Course file on disk. Reopened for every pass.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Course records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    text: String,
}

impl MemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self { text }
    }
}

impl LineSource for MemorySource {
    fn name(&self) -> String {
        "<memory>".to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }
}

// ============================================================================
// Options and results
// ============================================================================

/// How diagnostic line numbers are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineNumbering {
    /// Every line in the source counts, blank or not.
    #[default]
    Physical,
    /// Only non-blank lines count.
    NonBlank,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub line_numbering: LineNumbering,
}

impl IngestOptions {
    pub fn with_line_numbering(mut self, line_numbering: LineNumbering) -> Self {
        self.line_numbering = line_numbering;
        self
    }
}

/// A problem with one line of a course file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based, counted per [`LineNumbering`].
    pub line: usize,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Missing course number or course name.
    MalformedLine { fields: usize },
    /// A prerequisite that matches no course number in the file.
    UnknownPrerequisite { prerequisite: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MalformedLine { .. } => {
                write!(f, "Incorrect formatting at line {}", self.line)
            }
            DiagnosticKind::UnknownPrerequisite { prerequisite } => {
                write!(
                    f,
                    "Invalid prerequisite '{}' at line {}",
                    prerequisite, self.line
                )
            }
        }
    }
}

/// Outcome of a completed ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub source: String,
    /// Every rejected line, in file order.
    pub diagnostics: Vec<Diagnostic>,
    /// Non-blank lines examined by the validation pass.
    pub lines_processed: usize,
    pub inserted: usize,
    /// Valid lines whose course number was already in the index.
    pub duplicates_skipped: usize,
    /// Distinct lowercase course numbers seen by the key-collection pass.
    pub known_keys: usize,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.diagnostics.len()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Load every valid record from `source` into `index`.
///
/// Fails only if the source cannot be opened or read, in which case `index`
/// is not modified. Per-line problems are returned in the report.
pub fn ingest<S>(
    source: &S,
    index: &mut CourseIndex,
    options: &IngestOptions,
) -> Result<IngestReport>
where
    S: LineSource + ?Sized,
{
    let source_name = source.name();

    let known_keys = collect_known_keys(source)?;
    tracing::debug!(
        "Collected {} known course numbers from {}",
        known_keys.len(),
        source_name
    );

    let mut staged = Vec::new();
    let mut diagnostics = Vec::new();
    let mut lines_processed = 0;

    for_each_record(source, |position, line| {
        lines_processed += 1;
        let line_number = match options.line_numbering {
            LineNumbering::Physical => position.physical,
            LineNumbering::NonBlank => position.non_blank,
        };
        match parse_record(line, &known_keys) {
            Ok(course) => staged.push(course),
            Err(kind) => {
                let diagnostic = Diagnostic {
                    line: line_number,
                    kind,
                };
                tracing::debug!("{}: {}", source_name, diagnostic);
                diagnostics.push(diagnostic);
            }
        }
    })?;

    let mut inserted = 0;
    let mut duplicates_skipped = 0;
    for course in staged {
        let number = course.course_number.clone();
        if index.insert(course) {
            inserted += 1;
        } else {
            tracing::debug!("Skipping duplicate course {}", number);
            duplicates_skipped += 1;
        }
    }

    tracing::info!(
        "Ingested {}: {} inserted, {} rejected, {} duplicates",
        source_name,
        inserted,
        diagnostics.len(),
        duplicates_skipped
    );

    Ok(IngestReport {
        source: source_name,
        diagnostics,
        lines_processed,
        inserted,
        duplicates_skipped,
        known_keys: known_keys.len(),
    })
}

/// Position of a non-blank line within its source.
#[derive(Debug, Clone, Copy)]
struct LinePosition {
    physical: usize,
    non_blank: usize,
}

/// Call `f` with every non-blank, trimmed line of a freshly opened source.
fn for_each_record<S, F>(source: &S, mut f: F) -> Result<()>
where
    S: LineSource + ?Sized,
    F: FnMut(LinePosition, &str),
{
    let reader = source
        .open()
        .map_err(|e| CatalogError::unavailable(source.name(), e))?;

    let mut non_blank = 0;
    for (offset, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CatalogError::unavailable(source.name(), e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        non_blank += 1;
        f(
            LinePosition {
                physical: offset + 1,
                non_blank,
            },
            line,
        );
    }
    Ok(())
}

fn collect_known_keys<S>(source: &S) -> Result<HashSet<String>>
where
    S: LineSource + ?Sized,
{
    let mut keys = HashSet::new();
    for_each_record(source, |_, line| {
        if let Some(first) = line.split(',').next() {
            keys.insert(first.trim().to_lowercase());
        }
    })?;
    Ok(keys)
}

/// Validate one non-blank line against the known keys.
///
/// Stops at the first unknown prerequisite.
fn parse_record(
    line: &str,
    known_keys: &HashSet<String>,
) -> std::result::Result<Course, DiagnosticKind> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    if fields.len() < 2 || fields[0].is_empty() || fields[1].is_empty() {
        return Err(DiagnosticKind::MalformedLine {
            fields: fields.len(),
        });
    }

    let prerequisites: Vec<&str> = fields[2..]
        .iter()
        .copied()
        .filter(|field| !field.is_empty())
        .collect();

    if let Some(unknown) = prerequisites
        .iter()
        .find(|prereq| !known_keys.contains(&prereq.to_lowercase()))
    {
        return Err(DiagnosticKind::UnknownPrerequisite {
            prerequisite: unknown.to_string(),
        });
    }

    Ok(Course::new(
        fields[0],
        fields[1],
        prerequisites.into_iter().map(String::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_lowercase()).collect()
    }

    fn load(lines: &[&str]) -> (CourseIndex, IngestReport) {
        let mut index = CourseIndex::new();
        let report = ingest(
            &MemorySource::from_lines(lines),
            &mut index,
            &IngestOptions::default(),
        )
        .unwrap();
        (index, report)
    }

    #[test]
    fn test_parse_record_trims_fields() {
        let course = parse_record(
            "  CS200 ,  Data Structures ,CS100 ,  ",
            &keys(&["CS100", "CS200"]),
        )
        .unwrap();

        assert_eq!(course.course_number, "CS200");
        assert_eq!(course.course_name, "Data Structures");
        assert_eq!(course.prerequisites, vec!["CS100"]);
    }

    #[test]
    fn test_parse_record_skips_empty_prerequisite_slots() {
        let course =
            parse_record("CS300,Algorithms,,CS100,,CS200", &keys(&["cs100", "cs200"])).unwrap();
        assert_eq!(course.prerequisites, vec!["CS100", "CS200"]);
    }

    #[test]
    fn test_parse_record_malformed() {
        let known = keys(&[]);
        assert_eq!(
            parse_record("CS101", &known),
            Err(DiagnosticKind::MalformedLine { fields: 1 })
        );
        assert_eq!(
            parse_record("CS101,", &known),
            Err(DiagnosticKind::MalformedLine { fields: 2 })
        );
        assert_eq!(
            parse_record(",Intro", &known),
            Err(DiagnosticKind::MalformedLine { fields: 2 })
        );
    }

    #[test]
    fn test_parse_record_reports_first_unknown_prerequisite() {
        let result = parse_record("CS400,Capstone,CS100,CS998,CS999", &keys(&["CS100"]));
        assert_eq!(
            result,
            Err(DiagnosticKind::UnknownPrerequisite {
                prerequisite: "CS998".to_string()
            })
        );
    }

    #[test]
    fn test_parse_record_keeps_original_case() {
        let course = parse_record("CS201,Data,Cs101", &keys(&["cs101"])).unwrap();
        assert_eq!(course.prerequisites, vec!["Cs101"]);
    }

    #[test]
    fn test_unknown_prerequisite_rejects_line() {
        let (index, report) = load(&[
            "CS101,Intro to CS,",
            "CS201,Data Structures,CS101",
            "CS301,Algorithms,CS999",
        ]);

        let numbers: Vec<_> = index.iter().map(|c| c.course_number.as_str()).collect();
        assert_eq!(numbers, vec!["CS101", "CS201"]);
        assert!(index.lookup("CS301").is_none());
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                line: 3,
                kind: DiagnosticKind::UnknownPrerequisite {
                    prerequisite: "CS999".to_string()
                },
            }]
        );
        assert_eq!(report.inserted, 2);
        assert_eq!(report.known_keys, 3);
    }

    #[test]
    fn test_single_field_line_is_malformed() {
        let (index, report) = load(&["CS101"]);
        assert!(index.is_empty());
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                line: 1,
                kind: DiagnosticKind::MalformedLine { fields: 1 },
            }]
        );
    }

    #[test]
    fn test_duplicate_course_keeps_first_without_diagnostic() {
        let (index, report) = load(&["CS101,Intro", "CS101,Intro Again"]);
        assert_eq!(index.lookup("CS101").unwrap().course_name, "Intro");
        assert!(report.is_clean());
        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates_skipped, 1);
    }

    #[test]
    fn test_prerequisite_match_ignores_case() {
        let (index, report) = load(&["cs101,Intro", "CS201,Data,CS101"]);
        assert!(report.is_clean());
        assert_eq!(index.lookup("cs101").unwrap().course_number, "cs101");
        assert!(index.lookup("CS101").is_none());
        assert_eq!(index.lookup("CS201").unwrap().prerequisites, vec!["CS101"]);
    }

    #[test]
    fn test_forward_reference_validates() {
        let (index, report) = load(&["CS201,Data Structures,CS101", "CS101,Intro"]);
        assert!(report.is_clean());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_prerequisite_may_name_rejected_line() {
        // CS050 is declared only on a malformed line, yet still counts as known.
        let (index, report) = load(&["CS050", "CS101,Intro,CS050"]);
        assert_eq!(report.rejected(), 1);
        assert_eq!(index.lookup("CS101").unwrap().prerequisites, vec!["CS050"]);
        assert!(index.lookup("CS050").is_none());
    }

    #[test]
    fn test_line_numbering_modes() {
        let source =
            MemorySource::from_lines(["", "CS101,Intro", "   ", "BROKEN", "CS201,X,NOPE"]);

        let mut index = CourseIndex::new();
        let physical = ingest(&source, &mut index, &IngestOptions::default()).unwrap();
        let lines: Vec<_> = physical.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![4, 5]);
        assert_eq!(physical.lines_processed, 3);

        let mut index = CourseIndex::new();
        let options = IngestOptions::default().with_line_numbering(LineNumbering::NonBlank);
        let non_blank = ingest(&source, &mut index, &options).unwrap();
        let lines: Vec<_> = non_blank.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_blank_source_loads_nothing() {
        let (index, report) = load(&["", "  ", "\t"]);
        assert!(index.is_empty());
        assert!(report.is_clean());
        assert_eq!(report.lines_processed, 0);
        assert_eq!(report.known_keys, 0);
    }

    #[test]
    fn test_crlf_lines_are_trimmed() {
        let source = MemorySource::new("CS101,Intro\r\nCS201,Data,CS101\r\n");
        let mut index = CourseIndex::new();
        let report = ingest(&source, &mut index, &IngestOptions::default()).unwrap();
        assert!(report.is_clean());
        assert_eq!(index.lookup("CS201").unwrap().prerequisites, vec!["CS101"]);
    }

    #[test]
    fn test_diagnostic_display() {
        let malformed = Diagnostic {
            line: 7,
            kind: DiagnosticKind::MalformedLine { fields: 1 },
        };
        assert_eq!(malformed.to_string(), "Incorrect formatting at line 7");

        let unknown = Diagnostic {
            line: 3,
            kind: DiagnosticKind::UnknownPrerequisite {
                prerequisite: "CS999".to_string(),
            },
        };
        assert_eq!(
            unknown.to_string(),
            "Invalid prerequisite 'CS999' at line 3"
        );
    }

    #[test]
    fn test_diagnostic_serializes_flat() {
        let diagnostic = Diagnostic {
            line: 3,
            kind: DiagnosticKind::UnknownPrerequisite {
                prerequisite: "CS999".to_string(),
            },
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["kind"], "unknown_prerequisite");
        assert_eq!(json["prerequisite"], "CS999");
    }
}
