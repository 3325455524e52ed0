//! Menu command - the interactive catalog session
//!
//! Reads one choice per line: `1` loads a course file, `2` prints every
//! course, `3` looks up a single course, `9` exits. End of input also exits,
//! so the menu can be driven from a pipe.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use catalog_core::{CatalogError, CatalogSession, FileSource, IngestOptions};

use super::list::CourseList;
use super::show::CourseLookup;
use crate::output::{OutputConfig, Outputter};

const MENU: &str = "\
Please select an option from the menu below:
1. Load Course File
2. Print All Courses
3. Search for Course Information
9. Exit Program";

/// Prompt shown before reading a choice
const CHOICE_PROMPT: &str = "Enter your choice (1, 2, 3, or 9): ";

/// Run the menu on the process's stdin and stdout
pub fn run(file: Option<PathBuf>, options: IngestOptions, config: OutputConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(file, options, config);
    menu.run_loop(stdin.lock(), stdout.lock())
}

/// One interactive session over a reader and a writer
pub struct Menu {
    session: CatalogSession,
    file: Option<PathBuf>,
    options: IngestOptions,
    config: OutputConfig,
}

impl Menu {
    /// `file`, when set, is loaded by option 1 instead of prompting for a path.
    pub fn new(file: Option<PathBuf>, options: IngestOptions, config: OutputConfig) -> Self {
        Self {
            session: CatalogSession::new(),
            file,
            options,
            config,
        }
    }

    pub fn run_loop<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> anyhow::Result<()> {
        writeln!(out, "Welcome to the course catalog.")?;

        loop {
            writeln!(out)?;
            writeln!(out, "{}", MENU)?;
            let Some(choice) = prompt(&mut input, &mut out, CHOICE_PROMPT)? else {
                writeln!(out)?;
                break;
            };
            writeln!(out)?;

            match choice.as_str() {
                "1" => self.load(&mut input, &mut out)?,
                "2" => self.print_courses(&mut out)?,
                "3" => self.search(&mut input, &mut out)?,
                "9" => {
                    writeln!(out, "Exiting program. Goodbye!")?;
                    break;
                }
                other => {
                    tracing::debug!("Rejected menu choice {:?}", other);
                    writeln!(out, "Invalid choice. Please enter 1, 2, 3, or 9.")?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    fn load<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> anyhow::Result<()> {
        if let Some(source) = self.session.source_name() {
            writeln!(out, "Course file has already been loaded ({}).", source)?;
            return Ok(());
        }

        let path = match &self.file {
            Some(path) => path.clone(),
            None => {
                let prompt_text = "Enter the name of the course file to load (Case Sensitive): ";
                match prompt(input, out, prompt_text)? {
                    Some(path) if !path.is_empty() => PathBuf::from(path),
                    _ => {
                        writeln!(out)?;
                        writeln!(out, "No file name given.")?;
                        return Ok(());
                    }
                }
            }
        };

        match self.session.load(&FileSource::new(&path), &self.options) {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    writeln!(out, "Error: {}. Skipping.", diagnostic)?;
                }
                writeln!(
                    out,
                    "Course file loaded successfully ({} courses).",
                    report.inserted
                )?;
            }
            Err(CatalogError::Unavailable { source_name, source }) => {
                tracing::debug!("Could not load {}: {}", source_name, source);
                writeln!(out, "Error opening file {}: {}", source_name, source)?;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        Ok(())
    }

    fn print_courses<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        match self.session.courses() {
            Ok(courses) => {
                let list: CourseList = courses.into_iter().flatten().collect();
                writeln!(out, "{}", list.render(&self.config))?;
            }
            Err(CatalogError::NotLoaded) => {
                writeln!(out, "Please load a course file before printing the course list.")?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn search<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> anyhow::Result<()> {
        if !self.session.is_loaded() {
            writeln!(
                out,
                "Please load a course file before searching for course information."
            )?;
            return Ok(());
        }

        let prompt_text = "Enter the course number to search for (Case Sensitive): ";
        let Some(course_number) = prompt(input, out, prompt_text)? else {
            writeln!(out)?;
            return Ok(());
        };
        writeln!(out)?;

        let lookup = CourseLookup::new(course_number.as_str(), self.session.find(&course_number)?);
        writeln!(out, "{}", lookup.render(&self.config))?;
        Ok(())
    }
}

/// Write `text` and read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
