//! Data model for catalog entries.
//!
//! A [`Course`] is a plain value record. It carries no behavior beyond
//! construction and a few read helpers; ordering and validation live in
//! [`crate::index`] and [`crate::ingest`].

use serde::{Deserialize, Serialize};

/// A single course record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique key, stored exactly as it appeared in the source file.
    pub course_number: String,
    pub course_name: String,
    /// Course numbers required before this one, in file order and case.
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(
        course_number: impl Into<String>,
        course_name: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            course_number: course_number.into(),
            course_name: course_name.into(),
            prerequisites,
        }
    }

    /// Whether the course can be taken without any prior course.
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Prerequisites joined with `", "`, or `None` when there are none.
    pub fn prerequisite_list(&self) -> Option<String> {
        if self.prerequisites.is_empty() {
            None
        } else {
            Some(self.prerequisites.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerequisite_list() {
        let course = Course::new(
            "CS300",
            "Data Structures",
            vec!["CS200".to_string(), "MATH201".to_string()],
        );
        assert!(course.has_prerequisites());
        assert_eq!(
            course.prerequisite_list().as_deref(),
            Some("CS200, MATH201")
        );

        let intro = Course::new("CS100", "Intro", Vec::new());
        assert!(!intro.has_prerequisites());
        assert_eq!(intro.prerequisite_list(), None);
    }

    #[test]
    fn test_serializes_with_snake_case_fields() {
        let course = Course::new("CS101", "Intro to CS", Vec::new());
        let json = serde_json::to_value(&course).unwrap();

        assert_eq!(json["course_number"], "CS101");
        assert_eq!(json["course_name"], "Intro to CS");
        assert!(json["prerequisites"].as_array().unwrap().is_empty());
    }
}
