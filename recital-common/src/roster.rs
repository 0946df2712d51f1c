//! Roster loading and lookup
//!
//! The roster is a static table supplied externally as a TOML file:
//!
//! ```toml
//! [[classroom]]
//! id = "ClassA"
//! students = [
//!     { id = "1", name = "Jane Doe" },
//!     { id = "2", name = "Sam Lee" },
//! ]
//! ```
//!
//! Classrooms keep their file order; students keep their listed order.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Student;

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    classroom: Vec<ClassroomEntry>,
}

#[derive(Debug, Deserialize)]
struct ClassroomEntry {
    id: String,
    #[serde(default)]
    students: Vec<Student>,
}

/// The full roster: classroom id → ordered student list.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    classes: Vec<(String, Vec<Student>)>,
}

impl Roster {
    /// Load the roster from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read roster file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a roster from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: RosterFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid roster file: {}", e)))?;
        Ok(Self {
            classes: file
                .classroom
                .into_iter()
                .map(|c| (c.id, c.students))
                .collect(),
        })
    }

    /// Classroom ids in file order.
    pub fn class_ids(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|(id, _)| id.as_str())
    }

    /// Students of one classroom; `None` when the classroom is unknown.
    pub fn students_for(&self, classroom: &str) -> Option<&[Student]> {
        self.classes
            .iter()
            .find(|(id, _)| id == classroom)
            .map(|(_, students)| students.as_slice())
    }

    /// All students across classrooms, flattened in file order.
    pub fn all_students(&self) -> Vec<Student> {
        self.classes
            .iter()
            .flat_map(|(_, students)| students.iter().cloned())
            .collect()
    }

    /// Precedence-ordered roster lookup: the classroom's own roster when it
    /// exists and is non-empty, otherwise the flattened full roster.
    ///
    /// This is the fallback the teacher view relies on when a class tag
    /// parsed from filenames has no roster entry of its own.
    pub fn students_with_fallback(&self, classroom: &str) -> Vec<Student> {
        match self.students_for(classroom) {
            Some(students) if !students.is_empty() => students.to_vec(),
            _ => self.all_students(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"
        [[classroom]]
        id = "ClassA"
        students = [
            { id = "1", name = "Jane Doe" },
            { id = "2", name = "Sam Lee" },
        ]

        [[classroom]]
        id = "ClassB"
        students = [
            { id = "3", name = "Ada Park" },
        ]

        [[classroom]]
        id = "ClassC"
        students = []
    "#;

    #[test]
    fn lookup_by_classroom_preserves_order() {
        let roster = Roster::from_toml(ROSTER).unwrap();
        let students = roster.students_for("ClassA").unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "Jane Doe");
        assert_eq!(students[1].name, "Sam Lee");
    }

    #[test]
    fn unknown_classroom_is_none() {
        let roster = Roster::from_toml(ROSTER).unwrap();
        assert!(roster.students_for("ClassZ").is_none());
    }

    #[test]
    fn all_students_flattens_in_file_order() {
        let roster = Roster::from_toml(ROSTER).unwrap();
        let names: Vec<_> = roster.all_students().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Jane Doe", "Sam Lee", "Ada Park"]);
    }

    #[test]
    fn fallback_prefers_the_classroom_roster() {
        let roster = Roster::from_toml(ROSTER).unwrap();
        let students = roster.students_with_fallback("ClassB");
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Ada Park");
    }

    #[test]
    fn fallback_uses_full_roster_for_unknown_or_empty_classroom() {
        let roster = Roster::from_toml(ROSTER).unwrap();
        assert_eq!(roster.students_with_fallback("ClassZ").len(), 3);
        assert_eq!(roster.students_with_fallback("ClassC").len(), 3);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = Roster::from_toml("classroom = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
