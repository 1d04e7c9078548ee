//! Domain model for a class owned by a teacher.
use super::student::Student;

#[derive(Debug, Clone, PartialEq)]
pub struct Klass {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub name: String,
    pub section: String,
}

impl Klass {
    /// "<name> - <section>"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.section)
    }
}

/// A class together with its students, as returned by class reads
#[derive(Debug, Clone, PartialEq)]
pub struct KlassDetail {
    pub klass: Klass,
    pub students: Vec<Student>,
}
