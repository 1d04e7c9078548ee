//! Domain model for a student enrolled in a class.
use chrono::NaiveDate;
use shared::Gender;

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub klass_id: i64,
    /// "<name> - <section>" of the owning class
    pub klass_name: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub parent_name: String,
    pub parent_phone: String,
}

impl Student {
    /// "<last>, <first>"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// "<first> <last>"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Column values of a student row, without the generated id
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub klass_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub parent_name: String,
    pub parent_phone: String,
}

pub fn gender_code(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "M",
        Gender::Female => "F",
    }
}

pub fn gender_from_code(code: &str) -> Option<Gender> {
    match code {
        "M" => Some(Gender::Male),
        "F" => Some(Gender::Female),
        _ => None,
    }
}
