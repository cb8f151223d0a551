//! Class records returned by `/classes`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::resource::Resource;

/// Backend-assigned class identifier.
pub type ClassID = String;

/// A class as stored by the backend.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: ClassID,

    pub name: String,

    pub year: i32,

    /// Assigned teacher, if any.
    #[serde(default)]
    pub teacher: Option<EntityRef>,

    /// Fee charged per enrolled student.
    #[serde(default)]
    pub student_fees: f64,

    /// Maximum number of students; the backend refuses assignments beyond it.
    #[serde(default = "default_student_limit")]
    pub student_limit: i64,

    /// Enrolled students in enrolment order.
    #[serde(default)]
    pub students: Vec<EntityRef>,
}

fn default_student_limit() -> i64 {
    30
}

/// Request body of class create and update calls, and the editable state of
/// the class form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassDraft {
    pub name: String,
    pub year: Option<i32>,
    /// Teacher id; `null` clears the assignment.
    pub teacher: Option<String>,
    pub student_fees: f64,
    pub student_limit: i64,
}

impl Default for ClassDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            year: None,
            teacher: None,
            student_fees: 0.0,
            student_limit: default_student_limit(),
        }
    }
}

impl From<ClassRecord> for ClassDraft {
    fn from(val: ClassRecord) -> Self {
        ClassDraft {
            name: val.name,
            year: Some(val.year),
            teacher: val.teacher.map(|t| t.id),
            student_fees: val.student_fees,
            student_limit: val.student_limit,
        }
    }
}

impl Resource for ClassRecord {
    const PATH: &'static str = "/classes";
    const SINGULAR: &'static str = "class";
    const PLURAL: &'static str = "classes";
    type SortBy = ClassSortBy;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Sortable columns of the class list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassSortBy {
    Name,
    Year,
    StudentFees,
    StudentLimit,
}
impl std::fmt::Display for ClassSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ClassSortBy::Name => "name",
                ClassSortBy::Year => "year",
                ClassSortBy::StudentFees => "studentFees",
                ClassSortBy::StudentLimit => "studentLimit",
            }
        )
    }
}
impl FromStr for ClassSortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ClassSortBy::Name),
            "year" => Ok(ClassSortBy::Year),
            "studentFees" | "fees" => Ok(ClassSortBy::StudentFees),
            "studentLimit" | "limit" => Ok(ClassSortBy::StudentLimit),
            _ => Err(format!(
                "unknown class column '{}'. Valid values: name, year, studentFees, studentLimit",
                s
            )),
        }
    }
}
