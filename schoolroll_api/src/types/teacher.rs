//! Teacher records returned by `/teachers`.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Backend-assigned teacher identifier.
pub type TeacherID = String;

/// A teacher as stored by the backend.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: TeacherID,

    pub name: String,

    pub gender: TeacherGender,

    /// Date of birth as sent by the backend, usually a full ISO-8601 timestamp.
    pub dob: String,

    /// Ten-digit phone number.
    pub contact: String,

    #[serde(default)]
    pub salary: f64,

    #[serde(default)]
    pub email: String,
}

/// Request body of teacher create and update calls, and the editable state of
/// the teacher form. Date of birth is kept at calendar-date granularity.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDraft {
    pub name: String,
    pub gender: Option<TeacherGender>,
    pub dob: Option<NaiveDate>,
    pub contact: String,
    pub salary: f64,
    pub email: String,
}

impl Resource for TeacherRecord {
    const PATH: &'static str = "/teachers";
    const SINGULAR: &'static str = "teacher";
    const PLURAL: &'static str = "teachers";
    type SortBy = TeacherSortBy;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Teacher gender.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeacherGender {
    Male,
    Female,
    Other,
}
impl std::fmt::Display for TeacherGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TeacherGender::Male => "Male",
                TeacherGender::Female => "Female",
                TeacherGender::Other => "Other",
            }
        )
    }
}
impl FromStr for TeacherGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(TeacherGender::Male),
            "female" | "f" => Ok(TeacherGender::Female),
            "other" | "o" => Ok(TeacherGender::Other),
            _ => Err(format!(
                "unknown gender '{}'. Valid values: Male, Female, Other",
                s
            )),
        }
    }
}

/// Sortable columns of the teacher list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeacherSortBy {
    Name,
    Gender,
    Contact,
    Salary,
}
impl std::fmt::Display for TeacherSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TeacherSortBy::Name => "name",
                TeacherSortBy::Gender => "gender",
                TeacherSortBy::Contact => "contact",
                TeacherSortBy::Salary => "salary",
            }
        )
    }
}
impl FromStr for TeacherSortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(TeacherSortBy::Name),
            "gender" => Ok(TeacherSortBy::Gender),
            "contact" => Ok(TeacherSortBy::Contact),
            "salary" => Ok(TeacherSortBy::Salary),
            _ => Err(format!(
                "unknown teacher column '{}'. Valid values: name, gender, contact, salary",
                s
            )),
        }
    }
}
