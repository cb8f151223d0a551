//! Student records returned by `/students`.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::resource::Resource;

/// Backend-assigned student identifier.
pub type StudentID = String;

/// A student as stored by the backend.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: StudentID,

    pub name: String,

    pub gender: StudentGender,

    /// Date of birth as sent by the backend, usually a full ISO-8601 timestamp.
    pub dob: String,

    /// Ten-digit phone number.
    pub contact: String,

    #[serde(default)]
    pub fees_paid: f64,

    /// Class the student is enrolled in. `None` when unassigned.
    #[serde(default)]
    pub class: Option<EntityRef>,
}

/// Request body of student create and update calls, and the editable state of
/// the student form. Date of birth is kept at calendar-date granularity.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub name: String,
    pub gender: Option<StudentGender>,
    pub dob: Option<NaiveDate>,
    pub contact: String,
    pub fees_paid: f64,
    /// Class id; `null` when the student is unassigned.
    pub class: Option<String>,
}

impl Resource for StudentRecord {
    const PATH: &'static str = "/students";
    const SINGULAR: &'static str = "student";
    const PLURAL: &'static str = "students";
    const LIST_PARAMS: &'static [(&'static str, &'static str)] = &[("includeClass", "true")];
    type SortBy = StudentSortBy;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Student gender.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentGender {
    Male,
    Female,
}
impl std::fmt::Display for StudentGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StudentGender::Male => "Male",
                StudentGender::Female => "Female",
            }
        )
    }
}
impl FromStr for StudentGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(StudentGender::Male),
            "female" | "f" => Ok(StudentGender::Female),
            _ => Err(format!("unknown gender '{}'. Valid values: Male, Female", s)),
        }
    }
}

/// Sortable columns of the student list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentSortBy {
    Name,
    Gender,
    Contact,
    FeesPaid,
}
impl std::fmt::Display for StudentSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StudentSortBy::Name => "name",
                StudentSortBy::Gender => "gender",
                StudentSortBy::Contact => "contact",
                StudentSortBy::FeesPaid => "feesPaid",
            }
        )
    }
}
impl FromStr for StudentSortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(StudentSortBy::Name),
            "gender" => Ok(StudentSortBy::Gender),
            "contact" => Ok(StudentSortBy::Contact),
            "feesPaid" | "fees" => Ok(StudentSortBy::FeesPaid),
            _ => Err(format!(
                "unknown student column '{}'. Valid values: name, gender, contact, feesPaid",
                s
            )),
        }
    }
}
