//! Form drafts for the three entities: how a loaded record becomes a draft
//! and how raw field input is merged into one.

use chrono::{DateTime, NaiveDate, Utc};
use schoolroll_api::types::{
    ClassDraft, ClassRecord, StudentDraft, StudentRecord, TeacherDraft, TeacherRecord,
};

use crate::error::SchoolError;
use crate::form::FormDraft;
use crate::validation::{Rule, CLASS_RULES, STUDENT_RULES, TEACHER_RULES};

/// Reduces a backend date to the calendar day it falls on in UTC.
///
/// Accepts RFC 3339 timestamps (`1985-06-15T00:00:00.000Z`) and plain
/// `YYYY-MM-DD` dates. Anything else yields `None`.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn unknown_field(entity: &str, field: &str) -> SchoolError {
    SchoolError::InvalidInput(format!("{} form has no field '{}'", entity, field))
}

fn parse_amount(field: &str, value: &str) -> Result<f64, SchoolError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(SchoolError::InvalidInput(format!(
            "{} must be a number, got '{}'",
            field, value
        ))),
    }
}

fn parse_whole(field: &str, value: &str) -> Result<i64, SchoolError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<i64>().map_err(|_| {
        SchoolError::InvalidInput(format!("{} must be a whole number, got '{}'", field, value))
    })
}

fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>, SchoolError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    calendar_date(value).map(Some).ok_or_else(|| {
        SchoolError::InvalidInput(format!("{} must be a date (YYYY-MM-DD), got '{}'", field, value))
    })
}

fn optional_id(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl FormDraft for ClassDraft {
    type Record = ClassRecord;
    const RULES: &'static [Rule<Self>] = CLASS_RULES;

    fn from_record(record: ClassRecord) -> Self {
        ClassDraft::from(record)
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), SchoolError> {
        match field {
            "name" => self.name = value.to_string(),
            "year" => {
                self.year = match value.trim() {
                    "" => None,
                    v => Some(v.parse().map_err(|_| {
                        SchoolError::InvalidInput(format!("year must be a whole number, got '{}'", v))
                    })?),
                }
            }
            "teacher" => self.teacher = optional_id(value),
            "studentFees" => self.student_fees = parse_amount(field, value)?,
            "studentLimit" => self.student_limit = parse_whole(field, value)?,
            _ => return Err(unknown_field("class", field)),
        }
        Ok(())
    }
}

impl FormDraft for TeacherDraft {
    type Record = TeacherRecord;
    const RULES: &'static [Rule<Self>] = TEACHER_RULES;

    fn from_record(record: TeacherRecord) -> Self {
        TeacherDraft {
            name: record.name,
            gender: Some(record.gender),
            dob: calendar_date(&record.dob),
            contact: record.contact,
            salary: record.salary,
            email: record.email,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), SchoolError> {
        match field {
            "name" => self.name = value.to_string(),
            "gender" => {
                self.gender = match value.trim() {
                    "" => None,
                    v => Some(v.parse().map_err(SchoolError::InvalidInput)?),
                }
            }
            "dob" => self.dob = parse_date(field, value)?,
            "contact" => self.contact = value.to_string(),
            "salary" => self.salary = parse_amount(field, value)?,
            "email" => self.email = value.to_string(),
            _ => return Err(unknown_field("teacher", field)),
        }
        Ok(())
    }
}

impl FormDraft for StudentDraft {
    type Record = StudentRecord;
    const RULES: &'static [Rule<Self>] = STUDENT_RULES;

    fn from_record(record: StudentRecord) -> Self {
        StudentDraft {
            name: record.name,
            gender: Some(record.gender),
            dob: calendar_date(&record.dob),
            contact: record.contact,
            fees_paid: record.fees_paid,
            class: record.class.map(|c| c.id),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), SchoolError> {
        match field {
            "name" => self.name = value.to_string(),
            "gender" => {
                self.gender = match value.trim() {
                    "" => None,
                    v => Some(v.parse().map_err(SchoolError::InvalidInput)?),
                }
            }
            "dob" => self.dob = parse_date(field, value)?,
            "contact" => self.contact = value.to_string(),
            "feesPaid" => self.fees_paid = parse_amount(field, value)?,
            "class" => self.class = optional_id(value),
            _ => return Err(unknown_field("student", field)),
        }
        Ok(())
    }
}
