//! Client-side form validation.
//!
//! Each entity form has a declarative rule table; [`evaluate`] runs a table
//! against a draft and collects every failing field at once so all messages
//! can be shown together.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use schoolroll_api::types::{ClassDraft, StudentDraft, TeacherDraft};

static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid contact regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// One check of a rule table: when `check` returns false, `field` gets `message`.
pub struct Rule<D> {
    pub field: &'static str,
    pub check: fn(&D) -> bool,
    pub message: &'static str,
}

/// Field name to error message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Runs every rule against `draft`. Only the first failing rule of a field is
/// reported, so a missing value is not also flagged as malformed.
pub fn evaluate<D>(draft: &D, rules: &[Rule<D>]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in rules {
        if errors.contains(rule.field) {
            continue;
        }
        if !(rule.check)(draft) {
            errors.insert(rule.field, rule.message);
        }
    }
    errors
}

pub fn is_present(input: &str) -> bool {
    !input.trim().is_empty()
}

/// Exactly ten ASCII digits, nothing else.
pub fn is_contact_number(input: &str) -> bool {
    CONTACT_RE.is_match(input)
}

/// `local@domain.tld` shape: no whitespace, one `@`, a dot after it.
pub fn is_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

pub const CLASS_RULES: &[Rule<ClassDraft>] = &[
    Rule {
        field: "name",
        check: |d| is_present(&d.name),
        message: "Class name is required",
    },
    Rule {
        field: "year",
        check: |d| matches!(d.year, Some(y) if y != 0),
        message: "Year is required",
    },
    Rule {
        field: "studentFees",
        check: |d| d.student_fees >= 0.0,
        message: "Student fees cannot be negative",
    },
    Rule {
        field: "studentLimit",
        check: |d| d.student_limit >= 1,
        message: "Student limit must be at least 1",
    },
];

pub const TEACHER_RULES: &[Rule<TeacherDraft>] = &[
    Rule {
        field: "name",
        check: |d| is_present(&d.name),
        message: "Name is required",
    },
    Rule {
        field: "gender",
        check: |d| d.gender.is_some(),
        message: "Gender is required",
    },
    Rule {
        field: "dob",
        check: |d| d.dob.is_some(),
        message: "Date of birth is required",
    },
    Rule {
        field: "contact",
        check: |d| is_present(&d.contact) && is_contact_number(&d.contact),
        message: "Valid contact number is required",
    },
    Rule {
        field: "salary",
        check: |d| d.salary >= 0.0,
        message: "Salary cannot be negative",
    },
    Rule {
        field: "email",
        check: |d| is_present(&d.email),
        message: "Email is required",
    },
    Rule {
        field: "email",
        check: |d| is_email(&d.email),
        message: "Invalid email format",
    },
];

pub const STUDENT_RULES: &[Rule<StudentDraft>] = &[
    Rule {
        field: "name",
        check: |d| is_present(&d.name),
        message: "Name is required",
    },
    Rule {
        field: "gender",
        check: |d| d.gender.is_some(),
        message: "Gender is required",
    },
    Rule {
        field: "dob",
        check: |d| d.dob.is_some(),
        message: "Date of birth is required",
    },
    Rule {
        field: "contact",
        check: |d| is_present(&d.contact) && is_contact_number(&d.contact),
        message: "Valid contact number is required",
    },
    Rule {
        field: "feesPaid",
        check: |d| d.fees_paid >= 0.0,
        message: "Fees paid cannot be negative",
    },
];

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use schoolroll_api::types::{StudentGender, TeacherGender};

    use super::*;

    fn valid_teacher() -> TeacherDraft {
        TeacherDraft {
            name: "Ada Lovelace".to_string(),
            gender: Some(TeacherGender::Female),
            dob: NaiveDate::from_ymd_opt(1985, 6, 15),
            contact: "5551234567".to_string(),
            salary: 54000.0,
            email: "ada@school.test".to_string(),
        }
    }

    fn valid_student() -> StudentDraft {
        StudentDraft {
            name: "Grace Hopper".to_string(),
            gender: Some(StudentGender::Female),
            dob: NaiveDate::from_ymd_opt(2014, 12, 9),
            contact: "5550001111".to_string(),
            fees_paid: 0.0,
            class: None,
        }
    }

    // -- Class rules --

    #[test]
    fn class_collects_every_failing_field() {
        let draft = ClassDraft {
            name: String::new(),
            year: Some(2024),
            teacher: None,
            student_fees: -5.0,
            student_limit: 0,
        };
        let errors = evaluate(&draft, CLASS_RULES);
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["name", "studentFees", "studentLimit"]
        );
        assert!(!errors.contains("year"));
    }

    #[test]
    fn class_whitespace_name_is_missing() {
        let draft = ClassDraft {
            name: "   ".to_string(),
            year: Some(2024),
            ..ClassDraft::default()
        };
        let errors = evaluate(&draft, CLASS_RULES);
        assert_eq!(errors.get("name"), Some("Class name is required"));
    }

    #[test]
    fn class_year_zero_or_unset_is_missing() {
        let mut draft = ClassDraft {
            name: "Grade 5".to_string(),
            ..ClassDraft::default()
        };
        assert!(evaluate(&draft, CLASS_RULES).contains("year"));
        draft.year = Some(0);
        assert!(evaluate(&draft, CLASS_RULES).contains("year"));
        draft.year = Some(2024);
        assert!(evaluate(&draft, CLASS_RULES).is_empty());
    }

    #[test]
    fn class_default_draft_fails_only_required_fields() {
        let errors = evaluate(&ClassDraft::default(), CLASS_RULES);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "year"]);
    }

    // -- Teacher rules --

    #[test]
    fn teacher_valid_draft_passes() {
        assert!(evaluate(&valid_teacher(), TEACHER_RULES).is_empty());
    }

    #[test]
    fn teacher_short_contact_rejected() {
        let mut draft = valid_teacher();
        draft.contact = "12345".to_string();
        let errors = evaluate(&draft, TEACHER_RULES);
        assert_eq!(errors.get("contact"), Some("Valid contact number is required"));

        draft.contact = "1234567890".to_string();
        assert!(!evaluate(&draft, TEACHER_RULES).contains("contact"));
    }

    #[test]
    fn teacher_contact_rejects_non_digits_and_padding() {
        for bad in ["123456789a", " 1234567890", "12345678901", "", "+123456789"] {
            let mut draft = valid_teacher();
            draft.contact = bad.to_string();
            assert!(
                evaluate(&draft, TEACHER_RULES).contains("contact"),
                "expected contact error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn teacher_email_format() {
        let mut draft = valid_teacher();
        draft.email = "not-an-email".to_string();
        assert_eq!(
            evaluate(&draft, TEACHER_RULES).get("email"),
            Some("Invalid email format")
        );

        draft.email = "a@b.co".to_string();
        assert!(!evaluate(&draft, TEACHER_RULES).contains("email"));
    }

    #[test]
    fn teacher_missing_email_reports_required_not_format() {
        let mut draft = valid_teacher();
        draft.email = "  ".to_string();
        assert_eq!(
            evaluate(&draft, TEACHER_RULES).get("email"),
            Some("Email is required")
        );
    }

    #[test]
    fn teacher_empty_draft_flags_everything_but_salary() {
        let errors = evaluate(&TeacherDraft::default(), TEACHER_RULES);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["contact", "dob", "email", "gender", "name"]
        );
    }

    #[test]
    fn teacher_negative_salary() {
        let mut draft = valid_teacher();
        draft.salary = -1.0;
        assert_eq!(
            evaluate(&draft, TEACHER_RULES).get("salary"),
            Some("Salary cannot be negative")
        );
    }

    // -- Student rules --

    #[test]
    fn student_valid_draft_passes() {
        assert!(evaluate(&valid_student(), STUDENT_RULES).is_empty());
    }

    #[test]
    fn student_negative_fees_and_missing_gender() {
        let mut draft = valid_student();
        draft.fees_paid = -0.5;
        draft.gender = None;
        let errors = evaluate(&draft, STUDENT_RULES);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("feesPaid"), Some("Fees paid cannot be negative"));
        assert_eq!(errors.get("gender"), Some("Gender is required"));
    }

    // -- Display --

    #[test]
    fn field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.insert("year", "Year is required");
        errors.insert("name", "Class name is required");
        assert_eq!(
            errors.to_string(),
            "name: Class name is required; year: Year is required"
        );
    }
}
