use anyhow::Result;
use schoolroll_lib::types::{
    ClassAnalytics, ClassRecord, FinancialSummary, StudentRecord, TeacherRecord,
};
use schoolroll_lib::{calendar_date, month_name, FieldErrors, FinancialPeriod, FinancialQuery};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ClassRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Teacher")]
    #[serde(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Fees")]
    #[serde(rename = "Fees")]
    fees: String,
    #[tabled(rename = "Students")]
    #[serde(rename = "Students")]
    students: String,
}

#[derive(Tabled, Serialize)]
struct TeacherRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Gender")]
    #[serde(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Born")]
    #[serde(rename = "Born")]
    dob: String,
    #[tabled(rename = "Contact")]
    #[serde(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Salary")]
    #[serde(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
}

#[derive(Tabled, Serialize)]
struct StudentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Gender")]
    #[serde(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Born")]
    #[serde(rename = "Born")]
    dob: String,
    #[tabled(rename = "Contact")]
    #[serde(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Fees Paid")]
    #[serde(rename = "Fees Paid")]
    fees_paid: String,
    #[tabled(rename = "Class")]
    #[serde(rename = "Class")]
    class: String,
}

#[derive(Tabled, Serialize)]
struct FinancialRow {
    #[tabled(rename = "Period")]
    #[serde(rename = "Period")]
    period: String,
    #[tabled(rename = "Salary Expense")]
    #[serde(rename = "Salary Expense")]
    expenses: String,
    #[tabled(rename = "Fees Income")]
    #[serde(rename = "Fees Income")]
    income: String,
    #[tabled(rename = "Net")]
    #[serde(rename = "Net")]
    net: String,
}

#[derive(Tabled, Serialize)]
struct GenderRow {
    #[tabled(rename = "Gender")]
    #[serde(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Students")]
    #[serde(rename = "Students")]
    count: i64,
}

// -- Row builders --

fn build_class_rows(classes: &[ClassRecord]) -> Vec<ClassRow> {
    classes
        .iter()
        .map(|c| ClassRow {
            id: c.id.clone(),
            name: c.name.clone(),
            year: c.year,
            teacher: c
                .teacher
                .as_ref()
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            fees: format_amount(c.student_fees),
            students: format!("{}/{}", c.students.len(), c.student_limit),
        })
        .collect()
}

fn build_teacher_rows(teachers: &[TeacherRecord]) -> Vec<TeacherRow> {
    teachers
        .iter()
        .map(|t| TeacherRow {
            id: t.id.clone(),
            name: t.name.clone(),
            gender: t.gender.to_string(),
            dob: format_date(&t.dob),
            contact: t.contact.clone(),
            salary: format_amount(t.salary),
            email: t.email.clone(),
        })
        .collect()
}

fn build_student_rows(students: &[StudentRecord]) -> Vec<StudentRow> {
    students
        .iter()
        .map(|s| StudentRow {
            id: s.id.clone(),
            name: s.name.clone(),
            gender: s.gender.to_string(),
            dob: format_date(&s.dob),
            contact: s.contact.clone(),
            fees_paid: format_amount(s.fees_paid),
            class: s
                .class
                .as_ref()
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "Unassigned".to_string()),
        })
        .collect()
}

fn build_financial_row(query: &FinancialQuery, summary: &FinancialSummary) -> FinancialRow {
    FinancialRow {
        period: period_label(query),
        expenses: format_amount(summary.expenses),
        income: format_amount(summary.income),
        net: format_amount(summary.net()),
    }
}

fn build_gender_rows(series: &[(&str, i64)]) -> Vec<GenderRow> {
    series
        .iter()
        .map(|(gender, count)| GenderRow {
            gender: gender.to_string(),
            count: *count,
        })
        .collect()
}

// -- Generic emitters --

fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Per-entity output --

pub fn print_classes(classes: &[ClassRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&classes);
            Ok(())
        }
        _ => print_rows(build_class_rows(classes), format),
    }
}

pub fn print_teachers(teachers: &[TeacherRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&teachers);
            Ok(())
        }
        _ => print_rows(build_teacher_rows(teachers), format),
    }
}

pub fn print_students(students: &[StudentRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&students);
            Ok(())
        }
        _ => print_rows(build_student_rows(students), format),
    }
}

pub fn print_class_analytics(
    data: &ClassAnalytics,
    series: &[(&str, i64)],
    format: &OutputFormat,
) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(data);
        return Ok(());
    }

    let class = &data.class;
    eprintln!("Class Analytics: {}", class.name);
    eprintln!("Year: {}", class.year);
    eprintln!(
        "Teacher: {}",
        class.teacher.as_ref().map(|t| t.label()).unwrap_or("-")
    );
    eprintln!("Students:");
    for student in &class.students {
        eprintln!("  {}", student.label());
    }
    print_rows(build_gender_rows(series), format)
}

pub fn print_financials(
    query: &FinancialQuery,
    summary: &FinancialSummary,
    format: &OutputFormat,
) -> Result<()> {
    print_rows(vec![build_financial_row(query, summary)], format)
}

pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {}: {}", field, message);
    }
}

fn period_label(query: &FinancialQuery) -> String {
    match query.period {
        FinancialPeriod::Monthly => format!(
            "{} {}",
            month_name(query.month).unwrap_or("?"),
            query.year
        ),
        FinancialPeriod::Yearly => query.year.to_string(),
    }
}

fn format_amount(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value)
    }
}

/// Backend dates arrive as timestamps; tables show the calendar day.
fn format_date(raw: &str) -> String {
    calendar_date(raw)
        .map(|d| d.to_string())
        .unwrap_or_else(|| raw.to_string())
}
