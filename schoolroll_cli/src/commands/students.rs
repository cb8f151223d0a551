//! The `students` subcommand, including moving students between classes.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use schoolroll_lib::types::{ClassRecord, EntityRef, StudentDraft, StudentRecord};
use schoolroll_lib::{Client, ListController};

use super::{provided, run_delete, run_form, run_list, run_show, with_banner, ListArgs};
use crate::output::{print_students, OutputFormat};

#[derive(Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentCommand,
}

#[derive(Subcommand)]
pub enum StudentCommand {
    /// List students with their class. Sortable by name, gender, contact, feesPaid
    List(ListArgs),
    /// Show one student
    Show { id: String },
    /// Create a student
    Add(StudentFields),
    /// Change fields of an existing student
    Edit {
        id: String,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student and print the page they were on
    Delete {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Enrol a student in an existing class
    Assign { student_id: String, class_id: String },
    /// Remove a student from their class
    Unassign { student_id: String },
}

#[derive(Args, Debug, Default)]
pub struct StudentFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Male or Female
    #[arg(long)]
    pub gender: Option<String>,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<String>,

    /// Ten-digit phone number
    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub fees_paid: Option<String>,

    /// Class id to set on the record
    #[arg(long)]
    pub class: Option<String>,
}

impl StudentFields {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        provided(&[
            ("name", &self.name),
            ("gender", &self.gender),
            ("dob", &self.dob),
            ("contact", &self.contact),
            ("feesPaid", &self.fees_paid),
            ("class", &self.class),
        ])
    }
}

pub async fn run(args: &StudentsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        StudentCommand::List(list) => {
            run_list::<StudentRecord>(client, list, format, print_students).await
        }
        StudentCommand::Show { id } => {
            run_show::<StudentRecord>(client, id, format, print_students).await
        }
        StudentCommand::Add(fields) => {
            run_form::<StudentDraft>(client, None, &fields.pairs()).await
        }
        StudentCommand::Edit { id, fields } => {
            run_form::<StudentDraft>(client, Some(id), &fields.pairs()).await
        }
        StudentCommand::Delete { id, list } => {
            run_delete::<StudentRecord>(client, id, list, format, print_students).await
        }
        StudentCommand::Assign {
            student_id,
            class_id,
        } => {
            let class = client
                .get::<ClassRecord>(class_id)
                .await
                .with_context(|| format!("Unknown class {}", class_id))?;
            let mut list: ListController<StudentRecord, Client> =
                ListController::new(client.clone());
            let target = EntityRef::named(&class.id, &class.name);
            if let Err(e) = list.assign_class(student_id, target).await {
                return Err(with_banner(list.error(), e));
            }
            eprintln!("Assigned student {} to class {}", student_id, class.name);
            Ok(())
        }
        StudentCommand::Unassign { student_id } => {
            let mut list: ListController<StudentRecord, Client> =
                ListController::new(client.clone());
            if let Err(e) = list.unassign_class(student_id).await {
                return Err(with_banner(list.error(), e));
            }
            eprintln!("Removed student {} from their class", student_id);
            Ok(())
        }
    }
}
