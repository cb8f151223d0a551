//! The `teachers` subcommand.

use anyhow::Result;
use clap::{Args, Subcommand};
use schoolroll_lib::types::{TeacherDraft, TeacherRecord};
use schoolroll_lib::Client;

use super::{provided, run_delete, run_form, run_list, run_show, ListArgs};
use crate::output::{print_teachers, OutputFormat};

#[derive(Args)]
pub struct TeachersArgs {
    #[command(subcommand)]
    pub command: TeacherCommand,
}

#[derive(Subcommand)]
pub enum TeacherCommand {
    /// List teachers. Sortable by name, gender, contact, salary
    List(ListArgs),
    /// Show one teacher
    Show { id: String },
    /// Create a teacher
    Add(TeacherFields),
    /// Change fields of an existing teacher
    Edit {
        id: String,
        #[command(flatten)]
        fields: TeacherFields,
    },
    /// Delete a teacher and print the page they were on
    Delete {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct TeacherFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Male, Female or Other
    #[arg(long)]
    pub gender: Option<String>,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<String>,

    /// Ten-digit phone number
    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub salary: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

impl TeacherFields {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        provided(&[
            ("name", &self.name),
            ("gender", &self.gender),
            ("dob", &self.dob),
            ("contact", &self.contact),
            ("salary", &self.salary),
            ("email", &self.email),
        ])
    }
}

pub async fn run(args: &TeachersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        TeacherCommand::List(list) => {
            run_list::<TeacherRecord>(client, list, format, print_teachers).await
        }
        TeacherCommand::Show { id } => {
            run_show::<TeacherRecord>(client, id, format, print_teachers).await
        }
        TeacherCommand::Add(fields) => {
            run_form::<TeacherDraft>(client, None, &fields.pairs()).await
        }
        TeacherCommand::Edit { id, fields } => {
            run_form::<TeacherDraft>(client, Some(id), &fields.pairs()).await
        }
        TeacherCommand::Delete { id, list } => {
            run_delete::<TeacherRecord>(client, id, list, format, print_teachers).await
        }
    }
}
