//! The `classes` subcommand.

use anyhow::Result;
use clap::{Args, Subcommand};
use schoolroll_lib::types::{ClassDraft, ClassRecord};
use schoolroll_lib::Client;

use super::{provided, run_delete, run_form, run_list, run_show, ListArgs};
use crate::output::{print_classes, OutputFormat};

#[derive(Args)]
pub struct ClassesArgs {
    #[command(subcommand)]
    pub command: ClassCommand,
}

#[derive(Subcommand)]
pub enum ClassCommand {
    /// List classes. Sortable by name, year, studentFees, studentLimit
    List(ListArgs),
    /// Show one class
    Show { id: String },
    /// Create a class
    Add(ClassFields),
    /// Change fields of an existing class
    Edit {
        id: String,
        #[command(flatten)]
        fields: ClassFields,
    },
    /// Delete a class and print the page it was on
    Delete {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

/// Class form fields. Omitted flags keep the loaded (or default) value.
#[derive(Args, Debug, Default)]
pub struct ClassFields {
    /// Class name
    #[arg(long)]
    pub name: Option<String>,

    /// Academic year, e.g. 2024
    #[arg(long)]
    pub year: Option<String>,

    /// Teacher id; pass an empty string to clear
    #[arg(long)]
    pub teacher: Option<String>,

    /// Fee charged per student
    #[arg(long)]
    pub fees: Option<String>,

    /// Maximum number of students
    #[arg(long)]
    pub capacity: Option<String>,
}

impl ClassFields {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        provided(&[
            ("name", &self.name),
            ("year", &self.year),
            ("teacher", &self.teacher),
            ("studentFees", &self.fees),
            ("studentLimit", &self.capacity),
        ])
    }
}

pub async fn run(args: &ClassesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        ClassCommand::List(list) => {
            run_list::<ClassRecord>(client, list, format, print_classes).await
        }
        ClassCommand::Show { id } => {
            run_show::<ClassRecord>(client, id, format, print_classes).await
        }
        ClassCommand::Add(fields) => run_form::<ClassDraft>(client, None, &fields.pairs()).await,
        ClassCommand::Edit { id, fields } => {
            run_form::<ClassDraft>(client, Some(id), &fields.pairs()).await
        }
        ClassCommand::Delete { id, list } => {
            run_delete::<ClassRecord>(client, id, list, format, print_classes).await
        }
    }
}
