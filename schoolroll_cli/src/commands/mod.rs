//! CLI subcommand implementations.
//!
//! The three entity commands share the list, form and delete drivers below;
//! each only adds its own field flags and output.

pub mod analytics;
pub mod classes;
pub mod students;
pub mod teachers;

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::Args;
use schoolroll_lib::{
    Client, FormController, FormDraft, ListController, ListQuery, ListSource, PageLimit, Query,
    Resource, SchoolError, SortKey, SubmitOutcome,
};

use crate::output::{print_field_errors, OutputFormat};

/// Renders one page of records in the chosen format.
pub type PrintRecords<R> = fn(&[R], &OutputFormat) -> Result<()>;

/// Paging, filtering and sorting flags shared by every list command.
#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page: 10, 25 or 50
    #[arg(long, default_value = "10")]
    pub limit: PageLimit,

    /// Only rows whose name contains this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Sort column; prefix with '-' for descending (e.g. -name)
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,
}

impl ListArgs {
    pub fn query<F>(&self) -> Result<ListQuery<F>>
    where
        F: FromStr<Err = String> + Copy + PartialEq + Display,
    {
        if self.page == 0 {
            bail!("--page starts at 1");
        }
        let mut query = ListQuery::default()
            .with_page(self.page)
            .with_limit(self.limit)
            .with_filter(self.filter.trim());
        if let Some(sort) = &self.sort {
            let key: SortKey<F> = sort.parse().map_err(anyhow::Error::msg)?;
            query = query.with_sort(key);
        }
        Ok(query)
    }
}

/// Attaches the banner a controller showed to the underlying error.
fn with_banner(banner: Option<&str>, err: SchoolError) -> anyhow::Error {
    match banner {
        Some(banner) => anyhow::Error::new(err).context(banner.to_string()),
        None => err.into(),
    }
}

fn page_footer<R: Resource, S: ListSource<R>>(list: &ListController<R, S>) {
    eprintln!(
        "Page {}/{} ({} {} shown)",
        list.page(),
        list.total_pages(),
        list.rows().len(),
        R::PLURAL
    );
}

pub async fn run_list<R>(
    client: &Client,
    args: &ListArgs,
    format: &OutputFormat,
    print: PrintRecords<R>,
) -> Result<()>
where
    R: Resource,
    R::SortBy: FromStr<Err = String>,
{
    let mut list: ListController<R, Client> =
        ListController::with_query(client.clone(), args.query()?);
    if let Err(e) = list.refresh().await {
        return Err(with_banner(list.error(), e));
    }

    page_footer(&list);
    print(list.rows(), format)
}

pub async fn run_show<R: Resource>(
    client: &Client,
    id: &str,
    format: &OutputFormat,
    print: PrintRecords<R>,
) -> Result<()> {
    let record = client.get::<R>(id).await?;
    print(std::slice::from_ref(&record), format)
}

/// Deletes `id` from the page described by `args`, then prints the page the
/// list settles on.
pub async fn run_delete<R>(
    client: &Client,
    id: &str,
    args: &ListArgs,
    format: &OutputFormat,
    print: PrintRecords<R>,
) -> Result<()>
where
    R: Resource,
    R::SortBy: FromStr<Err = String>,
{
    let mut list: ListController<R, Client> =
        ListController::with_query(client.clone(), args.query()?);
    if let Err(e) = list.refresh().await {
        return Err(with_banner(list.error(), e));
    }
    if let Err(e) = list.delete(id).await {
        return Err(with_banner(list.error(), e));
    }

    eprintln!("Deleted {} {}", R::SINGULAR, id);
    page_footer(&list);
    print(list.rows(), format)
}

/// Creates a record (no `id`) or edits one, applying `fields` as raw form input.
pub async fn run_form<D: FormDraft>(
    client: &Client,
    id: Option<&str>,
    fields: &[(&str, &str)],
) -> Result<()> {
    let mut form: FormController<D, Client> = match id {
        Some(id) => FormController::edit(client.clone(), id),
        None => FormController::create(client.clone()),
    };
    if let Err(e) = form.load().await {
        return Err(with_banner(form.fetch_error(), e));
    }

    for (field, value) in fields {
        form.set_field(field, value)?;
    }

    let entity = D::Record::SINGULAR;
    match form.submit().await {
        SubmitOutcome::Saved => {
            match form.id() {
                Some(id) => eprintln!("Updated {} {}", entity, id),
                None => eprintln!("Created {}", entity),
            }
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            let summary = format!("{} not saved: {} invalid field(s)", entity, errors.len());
            Err(anyhow::Error::new(SchoolError::from(errors)).context(summary))
        }
        SubmitOutcome::Failed(message) => bail!(message),
    }
}

/// Collects the flags that were given into `(field, value)` form input.
pub fn provided<'a>(
    fields: &[(&'static str, &'a Option<String>)],
) -> Vec<(&'static str, &'a str)> {
    fields
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
        .collect()
}
