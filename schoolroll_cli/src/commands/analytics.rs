//! The `analytics` subcommand: per-class breakdown and school-wide financials.

use anyhow::{bail, Result};
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};
use schoolroll_lib::{year_options, ClassAnalyticsView, Client, FinancialPeriod, FinancialView};

use super::with_banner;
use crate::output::{print_class_analytics, print_financials, OutputFormat};

#[derive(Args)]
pub struct AnalyticsArgs {
    #[command(subcommand)]
    pub command: AnalyticsCommand,
}

#[derive(Subcommand)]
pub enum AnalyticsCommand {
    /// Class summary with student gender distribution
    Class { id: String },
    /// Salary expense and fee income for a month or a year
    Financials(FinancialArgs),
}

#[derive(Args)]
pub struct FinancialArgs {
    /// monthly or yearly
    #[arg(long, default_value = "monthly")]
    pub view: FinancialPeriod,

    /// Year, 2020 through the current year (default: current)
    #[arg(long)]
    pub year: Option<i32>,

    /// Month number 1-12 (default: current)
    #[arg(long)]
    pub month: Option<u32>,
}

pub async fn run(args: &AnalyticsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        AnalyticsCommand::Class { id } => {
            let mut view = ClassAnalyticsView::new(client.clone(), id);
            if let Err(e) = view.load().await {
                return Err(with_banner(view.error(), e));
            }
            match view.data() {
                Some(data) => print_class_analytics(data, &view.gender_series(), format),
                None => bail!("no analytics returned for class {}", id),
            }
        }
        AnalyticsCommand::Financials(fin) => {
            let today = Local::now().date_naive();
            let mut view = FinancialView::new(client.clone(), today);

            let year = fin.year.unwrap_or(view.year());
            if !year_options(today.year()).contains(&year) {
                bail!(
                    "--year must be between 2020 and {}, got {}",
                    today.year(),
                    year
                );
            }
            view.select(fin.view, year, fin.month.unwrap_or(view.month()))?;

            if let Err(e) = view.fetch().await {
                return Err(with_banner(view.error(), e));
            }
            match view.summary() {
                Some(summary) => print_financials(&view.query(), summary, format),
                None => bail!("no financial summary returned"),
            }
        }
    }
}
