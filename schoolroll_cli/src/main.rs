mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use schoolroll_lib::Config;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "schoolroll")]
#[command(about = "Manage classes, teachers and students of a school backend")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base URL including /api (overrides SCHOOLROLL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, show, add, edit or delete classes
    Classes(commands::classes::ClassesArgs),
    /// List, show, add, edit or delete teachers
    Teachers(commands::teachers::TeachersArgs),
    /// Manage students and their class assignment
    Students(commands::students::StudentsArgs),
    /// Class and financial analytics
    Analytics(commands::analytics::AnalyticsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("schoolroll=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
    }
    tracing::debug!("Using backend at {}", config.base_url);
    let client = config.client();

    match &cli.command {
        Commands::Classes(args) => commands::classes::run(args, &client, &format).await?,
        Commands::Teachers(args) => commands::teachers::run(args, &client, &format).await?,
        Commands::Students(args) => commands::students::run(args, &client, &format).await?,
        Commands::Analytics(args) => commands::analytics::run(args, &client, &format).await?,
    }

    Ok(())
}
