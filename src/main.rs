use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

mod builder;
mod calendar;
mod error;
mod identity;
mod locator;
mod models;
mod project;
mod report;
mod schema;
mod sessions;
mod source;
mod stats;

use builder::RecordBuilder;
use identity::StaticIdentity;
use schema::{SchemaRevision, TableSchema};
use source::{CsvDirSource, SheetsClient, TableSource};

#[derive(Parser)]
#[command(name = "attendance-dashboard")]
#[command(about = "Student attendance dashboard over the cohort attendance sheet", long_about = None)]
struct Cli {
    /// Workbook layout revision
    #[arg(long, value_enum, default_value_t = SchemaRevision::Current, global = true)]
    schema: SchemaRevision,
    #[arg(long, value_enum, default_value_t = SourceKind::Sheets, global = true)]
    source: SourceKind,
    /// Directory of per-tab CSV exports, for `--source csv`
    #[arg(long, global = true)]
    csv_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    events_range: Option<String>,
    #[arg(long, global = true)]
    fireside_range: Option<String>,
    #[arg(long, global = true)]
    project_range: Option<String>,
    /// Link shown next to sessions the student missed
    #[arg(long, env = "RECORDING_URL", default_value = "", global = true)]
    recording_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    /// Google Sheets values API
    Sheets,
    /// Local CSV exports
    Csv,
}

#[derive(Args)]
struct Caller {
    /// Signed-in student's email; omitted means anonymous
    #[arg(long, env = "DASHBOARD_USER_EMAIL")]
    email: Option<String>,
    /// Display name to fall back on when the sheet row has none
    #[arg(long)]
    name_hint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard view as JSON
    Show {
        #[command(flatten)]
        caller: Caller,
    },
    /// Generate a markdown dashboard
    Report {
        #[command(flatten)]
        caller: Caller,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
}

fn open_source(kind: SourceKind, csv_dir: Option<PathBuf>) -> anyhow::Result<Box<dyn TableSource>> {
    match kind {
        SourceKind::Sheets => {
            let api_key = std::env::var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY must be set to read the attendance sheet")?;
            let sheet_id = std::env::var("GOOGLE_SHEETS_SHEET_ID")
                .context("GOOGLE_SHEETS_SHEET_ID must be set to read the attendance sheet")?;
            Ok(Box::new(SheetsClient::new(sheet_id, api_key)))
        }
        SourceKind::Csv => {
            let dir = csv_dir.context("--csv-dir is required with --source csv")?;
            if !dir.is_dir() {
                anyhow::bail!("{} is not a directory", dir.display());
            }
            Ok(Box::new(CsvDirSource::new(dir, "Sheet1")))
        }
    }
}

fn resolve_schema(cli: &Cli) -> TableSchema {
    let mut schema = TableSchema::for_revision(cli.schema);
    if let Some(range) = &cli.events_range {
        schema.events.range = range.clone();
    }
    if let (Some(layout), Some(range)) = (schema.fireside.as_mut(), &cli.fireside_range) {
        layout.range = range.clone();
    }
    if let (Some(layout), Some(range)) = (schema.project.as_mut(), &cli.project_range) {
        layout.range = range.clone();
    }
    schema
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let schema = resolve_schema(&cli);
    let source = open_source(cli.source, cli.csv_dir.clone())?;
    let builder = RecordBuilder::new(source.as_ref(), schema).with_recording_url(cli.recording_url.clone());

    match cli.command {
        Commands::Show { caller } => {
            let identity = StaticIdentity::new(caller.email, caller.name_hint);
            let view = builder.dashboard(&identity).await;
            let payload = serde_json::json!({
                "authenticated": view.is_authenticated(),
                "dashboard": view,
            });
            let json = serde_json::to_string_pretty(&payload).context("failed to encode dashboard")?;
            println!("{json}");
        }
        Commands::Report { caller, out } => {
            let identity = StaticIdentity::new(caller.email, caller.name_hint);
            let view = builder.dashboard(&identity).await;
            let report = report::build_report(&view, chrono::Local::now().date_naive());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
    }

    Ok(())
}
