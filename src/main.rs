use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use scholar_refs::cite::CitationStyle;
use scholar_refs::config::{find_config_file, load_config, Config};
use scholar_refs::export::{default_filename, write_workbook};
use scholar_refs::pipeline::{generate_references, ExportRequest, ReferenceList};
use scholar_refs::sources::GoogleScholarSource;
use scholar_refs::utils::{is_terminal, terminal_width, truncate_with_ellipsis};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scholar Refs - export the most recent publications from a Google Scholar profile
#[derive(Parser, Debug)]
#[command(name = "scholar-refs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export the most recent publications from a Google Scholar profile", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format for preview results
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text, one reference per line
    Plain,
}

/// Citation style
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Apa,
    Mla,
    Chicago,
    Harvard,
    Vancouver,
}

impl From<Style> for CitationStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Apa => CitationStyle::Apa,
            Style::Mla => CitationStyle::Mla,
            Style::Chicago => CitationStyle::Chicago,
            Style::Harvard => CitationStyle::Harvard,
            Style::Vancouver => CitationStyle::Vancouver,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch recent publications and export the references as a spreadsheet
    #[command(alias = "e")]
    Export {
        /// Google Scholar profile URL (must contain user=<id>)
        url: String,

        /// Number of most recent publications to keep
        #[arg(long, short = 'n', default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=20))]
        count: u8,

        /// Referencing style
        #[arg(long, short, value_enum, default_value_t = Style::Apa)]
        style: Style,

        /// Directory to write the workbook into (default: from config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print formatted references without writing a file
    #[command(alias = "p")]
    Preview {
        /// Google Scholar profile URL (must contain user=<id>)
        url: String,

        /// Number of most recent publications to keep
        #[arg(long, short = 'n', default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=20))]
        count: u8,

        /// Referencing style
        #[arg(long, short, value_enum, default_value_t = Style::Apa)]
        style: Style,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("scholar_refs={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(path) = &cli.config {
        load_config(path).with_context(|| format!("failed to load config {}", path.display()))?
    } else if let Some(path) = find_config_file() {
        tracing::info!("using config file: {}", path.display());
        load_config(&path).with_context(|| format!("failed to load config {}", path.display()))?
    } else {
        Config::default()
    };

    let source = GoogleScholarSource::with_config(&config.fetch)
        .context("failed to initialize the Google Scholar client")?;

    match cli.command {
        Commands::Export {
            url,
            count,
            style,
            output_dir,
        } => {
            let request = ExportRequest::new(url, count as usize, style.into());
            let list = fetch_references(&source, &request, &config, cli.quiet).await?;

            if list.is_empty() {
                print_empty_notice(cli.quiet);
                return Ok(());
            }

            let dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
            let path = dir.join(default_filename(list.style));
            write_workbook(&path, &list.rows)
                .with_context(|| format!("failed to write {}", path.display()))?;

            if !cli.quiet {
                println!(
                    "{} Exported {} references for {} to {}",
                    "✓".green(),
                    list.len(),
                    list.author.bold(),
                    path.display()
                );
            }
        }

        Commands::Preview { url, count, style } => {
            let request = ExportRequest::new(url, count as usize, style.into());
            let list = fetch_references(&source, &request, &config, cli.quiet).await?;

            if list.is_empty() {
                print_empty_notice(cli.quiet);
                return Ok(());
            }

            output_references(&list, cli.output)?;
        }
    }

    Ok(())
}

/// Run the pipeline with a spinner while the retrieval is in flight
async fn fetch_references(
    source: &GoogleScholarSource,
    request: &ExportRequest,
    config: &Config,
    quiet: bool,
) -> Result<ReferenceList> {
    let spinner = if !quiet && is_terminal() {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Fetching publications from Google Scholar...");
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let result = generate_references(source, request, &config.fetch).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(result?)
}

fn print_empty_notice(quiet: bool) {
    if !quiet {
        eprintln!(
            "{} No publications with a usable year were found; nothing to export.",
            "!".yellow()
        );
    }
}

fn output_references(list: &ReferenceList, format: OutputFormat) -> Result<()> {
    let format = match format {
        OutputFormat::Auto => {
            if is_terminal() {
                OutputFormat::Table
            } else {
                OutputFormat::Json
            }
        }
        other => other,
    };

    match format {
        OutputFormat::Table => {
            use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

            let width = terminal_width().saturating_sub(10).max(20);
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL_CONDENSED)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "#".to_string(),
                    format!("Reference ({} Style)", list.style),
                ]);

            for (i, row) in list.rows.iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    truncate_with_ellipsis(&row.reference, width),
                ]);
            }

            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&list.rows)?);
        }
        OutputFormat::Plain => {
            for row in &list.rows {
                println!("{}", row.reference);
            }
        }
        OutputFormat::Auto => unreachable!("auto resolved above"),
    }

    Ok(())
}
