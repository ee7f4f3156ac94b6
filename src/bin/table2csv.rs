use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use table2csv::{
    DEFAULT_USER_AGENT, RowIndexMode, RowPolicy, ScrapeOptions, ScrapeReport, StrictBool,
    scrape_table,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "table2csv",
    version,
    about = "Scrape one HTML table (and its footnote citations) into CSV"
)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .args(["table_id", "table_class"])
))]
struct Cli {
    /// URL of the page holding the table.
    url: String,

    /// Select the first table with this id attribute.
    #[arg(long)]
    table_id: Option<String>,

    /// Select the first table carrying this class (all listed classes must match).
    #[arg(long)]
    table_class: Option<String>,

    /// Also collect footnote citations: bare flag, or --with-citation=<true/false, yes/no, 1/0, on/off>.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true"
    )]
    with_citation: StrictBool,

    /// Prefix joined to each citation link, e.g. https://en.wikipedia.org.
    #[arg(long)]
    citation_base_url: Option<String>,

    /// Where to write the table data.
    #[arg(long, default_value = "data.csv")]
    data_filepath: PathBuf,

    /// Where to write the citations.
    #[arg(long, default_value = "citations.csv")]
    citation_filepath: PathBuf,

    /// Citation row key: the row's first cell (first-column) or its 1-based position (ordinal).
    #[arg(long, default_value = "first-column")]
    row_index: RowIndexMode,

    /// Rows whose cell count differs from the header count: strict, pad or skip.
    #[arg(long, default_value = "strict")]
    row_policy: RowPolicy,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Drop the leading index column from both files.
    #[arg(long)]
    no_index: bool,

    /// User-Agent header sent with the request.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn build_options(cli: &Cli) -> Result<ScrapeOptions> {
    if !cli.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(ScrapeOptions {
        table_id: cli.table_id.clone(),
        table_class: cli.table_class.clone(),
        with_citation: cli.with_citation.into(),
        citation_base_url: cli.citation_base_url.clone(),
        row_index: cli.row_index,
        row_policy: cli.row_policy,
        delimiter: cli.delimiter as u8,
        no_index: cli.no_index,
        data_path: cli.data_filepath.clone(),
        citation_path: cli.citation_filepath.clone(),
        user_agent: cli.user_agent.clone(),
    })
}

fn log_report(report: &ScrapeReport, verbose: bool) {
    if verbose {
        eprintln!(
            "wrote {} row(s) x {} column(s) to {}",
            report.row_count,
            report.column_count,
            report.data_path.display()
        );
        if let (Some(count), Some(path)) = (report.citation_count, &report.citation_path) {
            eprintln!("wrote {count} citation(s) to {}", path.display());
        }
    }

    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} row={:?} column={:?}: {}",
                warning.code, warning.row, warning.column, warning.message
            );
        }
    }
}

fn run(cli: &Cli) -> Result<ScrapeReport> {
    let options = build_options(cli)?;
    scrape_table(&cli.url, options)
        .with_context(|| format!("failed to scrape table from '{}'", cli.url))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "table2csv=info"
    } else {
        "table2csv=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(&cli) {
        Ok(report) => {
            log_report(&report, cli.verbose);
            if report.row_count > 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
