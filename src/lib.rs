mod csv_out;
mod error;
mod fetch;
mod model;
mod options;
mod table_locate;
mod table_parse;
mod warning;

use std::path::PathBuf;

use scraper::Html;

use crate::csv_out::{write_citations_csv, write_data_csv};

pub use csv_out::{write_citations_csv_to_string, write_data_csv_to_string};
pub use error::ScrapeError;
pub use fetch::{fetch_and_parse, fetch_page, parse_document};
pub use model::{CitationRecord, DataTable, Output, RowKey};
pub use options::{
    DEFAULT_CITATION_PATH, DEFAULT_DATA_PATH, DEFAULT_USER_AGENT, RowIndexMode, RowPolicy,
    ScrapeOptions, StrictBool, TableSelector,
};
pub use table_locate::{LocatedTable, locate_table};
pub use table_parse::extract_rows;
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub output: Output,
    pub warnings: Vec<ExtractWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    pub row_count: usize,
    pub column_count: usize,
    pub citation_count: Option<usize>,
    pub data_path: PathBuf,
    pub citation_path: Option<PathBuf>,
    pub warnings: Vec<ExtractWarning>,
}

pub fn extract_from_document(
    document: &Html,
    options: &ScrapeOptions,
) -> Result<Extraction, ScrapeError> {
    let selector = options.selector()?;
    let table = locate_table(document, &selector)?;
    let mut warnings = Vec::new();
    let output = extract_rows(&table, options, &mut warnings)?;
    Ok(Extraction { output, warnings })
}

/// Locates and extracts the table from an HTML string without touching the network.
pub fn extract_from_html(html: &str, options: &ScrapeOptions) -> Result<Extraction, ScrapeError> {
    let document = parse_document(html)?;
    extract_from_document(&document, options)
}

/// Writes the data file and, for `DataWithCitations`, the citation file.
///
/// The data file is written first; if the citation write then fails, the
/// data file stays on disk and the error is returned.
pub fn write_output(
    output: &Output,
    options: &ScrapeOptions,
) -> Result<Option<PathBuf>, ScrapeError> {
    let with_index = !options.no_index;
    write_data_csv(
        &options.data_path,
        output.data(),
        options.delimiter,
        with_index,
    )?;

    match output.citations() {
        Some(citations) => {
            write_citations_csv(
                &options.citation_path,
                citations,
                options.delimiter,
                with_index,
            )?;
            Ok(Some(options.citation_path.clone()))
        }
        None => Ok(None),
    }
}

/// Fetches `url`, extracts the selected table and writes the CSV output.
pub fn scrape_table(url: &str, options: ScrapeOptions) -> Result<ScrapeReport, ScrapeError> {
    if !options.delimiter.is_ascii() {
        return Err(ScrapeError::InvalidOption(
            "delimiter must be a single ASCII character".to_string(),
        ));
    }
    // Fail on a missing selector before any network access.
    options.selector()?;

    let document = fetch_and_parse(url, &options.user_agent)?;
    let Extraction { output, warnings } = extract_from_document(&document, &options)?;
    let citation_path = write_output(&output, &options)?;

    tracing::info!(
        rows = output.data().row_count(),
        data_path = %options.data_path.display(),
        "table written"
    );

    Ok(ScrapeReport {
        row_count: output.data().row_count(),
        column_count: output.data().column_count(),
        citation_count: output.citations().map(<[CitationRecord]>::len),
        data_path: options.data_path,
        citation_path,
        warnings,
    })
}
