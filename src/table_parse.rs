use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::error::ScrapeError;
use crate::model::{CitationRecord, DataTable, Output, RowKey};
use crate::options::{RowIndexMode, RowPolicy, ScrapeOptions};
use crate::table_locate::{LocatedTable, element_text};
use crate::warning::{ExtractWarning, WarningCode};

static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("hardcoded row selector is valid"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("hardcoded data cell selector is valid"));
static FOOTNOTE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("sup").expect("hardcoded footnote selector is valid"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("hardcoded link selector is valid"));

enum Footnote {
    Link(String),
    Unlinked,
}

fn find_footnote(cell: ElementRef<'_>) -> Option<Footnote> {
    let marker = cell.select(&FOOTNOTE).next()?;
    let href = marker
        .select(&LINK)
        .next()
        .and_then(|link| link.value().attr("href"));
    Some(href.map_or(Footnote::Unlinked, |href| Footnote::Link(href.to_string())))
}

pub(crate) fn resolve_source(href: &str, base_url: Option<&str>) -> String {
    match base_url {
        Some(base) => format!("{base}{href}"),
        None => href.to_string(),
    }
}

/// Applies the row policy; `None` means the row is dropped.
fn fit_row<'a>(
    mut cells: Vec<ElementRef<'a>>,
    width: usize,
    ordinal: usize,
    policy: RowPolicy,
    warnings: &mut Vec<ExtractWarning>,
) -> Result<Option<(Vec<ElementRef<'a>>, usize)>, ScrapeError> {
    let found = cells.len();
    if found == width {
        return Ok(Some((cells, 0)));
    }

    match policy {
        RowPolicy::Strict => Err(ScrapeError::RowColumnMismatch {
            row: ordinal,
            expected: width,
            found,
        }),
        RowPolicy::Skip => {
            warnings.push(
                ExtractWarning::new(
                    WarningCode::RowSkipped,
                    format!("skipping row with {found} cell(s); expected {width}"),
                )
                .with_row(ordinal),
            );
            Ok(None)
        }
        RowPolicy::Pad if found < width => {
            warnings.push(
                ExtractWarning::new(
                    WarningCode::RowPadded,
                    format!("padded row from {found} to {width} cell(s)"),
                )
                .with_row(ordinal),
            );
            Ok(Some((cells, width - found)))
        }
        RowPolicy::Pad => {
            cells.truncate(width);
            warnings.push(
                ExtractWarning::new(
                    WarningCode::RowTruncated,
                    format!("dropped {} trailing cell(s) beyond {width}", found - width),
                )
                .with_row(ordinal),
            );
            Ok(Some((cells, 0)))
        }
    }
}

/// Walks every row after the first and builds the data table, plus citations when enabled.
pub fn extract_rows(
    table: &LocatedTable<'_>,
    options: &ScrapeOptions,
    warnings: &mut Vec<ExtractWarning>,
) -> Result<Output, ScrapeError> {
    let headers = &table.headers;
    let width = headers.len();
    let base_url = options.citation_base_url.as_deref();

    let mut rows = Vec::new();
    let mut citations = Vec::new();

    for (index, row) in table.element.select(&ROW).skip(1).enumerate() {
        let ordinal = index + 1;
        let cells = row.select(&DATA_CELL).collect::<Vec<_>>();
        let Some((cells, padding)) =
            fit_row(cells, width, ordinal, options.row_policy, warnings)?
        else {
            continue;
        };

        let mut values = cells.iter().map(|cell| element_text(*cell)).collect::<Vec<_>>();

        if options.with_citation {
            for (column, cell) in cells.iter().enumerate() {
                match find_footnote(*cell) {
                    Some(Footnote::Link(href)) => {
                        // A citation on the first cell is keyed by that cell's own text.
                        let key = match options.row_index {
                            RowIndexMode::FirstColumn => RowKey::Label(values[0].clone()),
                            RowIndexMode::Ordinal => RowKey::Ordinal(ordinal),
                        };
                        citations.push(CitationRecord {
                            row: key,
                            column: headers[column].clone(),
                            data: values[column].clone(),
                            source: resolve_source(&href, base_url),
                        });
                    }
                    Some(Footnote::Unlinked) => warnings.push(
                        ExtractWarning::new(
                            WarningCode::FootnoteWithoutLink,
                            "superscript without a link; no citation recorded",
                        )
                        .with_row(ordinal)
                        .with_column(headers[column].clone()),
                    ),
                    None => {}
                }
            }
        }

        values.resize(values.len() + padding, String::new());
        tracing::debug!(row = ordinal, cells = values.len(), "extracted row");
        rows.push(values);
    }

    if rows.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::NoDataRows,
            "the selected table has no data rows",
        ));
    }

    let data = DataTable {
        headers: headers.clone(),
        rows,
    };

    if options.with_citation {
        Ok(Output::DataWithCitations { data, citations })
    } else {
        Ok(Output::DataOnly(data))
    }
}
