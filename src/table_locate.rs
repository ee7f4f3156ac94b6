use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::options::TableSelector;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("hardcoded table selector is valid"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("hardcoded header cell selector is valid"));

#[derive(Debug, Clone)]
pub struct LocatedTable<'a> {
    pub element: ElementRef<'a>,
    pub headers: Vec<String>,
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn matches_selector(table: ElementRef<'_>, selector: &TableSelector) -> bool {
    match selector {
        TableSelector::ById(id) => table.value().id() == Some(id.as_str()),
        TableSelector::ByClass(class) => {
            let mut tokens = class.split_whitespace().peekable();
            tokens.peek().is_some()
                && tokens.all(|token| table.value().classes().any(|name| name == token))
        }
    }
}

/// Every `th` inside the table, in document order, regardless of which row holds it.
pub(crate) fn collect_headers(table: ElementRef<'_>) -> Vec<String> {
    table.select(&HEADER_CELL).map(element_text).collect()
}

pub fn locate_table<'a>(
    document: &'a Html,
    selector: &TableSelector,
) -> Result<LocatedTable<'a>, ScrapeError> {
    let element = document
        .select(&TABLE)
        .find(|table| matches_selector(*table, selector))
        .ok_or_else(|| ScrapeError::TableNotFound {
            selector: selector.to_string(),
        })?;

    let headers = collect_headers(element);
    tracing::debug!("located table by {selector} with {} header(s)", headers.len());

    Ok(LocatedTable { element, headers })
}
