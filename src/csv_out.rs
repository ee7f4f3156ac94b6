use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::error::ScrapeError;
use crate::model::{CitationRecord, DataTable};

const CITATION_HEADERS: [&str; 4] = ["row", "column", "data", "source"];

fn write_records<W: Write>(
    writer: &mut Writer<W>,
    headers: &[String],
    rows: impl Iterator<Item = Vec<String>>,
    with_index: bool,
) -> Result<(), ScrapeError> {
    let mut header = Vec::with_capacity(headers.len() + 1);
    if with_index {
        header.push(String::new());
    }
    header.extend(headers.iter().cloned());
    writer.write_record(&header)?;

    for (index, row) in rows.enumerate() {
        let mut record = Vec::with_capacity(row.len() + 1);
        if with_index {
            record.push(index.to_string());
        }
        record.extend(row);
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn citation_row(record: &CitationRecord) -> Vec<String> {
    vec![
        record.row.to_string(),
        record.column.clone(),
        record.data.clone(),
        record.source.clone(),
    ]
}

fn citation_headers() -> Vec<String> {
    CITATION_HEADERS.iter().map(|name| (*name).to_string()).collect()
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String, ScrapeError> {
    let bytes = writer
        .into_inner()
        .map_err(|error| ScrapeError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| ScrapeError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}

pub(crate) fn write_data_csv(
    path: &Path,
    table: &DataTable,
    delimiter: u8,
    with_index: bool,
) -> Result<(), ScrapeError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    write_records(
        &mut writer,
        &table.headers,
        table.rows.iter().cloned(),
        with_index,
    )
}

pub(crate) fn write_citations_csv(
    path: &Path,
    citations: &[CitationRecord],
    delimiter: u8,
    with_index: bool,
) -> Result<(), ScrapeError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    write_records(
        &mut writer,
        &citation_headers(),
        citations.iter().map(citation_row),
        with_index,
    )
}

pub fn write_data_csv_to_string(
    table: &DataTable,
    delimiter: u8,
    with_index: bool,
) -> Result<String, ScrapeError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    write_records(
        &mut writer,
        &table.headers,
        table.rows.iter().cloned(),
        with_index,
    )?;
    into_string(writer)
}

pub fn write_citations_csv_to_string(
    citations: &[CitationRecord],
    delimiter: u8,
    with_index: bool,
) -> Result<String, ScrapeError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    write_records(
        &mut writer,
        &citation_headers(),
        citations.iter().map(citation_row),
        with_index,
    )?;
    into_string(writer)
}
