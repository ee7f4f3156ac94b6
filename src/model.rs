use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// The `row` field of a citation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
    /// Text of the row's first cell.
    Label(String),
    /// 1-based position of the row among the table's data rows.
    Ordinal(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Ordinal(ordinal) => write!(f, "{ordinal}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRecord {
    pub row: RowKey,
    pub column: String,
    pub data: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    DataOnly(DataTable),
    DataWithCitations {
        data: DataTable,
        citations: Vec<CitationRecord>,
    },
}

impl Output {
    #[must_use]
    pub fn data(&self) -> &DataTable {
        match self {
            Self::DataOnly(data) | Self::DataWithCitations { data, .. } => data,
        }
    }

    #[must_use]
    pub fn citations(&self) -> Option<&[CitationRecord]> {
        match self {
            Self::DataOnly(_) => None,
            Self::DataWithCitations { citations, .. } => Some(citations),
        }
    }
}
