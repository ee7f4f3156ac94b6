use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ScrapeError;

pub const DEFAULT_DATA_PATH: &str = "data.csv";
pub const DEFAULT_CITATION_PATH: &str = "citation.csv";
pub const DEFAULT_USER_AGENT: &str = concat!("table2csv/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector {
    ById(String),
    ByClass(String),
}

impl TableSelector {
    /// Builds a selector from the optional id and class; the id wins when both are set.
    pub fn from_parts(
        table_id: Option<&str>,
        table_class: Option<&str>,
    ) -> Result<Self, ScrapeError> {
        let table_id = table_id.map(str::trim).filter(|value| !value.is_empty());
        let table_class = table_class.map(str::trim).filter(|value| !value.is_empty());

        match (table_id, table_class) {
            (Some(id), Some(class)) => {
                tracing::warn!(id, class, "both table id and class given; using the id");
                Ok(Self::ById(id.to_string()))
            }
            (Some(id), None) => Ok(Self::ById(id.to_string())),
            (None, Some(class)) => Ok(Self::ByClass(class.to_string())),
            (None, None) => Err(ScrapeError::SelectorMissing),
        }
    }
}

impl fmt::Display for TableSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "id '{id}'"),
            Self::ByClass(class) => write!(f, "class '{class}'"),
        }
    }
}

/// What a citation record uses as its `row` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIndexMode {
    FirstColumn,
    Ordinal,
}

impl FromStr for RowIndexMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first-column" | "first_column" => Ok(Self::FirstColumn),
            "ordinal" => Ok(Self::Ordinal),
            other => Err(format!(
                "invalid row index mode '{other}', expected first-column or ordinal"
            )),
        }
    }
}

/// How rows whose cell count differs from the header count are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    Strict,
    Pad,
    Skip,
}

impl FromStr for RowPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "pad" => Ok(Self::Pad),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "invalid row policy '{other}', expected strict, pad or skip"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictBool(pub bool);

impl FromStr for StrictBool {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(Self(true)),
            "false" | "no" | "0" | "off" => Ok(Self(false)),
            _ => Err(format!(
                "invalid boolean '{value}', expected true/false, yes/no, 1/0 or on/off"
            )),
        }
    }
}

impl From<StrictBool> for bool {
    fn from(value: StrictBool) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub table_id: Option<String>,
    pub table_class: Option<String>,
    pub with_citation: bool,
    pub citation_base_url: Option<String>,
    pub row_index: RowIndexMode,
    pub row_policy: RowPolicy,
    pub delimiter: u8,
    pub no_index: bool,
    pub data_path: PathBuf,
    pub citation_path: PathBuf,
    pub user_agent: String,
}

impl ScrapeOptions {
    pub fn selector(&self) -> Result<TableSelector, ScrapeError> {
        TableSelector::from_parts(self.table_id.as_deref(), self.table_class.as_deref())
    }
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            table_id: None,
            table_class: None,
            with_citation: false,
            citation_base_url: None,
            row_index: RowIndexMode::FirstColumn,
            row_policy: RowPolicy::Strict,
            delimiter: b',',
            no_index: false,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            citation_path: PathBuf::from(DEFAULT_CITATION_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RowIndexMode, RowPolicy, ScrapeOptions, StrictBool, TableSelector};
    use crate::error::ScrapeError;
    use std::str::FromStr;

    #[test]
    fn missing_selector_is_an_error() {
        let err = TableSelector::from_parts(None, None).expect_err("no selector should fail");
        assert!(matches!(err, ScrapeError::SelectorMissing));

        let blank = TableSelector::from_parts(Some("  "), Some(""));
        assert!(matches!(blank, Err(ScrapeError::SelectorMissing)));
    }

    #[test]
    fn id_takes_precedence_over_class() {
        let selector =
            TableSelector::from_parts(Some("stats"), Some("wikitable")).expect("should resolve");
        assert_eq!(selector, TableSelector::ById("stats".to_string()));

        let selector = TableSelector::from_parts(None, Some("wikitable")).expect("should resolve");
        assert_eq!(selector, TableSelector::ByClass("wikitable".to_string()));
    }

    #[test]
    fn strict_bool_rejects_ambiguous_input() {
        assert_eq!(StrictBool::from_str("False"), Ok(StrictBool(false)));
        assert_eq!(StrictBool::from_str("TRUE"), Ok(StrictBool(true)));
        assert_eq!(StrictBool::from_str("0"), Ok(StrictBool(false)));
        assert!(StrictBool::from_str("maybe").is_err());
        assert!(StrictBool::from_str("").is_err());
        assert!(StrictBool::from_str("f").is_err());
    }

    #[test]
    fn parses_modes() {
        assert_eq!(
            RowIndexMode::from_str("first-column"),
            Ok(RowIndexMode::FirstColumn)
        );
        assert_eq!(RowIndexMode::from_str("Ordinal"), Ok(RowIndexMode::Ordinal));
        assert_eq!(RowPolicy::from_str("pad"), Ok(RowPolicy::Pad));
        let err = RowPolicy::from_str("loose").expect_err("unknown policy should fail");
        assert!(err.contains("invalid row policy"));
    }

    #[test]
    fn library_defaults() {
        let options = ScrapeOptions::default();
        assert_eq!(options.data_path.to_str(), Some("data.csv"));
        assert_eq!(options.citation_path.to_str(), Some("citation.csv"));
        assert_eq!(options.row_index, RowIndexMode::FirstColumn);
        assert_eq!(options.row_policy, RowPolicy::Strict);
        assert!(!options.with_citation);
    }
}
