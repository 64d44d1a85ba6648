//! Delimited-text parser with delimiter detection.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::decode::{Encoding, decode};
use super::source::{DataTable, SourceMetadata};
use crate::error::{PrepError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b',', b'\t', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: Some(b','),
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Configuration that sniffs the delimiter from the first lines.
    pub fn auto_detect() -> Self {
        Self {
            delimiter: None,
            ..Self::default()
        }
    }
}

/// Parses uploaded delimited text into a [`DataTable`].
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| PrepError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let (table, metadata) = self.parse_bytes(&contents)?;
        Ok((table, metadata.with_path(path.to_path_buf())))
    }

    /// Decode and parse raw bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<(DataTable, SourceMetadata)> {
        if bytes.is_empty() {
            return Err(PrepError::Ingestion("The uploaded file is empty".to_string()));
        }

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (text, encoding) = decode(bytes);
        if encoding == Encoding::Latin1 {
            tracing::debug!("payload is not valid UTF-8, decoded as Latin-1");
        }

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&text)?,
        };

        let data_table = self.parse_text(&text, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            hash,
            bytes.len() as u64,
            format,
            encoding.as_str().to_string(),
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, metadata))
    }

    fn parse_text(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let headers = match records.next() {
            Some(record) => dedupe_headers(record?.iter()),
            None => return Err(PrepError::Ingestion("No columns found".to_string())),
        };
        if headers.is_empty() {
            return Err(PrepError::Ingestion("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for (row_idx, result) in records.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if record.len() > expected_cols {
                // Line numbers are 1-based and count the header.
                return Err(PrepError::Ingestion(format!(
                    "Expected {} fields in line {}, saw {}",
                    expected_cols,
                    row_idx + 2,
                    record.len()
                )));
            }

            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    if DataTable::is_null_value(cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            row.resize(expected_cols, None);
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(PrepError::Ingestion("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Name empty headers `Unnamed: i` and suffix repeats with `.1`, `.2`, ...
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();

    for (i, header) in raw.enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

/// Pick the delimiter whose header count is repeated by the most sample lines.
///
/// A survey header always splits, so delimiters absent from it are skipped.
/// Ties go to the larger field count, then to the earlier delimiter.
fn detect_delimiter(text: &str) -> Result<u8> {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();
    let Some((header, body)) = sample.split_first() else {
        return Err(PrepError::Ingestion("No lines to analyze".to_string()));
    };

    let mut best: Option<(u8, usize, usize)> = None;
    for &delim in DELIMITERS {
        let fields = count_delimiter_in_line(header, delim);
        if fields == 0 {
            continue;
        }
        let agreeing = body
            .iter()
            .filter(|line| count_delimiter_in_line(line, delim) == fields)
            .count();
        if best.is_none_or(|(_, a, f)| (agreeing, fields) > (a, f)) {
            best = Some((delim, agreeing, fields));
        }
    }

    Ok(best.map_or(b',', |(delim, _, _)| delim))
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let mut quoted = false;
    line.bytes()
        .filter(|&b| {
            if b == b'"' {
                quoted = !quoted;
            }
            b == delimiter && !quoted
        })
        .count()
}
