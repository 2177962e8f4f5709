//! Delimited embedding text reader
//!
//! One point per record, one coordinate per column, parsed with `csv` so
//! quoted fields from spreadsheet or R exports are accepted. Lines starting
//! with `#` are comments. Without an explicit delimiter the first data line
//! decides: comma, then tab, then whitespace. Whitespace-delimited input
//! treats any run of spaces and tabs as one separator.

use super::models::Embedding;
use crate::errors::{GraphError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbeddingFormat {
    pub delimiter: Option<u8>,
    /// Skip the first non-comment record
    pub has_header: bool,
}

impl EmbeddingFormat {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

fn sniff_delimiter(input: &[u8]) -> u8 {
    let first = input
        .split(|&b| b == b'\n')
        .map(|line| line.trim_ascii())
        .find(|line| !line.is_empty() && !line.starts_with(b"#"))
        .unwrap_or_default();
    if first.contains(&b',') {
        b','
    } else if first.contains(&b'\t') {
        b'\t'
    } else {
        b' '
    }
}

pub fn read_embedding<R: Read>(mut reader: R, format: EmbeddingFormat) -> Result<Embedding> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let delimiter = format
        .delimiter
        .unwrap_or_else(|| sniff_delimiter(&input));
    let collapse = delimiter.is_ascii_whitespace();

    // Column counts are checked below so ragged rows report their own line
    let mut records = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(format.has_header)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_slice());

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for record in records.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        let fields: Vec<&str> = if collapse {
            record.iter().flat_map(str::split_whitespace).collect()
        } else {
            record.iter().collect()
        };
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        let row = fields
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<f64>().map_err(|_| {
                    GraphError::parse(
                        line,
                        format!("column {}: '{}' is not a number", col + 1, field),
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(GraphError::parse(
                    line,
                    format!("expected {} columns, found {}", first.len(), row.len()),
                ));
            }
        }
        rows.push(row);
    }

    debug!(points = rows.len(), delimiter = ?(delimiter as char), "read embedding rows");
    Embedding::from_rows(&rows)
}

pub fn read_embedding_file(path: impl AsRef<Path>, format: EmbeddingFormat) -> Result<Embedding> {
    let file = File::open(path.as_ref())?;
    read_embedding(BufReader::new(file), format)
}
