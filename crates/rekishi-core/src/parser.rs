//! Comma-separated dataset parser.
//!
//! The format is deliberately simple: one header line, one record per line,
//! fields split on `,` with surrounding whitespace trimmed. There is no quoting,
//! so a value containing a comma shifts its row and is reported as malformed.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::model::{Dataset, Record, REQUIRED_COLUMNS};

/// Field delimiter.
pub const DELIMITER: char = ',';

/// What to do with a data line whose field count differs from the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Fail the whole parse on the first malformed row.
    #[default]
    Strict,
    /// Drop malformed rows, keep going and report them.
    Skip,
}

/// A data line dropped under [`RowPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source text.
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

/// Untyped parse result: header names and one map per data row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
    pub skipped: Vec<SkippedRow>,
}

/// A dataset together with the rows that were dropped while building it.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedRow>,
}

/// Split raw text into a header row and keyed data rows.
pub fn parse_table(text: &str, policy: RowPolicy) -> Result<Table, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    // Keep reported line numbers relative to the untrimmed input.
    let leading = &text[..text.len() - text.trim_start().len()];
    let line_offset = leading.matches('\n').count();

    let mut lines = trimmed.lines().enumerate();
    let mut headers: Vec<String> = match lines.next() {
        Some((_, header)) => split_fields(header),
        None => return Err(ParseError::EmptyInput),
    };

    // Spreadsheet exports pad the header with empty cells; rows are padded to match.
    let mut padding = 0;
    while headers.last().is_some_and(|h| h.is_empty()) {
        headers.pop();
        padding += 1;
    }
    if headers.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(ParseError::DuplicateHeader(header.clone()));
        }
    }

    let mut rows: Vec<BTreeMap<String, String>> = Vec::new();
    let mut skipped = Vec::new();

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let mut values = split_fields(line);
        let line_no = line_offset + idx + 1;

        if padding > 0
            && values.len() > headers.len()
            && values.len() <= headers.len() + padding
            && values[headers.len()..].iter().all(|v| v.is_empty())
        {
            values.truncate(headers.len());
        }

        if values.len() != headers.len() {
            match policy {
                RowPolicy::Strict => {
                    return Err(ParseError::MalformedRow {
                        line: line_no,
                        expected: headers.len(),
                        found: values.len(),
                    });
                }
                RowPolicy::Skip => {
                    tracing::warn!(
                        line = line_no,
                        expected = headers.len(),
                        found = values.len(),
                        "skipping malformed row"
                    );
                    skipped.push(SkippedRow {
                        line: line_no,
                        expected: headers.len(),
                        found: values.len(),
                    });
                    continue;
                }
            }
        }

        rows.push(headers.iter().cloned().zip(values).collect());
    }

    Ok(Table {
        headers,
        rows,
        skipped,
    })
}

/// Parse raw text into a [`Dataset`], checking the required columns.
pub fn parse_dataset(text: &str, policy: RowPolicy) -> Result<ParsedDataset, ParseError> {
    let table = parse_table(text, policy)?;

    for column in REQUIRED_COLUMNS {
        if !table.headers.iter().any(|h| h == column) {
            return Err(ParseError::MissingColumn(column.to_string()));
        }
    }

    let records = table.rows.into_iter().map(into_record).collect();

    Ok(ParsedDataset {
        dataset: Dataset::new(table.headers, records),
        skipped: table.skipped,
    })
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(|f| f.trim().to_string()).collect()
}

/// Callers guarantee every required column is present in `row`.
fn into_record(mut row: BTreeMap<String, String>) -> Record {
    let mut take = |column: &str| row.remove(column).unwrap_or_default();
    let person = take("person");
    let year = take("year");
    let event = take("event");
    let relation = take("relation");
    let era = take("era");

    Record {
        person,
        year,
        event,
        relation,
        era,
        extra: row,
    }
}
