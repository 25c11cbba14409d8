//! Delimited-text parser for the inventory and pricing feeds.
//!
//! The format is a naive comma split: no quoting, no escaped
//! delimiters, no embedded line breaks. A cell that contains a comma
//! shifts every later column of its row.
//!
//! RULE: parsing never fails. Short rows are padded with empty
//! strings, long rows are truncated to the header width, and blank
//! lines produce no record. Bad numbers are left for the coercion
//! step in `record`.

use crate::types::ColumnName;
use std::collections::HashMap;

pub const DELIMITER: char = ',';
const DELIMITER_STR: &str = ",";

/// One parsed data row, keyed by header token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    columns: Vec<ColumnName>,
    values:  HashMap<ColumnName, String>,
}

impl Record {
    /// Pair header tokens with row cells by position.
    fn from_cells(headers: &[ColumnName], cells: &[&str]) -> Self {
        let mut values = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = cells.get(i).map(|c| c.trim()).unwrap_or_default();
            values.insert(header.clone(), value.to_string());
        }
        Self {
            columns: headers.to_vec(),
            values,
        }
    }

    /// Build a record directly from (column, value) pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<ColumnName>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (k, v) in pairs {
            let key: ColumnName = k.into();
            if !record.values.contains_key(&key) {
                record.columns.push(key.clone());
            }
            record.values.insert(key, v.into());
        }
        record
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Header order of the source feed.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Re-join the values in header order.
    pub fn to_line(&self) -> String {
        self.columns
            .iter()
            .map(|c| self.get(c).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(DELIMITER_STR)
    }
}

/// Parse a whole feed body into records, preserving line order.
pub fn parse(text: &str) -> Vec<Record> {
    let mut lines = text.split('\n');

    let headers: Vec<ColumnName> = match lines.next() {
        Some(line) if !line.trim().is_empty() => {
            line.split(DELIMITER).map(|h| h.trim().to_string()).collect()
        }
        _ => return Vec::new(),
    };

    let records: Vec<Record> = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let cells: Vec<&str> = line.split(DELIMITER).collect();
            Record::from_cells(&headers, &cells)
        })
        .collect();

    log::debug!(
        "parser: {} columns, {} records",
        headers.len(),
        records.len()
    );
    records
}

/// Render records back to delimited text with the given header.
pub fn render(headers: &[ColumnName], records: &[Record]) -> String {
    let mut out = headers.join(DELIMITER_STR);
    out.push('\n');
    for record in records {
        let line = headers
            .iter()
            .map(|h| record.get(h).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(DELIMITER_STR);
        out.push_str(&line);
        out.push('\n');
    }
    out
}
