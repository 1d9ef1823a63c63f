//! Tabular results.
//!
//! Rows come from a JSON mapping (one row) or a list of mappings. Columns are
//! the union of observed keys in first-seen order; absent cells are `null`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

pub mod display;
pub mod shape;

pub use shape::TableShape;

/// Column name used for list entries that are not mappings.
pub const SCALAR_COLUMN: &str = "value";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table that still knows its columns.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(records: Vec<Map<String, Value>>) -> Self {
        let mut table = Table::new();
        for record in records {
            table.push_record(record);
        }
        table
    }

    /// Mapping → one row, list → one row per entry, null → empty table.
    pub fn from_json(payload: &Value) -> Result<Self> {
        match payload {
            Value::Null => Ok(Table::new()),
            Value::Object(map) => Ok(Table::from_rows(vec![map.clone()])),
            Value::Array(items) => Ok(Table::from_rows(items.iter().map(as_record).collect())),
            other => Err(ApiError::InvalidResponse(format!(
                "expected a JSON object or array, got {other}"
            ))),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Sets `name` to `value` on every row, adding the column if needed.
    pub fn insert_column(&mut self, name: &str, value: Value) {
        match self.column_index(name) {
            Some(idx) => self.rows.iter_mut().for_each(|r| r[idx] = value.clone()),
            None => {
                self.columns.push(name.to_string());
                self.rows.iter_mut().for_each(|r| r.push(value.clone()));
            }
        }
    }

    /// Renames column `from` to `to`. Does nothing when `from` is absent or
    /// `to` already names another column.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if self.column_index(to).is_some() {
            return;
        }
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
    }

    /// One row per element of every list cell in `name`; empty lists keep a `null` row.
    pub fn explode(&mut self, name: &str) {
        let Some(idx) = self.column_index(name) else {
            return;
        };
        let rows = std::mem::take(&mut self.rows);
        for row in rows {
            match row[idx].clone() {
                Value::Array(items) if items.is_empty() => {
                    let mut single = row;
                    single[idx] = Value::Null;
                    self.rows.push(single);
                }
                Value::Array(items) => {
                    for item in items {
                        let mut expanded = row.clone();
                        expanded[idx] = item;
                        self.rows.push(expanded);
                    }
                }
                _ => self.rows.push(row),
            }
        }
    }

    /// Rows as mappings again, columns in table order.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    fn push_record(&mut self, record: Map<String, Value>) {
        let mut row = vec![Value::Null; self.columns.len()];
        for (key, value) in record {
            match self.column_index(&key) {
                Some(idx) => row[idx] = value,
                None => {
                    self.columns.push(key);
                    self.rows.iter_mut().for_each(|r| r.push(Value::Null));
                    row.push(value);
                }
            }
        }
        self.rows.push(row);
    }
}

fn as_record(item: &Value) -> Map<String, Value> {
    match item {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert(SCALAR_COLUMN.to_string(), other.clone());
            map
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    values: impl Iterator<Item = &'a String>,
    widths: &[usize],
) -> fmt::Result {
    let padded: Vec<String> = values
        .zip(widths)
        .map(|(v, w)| format!("{v:<w$}", w = *w))
        .collect();
    writeln!(f, "{}", padded.join("  ").trim_end())
}

/// Aligned plain-text rendering.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(empty)");
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(cell_text).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_line(f, self.columns.iter(), &widths)?;
        for row in &cells {
            write_line(f, row.iter(), &widths)?;
        }
        Ok(())
    }
}
