//! Parameter normalization.
//!
//! Callers hand over loosely formatted values; the API accepts exactly one
//! format per semantic type. Every parameter is tagged with its type so the
//! dispatcher can coerce it before anything is sent.

use serde_json::{Map, Value};

use crate::error::Result;

pub mod date;
pub mod document;

pub use date::{normalize_date, DateLike};
pub use document::{normalize_document_number, normalize_postal_code};

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// CPF / CNPJ
    Document(String),
    /// CEP
    PostalCode(String),
    Date(DateLike),
    /// passed through unchanged
    Text(String),
    Integer(i64),
}

impl ParamValue {
    /// Wire form of the value. Strings stay strings, integers stay numbers.
    pub fn normalize(&self) -> Result<Value> {
        Ok(match self {
            ParamValue::Document(v) => Value::String(normalize_document_number(v)?),
            ParamValue::PostalCode(v) => Value::String(normalize_postal_code(v)?),
            ParamValue::Date(v) => Value::String(normalize_date(v.clone())?),
            ParamValue::Text(v) => Value::String(v.clone()),
            ParamValue::Integer(v) => Value::from(*v),
        })
    }
}

/// Ordered named parameters, as they will appear on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, name: &str, value: ParamValue) -> Self {
        self.entries.push((name.to_string(), value));
        self
    }

    pub fn document(self, name: &str, value: &str) -> Self {
        self.push(name, ParamValue::Document(value.to_string()))
    }

    pub fn postal_code(self, name: &str, value: &str) -> Self {
        self.push(name, ParamValue::PostalCode(value.to_string()))
    }

    pub fn date(self, name: &str, value: impl Into<DateLike>) -> Self {
        self.push(name, ParamValue::Date(value.into()))
    }

    pub fn text(self, name: &str, value: impl Into<String>) -> Self {
        self.push(name, ParamValue::Text(value.into()))
    }

    pub fn integer(self, name: &str, value: i64) -> Self {
        self.push(name, ParamValue::Integer(value))
    }

    pub fn optional_text(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.entries.iter()
    }

    /// Query-string pairs. Fails on the first value that does not normalize.
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        self.entries
            .iter()
            .map(|(name, value)| {
                let rendered = match value.normalize()? {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Ok((name.clone(), rendered))
            })
            .collect()
    }

    /// JSON object body.
    pub fn to_json(&self) -> Result<Value> {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.normalize()?);
        }
        Ok(Value::Object(map))
    }
}
