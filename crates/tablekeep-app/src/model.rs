// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::ids::{RowId, TableName};

pub const ID_COLUMN: &str = "id";

/// Text shown in an input for a JSON cell value.
///
/// Strings are shown verbatim, `null` as an empty input, and everything else
/// as its compact JSON form.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        _ => value.to_string(),
    }
}

/// One record, in the column order the backend sent it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }

    pub fn from_json(object: &Map<String, Value>) -> Self {
        Self::from_pairs(
            object
                .iter()
                .map(|(column, value)| (column.clone(), cell_text(value))),
        )
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<RowId> {
        self.get(ID_COLUMN).map(RowId::from)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(column, _)| column.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Decodes a `/list_tables` payload. Anything but an array is unusable.
pub fn table_names_from_payload(payload: &Value) -> Option<Vec<TableName>> {
    let entries = payload.as_array()?;
    Some(
        entries
            .iter()
            .map(|entry| TableName::new(cell_text(entry)))
            .collect(),
    )
}

/// Decodes a `/get_table_data` payload into a snapshot.
///
/// Returns `None` when the backend did not send an array (it reports query
/// failures as an `{"error": ..}` object). Array elements that are not
/// objects contribute an empty row.
pub fn rows_from_payload(payload: &Value) -> Option<Vec<Row>> {
    let entries = payload.as_array()?;
    Some(
        entries
            .iter()
            .map(|entry| match entry {
                Value::Object(object) => Row::from_json(object),
                _ => Row::default(),
            })
            .collect(),
    )
}

fn non_empty_field<'a>(reply: &'a Value, field: &str) -> Option<&'a Value> {
    reply.get(field).filter(|value| match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        Value::Bool(flag) => *flag,
        _ => true,
    })
}

/// The `status` of a mutation reply, else its `error`, else the raw reply.
pub fn reply_text(reply: &Value) -> String {
    non_empty_field(reply, "status")
        .or_else(|| non_empty_field(reply, "error"))
        .map(cell_text)
        .unwrap_or_else(|| raw_reply_text(reply))
}

pub fn raw_reply_text(reply: &Value) -> String {
    reply.to_string()
}

/// Outcome of a spreadsheet upload that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReply {
    pub success: bool,
    pub body: Value,
}

impl ImportReply {
    pub fn message(&self) -> String {
        self.field_text("message")
    }

    pub fn error(&self) -> String {
        self.field_text("error")
    }

    fn field_text(&self, field: &str) -> String {
        self.body.get(field).map(cell_text).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SpreadsheetUpload {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?
            .to_owned();
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        Ok(Self { file_name, bytes })
    }
}
