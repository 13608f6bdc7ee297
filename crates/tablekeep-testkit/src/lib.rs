// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::path::PathBuf;
use tablekeep_app::{
    ImportReply, Notifier, Row, SpreadsheetUpload, TableName, TableService, cell_text,
};

/// Bytes of an `.xlsx` local-file header; enough for upload plumbing tests.
const XLSX_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    ListTables,
    CreateTable { table: String, columns: String },
    DeleteTable { table: String },
    FetchRows { table: String },
    UpdateRows { table: String, data: Value },
    DeleteRows { table: String, conditions: String },
    InsertRow { table: String, values: Value },
    AlterTable { table: String, alter_query: String },
    ImportSpreadsheet { file_name: String, size: usize },
}

/// In-memory stand-in for the remote table service.
///
/// Holds table payloads in insertion order, applies creates, drops, inserts
/// and `id = <n>` deletes to them, and records every request it receives.
#[derive(Debug, Clone)]
pub struct FakeTableService {
    tables: Vec<(String, Value)>,
    list_override: Option<Value>,
    reply: Value,
    import_reply: Option<ImportReply>,
    unreachable: Option<String>,
    requests: Vec<RecordedRequest>,
}

impl Default for FakeTableService {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            list_override: None,
            reply: json!({"status": "ok"}),
            import_reply: None,
            unreachable: None,
            requests: Vec::new(),
        }
    }
}

impl FakeTableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, rows: Value) -> Self {
        self.tables.push((name.to_owned(), rows));
        self
    }

    /// Makes `/list_tables` answer with `payload` instead of the table names.
    pub fn with_list_payload(mut self, payload: Value) -> Self {
        self.list_override = Some(payload);
        self
    }

    /// Reply body for every mutating call.
    pub fn with_reply(mut self, reply: Value) -> Self {
        self.reply = reply;
        self
    }

    pub fn with_import_reply(mut self, success: bool, body: Value) -> Self {
        self.import_reply = Some(ImportReply { success, body });
        self
    }

    /// Every call fails as if the host could not be reached.
    pub fn unreachable(mut self, message: &str) -> Self {
        self.unreachable = Some(message.to_owned());
        self
    }

    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<RecordedRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn rows(&self, table: &str) -> Option<&Value> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, rows)| rows)
    }

    fn record(&mut self, request: RecordedRequest) -> Result<()> {
        self.requests.push(request);
        if let Some(message) = &self.unreachable {
            bail!("{message}");
        }
        Ok(())
    }

    fn rows_mut(&mut self, table: &str) -> Option<&mut Vec<Value>> {
        self.tables
            .iter_mut()
            .find(|(name, _)| name == table)
            .and_then(|(_, rows)| rows.as_array_mut())
    }
}

impl TableService for FakeTableService {
    fn list_tables(&mut self) -> Result<Value> {
        self.record(RecordedRequest::ListTables)?;
        if let Some(payload) = &self.list_override {
            return Ok(payload.clone());
        }
        Ok(Value::Array(
            self.tables
                .iter()
                .map(|(name, _)| Value::String(name.clone()))
                .collect(),
        ))
    }

    fn create_table(&mut self, table: &TableName, columns: &str) -> Result<Value> {
        self.record(RecordedRequest::CreateTable {
            table: table.to_string(),
            columns: columns.to_owned(),
        })?;
        if self.rows(table.as_str()).is_none() {
            self.tables.push((table.to_string(), json!([])));
        }
        Ok(self.reply.clone())
    }

    fn delete_table(&mut self, table: &TableName) -> Result<Value> {
        self.record(RecordedRequest::DeleteTable {
            table: table.to_string(),
        })?;
        self.tables.retain(|(name, _)| name != table.as_str());
        Ok(self.reply.clone())
    }

    fn fetch_rows(&mut self, table: &TableName) -> Result<Value> {
        self.record(RecordedRequest::FetchRows {
            table: table.to_string(),
        })?;
        Ok(self
            .rows(table.as_str())
            .cloned()
            .unwrap_or_else(|| json!({"error": format!("no such table: {table}")})))
    }

    fn update_rows(&mut self, table: &TableName, rows: &[Row]) -> Result<Value> {
        let data = serde_json::to_value(rows).context("encode rows")?;
        self.record(RecordedRequest::UpdateRows {
            table: table.to_string(),
            data,
        })?;
        Ok(self.reply.clone())
    }

    fn delete_rows(&mut self, table: &TableName, conditions: &str) -> Result<Value> {
        self.record(RecordedRequest::DeleteRows {
            table: table.to_string(),
            conditions: conditions.to_owned(),
        })?;
        if let Some(target) = conditions.strip_prefix("id = ")
            && let Some(rows) = self.rows_mut(table.as_str())
        {
            rows.retain(|row| row.get("id").map(cell_text).as_deref() != Some(target));
        }
        Ok(self.reply.clone())
    }

    fn insert_row(&mut self, table: &TableName, values: &Row) -> Result<Value> {
        let values = serde_json::to_value(values).context("encode row")?;
        self.record(RecordedRequest::InsertRow {
            table: table.to_string(),
            values: values.clone(),
        })?;
        if let Some(rows) = self.rows_mut(table.as_str()) {
            rows.push(values);
        }
        Ok(self.reply.clone())
    }

    fn alter_table(&mut self, table: &TableName, alter_query: &str) -> Result<Value> {
        self.record(RecordedRequest::AlterTable {
            table: table.to_string(),
            alter_query: alter_query.to_owned(),
        })?;
        Ok(self.reply.clone())
    }

    fn import_spreadsheet(&mut self, upload: &SpreadsheetUpload) -> Result<ImportReply> {
        self.record(RecordedRequest::ImportSpreadsheet {
            file_name: upload.file_name.clone(),
            size: upload.bytes.len(),
        })?;
        Ok(self.import_reply.clone().unwrap_or_else(|| ImportReply {
            success: true,
            body: json!({"message": format!("Imported {}", upload.file_name)}),
        }))
    }
}

/// Notifier with queued confirmation answers that records what it was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNotifier {
    answers: VecDeque<bool>,
    pub prompts: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Notifier for ScriptedNotifier {
    /// Unscripted prompts are declined.
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }
}

pub fn two_row_table() -> Value {
    json!([{"id": 1, "a": "x"}, {"id": 2, "a": "y"}])
}

/// Writes a small `.xlsx`-named file and returns it with its directory guard.
pub fn spreadsheet_fixture(name: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create fixture dir")?;
    let path = dir.path().join(name);
    let mut bytes = XLSX_MAGIC.to_vec();
    bytes.extend_from_slice(b"tablekeep fixture");
    std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}
