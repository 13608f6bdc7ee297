// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use serde_json::Value;

use crate::{ImportReply, Row, SpreadsheetUpload, TableName};

/// Request/response access to the remote table service.
///
/// Calls return the decoded JSON reply whatever its shape; interpreting it is
/// the synchronizer's job. `Err` means the request never produced a JSON
/// reply (unreachable host, timeout, non-JSON body).
pub trait TableService {
    fn list_tables(&mut self) -> Result<Value>;
    fn create_table(&mut self, table: &TableName, columns: &str) -> Result<Value>;
    fn delete_table(&mut self, table: &TableName) -> Result<Value>;
    fn fetch_rows(&mut self, table: &TableName) -> Result<Value>;
    fn update_rows(&mut self, table: &TableName, rows: &[Row]) -> Result<Value>;
    fn delete_rows(&mut self, table: &TableName, conditions: &str) -> Result<Value>;
    fn insert_row(&mut self, table: &TableName, values: &Row) -> Result<Value>;
    fn alter_table(&mut self, table: &TableName, alter_query: &str) -> Result<Value>;
    fn import_spreadsheet(&mut self, upload: &SpreadsheetUpload) -> Result<ImportReply>;
}

/// Blocking confirmation and acknowledgement dialogs.
pub trait Notifier {
    fn confirm(&mut self, prompt: &str) -> bool;
    fn notify(&mut self, message: &str);
}

impl<T: TableService + ?Sized> TableService for &mut T {
    fn list_tables(&mut self) -> Result<Value> {
        (**self).list_tables()
    }

    fn create_table(&mut self, table: &TableName, columns: &str) -> Result<Value> {
        (**self).create_table(table, columns)
    }

    fn delete_table(&mut self, table: &TableName) -> Result<Value> {
        (**self).delete_table(table)
    }

    fn fetch_rows(&mut self, table: &TableName) -> Result<Value> {
        (**self).fetch_rows(table)
    }

    fn update_rows(&mut self, table: &TableName, rows: &[Row]) -> Result<Value> {
        (**self).update_rows(table, rows)
    }

    fn delete_rows(&mut self, table: &TableName, conditions: &str) -> Result<Value> {
        (**self).delete_rows(table, conditions)
    }

    fn insert_row(&mut self, table: &TableName, values: &Row) -> Result<Value> {
        (**self).insert_row(table, values)
    }

    fn alter_table(&mut self, table: &TableName, alter_query: &str) -> Result<Value> {
        (**self).alter_table(table, alter_query)
    }

    fn import_spreadsheet(&mut self, upload: &SpreadsheetUpload) -> Result<ImportReply> {
        (**self).import_spreadsheet(upload)
    }
}
