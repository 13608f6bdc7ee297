// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Keeps the rendered view in step with the remote table service.
//!
//! Every operation runs to completion against the service and then rewrites
//! the relevant part of [`ViewState`]. Nothing is cached between operations:
//! the table list and the editor snapshot are re-fetched whole after every
//! mutation that affects them. Failures are rendered or reported through the
//! [`Notifier`], never returned.

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::{
    EditorBody, EditorGrid, EditorState, ImportStatus, Notifier, Panel, Row, RowId,
    SpreadsheetUpload, TableListing, TableName, TableService, ViewCommand, ViewState,
    raw_reply_text, reply_text, rows_from_payload, table_names_from_payload,
};

pub struct ViewSynchronizer<S> {
    service: S,
}

impl<S: TableService> ViewSynchronizer<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }

    pub fn load_table_list(&mut self, view: &mut ViewState) {
        let listing = match self.service.list_tables() {
            Ok(payload) => match table_names_from_payload(&payload) {
                Some(tables) => {
                    debug!(count = tables.len(), "loaded table list");
                    TableListing::Tables(tables)
                }
                None => {
                    warn!(payload = %payload, "table list payload is not an array");
                    TableListing::Failed
                }
            },
            Err(error) => {
                warn!(error = %format!("{error:#}"), "table list request failed");
                TableListing::Failed
            }
        };
        view.set_listing(listing, OffsetDateTime::now_utc());
    }

    pub fn open_table_editor(&mut self, view: &mut ViewState, table: &TableName) {
        // Reloading the same table keeps the cursor near where it was.
        let previous_cursor = view
            .editor()
            .filter(|editor| &editor.table == table)
            .map(|editor| editor.cursor);
        view.panel = Panel::Editor(EditorState::new(table.clone(), EditorBody::NoData));

        let body = match self.service.fetch_rows(table) {
            Ok(payload) => match rows_from_payload(&payload) {
                Some(rows) => {
                    debug!(table = %table, rows = rows.len(), "fetched table snapshot");
                    EditorGrid::from_snapshot(rows).map_or(EditorBody::NoData, EditorBody::Grid)
                }
                None => {
                    warn!(table = %table, payload = %payload, "table data payload is not an array");
                    EditorBody::NoData
                }
            },
            Err(error) => {
                warn!(table = %table, error = %format!("{error:#}"), "table data request failed");
                EditorBody::FetchFailed(format!("{error:#}"))
            }
        };

        let editor = EditorState::new(table.clone(), body);
        let editor = match previous_cursor {
            Some(cursor) => editor.with_cursor(cursor),
            None => editor,
        };
        view.panel = Panel::Editor(editor);
    }

    /// Deletes one row by identity. The view is left as is; use
    /// [`Self::delete_row_and_reload`] to resynchronize afterwards.
    pub fn delete_row<N: Notifier>(&mut self, ui: &mut N, table: &TableName, row_id: &RowId) {
        let conditions = format!("id = {row_id}");
        info!(table = %table, conditions = %conditions, "deleting row");
        match self.service.delete_rows(table, &conditions) {
            Ok(reply) => ui.notify(&reply_text(&reply)),
            Err(error) => {
                warn!(table = %table, error = %format!("{error:#}"), "row delete failed");
                ui.notify(&format!("Error deleting row: {error:#}"));
            }
        }
    }

    pub fn delete_row_and_reload<N: Notifier>(
        &mut self,
        view: &mut ViewState,
        ui: &mut N,
        table: &TableName,
        row_id: &RowId,
    ) {
        self.delete_row(ui, table, row_id);
        self.open_table_editor(view, table);
    }

    /// Submits every rendered row, edited or not, as one bulk update.
    pub fn save_table_changes<N: Notifier>(&mut self, view: &ViewState, ui: &mut N) {
        let Some(editor) = view.editor() else {
            ui.notify("No table is open for editing");
            return;
        };
        let Some(rows) = editor.grid().map(EditorGrid::collect_rows) else {
            debug!(table = %editor.table, "no rows rendered; skipping save");
            ui.notify("Nothing to save");
            return;
        };

        info!(table = %editor.table, rows = rows.len(), "saving table changes");
        match self.service.update_rows(&editor.table, &rows) {
            Ok(reply) => ui.notify(&reply_text(&reply)),
            Err(error) => {
                warn!(table = %editor.table, error = %format!("{error:#}"), "bulk update failed");
                ui.notify(&format!("Error saving table: {error:#}"));
            }
        }
    }

    pub fn delete_table<N: Notifier>(
        &mut self,
        view: &mut ViewState,
        ui: &mut N,
        table: &TableName,
    ) {
        if !ui.confirm(&format!(
            "Are you sure you want to delete the table {table}?"
        )) {
            debug!(table = %table, "table delete declined");
            return;
        }

        info!(table = %table, "deleting table");
        match self.service.delete_table(table) {
            Ok(reply) => ui.notify(&raw_reply_text(&reply)),
            Err(error) => {
                warn!(table = %table, error = %format!("{error:#}"), "table delete failed");
                ui.notify(&format!("Error deleting table: {error:#}"));
            }
        }
        self.load_table_list(view);
    }

    pub fn create_table<N: Notifier>(
        &mut self,
        view: &mut ViewState,
        ui: &mut N,
        table: &TableName,
        columns: &str,
    ) {
        info!(table = %table, "creating table");
        match self.service.create_table(table, columns) {
            Ok(reply) => ui.notify(&raw_reply_text(&reply)),
            Err(error) => {
                warn!(table = %table, error = %format!("{error:#}"), "table create failed");
                ui.notify(&format!("Error creating table: {error:#}"));
            }
        }
        view.dispatch(ViewCommand::HideAddTableForm);
        self.load_table_list(view);
    }

    pub fn insert_row<N: Notifier>(
        &mut self,
        view: &mut ViewState,
        ui: &mut N,
        table: &TableName,
        values: &Row,
    ) {
        info!(table = %table, columns = values.len(), "inserting row");
        match self.service.insert_row(table, values) {
            Ok(reply) => ui.notify(&reply_text(&reply)),
            Err(error) => {
                warn!(table = %table, error = %format!("{error:#}"), "row insert failed");
                ui.notify(&format!("Error adding row: {error:#}"));
            }
        }
        self.open_table_editor(view, table);
    }

    pub fn alter_table<N: Notifier>(
        &mut self,
        view: &mut ViewState,
        ui: &mut N,
        table: &TableName,
        alter_query: &str,
    ) {
        info!(table = %table, "altering table");
        match self.service.alter_table(table, alter_query) {
            Ok(reply) => ui.notify(&reply_text(&reply)),
            Err(error) => {
                warn!(table = %table, error = %format!("{error:#}"), "table alter failed");
                ui.notify(&format!("Error altering table: {error:#}"));
            }
        }
        self.open_table_editor(view, table);
    }

    pub fn import_spreadsheet(&mut self, view: &mut ViewState, upload: &SpreadsheetUpload) {
        view.import_status = Some(ImportStatus::Uploading);
        info!(file = %upload.file_name, bytes = upload.bytes.len(), "importing spreadsheet");

        let status = match self.service.import_spreadsheet(upload) {
            Ok(reply) if reply.success => ImportStatus::Imported(reply.message()),
            Ok(reply) => {
                warn!(file = %upload.file_name, body = %reply.body, "import rejected");
                ImportStatus::Rejected(reply.error())
            }
            Err(error) => {
                warn!(file = %upload.file_name, error = %format!("{error:#}"), "import upload failed");
                ImportStatus::Failed(format!("{error:#}"))
            }
        };
        view.import_status = Some(status);
    }
}
