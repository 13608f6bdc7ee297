// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use serde_json::Value;
use tablekeep_api::Client;
use tablekeep_app::{ImportReply, Row, SpreadsheetUpload, TableName, TableService};

pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl TableService for ApiRuntime {
    fn list_tables(&mut self) -> Result<Value> {
        self.client.list_tables()
    }

    fn create_table(&mut self, table: &TableName, columns: &str) -> Result<Value> {
        self.client.add_table(table.as_str(), columns)
    }

    fn delete_table(&mut self, table: &TableName) -> Result<Value> {
        self.client.delete_table(table.as_str())
    }

    fn fetch_rows(&mut self, table: &TableName) -> Result<Value> {
        self.client.get_table_data(table.as_str())
    }

    fn update_rows(&mut self, table: &TableName, rows: &[Row]) -> Result<Value> {
        self.client.update_table_data(table.as_str(), rows)
    }

    fn delete_rows(&mut self, table: &TableName, conditions: &str) -> Result<Value> {
        self.client.delete(table.as_str(), conditions)
    }

    fn insert_row(&mut self, table: &TableName, values: &Row) -> Result<Value> {
        self.client.add_data(table.as_str(), values)
    }

    fn alter_table(&mut self, table: &TableName, alter_query: &str) -> Result<Value> {
        self.client.edit_table(table.as_str(), alter_query)
    }

    fn import_spreadsheet(&mut self, upload: &SpreadsheetUpload) -> Result<ImportReply> {
        let response = self
            .client
            .import_excel(&upload.file_name, upload.bytes.clone())?;
        Ok(ImportReply {
            success: response.success,
            body: response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ApiRuntime;
    use anyhow::{Result, anyhow};
    use serde_json::{Value, json};
    use std::io::Read;
    use std::thread;
    use std::time::Duration;
    use tablekeep_api::Client;
    use tablekeep_app::{
        EditorBody, ImportStatus, TableListing, TableName, ViewState, ViewSynchronizer,
    };
    use tablekeep_testkit::{ScriptedNotifier, spreadsheet_fixture};
    use tiny_http::{Header, Response, Server};

    fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
        Response::from_string(body)
            .with_status_code(status)
            .with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            )
    }

    fn runtime_for(server: &Server) -> Result<ApiRuntime> {
        let base_url = format!("http://{}/db", server.server_addr());
        Ok(ApiRuntime::new(Client::new(&base_url, Duration::from_secs(1))?))
    }

    fn mock_server() -> Result<Server> {
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))
    }

    #[test]
    fn table_list_and_editor_load_over_http() -> Result<()> {
        let server = mock_server()?;
        let runtime = runtime_for(&server)?;

        let handle = thread::spawn(move || {
            let request = server.recv().expect("list request");
            assert_eq!(request.url(), "/db/list_tables");
            request
                .respond(json_response(r#"["sections"]"#, 200))
                .expect("respond");

            let request = server.recv().expect("fetch request");
            assert_eq!(request.url(), "/db/get_table_data");
            request
                .respond(json_response(
                    r#"[{"id":1,"course":"CS101","room":null}]"#,
                    200,
                ))
                .expect("respond");
        });

        let mut sync = ViewSynchronizer::new(runtime);
        let mut view = ViewState::default();
        sync.load_table_list(&mut view);
        assert_eq!(
            view.listing,
            TableListing::Tables(vec![TableName::from("sections")])
        );

        sync.open_table_editor(&mut view, &TableName::from("sections"));
        let grid = view
            .editor()
            .and_then(|editor| editor.grid())
            .expect("grid should render");
        assert_eq!(grid.header(), vec!["id", "course", "room", "Actions"]);
        assert_eq!(grid.input(0, 2).map(|input| input.value.as_str()), Some(""));

        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn backend_error_reply_is_shown_verbatim_on_save() -> Result<()> {
        let server = mock_server()?;
        let runtime = runtime_for(&server)?;

        let handle = thread::spawn(move || {
            let request = server.recv().expect("fetch request");
            request
                .respond(json_response(r#"[{"id":1,"a":"x"}]"#, 200))
                .expect("respond");

            let mut request = server.recv().expect("update request");
            assert_eq!(request.url(), "/db/update_table_data");
            let mut raw = String::new();
            request
                .as_reader()
                .read_to_string(&mut raw)
                .expect("body should read");
            let body: Value = serde_json::from_str(&raw).expect("json body");
            assert_eq!(
                body,
                json!({"table_name": "t", "data": [{"id": "1", "a": "x"}]})
            );
            request
                .respond(json_response(r#"{"error":"database is locked"}"#, 500))
                .expect("respond");
        });

        let mut sync = ViewSynchronizer::new(runtime);
        let mut view = ViewState::default();
        let mut ui = ScriptedNotifier::new();
        sync.open_table_editor(&mut view, &TableName::from("t"));
        sync.save_table_changes(&view, &mut ui);

        assert_eq!(ui.notices, vec!["database is locked".to_owned()]);
        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn unreachable_backend_fails_fetch_with_placeholder() -> Result<()> {
        let runtime = ApiRuntime::new(Client::new(
            "http://127.0.0.1:1/db",
            Duration::from_millis(50),
        )?);
        let mut sync = ViewSynchronizer::new(runtime);
        let mut view = ViewState::default();

        sync.load_table_list(&mut view);
        assert_eq!(view.listing, TableListing::Failed);

        sync.open_table_editor(&mut view, &TableName::from("t"));
        let body = view.editor().map(|editor| editor.body.clone());
        assert!(matches!(body, Some(EditorBody::FetchFailed(_))));
        Ok(())
    }

    #[test]
    fn rejected_import_maps_to_error_status() -> Result<()> {
        let (_dir, path) = spreadsheet_fixture("notes.txt")?;
        let server = mock_server()?;
        let runtime = runtime_for(&server)?;

        let handle = thread::spawn(move || {
            let request = server.recv().expect("import request");
            assert_eq!(request.url(), "/db/import_excel");
            request
                .respond(json_response(
                    r#"{"error":"File must be an Excel file (.xlsx)"}"#,
                    400,
                ))
                .expect("respond");
        });

        let mut sync = ViewSynchronizer::new(runtime);
        let mut view = ViewState::default();
        let upload = tablekeep_app::SpreadsheetUpload::from_path(&path)?;
        sync.import_spreadsheet(&mut view, &upload);

        assert_eq!(
            view.import_status,
            Some(ImportStatus::Rejected(
                "File must be an Excel file (.xlsx)".to_owned()
            ))
        );
        handle.join().expect("server thread should join");
        Ok(())
    }
}
