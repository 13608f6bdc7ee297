// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Reply to a multipart upload. `success` mirrors the HTTP status class.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResponse {
    pub success: bool,
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        validate_base_url(&base_url)?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn list_tables(&self) -> Result<Value> {
        self.send("list_tables", self.http.get(self.endpoint("list_tables")))
    }

    pub fn add_table(&self, table_name: &str, columns: &str) -> Result<Value> {
        self.post_json(
            "add_table",
            &AddTableRequest {
                table_name,
                columns,
            },
        )
    }

    pub fn delete_table(&self, table_name: &str) -> Result<Value> {
        self.post_json("delete_table", &TableRequest { table_name })
    }

    pub fn get_table_data(&self, table_name: &str) -> Result<Value> {
        self.post_json("get_table_data", &TableRequest { table_name })
    }

    pub fn update_table_data<T: Serialize>(&self, table_name: &str, data: &[T]) -> Result<Value> {
        self.post_json("update_table_data", &UpdateTableDataRequest { table_name, data })
    }

    /// Deletes the rows matching a backend-side condition such as `id = 5`.
    pub fn delete(&self, table_name: &str, conditions: &str) -> Result<Value> {
        self.post_json(
            "delete",
            &DeleteRequest {
                table_name,
                conditions,
            },
        )
    }

    pub fn add_data<T: Serialize>(&self, table_name: &str, values: &T) -> Result<Value> {
        self.post_json("add_data", &AddDataRequest { table_name, values })
    }

    pub fn edit_table(&self, table_name: &str, alter_query: &str) -> Result<Value> {
        self.post_json(
            "edit_table",
            &EditTableRequest {
                table_name,
                alter_query,
            },
        )
    }

    pub fn import_excel(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse> {
        let part = Part::bytes(bytes).file_name(file_name.to_owned());
        let form = Form::new().part("file", part);
        let request = self.http.post(self.endpoint("import_excel")).multipart(form);

        debug!(endpoint = "import_excel", file = file_name, "sending upload");
        let response = request
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let status = response.status();
        let body = response.text().context("read import_excel response")?;
        let body = decode_body("import_excel", status, &body)?;
        Ok(UploadResponse {
            success: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }

    fn post_json<B: Serialize>(&self, name: &str, body: &B) -> Result<Value> {
        self.send(name, self.http.post(self.endpoint(name)).json(body))
    }

    // The backend reports application errors as JSON with a 4xx/5xx status,
    // so the body is decoded whatever the status.
    fn send(&self, name: &str, request: RequestBuilder) -> Result<Value> {
        debug!(endpoint = name, "sending request");
        let response = request
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let status = response.status();
        let body = response
            .text()
            .with_context(|| format!("read {name} response"))?;
        debug!(endpoint = name, status = status.as_u16(), "received response");
        decode_body(name, status, &body)
    }
}

/// Accepts only non-empty `http`/`https` URLs.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if base_url.is_empty() {
        bail!("server.base_url must not be empty");
    }
    let parsed = Url::parse(base_url)
        .with_context(|| format!("server.base_url {base_url:?} is not a valid URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "server.base_url {base_url:?} must use http or https, got {}",
            parsed.scheme()
        );
    }
    Ok(())
}

fn decode_body(name: &str, status: StatusCode, body: &str) -> Result<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(clean_error_response(status, body)),
        Err(error) => Err(error).with_context(|| format!("decode {name} response")),
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- check [server].base_url or TABLEKEEP_BASE_URL ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('<') {
        return anyhow!("server error ({}): {}", status.as_u16(), trimmed);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Serialize)]
struct TableRequest<'a> {
    table_name: &'a str,
}

#[derive(Debug, Serialize)]
struct AddTableRequest<'a> {
    table_name: &'a str,
    columns: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateTableDataRequest<'a, T> {
    table_name: &'a str,
    data: &'a [T],
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    table_name: &'a str,
    conditions: &'a str,
}

#[derive(Debug, Serialize)]
struct AddDataRequest<'a, T> {
    table_name: &'a str,
    values: &'a T,
}

#[derive(Debug, Serialize)]
struct EditTableRequest<'a> {
    table_name: &'a str,
    alter_query: &'a str,
}

#[cfg(test)]
mod tests {
    use super::{Client, clean_error_response, decode_body};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn base_url_is_trimmed_and_validated() {
        let client = Client::new("http://localhost:5000/db///", Duration::from_secs(1))
            .expect("valid base url");
        assert_eq!(client.base_url(), "http://localhost:5000/db");

        let error = Client::new("", Duration::from_secs(1)).expect_err("empty should fail");
        assert!(error.to_string().contains("must not be empty"));

        let error =
            Client::new("ftp://example.com", Duration::from_secs(1)).expect_err("ftp rejected");
        assert!(error.to_string().contains("http or https"));
    }

    #[test]
    fn error_statuses_with_json_bodies_decode() {
        let value = decode_body(
            "delete",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"no such table: x"}"#,
        )
        .expect("json body decodes");
        assert_eq!(value, json!({"error": "no such table: x"}));
    }

    #[test]
    fn html_error_pages_are_summarized() {
        let error = decode_body(
            "update_table_data",
            StatusCode::INTERNAL_SERVER_ERROR,
            "<!doctype html><title>500 Internal Server Error</title>",
        )
        .expect_err("html is not json");
        assert_eq!(error.to_string(), "server returned 500");

        let short = clean_error_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(short.to_string(), "server error (502): upstream down");
    }

    #[test]
    fn non_json_success_is_a_decode_error() {
        let error = decode_body("list_tables", StatusCode::OK, "not json")
            .expect_err("plain text should fail");
        assert!(error.to_string().contains("decode list_tables response"));
    }
}
