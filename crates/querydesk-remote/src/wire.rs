//! Service response shapes and their normalization.
//!
//! Field names here are the service's; nothing outside this module
//! should know them.

use querydesk_common::{ColumnDescriptor, Row};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::{QueryDraft, RemoteError, UploadReceipt};

#[derive(Deserialize)]
struct SchemaResponse {
    schema: Vec<WireColumn>,
}

#[derive(Deserialize)]
struct WireColumn {
    #[serde(rename = "Column Name")]
    name: String,
    #[serde(rename = "Type", default)]
    data_type: String,
    #[serde(rename = "Not Null", default, deserialize_with = "yes_no")]
    not_null: bool,
    #[serde(rename = "Default Value", default)]
    default_value: Option<serde_json::Value>,
    #[serde(rename = "Primary Key", default, deserialize_with = "yes_no")]
    primary_key: bool,
}

impl From<WireColumn> for ColumnDescriptor {
    fn from(col: WireColumn) -> Self {
        let default_value = match col.default_value {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) if s.eq_ignore_ascii_case("NULL") => None,
            Some(serde_json::Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        ColumnDescriptor {
            name: col.name,
            data_type: col.data_type,
            not_null: col.not_null,
            default_value,
            primary_key: col.primary_key,
        }
    }
}

/// Accept `"Yes"`/`"No"` flags as well as plain booleans and 0/1.
fn yes_no<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Bool(b) => Ok(b),
        serde_json::Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        serde_json::Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Ok(true),
            "no" | "false" | "0" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected Yes or No, got {other:?}"
            ))),
        },
        serde_json::Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected Yes or No, got {other}"
        ))),
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    sql_query: String,
}

#[derive(Deserialize)]
struct RegenerateResponse {
    re_generated_sql_query: String,
}

#[derive(Deserialize)]
struct RunResponse {
    result: Vec<Row>,
}

#[derive(Deserialize)]
struct FormatResponse {
    formatted_answer: String,
}

fn decode<T: DeserializeOwned>(json: serde_json::Value, what: &str) -> Result<T, RemoteError> {
    serde_json::from_value(json)
        .map_err(|e| RemoteError::MalformedResponse(format!("{what}: {e}")))
}

pub(crate) fn parse_upload(json: serde_json::Value) -> Result<UploadReceipt, RemoteError> {
    decode(json, "upload response")
}

pub(crate) fn parse_schema(json: serde_json::Value) -> Result<Vec<ColumnDescriptor>, RemoteError> {
    let response: SchemaResponse = decode(json, "schema response")?;
    Ok(response.schema.into_iter().map(Into::into).collect())
}

pub(crate) fn parse_generated(json: serde_json::Value) -> Result<QueryDraft, RemoteError> {
    let response: GenerateResponse = decode(json, "generate response")?;
    Ok(QueryDraft::new(response.sql_query))
}

pub(crate) fn parse_regenerated(json: serde_json::Value) -> Result<QueryDraft, RemoteError> {
    let response: RegenerateResponse = decode(json, "regenerate response")?;
    Ok(QueryDraft::new(response.re_generated_sql_query))
}

pub(crate) fn parse_rows(json: serde_json::Value) -> Result<Vec<Row>, RemoteError> {
    let response: RunResponse = decode(json, "run response")?;
    Ok(response.result)
}

pub(crate) fn parse_formatted(json: serde_json::Value) -> Result<String, RemoteError> {
    let response: FormatResponse = decode(json, "format response")?;
    Ok(response.formatted_answer)
}

/// Pull a human-readable detail out of an error body.
///
/// The service reports failures as `{"detail": ...}`; anything else is
/// passed through, cut to `limit` characters.
pub(crate) fn error_detail(body: &str, limit: usize) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        match json.get("detail") {
            Some(serde_json::Value::String(s)) => return s.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    let body = body.trim();
    if body.is_empty() {
        return "no error detail".to_string();
    }
    body.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_columns_are_normalized() {
        let schema = parse_schema(json!({
            "schema": [
                {
                    "Column Name": "id",
                    "Type": "INTEGER",
                    "Not Null": "Yes",
                    "Default Value": "NULL",
                    "Primary Key": "Yes"
                },
                {
                    "Column Name": "region",
                    "Type": "TEXT",
                    "Not Null": "No",
                    "Default Value": "'north'",
                    "Primary Key": "No"
                }
            ]
        }))
        .unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema[0].name, "id");
        assert!(schema[0].not_null);
        assert!(schema[0].primary_key);
        assert_eq!(schema[0].default_value, None);
        assert_eq!(schema[1].name, "region");
        assert!(!schema[1].not_null);
        assert_eq!(schema[1].default_value.as_deref(), Some("'north'"));
    }

    #[test]
    fn schema_column_needs_a_name() {
        let err = parse_schema(json!({ "schema": [{ "Type": "TEXT" }] })).unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(_)));
    }

    #[test]
    fn schema_flag_rejects_garbage() {
        let err = parse_schema(json!({
            "schema": [{ "Column Name": "a", "Not Null": "maybe" }]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn upload_columns_are_optional() {
        let receipt = parse_upload(json!({ "message": "CSV uploaded successfully!" })).unwrap();
        assert_eq!(receipt.message, "CSV uploaded successfully!");
        assert!(receipt.columns.is_empty());

        let receipt = parse_upload(json!({
            "message": "ok",
            "columns": ["name", "total"]
        }))
        .unwrap();
        assert_eq!(receipt.columns, vec!["name", "total"]);
    }

    #[test]
    fn both_query_shapes_normalize_to_one_draft() {
        let generated = parse_generated(json!({ "sql_query": "SELECT 1" })).unwrap();
        let regenerated = parse_regenerated(json!({ "re_generated_sql_query": "SELECT 1" })).unwrap();
        assert_eq!(generated, regenerated);
    }

    #[test]
    fn missing_query_field_is_malformed() {
        let err = parse_regenerated(json!({ "sql_query": "SELECT 1" })).unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(ref m) if m.starts_with("regenerate response")));
    }

    #[test]
    fn rows_keep_order_and_values() {
        let rows = parse_rows(json!({
            "result": [
                { "customer": "Acme", "total": 1200.5 },
                { "customer": "Globex", "total": null }
            ]
        }))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["customer"], "Acme");
        assert!(rows[1]["total"].is_null());
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["customer", "total"]);
    }

    #[test]
    fn rows_must_be_objects() {
        let err = parse_rows(json!({ "result": [1, 2, 3] })).unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(_)));
    }

    #[test]
    fn formatted_answer_is_extracted() {
        let answer = parse_formatted(json!({ "formatted_answer": "Acme leads." })).unwrap();
        assert_eq!(answer, "Acme leads.");
    }

    #[test]
    fn error_detail_prefers_structured_payload() {
        assert_eq!(
            error_detail(r#"{"detail": "no such table: sales"}"#, 200),
            "no such table: sales"
        );
        assert_eq!(
            error_detail(r#"{"detail": [{"loc": ["body", "question"]}]}"#, 200),
            r#"[{"loc":["body","question"]}]"#
        );
    }

    #[test]
    fn error_detail_truncates_plain_bodies() {
        let body = "x".repeat(500);
        assert_eq!(error_detail(&body, 16).len(), 16);
        assert_eq!(error_detail("  ", 16), "no error detail");
    }
}
