//! Collaborator trait implementation for HttpCollaborator.

use async_trait::async_trait;
use querydesk_common::{ColumnDescriptor, Row};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::wire;
use crate::{Collaborator, QueryDraft, RegenerateRequest, RemoteError, UploadReceipt};

use super::client::{
    HttpCollaborator, FORMAT_PATH, GENERATE_PATH, REGENERATE_PATH, RUN_PATH, SCHEMA_PATH,
    UPLOAD_PATH,
};

#[async_trait]
impl Collaborator for HttpCollaborator {
    async fn upload_dataset(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, RemoteError> {
        debug!(file = %file_name, size = content.len(), "upload request");

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| RemoteError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        let json = self
            .send_json(self.http.post(self.endpoint(UPLOAD_PATH)).multipart(form))
            .await?;
        wire::parse_upload(json)
    }

    async fn fetch_schema(&self) -> Result<Vec<ColumnDescriptor>, RemoteError> {
        debug!("schema request");
        let json = self
            .send_json(self.http.get(self.endpoint(SCHEMA_PATH)))
            .await?;
        wire::parse_schema(json)
    }

    async fn generate_query(&self, question: &str) -> Result<QueryDraft, RemoteError> {
        debug!(question_len = question.len(), "generate request");
        let form = Form::new().text("question", question.to_string());
        let json = self
            .send_json(self.http.post(self.endpoint(GENERATE_PATH)).multipart(form))
            .await?;
        wire::parse_generated(json)
    }

    async fn regenerate_query(
        &self,
        request: &RegenerateRequest,
    ) -> Result<QueryDraft, RemoteError> {
        debug!(
            feedback_len = request.user_description.len(),
            "regenerate request"
        );
        let json = self
            .send_json(self.http.post(self.endpoint(REGENERATE_PATH)).json(request))
            .await?;
        wire::parse_regenerated(json)
    }

    async fn run_query(&self, query: &str) -> Result<Vec<Row>, RemoteError> {
        debug!(query = %query, "run request");
        let form = Form::new().text("query", query.to_string());
        let json = self
            .send_json(self.http.post(self.endpoint(RUN_PATH)).multipart(form))
            .await?;
        wire::parse_rows(json)
    }

    async fn format_response(
        &self,
        question: &str,
        result_json: &str,
    ) -> Result<String, RemoteError> {
        debug!(result_len = result_json.len(), "format request");
        let form = Form::new()
            .text("question", question.to_string())
            .text("result", result_json.to_string());
        let json = self
            .send_json(self.http.post(self.endpoint(FORMAT_PATH)).multipart(form))
            .await?;
        wire::parse_formatted(json)
    }
}
