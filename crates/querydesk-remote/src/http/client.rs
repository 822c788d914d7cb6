//! HTTP collaborator struct, endpoint resolution, and response handling.

use tracing::debug;

use crate::wire::error_detail;
use crate::RemoteError;

use super::config::HttpConfig;

pub(crate) const UPLOAD_PATH: &str = "/upload-csv/";
pub(crate) const SCHEMA_PATH: &str = "/extract-schema/";
pub(crate) const GENERATE_PATH: &str = "/generate-query/";
pub(crate) const REGENERATE_PATH: &str = "/re_generate/";
pub(crate) const RUN_PATH: &str = "/run-query/";
pub(crate) const FORMAT_PATH: &str = "/format-response/";

/// Query-service client over HTTP.
pub struct HttpCollaborator {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpCollaborator {
    pub fn new(config: HttpConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Join the configured base URL and an endpoint path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Attach auth, send, check the status, and decode the JSON body.
    pub(crate) async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, RemoteError> {
        let request = match self.config.auth_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = error_detail(&text, self.config.error_body_limit);
            debug!(status = status.as_u16(), %detail, "query service returned an error");
            return Err(RemoteError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::MalformedResponse(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else if e.is_builder() {
        RemoteError::InvalidRequest(e.to_string())
    } else {
        RemoteError::Network(e.to_string())
    }
}
