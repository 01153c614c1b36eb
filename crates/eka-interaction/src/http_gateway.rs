//! HttpKnowledgeGateway - REST implementation of the knowledge-assistant backend.
//!
//! Endpoints:
//! - `POST /login?username=..` -> `{ access_token }`
//! - `POST /query?question=..&session_id=..` -> `{ answer }`
//! - `POST /upload` (multipart field `file`)
//! - `GET /health` -> `{ status: "ok" }`

use async_trait::async_trait;
use eka_core::auth::AuthToken;
use eka_core::config::ClientConfig;
use eka_core::gateway::{Answer, GatewayError, KnowledgeGateway};
use eka_core::session::SessionId;
use eka_core::upload::{UploadAck, UploadFile};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Gateway that talks to the backend over HTTP.
#[derive(Clone)]
pub struct HttpKnowledgeGateway {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    filename: Option<String>,
    total_chunks: Option<u64>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

impl HttpKnowledgeGateway {
    /// Creates a gateway without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Bounds every request by `timeout`. An expired request fails as transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let gateway = Self::new(config.base_url.clone());
        match config.request_timeout() {
            Some(timeout) => gateway.with_timeout(timeout),
            None => gateway,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, mut request: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.bearer());
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        request.send().await.map_err(transport_error)
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Transport(format!("request timed out: {}", error))
    } else {
        GatewayError::Transport(error.to_string())
    }
}

/// Maps 401 to `Unauthorized` and any other non-success status to `Status`.
async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(GatewayError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        code: status.as_u16(),
        body,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body)
        .map_err(|e| GatewayError::Protocol(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl KnowledgeGateway for HttpKnowledgeGateway {
    async fn login(&self, username: &str) -> Result<AuthToken, GatewayError> {
        tracing::debug!(username, "POST /login");

        let request = self
            .client
            .post(self.url("/login"))
            .query(&[("username", username)]);
        let response = check_status(self.send(self.prepare(request, None)).await?).await?;
        let body: LoginResponse = parse_json(response).await?;

        body.access_token
            .filter(|token| !token.is_empty())
            .map(AuthToken::new)
            .ok_or_else(|| GatewayError::Auth("login response carried no access_token".into()))
    }

    async fn ask(
        &self,
        question: &str,
        session_id: &SessionId,
        token: Option<&AuthToken>,
    ) -> Result<Answer, GatewayError> {
        tracing::debug!(
            session_id = %session_id,
            authenticated = token.is_some(),
            "POST /query"
        );

        let request = self
            .client
            .post(self.url("/query"))
            .query(&[("question", question), ("session_id", session_id.as_str())]);
        let response = check_status(self.send(self.prepare(request, token)).await?).await?;
        let body: QueryResponse = parse_json(response).await?;

        Ok(Answer { text: body.answer })
    }

    async fn upload(
        &self,
        file: &UploadFile,
        token: Option<&AuthToken>,
    ) -> Result<UploadAck, GatewayError> {
        tracing::debug!(filename = %file.name, size = file.bytes.len(), "POST /upload");

        let mut part =
            reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| GatewayError::Protocol(format!("Invalid mime type '{}': {}", mime, e)))?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let request = self.client.post(self.url("/upload")).multipart(form);
        let response = check_status(self.send(self.prepare(request, token)).await?).await?;

        // Success is decided by the status; the body only enriches the ack.
        let mut ack = UploadAck::for_file(file);
        if let Ok(body) = parse_json::<UploadResponse>(response).await {
            if let Some(filename) = body.filename {
                ack.filename = filename;
            }
            ack.total_chunks = body.total_chunks;
            ack.status = body.status;
        }
        Ok(ack)
    }

    async fn health(&self) -> Result<bool, GatewayError> {
        let request = self.client.get(self.url("/health"));
        let response = self.send(self.prepare(request, None)).await?;
        if !response.status().is_success() {
            return Ok(false);
        }

        let body: HealthResponse = parse_json(response).await?;
        Ok(body.status == "ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let gateway = HttpKnowledgeGateway::new("http://localhost:8000/");
        assert_eq!(gateway.url("/query"), "http://localhost:8000/query");
    }

    #[test]
    fn test_from_config_applies_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 7,
            ..ClientConfig::default()
        };
        let gateway = HttpKnowledgeGateway::from_config(&config);
        assert_eq!(gateway.timeout, Some(Duration::from_secs(7)));
        assert_eq!(gateway.base_url(), config.base_url);
    }

    #[test]
    fn test_zero_timeout_is_unbounded() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(HttpKnowledgeGateway::from_config(&config).timeout, None);
    }
}
