//! Forge API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::models::{Credentials, DockerRegistry, GitConfig, Job, RegistryUpdate, Token};
use super::ForgeApi;
use crate::error::{ApiError, Result};

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Forge API client.
///
/// Holds the server base URL and the session token for the lifetime of one
/// command. The token is set once at construction and never refreshed: when
/// the server answers 401 the failure is surfaced as-is and the user has to
/// log in again.
pub struct ForgeClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl ForgeClient {
    /// Create a new Forge API client
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request carrying the bearer token
    fn authenticated(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.as_ref().ok_or(ApiError::Unauthorized)?;
        Ok(self
            .http
            .request(method, self.endpoint(path))
            .header("Authorization", format!("Bearer {}", token)))
    }

    /// Send the request and normalize every non-2xx answer into an
    /// [`ApiError`]
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} -> {}", response.url(), status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let msg = extract_message(&body);

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            // a 409 body is the server's current version of the resource,
            // keep it verbatim for the caller
            StatusCode::CONFLICT => ApiError::Conflict(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(msg)
            }
            status if status.is_server_error() => ApiError::ServerError(msg),
            _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        };
        Err(err.into())
    }

    /// Parse the response body as JSON
    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into())
    }
}

/// Extract the server message from an error body.
///
/// The canonical envelope is `{"msg": "..."}`; some responses carry a bare
/// text or an empty body instead, in which case the trimmed raw text is
/// used.
fn extract_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        msg: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.msg,
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl ForgeApi for ForgeClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        debug!("POST /login");
        let response = self
            .dispatch(self.http.post(self.endpoint("/login")).json(credentials))
            .await?;
        let token: Token = Self::parse_json(response).await?;
        Ok(token.value)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        debug!("GET /jobs");
        let request = self.authenticated(Method::GET, "/jobs")?;
        let response = self.dispatch(request).await?;
        Self::parse_json(response).await
    }

    async fn create_job(&self, job: &Job) -> Result<Job> {
        debug!("POST /jobs");
        let request = self.authenticated(Method::POST, "/jobs")?.json(job);
        let response = self.dispatch(request).await?;
        Self::parse_json(response).await
    }

    async fn test_repository(&self, config: &GitConfig) -> Result<()> {
        debug!("POST /scm/git/repository");
        let request = self
            .authenticated(Method::POST, "/scm/git/repository")?
            .json(config);
        self.dispatch(request).await?;
        Ok(())
    }

    async fn list_registries(&self) -> Result<Vec<DockerRegistry>> {
        debug!("GET /containers/docker/registries");
        let request = self.authenticated(Method::GET, "/containers/docker/registries")?;
        let response = self.dispatch(request).await?;
        Self::parse_json(response).await
    }

    async fn get_registry(&self, id: &str) -> Result<DockerRegistry> {
        let path = format!("/containers/docker/registries/{}", id);
        debug!("GET {}", path);
        let request = self.authenticated(Method::GET, &path)?;
        let response = self.dispatch(request).await?;
        Self::parse_json(response).await
    }

    async fn create_registry(&self, registry: &DockerRegistry) -> Result<DockerRegistry> {
        debug!("POST /containers/docker/registries");
        let request = self
            .authenticated(Method::POST, "/containers/docker/registries")?
            .json(registry);
        let response = self.dispatch(request).await?;
        Self::parse_json(response).await
    }

    async fn update_registry(&self, id: &str, update: &RegistryUpdate) -> Result<DockerRegistry> {
        let path = format!("/containers/docker/registries/{}", id);
        debug!("PUT {}", path);
        let request = self.authenticated(Method::PUT, &path)?.json(update);
        let response = self.dispatch(request).await?;
        Self::parse_json(response).await
    }

    async fn delete_registry(&self, id: &str) -> Result<()> {
        let path = format!("/containers/docker/registries/{}", id);
        debug!("DELETE {}", path);
        let request = self.authenticated(Method::DELETE, &path)?;
        self.dispatch(request).await?;
        Ok(())
    }

    async fn test_registry(&self, registry: &DockerRegistry) -> Result<()> {
        debug!("POST /containers/docker/registries/test");
        let request = self
            .authenticated(Method::POST, "/containers/docker/registries/test")?
            .json(registry);
        self.dispatch(request).await?;
        Ok(())
    }
}
