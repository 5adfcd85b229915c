//! Forge API client

use async_trait::async_trait;

use crate::error::Result;

pub mod forge;
pub mod models;

pub use forge::ForgeClient;
pub use models::{Credentials, DockerRegistry, GitConfig, Job, RegistryUpdate};

/// Forge API client trait
#[async_trait]
pub trait ForgeApi: Send + Sync {
    /// Authenticate with user credentials and get the session token
    async fn authenticate(&self, credentials: &Credentials) -> Result<String>;

    /// List all configured jobs
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Create a new job
    async fn create_job(&self, job: &Job) -> Result<Job>;

    /// Validate a git remote + credentials pair against the server
    async fn test_repository(&self, config: &GitConfig) -> Result<()>;

    /// List all docker registries
    async fn list_registries(&self) -> Result<Vec<DockerRegistry>>;

    /// Fetch a single docker registry
    async fn get_registry(&self, id: &str) -> Result<DockerRegistry>;

    /// Create a new docker registry
    async fn create_registry(&self, registry: &DockerRegistry) -> Result<DockerRegistry>;

    /// Update a docker registry under optimistic concurrency.
    ///
    /// Fails with [`ApiError::Conflict`](crate::error::ApiError::Conflict)
    /// when the server-side stamp no longer matches the one in `update`;
    /// the error carries the server's current version of the registry.
    async fn update_registry(&self, id: &str, update: &RegistryUpdate) -> Result<DockerRegistry>;

    /// Delete a docker registry
    async fn delete_registry(&self, id: &str) -> Result<()>;

    /// Check connectivity and credentials of a registry configuration
    async fn test_registry(&self, registry: &DockerRegistry) -> Result<()>;
}
