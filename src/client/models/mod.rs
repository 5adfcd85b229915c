//! Forge API data models
//!
//! Domain types exchanged with the Forge CI server, organized by resource
//! type for easy discovery.

mod auth;
mod job;
mod registry;
mod scm;

pub use auth::{Credentials, Token};
pub use job::Job;
pub use registry::{DockerRegistry, RegistryUpdate};
pub use scm::{GitConfig, HttpAuthConfig, SshAuthConfig};
