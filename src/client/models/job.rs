//! Job models

use serde::{Deserialize, Serialize};

use super::scm::GitConfig;

/// Configuration of a CI job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Server-assigned id, absent on a creation request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display label
    pub name: String,

    /// Source repository configuration
    #[serde(rename = "gitConfig")]
    pub git_config: GitConfig,
}

impl Job {
    /// A job is accepted by the server when its name is non-empty and its
    /// git configuration is valid.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.git_config.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{HttpAuthConfig, SshAuthConfig};

    fn ssh_job(name: &str, url: &str, key: &str) -> Job {
        Job {
            id: None,
            name: name.to_string(),
            git_config: GitConfig::Ssh(SshAuthConfig {
                url: url.to_string(),
                key: key.to_string(),
                key_password: String::new(),
            }),
        }
    }

    #[test]
    fn test_valid_ssh_job() {
        assert!(ssh_job("job 1", "git@host:repo.git", "some-key").is_valid());
    }

    #[test]
    fn test_invalid_without_name() {
        assert!(!ssh_job("", "git@host:repo.git", "some-key").is_valid());
    }

    #[test]
    fn test_invalid_without_url() {
        assert!(!ssh_job("job 1", "", "some-key").is_valid());
    }

    #[test]
    fn test_invalid_ssh_without_key() {
        assert!(!ssh_job("job 1", "git@host:repo.git", "").is_valid());
    }

    #[test]
    fn test_valid_http_job_without_credentials() {
        let job = Job {
            id: None,
            name: "job 1".to_string(),
            git_config: GitConfig::Http(HttpAuthConfig {
                url: "https://host/repo.git".to_string(),
                user: String::new(),
                password: String::new(),
            }),
        };
        assert!(job.is_valid());
    }

    #[test]
    fn test_creation_body_shape() {
        let job = ssh_job("my job", "git@host:repo.git", "some-key");
        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["name"], "my job");
        assert!(value.get("id").is_none());
        assert!(value["gitConfig"].get("sshAuth").is_some());
    }

    #[test]
    fn test_deserialize_ignores_extra_server_fields() {
        // listed jobs also carry steps/executions, which the CLI does not use
        let json = r#"{
            "id": "am9iLTE=",
            "name": "job 1",
            "gitConfig": {"httpAuth": {"url": "https://host/repo.git", "user": "", "password": ""}, "sshAuth": null},
            "steps": null,
            "executions": null,
            "removeWorkspace": false
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id.as_deref(), Some("am9iLTE="));
        assert_eq!(job.git_config.scheme(), "http");
    }
}
