//! Docker registry models
//!
//! Registry updates use optimistic concurrency: the client echoes the
//! `lastModificationTime` it loaded, and the server refuses the write with
//! a 409 when the stored value differs. The stamp itself is opaque to the
//! client.

use serde::{Deserialize, Deserializer, Serialize};

/// Names of the updatable registry fields, in the order the update payload
/// reports them.
const UPDATABLE_FIELDS: [&str; 4] = ["name", "url", "user", "password"];

/// A docker registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerRegistry {
    /// Server-assigned id, absent on a creation request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    pub url: String,

    #[serde(default)]
    pub user: String,

    /// Blank in server responses, set only on the way in
    #[serde(default)]
    pub password: String,

    /// Opaque optimistic-lock stamp, issued and interpreted by the server
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "stamp_opt"
    )]
    pub last_modification_time: Option<String>,
}

impl DockerRegistry {
    /// Creation requires a non-empty name and url; user and password stay
    /// optional.
    pub fn is_valid_for_creation(&self) -> bool {
        !self.name.is_empty() && !self.url.is_empty()
    }

    /// Names of the fields whose values differ from `loaded`, in the fixed
    /// [`UPDATABLE_FIELDS`] order.
    pub fn changed_fields(&self, loaded: &DockerRegistry) -> Vec<String> {
        UPDATABLE_FIELDS
            .iter()
            .filter(|field| match **field {
                "name" => self.name != loaded.name,
                "url" => self.url != loaded.url,
                "user" => self.user != loaded.user,
                "password" => self.password != loaded.password,
                _ => unreachable!(),
            })
            .map(|field| field.to_string())
            .collect()
    }
}

/// Update request for an existing registry: the submitted form plus the
/// list of fields that actually changed and the stamp of the version the
/// form was loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryUpdate {
    #[serde(flatten)]
    pub registry: DockerRegistry,

    pub changed_fields: Vec<String>,
}

impl RegistryUpdate {
    /// Build the update payload by diffing `form` against the originally
    /// loaded registry. The payload carries the loaded stamp, not the
    /// form's: that is what the server compares against its stored value.
    pub fn from_form(form: &DockerRegistry, loaded: &DockerRegistry) -> Self {
        let changed_fields = form.changed_fields(loaded);
        let mut registry = form.clone();
        registry.last_modification_time = loaded.last_modification_time.clone();

        RegistryUpdate {
            registry,
            changed_fields,
        }
    }

    /// An update with no changed field is a no-op and must not be sent.
    pub fn is_empty(&self) -> bool {
        self.changed_fields.is_empty()
    }
}

/// The stamp is a string of unix nanos, but older server versions emitted
/// it as a JSON number. Accept both, normalize to a string.
fn stamp_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stamp {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Stamp>::deserialize(deserializer)?.map(|stamp| match stamp {
        Stamp::Text(text) => text,
        Stamp::Number(number) => number.to_string(),
    }))
}
