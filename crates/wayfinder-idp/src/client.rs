//! Client allow-lists.
//!
//! A client may restrict which providers its users can log in with. No client,
//! or a client without an allow-list, means no restriction. An empty
//! allow-list is different: it permits no provider at all.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the allow-list in a client's additional information.
pub const ALLOWED_PROVIDERS: &str = "allowedproviders";

/// The parts of a registered client that matter for provider selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDescriptor {
    /// OAuth client id.
    pub client_id: String,
    /// Origin keys this client may use; `None` means unrestricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_providers: Option<Vec<String>>,
}

impl ClientDescriptor {
    /// An unrestricted client.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            allowed_providers: None,
        }
    }

    /// Restrict the client to the given origin keys.
    pub fn with_allowed_providers<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_providers = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    /// Build a descriptor from a client's free-form additional information.
    ///
    /// A missing or null [`ALLOWED_PROVIDERS`] entry means unrestricted. An
    /// entry that is not a list of strings is logged and also treated as
    /// unrestricted.
    pub fn from_metadata(client_id: impl Into<String>, metadata: &Map<String, Value>) -> Self {
        let client_id = client_id.into();
        let allowed_providers = match metadata.get(ALLOWED_PROVIDERS) {
            None | Some(Value::Null) => None,
            Some(value) => match Vec::<String>::deserialize(value) {
                Ok(origins) => Some(origins),
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed {ALLOWED_PROVIDERS} for client '{client_id}': {e}"
                    );
                    None
                }
            },
        };
        Self {
            client_id,
            allowed_providers,
        }
    }
}

/// Origin keys `client` is restricted to, or `None` when unrestricted.
pub fn allowed_origins(client: Option<&ClientDescriptor>) -> Option<&[String]> {
    client.and_then(|c| c.allowed_providers.as_deref())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_no_client_is_unrestricted() {
        assert_eq!(allowed_origins(None), None);
    }

    #[test]
    fn test_client_without_list_is_unrestricted() {
        let client = ClientDescriptor::new("app");
        assert_eq!(allowed_origins(Some(&client)), None);
    }

    #[test]
    fn test_empty_list_is_kept() {
        let client = ClientDescriptor::new("app").with_allowed_providers(Vec::<String>::new());
        assert_eq!(allowed_origins(Some(&client)), Some(&[][..]));
    }

    #[test]
    fn test_from_metadata_list() {
        let client = ClientDescriptor::from_metadata(
            "app",
            &metadata(json!({ "allowedproviders": ["uaa", "ldap"] })),
        );
        assert_eq!(
            allowed_origins(Some(&client)),
            Some(&["uaa".to_string(), "ldap".to_string()][..])
        );
    }

    #[test]
    fn test_from_metadata_absent_or_null() {
        let client = ClientDescriptor::from_metadata("app", &metadata(json!({ "other": 1 })));
        assert_eq!(client.allowed_providers, None);

        let client =
            ClientDescriptor::from_metadata("app", &metadata(json!({ "allowedproviders": null })));
        assert_eq!(client.allowed_providers, None);
    }

    #[test]
    fn test_from_metadata_malformed_is_unrestricted() {
        let client = ClientDescriptor::from_metadata(
            "app",
            &metadata(json!({ "allowedproviders": "uaa" })),
        );
        assert_eq!(client.allowed_providers, None);

        let client = ClientDescriptor::from_metadata(
            "app",
            &metadata(json!({ "allowedproviders": ["uaa", 7] })),
        );
        assert_eq!(client.allowed_providers, None);
    }
}
