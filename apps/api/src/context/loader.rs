//! Context Loader — reads the user profile document on every request.
//!
//! The document is edited out-of-band by the user, so nothing is cached.
//! Loading never fails: a missing or malformed file yields an empty context.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

/// Value of `name` meaning "no profile configured".
pub const NAME_SENTINEL: &str = "Not Set";
const DEFAULT_ROLE: &str = "employee";
const DEFAULT_TEAM: &str = "team";
const DEFAULT_AREA: &str = "area";
const DEFAULT_MANAGER: &str = "N/A";

/// Snapshot of the user profile. Unknown keys are kept so `GET /api/context`
/// returns the document as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserContext {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(NAME_SENTINEL)
    }

    pub fn team(&self) -> &str {
        self.team.as_deref().unwrap_or(DEFAULT_TEAM)
    }

    pub fn area(&self) -> &str {
        self.area.as_deref().unwrap_or(DEFAULT_AREA)
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }

    pub fn manager(&self) -> &str {
        self.manager.as_deref().unwrap_or(DEFAULT_MANAGER)
    }

    /// False until the user has filled in a real name.
    pub fn is_set(&self) -> bool {
        self.name() != NAME_SENTINEL
    }
}

/// Loads the context document at `path`.
pub async fn load_context(path: &Path) -> UserContext {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found. Using default empty context.", path.display());
            return UserContext::default();
        }
        Err(e) => {
            error!("Could not read {}: {e}. Using default empty context.", path.display());
            return UserContext::default();
        }
    };

    match serde_json::from_str::<UserContext>(&raw) {
        Ok(context) => context,
        Err(e) => {
            error!(
                "Error decoding JSON from {}: {e}. Please check its format.",
                path.display()
            );
            UserContext::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn context_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_context_reads_known_and_extra_keys() {
        let file = context_file(
            r#"{"name": "Ada", "role": "SWE", "team": "Infra", "area": "Cloud", "location": "NYC"}"#,
        );
        let context = load_context(file.path()).await;

        assert_eq!(context.name(), "Ada");
        assert_eq!(context.role(), "SWE");
        assert_eq!(context.team(), "Infra");
        assert_eq!(context.area(), "Cloud");
        assert_eq!(context.manager(), "N/A");
        assert_eq!(context.extra.get("location"), Some(&Value::from("NYC")));
        assert!(context.is_set());
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_unset_context() {
        let dir = tempfile::tempdir().unwrap();
        let context = load_context(&dir.path().join("context.json")).await;

        assert_eq!(context, UserContext::default());
        assert!(!context.is_set());
    }

    #[tokio::test]
    async fn test_malformed_json_yields_empty_context() {
        let file = context_file(r#"{"name": "Ada", "#);
        assert_eq!(load_context(file.path()).await, UserContext::default());
    }

    #[tokio::test]
    async fn test_non_object_document_yields_empty_context() {
        let file = context_file(r#"["Ada"]"#);
        assert_eq!(load_context(file.path()).await, UserContext::default());
    }

    #[test]
    fn test_sentinel_name_counts_as_unset() {
        let context = UserContext {
            name: Some(NAME_SENTINEL.to_string()),
            ..Default::default()
        };
        assert!(!context.is_set());
    }

    #[test]
    fn test_serializes_back_to_raw_shape() {
        let raw = serde_json::json!({"name": "Ada", "manager": "Grace", "floor": 4});
        let context: UserContext = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&context).unwrap(), raw);
    }
}
