//! Client session variables.
//!
//! Routes publish small pieces of UI state here (which CMS page to show,
//! which room could not be found, ...) for views to read back.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct Session {
    values: RwLock<HashMap<String, Value>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: Value) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Read a value back as `T`.  `None` if missing or of another shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Snapshot of every variable, for display.
    pub fn snapshot(&self) -> serde_json::Map<String, Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct NotFound {
        #[serde(rename = "type")]
        kind: String,
        name: String,
    }

    #[test]
    fn set_then_get() {
        let session = Session::new();
        session.set("cmsPage", json!("Layout_Privacy_Policy"));

        assert_eq!(session.get("cmsPage"), Some(json!("Layout_Privacy_Policy")));
        assert_eq!(
            session.get_as::<String>("cmsPage").as_deref(),
            Some("Layout_Privacy_Policy")
        );
        assert!(session.get("privacyPolicy").is_none());

        session.set("cmsPage", json!("Layout_Legal_Notice"));
        assert_eq!(session.get("cmsPage"), Some(json!("Layout_Legal_Notice")));
    }

    #[test]
    fn typed_read_of_structured_value() {
        let session = Session::new();
        session.set("roomNotFound", json!({"type": "c", "name": "nowhere"}));

        assert_eq!(
            session.get_as::<NotFound>("roomNotFound"),
            Some(NotFound {
                kind: "c".into(),
                name: "nowhere".into()
            })
        );
        assert_eq!(session.get_as::<u32>("roomNotFound"), None);
    }
}
