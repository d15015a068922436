use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Keys the assessment flow writes. Each value is overwritten wholesale on
/// update; there is no partial patching or versioning.
pub mod keys {
    pub const CONVERSATION: &str = "assessment_conversation";
    pub const PROFILE: &str = "user_profile";
    pub const TOTAL_PLAN: &str = "total_plan";
    pub const WEEKLY_PLAN: &str = "weekly_plan";
}

/// Key-value session storage that survives page reload. Injected into the
/// wizard so tests can substitute an in-memory fake.
pub trait SessionStore {
    fn save(&self, key: &str, value: &Value);
    fn load(&self, key: &str) -> Option<Value>;
}

/// Persists `value` under `key`, logging and swallowing failures; storage is
/// best-effort and never blocks the flow.
pub fn save_json<T: Serialize>(store: &dyn SessionStore, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(json) => store.save(key, &json),
        Err(err) => tracing::warn!(key, error = %err, "failed to serialize session value"),
    }
}

pub fn load_json<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> Option<T> {
    let value = store.load(key)?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to decode session value");
            None
        }
    }
}

/// Browser-backed store over `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct BrowserSessionStore;

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserSessionStore {
    fn save(&self, key: &str, value: &Value) {
        use gloo_storage::{LocalStorage, Storage};

        if let Err(err) = LocalStorage::set(key, value) {
            tracing::warn!(key, error = %err, "failed to write local storage");
        }
    }

    fn load(&self, key: &str) -> Option<Value> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::get::<Value>(key).ok()
    }
}

/// In-memory store used by tests and as the native fallback, where no page
/// reload exists to survive.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, Value>>,
}

impl SessionStore for MemorySessionStore {
    fn save(&self, key: &str, value: &Value) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
    }

    fn load(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }
}
