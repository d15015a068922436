use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:9000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth_token: Option<String>,
    pub profile: AppProfile,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            profile: AppProfile::Dev,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        let mut config = Self::default();

        if let Some(url) = read_env("TUTOR_API_BASE_URL") {
            config.api_base_url = url;
        }

        if let Some(token) = read_env("TUTOR_AUTH_TOKEN") {
            config.auth_token = Some(token);
        }

        config.profile = AppProfile::from_env(read_env("TUTOR_PROFILE"));

        if let Some(secs) =
            read_env("TUTOR_REQUEST_TIMEOUT_SECS").and_then(|value| value.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        config
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.auth_token
            .as_ref()
            .map(|token| format!("Bearer {}", token.trim()))
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

// wasm builds have no runtime environment, so the values are baked in at
// compile time via option_env!.
fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "TUTOR_API_BASE_URL" => option_env!("TUTOR_API_BASE_URL"),
        "TUTOR_AUTH_TOKEN" => option_env!("TUTOR_AUTH_TOKEN"),
        "TUTOR_PROFILE" => option_env!("TUTOR_PROFILE"),
        "TUTOR_REQUEST_TIMEOUT_SECS" => option_env!("TUTOR_REQUEST_TIMEOUT_SECS"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}
