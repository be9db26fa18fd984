//! # Client configuration: service base URLs
//!
//! The client talks to two independently deployed services: the auth service
//! and the notes service. Their base URLs are the only configuration this
//! client carries; everything else (timeouts, retries) is left to the
//! transport's defaults.
//!
//! All fields default to the paths the reverse proxy exposes in the standard
//! deployment, so `ApiConfig::default()` is a working production config.

use serde::{Deserialize, Serialize};

/// Base URLs for the consumed REST services.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Auth service root; `/auth/login`, `/auth/me` etc. are appended.
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    /// Notes service root; `/notes`, `/categories`, `/tags`, `/dashboard`
    /// are appended.
    #[serde(default = "default_notes_base_url")]
    pub notes_base_url: String,
}

fn default_auth_base_url() -> String {
    "/api/auth".to_string()
}

fn default_notes_base_url() -> String {
    "/api/notes/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: default_auth_base_url(),
            notes_base_url: default_notes_base_url(),
        }
    }
}

impl ApiConfig {
    /// Point both services at the same host (useful for local development
    /// against services running without a reverse proxy).
    pub fn with_host(host: &str) -> Self {
        let host = host.trim_end_matches('/');
        Self {
            auth_base_url: format!("{host}/api/auth"),
            notes_base_url: format!("{host}/api/notes/api/v1"),
        }
    }
}
