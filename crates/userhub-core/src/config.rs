//! Configuration for the UserHub server.
//!
//! All configuration is driven by environment variables.

/// Global configuration for UserHub.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHubConfig {
    /// Bind address for the server.
    pub listen: String,
    /// Base domain for host-based API version dispatch
    /// (e.g. `api1.users.localhost` selects the v1 view).
    pub domain: String,
    /// Log level.
    pub log_level: String,
    /// Whether to seed the store with the sample users.
    pub seed_sample_users: bool,
}

impl Default for UserHubConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:4567".to_owned(),
            domain: "users.localhost".to_owned(),
            log_level: "info".to_owned(),
            seed_sample_users: true,
        }
    }
}

impl UserHubConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("USERHUB_LISTEN") {
            config.listen = v;
        }
        if let Ok(v) = std::env::var("USERHUB_DOMAIN") {
            config.domain = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("USERHUB_SEED") {
            config.seed_sample_users = v == "1" || v.eq_ignore_ascii_case("true");
        }

        config
    }
}
