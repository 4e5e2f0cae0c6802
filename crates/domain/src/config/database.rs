use serde::{Deserialize, Serialize};

/// Store connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL (default: "postgresql:///blmonitor")
    #[serde(default = "default_db_url")]
    pub url: String,

    /// Pool size shared by every scan job and the listener (default: 10)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_url() -> String {
    "postgresql:///blmonitor".to_string()
}

fn default_max_connections() -> u32 {
    10
}
