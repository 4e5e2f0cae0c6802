use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Notification channel announcing newly observed IPs (default: "ip")
    #[serde(default = "default_notify_channel")]
    pub notify_channel: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            notify_channel: default_notify_channel(),
        }
    }
}

fn default_notify_channel() -> String {
    "ip".to_string()
}
