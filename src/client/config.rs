use std::env;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/v1/";
/// Quieter than the server: the reader's stdout is the output, warnings go to stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the content service, `/v1` namespace included.
    pub api_url: String,
    pub log_level: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_url: env::var("JUTZO_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_string(), log_level: DEFAULT_LOG_LEVEL.to_string() }
    }
}
