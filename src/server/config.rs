use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("JUTZO_SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("JUTZO_SERVER_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080),
            database_url: env::var("JUTZO_DB_URL").unwrap_or_else(|_| "sqlite:data/jutzo.db".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite:data/jutzo.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}
