use crate::database::get_database_url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "commander.db";
pub const DEFAULT_EVENT_BUFFER: usize = 1000;

/// Runtime settings for `commander serve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// SQLite file path, or `:memory:` for a throwaway database
    pub database_path: String,
    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<String>,
    /// Notifications buffered per topic before slow subscribers lag
    pub event_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE.to_string(),
            cors_origin: None,
            event_buffer_size: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl ServerConfig {
    pub fn database_url(&self) -> String {
        get_database_url(Some(&self.database_path))
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
