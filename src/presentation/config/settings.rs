use crate::application::services::RetrievalConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub gemini: GeminiSettings,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub generation_model: String,
    pub embedding_model: String,
}

impl Settings {
    /// Reads configuration from the environment. Only `DATABASE_URL` and
    /// `GEMINI_API_KEY` are required; everything else has a default.
    pub fn from_env() -> Result<Self, SettingsError> {
        let server = ServerSettings {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env_parsed("SERVER_PORT", 3333)?,
        };

        let database = DatabaseSettings {
            url: env_required("DATABASE_URL")?,
            max_connections: env_parsed("DATABASE_MAX_CONNECTIONS", 10)?,
        };

        let gemini = GeminiSettings {
            api_key: env_required("GEMINI_API_KEY")?,
            generation_model: env_or("GEMINI_GENERATION_MODEL", "gemini-2.5-flash"),
            embedding_model: env_or("GEMINI_EMBEDDING_MODEL", "text-embedding-004"),
        };

        Ok(Self {
            server,
            database,
            gemini,
            retrieval: RetrievalConfig::default(),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_required(name: &str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::MissingVariable(name.to_string()))
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, SettingsError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| SettingsError::InvalidVariable(name.to_string())),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing environment variable: {0}")]
    MissingVariable(String),
    #[error("invalid value for environment variable: {0}")]
    InvalidVariable(String),
}
