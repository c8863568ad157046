mod settings;

pub use settings::{
    DatabaseSettings, GeminiSettings, ServerSettings, Settings, SettingsError,
};
