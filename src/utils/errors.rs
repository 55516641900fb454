use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
