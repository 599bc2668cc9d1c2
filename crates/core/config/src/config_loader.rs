use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::env;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}").expect("valid env var pattern"));

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Read a TOML file, with `.env` loaded and `${VAR}` references expanded
pub async fn load_from_file<T: DeserializeOwned>(file_name: impl AsRef<Path>) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = tokio::fs::read_to_string(file_name).await?;
    parse_str(&contents)
}

/// Parse a TOML document after expanding environment references
pub fn parse_str<T: DeserializeOwned>(raw_config: &str) -> Result<T, LoadConfigError> {
    let contents = expand_vars(raw_config);
    Ok(toml::from_str(&contents)?)
}

// Expands ${VAR_NAME} with environment variables, unknown names are left untouched
fn expand_vars(raw_config: &str) -> String {
    ENV_VAR
        .replace_all(raw_config, |caps: &Captures| match env::var(&caps[1]) {
            Ok(val) => val,
            Err(_) => caps[0].to_string(),
        })
        .to_string()
}
