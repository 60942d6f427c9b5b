//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Variables that override file settings, with the field each one targets.
pub const ENV_SECRET: &str = "SECRET";
pub const ENV_OLLAMA_BASE_URL: &str = "OLLAMA_BASE_URL";
pub const ENV_OLLAMA_MODEL: &str = "OLLAMA_MODEL";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "tag-suggester.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment values onto a parsed configuration.
///
/// `lookup` abstracts `std::env::var` so the overlay can be tested without
/// touching the real process environment.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(secret) = non_empty(ENV_SECRET) {
        config.auth.secret = secret;
    }
    if let Some(url) = non_empty(ENV_OLLAMA_BASE_URL) {
        config.model.base_url = url;
    }
    if let Some(model) = non_empty(ENV_OLLAMA_MODEL) {
        config.model.model = model;
    }
    if let Some(addr) = non_empty(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
}

/// Load, overlay and validate the service configuration.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present and the built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)?
            } else {
                ServiceConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn env_overrides_file_values() {
        let mut config = ServiceConfig::default();
        config.auth.secret = "from-file".into();

        let env: HashMap<&str, &str> = [
            (ENV_SECRET, "from-env"),
            (ENV_OLLAMA_MODEL, "llama3.2:3b"),
            (ENV_BIND_ADDRESS, "   "),
        ]
        .into_iter()
        .collect();

        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.auth.secret, "from-env");
        assert_eq!(config.model.model, "llama3.2:3b");
        // blank values are ignored
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn read_config_parses_file() {
        let path = std::env::temp_dir().join(format!("tag-suggester-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[auth]\nsecret = \"abc\"\n\n[model]\ncontext_window = 4096").unwrap();

        let config = read_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.auth.secret, "abc");
        assert_eq!(config.model.context_window, 4096);
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validation_error_lists_every_problem() {
        let err = ConfigError::Validation(vec![
            ValidationError::MissingSecret,
            ValidationError::EmptyModel,
        ]);
        let rendered = err.to_string();
        assert!(rendered.starts_with("Validation failed: "));
        assert!(rendered.contains("auth.secret"));
        assert!(rendered.contains("model.model"));
    }
}
