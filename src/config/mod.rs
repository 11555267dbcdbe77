mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./plexletter.toml",
        "./config.toml",
        "~/.config/plexletter/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Load the config file, then layer process environment variables on top.
///
/// A `.env` file in the working directory is read first if present.
pub fn load_with_env(custom_path: Option<&Path>) -> Result<Config> {
    dotenvy::dotenv().ok();

    let mut config = load_config_or_default(custom_path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to resolve variable names.
///
/// Empty values are ignored so a blank line in `.env` never clears a key
/// set in the config file.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get("TMDB_API_KEY") {
        config.tmdb.api_key = key;
    }
    if let Some(key) = get("OMDB_API_KEY") {
        config.omdb.api_key = Some(key);
    }
    if let Some(user) = get("GMAIL_USER") {
        config.mail.username = Some(user);
    }
    if let Some(password) = get("GMAIL_PASSWORD") {
        config.mail.password = Some(password);
    }
    if let Some(host) = get("SMTP_HOST") {
        config.mail.smtp_host = host;
    }
    if let Some(port) = get("SMTP_PORT") {
        match port.parse() {
            Ok(port) => config.mail.smtp_port = port,
            Err(_) => tracing::warn!("Ignoring invalid SMTP_PORT value: {}", port),
        }
    }
    if let Some(owner) = get("NEWSLETTER_OWNER_NAME") {
        config.newsletter.owner_name = owner;
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if let Some(dir) = &config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    if config.tmdb.api_key.is_empty() {
        tracing::warn!("TMDB API key is not set; search and enrichment will fail");
    }

    match config.mail.tls.as_str() {
        "tls" | "starttls" | "none" => {}
        other => anyhow::bail!("Unknown mail.tls mode '{}'", other),
    }

    Ok(())
}
