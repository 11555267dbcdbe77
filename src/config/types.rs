use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OWNER_NAME: &str = "Plex Owner";
pub const DEFAULT_FEATURED_INTRO: &str = "Also on the server, check out these library picks!";
pub const DEFAULT_MASTHEAD: &str = "THE WEEKLY REEL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub omdb: OmdbConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub newsletter: NewsletterConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `index.html` and `alt.html` for the composition UIs
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Image CDN root; a size segment such as `w500` is appended per use
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    /// Critic scores are skipped entirely when unset
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_omdb_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP account, also used as the sender address
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// TLS mode: "tls" (implicit, default), "starttls", or "none"
    #[serde(default = "default_tls")]
    pub tls: String,

    /// Display name shown next to the sender address
    #[serde(default)]
    pub from_name: Option<String>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    465
}
fn default_tls() -> String {
    "tls".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            tls: default_tls(),
            from_name: None,
        }
    }
}

impl MailConfig {
    /// Both the account and its password are present and non-empty.
    pub fn has_credentials(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.username) && filled(&self.password)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsletterConfig {
    /// Whose server the newsletter is about, as in "New on {owner}’s Plex"
    #[serde(default = "default_owner_name")]
    pub owner_name: String,

    /// Used when a classic request carries no featured intro of its own
    #[serde(default = "default_featured_intro")]
    pub featured_intro: String,

    /// Banner line above the owner name in the magazine layout
    #[serde(default = "default_masthead")]
    pub masthead: String,
}

fn default_owner_name() -> String {
    DEFAULT_OWNER_NAME.to_string()
}
fn default_featured_intro() -> String {
    DEFAULT_FEATURED_INTRO.to_string()
}
fn default_masthead() -> String {
    DEFAULT_MASTHEAD.to_string()
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            owner_name: default_owner_name(),
            featured_intro: default_featured_intro(),
            masthead: default_masthead(),
        }
    }
}
