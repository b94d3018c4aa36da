use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::DeskError;

/// Configuration shared by both binaries, loaded from `desk.toml`.
///
/// Every field has a default, so a missing file or an empty file is a fully
/// working setup (local server, stock admin secret).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub notifier: NotifierConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub state_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_owned(),
            state_file: PathBuf::from("./desk.save.bin"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_addr: String,
    pub admin_secret: String,
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_owned(),
            admin_secret: "R9v#2Xq!".to_owned(),
            session_file: PathBuf::from("./admin.session.json"),
        }
    }
}

/// Outbound email settings. Without an API key the notifier is a no-op.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_owned(),
            api_key: None,
            from: "Contact Desk <noreply@resend.dev>".to_owned(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, DeskError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/definitely/not/here/desk.toml")).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.client.admin_secret, "R9v#2Xq!");
        assert!(config.notifier.api_key.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: Config = toml::from_str(
            r#"
            [server]
            listen_addr = "0.0.0.0:9000"

            [notifier]
            api_key = "re_123"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.server.state_file, PathBuf::from("./desk.save.bin"));
        assert_eq!(config.notifier.api_key.as_deref(), Some("re_123"));
        assert_eq!(config.client.server_addr, "127.0.0.1:8080");
    }
}
