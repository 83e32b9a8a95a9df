use serde::Deserialize;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 25565;

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_motd")]
    pub motd: String,
    /// PNG shown in the server list. The bundled icon is used when unset.
    #[serde(default)]
    pub favicon: Option<String>,
}

fn default_address() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_motd() -> String {
    "A Minecraft server running on a tiny device!".into()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            motd: default_motd(),
            favicon: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NetworkSection {
    /// Seconds between keep-alive sweeps.
    #[serde(default = "default_keep_alive_interval")]
    pub keep_alive_interval_secs: u64,
    /// Pause before answering a status request, in milliseconds.
    #[serde(default = "default_status_delay")]
    pub status_delay_ms: u64,
}

fn default_keep_alive_interval() -> u64 {
    20
}

fn default_status_delay() -> u64 {
    1000
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            keep_alive_interval_secs: default_keep_alive_interval(),
            status_delay_ms: default_status_delay(),
        }
    }
}

impl NetworkSection {
    pub fn keep_alive_interval(&self) -> Duration {
        Duration::from_secs(self.keep_alive_interval_secs.max(1))
    }

    pub fn status_delay(&self) -> Duration {
        Duration::from_millis(self.status_delay_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Like [`ServerConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.address, self.server.port);
        addr.parse().map_err(|_| ConfigError::BadAddress(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml_str = r#"
            [server]
            address = "127.0.0.1"
            port = 25566
            motd = "Test Server"

            [network]
            keep_alive_interval_secs = 5
            status_delay_ms = 0

            [logging]
            level = "debug"
        "#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 25566);
        assert_eq!(config.server.motd, "Test Server");
        assert!(config.server.favicon.is_none());
        assert_eq!(config.network.keep_alive_interval(), Duration::from_secs(5));
        assert_eq!(config.network.status_delay(), Duration::ZERO);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.bind_addr().unwrap(),
            "127.0.0.1:25566".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.address, "0.0.0.0");
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.network.keep_alive_interval_secs, 20);
        assert_eq!(config.network.status_delay_ms, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config: ServerConfig = toml::from_str("[server]\nport = 1234\n").unwrap();
        assert_eq!(config.server.port, 1234);
        assert_eq!(config.server.address, "0.0.0.0");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ServerConfig::load_or_default("/nonexistent/tinycraft.toml").unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_address_is_rejected() {
        let mut config = ServerConfig::default();
        config.server.address = "not an address".into();
        assert!(matches!(config.bind_addr(), Err(ConfigError::BadAddress(_))));
    }
}
