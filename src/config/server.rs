// ABOUTME: Target server configuration for the SSH connection.
// ABOUTME: Parses formats like "host", "user@host", "host:port", "user@host:port".

use super::env_value::EnvValue;
use crate::error::Result;
use crate::ssh::SessionConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: EnvValue,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub user: Option<EnvValue>,

    /// Path to the SSH identity file. Falls back to the SSH agent and then
    /// the default key locations when unset.
    #[serde(default)]
    pub key_path: Option<EnvValue>,

    #[serde(default)]
    pub known_hosts: Option<PathBuf>,

    /// Accept and record unknown host keys instead of failing.
    #[serde(default = "default_trust_first_connection")]
    pub trust_first_connection: bool,

    /// Timeout applied to every remote command unless a step overrides it.
    #[serde(default = "default_command_timeout", with = "humantime_serde")]
    pub command_timeout: Duration,
}

fn default_port() -> u16 {
    22
}

fn default_trust_first_connection() -> bool {
    true
}

fn default_command_timeout() -> Duration {
    Duration::from_secs(300)
}

impl ServerConfig {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("server address cannot be empty".to_string());
        }

        // Parse format: [user@]host[:port]
        let (user_part, rest) = if let Some(at_pos) = s.find('@') {
            (Some(&s[..at_pos]), &s[at_pos + 1..])
        } else {
            (None, s)
        };

        let (host, port) = if let Some(colon_pos) = rest.rfind(':') {
            let port_str = &rest[colon_pos + 1..];
            let port = port_str
                .parse::<u16>()
                .map_err(|_| format!("invalid port: {}", port_str))?;
            (&rest[..colon_pos], port)
        } else {
            (rest, 22)
        };

        if host.is_empty() {
            return Err("hostname cannot be empty".to_string());
        }

        Ok(ServerConfig {
            host: EnvValue::literal(host),
            port,
            user: user_part.map(EnvValue::literal),
            key_path: None,
            known_hosts: None,
            trust_first_connection: true,
            command_timeout: default_command_timeout(),
        })
    }

    /// Resolve environment references and build the SSH session config.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let host = self.host.resolve()?;
        let user = match &self.user {
            Some(user) => user.resolve()?,
            None => std::env::var("USER").unwrap_or_else(|_| "root".to_string()),
        };

        let mut config = SessionConfig::new(host, user)
            .port(self.port)
            .trust_on_first_use(self.trust_first_connection)
            .command_timeout(self.command_timeout);

        if let Some(key_path) = &self.key_path {
            config = config.key_path(key_path.resolve()?);
        }
        if let Some(path) = &self.known_hosts {
            config = config.known_hosts_path(path.clone());
        }

        Ok(config)
    }
}
