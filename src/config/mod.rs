// ABOUTME: Configuration types and parsing for redeploy.yml.
// ABOUTME: Handles YAML parsing, env interpolation, and the template written by init.

mod env_value;
mod server;
mod step;

pub use env_value::{EnvValue, resolve_env_assignments};
pub use server::ServerConfig;
pub use step::{DeployStep, PlannedStep, shell_quote};

use crate::error::{Error, Result};
use crate::types::ServiceName;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "redeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "redeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".redeploy/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_service_name")]
    pub service: ServiceName,

    #[serde(deserialize_with = "deserialize_server")]
    pub server: ServerConfig,

    /// Remote directory every step runs from.
    #[serde(default)]
    pub workdir: Option<String>,

    /// Environment exported before each step command.
    #[serde(default)]
    pub env: HashMap<String, EnvValue>,

    #[serde(deserialize_with = "deserialize_steps")]
    pub steps: NonEmpty<DeployStep>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Render every step into its final command string, resolving the env
    /// map once for the whole sequence.
    pub fn step_plan(&self) -> Result<Vec<PlannedStep>> {
        let env = resolve_env_assignments(&self.env)?;

        Ok(self
            .steps
            .iter()
            .map(|step| PlannedStep {
                name: step.name.clone(),
                command: step.render(self.workdir.as_deref(), &env),
                allow_failure: step.allow_failure,
                timeout: step.timeout,
            })
            .collect())
    }
}

pub fn init_config(dir: &Path, service: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let service = ServiceName::new(service.unwrap_or("my-api"))
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    std::fs::write(&config_path, template_yaml(&service))?;

    Ok(())
}

/// Template mirroring the usual redeploy sequence: free the service port,
/// refresh the checkout, install dependencies, relaunch detached.
fn template_yaml(service: &ServiceName) -> String {
    format!(
        r#"service: {service}
server:
  host: server.example.com
  user: deploy
workdir: /srv/{service}
steps:
  - name: free service port
    command: fuser -k 5001/tcp
    allow_failure: true
  - name: update checkout
    command: git pull
  - name: install dependencies
    command: pip install -r requirements.txt
  - name: relaunch service
    command: nohup uvicorn main:app --host 0.0.0.0 --port 5001 >> uvicorn.log 2>&1 < /dev/null &
"#
    )
}

// Custom deserializers

fn deserialize_service_name<'de, D>(deserializer: D) -> std::result::Result<ServiceName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ServiceName::new(&s).map_err(serde::de::Error::custom)
}

fn deserialize_server<'de, D>(deserializer: D) -> std::result::Result<ServerConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entry = ServerEntry::deserialize(deserializer)?;
    entry.into_server_config().map_err(serde::de::Error::custom)
}

fn deserialize_steps<'de, D>(
    deserializer: D,
) -> std::result::Result<NonEmpty<DeployStep>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let steps: Vec<DeployStep> = Vec::deserialize(deserializer)?;

    for step in &steps {
        if step.name.trim().is_empty() {
            return Err(serde::de::Error::custom("step name cannot be empty"));
        }
        if step.command.trim().is_empty() {
            return Err(serde::de::Error::custom(format!(
                "step '{}' has an empty command",
                step.name
            )));
        }
    }

    NonEmpty::from_vec(steps)
        .ok_or_else(|| serde::de::Error::custom("at least one step is required"))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerEntry {
    Simple(String),
    Detailed(ServerConfig),
}

impl ServerEntry {
    fn into_server_config(self) -> std::result::Result<ServerConfig, String> {
        match self {
            ServerEntry::Simple(s) => ServerConfig::parse(&s),
            ServerEntry::Detailed(c) => Ok(c),
        }
    }
}
