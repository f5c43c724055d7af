// ABOUTME: Environment-sourced configuration values.
// ABOUTME: Lets secrets like hosts and key paths come from the invoking environment.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn literal(value: impl Into<String>) -> Self {
        EnvValue::Literal(value.into())
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

/// Resolve a config env map into assignments sorted by key.
/// Step rendering needs a stable order.
pub fn resolve_env_assignments(map: &HashMap<String, EnvValue>) -> Result<Vec<(String, String)>> {
    let mut resolved = map
        .iter()
        .map(|(k, v)| v.resolve().map(|value| (k.clone(), value)))
        .collect::<Result<Vec<_>>>()?;
    resolved.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(resolved)
}
