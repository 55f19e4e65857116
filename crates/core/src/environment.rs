//! Environment variable maps captured from sourced result spaces

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keys that are artifacts of the shell invocation itself rather than of the
/// sourced result space. They are stripped from every resolved environment.
pub const BLACKLISTED_KEYS: [&str; 2] = ["_", "PWD"];

/// Environment variables captured from a sourced result space
///
/// Keys are unique; insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Map of environment variable names to values
    #[serde(flatten)]
    pub vars: HashMap<String, String>,
}

impl Environment {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment from a map
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Consume the environment, returning the underlying map
    pub fn into_map(self) -> HashMap<String, String> {
        self.vars
    }

    /// Get an environment variable value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Set an environment variable
    pub fn set(&mut self, key: String, value: String) {
        self.vars.insert(key, value);
    }

    /// Remove an environment variable, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Check if an environment variable exists
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Get the number of environment variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the environment is empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over environment variables
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.vars.iter()
    }
}

/// Parse the `KEY=VALUE` text dump emitted by the build tool's env query.
///
/// Each line is split on the first `=`; lines without a `=` and lines with an
/// empty key are skipped. This is the interface to the dump format only, not
/// a general environment parser: values spanning multiple lines are not
/// reassembled.
pub fn parse_env_str(text: &str) -> Environment {
    let mut env = Environment::new();
    for line in text.lines() {
        if let Some((key, value)) = line.split_once('=')
            && !key.is_empty()
        {
            env.set(key.to_string(), value.to_string());
        }
    }
    env
}
