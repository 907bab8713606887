// src/config/mod.rs
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::ConfigError;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config.json";

// --- Data Structures ---
// Fields are declared in key order so the persisted file comes out sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub authors: Vec<String>,
    pub commands: BTreeMap<String, CommandSpec>,
    pub environments: BTreeMap<String, EnvironmentSpec>,
    pub packages: BTreeSet<String>,
    pub title: Title,
    /// Custom rules tried before the built-in transliteration table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transliterations: Vec<TransliterationRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

/// A macro definition: either just its body, or a `[signature, body]` pair
/// whose signature replaces the map key as the macro name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Body(String),
    Signed(String, String),
}

impl CommandSpec {
    /// Resolves the macro name and body, falling back to `key` for the name.
    pub fn resolve<'a>(&'a self, key: &'a str) -> (&'a str, &'a str) {
        match self {
            CommandSpec::Body(body) => (key, body),
            CommandSpec::Signed(signature, body) => (signature, body),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub begin: String,
    pub end: String,
}

/// A regex rule tried before the built-in table. Input and pattern are both
/// NFC-normalized, so `e\u{301}` and `é` are the same pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransliterationRule {
    pub pattern: String,
    pub replacement: String,
}

impl Config {
    /// Loads the config at `path`, writing an empty default first if it is absent.
    ///
    /// An existing file is never rewritten. A file missing any of the five
    /// required keys fails here rather than later during rendering.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!("No config at {}, creating an empty one", path.display());
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "Loaded config from {}: {} packages, {} commands, {} environments",
            path.display(),
            config.packages.len(),
            config.commands.len(),
            config.environments.len()
        );
        Ok(config)
    }

    /// Writes the config as 4-space indented JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_json(&self) -> Result<String, ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
