use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Represents the complete configuration for git-release.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// What goes in front of release tags.
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Remotes that receive pushed tags, in order.
    #[serde(default = "default_remotes")]
    pub remotes: Vec<String>,

    /// Whether to ask for a tag annotation message.
    #[serde(default = "default_ask_tag_message")]
    pub ask_tag_message: bool,

    /// Project version; falls back to the working tree's Cargo.toml when unset.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_remotes() -> Vec<String> {
    vec!["origin".to_string()]
}

fn default_ask_tag_message() -> bool {
    true
}

/// Where the manifest lives and which tracked files stay out of it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,

    /// Regular expression; matching paths are left out of the manifest.
    #[serde(default = "default_exclude")]
    pub exclude: Option<String>,
}

fn default_manifest_path() -> String {
    "Manifest.txt".to_string()
}

fn default_exclude() -> Option<String> {
    Some(r"tmp$|CVS|TAGS|\.(svn|git|DS_Store)".to_string())
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
            exclude: default_exclude(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            remotes: default_remotes(),
            ask_tag_message: default_ask_tag_message(),
            version: None,
            manifest: ManifestConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Per-run overrides of computed values.
///
/// Each field can come from the environment (`FROM`, `VERSION`,
/// `PRERELEASE` or `PRE`, `TAG`) or from a command-line flag; flags win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Lower bound of the changelog range.
    pub from: Option<String>,
    /// Version label for the changelog header and the tag name.
    pub version: Option<String>,
    /// Suffix appended to the version as `.<prerelease>`.
    pub prerelease: Option<String>,
    /// Explicit tag name, bypassing prefix and version.
    pub tag: Option<String>,
    /// Tag annotation message; skips the prompt.
    pub message: Option<String>,
}

impl Overrides {
    /// Reads overrides from the process environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Overrides {
            from: env_value("FROM"),
            version: env_value("VERSION"),
            prerelease: env_value("PRERELEASE").or_else(|| env_value("PRE")),
            tag: env_value("TAG"),
            message: None,
        }
    }

    /// Layers `other` on top of `self`; any field set in `other` wins.
    pub fn merge(self, other: Overrides) -> Self {
        Overrides {
            from: other.from.or(self.from),
            version: other.version.or(self.version),
            prerelease: other.prerelease.or(self.prerelease),
            tag: other.tag.or(self.tag),
            message: other.message.or(self.message),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
