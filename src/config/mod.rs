//! Optional `conf/setup.toml` configuration.
//!
//! Every section is optional; a missing file yields the built-in defaults.
pub mod loader;
pub mod placeholders;
pub mod tools;
pub mod validation;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Location of the config file relative to the source root.
pub const CONFIG_FILE: &str = "conf/setup.toml";

/// Top-level names never linked into the home directory.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    ".git",
    ".gitignore",
    ".gitmodules",
    ".github",
    "README.md",
    "LICENSE",
    "conf",
    "src",
    "tests",
    "Cargo.toml",
    "Cargo.lock",
    "build.rs",
    "install.sh",
];

/// Default backup directory name under the target root.
pub const DEFAULT_BACKUP_DIR: &str = ".dotfiles_backup";

/// All loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source root the configuration was loaded from.
    #[serde(skip)]
    pub root: PathBuf,
    /// Linking options.
    #[serde(default)]
    pub link: LinkConfig,
    /// Placeholder tokens to fill in.
    #[serde(default)]
    pub placeholder: Vec<placeholders::Placeholder>,
    /// Optional tools; the built-in list when the file declares none.
    #[serde(default = "tools::default_tools")]
    pub tool: Vec<tools::Tool>,
    /// Default shell options.
    #[serde(default)]
    pub shell: ShellConfig,
}

/// `[link]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Replaces the default exclusion set when given.
    pub exclude: Vec<String>,
    /// Backup directory name, relative to the target root.
    pub backup_dir: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUSIONS.iter().map(ToString::to_string).collect(),
            backup_dir: DEFAULT_BACKUP_DIR.to_string(),
        }
    }
}

/// `[shell]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Shell binary name looked up on `PATH`.
    pub name: String,
    /// Offer to change the login shell at all.
    pub enabled: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            name: "zsh".to_string(),
            enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            link: LinkConfig::default(),
            placeholder: Vec::new(),
            tool: tools::default_tools(),
            shell: ShellConfig::default(),
        }
    }
}

impl Config {
    /// Load `conf/setup.toml` from the given source root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = loader::load_config(&root.join(CONFIG_FILE))?;
        config.root = root.to_path_buf();
        Ok(config)
    }
}
