//! Optional tool declarations from `tools.toml`.
use serde::Deserialize;

/// An optional third-party tool (shell, plugin manager, version manager).
///
/// A tool counts as installed when `binary` is on `PATH` or `path` exists
/// under the home directory. Installation uses `install` when given,
/// otherwise `package` through the detected system package manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tool {
    /// Display name.
    pub name: String,
    /// Executable whose presence on `PATH` means the tool is installed.
    #[serde(default)]
    pub binary: Option<String>,
    /// Path relative to home whose existence means the tool is installed.
    #[serde(default)]
    pub path: Option<String>,
    /// Commands that must be available before installing.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Package name for the system package manager.
    #[serde(default)]
    pub package: Option<String>,
    /// Explicit installer command line.
    #[serde(default)]
    pub install: Vec<String>,
}

impl Tool {
    /// Whether the entry names any way to install the tool.
    #[must_use]
    pub const fn has_installer(&self) -> bool {
        !self.install.is_empty() || self.package.is_some()
    }
}

/// The built-in tool list used when `conf/setup.toml` declares none.
#[must_use]
pub fn default_tools() -> Vec<Tool> {
    let script = |url: &str| {
        vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("curl -fsSL {url} | sh"),
        ]
    };
    vec![
        Tool {
            name: "zsh".to_string(),
            binary: Some("zsh".to_string()),
            path: None,
            requires: vec![],
            package: Some("zsh".to_string()),
            install: vec![],
        },
        Tool {
            name: "oh-my-zsh".to_string(),
            binary: None,
            path: Some(".oh-my-zsh".to_string()),
            requires: vec!["zsh".to_string(), "curl".to_string()],
            package: None,
            install: vec![
                "sh".to_string(),
                "-c".to_string(),
                "RUNZSH=no CHSH=no KEEP_ZSHRC=yes sh -c \"$(curl -fsSL https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh)\"".to_string(),
            ],
        },
        Tool {
            name: "tmux plugin manager".to_string(),
            binary: None,
            path: Some(".tmux/plugins/tpm".to_string()),
            requires: vec!["git".to_string()],
            package: None,
            install: vec![
                "sh".to_string(),
                "-c".to_string(),
                "git clone --depth 1 https://github.com/tmux-plugins/tpm \"$HOME/.tmux/plugins/tpm\"".to_string(),
            ],
        },
        Tool {
            name: "vim-plug".to_string(),
            binary: None,
            path: Some(".vim/autoload/plug.vim".to_string()),
            requires: vec!["curl".to_string()],
            package: None,
            install: vec![
                "sh".to_string(),
                "-c".to_string(),
                "curl -fLo \"$HOME/.vim/autoload/plug.vim\" --create-dirs https://raw.githubusercontent.com/junegunn/vim-plug/master/plug.vim".to_string(),
            ],
        },
        Tool {
            name: "nvm".to_string(),
            binary: None,
            path: Some(".nvm".to_string()),
            requires: vec!["curl".to_string()],
            package: None,
            install: script("https://raw.githubusercontent.com/nvm-sh/nvm/v0.40.1/install.sh"),
        },
        Tool {
            name: "pyenv".to_string(),
            binary: Some("pyenv".to_string()),
            path: Some(".pyenv".to_string()),
            requires: vec!["curl".to_string(), "git".to_string()],
            package: None,
            install: script("https://pyenv.run"),
        },
    ]
}
