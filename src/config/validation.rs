//! Configuration validation.
//!
//! Validators never fail loading; they collect [`ValidationWarning`]s that
//! commands log before any task runs.
use std::collections::HashSet;
use std::path::Path;

use super::placeholders::Placeholder;
use super::tools::Tool;
use crate::platform::Platform;

/// Configuration file the warnings refer to.
const SOURCE: &str = "setup.toml";

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration section (e.g., "placeholder", "tool").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item` reported by `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.source, self.item, self.message)
    }
}

/// Trait for configuration validators.
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self, root: &Path, platform: &Platform) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator.
    fn name(&self) -> &'static str;
}

/// Validator for `[[placeholder]]` entries.
#[derive(Debug)]
pub struct PlaceholderValidator<'a> {
    placeholders: &'a [Placeholder],
}

impl<'a> PlaceholderValidator<'a> {
    /// Wrap the loaded placeholders.
    #[must_use]
    pub const fn new(placeholders: &'a [Placeholder]) -> Self {
        Self { placeholders }
    }
}

impl ConfigValidator for PlaceholderValidator<'_> {
    fn validate(&self, root: &Path, _platform: &Platform) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let source = format!("{SOURCE} [placeholder]");

        for placeholder in self.placeholders {
            let token = &placeholder.token;
            if token.is_empty() {
                warnings.push(ValidationWarning::new(&source, &placeholder.file, "token is empty"));
            } else if token.contains(['<', '>']) || token.chars().any(char::is_whitespace) {
                warnings.push(ValidationWarning::new(
                    &source,
                    token,
                    "token must be a bare name without angle brackets or whitespace",
                ));
            }

            if Path::new(&placeholder.file).is_absolute() || placeholder.file.starts_with('/') {
                warnings.push(ValidationWarning::new(
                    &source,
                    &placeholder.file,
                    "file path should be relative to the repository root",
                ));
            } else if !root.join(&placeholder.file).exists() {
                warnings.push(ValidationWarning::new(
                    &source,
                    &placeholder.file,
                    "file does not exist",
                ));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "placeholders"
    }
}

/// Validator for `[[tool]]` entries.
#[derive(Debug)]
pub struct ToolValidator<'a> {
    tools: &'a [Tool],
}

impl<'a> ToolValidator<'a> {
    /// Wrap the loaded tools.
    #[must_use]
    pub const fn new(tools: &'a [Tool]) -> Self {
        Self { tools }
    }
}

impl ConfigValidator for ToolValidator<'_> {
    fn validate(&self, _root: &Path, _platform: &Platform) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let source = format!("{SOURCE} [tool]");
        let mut seen = HashSet::new();

        for tool in self.tools {
            if !seen.insert(tool.name.as_str()) {
                warnings.push(ValidationWarning::new(&source, &tool.name, "duplicate tool name"));
            }
            if !tool.has_installer() {
                warnings.push(ValidationWarning::new(
                    &source,
                    &tool.name,
                    "install command is empty and no package is named",
                ));
            }
            if tool.binary.is_none() && tool.path.is_none() {
                warnings.push(ValidationWarning::new(
                    &source,
                    &tool.name,
                    "neither binary nor path is set; the tool will always be installed",
                ));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "tools"
    }
}

/// Run every validator over the loaded configuration.
#[must_use]
pub fn validate_all(
    config: &super::Config,
    root: &Path,
    platform: &Platform,
) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator + '_>> = vec![
        Box::new(PlaceholderValidator::new(&config.placeholder)),
        Box::new(ToolValidator::new(&config.tool)),
    ];

    validators
        .iter()
        .flat_map(|v| {
            let warnings = v.validate(root, platform);
            tracing::debug!("{} validator: {} warning(s)", v.name(), warnings.len());
            warnings
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::platform::Os;

    fn placeholder(file: &str, token: &str) -> Placeholder {
        Placeholder {
            file: file.to_string(),
            token: token.to_string(),
            prompt: None,
            default_command: vec![],
            secret: false,
        }
    }

    fn tool(name: &str, install: &[&str]) -> Tool {
        Tool {
            name: name.to_string(),
            binary: Some(name.to_string()),
            path: None,
            requires: vec![],
            package: None,
            install: install.iter().map(ToString::to_string).collect(),
        }
    }

    const PLATFORM: Platform = Platform::new(Os::Linux, false);

    #[test]
    fn well_formed_placeholder_has_no_warnings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gitconfig"), "<GIT_EMAIL>").unwrap();
        let entries = [placeholder("gitconfig", "GIT_EMAIL")];
        let warnings = PlaceholderValidator::new(&entries).validate(dir.path(), &PLATFORM);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn bracketed_token_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gitconfig"), "").unwrap();
        let entries = [placeholder("gitconfig", "<GIT_EMAIL>")];
        let warnings = PlaceholderValidator::new(&entries).validate(dir.path(), &PLATFORM);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("angle brackets"));
    }

    #[test]
    fn whitespace_token_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gitconfig"), "").unwrap();
        let entries = [placeholder("gitconfig", "GIT EMAIL")];
        let warnings = PlaceholderValidator::new(&entries).validate(dir.path(), &PLATFORM);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn absolute_placeholder_path_warns() {
        let dir = tempfile::tempdir().unwrap();
        let entries = [placeholder("/etc/gitconfig", "GIT_EMAIL")];
        let warnings = PlaceholderValidator::new(&entries).validate(dir.path(), &PLATFORM);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("relative"));
    }

    #[test]
    fn missing_placeholder_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let entries = [placeholder("absent", "TOKEN")];
        let warnings = PlaceholderValidator::new(&entries).validate(dir.path(), &PLATFORM);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "file does not exist");
    }

    #[test]
    fn duplicate_tool_names_warn() {
        let tools = [tool("nvm", &["sh"]), tool("nvm", &["sh"])];
        let warnings = ToolValidator::new(&tools).validate(Path::new("/"), &PLATFORM);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "duplicate tool name");
    }

    #[test]
    fn empty_install_warns() {
        let tools = [tool("nvm", &[])];
        let warnings = ToolValidator::new(&tools).validate(Path::new("/"), &PLATFORM);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("install command is empty"));
    }

    #[test]
    fn warning_display_names_source_and_item() {
        let w = ValidationWarning::new("setup.toml [tool]", "nvm", "duplicate tool name");
        assert_eq!(w.to_string(), "setup.toml [tool]: nvm: duplicate tool name");
    }
}
