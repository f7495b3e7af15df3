//! Placeholder declarations from `placeholders.toml`.
use serde::Deserialize;

/// A `<TOKEN>` in a tracked configuration file that must be filled in on
/// first setup (e-mail addresses, API tokens, signing keys).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placeholder {
    /// File containing the token, relative to the source root.
    pub file: String,
    /// Token name without angle brackets (`GIT_EMAIL` for `<GIT_EMAIL>`).
    pub token: String,
    /// Question shown to the user; defaults to the token name.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Command whose trimmed stdout provides the default value.
    #[serde(default)]
    pub default_command: Vec<String>,
    /// Read the value without echo.
    #[serde(default)]
    pub secret: bool,
}

impl Placeholder {
    /// The literal marker searched for in the file.
    #[must_use]
    pub fn marker(&self) -> String {
        format!("<{}>", self.token)
    }

    /// Text shown when asking for the value.
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or(&self.token)
    }
}
