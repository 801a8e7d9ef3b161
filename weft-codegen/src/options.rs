//! Builder configuration.
//!
//! Every field has a default, so an empty document is valid:
//!
//! ```toml
//! indent = { spaces = 2 }
//! newline = "crlf"
//! qualify_with_global = true
//!
//! [locale]
//! decimal_separator = ","
//! group_separator = "."
//!
//! [header]
//! imports = false
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::{
    Error, Result,
    builder::{FormatLocale, Indent},
};

/// Options applied to one build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceOptions {
    /// Unit pushed by declaration scopes.
    pub indent: Indent,
    pub newline: Newline,
    pub locale: FormatLocale,
    pub header: HeaderOptions,
    /// Prefix fully-qualified names with `global::`.
    pub qualify_with_global: bool,
    /// Extension appended to hint names, without the dot.
    pub hint_extension: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            newline: Newline::default(),
            locale: FormatLocale::default(),
            header: HeaderOptions::default(),
            qualify_with_global: false,
            hint_extension: "cs".to_string(),
        }
    }
}

impl SourceOptions {
    /// Parse options with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::options(e, content, filename))
    }

    /// Options without the generated-file header, handy for fragments.
    pub fn bare() -> Self {
        Self {
            header: HeaderOptions::none(),
            ..Self::default()
        }
    }
}

impl FromStr for SourceOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "weft.toml")
    }
}

/// Line terminator written for every line break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// Which pieces of the generated-file header a site builder writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderOptions {
    /// `// <auto-generated/>` marker.
    pub auto_generated: bool,
    /// One `using X;` line per site import and per namespace of a symbol
    /// spelled by its minimal name.
    pub imports: bool,
    /// File-scoped `namespace X;` declaration.
    pub namespace: bool,
}

impl HeaderOptions {
    /// No header at all.
    pub fn none() -> Self {
        Self {
            auto_generated: false,
            imports: false,
            namespace: false,
        }
    }

    /// Whether every piece is switched off.
    pub fn is_empty(&self) -> bool {
        !(self.auto_generated || self.imports || self.namespace)
    }
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            auto_generated: true,
            imports: true,
            namespace: true,
        }
    }
}
