//! Indentation configuration for generated source.

use serde::Deserialize;

/// Indentation unit pushed by declaration scopes.
///
/// In TOML this is written as `indent = { spaces = 2 }` or `indent = "tab"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the conventional C# style.
    pub const CSHARP: Self = Self::Spaces(4);

    /// The string for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}
