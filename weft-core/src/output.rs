use std::fmt;

/// A finished unit of generated text, handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedSource {
    hint_name: String,
    text: String,
}

impl GeneratedSource {
    /// Pair a hint name with its generated text.
    pub fn new(hint_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            hint_name: hint_name.into(),
            text: text.into(),
        }
    }

    /// Identifier the host uses to name or route the text.
    pub fn hint_name(&self) -> &str {
        &self.hint_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for GeneratedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
