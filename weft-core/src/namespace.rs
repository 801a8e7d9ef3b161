use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// Dotted namespace path; the empty path is the global namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// The global namespace.
    pub fn global() -> Self {
        Self::default()
    }

    /// Build from segments, outermost first.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this is the global namespace.
    pub fn is_global(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<&str> for Namespace {
    fn from(s: &str) -> Self {
        Self::new(s.split('.').map(str::trim).filter(|segment| !segment.is_empty()))
    }
}

impl FromStr for Namespace {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Serialize for Namespace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
