use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a named type as reported by the frontend.
///
/// Only [`TypeKind::Class`], [`TypeKind::Struct`] and [`TypeKind::Interface`]
/// can be re-declared by generated code; the remaining kinds exist because a
/// frontend may still hand them over in a containment chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Delegate => write!(f, "delegate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TypeKind::Class.to_string(), "class");
        assert_eq!(TypeKind::Delegate.to_string(), "delegate");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let kind: TypeKind = serde_json::from_str("\"struct\"").unwrap();
        assert_eq!(kind, TypeKind::Struct);
    }
}
