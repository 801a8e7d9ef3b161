//! The code-part tree.

use super::format::Value;

/// Handle of a symbol interned in a [`SymbolArena`](super::SymbolArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One immutable fragment of generated text.
///
/// Symbol references are placeholders: their spelling is decided when the
/// whole tree is frozen, not when they are appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodePart {
    /// Raw text; embedded `\n` (or `\r\n`) are rendered as line breaks.
    Literal(String),
    LineBreak,
    Symbol {
        id: SymbolId,
        alignment: Option<i32>,
    },
    Formatted {
        value: Value,
        alignment: Option<i32>,
        format: Option<String>,
    },
    /// Children rendered with `indent` pushed onto the indent stack.
    Indent {
        indent: String,
        parts: Vec<CodePart>,
    },
    /// Children rendered with the text pending on the current line pushed as
    /// the indent.
    CaptureIndent(Vec<CodePart>),
}

impl CodePart {
    /// Rewrite symbol handles through `map`, indexed by the old handle.
    pub(crate) fn remap(&self, map: &[SymbolId]) -> CodePart {
        match self {
            CodePart::Symbol { id, alignment } => CodePart::Symbol {
                id: map[id.index()],
                alignment: *alignment,
            },
            CodePart::Indent { indent, parts } => CodePart::Indent {
                indent: indent.clone(),
                parts: parts.iter().map(|p| p.remap(map)).collect(),
            },
            CodePart::CaptureIndent(parts) => {
                CodePart::CaptureIndent(parts.iter().map(|p| p.remap(map)).collect())
            }
            other => other.clone(),
        }
    }
}

/// Whether the current output line still holds text after `parts`, given
/// whether it did before them.
pub(crate) fn leaves_line_open(parts: &[CodePart], open: bool) -> bool {
    parts.iter().fold(open, |open, part| match part {
        CodePart::Literal(text) if text.is_empty() => open,
        CodePart::Literal(text) => !text.ends_with('\n'),
        CodePart::LineBreak => false,
        CodePart::Symbol { .. } => true,
        CodePart::Formatted {
            value: Value::None,
            alignment: None,
            ..
        } => open,
        CodePart::Formatted {
            value: Value::Text(text),
            alignment: None,
            ..
        } if text.is_empty() => open,
        CodePart::Formatted { .. } => true,
        CodePart::Indent { parts, .. } | CodePart::CaptureIndent(parts) => {
            leaves_line_open(parts, open)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_nested() {
        let part = CodePart::Indent {
            indent: "  ".into(),
            parts: vec![
                CodePart::Symbol {
                    id: SymbolId(0),
                    alignment: Some(3),
                },
                CodePart::CaptureIndent(vec![CodePart::Symbol {
                    id: SymbolId(1),
                    alignment: None,
                }]),
            ],
        };
        let remapped = part.remap(&[SymbolId(5), SymbolId(2)]);
        let expected = CodePart::Indent {
            indent: "  ".into(),
            parts: vec![
                CodePart::Symbol {
                    id: SymbolId(5),
                    alignment: Some(3),
                },
                CodePart::CaptureIndent(vec![CodePart::Symbol {
                    id: SymbolId(2),
                    alignment: None,
                }]),
            ],
        };
        assert_eq!(remapped, expected);
    }

    #[test]
    fn test_leaves_line_open() {
        let lit = |s: &str| CodePart::Literal(s.into());
        assert!(!leaves_line_open(&[], false));
        assert!(leaves_line_open(&[lit("abc")], false));
        assert!(!leaves_line_open(&[lit("abc"), CodePart::LineBreak], false));
        assert!(!leaves_line_open(&[lit("abc\n")], true));
        assert!(leaves_line_open(&[lit("")], true));
        assert!(leaves_line_open(
            &[CodePart::Indent {
                indent: "    ".into(),
                parts: vec![lit("x")],
            }],
            false
        ));
    }

    #[test]
    fn test_empty_formatted_text_keeps_line_state() {
        let empty = CodePart::Formatted {
            value: Value::Text(String::new()),
            format: None,
            alignment: None,
        };
        assert!(!leaves_line_open(std::slice::from_ref(&empty), false));
        assert!(leaves_line_open(&[empty], true));
    }
}
