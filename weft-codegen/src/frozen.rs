//! The frozen artifact.
//!
//! A [`FrozenSource`] is what an incremental pipeline caches: two builds
//! that produce equal artifacts render identical text, so comparing the
//! artifacts is enough to skip re-emission.

use std::{fmt, sync::Arc};

use weft_core::Symbol;

use crate::{
    Error, Result,
    builder::{CodePart, FormatLocale, LineState, Value},
    options::{Newline, SourceOptions},
    resolve::NameTable,
};

/// Options that affect rendering and therefore artifact identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RenderSettings {
    pub newline: Newline,
    pub locale: FormatLocale,
}

impl From<&SourceOptions> for RenderSettings {
    fn from(options: &SourceOptions) -> Self {
        Self {
            newline: options.newline,
            locale: options.locale.clone(),
        }
    }
}

/// Immutable part tree plus resolved names.
///
/// Equality and hashing are structural over the parts (deep and
/// order-sensitive), the name table and the render settings. Cloning is
/// cheap since the parts are shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrozenSource {
    parts: Arc<[CodePart]>,
    names: NameTable,
    settings: RenderSettings,
}

impl FrozenSource {
    pub(crate) fn from_parts(
        parts: Vec<CodePart>,
        names: NameTable,
        settings: RenderSettings,
    ) -> Self {
        Self {
            parts: parts.into(),
            names,
            settings,
        }
    }

    /// Root parts, header first when the builder had a site.
    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    /// Display names fixed at freeze.
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Rendering settings captured from the builder options.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// The spelling chosen for `symbol`, if the build referenced it.
    pub fn display_name(&self, symbol: &Symbol) -> Option<&str> {
        self.names.display_name(symbol)
    }

    /// Render to text. Pure: the same artifact always yields the same string.
    pub fn render(&self) -> Result<String> {
        let mut state = LineState::new(self.settings.newline.as_str());
        self.render_parts(&self.parts, &mut state)?;
        Ok(state.finish())
    }

    /// Content hash that is stable across processes, for persistent caches.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"weft-frozen-v1");
        write_str(&mut hasher, self.settings.newline.as_str());
        write_char(&mut hasher, self.settings.locale.decimal_separator);
        write_char(&mut hasher, self.settings.locale.group_separator);
        write_str(&mut hasher, &self.settings.locale.negative_sign);
        write_len(&mut hasher, self.names.len());
        for (id, entry) in self.names.iter() {
            hasher.update(&id.0.to_le_bytes());
            write_str(&mut hasher, &entry.identity);
            write_str(&mut hasher, &entry.display);
        }
        write_parts(&mut hasher, &self.parts);
        Fingerprint(*hasher.finalize().as_bytes())
    }

    fn render_parts(&self, parts: &[CodePart], state: &mut LineState<'_>) -> Result<()> {
        for part in parts {
            match part {
                CodePart::Literal(text) => state.append_multiline(text),
                CodePart::LineBreak => state.append_line(),
                CodePart::Symbol { id, alignment } => {
                    let name = self.names.get(*id).ok_or_else(|| {
                        Error::UnresolvedSymbolReference {
                            symbol: format!("#{}", id.index()),
                        }
                    })?;
                    state.append_aligned(name, *alignment);
                }
                CodePart::Formatted {
                    value,
                    alignment,
                    format,
                } => {
                    let text = value.format(format.as_deref(), &self.settings.locale);
                    state.append_aligned(&text, *alignment);
                }
                CodePart::Indent { indent, parts } => {
                    state.push_indent(indent);
                    self.render_parts(parts, state)?;
                    state.pop_indent()?;
                }
                CodePart::CaptureIndent(parts) => {
                    state.push_captured_indent();
                    self.render_parts(parts, state)?;
                    state.pop_indent()?;
                }
            }
        }
        Ok(())
    }
}

/// A 32-byte Blake3 content hash of a [`FrozenSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Raw BLAKE3 digest.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

fn write_len(hasher: &mut blake3::Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn write_str(hasher: &mut blake3::Hasher, s: &str) {
    write_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

fn write_char(hasher: &mut blake3::Hasher, c: char) {
    hasher.update(&u32::from(c).to_le_bytes());
}

fn write_alignment(hasher: &mut blake3::Hasher, alignment: Option<i32>) {
    if let Some(width) = alignment {
        hasher.update(&[1]).update(&width.to_le_bytes());
    } else {
        hasher.update(&[0]);
    }
}

fn write_parts(hasher: &mut blake3::Hasher, parts: &[CodePart]) {
    write_len(hasher, parts.len());
    for part in parts {
        match part {
            CodePart::Literal(text) => {
                hasher.update(&[0]);
                write_str(hasher, text);
            }
            CodePart::LineBreak => {
                hasher.update(&[1]);
            }
            CodePart::Symbol { id, alignment } => {
                hasher.update(&[2]).update(&id.0.to_le_bytes());
                write_alignment(hasher, *alignment);
            }
            CodePart::Formatted {
                value,
                alignment,
                format,
            } => {
                hasher.update(&[3]);
                write_value(hasher, value);
                write_alignment(hasher, *alignment);
                if let Some(format) = format {
                    hasher.update(&[1]);
                    write_str(hasher, format);
                } else {
                    hasher.update(&[0]);
                }
            }
            CodePart::Indent { indent, parts } => {
                hasher.update(&[4]);
                write_str(hasher, indent);
                write_parts(hasher, parts);
            }
            CodePart::CaptureIndent(parts) => {
                hasher.update(&[5]);
                write_parts(hasher, parts);
            }
        }
    }
}

fn write_value(hasher: &mut blake3::Hasher, value: &Value) {
    match value {
        Value::None => {
            hasher.update(&[0]);
        }
        Value::Bool(b) => {
            hasher.update(&[1, u8::from(*b)]);
        }
        Value::Char(c) => {
            hasher.update(&[2]).update(&u32::from(*c).to_le_bytes());
        }
        Value::Int(i) => {
            hasher.update(&[3]).update(&i.to_le_bytes());
        }
        Value::UInt(u) => {
            hasher.update(&[4]).update(&u.to_le_bytes());
        }
        Value::Float(f) => {
            hasher.update(&[5]).update(&f.to_bits().to_le_bytes());
        }
        Value::Text(s) => {
            hasher.update(&[6]);
            write_str(hasher, s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SymbolId;

    fn frozen(parts: Vec<CodePart>) -> FrozenSource {
        FrozenSource::from_parts(parts, NameTable::default(), RenderSettings::default())
    }

    #[test]
    fn test_render_literal() {
        let source = frozen(vec![CodePart::Literal("hello".into())]);
        assert_eq!(source.render().unwrap(), "hello");
    }

    #[test]
    fn test_render_nested_indent() {
        let source = frozen(vec![
            CodePart::Literal("a {".into()),
            CodePart::LineBreak,
            CodePart::Indent {
                indent: "  ".into(),
                parts: vec![CodePart::Literal("b\nc".into()), CodePart::LineBreak],
            },
            CodePart::Literal("}".into()),
        ]);
        assert_eq!(source.render().unwrap(), "a {\n  b\n  c\n}");
    }

    #[test]
    fn test_render_formatted_alignment() {
        let source = frozen(vec![
            CodePart::Formatted {
                value: Value::from(42),
                alignment: Some(-6),
                format: Some("D3".into()),
            },
            CodePart::Literal("|".into()),
        ]);
        assert_eq!(source.render().unwrap(), "042   |");
    }

    #[test]
    fn test_unmapped_symbol_fails_render() {
        let source = frozen(vec![CodePart::Symbol {
            id: SymbolId(0),
            alignment: None,
        }]);
        assert!(matches!(
            source.render(),
            Err(Error::UnresolvedSymbolReference { .. })
        ));
    }

    #[test]
    fn test_fingerprint_tracks_structure() {
        let a = frozen(vec![CodePart::Literal("ab".into())]);
        let b = frozen(vec![CodePart::Literal("ab".into())]);
        let split = frozen(vec![
            CodePart::Literal("a".into()),
            CodePart::Literal("b".into()),
        ]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), split.fingerprint());
        assert_ne!(a, split);
        assert_eq!(a.fingerprint().to_string().len(), 64);
    }

    #[test]
    fn test_settings_are_part_of_identity() {
        let lf = frozen(vec![CodePart::LineBreak]);
        let crlf = FrozenSource::from_parts(
            vec![CodePart::LineBreak],
            NameTable::default(),
            RenderSettings {
                newline: Newline::CrLf,
                ..RenderSettings::default()
            },
        );
        assert_ne!(lf, crlf);
        assert_eq!(crlf.render().unwrap(), "\r\n");
    }
}
