//! Source building blocks.
//!
//! - [`SourceText`] - fluent fragment of code parts with its own symbols
//! - [`SourceBuilder`] - accumulates parts for one generated unit
//! - [`ScopeGuard`] - RAII declaration scope on a builder
//! - [`CodePart`] - immutable node of the part tree
//! - [`LineState`] - line and indent machinery used when rendering
//! - [`Value`], [`FormatLocale`] - formatted payloads
//! - [`Indent`] - indentation configuration

mod arena;
mod code_part;
mod format;
mod indent;
mod line_state;
mod scope;
mod source_builder;
mod source_text;

pub use arena::SymbolArena;
pub(crate) use code_part::leaves_line_open;
pub use code_part::{CodePart, SymbolId};
pub use format::{FormatLocale, Value};
pub use indent::Indent;
pub use line_state::LineState;
pub use scope::ScopeGuard;
pub use source_builder::SourceBuilder;
pub use source_text::SourceText;
