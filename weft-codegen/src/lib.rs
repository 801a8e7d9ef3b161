//! Deferred source construction for incremental code generators.
//!
//! Generated text is assembled as a tree of code parts in which type
//! references are placeholders. Freezing the tree picks one spelling per
//! referenced type, minimal where it is unambiguous and fully qualified
//! where short names collide, and yields a [`FrozenSource`]: an immutable,
//! comparable artifact an incremental pipeline can cache and render later.
//!
//! # Module Organization
//!
//! - [`builder`] - Code parts, fragments, the accumulating builder and scopes
//! - [`declaration`] - Containing-type and target declaration wrappers
//! - [`diagnostic`] - Precondition gate and diagnostic sink
//! - [`frozen`] - The frozen artifact, rendering and fingerprints
//! - [`options`] - TOML-configurable builder options
//! - [`resolve`] - Freeze-time symbol naming

pub mod builder;
pub mod declaration;
pub mod diagnostic;
mod error;
pub mod frozen;
pub mod options;
pub mod resolve;

pub use builder::{ScopeGuard, SourceBuilder, SourceText, Value};
pub use declaration::DeclarationEmitter;
pub use diagnostic::{Diagnostic, DiagnosticSink, Severity, SiteRequirement};
pub use error::{Error, Result};
pub use frozen::{Fingerprint, FrozenSource};
pub use options::SourceOptions;
