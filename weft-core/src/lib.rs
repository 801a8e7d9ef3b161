//! Core data model for the weft source builder.
//!
//! Everything in this crate is supplied by an analysis frontend: the
//! declaration site a generator runs for, and the identities of the types
//! the generated text refers to.

mod hint;
mod kind;
mod namespace;
mod output;
mod site;
mod symbol;

pub use kind::TypeKind;
pub use namespace::Namespace;
pub use output::GeneratedSource;
pub use site::{DeclarationSite, MemberSignature, ParameterType};
pub use symbol::{Symbol, TypeSegment};
