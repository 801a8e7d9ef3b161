//! Diagnostics reported before a build starts.
//!
//! A declaration site that fails a structural precondition is reported once
//! through a [`DiagnosticSink`] and never built.

use serde::Serialize;
use weft_core::DeclarationSite;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Blocks generation for the site.
    Error,
    /// Reported, but generation continues.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message handed to the host's diagnostic channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable identifier, e.g. `WEFT001`.
    pub code: String,
    pub message: String,
    /// Display name of the rejected declaration.
    pub location: Option<String>,
}

impl Diagnostic {
    /// An error diagnostic with no location.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            location: None,
        }
    }

    /// A warning diagnostic with no location.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// Receives diagnostics from the precondition gate.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Structural precondition a generator places on its declaration site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiteRequirement {
    /// Any site is accepted.
    #[default]
    None,
    /// Every type in the chain must be declared in a mergeable (partial) form.
    Partial,
}

impl SiteRequirement {
    /// Check the site, returning the diagnostic to report when it is rejected.
    pub fn check(self, site: &DeclarationSite) -> Option<Diagnostic> {
        match self {
            SiteRequirement::None => None,
            SiteRequirement::Partial if site.is_partial => None,
            SiteRequirement::Partial => Some(
                Diagnostic::error(
                    "WEFT001",
                    format!(
                        "'{}' must be declared partial to receive generated members",
                        site.target.name
                    ),
                )
                .at(site.display_name()),
            ),
        }
    }
}
