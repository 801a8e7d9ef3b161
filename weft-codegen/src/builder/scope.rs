//! RAII scope guards.

use std::ops::{Deref, DerefMut};

use tracing::warn;

use super::SourceBuilder;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScopeId(pub(crate) u64);

/// An open scope on a [`SourceBuilder`].
///
/// Dereferences to the builder so the body can be appended through the
/// guard. Closing writes the trailing text; it happens explicitly with
/// [`close`](Self::close) or implicitly on drop, so early returns and `?`
/// still produce balanced output.
#[must_use = "dropping the guard closes the scope immediately"]
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    builder: &'a mut SourceBuilder,
    id: ScopeId,
    closed: bool,
}

impl<'a> ScopeGuard<'a> {
    pub(super) fn new(builder: &'a mut SourceBuilder, id: ScopeId) -> Self {
        Self {
            builder,
            id,
            closed: false,
        }
    }

    /// Close the scope, failing if it is not the innermost open one.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.builder.close_scope(self.id)
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = SourceBuilder;

    fn deref(&self) -> &SourceBuilder {
        self.builder
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut SourceBuilder {
        self.builder
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.builder.close_scope(self.id) {
            warn!(
                error = %err,
                panicking = std::thread::panicking(),
                "scope guard dropped without closing cleanly"
            );
        }
    }
}
