//! Binding failures.

use viewbind_tree::{CastError, ViewId};

/// Errors surfaced by binding access.
///
/// Absence of a *required* target is the one condition this crate raises
/// itself; type mismatches from the tree crate's cast primitive pass
/// through untouched. Neither is retried or logged — both return straight
/// to the caller of `get()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required target id was absent from the owner's subtree.
    NotFound {
        /// The id that was searched for.
        id: ViewId,
        /// The declaring property, named for the message only.
        property: &'static str,
    },
    /// The resolved element's concrete type did not match the binding.
    Cast(CastError),
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id, property } => {
                write!(f, "View ID {id} for '{property}' not found.")
            }
            Self::Cast(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Cast(err) => Some(err),
        }
    }
}

impl From<CastError> for BindError {
    fn from(err: CastError) -> Self {
        Self::Cast(err)
    }
}
