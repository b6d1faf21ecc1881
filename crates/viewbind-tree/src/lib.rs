#![forbid(unsafe_code)]

//! View-tree abstraction and id lookup for viewbind.
//!
//! This crate defines the seam between the binder and whatever actually owns
//! the element tree: the [`View`] trait exposes an optional integer
//! identifier plus indexed child access, and [`find_view_by_id`] walks that
//! surface depth-first. Concrete [`Panel`] (container) and [`Label`] (leaf)
//! elements are provided for consumers and tests.
//!
//! # Architecture
//!
//! Elements are shared single-threaded via [`ViewHandle`] (`Rc<dyn View>`).
//! Containers keep children behind `RefCell`, so trees can be mutated through
//! shared handles without `&mut` plumbing. Typed access goes through
//! [`downcast`], the cast-or-fail primitive; everything else is untyped
//! `dyn View`.
//!
//! # Invariants
//!
//! 1. [`find_view_by_id`] visits the root first, then children in index
//!    order, recursing into each child before moving to its sibling. The
//!    first match in that order wins.
//! 2. `child_at(i)` is `Some` for every `i < child_count()` observed in the
//!    same borrow; lookups tolerate a `None` by skipping the index.
//! 3. A [`ViewId`] identifies an element within one search, not globally:
//!    duplicate ids are legal and resolve to the first match.
//!
//! # Failure Modes
//!
//! - Id absent from the subtree: [`find_view_by_id`] returns `None`.
//! - Wrong concrete type: [`downcast`] returns [`CastError`] naming the
//!   requested type and the element's id, if it has one.

use std::any::Any;
use std::rc::Rc;

mod elements;
mod find;

pub use elements::{Label, Panel};
pub use find::find_view_by_id;

/// Numeric identifier of an element within a view tree.
///
/// Ids are assigned by whoever builds the tree; uniqueness is a convention,
/// not an enforced invariant. Display prints the raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

impl ViewId {
    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ViewId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared handle to a tree element.
pub type ViewHandle = Rc<dyn View>;

/// An element of a view tree.
///
/// Leaves keep the default `child_count`/`child_at`; containers override
/// both. `as_any`/`into_any` are the downcast hooks — implementations
/// return `self`:
///
/// ```ignore
/// fn as_any(&self) -> &dyn Any { self }
/// fn into_any(self: Rc<Self>) -> Rc<dyn Any> { self }
/// ```
pub trait View: Any {
    /// The element's identifier, if it has one.
    fn id(&self) -> Option<ViewId>;

    /// Number of immediate children.
    fn child_count(&self) -> usize {
        0
    }

    /// Immediate child at `index`, if any.
    fn child_at(&self, index: usize) -> Option<ViewHandle> {
        let _ = index;
        None
    }

    /// Borrow as `Any` for reference downcasts.
    fn as_any(&self) -> &dyn Any;

    /// Convert the shared handle to `Rc<dyn Any>` for owned downcasts.
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// Failed attempt to view an element as a concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastError {
    /// Id of the element that refused the cast, if it has one.
    pub id: Option<ViewId>,
    /// Name of the requested type.
    pub expected: &'static str,
}

impl std::fmt::Display for CastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "view ID {id} is not a `{}`", self.expected),
            None => write!(f, "view is not a `{}`", self.expected),
        }
    }
}

impl std::error::Error for CastError {}

/// Cast-or-fail: view a shared handle as its concrete type.
///
/// # Errors
///
/// Returns [`CastError`] when the element's concrete type is not `T`.
pub fn downcast<T: View>(view: ViewHandle) -> Result<Rc<T>, CastError> {
    let id = view.id();
    view.into_any().downcast::<T>().map_err(|_| CastError {
        id,
        expected: std::any::type_name::<T>(),
    })
}
