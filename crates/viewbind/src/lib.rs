#![forbid(unsafe_code)]

//! Lazy, cached view lookup by numeric identifier.
//!
//! Owners declare bindings once, as plain struct fields, instead of
//! re-running manual tree searches on every access:
//!
//! - [`bind_view`]: required single view — absent target is an error.
//! - [`bind_optional_view`]: optional single view — absence is a cached
//!   `None`.
//! - [`bind_views`]: required ordered list — fails naming the first
//!   missing id.
//! - [`bind_optional_views`]: optional ordered list — missing ids are
//!   omitted.
//! - [`reset`]: drop every cached binding for one owner.
//!
//! # Usage
//!
//! ```ignore
//! use std::rc::Rc;
//! use viewbind::{bind_view, reset, ViewHandle, ViewId};
//! use viewbind_tree::{Label, Panel};
//!
//! struct Header {
//!     root: ViewHandle,
//!     title: viewbind::ViewBinding<Label>,
//! }
//!
//! let panel = Rc::new(Panel::new());
//! panel.add_child(Rc::new(Label::with_id(ViewId(1), "hello")));
//! let header = Header {
//!     root: panel.clone(),
//!     title: bind_view(ViewId(1), "title"),
//! };
//!
//! let title = header.title.get(&header.root)?; // searches once
//! let again = header.title.get(&header.root)?; // answers from cache
//! assert!(Rc::ptr_eq(&title, &again));
//!
//! reset(&header.root); // next access searches again
//! ```
//!
//! # Architecture
//!
//! Resolved values live in a thread-local store keyed by
//! `(owner identity, binding slot)`; owners are held only through `Weak`
//! back-references and pruned lazily once reclaimed (see [`sweep`]). All
//! lookups run synchronously on the calling thread at the moment of
//! `get()` — no background work, no blocking beyond the in-process
//! depth-first traversal.
//!
//! # Invariants
//!
//! 1. Per `(owner, binding)`, the tree is searched at most once between
//!    resets; detaching the element afterwards does not invalidate the
//!    cached handle.
//! 2. Optional bindings memoize absence rather than retrying.
//! 3. List results preserve the supplied-id order.
//! 4. The store never keeps an owner alive.

pub mod binding;
mod cache;
pub mod error;

pub use binding::{
    OptionalViewBinding, OptionalViewListBinding, ViewBinding, ViewListBinding, bind_optional_view,
    bind_optional_views, bind_view, bind_views, reset,
};
pub use cache::{cached_owner_count, sweep};
pub use error::BindError;
pub use viewbind_tree::{CastError, View, ViewHandle, ViewId};
