//! The four binding kinds and owner-wide reset.
//!
//! A binding is a plain value declared as a field of the owner-holding
//! struct: the target id(s), the property name for error messages, and a
//! unique cache slot. `get(&owner)` resolves on first access and answers
//! from the cache afterwards.
//!
//! # Invariants
//!
//! 1. Per `(owner, binding)`, the tree is searched at most once between
//!    resets. A cached value is returned even if the element has since been
//!    detached from the owner's subtree.
//! 2. Optional bindings memoize absence: a miss is cached as `None` / an
//!    omitted element, not retried.
//! 3. List bindings resolve ids strictly in the supplied order. Required
//!    lists fail on the first missing id; optional lists keep the found
//!    subset in supplied order.
//! 4. The typed downcast is applied on every access over the untyped cached
//!    handle, so a type mismatch surfaces on every `get`, not just the
//!    first.
//!
//! # Failure Modes
//!
//! - Required target absent at lookup time: [`BindError::NotFound`], message
//!   `View ID <id> for '<property>' not found.`
//! - Element present but of the wrong concrete type: [`BindError::Cast`].
//! - Optional bindings never fail on absence.

use std::marker::PhantomData;
use std::rc::Rc;

use viewbind_tree::{View, ViewHandle, ViewId, downcast, find_view_by_id};

use crate::cache::{CacheEntry, SlotId, with_store};
use crate::error::BindError;

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Declare a required single-view binding.
#[must_use]
pub fn bind_view<T: View>(id: ViewId, property: &'static str) -> ViewBinding<T> {
    ViewBinding {
        id,
        property,
        slot: SlotId::next(),
        _marker: PhantomData,
    }
}

/// Declare an optional single-view binding.
#[must_use]
pub fn bind_optional_view<T: View>(id: ViewId, property: &'static str) -> OptionalViewBinding<T> {
    OptionalViewBinding {
        id,
        property,
        slot: SlotId::next(),
        _marker: PhantomData,
    }
}

/// Declare a required list binding over `ids`, resolved in the given order.
#[must_use]
pub fn bind_views<T: View>(
    ids: impl IntoIterator<Item = ViewId>,
    property: &'static str,
) -> ViewListBinding<T> {
    ViewListBinding {
        ids: ids.into_iter().collect(),
        property,
        slot: SlotId::next(),
        _marker: PhantomData,
    }
}

/// Declare an optional list binding over `ids`; missing ids are omitted.
#[must_use]
pub fn bind_optional_views<T: View>(
    ids: impl IntoIterator<Item = ViewId>,
    property: &'static str,
) -> OptionalViewListBinding<T> {
    OptionalViewListBinding {
        ids: ids.into_iter().collect(),
        property,
        slot: SlotId::next(),
        _marker: PhantomData,
    }
}

/// Remove every cached binding for `owner`.
///
/// The next access on any of the owner's bindings runs a fresh search.
pub fn reset(owner: &ViewHandle) {
    with_store(|store| store.invalidate(owner));
}

// ---------------------------------------------------------------------------
// ViewBinding<T> — required single view
// ---------------------------------------------------------------------------

/// Required binding to a single view.
pub struct ViewBinding<T: View> {
    id: ViewId,
    property: &'static str,
    slot: SlotId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: View> ViewBinding<T> {
    /// Resolve against `owner`, searching on first access only.
    ///
    /// # Errors
    ///
    /// [`BindError::NotFound`] when the id is absent at lookup time;
    /// [`BindError::Cast`] when the element is not a `T`.
    pub fn get(&self, owner: &ViewHandle) -> Result<Rc<T>, BindError> {
        let entry = with_store(|store| {
            store.get_or_try_insert(owner, self.slot, || {
                match find_view_by_id(owner, self.id) {
                    Some(view) => Ok(CacheEntry::Single(view)),
                    None => Err(BindError::NotFound {
                        id: self.id,
                        property: self.property,
                    }),
                }
            })
        })?;
        match entry {
            CacheEntry::Single(view) => Ok(downcast::<T>(view)?),
            _ => unreachable!("slot holds a required single-view entry"),
        }
    }

    /// The target id this binding resolves.
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }
}

impl<T: View> Clone for ViewBinding<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            property: self.property,
            slot: self.slot,
            _marker: PhantomData,
        }
    }
}

impl<T: View> std::fmt::Debug for ViewBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewBinding")
            .field("id", &self.id)
            .field("property", &self.property)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// OptionalViewBinding<T> — optional single view
// ---------------------------------------------------------------------------

/// Optional binding to a single view; absence is a cached `None`.
pub struct OptionalViewBinding<T: View> {
    id: ViewId,
    property: &'static str,
    slot: SlotId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: View> OptionalViewBinding<T> {
    /// Resolve against `owner`, searching on first access only.
    ///
    /// # Errors
    ///
    /// Only [`BindError::Cast`]; absence is `Ok(None)`.
    pub fn get(&self, owner: &ViewHandle) -> Result<Option<Rc<T>>, BindError> {
        let entry = with_store(|store| {
            store.get_or_try_insert(owner, self.slot, || {
                Ok(CacheEntry::Maybe(find_view_by_id(owner, self.id)))
            })
        })?;
        match entry {
            CacheEntry::Maybe(Some(view)) => Ok(Some(downcast::<T>(view)?)),
            CacheEntry::Maybe(None) => Ok(None),
            _ => unreachable!("slot holds an optional single-view entry"),
        }
    }

    /// The target id this binding resolves.
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }
}

impl<T: View> Clone for OptionalViewBinding<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            property: self.property,
            slot: self.slot,
            _marker: PhantomData,
        }
    }
}

impl<T: View> std::fmt::Debug for OptionalViewBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalViewBinding")
            .field("id", &self.id)
            .field("property", &self.property)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ViewListBinding<T> — required view list
// ---------------------------------------------------------------------------

/// Required binding to an ordered list of views.
pub struct ViewListBinding<T: View> {
    ids: Vec<ViewId>,
    property: &'static str,
    slot: SlotId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: View> ViewListBinding<T> {
    /// Resolve against `owner`, searching on first access only.
    ///
    /// Elements come back in the supplied-id order.
    ///
    /// # Errors
    ///
    /// [`BindError::NotFound`] naming the first missing id in declaration
    /// order; [`BindError::Cast`] when an element is not a `T`.
    pub fn get(&self, owner: &ViewHandle) -> Result<Vec<Rc<T>>, BindError> {
        let entry = with_store(|store| {
            store.get_or_try_insert(owner, self.slot, || {
                let mut found = Vec::with_capacity(self.ids.len());
                for &id in &self.ids {
                    match find_view_by_id(owner, id) {
                        Some(view) => found.push(view),
                        None => {
                            return Err(BindError::NotFound {
                                id,
                                property: self.property,
                            });
                        }
                    }
                }
                Ok(CacheEntry::Many(found))
            })
        })?;
        match entry {
            CacheEntry::Many(views) => Ok(views
                .into_iter()
                .map(downcast::<T>)
                .collect::<Result<Vec<_>, _>>()?),
            _ => unreachable!("slot holds a required list entry"),
        }
    }

    /// The target ids, in resolution order.
    #[must_use]
    pub fn ids(&self) -> &[ViewId] {
        &self.ids
    }
}

impl<T: View> Clone for ViewListBinding<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            property: self.property,
            slot: self.slot,
            _marker: PhantomData,
        }
    }
}

impl<T: View> std::fmt::Debug for ViewListBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewListBinding")
            .field("ids", &self.ids)
            .field("property", &self.property)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// OptionalViewListBinding<T> — optional view list
// ---------------------------------------------------------------------------

/// Optional binding to an ordered list of views; missing ids are omitted.
pub struct OptionalViewListBinding<T: View> {
    ids: Vec<ViewId>,
    property: &'static str,
    slot: SlotId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: View> OptionalViewListBinding<T> {
    /// Resolve against `owner`, searching on first access only.
    ///
    /// The result holds only the found elements, preserving supplied-id
    /// order over that subset.
    ///
    /// # Errors
    ///
    /// Only [`BindError::Cast`]; absence shortens the list instead.
    pub fn get(&self, owner: &ViewHandle) -> Result<Vec<Rc<T>>, BindError> {
        let entry = with_store(|store| {
            store.get_or_try_insert(owner, self.slot, || {
                let found = self
                    .ids
                    .iter()
                    .filter_map(|&id| find_view_by_id(owner, id))
                    .collect();
                Ok(CacheEntry::Many(found))
            })
        })?;
        match entry {
            CacheEntry::Many(views) => Ok(views
                .into_iter()
                .map(downcast::<T>)
                .collect::<Result<Vec<_>, _>>()?),
            _ => unreachable!("slot holds an optional list entry"),
        }
    }

    /// The target ids, in resolution order.
    #[must_use]
    pub fn ids(&self) -> &[ViewId] {
        &self.ids
    }
}

impl<T: View> Clone for OptionalViewListBinding<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            property: self.property,
            slot: self.slot,
            _marker: PhantomData,
        }
    }
}

impl<T: View> std::fmt::Debug for OptionalViewListBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalViewListBinding")
            .field("ids", &self.ids)
            .field("property", &self.property)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewbind_tree::{Label, Panel};

    fn label(id: u32) -> ViewHandle {
        Rc::new(Label::with_id(ViewId(id), ""))
    }

    #[test]
    fn distinct_bindings_for_same_id_resolve_independently() {
        let panel = Rc::new(Panel::new());
        panel.add_child(label(1));
        let owner: ViewHandle = panel.clone();

        let a = bind_view::<Label>(ViewId(1), "a");
        let b = bind_view::<Label>(ViewId(1), "b");
        let first = a.get(&owner).unwrap();

        // b has its own slot; it re-searches and finds the same element.
        let second = b.get(&owner).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn cloned_binding_shares_the_cache_slot() {
        let panel = Rc::new(Panel::new());
        panel.add_child(label(1));
        let owner: ViewHandle = panel.clone();

        let binding = bind_optional_view::<Label>(ViewId(1), "shared");
        let twin = binding.clone();
        assert!(binding.get(&owner).unwrap().is_some());

        panel.remove_children();
        // The clone answers from the same (owner, slot) entry.
        assert!(twin.get(&owner).unwrap().is_some());
    }

    #[test]
    fn one_binding_caches_per_owner() {
        let binding = bind_optional_view::<Label>(ViewId(1), "per_owner");

        let with_view = Rc::new(Panel::new());
        with_view.add_child(label(1));
        let with_owner: ViewHandle = with_view;
        let without_owner: ViewHandle = Rc::new(Panel::new());

        assert!(binding.get(&with_owner).unwrap().is_some());
        assert!(binding.get(&without_owner).unwrap().is_none());
        // Neither answer leaked into the other owner's entry.
        assert!(binding.get(&with_owner).unwrap().is_some());
    }

    #[test]
    fn debug_formats_name_targets() {
        let single = bind_view::<Label>(ViewId(3), "title");
        assert!(format!("{single:?}").contains("title"));

        let list = bind_views::<Label>([ViewId(1), ViewId(2)], "rows");
        let debug = format!("{list:?}");
        assert!(debug.contains("rows"));
        assert!(debug.contains("ViewId(1)"));
    }
}
