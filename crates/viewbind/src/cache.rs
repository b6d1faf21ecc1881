//! Thread-local, weakly owner-keyed store of resolved bindings.
//!
//! The store maps owner identity (the `Rc` allocation address) to that
//! owner's slot map. Each binding value owns a process-unique [`SlotId`], so
//! `(owner, slot)` identifies one binding site on one owner instance.
//!
//! # Invariants
//!
//! 1. At most one value is ever computed per `(owner, slot)` between resets:
//!    a stored entry is returned verbatim until [`LazyCache::invalidate`]
//!    removes the owner's whole slot map.
//! 2. The store holds only `Weak` back-references to owners; it never
//!    extends an owner's lifetime. Entries for reclaimed owners are pruned
//!    by [`sweep`], which also runs opportunistically once the map passes a
//!    high-water mark.
//! 3. A dead `Weak` found under a key belongs to a reclaimed owner whose
//!    address was reused; the old slot map is discarded before the new
//!    owner's first entry lands under that key.
//!
//! Handles are `Rc`, hence `!Send`; one store per thread is the whole
//! concurrency story for this crate.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use tracing::{debug, trace};

use viewbind_tree::{View, ViewHandle};

use crate::error::BindError;

/// Sweep is considered once the owner map grows past this many entries.
const SWEEP_HIGH_WATER: usize = 16;

/// Global counter for unique binding slots.
static SLOT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one binding site. Allocated once per binding value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(u64);

impl SlotId {
    pub(crate) fn next() -> Self {
        Self(SLOT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    fn raw(self) -> u64 {
        self.0
    }
}

/// A resolved binding value, untyped. The variant always matches the kind
/// of the binding that owns the slot, since slots are never shared across
/// binding kinds.
#[derive(Clone)]
pub(crate) enum CacheEntry {
    Single(ViewHandle),
    Maybe(Option<ViewHandle>),
    Many(Vec<ViewHandle>),
}

struct OwnerSlots {
    owner: Weak<dyn View>,
    slots: AHashMap<SlotId, CacheEntry>,
}

pub(crate) struct LazyCache {
    owners: AHashMap<usize, OwnerSlots>,
    high_water: usize,
}

impl LazyCache {
    fn new() -> Self {
        Self {
            owners: AHashMap::new(),
            high_water: SWEEP_HIGH_WATER,
        }
    }

    fn key(owner: &ViewHandle) -> usize {
        Rc::as_ptr(owner).cast::<()>() as usize
    }

    /// Return the cached entry for `(owner, slot)`, computing it with
    /// `init` on first access. A failed `init` stores nothing, so the next
    /// access retries the lookup.
    pub(crate) fn get_or_try_insert(
        &mut self,
        owner: &ViewHandle,
        slot: SlotId,
        init: impl FnOnce() -> Result<CacheEntry, BindError>,
    ) -> Result<CacheEntry, BindError> {
        let key = Self::key(owner);

        // Address reuse: drop a reclaimed owner's stale generation.
        if self
            .owners
            .get(&key)
            .is_some_and(|held| held.owner.strong_count() == 0)
        {
            self.owners.remove(&key);
        }

        if let Some(entry) = self.owners.get(&key).and_then(|held| held.slots.get(&slot)) {
            trace!(owner = key, slot = slot.raw(), "binding cache hit");
            return Ok(entry.clone());
        }

        let value = init()?;
        debug!(owner = key, slot = slot.raw(), "binding cache populated");
        self.owners
            .entry(key)
            .or_insert_with(|| OwnerSlots {
                owner: Rc::downgrade(owner),
                slots: AHashMap::new(),
            })
            .slots
            .insert(slot, value.clone());
        self.maybe_sweep();
        Ok(value)
    }

    /// Remove every cached entry for `owner`.
    pub(crate) fn invalidate(&mut self, owner: &ViewHandle) {
        let key = Self::key(owner);
        if self.owners.remove(&key).is_some() {
            debug!(owner = key, "binding cache reset");
        }
    }

    /// Prune entries whose owner has been reclaimed.
    pub(crate) fn sweep(&mut self) {
        let before = self.owners.len();
        self.owners.retain(|_, held| held.owner.strong_count() > 0);
        let pruned = before - self.owners.len();
        if pruned > 0 {
            debug!(pruned, "binding cache swept");
        }
    }

    fn maybe_sweep(&mut self) {
        if self.owners.len() > self.high_water {
            self.sweep();
            self.high_water = (self.owners.len() * 2).max(SWEEP_HIGH_WATER);
        }
    }

    pub(crate) fn owner_count(&self) -> usize {
        self.owners.len()
    }
}

thread_local! {
    static STORE: RefCell<LazyCache> = RefCell::new(LazyCache::new());
}

pub(crate) fn with_store<R>(f: impl FnOnce(&mut LazyCache) -> R) -> R {
    STORE.with(|store| f(&mut store.borrow_mut()))
}

/// Number of owners with at least one cached binding on this thread.
///
/// Diagnostic only; dead owners linger here until the next [`sweep`].
#[must_use]
pub fn cached_owner_count() -> usize {
    with_store(|store| store.owner_count())
}

/// Prune cache entries whose owner has been reclaimed.
///
/// Also runs opportunistically when the store grows, so calling this is
/// only needed to make reclamation observable at a specific point.
pub fn sweep() {
    with_store(|store| store.sweep());
}
