//! Depth-first id lookup over the [`View`] surface.

use crate::{View, ViewHandle, ViewId};

/// Find the first element whose id equals `id`, searching `root` itself and
/// then its subtree depth-first in child-index order.
///
/// Returns `None` when no element in the subtree carries the id. Cost is
/// O(subtree size); callers that access repeatedly are expected to cache
/// (see the `viewbind` crate).
#[must_use]
pub fn find_view_by_id(root: &ViewHandle, id: ViewId) -> Option<ViewHandle> {
    if root.id() == Some(id) {
        return Some(root.clone());
    }
    find_in_children(root.as_ref(), id)
}

fn find_in_children(node: &dyn View, id: ViewId) -> Option<ViewHandle> {
    for index in 0..node.child_count() {
        let Some(child) = node.child_at(index) else {
            continue;
        };
        if child.id() == Some(id) {
            return Some(child);
        }
        if let Some(found) = find_in_children(child.as_ref(), id) {
            return Some(found);
        }
    }
    None
}
