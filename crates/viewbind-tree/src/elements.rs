//! Concrete tree elements: a container and a leaf.
//!
//! Both types are deliberately minimal — enough surface for consumers to
//! assemble real trees and for the binder's tests to mutate them. Children
//! and text sit behind `RefCell` so a tree can be edited through shared
//! [`ViewHandle`]s.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{View, ViewHandle, ViewId};

/// Container element holding an ordered list of children.
#[derive(Default)]
pub struct Panel {
    id: Option<ViewId>,
    children: RefCell<Vec<ViewHandle>>,
}

impl Panel {
    /// Create a panel without an id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a panel carrying `id`.
    #[must_use]
    pub fn with_id(id: ViewId) -> Self {
        Self {
            id: Some(id),
            children: RefCell::new(Vec::new()),
        }
    }

    /// Append a child.
    pub fn add_child(&self, child: ViewHandle) {
        self.children.borrow_mut().push(child);
    }

    /// Detach every child.
    pub fn remove_children(&self) {
        self.children.borrow_mut().clear();
    }
}

impl View for Panel {
    fn id(&self) -> Option<ViewId> {
        self.id
    }

    fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    fn child_at(&self, index: usize) -> Option<ViewHandle> {
        self.children.borrow().get(index).cloned()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

/// Leaf element carrying a piece of text.
#[derive(Default)]
pub struct Label {
    id: Option<ViewId>,
    text: RefCell<String>,
}

impl Label {
    /// Create a label without an id.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: RefCell::new(text.into()),
        }
    }

    /// Create a label carrying `id`.
    #[must_use]
    pub fn with_id(id: ViewId, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: RefCell::new(text.into()),
        }
    }

    /// Current text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text content.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }
}

impl View for Label {
    fn id(&self) -> Option<ViewId> {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

impl std::fmt::Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Label")
            .field("id", &self.id)
            .field("text", &*self.text.borrow())
            .finish()
    }
}
