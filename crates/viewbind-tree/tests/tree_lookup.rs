use std::rc::Rc;

use viewbind_tree::{Label, Panel, View, ViewHandle, ViewId, downcast, find_view_by_id};

/// Three-level tree: root → (label 1, panel 10 → (label 11, panel 20 → label 21)).
fn sample_tree() -> ViewHandle {
    let deep = Rc::new(Panel::with_id(ViewId(20)));
    deep.add_child(Rc::new(Label::with_id(ViewId(21), "deepest")));

    let mid = Rc::new(Panel::with_id(ViewId(10)));
    mid.add_child(Rc::new(Label::with_id(ViewId(11), "middle")));
    mid.add_child(deep);

    let root = Rc::new(Panel::new());
    root.add_child(Rc::new(Label::with_id(ViewId(1), "top")));
    root.add_child(mid);
    root
}

#[test]
fn lookup_reaches_every_level() {
    let root = sample_tree();
    for id in [1, 10, 11, 20, 21] {
        let found = find_view_by_id(&root, ViewId(id))
            .unwrap_or_else(|| panic!("id {id} should be present"));
        assert_eq!(found.id(), Some(ViewId(id)));
    }
    assert!(find_view_by_id(&root, ViewId(2)).is_none());
}

#[test]
fn lookup_then_typed_access() {
    let root = sample_tree();
    let found = find_view_by_id(&root, ViewId(21)).unwrap();
    let label = downcast::<Label>(found).unwrap();
    assert_eq!(label.text(), "deepest");
}

#[test]
fn containers_refuse_leaf_casts() {
    let root = sample_tree();
    let found = find_view_by_id(&root, ViewId(10)).unwrap();
    let err = downcast::<Label>(found).unwrap_err();
    assert_eq!(err.id, Some(ViewId(10)));
}

#[test]
fn mutation_changes_lookup_results() {
    let panel = Rc::new(Panel::new());
    panel.add_child(Rc::new(Label::with_id(ViewId(1), "a")));
    let root: ViewHandle = panel.clone();

    assert!(find_view_by_id(&root, ViewId(1)).is_some());
    panel.remove_children();
    assert!(find_view_by_id(&root, ViewId(1)).is_none());
}
