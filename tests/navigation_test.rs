//! Navigation wrapper: forwards node edits to its root.

use navtree::domain::{BaseUri, DomainError, Navigation, SiteId, SiteType, ROOT_NODE_NAME};

fn classic() -> Navigation {
    Navigation::new(Some(SiteId::portal("classic")), 1).unwrap()
}

#[test]
fn given_absent_site_when_creating_then_invalid_argument() {
    let err = Navigation::new(None, 0).unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn given_site_when_creating_then_root_is_empty_default_node() {
    let nav = Navigation::new(Some(SiteId::new(SiteType::Group, "platform")), 5).unwrap();

    assert_eq!(nav.site_id().site_type, SiteType::Group);
    assert_eq!(nav.priority(), 5);
    assert!(nav.nodes().unwrap().is_empty());
    assert_eq!(nav.tree().name(nav.root()).unwrap(), ROOT_NODE_NAME);
    assert!(nav.is_nodes_loaded().unwrap());
}

#[test]
fn given_priority_when_setting_then_updated() {
    let mut nav = classic();
    nav.set_priority(7);
    assert_eq!(nav.priority(), 7);
}

#[test]
fn given_nodes_when_adding_then_forwarded_to_root_in_order() {
    let mut nav = classic();
    let home = nav.create_node("home").unwrap();
    let about = nav.create_node("about").unwrap();
    nav.add_node(home).unwrap();
    nav.add_node(about).unwrap();

    assert_eq!(nav.nodes().unwrap(), &[home, about]);
    assert_eq!(nav.node("about").unwrap(), Some(about));
    assert_eq!(nav.node("missing").unwrap(), None);
}

#[test]
fn given_duplicate_when_adding_then_rejected_by_root() {
    let mut nav = classic();
    let first = nav.create_node("home").unwrap();
    let second = nav.create_node("home").unwrap();
    nav.add_node(first).unwrap();

    let err = nav.add_node(second).unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
    assert_eq!(nav.nodes().unwrap().len(), 1);
}

#[test]
fn given_node_when_removing_then_forwarded_to_root() {
    let mut nav = classic();
    let home = nav.create_node("home").unwrap();
    nav.add_node(home).unwrap();

    assert!(nav.remove_node("home").unwrap());
    assert!(!nav.remove_node("home").unwrap());
    assert!(nav.nodes().unwrap().is_empty());
    assert_eq!(nav.tree().parent(home).unwrap(), None);
}

#[test]
fn given_base_uri_when_resolving_nested_node_then_root_name_not_in_uri() {
    let mut nav = classic();
    nav.set_base_uri(Some(
        BaseUri::parse("http://localhost:8080/portal/classic/").unwrap(),
    ))
    .unwrap();
    let parent = nav.create_node("parent").unwrap();
    nav.add_node(parent).unwrap();
    let tree = nav.tree_mut();
    let child = tree.create_node("child").unwrap();
    tree.add_node(parent, child).unwrap();

    let resolved = nav.resolve("parent/child").unwrap().unwrap();
    assert_eq!(resolved, child);
    assert_eq!(
        nav.uri(child).unwrap().unwrap(),
        "http://localhost:8080/portal/classic/parent/child/"
    );
}

#[test]
fn given_placeholder_root_when_loader_marks_loaded_then_flag_visible() {
    let mut nav = classic();
    let root = nav.root();
    nav.tree_mut().set_nodes_loaded(root, false).unwrap();
    assert!(!nav.is_nodes_loaded().unwrap());

    nav.tree_mut().set_nodes_loaded(root, true).unwrap();
    assert!(nav.is_nodes_loaded().unwrap());
}
