use portfolio_os_lib::filesystem::{FileSystemNode, FileSystemTree, NodeKind, PROJECTS_DRIVE_ID, ROOT_ID};

fn every_node(node: &FileSystemNode, out: &mut Vec<String>) {
    out.push(node.id.clone());
    for child in &node.children {
        every_node(child, out);
    }
}

#[test]
fn every_node_resolves_from_its_parent_by_name() {
    let tree = FileSystemTree::portfolio();
    let mut ids = Vec::new();
    every_node(tree.root(), &mut ids);

    for id in ids.iter().filter(|id| id.as_str() != ROOT_ID) {
        let node = tree.find_node_by_id(id).unwrap();
        let parent = tree.parent_of(id).unwrap();
        assert_eq!(tree.resolve(&parent.id, &node.name).as_deref(), Some(id.as_str()));
        assert_eq!(
            tree.resolve(&parent.id, &node.name.to_uppercase()).as_deref(),
            Some(id.as_str()),
            "matching is case-insensitive for {}",
            node.name
        );
    }
}

#[test]
fn path_chain_ends_at_node_and_formats_without_root() {
    let tree = FileSystemTree::portfolio();
    let mut ids = Vec::new();
    every_node(tree.root(), &mut ids);

    for id in &ids {
        let chain = tree.path_to(id).unwrap();
        if id == ROOT_ID {
            assert!(chain.is_empty());
            assert_eq!(tree.format_path(&chain), "/");
            continue;
        }
        assert_eq!(chain.last().unwrap().id, *id);
        let formatted = tree.format_path(&chain);
        assert_eq!(formatted.split('/').count(), chain.len());
        assert!(!formatted.contains(':'), "drive colons are stripped: {formatted}");
    }
}

#[test]
fn formatted_paths_for_known_nodes() {
    let tree = FileSystemTree::portfolio();
    assert_eq!(tree.display_path("about"), "C/Users/About_Me.txt");
    assert_eq!(tree.display_path(PROJECTS_DRIVE_ID), "D");
    assert_eq!(tree.display_path("missing"), "/");
}

#[test]
fn catalog_leaves_carry_their_payloads() {
    let tree = FileSystemTree::portfolio();
    for node in tree.find_all_by_kind(NodeKind::Text) {
        assert!(node.content.is_some(), "{} has no content", node.id);
    }
    for kind in [NodeKind::Link, NodeKind::Image, NodeKind::Audio] {
        for node in tree.find_all_by_kind(kind) {
            assert!(node.url.is_some(), "{} has no url", node.id);
        }
    }
    let links: Vec<_> = tree
        .find_all_by_kind(NodeKind::Link)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(links, vec!["p1-live", "p1-repo", "p2-repo"]);
}

#[test]
fn portfolio_catalog_passes_validation() {
    let tree = FileSystemTree::portfolio();
    assert!(FileSystemTree::new(tree.root().clone()).is_ok());
}

#[test]
fn tree_round_trips_through_json() {
    let tree = FileSystemTree::portfolio();
    let json = serde_json::to_value(tree.root()).unwrap();
    assert_eq!(json["children"][0]["type"], "DISK");
    assert_eq!(json["children"][0]["label"], "System");
    let back: FileSystemNode = serde_json::from_value(json).unwrap();
    assert_eq!(&back, tree.root());
}
