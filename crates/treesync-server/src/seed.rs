use indexmap::IndexMap;
use serde_json::json;
use treesync_core::SyncTree;

/// Builds the example tree the adapter serves out of the box: a root, two
/// category nodes, and the events under each. This is the adapter's own
/// fixture, grounded directly in `basic_example_tree_create` from the
/// original service this crate replaces.
pub fn build_example_tree() -> SyncTree {
    let mut tree = SyncTree::new(payload([("name", json!("root_node"))])).expect("non-empty root payload");
    let root = tree.root_pk();

    let cse = tree
        .add_node(root, payload([("category_name", json!("CSE events"))]))
        .expect("root exists");
    let ece = tree
        .add_node(root, payload([("category_name", json!("ECE events"))]))
        .expect("root exists");

    let _ = tree
        .add_node(
            cse,
            payload([
                ("event_name", json!("Esya Hackathon")),
                ("hours", json!(16)),
            ]),
        )
        .expect("CSE exists");
    let _ = tree
        .add_node(
            cse,
            payload([
                ("event_name", json!("Foobar Prosort")),
                ("prizes", json!(10000)),
            ]),
        )
        .expect("CSE exists");
    let _ = tree
        .add_node(
            cse,
            payload([
                ("event_name", json!("HackOn")),
                ("organisers", json!(["a", "b"])),
            ]),
        )
        .expect("CSE exists");
    let _ = tree
        .add_node(
            ece,
            payload([("event_name", json!("IOT")), ("food", json!(true))]),
        )
        .expect("ECE exists");

    tree.refresh_tree();
    tree
}

fn payload<const N: usize>(pairs: [(&str, serde_json::Value); N]) -> IndexMap<String, serde_json::Value> {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}
