//! Tests for outline rendering and the TreeService facade

use rstest::rstest;

use rstree::config::RenderConfig;
use rstree::{Entry, NodeKey, Renderer, Settings, TreeNodeConvert, TreeService};

fn companies() -> Vec<Entry> {
    vec![
        Entry::new(1, None).with_field("name", "Microsoft"),
        Entry::new(3, None).with_field("name", "Adobe"),
        Entry::new(4, None).with_field("name", "Apple"),
        Entry::child_of(5, 1).with_field("name", "Google"),
        Entry::child_of(6, 5).with_field("name", "IBM"),
    ]
}

// ============================================================
// Renderer
// ============================================================

#[rstest]
#[case::defaults(Renderer::default(), "- 1\n  - 5\n    - 6\n- 3\n- 4")]
#[case::tabs(Renderer::new("\t", ""), "1\n\t5\n\t\t6\n3\n4")]
#[case::dots(Renderer::new("..", "|"), "|1\n..|5\n....|6\n|3\n|4")]
fn given_renderer_when_rendering_then_indent_follows_depth(
    #[case] renderer: Renderer,
    #[case] expected: &str,
) {
    let tree = TreeService::default().build(companies()).unwrap();

    assert_eq!(renderer.render(&tree), expected);
}

#[test]
fn given_names_as_labels_when_rendering_then_outline_of_names() {
    let tree = TreeService::default().build(companies()).unwrap();

    let out = Renderer::default().render_with(&tree, |node| {
        node.data()
            .and_then(|e| e.field("name"))
            .unwrap_or("?")
            .to_string()
    });

    assert_eq!(out, "- Microsoft\n  - Google\n    - IBM\n- Adobe\n- Apple");
}

#[test]
fn given_tree_when_converting_to_termtree_then_box_drawing_output() {
    let tree = TreeService::default().build(companies()).unwrap();

    let text = tree.to_tree_string().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "0");
    assert!(lines[1].ends_with("1"));
    assert!(lines[2].ends_with("5"));
    assert!(lines[3].ends_with("6"));
    assert!(lines[5].ends_with("4"));
}

#[test]
fn given_subtree_when_converting_to_termtree_then_starts_at_node() {
    let tree = TreeService::default().build(companies()).unwrap();
    let microsoft = tree.get_node_by_id(&NodeKey::from(1)).unwrap();

    let subtree = microsoft.to_tree_string();

    assert_eq!(subtree.root, "1");
    assert_eq!(subtree.leaves.len(), 1);
    assert_eq!(subtree.leaves[0].root, "5");
}

// ============================================================
// TreeService
// ============================================================

#[test]
fn given_settings_with_root_id_when_building_then_uses_configured_root() {
    let settings = Settings {
        root_id: NodeKey::from("top"),
        render: RenderConfig {
            indent: "  ".into(),
            marker: "* ".into(),
        },
    };
    let service = TreeService::new(settings);

    let tree = service
        .build(vec![Entry::new("a", None), Entry::child_of("b", "top")])
        .unwrap();

    assert_eq!(tree.root_id(), &NodeKey::from("top"));
    assert_eq!(service.render(&tree), "* a\n* b");
}

#[test]
fn given_invalid_records_when_building_through_service_then_wraps_tree_error() {
    let err = TreeService::default()
        .build(vec![Entry::child_of(1, 1)])
        .unwrap_err();

    assert!(matches!(
        err,
        rstree::ApplicationError::Tree(rstree::TreeError::SelfReference { .. })
    ));
    assert!(err.to_string().contains("own parent"));
}
