//! Integration tests for the public layout API
//!
//! These tests exercise the full pipeline the way an embedding UI or the
//! CLI would: build a graph from declarations, run the engine, apply
//! placements, capture a snapshot.

use tributary::{
    Graph, LinkDecl, NodeDecl, PortRef,
    layout::Engine,
    place::{PlacementMap, apply_placements, pinned_placements},
    snapshot::LayoutSnapshot,
};

fn node(id: &str) -> NodeDecl {
    NodeDecl::new(id).with_inputs(["in"]).with_outputs(["out"])
}

fn link(src: &str, dst: &str) -> LinkDecl {
    LinkDecl::new(PortRef::new(src, "out"), PortRef::new(dst, "in"))
}

#[test]
fn test_layout_then_snapshot() {
    let mut graph = Graph::build(
        vec![node("source"), node("filter"), node("sink")],
        vec![link("source", "filter"), link("filter", "sink")],
    )
    .unwrap();

    let report = Engine::new().run(&mut graph);
    assert_eq!(report.crossings(), 0);

    let snapshot = LayoutSnapshot::capture(&graph);
    assert_eq!(snapshot.nodes.len(), 3);

    // A simple chain flows strictly left to right.
    assert!(snapshot.nodes[0].x < snapshot.nodes[1].x);
    assert!(snapshot.nodes[1].x < snapshot.nodes[2].x);
    assert!(snapshot.nodes.iter().all(|n| !n.pinned));
}

#[test]
fn test_scripted_placement_survives_relayout() {
    let mut graph = Graph::build(
        vec![node("a"), node("b"), node("c")],
        vec![link("a", "b"), link("b", "c")],
    )
    .unwrap();

    let placements = PlacementMap::from([("b".into(), (500.0, 300.0))]);
    apply_placements(&mut graph, &placements).unwrap();

    Engine::new().run(&mut graph);

    let b = graph.index_of(&"b".into()).unwrap();
    assert_eq!(graph.node(b).position().x(), 500.0);
    assert_eq!(graph.node(b).position().y(), 300.0);

    // The pin set written back matches what was applied.
    assert_eq!(pinned_placements(&graph), placements);
}

#[test]
fn test_unpinned_node_fits_between_pinned_anchors() {
    // Two pinned anchors near the origin; the node linked to both must
    // land somewhere that overlaps neither.
    let mut graph = Graph::build(
        vec![node("a"), node("b"), node("c")],
        vec![link("a", "c"), link("b", "c")],
    )
    .unwrap();

    let placements = PlacementMap::from([
        ("a".into(), (0.0, 0.0)),
        ("b".into(), (100.0, 0.0)),
    ]);
    apply_placements(&mut graph, &placements).unwrap();

    Engine::new().run(&mut graph);

    let a = graph.index_of(&"a".into()).unwrap();
    let b = graph.index_of(&"b".into()).unwrap();
    let c = graph.index_of(&"c".into()).unwrap();
    let c_bounds = graph.node(c).bounds();

    assert!(!c_bounds.intersects(graph.node(a).bounds()));
    assert!(!c_bounds.intersects(graph.node(b).bounds()));
}

#[test]
fn test_feedback_link_is_reported_in_snapshot() {
    let mut graph = Graph::build(
        vec![node("a"), node("b")],
        vec![link("a", "b"), link("b", "a")],
    )
    .unwrap();

    Engine::new().run(&mut graph);
    let snapshot = LayoutSnapshot::capture(&graph);

    let flags: Vec<bool> = snapshot.links.iter().map(|l| l.feedback).collect();
    assert_eq!(flags, [false, true]);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for arbitrary DAG-ish link sets over `n` nodes: links may
    /// point either way, so cycles do occur and exercise cycle breaking.
    fn arbitrary_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (2usize..10).prop_flat_map(|n| {
            let links = prop::collection::vec((0..n, 0..n), 0..20);
            (Just(n), links)
        })
    }

    fn build(n: usize, raw_links: &[(usize, usize)]) -> Graph {
        let nodes = (0..n).map(|i| node(&format!("n{i}"))).collect();
        let links = raw_links
            .iter()
            .map(|&(src, dst)| link(&format!("n{src}"), &format!("n{dst}")))
            .collect();
        Graph::build(nodes, links).unwrap()
    }

    proptest! {
        #[test]
        fn layout_is_deterministic((n, raw_links) in arbitrary_graph()) {
            let mut first = build(n, &raw_links);
            let mut second = build(n, &raw_links);

            Engine::new().run(&mut first);
            Engine::new().run(&mut second);

            for (a, b) in first.node_indices().zip(second.node_indices()) {
                prop_assert_eq!(first.node(a).position(), second.node(b).position());
            }
        }

        #[test]
        fn non_feedback_links_point_forward((n, raw_links) in arbitrary_graph()) {
            let mut graph = build(n, &raw_links);
            Engine::new().run(&mut graph);

            for idx in graph.link_indices() {
                let (src, dst) = graph.link_endpoints(idx);
                if src == dst || graph.link(idx).feedback() {
                    continue;
                }
                prop_assert!(
                    graph.node(src).position().x() < graph.node(dst).position().x(),
                    "link {} points backwards",
                    graph.link(idx).source()
                );
            }
        }

        #[test]
        fn unpinned_nodes_never_overlap((n, raw_links) in arbitrary_graph()) {
            let mut graph = build(n, &raw_links);
            Engine::new().run(&mut graph);

            let placed: Vec<_> = graph.nodes_with_indices().collect();
            for (i, (_, a)) in placed.iter().enumerate() {
                for (_, b) in placed.iter().skip(i + 1) {
                    prop_assert!(
                        !a.bounds().intersects(b.bounds()),
                        "{} and {} overlap",
                        a.id(),
                        b.id()
                    );
                }
            }
        }
    }
}
