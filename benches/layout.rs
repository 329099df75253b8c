use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use family_tree_layout::config::LayoutConfig;
use family_tree_layout::ir::{Direction, Edge, Node, NodeData};
use family_tree_layout::layout::compute_layout;
use family_tree_layout::tree::{FamilyTree, Relation};
use std::hint::black_box;

/// Balanced family: every couple has `children` kids, `generations` deep.
fn family_graph(generations: usize, children: usize) -> (Vec<Node>, Vec<Edge>) {
    let mut nodes = vec![Node::new("g0", NodeData::named("root"))];
    let mut edges = Vec::new();
    let mut frontier = vec!["g0".to_string()];
    let mut counter = 1usize;
    for _ in 1..generations {
        let mut next = Vec::new();
        for parent in &frontier {
            let partner = format!("s{counter}");
            counter += 1;
            nodes.push(Node::new(partner.clone(), NodeData::named("partner")));
            edges.push(Edge::pairing(format!("m{counter}"), parent.clone(), partner));
            for _ in 0..children {
                let child = format!("g{counter}");
                counter += 1;
                nodes.push(Node::new(child.clone(), NodeData::named("child")));
                edges.push(Edge::hierarchy(format!("c{counter}"), parent.clone(), child.clone()));
                next.push(child);
            }
        }
        frontier = next;
    }
    (nodes, edges)
}

/// Adds a cross-link every `stride` nodes so crossing reduction has work to do.
fn tangled_graph(size: usize, stride: usize) -> (Vec<Node>, Vec<Edge>) {
    let nodes: Vec<Node> = (0..size)
        .map(|idx| Node::new(format!("n{idx}"), NodeData::named("n")))
        .collect();
    let mut edges = Vec::new();
    for idx in 1..size {
        edges.push(Edge::hierarchy(
            format!("t{idx}"),
            format!("n{}", (idx - 1) / 2),
            format!("n{idx}"),
        ));
        if idx % stride == 0 {
            edges.push(Edge::hierarchy(
                format!("x{idx}"),
                format!("n{}", idx / 3),
                format!("n{idx}"),
            ));
        }
    }
    (nodes, edges)
}

fn bench_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout");
    for (name, (nodes, edges)) in [
        ("family_4x3", family_graph(4, 3)),
        ("family_5x3", family_graph(5, 3)),
        ("tangled_200", tangled_graph(200, 5)),
    ] {
        for direction in [Direction::Vertical, Direction::Horizontal] {
            group.bench_with_input(
                BenchmarkId::new(name, direction),
                &(nodes.clone(), edges.clone()),
                |b, (nodes, edges)| {
                    b.iter(|| compute_layout(black_box(nodes), black_box(edges), direction, &config))
                },
            );
        }
    }
    group.finish();
}

fn bench_incremental_edits(c: &mut Criterion) {
    c.bench_function("tree_add_50_relatives", |b| {
        b.iter(|| {
            let mut tree = FamilyTree::default();
            let mut last = tree.add_person(NodeData::named("root"));
            for idx in 0..50 {
                let relation = if idx % 5 == 0 {
                    Relation::Spouse
                } else {
                    Relation::Child
                };
                if let Some(id) = tree.add_relative(&last, relation, NodeData::named("r")) {
                    if relation == Relation::Child {
                        last = id;
                    }
                }
            }
            black_box(tree.into_document())
        })
    });
}

criterion_group!(benches, bench_layout, bench_incremental_edits);
criterion_main!(benches);
