use threadviz_core::ThreadNode;

use crate::graph::model::{LayoutEdge, LayoutNode, ThreadLayout};

// Every leaf owns one horizontal slot; a parent sits centered over its
// first and last child. Subtree extent is therefore its leaf count.
const LEAF_SLOT: f64 = 1.0;

/// Lays the thread out top-down inside `[0, width] x [0, height]`.
pub fn layout_thread(root: &ThreadNode, width: f64, height: f64) -> ThreadLayout<'_> {
    let width = width.max(0.0);
    let height = height.max(0.0);

    let mut nodes: Vec<LayoutNode<'_>> = Vec::new();
    let mut children: Vec<Vec<usize>> = Vec::new();
    let mut edges: Vec<LayoutEdge> = Vec::new();
    flatten(root, None, 0, &mut nodes, &mut children, &mut edges);

    let widths = compute_widths(&children);
    let mut units = vec![0.0; nodes.len()];
    layout_subtree(0, 0.0, &children, &widths, &mut units);

    let leaf_units = widths[0].max(LEAF_SLOT);
    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);

    for (node, x_units) in nodes.iter_mut().zip(units) {
        node.x = (x_units * width / leaf_units).min(width);
        node.y = if max_depth == 0 {
            0.0
        } else {
            (node.depth as f64 * height / max_depth as f64).min(height)
        };
    }

    tracing::debug!(
        nodes = nodes.len(),
        leaves = leaf_units,
        max_depth,
        "thread layout computed"
    );

    ThreadLayout {
        width,
        height,
        nodes,
        edges,
    }
}

fn flatten<'t>(
    node: &'t ThreadNode,
    parent: Option<usize>,
    depth: usize,
    nodes: &mut Vec<LayoutNode<'t>>,
    children: &mut Vec<Vec<usize>>,
    edges: &mut Vec<LayoutEdge>,
) {
    let index = nodes.len();
    nodes.push(LayoutNode {
        parent,
        depth,
        data: node,
        x: 0.0,
        y: 0.0,
    });
    children.push(Vec::new());
    if let Some(parent) = parent {
        children[parent].push(index);
        edges.push(LayoutEdge {
            source: parent,
            target: index,
        });
    }
    for child in &node.children {
        flatten(child, Some(index), depth + 1, nodes, children, edges);
    }
}

// Pre-order puts every child after its parent, so a reverse sweep sees
// children first.
fn compute_widths(children: &[Vec<usize>]) -> Vec<f64> {
    let mut widths = vec![LEAF_SLOT; children.len()];
    for idx in (0..children.len()).rev() {
        if !children[idx].is_empty() {
            widths[idx] = children[idx].iter().map(|&kid| widths[kid]).sum();
        }
    }
    widths
}

fn layout_subtree(
    idx: usize,
    start_units: f64,
    children: &[Vec<usize>],
    widths: &[f64],
    units: &mut [f64],
) -> f64 {
    let kids = &children[idx];
    match (kids.first(), kids.last()) {
        (Some(&first), Some(&last)) => {
            let mut cursor = start_units;
            for &kid in kids {
                cursor = layout_subtree(kid, cursor, children, widths, units);
            }
            units[idx] = (units[first] + units[last]) / 2.0;
        }
        _ => units[idx] = start_units + LEAF_SLOT / 2.0,
    }
    start_units + widths[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use threadviz_core::{build_thread, CommentRecord, PostRecord};

    fn node(id: &str, depth: usize, children: Vec<ThreadNode>) -> ThreadNode {
        ThreadNode {
            id: id.to_string(),
            author: None,
            body: String::new(),
            score: 1,
            created_at: 0.0,
            depth,
            children,
        }
    }

    fn post() -> PostRecord {
        PostRecord {
            id: "root".to_string(),
            author: Some("op".to_string()),
            title: "title".to_string(),
            score: 1,
            created_at: 0.0,
            num_comments: 0,
            selftext: String::new(),
        }
    }

    fn comments_strategy() -> impl Strategy<Value = Vec<CommentRecord>> {
        let leaf = any::<i16>().prop_map(|score| CommentRecord {
            id: String::new(),
            author: None,
            body: String::new(),
            score: score as i64,
            created_at: 0.0,
            children: Vec::new(),
        });
        let tree = leaf.prop_recursive(5, 80, 4, |inner| {
            (any::<i16>(), prop::collection::vec(inner, 0..4)).prop_map(|(score, children)| {
                CommentRecord {
                    id: String::new(),
                    author: None,
                    body: String::new(),
                    score: score as i64,
                    created_at: 0.0,
                    children,
                }
            })
        });
        prop::collection::vec(tree, 0..5).prop_map(|mut comments| {
            let mut next = 0;
            for c in comments.iter_mut() {
                assign_ids(c, &mut next);
            }
            comments
        })
    }

    fn assign_ids(c: &mut CommentRecord, next: &mut usize) {
        c.id = format!("c{next}");
        *next += 1;
        for child in c.children.iter_mut() {
            assign_ids(child, next);
        }
    }

    fn count_comments(comments: &[CommentRecord]) -> usize {
        comments
            .iter()
            .map(|c| 1 + count_comments(&c.children))
            .sum()
    }

    #[test]
    fn single_node_is_centered_at_top() {
        let root = node("p", 0, vec![]);
        let layout = layout_thread(&root, 800.0, 600.0);
        assert_eq!(layout.nodes.len(), 1);
        assert!(layout.edges.is_empty());
        assert_eq!(layout.root().x, 400.0);
        assert_eq!(layout.root().y, 0.0);
    }

    #[test]
    fn parent_centered_over_children() {
        let root = node(
            "p",
            0,
            vec![node("a", 1, vec![]), node("b", 1, vec![]), node("c", 1, vec![])],
        );
        let layout = layout_thread(&root, 300.0, 100.0);
        let xs: Vec<f64> = layout.nodes.iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![150.0, 50.0, 150.0, 250.0]);
        assert!(layout.nodes[1..].iter().all(|n| n.y == 100.0));
    }

    #[test]
    fn wide_subtree_gets_more_room() {
        let root = node(
            "p",
            0,
            vec![
                node(
                    "a",
                    1,
                    vec![node("a1", 2, vec![]), node("a2", 2, vec![]), node("a3", 2, vec![])],
                ),
                node("b", 1, vec![]),
            ],
        );
        let layout = layout_thread(&root, 400.0, 200.0);
        let by_id: BTreeMap<&str, (f64, f64)> = layout
            .nodes
            .iter()
            .map(|n| (n.data.id.as_str(), (n.x, n.y)))
            .collect();
        assert_eq!(by_id["a1"], (50.0, 200.0));
        assert_eq!(by_id["a"], (150.0, 100.0));
        assert_eq!(by_id["b"], (350.0, 100.0));
        assert_eq!(by_id["p"], (250.0, 0.0));
    }

    #[test]
    fn edges_run_parent_to_child() {
        let root = node("p", 0, vec![node("a", 1, vec![node("a1", 2, vec![])])]);
        let layout = layout_thread(&root, 100.0, 100.0);
        assert_eq!(
            layout.edges,
            vec![
                LayoutEdge { source: 0, target: 1 },
                LayoutEdge { source: 1, target: 2 }
            ]
        );
        assert_eq!(layout.incident_edges(1).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn zero_sized_surface_collapses_to_origin() {
        let root = node("p", 0, vec![node("a", 1, vec![])]);
        let layout = layout_thread(&root, -5.0, 0.0);
        assert!(layout.nodes.iter().all(|n| n.x == 0.0 && n.y == 0.0));
    }

    proptest! {
        #[test]
        fn layout_covers_every_node_once(comments in comments_strategy()) {
            let root = build_thread(&post(), &comments);
            let layout = layout_thread(&root, 1020.0, 590.0);
            prop_assert_eq!(layout.nodes.len(), 1 + count_comments(&comments));
            prop_assert_eq!(layout.nodes.iter().filter(|n| n.depth == 0).count(), 1);
            prop_assert_eq!(layout.edges.len(), layout.nodes.len() - 1);
        }

        #[test]
        fn child_depth_is_parent_depth_plus_one(comments in comments_strategy()) {
            let root = build_thread(&post(), &comments);
            let layout = layout_thread(&root, 1020.0, 590.0);
            for n in &layout.nodes {
                prop_assert_eq!(n.depth, n.data.depth);
                if let Some(parent) = n.parent {
                    prop_assert_eq!(n.depth, layout.nodes[parent].depth + 1);
                }
            }
        }

        #[test]
        fn layout_fits_and_rows_do_not_overlap(
            comments in comments_strategy(),
            width in 1.0f64..2000.0,
            height in 1.0f64..2000.0,
        ) {
            let root = build_thread(&post(), &comments);
            let layout = layout_thread(&root, width, height);
            let mut rows: BTreeMap<usize, Vec<(f64, f64)>> = BTreeMap::new();
            for n in &layout.nodes {
                prop_assert!(n.x >= 0.0 && n.x <= width);
                prop_assert!(n.y >= 0.0 && n.y <= height);
                rows.entry(n.depth).or_default().push((n.x, n.y));
            }
            for (_, row) in rows {
                prop_assert!(row.iter().all(|(_, y)| *y == row[0].1));
                prop_assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
            }
        }

        #[test]
        fn layout_is_deterministic(comments in comments_strategy()) {
            let root = build_thread(&post(), &comments);
            let a = layout_thread(&root, 900.0, 500.0);
            let b = layout_thread(&root, 900.0, 500.0);
            let pa: Vec<(f64, f64)> = a.nodes.iter().map(|n| (n.x, n.y)).collect();
            let pb: Vec<(f64, f64)> = b.nodes.iter().map(|n| (n.x, n.y)).collect();
            prop_assert_eq!(pa, pb);
        }
    }
}
