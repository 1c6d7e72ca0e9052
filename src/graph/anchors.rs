//! Nearest-side anchor selection between node bounding boxes.

use super::types::{AnchorSide, Edge, Node};
use log::debug;
use std::collections::HashMap;

/// Box dimensions assumed for nodes the renderer has not measured yet.
pub const DEFAULT_NODE_WIDTH: f64 = 250.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 200.0;

/// Directed side pairings in evaluation order; the first minimum wins.
const PAIRINGS: [(AnchorSide, AnchorSide); 4] = [
    (AnchorSide::Right, AnchorSide::Left),
    (AnchorSide::Left, AnchorSide::Right),
    (AnchorSide::Bottom, AnchorSide::Top),
    (AnchorSide::Top, AnchorSide::Bottom),
];

struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    fn of(node: &Node) -> Self {
        Self {
            x: node.position.x,
            y: node.position.y,
            width: node.width.unwrap_or(DEFAULT_NODE_WIDTH),
            height: node.height.unwrap_or(DEFAULT_NODE_HEIGHT),
        }
    }

    /// Midpoint of one side; the cross-axis component sits at the box center.
    fn side_point(&self, side: AnchorSide) -> (f64, f64) {
        match side {
            AnchorSide::Left => (self.x, self.y + self.height / 2.0),
            AnchorSide::Right => (self.x + self.width, self.y + self.height / 2.0),
            AnchorSide::Top => (self.x + self.width / 2.0, self.y),
            AnchorSide::Bottom => (self.x + self.width / 2.0, self.y + self.height),
        }
    }
}

/// Pick the anchor sides with the smallest straight-line distance between
/// the two nodes' side midpoints.
pub fn nearest_sides(source: &Node, target: &Node) -> (AnchorSide, AnchorSide) {
    let source_bounds = Bounds::of(source);
    let target_bounds = Bounds::of(target);

    let mut best = PAIRINGS[0];
    let mut best_distance = f64::INFINITY;

    for (source_side, target_side) in PAIRINGS {
        let (sx, sy) = source_bounds.side_point(source_side);
        let (tx, ty) = target_bounds.side_point(target_side);
        let distance = (tx - sx).hypot(ty - sy);
        if distance < best_distance {
            best_distance = distance;
            best = (source_side, target_side);
        }
    }

    best
}

/// Recompute anchor sides for every edge after positions or dimensions
/// changed. Edges whose endpoints are no longer among `nodes` pass through
/// unchanged.
pub fn update_edge_anchors(nodes: &[Node], edges: &mut [Edge]) {
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    for edge in edges {
        let source = by_id.get(edge.source.as_str());
        let target = by_id.get(edge.target.as_str());
        let (Some(source), Some(target)) = (source, target) else {
            debug!("edge {} kept as-is, endpoint node missing", edge.id);
            continue;
        };

        let (source_side, target_side) = nearest_sides(source, target);
        edge.source_position = source_side;
        edge.target_position = target_side;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{NodeData, Position};

    fn node(id: &str, x: f64, y: f64) -> Node {
        Node {
            id: id.to_string(),
            position: Position { x, y },
            width: None,
            height: None,
            data: NodeData {
                label: id.to_string(),
                physical_name: id.to_string(),
                logical_name: id.to_string(),
                columns: vec![],
                primary_key: None,
            },
        }
    }

    #[test]
    fn test_horizontal_neighbors() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 1000.0, 0.0);

        assert_eq!(nearest_sides(&a, &b), (AnchorSide::Right, AnchorSide::Left));
        assert_eq!(nearest_sides(&b, &a), (AnchorSide::Left, AnchorSide::Right));
    }

    #[test]
    fn test_vertical_neighbors() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 0.0, 1000.0);

        assert_eq!(nearest_sides(&a, &b), (AnchorSide::Bottom, AnchorSide::Top));
        assert_eq!(nearest_sides(&b, &a), (AnchorSide::Top, AnchorSide::Bottom));
    }

    #[test]
    fn test_tie_breaks_on_enumeration_order() {
        // Square boxes at the same spot make all four pairings equidistant
        let mut a = node("a", 0.0, 0.0);
        let mut b = node("b", 0.0, 0.0);
        a.width = Some(100.0);
        a.height = Some(100.0);
        b.width = Some(100.0);
        b.height = Some(100.0);

        assert_eq!(nearest_sides(&a, &b), (AnchorSide::Right, AnchorSide::Left));
    }

    #[test]
    fn test_measured_dimensions_shift_choice() {
        // Stacked nodes pick bottom/top with default boxes; once measured as
        // tall boxes the side midpoints end up closer than the stack gap.
        let a = node("a", 0.0, 0.0);
        let b = node("b", 0.0, 220.0);
        assert_eq!(nearest_sides(&a, &b), (AnchorSide::Bottom, AnchorSide::Top));

        let mut a = a;
        let mut b = b;
        a.width = Some(100.0);
        a.height = Some(600.0);
        b.width = Some(100.0);
        b.height = Some(600.0);
        assert_eq!(nearest_sides(&a, &b), (AnchorSide::Right, AnchorSide::Left));
    }

    fn edge(source: &str, target: &str) -> Edge {
        use crate::ast::ReferentialAction;
        use crate::graph::types::EdgeData;

        Edge {
            id: format!("{source}-{target}-0"),
            source: source.to_string(),
            target: target.to_string(),
            source_position: AnchorSide::Top,
            target_position: AnchorSide::Bottom,
            label: String::new(),
            data: EdgeData {
                source_columns: vec![],
                target_columns: vec![],
                on_delete: ReferentialAction::NoAction,
                on_update: ReferentialAction::NoAction,
            },
        }
    }

    #[test]
    fn test_update_edge_anchors_after_move() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 1000.0, 0.0);
        let mut edges = vec![edge("a", "b")];

        update_edge_anchors(&[a.clone(), b], &mut edges);
        assert_eq!(edges[0].source_position, AnchorSide::Right);
        assert_eq!(edges[0].target_position, AnchorSide::Left);

        let b_moved = node("b", 0.0, 900.0);
        update_edge_anchors(&[a, b_moved], &mut edges);
        assert_eq!(edges[0].source_position, AnchorSide::Bottom);
        assert_eq!(edges[0].target_position, AnchorSide::Top);
    }

    #[test]
    fn test_update_keeps_edge_with_missing_node() {
        let a = node("a", 0.0, 0.0);
        let mut edges = vec![edge("a", "gone")];

        update_edge_anchors(&[a], &mut edges);
        assert_eq!(edges[0].source_position, AnchorSide::Top);
        assert_eq!(edges[0].target_position, AnchorSide::Bottom);
    }
}
