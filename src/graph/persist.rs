//! Node position persistence through a key-value port.

use super::types::{Node, Position};
use log::warn;
use std::collections::HashMap;

/// Fixed store key for the position snapshot.
pub const POSITIONS_KEY: &str = "erd-node-positions";

/// Synchronous string-keyed store the snapshot round-trips through. The
/// browser build backs this with localStorage; tests use `MemoryStore`.
pub trait PositionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl PositionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// What happened when restoring a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Snapshot applied; carries how many nodes got a saved position.
    Applied(usize),
    /// Nothing stored under the key.
    NoSnapshot,
    /// Stored value did not parse; positions left untouched.
    Corrupt,
}

/// Write the id -> position mapping of `nodes` to the store.
pub fn save_positions(store: &mut dyn PositionStore, nodes: &[Node]) {
    let positions: HashMap<&str, Position> = nodes
        .iter()
        .map(|node| (node.id.as_str(), node.position))
        .collect();

    match serde_json::to_string(&positions) {
        Ok(json) => store.set(POSITIONS_KEY, &json),
        Err(err) => warn!("position snapshot not saved: {err}"),
    }
}

/// Overwrite positions of nodes present in the stored snapshot; nodes
/// without a saved entry keep their computed position. A corrupt snapshot
/// is treated as absent.
pub fn restore_positions(store: &dyn PositionStore, nodes: &mut [Node]) -> RestoreOutcome {
    let Some(raw) = store.get(POSITIONS_KEY) else {
        return RestoreOutcome::NoSnapshot;
    };

    let positions: HashMap<String, Position> = match serde_json::from_str(&raw) {
        Ok(positions) => positions,
        Err(err) => {
            warn!("ignoring corrupt position snapshot: {err}");
            return RestoreOutcome::Corrupt;
        }
    };

    let mut applied = 0;
    for node in nodes {
        if let Some(position) = positions.get(&node.id) {
            node.position = *position;
            applied += 1;
        }
    }

    RestoreOutcome::Applied(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::NodeData;

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
    fn test_round_trip() {
        let mut store = MemoryStore::default();
        let saved = vec![node("a", 10.0, 20.0), node("b", 30.0, 40.0)];
        save_positions(&mut store, &saved);

        // Fresh layout run puts the nodes back on the grid
        let mut nodes = vec![node("a", 50.0, 50.0), node("b", 400.0, 50.0)];
        let outcome = restore_positions(&store, &mut nodes);

        assert_eq!(outcome, RestoreOutcome::Applied(2));
        assert_eq!(nodes[0].position, Position { x: 10.0, y: 20.0 });
        assert_eq!(nodes[1].position, Position { x: 30.0, y: 40.0 });
    }

    #[test]
    fn test_unmatched_nodes_keep_positions() {
        let mut store = MemoryStore::default();
        save_positions(&mut store, &[node("a", 1.0, 2.0)]);

        let mut nodes = vec![node("a", 50.0, 50.0), node("new", 400.0, 50.0)];
        let outcome = restore_positions(&store, &mut nodes);

        assert_eq!(outcome, RestoreOutcome::Applied(1));
        assert_eq!(nodes[1].position, Position { x: 400.0, y: 50.0 });
    }

    #[test]
    fn test_no_snapshot() {
        let store = MemoryStore::default();
        let mut nodes = vec![node("a", 50.0, 50.0)];

        assert_eq!(restore_positions(&store, &mut nodes), RestoreOutcome::NoSnapshot);
        assert_eq!(nodes[0].position, Position { x: 50.0, y: 50.0 });
    }

    #[test]
    fn test_corrupt_snapshot_is_ignored() {
        let mut store = MemoryStore::default();
        store.set(POSITIONS_KEY, "{not json");

        let mut nodes = vec![node("a", 50.0, 50.0)];
        assert_eq!(restore_positions(&store, &mut nodes), RestoreOutcome::Corrupt);
        assert_eq!(nodes[0].position, Position { x: 50.0, y: 50.0 });
    }
}
