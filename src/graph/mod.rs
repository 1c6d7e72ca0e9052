//! Renderable entity-relationship graph built from parsed tables.

mod anchors;
mod builder;
mod persist;
mod types;

pub use anchors::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, nearest_sides, update_edge_anchors};
pub use builder::{
    GRID_COLUMNS, GRID_OFFSET, GRID_SPACING_X, GRID_SPACING_Y, GraphBuilder, apply_name_mode,
};
pub use persist::{
    MemoryStore, POSITIONS_KEY, PositionStore, RestoreOutcome, restore_positions, save_positions,
};
pub use types::{
    AnchorSide, ColumnRow, Edge, EdgeData, Graph, Node, NodeData, Position, SkippedEdge,
};
