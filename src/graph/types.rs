//! Output graph model handed to the renderer.
//!
//! Serialized field names follow the renderer's camelCase contract, and the
//! shapes round-trip through JSON so a renderer can feed nodes back into the
//! anchor update after dragging or measuring them.

use crate::ast::ReferentialAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Cardinal side of a node bounding box where an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// One table rendered as a draggable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Table physical name. Duplicate names silently overwrite each other in
    /// the node lookup used for edge construction.
    pub id: String,
    pub position: Position,
    /// Measured box, estimated at build time; a renderer may overwrite both
    /// with real dimensions. Absent values fall back to the anchor defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    pub physical_name: String,
    pub logical_name: String,
    pub columns: Vec<ColumnRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

/// Display row for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRow {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Space-joined marker prefix: key, unique, required.
    pub icons: String,
    pub is_primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One foreign-key relationship rendered as an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// `<source>-<target>-<fkIndex>`, the index counting FKs within the
    /// source table.
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_position: AnchorSide,
    pub target_position: AnchorSide,
    /// Comma-joined local column names.
    pub label: String,
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub source_columns: Vec<String>,
    pub target_columns: Vec<String>,
    pub on_delete: ReferentialAction,
    pub on_update: ReferentialAction,
}

/// Foreign key left out of the graph because its target table was not part
/// of the batch. Kept as data so callers can surface or assert on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEdge>,
}
