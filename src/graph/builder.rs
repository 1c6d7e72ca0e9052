//! Graph construction: grid placement, display payloads, FK edges.

use super::anchors;
use super::types::{
    ColumnRow, Edge, EdgeData, Graph, Node, NodeData, Position, SkippedEdge,
};
use crate::measure::TextMetrics;
use crate::schema::{self, Column, Table};
use log::debug;
use std::collections::HashMap;

/// Fixed initial grid: 3 columns, cell pitch 350x300, offset 50 on both axes.
pub const GRID_COLUMNS: usize = 3;
pub const GRID_SPACING_X: f64 = 350.0;
pub const GRID_SPACING_Y: f64 = 300.0;
pub const GRID_OFFSET: f64 = 50.0;

const ICON_PRIMARY_KEY: &str = "🔑";
const ICON_UNIQUE: &str = "⚷";
const ICON_REQUIRED: &str = "*";

/// Builds the renderable graph from parsed tables.
pub struct GraphBuilder {
    metrics: TextMetrics,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl GraphBuilder {
    /// One node per table in input order, one edge per resolvable foreign
    /// key in table order then FK-declaration order.
    pub fn build(&self, tables: &[Table], use_logical_names: bool) -> Graph {
        let nodes: Vec<Node> = tables
            .iter()
            .enumerate()
            .map(|(index, table)| self.table_node(table, index, use_logical_names))
            .collect();

        let (edges, skipped) = build_edges(tables, &nodes);

        Graph {
            nodes,
            edges,
            skipped,
        }
    }

    fn table_node(&self, table: &Table, index: usize, use_logical_names: bool) -> Node {
        let label = table_label(table, use_logical_names);
        let columns = column_rows(table, use_logical_names);

        let measured: Vec<(String, String)> = columns
            .iter()
            .map(|row| (row.name.clone(), row.type_name.clone()))
            .collect();
        let (width, height) = self.metrics.node_size(&label, &measured);

        let grid_col = index % GRID_COLUMNS;
        let grid_row = index / GRID_COLUMNS;

        Node {
            id: table.name.clone(),
            position: Position {
                x: grid_col as f64 * GRID_SPACING_X + GRID_OFFSET,
                y: grid_row as f64 * GRID_SPACING_Y + GRID_OFFSET,
            },
            width: Some(width),
            height: Some(height),
            data: NodeData {
                label,
                physical_name: table.name.clone(),
                logical_name: table.logical_name.clone(),
                columns,
                primary_key: table.primary_key.as_ref().map(|cols| cols.join(",")),
            },
        }
    }
}

/// Recompute labels and column rows for the physical/logical toggle without
/// touching ids or positions. Nodes without a matching table pass through.
pub fn apply_name_mode(nodes: &mut [Node], tables: &[Table], use_logical_names: bool) {
    let by_name: HashMap<&str, &Table> = tables.iter().map(|t| (t.name.as_str(), t)).collect();

    for node in nodes {
        let Some(table) = by_name.get(node.id.as_str()) else {
            continue;
        };
        node.data.label = table_label(table, use_logical_names);
        node.data.columns = column_rows(table, use_logical_names);
    }
}

fn table_label(table: &Table, use_logical_names: bool) -> String {
    if use_logical_names {
        table.logical_name.clone()
    } else {
        table.name.clone()
    }
}

fn column_rows(table: &Table, use_logical_names: bool) -> Vec<ColumnRow> {
    table
        .columns
        .iter()
        .map(|col| {
            let name = if use_logical_names {
                column_logical_name(col)
            } else {
                col.name.clone()
            };
            ColumnRow {
                name,
                type_name: col.type_name.clone(),
                icons: column_icons(col),
                is_primary_key: col.primary_key,
                comment: col.comment.clone(),
            }
        })
        .collect()
}

fn column_logical_name(col: &Column) -> String {
    col.comment
        .as_deref()
        .and_then(schema::extract_logical_name)
        .unwrap_or_else(|| col.name.clone())
}

/// Marker prefix per column, in fixed order: key, unique, required.
fn column_icons(col: &Column) -> String {
    let mut icons = Vec::new();
    if col.primary_key {
        icons.push(ICON_PRIMARY_KEY);
    }
    if col.unique && !col.primary_key {
        icons.push(ICON_UNIQUE);
    }
    if !col.nullable && !col.primary_key {
        icons.push(ICON_REQUIRED);
    }
    icons.join(" ")
}

fn build_edges(tables: &[Table], nodes: &[Node]) -> (Vec<Edge>, Vec<SkippedEdge>) {
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut edges = Vec::new();
    let mut skipped = Vec::new();

    for table in tables {
        for (fk_index, fk) in table.foreign_keys.iter().enumerate() {
            let Some(target) = by_id.get(fk.ref_table.as_str()) else {
                debug!(
                    "foreign key {} -> {} dropped, target table not in batch",
                    table.name, fk.ref_table
                );
                skipped.push(SkippedEdge {
                    source: table.name.clone(),
                    target: fk.ref_table.clone(),
                });
                continue;
            };
            let Some(source) = by_id.get(table.name.as_str()) else {
                continue;
            };

            let (source_side, target_side) = anchors::nearest_sides(source, target);

            edges.push(Edge {
                id: format!("{}-{}-{}", table.name, fk.ref_table, fk_index),
                source: table.name.clone(),
                target: fk.ref_table.clone(),
                source_position: source_side,
                target_position: target_side,
                label: fk.columns.join(", "),
                data: EdgeData {
                    source_columns: fk.columns.clone(),
                    target_columns: fk.ref_columns.clone(),
                    on_delete: fk.on_delete,
                    on_update: fk.on_update,
                },
            });
        }
    }

    (edges, skipped)
}
