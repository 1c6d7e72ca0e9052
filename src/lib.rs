pub mod ast;
pub mod graph;
pub mod measure;
pub mod schema;
pub mod sql;

use wasm_bindgen::prelude::*;

use graph::{Graph, GraphBuilder};
use serde::Serialize;
use sql::StatementError;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct GraphPayload {
    #[serde(flatten)]
    graph: Graph,
    errors: Vec<StatementError>,
}

/// Parse DDL text and build the ER graph, returned as JSON.
///
/// Malformed statements are reported in the payload's `errors` and do not
/// fail the call.
#[wasm_bindgen(js_name = "ddlToGraph")]
pub fn ddl_to_graph(ddl: &str, use_logical_names: bool) -> Result<String, String> {
    let outcome = sql::parse_many(ddl);
    let graph = GraphBuilder::default().build(&outcome.tables, use_logical_names);
    let payload = GraphPayload {
        graph,
        errors: outcome.errors,
    };

    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

/// Recompute edge anchor sides from current node positions/dimensions.
/// Takes and returns the renderer's JSON arrays.
#[wasm_bindgen(js_name = "updateEdgeAnchors")]
pub fn update_edge_anchors_json(nodes: &str, edges: &str) -> Result<String, String> {
    let nodes: Vec<graph::Node> = serde_json::from_str(nodes).map_err(|e| e.to_string())?;
    let mut edges: Vec<graph::Edge> = serde_json::from_str(edges).map_err(|e| e.to_string())?;

    graph::update_edge_anchors(&nodes, &mut edges);

    serde_json::to_string(&edges).map_err(|e| e.to_string())
}
