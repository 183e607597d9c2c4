// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canvas JSON document - direct dump/restore of a graph

use crate::{GraphEdge, GraphNode, IdsGraph, Result};
use serde::{Deserialize, Serialize};

/// Current canvas document format version
pub const CANVAS_VERSION: &str = "1.0";

/// Export metadata stored alongside the graph
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMetadata {
    #[serde(default)]
    pub exported_at: String,
    #[serde(default)]
    pub node_count: usize,
    #[serde(default)]
    pub edge_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifc_version: Option<String>,
}

/// Canvas import/export document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub version: String,
    #[serde(default)]
    pub metadata: CanvasMetadata,
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl CanvasDocument {
    /// Snapshot a graph; the caller supplies the export timestamp
    pub fn from_graph(
        graph: &IdsGraph,
        exported_at: impl Into<String>,
        ifc_version: Option<String>,
    ) -> Self {
        Self {
            version: CANVAS_VERSION.to_string(),
            metadata: CanvasMetadata {
                exported_at: exported_at.into(),
                node_count: graph.nodes.len(),
                edge_count: graph.edges.len(),
                ifc_version,
            },
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
        }
    }

    /// Encode as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Decode from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Restore the graph
    pub fn into_graph(self) -> IdsGraph {
        IdsGraph::from_parts(self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeData, NodeKind, Position, Section, SpecificationData};

    #[test]
    fn test_canvas_restore() {
        let mut graph = IdsGraph::new();
        graph.add_node(GraphNode::new(
            "spec-1",
            Position::new(600.0, 150.0),
            NodeData::Spec(SpecificationData::new("Walls-FireRating")),
        ));

        let doc = CanvasDocument::from_graph(&graph, "2024-05-01T10:00:00Z", None);
        assert_eq!(doc.metadata.node_count, 1);
        let json = doc.to_json(true).unwrap();
        assert!(json.contains("\"exportedAt\""));

        let restored = CanvasDocument::from_json(&json).unwrap().into_graph();
        assert_eq!(restored, graph);
    }

    #[test]
    fn test_canvas_accepts_ui_shapes() {
        let json = r#"{
            "version": "1.0",
            "metadata": { "exportedAt": "x", "nodeCount": 2, "edgeCount": 1 },
            "nodes": [
                { "id": "SP1", "type": "spec", "position": { "x": 500, "y": 100 },
                  "data": { "name": "Walls", "ifcVersion": "IFC4", "description": "d" } },
                { "id": "E1", "type": "entity", "position": { "x": 100, "y": 100 },
                  "data": { "name": "IFCWALL", "predefinedType": "" } }
            ],
            "edges": [
                { "id": "e1", "source": "E1", "target": "SP1", "targetHandle": "applicability" }
            ]
        }"#;

        let graph = CanvasDocument::from_json(json).unwrap().into_graph();
        assert_eq!(graph.nodes[1].kind(), NodeKind::Entity);
        assert_eq!(graph.edges[0].target_handle, Some(Section::Applicability));
    }

    #[test]
    fn test_canvas_rejects_unknown_type() {
        let json = r#"{ "version": "1.0", "nodes": [
            { "id": "x", "type": "wall", "position": { "x": 0, "y": 0 }, "data": {} }
        ] }"#;
        assert!(CanvasDocument::from_json(json).is_err());
    }
}
