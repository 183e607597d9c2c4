// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural graph checks run before export
//!
//! Only graph shape and required fields are checked; IFC entity and
//! property legality is left to external validation.

use crate::{GraphNode, IdsGraph, NodeData, NodeId, NodeKind, Section};
use log::debug;
use serde::{Deserialize, Serialize};

/// Issue severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_kind: Option<NodeKind>,
}

impl Issue {
    fn on(node: &GraphNode, severity: Severity, message: String) -> Self {
        Self {
            severity,
            message,
            node_id: Some(node.id.clone()),
            node_kind: Some(node.kind()),
        }
    }
}

/// All findings for one graph
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub issues: Vec<Issue>,
}

impl CheckReport {
    /// No error-level issues
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Issues of one severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

/// Run all structural checks
pub fn check_graph(graph: &IdsGraph) -> CheckReport {
    let mut issues = Vec::new();

    if graph.specifications().next().is_none() {
        issues.push(Issue {
            severity: Severity::Error,
            message: "At least one specification node is required".to_string(),
            node_id: None,
            node_kind: None,
        });
        return CheckReport { issues };
    }

    for node in &graph.nodes {
        match &node.data {
            NodeData::Entity(d) if d.name.trim().is_empty() => {
                issues.push(Issue::on(
                    node,
                    Severity::Error,
                    "Entity node is missing name".to_string(),
                ));
            }
            NodeData::Property(d) => {
                if d.property_set.trim().is_empty() {
                    issues.push(Issue::on(
                        node,
                        Severity::Warning,
                        "Property node is missing propertySet".to_string(),
                    ));
                }
                if d.base_name.trim().is_empty() {
                    issues.push(Issue::on(
                        node,
                        Severity::Warning,
                        "Property node is missing baseName".to_string(),
                    ));
                }
            }
            NodeData::Classification(d) if d.system.trim().is_empty() => {
                issues.push(Issue::on(
                    node,
                    Severity::Warning,
                    "Classification node is missing system".to_string(),
                ));
            }
            _ => {}
        }
    }

    let index = graph.index();

    for spec in graph.specifications() {
        let Some(data) = spec.data.as_spec() else {
            continue;
        };
        let name = if data.name.is_empty() {
            "unnamed"
        } else {
            data.name.as_str()
        };
        let applicability = index.section_members(&spec.id, Section::Applicability);

        if applicability.is_empty() {
            if !data.has_empty_applicability {
                issues.push(Issue::on(
                    spec,
                    Severity::Warning,
                    format!("Specification \"{}\" has no applicability facets", name),
                ));
            }
        } else if !applicability
            .iter()
            .any(|m| m.facet.kind() == NodeKind::Entity)
        {
            issues.push(Issue::on(
                spec,
                Severity::Warning,
                format!(
                    "Specification \"{}\" applicability should include at least one entity",
                    name
                ),
            ));
        }
    }

    for node in graph.nodes_of_kind(NodeKind::Restriction) {
        let owners = index
            .incoming(&node.id)
            .iter()
            .filter(|e| e.target_handle.is_none())
            .count();
        if owners != 1 {
            issues.push(Issue::on(
                node,
                Severity::Warning,
                format!("Restriction has {} incoming facet edges, expected 1", owners),
            ));
        }
        if node
            .data
            .as_restriction()
            .is_some_and(|r| r.has_duplicate_values())
        {
            issues.push(Issue::on(
                node,
                Severity::Warning,
                "Enumeration restriction lists duplicate values".to_string(),
            ));
        }
    }

    debug!(
        "checked {} nodes: {} issues",
        graph.nodes.len(),
        issues.len()
    );
    CheckReport { issues }
}
