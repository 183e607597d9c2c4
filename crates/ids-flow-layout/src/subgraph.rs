// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement of whole specification subgraphs (templates and profile clones)

use crate::placement::find_template_offset;
use crate::LayoutConfig;
use ids_flow_model::{
    GraphEdge, GraphNode, IdAllocator, IdsError, IdsGraph, NodeId, NodeKind, Result, Section,
    SpecTemplate,
};
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

/// Re-identify a template and shift it below the lowest existing specification
///
/// `ids` should continue past the ids of `existing`
/// (see [`IdAllocator::continuing`]). The returned subgraph is ready to be
/// merged into `existing`.
pub fn place_template(
    template: &SpecTemplate,
    existing: &IdsGraph,
    ids: &mut IdAllocator,
    config: &LayoutConfig,
) -> IdsGraph {
    let (dx, dy) = match template.graph.specifications().next() {
        Some(spec) => {
            let target = find_template_offset(&existing.nodes, spec.position, config);
            (target.x - spec.position.x, target.y - spec.position.y)
        }
        None => (0.0, 0.0),
    };

    debug!("placing template {} shifted by ({}, {})", template.id, dx, dy);
    reidentify(&template.graph, ids, dx, dy)
}

/// Copy a specification with its facets and restrictions as a profile variant
///
/// The copy is named `"{name}-Profile"`, described as
/// `"Profile variant of {name}"`, and stacked below the lowest
/// specification of `graph`. Facets are copied rather than shared.
pub fn clone_specification(
    graph: &IdsGraph,
    spec_id: &str,
    ids: &mut IdAllocator,
    config: &LayoutConfig,
) -> Result<IdsGraph> {
    let spec = graph
        .node(spec_id)
        .filter(|n| n.kind() == NodeKind::Spec)
        .ok_or_else(|| IdsError::UnknownSpecification(spec_id.to_string()))?;

    let index = graph.index();
    let mut keep: FxHashSet<&str> = FxHashSet::default();
    keep.insert(spec.id.as_str());
    for section in [Section::Applicability, Section::Requirements] {
        for member in index.section_members(spec_id, section) {
            keep.insert(member.facet.id.as_str());
            if let Some(restriction) = member.restriction {
                keep.insert(restriction.id.as_str());
            }
        }
    }

    let mut sub = IdsGraph::from_parts(
        graph
            .nodes
            .iter()
            .filter(|n| keep.contains(n.id.as_str()))
            .cloned()
            .collect(),
        graph
            .edges
            .iter()
            .filter(|e| keep.contains(e.source.as_str()) && keep.contains(e.target.as_str()))
            .cloned()
            .collect(),
    );

    if let Some(data) = sub.node_mut(spec_id).and_then(|n| n.data.as_spec_mut()) {
        let name = data.name.clone();
        data.description = Some(format!("Profile variant of {}", name));
        data.name = format!("{}-Profile", name);
    }

    let target = find_template_offset(&graph.nodes, spec.position, config);
    let dy = target.y - spec.position.y;
    debug!(
        "cloning {} with {} nodes, shifted by {}",
        spec_id,
        sub.nodes.len(),
        dy
    );

    sub = reidentify(&sub, ids, target.x - spec.position.x, dy);
    Ok(sub)
}

/// Fresh ids for every node and edge, positions translated by `(dx, dy)`
fn reidentify(graph: &IdsGraph, ids: &mut IdAllocator, dx: f64, dy: f64) -> IdsGraph {
    let mut renamed: FxHashMap<&str, NodeId> = FxHashMap::default();
    let mut out = IdsGraph::new();

    for node in &graph.nodes {
        let id = ids.next_node(node.kind());
        renamed.insert(node.id.as_str(), id.clone());
        out.add_node(GraphNode::new(
            id,
            node.position.offset(dx, dy),
            node.data.clone(),
        ));
    }

    for edge in &graph.edges {
        let (Some(source), Some(target)) = (
            renamed.get(edge.source.as_str()),
            renamed.get(edge.target.as_str()),
        ) else {
            continue;
        };
        out.add_edge(GraphEdge {
            id: ids.next_edge(),
            source: source.clone(),
            target: target.clone(),
            target_handle: edge.target_handle,
        });
    }

    out
}
