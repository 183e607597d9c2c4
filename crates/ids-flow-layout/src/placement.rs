// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-node placement
//!
//! Column placement for facets wired into a specification, the collision
//! sweep shared with bulk relayout, and the spiral search used for ad-hoc
//! nodes that are not yet connected to anything.

use crate::LayoutConfig;
use ids_flow_model::{GraphEdge, GraphIndex, GraphNode, NodeKind, Position, Section};
use log::debug;

/// Spiral search limits for [`find_available_space`]
const SEARCH_RADIUS: u32 = 400;
const SEARCH_RADIUS_STEP: usize = 50;
const SEARCH_ANGLE_STEP: usize = 45;
const SEARCH_PADDING: f64 = 20.0;

/// Default drop point when the caller has no preferred position
const DEFAULT_DROP: Position = Position { x: 400.0, y: 200.0 };

/// Intended position for a new node wired into `section` of `spec_id`
///
/// The applicability column lists entities first; the requirements column
/// starts below the full applicability column plus `group_gap`. Counts only
/// include facets connected to this exact specification (one restriction
/// hop), and a shared facet counts once. The result is then swept against
/// every existing node in the same column.
pub fn position_for(
    kind: NodeKind,
    section: Section,
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    spec_id: &str,
    config: &LayoutConfig,
) -> Position {
    let index = GraphIndex::new(nodes, edges);
    let applicability = index.section_members(spec_id, Section::Applicability);
    let spacing = config.vertical_spacing;

    let y = match section {
        Section::Applicability if kind == NodeKind::Entity => {
            let entities = applicability
                .iter()
                .filter(|m| m.facet.kind() == NodeKind::Entity)
                .count();
            config.base_y + entities as f64 * spacing
        }
        Section::Applicability => config.base_y + applicability.len() as f64 * spacing,
        Section::Requirements => {
            let requirements = index.section_members(spec_id, Section::Requirements);
            config.base_y
                + applicability.len() as f64 * spacing
                + config.group_gap
                + requirements.len() as f64 * spacing
        }
    };

    let x = match (kind, index.node(spec_id)) {
        (NodeKind::Restriction, Some(spec)) => (config.base_x + spec.position.x) / 2.0,
        _ => config.base_x,
    };

    debug!(
        "{} on {} of {}: intended ({}, {})",
        kind, section, spec_id, x, y
    );

    find_non_overlapping_position(Position::new(x, y), nodes, config)
}

/// Push `preferred` down past every node in its column it would overlap
///
/// Nodes within `x_tolerance` of the candidate are visited in ascending y.
/// A candidate whose padded box reaches into a node, i.e. whose y lies in
/// `[node.y - node_height - padding, node.y + node_height + padding]`, moves
/// to `node.y + node_height + padding`. This is one greedy pass; the moved
/// candidate is only compared with nodes further down.
pub fn find_non_overlapping_position(
    preferred: Position,
    nodes: &[GraphNode],
    config: &LayoutConfig,
) -> Position {
    sweep_column(preferred, nodes.iter().map(|n| n.position), config)
}

pub(crate) fn sweep_column(
    preferred: Position,
    occupied: impl Iterator<Item = Position>,
    config: &LayoutConfig,
) -> Position {
    let mut column: Vec<Position> = occupied
        .filter(|p| (p.x - preferred.x).abs() < config.x_tolerance)
        .collect();
    column.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut y = preferred.y;
    for other in &column {
        let top = other.y - config.node_height - config.padding;
        let bottom = other.y + config.node_height + config.padding;
        if y >= top && y <= bottom {
            debug!("collision at y={} with node at y={}, moving to {}", y, other.y, bottom);
            y = bottom;
        }
    }

    Position::new(preferred.x, y)
}

/// First free spot on a spiral around `preferred`
///
/// Radii 0..=400 in steps of 50, angles 0..360 in steps of 45 degrees. Falls
/// back to the right of the rightmost node when the spiral is exhausted.
pub fn find_available_space(
    nodes: &[GraphNode],
    preferred: Position,
    config: &LayoutConfig,
) -> Position {
    for radius in (0..=SEARCH_RADIUS).step_by(SEARCH_RADIUS_STEP) {
        for angle in (0..360u32).step_by(SEARCH_ANGLE_STEP) {
            let theta = f64::from(angle).to_radians();
            let candidate = Position::new(
                preferred.x + theta.cos() * f64::from(radius),
                preferred.y + theta.sin() * f64::from(radius),
            );
            if !collides(nodes, candidate, config) {
                return candidate;
            }
        }
    }

    let rightmost = nodes
        .iter()
        .map(|n| n.position.x)
        .fold(0.0_f64, f64::max);
    debug!("spiral search exhausted, placing right of x={}", rightmost);
    Position::new(rightmost + config.node_width + SEARCH_PADDING, preferred.y)
}

fn collides(nodes: &[GraphNode], at: Position, config: &LayoutConfig) -> bool {
    let (w, h) = (config.node_width, config.node_height);
    nodes.iter().any(|node| {
        let p = node.position;
        !(at.x + w + SEARCH_PADDING < p.x
            || at.x > p.x + w + SEARCH_PADDING
            || at.y + h + SEARCH_PADDING < p.y
            || at.y > p.y + h + SEARCH_PADDING)
    })
}

/// Origin for a new specification subgraph
///
/// Keeps the preferred x and stacks below the lowest existing
/// specification by three rows. No horizontal packing is attempted.
pub fn find_template_offset(
    nodes: &[GraphNode],
    preferred: Position,
    config: &LayoutConfig,
) -> Position {
    let lowest = nodes
        .iter()
        .filter(|n| n.kind() == NodeKind::Spec)
        .map(|n| n.position.y)
        .reduce(f64::max);

    match lowest {
        Some(lowest) => Position::new(preferred.x, lowest + config.template_gap()),
        None => preferred,
    }
}

/// Position for a node dropped onto the canvas without a connection
pub fn smart_position(
    kind: NodeKind,
    nodes: &[GraphNode],
    preferred: Option<Position>,
    config: &LayoutConfig,
) -> Position {
    let preferred = preferred.unwrap_or(DEFAULT_DROP);
    match kind {
        NodeKind::Spec => find_template_offset(nodes, preferred, config),
        _ => find_available_space(nodes, preferred, config),
    }
}

/// Restriction sits halfway between its facet and the specification
pub fn restriction_position(facet: Position, spec: Position) -> Position {
    Position::new((facet.x + spec.x) / 2.0, facet.y)
}
