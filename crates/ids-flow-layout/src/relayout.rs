// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulk relayout of every specification

use crate::placement::{restriction_position, sweep_column};
use crate::LayoutConfig;
use ids_flow_model::{IdsGraph, NodeKind, Position, Section, SectionMember};
use log::debug;
use rustc_hash::FxHashMap;

/// Recompute the position of every connected node from scratch
///
/// Specification `i` is placed at `spec_position` shifted down by
/// `i * 4 * vertical_spacing`; its facets go into a column `column_offset`
/// to its left, applicability (entities first) above requirements. Each
/// facet is swept only against facets placed earlier in this pass, so stale
/// positions never push the new layout around. A facet shared by several
/// specifications is placed once, with the first. Restrictions follow their
/// facet. Nodes connected to no specification keep their position.
pub fn relayout_all(graph: &IdsGraph, config: &LayoutConfig) -> IdsGraph {
    let index = graph.index();
    let mut positions: FxHashMap<&str, Position> = FxHashMap::default();
    let mut placed: Vec<Position> = Vec::new();
    let spacing = config.vertical_spacing;

    for (i, spec) in graph.specifications().enumerate() {
        let dy = i as f64 * config.spec_stride();
        let spec_pos = config.spec_position.offset(0.0, dy);
        positions.insert(spec.id.as_str(), spec_pos);

        let column_x = spec_pos.x - config.column_offset;
        let base_y = config.base_y + dy;

        let mut applicability = index.section_members(&spec.id, Section::Applicability);
        applicability.sort_by_key(|m| m.facet.kind() != NodeKind::Entity);
        let requirements = index.section_members(&spec.id, Section::Requirements);

        debug!(
            "relayout {}: {} applicability, {} requirements",
            spec.id,
            applicability.len(),
            requirements.len()
        );

        let rows = applicability
            .iter()
            .enumerate()
            .map(|(row, m)| (m, base_y + row as f64 * spacing))
            .chain(requirements.iter().enumerate().map(|(row, m)| {
                let y = base_y
                    + applicability.len() as f64 * spacing
                    + config.group_gap
                    + row as f64 * spacing;
                (m, y)
            }));

        for (member, y) in rows {
            place_member(
                member,
                Position::new(column_x, y),
                spec_pos,
                &mut positions,
                &mut placed,
                config,
            );
        }
    }

    let mut result = graph.clone();
    for node in &mut result.nodes {
        if let Some(pos) = positions.get(node.id.as_str()) {
            node.position = *pos;
        }
    }
    result
}

fn place_member<'a>(
    member: &SectionMember<'a>,
    preferred: Position,
    spec_pos: Position,
    positions: &mut FxHashMap<&'a str, Position>,
    placed: &mut Vec<Position>,
    config: &LayoutConfig,
) {
    let facet_pos = match positions.get(member.facet.id.as_str()) {
        Some(pos) => *pos,
        None => {
            let pos = sweep_column(preferred, placed.iter().copied(), config);
            positions.insert(member.facet.id.as_str(), pos);
            placed.push(pos);
            pos
        }
    };

    if let Some(restriction) = member.restriction {
        positions
            .entry(restriction.id.as_str())
            .or_insert_with(|| restriction_position(facet_pos, spec_pos));
    }
}
