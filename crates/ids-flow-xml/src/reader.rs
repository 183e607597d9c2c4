// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDS XML → graph reader
//!
//! Every call owns a fresh [`IdAllocator`], so concurrent parses never
//! share counters. Nodes are placed through the layout engine as they are
//! created, against the graph built so far.

use crate::codec::{child, children, decode_value, element_text, simple_value, DecodedValue};
use ids_flow_layout::{position_for, restriction_position, LayoutConfig};
use ids_flow_model::{
    AttributeData, Cardinality, ClassificationData, EntityData, GraphNode, IdAllocator, IdsError,
    IdsGraph, IdsMetadata, IdsParser, MaterialData, NodeData, NodeId, NodeKind, ParsedIds,
    PartOfData, Position, PropertyData, Result, Section, SpecificationData,
};
use log::{debug, warn};
use roxmltree::{Document, Node};

/// Reader options
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParseOptions {
    /// Drop unreadable cardinalities and restrictions instead of failing
    pub lenient: bool,
    /// Layout used to place imported nodes
    pub layout: LayoutConfig,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            lenient: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// IDS document reader
#[derive(Clone, Copy, Debug, Default)]
pub struct IdsReader {
    options: ParseOptions,
}

impl IdsReader {
    /// Create a reader with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Reader options
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an IDS document into a laid-out graph
    pub fn read(&self, xml: &str) -> Result<ParsedIds> {
        if xml.trim().is_empty() {
            return Err(IdsError::EmptyDocument);
        }
        let doc = Document::parse(xml).map_err(|e| IdsError::invalid_xml(e.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != "ids" {
            return Err(IdsError::MissingIdsRoot);
        }

        let specs: Vec<Node<'_, '_>> = match child(root, "specifications") {
            Some(container) => children(container, "specification").collect(),
            None => children(root, "specification").collect(),
        };
        if specs.is_empty() {
            return Err(IdsError::NoSpecificationsInDocument);
        }

        let metadata = child(root, "info").map(parse_info);
        let title = metadata.as_ref().map(|m| m.title.as_str());

        let mut session = ReadSession {
            options: &self.options,
            ids: IdAllocator::new(),
            graph: IdsGraph::new(),
        };
        let mut ifc_version = None;
        for (i, spec) in specs.into_iter().enumerate() {
            let version = session.read_specification(spec, i, title)?;
            if ifc_version.is_none() {
                ifc_version = Some(version);
            }
        }

        debug!(
            "parsed {} nodes and {} edges",
            session.graph.nodes.len(),
            session.graph.edges.len()
        );

        Ok(ParsedIds {
            graph: session.graph,
            ifc_version,
            metadata,
        })
    }
}

impl IdsParser for IdsReader {
    fn parse(&self, xml: &str) -> Result<ParsedIds> {
        self.read(xml)
    }
}

/// Parse an IDS document with default options
pub fn parse(xml: &str) -> Result<ParsedIds> {
    IdsReader::default().read(xml)
}

/// Parse an IDS document
pub fn parse_with_options(xml: &str, options: &ParseOptions) -> Result<ParsedIds> {
    IdsReader::new(*options).read(xml)
}

fn parse_info(info: Node<'_, '_>) -> IdsMetadata {
    let field = |name: &str| child(info, name).and_then(element_text);
    IdsMetadata {
        title: field("title").unwrap_or_default(),
        copyright: field("copyright"),
        version: field("version"),
        description: field("description"),
        author: field("author"),
        date: field("date"),
        purpose: field("purpose"),
        milestone: field("milestone"),
    }
}

fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// State of one parse call
struct ReadSession<'o> {
    options: &'o ParseOptions,
    ids: IdAllocator,
    graph: IdsGraph,
}

impl ReadSession<'_> {
    /// Read one specification, returning its IFC version
    fn read_specification(
        &mut self,
        spec: Node<'_, '_>,
        index: usize,
        title: Option<&str>,
    ) -> Result<String> {
        let base = self.options.layout;
        let dy = index as f64 * (base.spec_stride() + base.group_gap);
        let layout = base.with_base(base.base_x, base.base_y + dy);
        let spec_pos = base.spec_position.offset(0.0, dy);

        let name = attr(spec, "name")
            .or_else(|| title.filter(|t| !t.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| format!("Specification {}", index + 1));
        let mut data = SpecificationData::new(name);
        if let Some(version) = attr(spec, "ifcVersion") {
            data.ifc_version = version;
        }
        data.description = attr(spec, "description");
        data.identifier = attr(spec, "identifier");
        data.instructions = attr(spec, "instructions");

        let applicability = child(spec, "applicability");
        let requirements = child(spec, "requirements");

        if let Some(section) = applicability {
            if facet_elements(section).next().is_none() {
                data = data.with_empty_applicability(Cardinality::from_occurs(
                    section.attribute("minOccurs"),
                    section.attribute("maxOccurs"),
                ));
            }
        }
        if let Some(section) = requirements {
            data.requirements_description = attr(section, "description");
        }

        let ifc_version = data.ifc_version.clone();
        let spec_id = self.ids.next_node(NodeKind::Spec);
        debug!("reading specification {} as {}", data.name, spec_id);
        self.graph
            .add_node(GraphNode::new(spec_id.clone(), spec_pos, NodeData::Spec(data)));

        for (section, element) in [
            (Section::Applicability, applicability),
            (Section::Requirements, requirements),
        ] {
            let Some(element) = element else {
                continue;
            };
            for (kind, facet) in facet_elements(element) {
                self.read_facet(kind, facet, section, &spec_id, spec_pos, &layout)?;
            }
        }

        Ok(ifc_version)
    }

    fn read_facet(
        &mut self,
        kind: NodeKind,
        element: Node<'_, '_>,
        section: Section,
        spec_id: &NodeId,
        spec_pos: Position,
        layout: &LayoutConfig,
    ) -> Result<()> {
        let Some(mut data) = facet_data(kind, element) else {
            return Ok(());
        };

        if section == Section::Requirements {
            if let Some(raw) = attr(element, "cardinality") {
                match raw.parse::<Cardinality>() {
                    Ok(cardinality) => data.set_cardinality(Some(cardinality)),
                    Err(reason) => self.lenient_or(kind, reason)?,
                }
            }
            data.set_instructions(attr(element, "instructions"));
        }

        let mut restriction = None;
        if kind.has_value() {
            match decode_value(child(element, "value")) {
                Some(DecodedValue::Literal(value)) => data.set_value(Some(value)),
                Some(DecodedValue::Restriction(r)) => restriction = Some(r),
                Some(DecodedValue::Unrecognized(reason)) => self.lenient_or(kind, reason)?,
                None => {}
            }
        }

        let position = position_for(
            kind,
            section,
            &self.graph.nodes,
            &self.graph.edges,
            spec_id,
            layout,
        );
        let facet_id = self.ids.next_node(kind);
        self.graph
            .add_node(GraphNode::new(facet_id.clone(), position, data));

        match restriction {
            Some(r) => {
                let restriction_id = self.ids.next_node(NodeKind::Restriction);
                self.graph.add_node(GraphNode::new(
                    restriction_id.clone(),
                    restriction_position(position, spec_pos),
                    NodeData::Restriction(r),
                ));
                self.graph
                    .connect(&mut self.ids, facet_id, restriction_id.clone(), None);
                self.graph.connect(
                    &mut self.ids,
                    restriction_id,
                    spec_id.clone(),
                    Some(section),
                );
            }
            None => {
                self.graph
                    .connect(&mut self.ids, facet_id, spec_id.clone(), Some(section));
            }
        }

        Ok(())
    }

    fn lenient_or(&self, kind: NodeKind, reason: String) -> Result<()> {
        if self.options.lenient {
            warn!("ignoring unreadable {} facet content: {}", kind, reason);
            Ok(())
        } else {
            Err(IdsError::malformed_facet(kind.as_str(), reason))
        }
    }
}

/// Recognized facet children of a section, in document order
fn facet_elements<'a, 'input: 'a>(
    section: Node<'a, 'input>,
) -> impl Iterator<Item = (NodeKind, Node<'a, 'input>)> + 'a {
    section.children().filter(|n| n.is_element()).filter_map(|n| {
        NodeKind::from_facet_element(n.tag_name().name()).map(|kind| (kind, n))
    })
}

fn facet_data(kind: NodeKind, element: Node<'_, '_>) -> Option<NodeData> {
    let field = |name: &str| simple_value(child(element, name));
    let data = match kind {
        NodeKind::Entity => NodeData::Entity(EntityData {
            name: field("name").unwrap_or_default().to_uppercase(),
            predefined_type: field("predefinedType"),
            ..Default::default()
        }),
        NodeKind::Property => NodeData::Property(PropertyData {
            property_set: field("propertySet").unwrap_or_default(),
            base_name: field("baseName").unwrap_or_default(),
            data_type: attr(element, "dataType").map(|t| t.to_uppercase()),
            uri: attr(element, "uri"),
            ..Default::default()
        }),
        NodeKind::Attribute => NodeData::Attribute(AttributeData {
            name: field("name").unwrap_or_default(),
            ..Default::default()
        }),
        NodeKind::Classification => NodeData::Classification(ClassificationData {
            system: field("system").unwrap_or_default(),
            uri: attr(element, "uri"),
            ..Default::default()
        }),
        NodeKind::Material => NodeData::Material(MaterialData {
            uri: attr(element, "uri"),
            ..Default::default()
        }),
        NodeKind::PartOf => {
            let entity = child(element, "entity")
                .and_then(|e| simple_value(child(e, "name")))
                .unwrap_or_default();
            NodeData::PartOf(PartOfData {
                entity: entity.to_uppercase(),
                relation: attr(element, "relation"),
                ..Default::default()
            })
        }
        NodeKind::Spec | NodeKind::Restriction => return None,
    };
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{serialize, SerializeOptions};
    use ids_flow_model::{
        builtin_templates, check_graph, Restriction, SectionMember, DEFAULT_IFC_VERSION,
    };

    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ids:ids xmlns:ids="http://standards.buildingsmart.org/IDS" xmlns:xs="http://www.w3.org/2001/XMLSchema">"#;

    fn doc(body: &str) -> String {
        format!("{}{}</ids:ids>", HEADER, body)
    }

    fn fire_rating_doc() -> String {
        doc(r#"
  <ids:info><ids:title>Fire safety</ids:title><ids:author>fire@example.com</ids:author></ids:info>
  <ids:specifications>
    <ids:specification name="Walls" ifcVersion="IFC4">
      <ids:applicability>
        <ids:entity><ids:name><ids:simpleValue>IfcWall</ids:simpleValue></ids:name></ids:entity>
      </ids:applicability>
      <ids:requirements description="Fire data">
        <ids:property dataType="IfcLabel" cardinality="required">
          <ids:propertySet><ids:simpleValue>Pset_WallCommon</ids:simpleValue></ids:propertySet>
          <ids:baseName><ids:simpleValue>FireRating</ids:simpleValue></ids:baseName>
          <ids:value>
            <xs:restriction base="xs:string">
              <xs:enumeration value="R60"/>
              <xs:enumeration value="R90"/>
            </xs:restriction>
          </ids:value>
        </ids:property>
      </ids:requirements>
    </ids:specification>
  </ids:specifications>"#)
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(parse("   "), Err(IdsError::EmptyDocument)));
        assert!(matches!(parse("<ids:ids"), Err(IdsError::InvalidXml(_))));
        assert!(matches!(
            parse("<other/>"),
            Err(IdsError::MissingIdsRoot)
        ));
        assert!(matches!(
            parse(&doc("<ids:specifications/>")),
            Err(IdsError::NoSpecificationsInDocument)
        ));
    }

    #[test]
    fn test_enumeration_restriction_chain() {
        let parsed = parse(&fire_rating_doc()).unwrap();
        let graph = &parsed.graph;

        assert_eq!(parsed.ifc_version.as_deref(), Some("IFC4"));
        let metadata = parsed.metadata.unwrap();
        assert_eq!(metadata.title, "Fire safety");
        assert_eq!(metadata.author.as_deref(), Some("fire@example.com"));

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["spec-1", "entity-1", "property-1", "restriction-1"]);

        let spec = graph.node("spec-1").unwrap().data.as_spec().unwrap();
        assert_eq!(spec.requirements_description.as_deref(), Some("Fire data"));

        let entity = graph.node("entity-1").unwrap();
        assert_eq!(entity.data, NodeData::Entity(EntityData {
            name: "IFCWALL".into(),
            ..Default::default()
        }));

        let property = graph.node("property-1").unwrap();
        let NodeData::Property(p) = &property.data else {
            panic!("expected property");
        };
        assert_eq!(p.value, None);
        assert_eq!(p.data_type.as_deref(), Some("IFCLABEL"));
        assert_eq!(p.cardinality, Some(Cardinality::Required));

        let restriction = graph.node("restriction-1").unwrap();
        assert_eq!(
            restriction.data.as_restriction(),
            Some(&Restriction::Enumeration {
                values: vec!["R60".into(), "R90".into()]
            })
        );

        // facet -> restriction -> spec, and nothing from the facet to the spec
        let index = graph.index();
        let out: Vec<&str> = index
            .outgoing("property-1")
            .iter()
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(out, ["restriction-1"]);
        let hop = index.outgoing("restriction-1");
        assert_eq!(hop.len(), 1);
        assert_eq!(hop[0].target, "spec-1");
        assert_eq!(hop[0].target_handle, Some(Section::Requirements));

        // Restriction midway between facet and spec
        let spec_pos = graph.node("spec-1").unwrap().position;
        assert_eq!(
            restriction.position,
            Position::new((property.position.x + spec_pos.x) / 2.0, property.position.y)
        );
    }

    #[test]
    fn test_literal_values_and_optional_fields() {
        let xml = doc(r#"<ids:specifications><ids:specification>
          <ids:applicability>
            <ids:partOf relation="IFCRELAGGREGATES"><ids:entity><ids:name><ids:simpleValue>IfcBuilding</ids:simpleValue></ids:name></ids:entity></ids:partOf>
          </ids:applicability>
          <ids:requirements>
            <ids:property><ids:propertySet><ids:simpleValue>Pset_X</ids:simpleValue></ids:propertySet><ids:baseName><ids:simpleValue>Y</ids:simpleValue></ids:baseName><ids:value><ids:simpleValue>42</ids:simpleValue></ids:value></ids:property>
            <ids:classification cardinality="optional" instructions="Check"><ids:value><ids:simpleValue>EF_25</ids:simpleValue></ids:value><ids:system><ids:simpleValue>Uniclass</ids:simpleValue></ids:system></ids:classification>
          </ids:requirements>
        </ids:specification></ids:specifications>"#);
        let parsed = parse(&xml).unwrap();
        let graph = &parsed.graph;

        assert_eq!(parsed.ifc_version.as_deref(), Some(DEFAULT_IFC_VERSION));
        assert_eq!(
            graph.node("spec-1").unwrap().data.as_spec().unwrap().name,
            "Specification 1"
        );
        assert!(graph.nodes_of_kind(NodeKind::Restriction).next().is_none());

        let NodeData::PartOf(part) = &graph.node("partOf-1").unwrap().data else {
            panic!("expected partOf");
        };
        assert_eq!(part.entity, "IFCBUILDING");
        assert_eq!(part.relation.as_deref(), Some("IFCRELAGGREGATES"));

        let NodeData::Property(p) = &graph.node("property-1").unwrap().data else {
            panic!("expected property");
        };
        assert_eq!(p.value.as_deref(), Some("42"));
        assert_eq!(p.data_type, None);
        assert_eq!(p.cardinality, None);

        let classification = &graph.node("classification-1").unwrap().data;
        assert_eq!(classification.cardinality(), Some(Cardinality::Optional));
        assert_eq!(classification.instructions(), Some("Check"));
        assert_eq!(classification.literal_value(), Some("EF_25"));
    }

    #[test]
    fn test_spec_name_falls_back_to_title() {
        let xml = doc(r#"<ids:info><ids:title>Project rules</ids:title></ids:info>
          <ids:specifications><ids:specification ifcVersion="IFC2X3"/></ids:specifications>"#);
        let parsed = parse(&xml).unwrap();
        let spec = parsed.graph.specifications().next().unwrap();
        assert_eq!(spec.data.as_spec().unwrap().name, "Project rules");
        assert_eq!(parsed.ifc_version.as_deref(), Some("IFC2X3"));
    }

    #[test]
    fn test_wildcard_cardinality() {
        for (occurs, expected) in [
            (r#"minOccurs="0" maxOccurs="unbounded""#, Cardinality::Optional),
            (r#"minOccurs="0" maxOccurs="0""#, Cardinality::Prohibited),
            ("", Cardinality::Required),
            (r#"minOccurs="2" maxOccurs="5""#, Cardinality::Required),
        ] {
            let xml = doc(&format!(
                r#"<ids:specifications><ids:specification name="Any"><ids:applicability {}/></ids:specification></ids:specifications>"#,
                occurs
            ));
            let parsed = parse(&xml).unwrap();
            let spec = parsed.graph.node("spec-1").unwrap().data.as_spec().unwrap();
            assert!(spec.has_empty_applicability);
            assert_eq!(spec.applicability_cardinality, Some(expected));
        }
    }

    #[test]
    fn test_wildcard_round_trip() {
        for cardinality in [Cardinality::Optional, Cardinality::Prohibited] {
            let mut graph = IdsGraph::new();
            graph.add_node(GraphNode::new(
                "spec-1",
                Position::default(),
                NodeData::Spec(SpecificationData::new("Any").with_empty_applicability(cardinality)),
            ));
            let xml = serialize(&graph, &SerializeOptions::default()).unwrap();
            let (min, max) = cardinality.min_max_occurs();
            assert!(xml.contains(&format!(
                "<ids:applicability minOccurs=\"{}\" maxOccurs=\"{}\"/>",
                min, max
            )));

            let parsed = parse(&xml).unwrap();
            let spec = parsed.graph.node("spec-1").unwrap().data.as_spec().unwrap();
            assert_eq!(spec.applicability_cardinality, Some(cardinality));
        }
    }

    #[test]
    fn test_lenient_and_strict() {
        let xml = doc(r#"<ids:specifications><ids:specification name="S">
          <ids:applicability><ids:entity><ids:name><ids:simpleValue>IFCWALL</ids:simpleValue></ids:name></ids:entity></ids:applicability>
          <ids:requirements>
            <ids:attribute cardinality="sometimes"><ids:name><ids:simpleValue>Name</ids:simpleValue></ids:name>
              <ids:value><xs:restriction><xs:minExclusive value="0"/></xs:restriction></ids:value>
            </ids:attribute>
          </ids:requirements>
        </ids:specification></ids:specifications>"#);

        let parsed = parse(&xml).unwrap();
        let attribute = &parsed.graph.node("attribute-1").unwrap().data;
        assert_eq!(attribute.cardinality(), None);
        assert_eq!(attribute.literal_value(), None);
        assert!(parsed.graph.nodes_of_kind(NodeKind::Restriction).next().is_none());

        let strict = ParseOptions::new().with_lenient(false);
        assert!(matches!(
            parse_with_options(&xml, &strict),
            Err(IdsError::MalformedFacet { .. })
        ));
    }

    #[test]
    fn test_import_layout_is_collision_free() {
        let xml = doc(r#"<ids:specifications>
          <ids:specification name="A"><ids:applicability>
            <ids:material><ids:value><ids:simpleValue>concrete</ids:simpleValue></ids:value></ids:material>
            <ids:entity><ids:name><ids:simpleValue>IFCWALL</ids:simpleValue></ids:name></ids:entity>
          </ids:applicability><ids:requirements>
            <ids:attribute><ids:name><ids:simpleValue>Name</ids:simpleValue></ids:name></ids:attribute>
            <ids:attribute><ids:name><ids:simpleValue>Tag</ids:simpleValue></ids:name></ids:attribute>
          </ids:requirements></ids:specification>
          <ids:specification name="B"><ids:applicability>
            <ids:entity><ids:name><ids:simpleValue>IFCSLAB</ids:simpleValue></ids:name></ids:entity>
          </ids:applicability></ids:specification>
        </ids:specifications>"#);
        let config = LayoutConfig::default();
        let parsed = parse(&xml).unwrap();

        let column: Vec<Position> = parsed
            .graph
            .nodes
            .iter()
            .filter(|n| n.kind().is_facet())
            .map(|n| n.position)
            .collect();
        for (i, a) in column.iter().enumerate() {
            for b in &column[i + 1..] {
                assert!(
                    (a.y - b.y).abs() >= config.node_height + config.padding,
                    "{:?} overlaps {:?}",
                    a,
                    b
                );
            }
        }

        let b = parsed.graph.node("spec-2").unwrap();
        assert_eq!(
            b.position.y,
            config.spec_position.y + config.spec_stride() + config.group_gap
        );
    }

    #[test]
    fn test_independent_counters() {
        let reader = IdsReader::default();
        let first = reader.parse(&fire_rating_doc()).unwrap();
        let second = reader.parse(&fire_rating_doc()).unwrap();
        assert_eq!(first.graph, second.graph);

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| parse(&fire_rating_doc()).unwrap().graph))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), first.graph);
        }
    }

    fn members<'a>(graph: &'a IdsGraph, spec_id: &str) -> Vec<(Section, SectionMember<'a>)> {
        let index = graph.index();
        let mut applicability = index.section_members(spec_id, Section::Applicability);
        applicability.sort_by_key(|m| m.facet.kind().applicability_rank());
        applicability
            .into_iter()
            .map(|m| (Section::Applicability, m))
            .chain(
                index
                    .section_members(spec_id, Section::Requirements)
                    .into_iter()
                    .map(|m| (Section::Requirements, m)),
            )
            .collect()
    }

    #[test]
    fn test_round_trip_templates() {
        for template in builtin_templates() {
            let xml = serialize(&template.graph, &SerializeOptions::default()).unwrap();
            let parsed = parse(&xml).unwrap();
            assert!(check_graph(&parsed.graph).is_valid(), "{}", template.id);

            let original = template.graph.specifications().next().unwrap();
            let imported = parsed.graph.specifications().next().unwrap();
            assert_eq!(original.data, imported.data, "{}", template.id);

            let before = members(&template.graph, &original.id);
            let after = members(&parsed.graph, &imported.id);
            assert_eq!(before.len(), after.len(), "{}", template.id);
            for ((s1, m1), (s2, m2)) in before.iter().zip(&after) {
                assert_eq!(s1, s2);
                assert_eq!(m1.facet.data, m2.facet.data, "{}", template.id);
                assert_eq!(
                    m1.restriction_data().map(Restriction::sorted_values),
                    m2.restriction_data().map(Restriction::sorted_values),
                    "{}",
                    template.id
                );
            }
        }
    }
}
