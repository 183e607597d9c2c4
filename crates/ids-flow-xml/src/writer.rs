// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph → IDS XML writer

use crate::codec::restriction_facets;
use ids_flow_model::{
    non_empty, GraphIndex, GraphNode, IdsError, IdsGraph, IdsMetadata, IdsSerializer, NodeData,
    Restriction, Result, Section, SectionMember, DEFAULT_IFC_VERSION,
};
use log::{debug, warn};
use once_cell::sync::Lazy;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use regex::Regex;
use std::io::Cursor;

type XmlWriter = Cursor<Vec<u8>>;

pub const IDS_NAMESPACE: &str = "http://standards.buildingsmart.org/IDS";
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const IDS_SCHEMA_LOCATION: &str =
    "http://standards.buildingsmart.org/IDS http://standards.buildingsmart.org/IDS/1.0/ids.xsd";

/// Name used for specifications and titles that have none
pub const DEFAULT_SPEC_NAME: &str = "Generated Specification";

/// Domain appended to authors given without one
pub const DEFAULT_AUTHOR_DOMAIN: &str = "idsedit.com";

static AUTHOR_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^.]+\..+$").expect("author pattern is valid"));

/// Writer options
#[derive(Clone, Debug, PartialEq)]
pub struct SerializeOptions {
    /// `info` header; derived from the first specification when absent
    pub metadata: Option<IdsMetadata>,
    /// Indent output with two spaces
    pub pretty: bool,
    /// `info/date`, overriding `metadata.date`
    pub date: Option<String>,
    /// Drop invalid authors and empty restrictions instead of failing
    pub lenient: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            metadata: None,
            pretty: true,
            date: None,
            lenient: true,
        }
    }
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: IdsMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}

/// IDS document writer
#[derive(Clone, Debug, Default)]
pub struct IdsWriter {
    options: SerializeOptions,
}

impl IdsWriter {
    /// Create a writer with the given options
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }

    /// Writer options
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Serialize a graph to IDS XML
    pub fn write(&self, graph: &IdsGraph) -> Result<String> {
        if graph.is_empty() {
            return Err(IdsError::NoNodes);
        }
        let specs: Vec<&GraphNode> = graph.specifications().collect();
        let Some(first) = specs.first() else {
            return Err(IdsError::NoSpecifications);
        };

        let mut writer = if self.options.pretty {
            Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
        } else {
            Writer::new(Cursor::new(Vec::new()))
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;

        write_tag_start_with_attrs(
            &mut writer,
            "ids:ids",
            &[
                ("xmlns:ids", IDS_NAMESPACE),
                ("xmlns:xs", XS_NAMESPACE),
                ("xmlns:xsi", XSI_NAMESPACE),
                ("xsi:schemaLocation", IDS_SCHEMA_LOCATION),
            ],
        )?;

        let metadata = self.header_metadata(first);
        self.write_info(&mut writer, &metadata)?;

        let index = graph.index();
        write_tag_start(&mut writer, "ids:specifications")?;
        for spec in &specs {
            self.write_specification(&mut writer, &index, spec)?;
        }
        write_tag_end(&mut writer, "ids:specifications")?;
        write_tag_end(&mut writer, "ids:ids")?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(xml_error)
    }

    fn header_metadata(&self, first: &GraphNode) -> IdsMetadata {
        let mut metadata = match &self.options.metadata {
            Some(metadata) => metadata.clone(),
            None => {
                let spec = first.data.as_spec();
                let mut metadata = IdsMetadata::new(
                    spec.map(|s| s.name.as_str())
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or(DEFAULT_SPEC_NAME),
                );
                metadata.description = spec.and_then(|s| s.description.clone());
                metadata
            }
        };
        if self.options.date.is_some() {
            metadata.date = self.options.date.clone();
        }
        metadata
    }

    fn write_info(&self, w: &mut Writer<XmlWriter>, metadata: &IdsMetadata) -> Result<()> {
        let author = match non_empty(&metadata.author) {
            Some(raw) => self.checked_author(raw)?,
            None => None,
        };
        let title = if metadata.title.trim().is_empty() {
            DEFAULT_SPEC_NAME
        } else {
            metadata.title.as_str()
        };

        write_tag_start(w, "ids:info")?;
        write_tag(w, "ids:title", title)?;
        let fields = [
            ("ids:copyright", non_empty(&metadata.copyright)),
            ("ids:version", non_empty(&metadata.version)),
            ("ids:description", non_empty(&metadata.description)),
            ("ids:author", author.as_deref()),
            ("ids:date", non_empty(&metadata.date)),
            ("ids:purpose", non_empty(&metadata.purpose)),
            ("ids:milestone", non_empty(&metadata.milestone)),
        ];
        for (tag, value) in fields {
            if let Some(value) = value {
                write_tag(w, tag, value)?;
            }
        }
        write_tag_end(w, "ids:info")
    }

    fn checked_author(&self, raw: &str) -> Result<Option<String>> {
        let Some(author) = normalize_author(raw) else {
            return Ok(None);
        };
        if AUTHOR_EMAIL.is_match(&author) {
            return Ok(Some(author));
        }
        if self.options.lenient {
            warn!("dropping author '{}': not a valid email address", author);
            Ok(None)
        } else {
            Err(IdsError::InvalidAuthor(author))
        }
    }

    fn write_specification(
        &self,
        w: &mut Writer<XmlWriter>,
        index: &GraphIndex<'_>,
        spec: &GraphNode,
    ) -> Result<()> {
        let Some(data) = spec.data.as_spec() else {
            return Ok(());
        };

        let name = Some(data.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_SPEC_NAME);
        let ifc_version = Some(data.ifc_version.as_str())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_IFC_VERSION);

        let mut attrs = vec![("name", name), ("ifcVersion", ifc_version)];
        for (key, value) in [
            ("identifier", non_empty(&data.identifier)),
            ("description", non_empty(&data.description)),
            ("instructions", non_empty(&data.instructions)),
        ] {
            if let Some(value) = value {
                attrs.push((key, value));
            }
        }
        write_tag_start_with_attrs(w, "ids:specification", &attrs)?;

        let mut applicability = index.section_members(&spec.id, Section::Applicability);
        applicability.sort_by_key(|m| m.facet.kind().applicability_rank());
        let requirements = index.section_members(&spec.id, Section::Requirements);

        debug!(
            "writing specification {} ({} applicability, {} requirements)",
            spec.id,
            applicability.len(),
            requirements.len()
        );

        if !applicability.is_empty() {
            write_tag_start(w, "ids:applicability")?;
            for member in &applicability {
                self.write_facet(w, index, &spec.id, member, Section::Applicability)?;
            }
            write_tag_end(w, "ids:applicability")?;
        } else if data.has_empty_applicability {
            let occurs = data.applicability_cardinality.map(|c| c.min_max_occurs());
            let attrs: Vec<(&str, &str)> = match occurs {
                Some((min, max)) => vec![("minOccurs", min), ("maxOccurs", max)],
                None => Vec::new(),
            };
            write_empty_tag(w, "ids:applicability", &attrs)?;
        }

        if !requirements.is_empty() {
            let mut attrs = Vec::new();
            if let Some(description) = non_empty(&data.requirements_description) {
                attrs.push(("description", description));
            }
            write_tag_start_with_attrs(w, "ids:requirements", &attrs)?;
            for member in &requirements {
                self.write_facet(w, index, &spec.id, member, Section::Requirements)?;
            }
            write_tag_end(w, "ids:requirements")?;
        }

        write_tag_end(w, "ids:specification")
    }

    fn write_facet(
        &self,
        w: &mut Writer<XmlWriter>,
        index: &GraphIndex<'_>,
        spec_id: &str,
        member: &SectionMember<'_>,
        section: Section,
    ) -> Result<()> {
        let node = member.facet;
        let restriction = member
            .restriction
            .or_else(|| index.restriction_for(&node.id, spec_id, section))
            .and_then(|r| r.data.as_restriction());

        let data_type = match &node.data {
            NodeData::Property(p) => non_empty(&p.data_type).map(str::to_uppercase),
            _ => None,
        };

        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(data_type) = data_type.as_deref() {
            attrs.push(("dataType", data_type));
        }
        match &node.data {
            NodeData::PartOf(p) => {
                if let Some(relation) = non_empty(&p.relation) {
                    attrs.push(("relation", relation));
                }
            }
            data => {
                if let Some(uri) = data.uri() {
                    attrs.push(("uri", uri));
                }
            }
        }
        if section == Section::Requirements {
            if let Some(cardinality) = node.data.cardinality() {
                attrs.push(("cardinality", cardinality.as_str()));
            }
            if let Some(instructions) = node.data.instructions() {
                attrs.push(("instructions", instructions));
            }
        }

        let tag = facet_tag(&node.data);
        write_tag_start_with_attrs(w, tag, &attrs)?;

        match &node.data {
            NodeData::Entity(e) => {
                write_simple(w, "ids:name", &e.name.to_uppercase())?;
                if let Some(predefined) = non_empty(&e.predefined_type) {
                    write_simple(w, "ids:predefinedType", predefined)?;
                }
            }
            NodeData::PartOf(p) => {
                write_tag_start(w, "ids:entity")?;
                write_simple(w, "ids:name", &p.entity.to_uppercase())?;
                write_tag_end(w, "ids:entity")?;
            }
            NodeData::Property(p) => {
                write_simple(w, "ids:propertySet", &p.property_set)?;
                write_simple(w, "ids:baseName", &p.base_name)?;
                self.write_value(w, &node.data, restriction)?;
            }
            NodeData::Attribute(a) => {
                write_simple(w, "ids:name", &a.name)?;
                self.write_value(w, &node.data, restriction)?;
            }
            NodeData::Classification(c) => {
                // value before system
                self.write_value(w, &node.data, restriction)?;
                write_simple(w, "ids:system", &c.system)?;
            }
            NodeData::Material(_) => {
                self.write_value(w, &node.data, restriction)?;
            }
            NodeData::Spec(_) | NodeData::Restriction(_) => {}
        }

        write_tag_end(w, tag)
    }

    fn write_value(
        &self,
        w: &mut Writer<XmlWriter>,
        data: &NodeData,
        restriction: Option<&Restriction>,
    ) -> Result<()> {
        if let Some(restriction) = restriction {
            let facets = restriction_facets(restriction);
            if !facets.is_empty() {
                write_tag_start(w, "ids:value")?;
                write_tag_start_with_attrs(w, "xs:restriction", &[("base", "xs:string")])?;
                for (tag, value) in &facets {
                    write_empty_tag(w, tag, &[("value", value.as_str())])?;
                }
                write_tag_end(w, "xs:restriction")?;
                return write_tag_end(w, "ids:value");
            }
            if !self.options.lenient {
                return Err(IdsError::malformed_facet(
                    data.kind().as_str(),
                    format!("{} restriction carries no values", restriction.type_name()),
                ));
            }
            warn!(
                "ignoring empty {} restriction on {} facet",
                restriction.type_name(),
                data.kind()
            );
        }

        match data.literal_value() {
            Some(value) => write_simple(w, "ids:value", value),
            None => Ok(()),
        }
    }
}

impl IdsSerializer for IdsWriter {
    fn serialize(&self, graph: &IdsGraph) -> Result<String> {
        self.write(graph)
    }
}

/// Serialize a graph to IDS XML
pub fn serialize(graph: &IdsGraph, options: &SerializeOptions) -> Result<String> {
    IdsWriter::new(options.clone()).write(graph)
}

/// Strip whitespace and qualify bare names with the default domain
///
/// Returns `None` for an author that is empty after stripping.
pub fn normalize_author(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        None
    } else if compact.contains('@') {
        Some(compact)
    } else {
        Some(format!(
            "{}@{}",
            compact.to_lowercase(),
            DEFAULT_AUTHOR_DOMAIN
        ))
    }
}

fn facet_tag(data: &NodeData) -> &'static str {
    match data {
        NodeData::Entity(_) => "ids:entity",
        NodeData::Property(_) => "ids:property",
        NodeData::Attribute(_) => "ids:attribute",
        NodeData::Classification(_) => "ids:classification",
        NodeData::Material(_) => "ids:material",
        NodeData::PartOf(_) => "ids:partOf",
        NodeData::Spec(_) => "ids:specification",
        NodeData::Restriction(_) => "xs:restriction",
    }
}

// ============================================================================
// quick-xml helpers
// ============================================================================

fn xml_error<E: std::fmt::Display>(err: E) -> IdsError {
    IdsError::xml_write(err.to_string())
}

fn write_tag_start(writer: &mut Writer<XmlWriter>, tag_name: &str) -> Result<()> {
    write_tag_start_with_attrs(writer, tag_name, &[])
}

fn write_tag_start_with_attrs(
    writer: &mut Writer<XmlWriter>,
    tag_name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(tag_name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Start(elem)).map_err(xml_error)
}

fn write_empty_tag(
    writer: &mut Writer<XmlWriter>,
    tag_name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(tag_name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem)).map_err(xml_error)
}

fn write_tag_end(writer: &mut Writer<XmlWriter>, tag_name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(tag_name)))
        .map_err(xml_error)
}

fn write_tag(writer: &mut Writer<XmlWriter>, tag_name: &str, content: &str) -> Result<()> {
    write_tag_start(writer, tag_name)?;
    writer
        .write_event(Event::Text(BytesText::new(content)))
        .map_err(xml_error)?;
    write_tag_end(writer, tag_name)
}

/// `<tag><ids:simpleValue>text</ids:simpleValue></tag>`
fn write_simple(writer: &mut Writer<XmlWriter>, tag_name: &str, content: &str) -> Result<()> {
    write_tag_start(writer, tag_name)?;
    write_tag(writer, "ids:simpleValue", content)?;
    write_tag_end(writer, tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ids_flow_model::{
        AttributeData, Cardinality, ClassificationData, EntityData, IdAllocator, MaterialData,
        NodeKind, PartOfData, Position, PropertyData, SpecificationData,
    };

    struct Builder {
        graph: IdsGraph,
        ids: IdAllocator,
        spec: String,
    }

    impl Builder {
        fn new(spec: SpecificationData) -> Self {
            let mut ids = IdAllocator::new();
            let mut graph = IdsGraph::new();
            let id = ids.next_node(NodeKind::Spec);
            graph.add_node(GraphNode::new(id.clone(), Position::default(), NodeData::Spec(spec)));
            Self { graph, ids, spec: id }
        }

        fn facet(&mut self, data: NodeData, section: Section) -> String {
            let id = self.ids.next_node(data.kind());
            self.graph
                .add_node(GraphNode::new(id.clone(), Position::default(), data));
            let spec = self.spec.clone();
            self.graph
                .connect(&mut self.ids, id.clone(), spec, Some(section));
            id
        }

        fn restricted(&mut self, data: NodeData, r: Restriction, section: Section) -> String {
            let id = self.ids.next_node(data.kind());
            self.graph
                .add_node(GraphNode::new(id.clone(), Position::default(), data));
            let rid = self.ids.next_node(NodeKind::Restriction);
            self.graph
                .add_node(GraphNode::new(rid.clone(), Position::default(), NodeData::Restriction(r)));
            let spec = self.spec.clone();
            self.graph
                .connect(&mut self.ids, id.clone(), rid.clone(), None);
            self.graph.connect(&mut self.ids, rid, spec, Some(section));
            id
        }
    }

    fn entity(name: &str) -> NodeData {
        NodeData::Entity(EntityData {
            name: name.into(),
            ..Default::default()
        })
    }

    fn fire_rating() -> NodeData {
        NodeData::Property(PropertyData {
            property_set: "Pset_WallCommon".into(),
            base_name: "FireRating".into(),
            data_type: Some("IFCLABEL".into()),
            ..Default::default()
        })
    }

    fn compact() -> SerializeOptions {
        SerializeOptions::new().with_pretty(false)
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            serialize(&IdsGraph::new(), &compact()),
            Err(IdsError::NoNodes)
        ));

        let mut graph = IdsGraph::new();
        graph.add_node(GraphNode::new("entity-1", Position::default(), entity("IFCWALL")));
        assert!(matches!(
            serialize(&graph, &compact()),
            Err(IdsError::NoSpecifications)
        ));
    }

    #[test]
    fn test_walls_fire_rating() {
        let mut b = Builder::new(SpecificationData::new("Walls-FireRating"));
        b.facet(entity("ifcwall"), Section::Applicability);
        b.facet(fire_rating(), Section::Requirements);

        let xml = serialize(&b.graph, &compact()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(IDS_SCHEMA_LOCATION));
        assert!(xml.contains("<ids:title>Walls-FireRating</ids:title>"));
        assert!(xml.contains(
            "<ids:specification name=\"Walls-FireRating\" ifcVersion=\"IFC4X3_ADD2\">"
        ));
        assert!(xml.contains(
            "<ids:applicability><ids:entity><ids:name><ids:simpleValue>IFCWALL</ids:simpleValue></ids:name></ids:entity></ids:applicability>"
        ));
        assert!(xml.contains(
            "<ids:requirements><ids:property dataType=\"IFCLABEL\"><ids:propertySet><ids:simpleValue>Pset_WallCommon</ids:simpleValue></ids:propertySet><ids:baseName><ids:simpleValue>FireRating</ids:simpleValue></ids:baseName></ids:property></ids:requirements>"
        ));
        assert!(!xml.contains("<ids:value>"));
        assert!(!xml.contains("<ids:author>"));
    }

    #[test]
    fn test_applicability_schema_order() {
        let mut b = Builder::new(SpecificationData::new("Order"));
        b.facet(
            NodeData::Material(MaterialData {
                value: Some("steel".into()),
                ..Default::default()
            }),
            Section::Applicability,
        );
        b.facet(fire_rating(), Section::Applicability);
        b.facet(
            NodeData::Attribute(AttributeData {
                name: "Name".into(),
                ..Default::default()
            }),
            Section::Applicability,
        );
        b.facet(
            NodeData::Classification(ClassificationData {
                system: "Uniclass".into(),
                ..Default::default()
            }),
            Section::Applicability,
        );
        b.facet(
            NodeData::PartOf(PartOfData {
                entity: "ifcbuildingstorey".into(),
                ..Default::default()
            }),
            Section::Applicability,
        );
        b.facet(entity("IFCWALL"), Section::Applicability);

        let xml = serialize(&b.graph, &compact()).unwrap();
        let order: Vec<usize> = [
            "<ids:entity>",
            "<ids:partOf>",
            "<ids:classification>",
            "<ids:attribute>",
            "<ids:property ",
            "<ids:material>",
        ]
        .iter()
        .map(|tag| xml.find(tag).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", xml);
        assert!(xml.contains("<ids:simpleValue>IFCBUILDINGSTOREY</ids:simpleValue>"));
        assert!(!xml.contains("<ids:requirements"));
    }

    #[test]
    fn test_requirements_keep_edge_order_and_cardinality() {
        let mut b = Builder::new(SpecificationData::new("Req"));
        b.facet(entity("IFCDOOR"), Section::Applicability);
        let mut material = NodeData::Material(MaterialData::default());
        material.set_cardinality(Some(Cardinality::Prohibited));
        b.facet(material, Section::Requirements);
        let mut classification = NodeData::Classification(ClassificationData {
            system: "Uniclass 2015".into(),
            value: Some("Pr_20".into()),
            uri: Some("https://example.org/uniclass".into()),
            ..Default::default()
        });
        classification.set_instructions(Some("Use the 2015 edition".into()));
        b.facet(classification, Section::Requirements);

        let xml = serialize(&b.graph, &compact()).unwrap();
        assert!(xml.find("<ids:material").unwrap() < xml.find("<ids:classification").unwrap());
        assert!(xml.contains("<ids:material cardinality=\"prohibited\"/>") || xml.contains("<ids:material cardinality=\"prohibited\"></ids:material>"));
        assert!(xml.contains(
            "<ids:classification uri=\"https://example.org/uniclass\" instructions=\"Use the 2015 edition\"><ids:value><ids:simpleValue>Pr_20</ids:simpleValue></ids:value><ids:system>"
        ));
    }

    #[test]
    fn test_enumeration_is_sorted() {
        let xml_for = |values: [&str; 2]| {
            let mut b = Builder::new(SpecificationData::new("Enum"));
            b.facet(entity("IFCWALL"), Section::Applicability);
            b.restricted(
                fire_rating(),
                Restriction::enumeration(values),
                Section::Requirements,
            );
            serialize(&b.graph, &compact()).unwrap()
        };

        let a = xml_for(["b", "a"]);
        let b = xml_for(["a", "b"]);
        assert_eq!(a, b);
        assert!(a.contains(
            "<ids:value><xs:restriction base=\"xs:string\"><xs:enumeration value=\"a\"/><xs:enumeration value=\"b\"/></xs:restriction></ids:value>"
        ));
    }

    #[test]
    fn test_direct_edge_and_chain_emit_once() {
        let mut b = Builder::new(SpecificationData::new("Dup"));
        b.facet(entity("IFCWALL"), Section::Applicability);
        let prop = b.restricted(
            fire_rating(),
            Restriction::pattern("REI[0-9]+"),
            Section::Requirements,
        );
        let spec = b.spec.clone();
        b.graph
            .connect(&mut b.ids, prop, spec, Some(Section::Requirements));

        let xml = serialize(&b.graph, &compact()).unwrap();
        assert_eq!(xml.matches("<ids:property").count(), 1);
        assert!(xml.contains("<xs:pattern value=\"REI[0-9]+\"/>"));
    }

    #[test]
    fn test_empty_applicability_wildcard() {
        let spec = SpecificationData::new("Any").with_empty_applicability(Cardinality::Optional);
        let mut b = Builder::new(spec);
        b.facet(
            NodeData::Attribute(AttributeData {
                name: "Name".into(),
                ..Default::default()
            }),
            Section::Requirements,
        );
        let xml = serialize(&b.graph, &compact()).unwrap();
        assert!(xml.contains("<ids:applicability minOccurs=\"0\" maxOccurs=\"unbounded\"/>"));

        let plain = Builder::new(SpecificationData::new("None"));
        let xml = serialize(&plain.graph, &compact()).unwrap();
        assert!(!xml.contains("<ids:applicability"));
    }

    #[test]
    fn test_author_handling() {
        assert_eq!(
            normalize_author(" Jane Doe "),
            Some("janedoe@idsedit.com".into())
        );
        assert_eq!(normalize_author("  "), None);

        let b = Builder::new(SpecificationData::new("Meta"));
        let mut metadata = IdsMetadata::new("Project IDS");
        metadata.author = Some("a@b".into());
        metadata.date = Some("2024-01-01".into());

        let lenient = compact().with_metadata(metadata.clone()).with_date("2024-05-01");
        let xml = serialize(&b.graph, &lenient).unwrap();
        assert!(!xml.contains("<ids:author>"));
        assert!(xml.contains("<ids:date>2024-05-01</ids:date>"));

        let strict = compact().with_metadata(metadata.clone()).with_lenient(false);
        assert!(matches!(
            serialize(&b.graph, &strict),
            Err(IdsError::InvalidAuthor(_))
        ));

        metadata.author = Some("bim.manager@example.com".into());
        let xml = serialize(&b.graph, &compact().with_metadata(metadata)).unwrap();
        assert!(xml.contains(
            "<ids:title>Project IDS</ids:title><ids:author>bim.manager@example.com</ids:author><ids:date>2024-01-01</ids:date>"
        ));
    }

    #[test]
    fn test_empty_restriction_strict() {
        let mut b = Builder::new(SpecificationData::new("Empty"));
        b.facet(entity("IFCWALL"), Section::Applicability);
        b.restricted(
            fire_rating(),
            Restriction::Enumeration { values: Vec::new() },
            Section::Requirements,
        );

        let xml = serialize(&b.graph, &compact()).unwrap();
        assert!(!xml.contains("xs:restriction"));
        assert!(matches!(
            serialize(&b.graph, &compact().with_lenient(false)),
            Err(IdsError::MalformedFacet { .. })
        ));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let mut b = Builder::new(SpecificationData::new("Pretty"));
        b.facet(entity("IFCWALL"), Section::Applicability);
        let xml = serialize(&b.graph, &SerializeOptions::default()).unwrap();
        assert!(xml.contains("\n  <ids:info>"));
        assert!(xml.contains("<ids:simpleValue>IFCWALL</ids:simpleValue>"));
    }
}
