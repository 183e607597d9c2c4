// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for requirement graph representation
//!
//! Node payloads are a sum type keyed by node kind, so every consumer works
//! with a typed record instead of probing an untyped map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node identifier, unique within one graph
pub type NodeId = String;

/// Edge identifier, unique within one graph
pub type EdgeId = String;

/// Default IFC schema version for new specifications
pub const DEFAULT_IFC_VERSION: &str = "IFC4X3_ADD2";

/// 2-D canvas coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by the given offsets
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Node kind, serialized with the canvas type strings (`spec`, `partOf`, ...)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Spec,
    Entity,
    Property,
    Attribute,
    Classification,
    Material,
    PartOf,
    Restriction,
}

impl NodeKind {
    /// All facet kinds
    pub const FACETS: [NodeKind; 6] = [
        NodeKind::Entity,
        NodeKind::Property,
        NodeKind::Attribute,
        NodeKind::Classification,
        NodeKind::Material,
        NodeKind::PartOf,
    ];

    /// Element order mandated by the IDS schema inside `applicability`
    pub const APPLICABILITY_ORDER: [NodeKind; 6] = [
        NodeKind::Entity,
        NodeKind::PartOf,
        NodeKind::Classification,
        NodeKind::Attribute,
        NodeKind::Property,
        NodeKind::Material,
    ];

    /// Canvas type string, also the IDS element local name for facets
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Spec => "spec",
            NodeKind::Entity => "entity",
            NodeKind::Property => "property",
            NodeKind::Attribute => "attribute",
            NodeKind::Classification => "classification",
            NodeKind::Material => "material",
            NodeKind::PartOf => "partOf",
            NodeKind::Restriction => "restriction",
        }
    }

    /// Whether nodes of this kind are facets
    pub fn is_facet(&self) -> bool {
        !matches!(self, NodeKind::Spec | NodeKind::Restriction)
    }

    /// Whether facets of this kind carry a `value` that may be restricted
    pub fn has_value(&self) -> bool {
        matches!(
            self,
            NodeKind::Property | NodeKind::Attribute | NodeKind::Classification | NodeKind::Material
        )
    }

    /// Position in the schema order for applicability facets
    pub fn applicability_rank(&self) -> usize {
        Self::APPLICABILITY_ORDER
            .iter()
            .position(|k| k == self)
            .unwrap_or(Self::APPLICABILITY_ORDER.len())
    }

    /// Look up a facet kind by IDS element local name
    pub fn from_facet_element(name: &str) -> Option<Self> {
        Self::FACETS.iter().copied().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(NodeKind::Spec),
            "restriction" => Ok(NodeKind::Restriction),
            other => NodeKind::from_facet_element(other)
                .ok_or_else(|| format!("unknown node type '{}'", other)),
        }
    }
}

/// Specification handle an edge plugs into
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Applicability,
    Requirements,
}

impl Section {
    /// Handle name, also the IDS element local name
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Applicability => "applicability",
            Section::Requirements => "requirements",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence rule of a requirement facet or of a wildcard applicability
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Required,
    Optional,
    Prohibited,
}

impl Cardinality {
    /// Attribute value as written in IDS
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::Required => "required",
            Cardinality::Optional => "optional",
            Cardinality::Prohibited => "prohibited",
        }
    }

    /// `(minOccurs, maxOccurs)` pair for an applicability section
    pub fn min_max_occurs(&self) -> (&'static str, &'static str) {
        match self {
            Cardinality::Required => ("1", "unbounded"),
            Cardinality::Optional => ("0", "unbounded"),
            Cardinality::Prohibited => ("0", "0"),
        }
    }

    /// Convert `minOccurs`/`maxOccurs` back to a cardinality
    ///
    /// Absent attributes take the schema defaults (`1`, `unbounded`).
    /// Combinations without a named cardinality map to `Required`.
    pub fn from_occurs(min: Option<&str>, max: Option<&str>) -> Self {
        let min = min.map(str::trim).unwrap_or("1");
        let max = max.map(str::trim).unwrap_or("unbounded");
        match (min, max) {
            ("1", "unbounded") => Cardinality::Required,
            ("0", "unbounded") => Cardinality::Optional,
            ("0", "0") => Cardinality::Prohibited,
            _ => Cardinality::Required,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "required" => Ok(Cardinality::Required),
            "optional" => Ok(Cardinality::Optional),
            "prohibited" => Ok(Cardinality::Prohibited),
            other => Err(format!("unknown cardinality '{}'", other)),
        }
    }
}

/// IDS file-level metadata (`ids:info`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdsMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

impl IdsMetadata {
    /// Create metadata with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Node payloads
// ============================================================================

/// Specification node payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ifc_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Applicability is present but intentionally empty (wildcard)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_empty_applicability: bool,
    /// Occurrence rule of the wildcard applicability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicability_cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_description: Option<String>,
}

impl SpecificationData {
    /// Create a specification with a name and the default IFC version
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ifc_version: DEFAULT_IFC_VERSION.to_string(),
            ..Default::default()
        }
    }

    /// Mark applicability as an intentional wildcard with the given cardinality
    pub fn with_empty_applicability(mut self, cardinality: Cardinality) -> Self {
        self.has_empty_applicability = true;
        self.applicability_cardinality = Some(cardinality);
        self
    }
}

/// Entity facet payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityData {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Property facet payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    #[serde(default)]
    pub property_set: String,
    #[serde(default)]
    pub base_name: String,
    /// Never inferred; absent is schema-valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Attribute facet payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeData {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Classification facet payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationData {
    #[serde(default)]
    pub system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Material facet payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// PartOf facet payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOfData {
    #[serde(default)]
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Constrained value carried by a restriction node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "restrictionType", rename_all = "lowercase")]
pub enum Restriction {
    /// Value must be one of a set
    Enumeration {
        #[serde(default)]
        values: Vec<String>,
    },
    /// Value must match a regular expression
    Pattern {
        #[serde(default)]
        pattern: String,
    },
    /// Inclusive numeric bounds, either side optional
    Bounds {
        #[serde(
            rename = "minValue",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        min_value: Option<String>,
        #[serde(
            rename = "maxValue",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        max_value: Option<String>,
    },
    /// Inclusive length bounds, either side optional
    Length {
        #[serde(
            rename = "minLength",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        min_length: Option<String>,
        #[serde(
            rename = "maxLength",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        max_length: Option<String>,
    },
}

impl Restriction {
    /// Create an enumeration, dropping duplicates (case-sensitive) and keeping first occurrence order
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Restriction::Enumeration { values: unique }
    }

    /// Create a pattern restriction
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Restriction::Pattern {
            pattern: pattern.into(),
        }
    }

    /// Create a bounds restriction
    pub fn bounds(min: Option<&str>, max: Option<&str>) -> Self {
        Restriction::Bounds {
            min_value: min.map(str::to_string),
            max_value: max.map(str::to_string),
        }
    }

    /// Create a length restriction
    pub fn length(min: Option<&str>, max: Option<&str>) -> Self {
        Restriction::Length {
            min_length: min.map(str::to_string),
            max_length: max.map(str::to_string),
        }
    }

    /// `restrictionType` string
    pub fn type_name(&self) -> &'static str {
        match self {
            Restriction::Enumeration { .. } => "enumeration",
            Restriction::Pattern { .. } => "pattern",
            Restriction::Bounds { .. } => "bounds",
            Restriction::Length { .. } => "length",
        }
    }

    /// Enumeration values in lexicographic order without duplicates
    pub fn sorted_values(&self) -> Vec<String> {
        match self {
            Restriction::Enumeration { values } => {
                let mut sorted = values.clone();
                sorted.sort();
                sorted.dedup();
                sorted
            }
            _ => Vec::new(),
        }
    }

    /// Whether an enumeration lists the same value twice
    pub fn has_duplicate_values(&self) -> bool {
        match self {
            Restriction::Enumeration { values } => self.sorted_values().len() != values.len(),
            _ => false,
        }
    }
}

/// Typed node payload, one variant per node kind
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Spec(SpecificationData),
    Entity(EntityData),
    Property(PropertyData),
    Attribute(AttributeData),
    Classification(ClassificationData),
    Material(MaterialData),
    PartOf(PartOfData),
    Restriction(Restriction),
}

impl NodeData {
    /// Kind of node this payload belongs to
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Spec(_) => NodeKind::Spec,
            NodeData::Entity(_) => NodeKind::Entity,
            NodeData::Property(_) => NodeKind::Property,
            NodeData::Attribute(_) => NodeKind::Attribute,
            NodeData::Classification(_) => NodeKind::Classification,
            NodeData::Material(_) => NodeKind::Material,
            NodeData::PartOf(_) => NodeKind::PartOf,
            NodeData::Restriction(_) => NodeKind::Restriction,
        }
    }

    /// Decode a canvas `data` object for the given kind
    pub fn from_json(kind: NodeKind, value: serde_json::Value) -> serde_json::Result<Self> {
        // The UI may store a missing payload as null
        let value = if value.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            value
        };
        Ok(match kind {
            NodeKind::Spec => NodeData::Spec(serde_json::from_value(value)?),
            NodeKind::Entity => NodeData::Entity(serde_json::from_value(value)?),
            NodeKind::Property => NodeData::Property(serde_json::from_value(value)?),
            NodeKind::Attribute => NodeData::Attribute(serde_json::from_value(value)?),
            NodeKind::Classification => NodeData::Classification(serde_json::from_value(value)?),
            NodeKind::Material => NodeData::Material(serde_json::from_value(value)?),
            NodeKind::PartOf => NodeData::PartOf(serde_json::from_value(value)?),
            NodeKind::Restriction => NodeData::Restriction(serde_json::from_value(value)?),
        })
    }

    /// Specification payload, if this is a specification
    pub fn as_spec(&self) -> Option<&SpecificationData> {
        match self {
            NodeData::Spec(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable specification payload
    pub fn as_spec_mut(&mut self) -> Option<&mut SpecificationData> {
        match self {
            NodeData::Spec(data) => Some(data),
            _ => None,
        }
    }

    /// Restriction payload, if this is a restriction
    pub fn as_restriction(&self) -> Option<&Restriction> {
        match self {
            NodeData::Restriction(r) => Some(r),
            _ => None,
        }
    }

    /// Requirement cardinality of a facet
    pub fn cardinality(&self) -> Option<Cardinality> {
        match self {
            NodeData::Entity(d) => d.cardinality,
            NodeData::Property(d) => d.cardinality,
            NodeData::Attribute(d) => d.cardinality,
            NodeData::Classification(d) => d.cardinality,
            NodeData::Material(d) => d.cardinality,
            NodeData::PartOf(d) => d.cardinality,
            NodeData::Spec(_) | NodeData::Restriction(_) => None,
        }
    }

    /// Set the requirement cardinality of a facet (no-op for other nodes)
    pub fn set_cardinality(&mut self, cardinality: Option<Cardinality>) {
        match self {
            NodeData::Entity(d) => d.cardinality = cardinality,
            NodeData::Property(d) => d.cardinality = cardinality,
            NodeData::Attribute(d) => d.cardinality = cardinality,
            NodeData::Classification(d) => d.cardinality = cardinality,
            NodeData::Material(d) => d.cardinality = cardinality,
            NodeData::PartOf(d) => d.cardinality = cardinality,
            NodeData::Spec(_) | NodeData::Restriction(_) => {}
        }
    }

    /// Requirement instructions of a facet
    pub fn instructions(&self) -> Option<&str> {
        let instructions = match self {
            NodeData::Entity(d) => &d.instructions,
            NodeData::Property(d) => &d.instructions,
            NodeData::Attribute(d) => &d.instructions,
            NodeData::Classification(d) => &d.instructions,
            NodeData::Material(d) => &d.instructions,
            NodeData::PartOf(d) => &d.instructions,
            NodeData::Spec(d) => &d.instructions,
            NodeData::Restriction(_) => return None,
        };
        non_empty(instructions)
    }

    /// Set requirement instructions of a facet (no-op for restrictions)
    pub fn set_instructions(&mut self, instructions: Option<String>) {
        match self {
            NodeData::Entity(d) => d.instructions = instructions,
            NodeData::Property(d) => d.instructions = instructions,
            NodeData::Attribute(d) => d.instructions = instructions,
            NodeData::Classification(d) => d.instructions = instructions,
            NodeData::Material(d) => d.instructions = instructions,
            NodeData::PartOf(d) => d.instructions = instructions,
            NodeData::Spec(d) => d.instructions = instructions,
            NodeData::Restriction(_) => {}
        }
    }

    /// Literal value of a facet; empty strings count as absent
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            NodeData::Property(d) => non_empty(&d.value),
            NodeData::Attribute(d) => non_empty(&d.value),
            NodeData::Classification(d) => non_empty(&d.value),
            NodeData::Material(d) => non_empty(&d.value),
            _ => None,
        }
    }

    /// Store a literal value on a facet that has one
    pub fn set_value(&mut self, value: Option<String>) {
        match self {
            NodeData::Property(d) => d.value = value,
            NodeData::Attribute(d) => d.value = value,
            NodeData::Classification(d) => d.value = value,
            NodeData::Material(d) => d.value = value,
            _ => {}
        }
    }

    /// `uri` attribute of property, classification and material facets
    pub fn uri(&self) -> Option<&str> {
        match self {
            NodeData::Property(d) => non_empty(&d.uri),
            NodeData::Classification(d) => non_empty(&d.uri),
            NodeData::Material(d) => non_empty(&d.uri),
            _ => None,
        }
    }
}

/// Borrow an optional string, treating empty as absent
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Nodes and edges
// ============================================================================

/// A node in the requirements graph
///
/// Serialized in the canvas shape `{ id, type, position, data }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct GraphNode {
    pub id: NodeId,
    pub position: Position,
    pub data: NodeData,
}

impl GraphNode {
    /// Create a new node
    pub fn new(id: impl Into<NodeId>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position,
            data,
        }
    }

    /// Node kind, derived from the payload
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

#[derive(Deserialize)]
struct RawNode {
    id: NodeId,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    data: serde_json::Value,
}

impl TryFrom<RawNode> for GraphNode {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        Ok(GraphNode {
            data: NodeData::from_json(raw.kind, raw.data)?,
            id: raw.id,
            position: raw.position,
        })
    }
}

#[derive(Serialize)]
struct NodeRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: NodeKind,
    position: Position,
    data: &'a NodeData,
}

impl Serialize for GraphNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef {
            id: &self.id,
            kind: self.kind(),
            position: self.position,
            data: &self.data,
        }
        .serialize(serializer)
    }
}

/// A directed edge between two nodes
///
/// Edges into a specification carry a `target_handle`; a facet → restriction
/// link has none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<Section>,
}

impl GraphEdge {
    /// Create an edge into a specification handle
    pub fn to_section(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        section: Section,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            target_handle: Some(section),
        }
    }

    /// Create a handle-less edge (facet → restriction)
    pub fn plain(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            target_handle: None,
        }
    }

    /// Whether the edge touches the given node
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
