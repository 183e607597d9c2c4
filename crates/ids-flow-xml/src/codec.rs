// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value/restriction codec
//!
//! Maps a facet's `<ids:value>` subtree to a literal or a [`Restriction`]
//! and back to the list of `xs:restriction` children.

use ids_flow_model::Restriction;
use roxmltree::Node;

/// Outcome of decoding a present `<value>` element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedValue {
    /// A single `simpleValue` (or bare text)
    Literal(String),
    /// Several `simpleValue`s or an `xs:restriction`
    Restriction(Restriction),
    /// An `xs:restriction` matching none of the supported kinds
    Unrecognized(String),
}

/// Decode a facet's `<value>` element
///
/// Returns `None` when the element is absent or carries nothing.
pub fn decode_value(value: Option<Node<'_, '_>>) -> Option<DecodedValue> {
    let value = value?;

    let simple: Vec<String> = children(value, "simpleValue")
        .filter_map(element_text)
        .collect();
    match simple.len() {
        0 => {}
        1 => return simple.into_iter().next().map(DecodedValue::Literal),
        _ => return Some(DecodedValue::Restriction(Restriction::enumeration(simple))),
    }

    if let Some(restriction) = child(value, "restriction") {
        return Some(match decode_restriction(restriction) {
            Some(r) => DecodedValue::Restriction(r),
            None => DecodedValue::Unrecognized(describe_unrecognized(restriction)),
        });
    }

    element_text(value).map(DecodedValue::Literal)
}

/// Classify an `xs:restriction` element
///
/// First match wins: enumeration, pattern, bounds, length.
pub fn decode_restriction(restriction: Node<'_, '_>) -> Option<Restriction> {
    let enumeration: Vec<String> = children(restriction, "enumeration")
        .filter_map(facet_value)
        .collect();
    if !enumeration.is_empty() {
        return Some(Restriction::enumeration(enumeration));
    }

    if let Some(pattern) = child(restriction, "pattern").and_then(facet_value) {
        return Some(Restriction::pattern(pattern));
    }

    let min = child(restriction, "minInclusive").and_then(facet_value);
    let max = child(restriction, "maxInclusive").and_then(facet_value);
    if min.is_some() || max.is_some() {
        return Some(Restriction::bounds(min.as_deref(), max.as_deref()));
    }

    // xs:length fixes both ends
    let exact = child(restriction, "length").and_then(facet_value);
    let min = child(restriction, "minLength")
        .and_then(facet_value)
        .or_else(|| exact.clone());
    let max = child(restriction, "maxLength")
        .and_then(facet_value)
        .or(exact);
    if min.is_some() || max.is_some() {
        return Some(Restriction::length(min.as_deref(), max.as_deref()));
    }

    None
}

/// `xs:restriction` children for a restriction, in output order
///
/// Enumeration values are sorted so equal sets always serialize the same
/// way. Absent or empty sides of bounds and lengths are skipped.
pub fn restriction_facets(restriction: &Restriction) -> Vec<(&'static str, String)> {
    let mut facets = Vec::new();
    let mut push = |tag: &'static str, value: &Option<String>| {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            facets.push((tag, v.to_string()));
        }
    };

    match restriction {
        Restriction::Enumeration { .. } => {
            return restriction
                .sorted_values()
                .into_iter()
                .map(|v| ("xs:enumeration", v))
                .collect();
        }
        Restriction::Pattern { pattern } => {
            push("xs:pattern", &Some(pattern.clone()));
        }
        Restriction::Bounds {
            min_value,
            max_value,
        } => {
            push("xs:minInclusive", min_value);
            push("xs:maxInclusive", max_value);
        }
        Restriction::Length {
            min_length,
            max_length,
        } => {
            push("xs:minLength", min_length);
            push("xs:maxLength", max_length);
        }
    }

    facets
}

// ============================================================================
// Tree helpers shared with the reader
// ============================================================================

/// First child element with the given local name (namespace ignored)
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Child elements with the given local name (namespace ignored)
pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text of an element, `None` if empty
pub(crate) fn element_text(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Text of an `ids:simpleValue` child, or the element's own text
pub(crate) fn simple_value(node: Option<Node<'_, '_>>) -> Option<String> {
    let node = node?;
    match child(node, "simpleValue") {
        Some(simple) => element_text(simple),
        None => element_text(node),
    }
}

/// `value` attribute of an XSD facet element, falling back to its text
fn facet_value(node: Node<'_, '_>) -> Option<String> {
    node.attribute("value")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| element_text(node))
}

fn describe_unrecognized(restriction: Node<'_, '_>) -> String {
    let kinds: Vec<&str> = restriction
        .children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name())
        .collect();
    if kinds.is_empty() {
        "empty restriction".to_string()
    } else {
        format!("unsupported restriction facets: {}", kinds.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:ids="http://standards.buildingsmart.org/IDS" xmlns:xs="http://www.w3.org/2001/XMLSchema""#;

    fn decode(inner: &str) -> Option<DecodedValue> {
        let xml = format!("<ids:value {}>{}</ids:value>", NS, inner);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        decode_value(Some(doc.root_element()))
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(decode_value(None), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn test_literal() {
        assert_eq!(
            decode("<ids:simpleValue> REI60 </ids:simpleValue>"),
            Some(DecodedValue::Literal("REI60".into()))
        );
        assert_eq!(decode("plain"), Some(DecodedValue::Literal("plain".into())));
    }

    #[test]
    fn test_multiple_simple_values_become_enumeration() {
        assert_eq!(
            decode("<ids:simpleValue>A</ids:simpleValue><ids:simpleValue>B</ids:simpleValue><ids:simpleValue>A</ids:simpleValue>"),
            Some(DecodedValue::Restriction(Restriction::enumeration(["A", "B"])))
        );
    }

    #[test]
    fn test_enumeration() {
        let decoded = decode(
            r#"<xs:restriction base="xs:string"><xs:enumeration value="R60"/><xs:enumeration value="R90"/></xs:restriction>"#,
        );
        assert_eq!(
            decoded,
            Some(DecodedValue::Restriction(Restriction::Enumeration {
                values: vec!["R60".into(), "R90".into()]
            }))
        );
    }

    #[test]
    fn test_precedence() {
        let decoded = decode(
            r#"<xs:restriction><xs:pattern value="[A-Z]+"/><xs:enumeration value="X"/><xs:minInclusive value="1"/></xs:restriction>"#,
        );
        assert_eq!(
            decoded,
            Some(DecodedValue::Restriction(Restriction::enumeration(["X"])))
        );

        let decoded = decode(
            r#"<xs:restriction><xs:minLength value="2"/><xs:pattern>D-[0-9]+</xs:pattern></xs:restriction>"#,
        );
        assert_eq!(
            decoded,
            Some(DecodedValue::Restriction(Restriction::pattern("D-[0-9]+")))
        );
    }

    #[test]
    fn test_bounds_and_length() {
        assert_eq!(
            decode(r#"<xs:restriction><xs:maxInclusive value="10.5"/></xs:restriction>"#),
            Some(DecodedValue::Restriction(Restriction::bounds(None, Some("10.5"))))
        );
        assert_eq!(
            decode(r#"<xs:restriction><xs:minLength value="3"/><xs:maxLength value="8"/></xs:restriction>"#),
            Some(DecodedValue::Restriction(Restriction::length(Some("3"), Some("8"))))
        );
        assert_eq!(
            decode(r#"<xs:restriction><xs:length value="4"/></xs:restriction>"#),
            Some(DecodedValue::Restriction(Restriction::length(Some("4"), Some("4"))))
        );
    }

    #[test]
    fn test_unrecognized() {
        match decode(r#"<xs:restriction><xs:minExclusive value="0"/></xs:restriction>"#) {
            Some(DecodedValue::Unrecognized(reason)) => assert!(reason.contains("minExclusive")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_restriction_facets() {
        let a = restriction_facets(&Restriction::enumeration(["b", "a"]));
        let b = restriction_facets(&Restriction::enumeration(["a", "b"]));
        assert_eq!(a, b);
        assert_eq!(a[0], ("xs:enumeration", "a".to_string()));

        let bounds = restriction_facets(&Restriction::bounds(Some("0"), None));
        assert_eq!(bounds, vec![("xs:minInclusive", "0".to_string())]);

        let empty = restriction_facets(&Restriction::length(Some(""), None));
        assert!(empty.is_empty());
    }
}
