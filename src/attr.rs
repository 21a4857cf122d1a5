//! Attribute system for stored links
//!
//! - [`AttributeMap`]: what the editor hands us when a dialog opens on an
//!   existing link. Lookup of an absent key yields `""`.
//! - [`AttributePacket`]: what a confirmed dialog hands back. Ordered, so
//!   the rendered `<link/>` element is deterministic.

use compact_str::CompactString;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{LinkError, LinkResult};

// =============================================================================
// AttrKey
// =============================================================================

/// Attribute names used by the six link kinds.
pub mod keys {
    pub const LINKTYPE: &str = "linktype";
    pub const TEXT: &str = "text";
    pub const URL: &str = "url";
    pub const ANCHOR: &str = "anchor";
    pub const TITLE: &str = "title";
    pub const CLASS: &str = "class";
    pub const TARGET: &str = "target";
    pub const QUERYSTRING: &str = "querystring";
    pub const ID: &str = "id";
}

/// Element name of the serialized link
pub const LINK_TAG: &str = "link";

// =============================================================================
// AttributeMap
// =============================================================================

/// Previously stored link attributes, keyed by name.
///
/// Keys are unique and an absent key reads as the empty string, so decoding
/// never has to distinguish "missing" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    inner: FxHashMap<CompactString, CompactString>,
}

impl AttributeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value, `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.inner.get(key).map(CompactString::as_str).unwrap_or("")
    }

    /// Check if an attribute exists
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Set an attribute value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.insert(key, value);
        self
    }

    /// The stored `linktype`, `""` when absent.
    pub fn link_type(&self) -> &str {
        self.get(keys::LINKTYPE)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over attributes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a stored `<link .../>` element.
    ///
    /// Blank input is the "no link yet" case and yields an empty map, the same
    /// as `<link/>`. Content after the start tag is ignored. Duplicate
    /// attributes and unknown entities are rejected.
    pub fn from_markup(markup: &str) -> LinkResult<Self> {
        let markup = markup.trim();
        if markup.is_empty() {
            return Ok(Self::new());
        }
        read_link(markup)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<CompactString>,
    V: Into<CompactString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl From<&AttributePacket> for AttributeMap {
    fn from(packet: &AttributePacket) -> Self {
        packet.iter().collect()
    }
}

// =============================================================================
// AttributePacket
// =============================================================================

/// Canonical attributes produced when a dialog is confirmed.
///
/// Pairs keep insertion order. Setting a key twice overwrites the first
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePacket {
    attrs: SmallVec<[(CompactString, CompactString); 8]>,
}

impl AttributePacket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute value (insert or update)
    pub fn set(&mut self, key: &str, value: impl Into<CompactString>) {
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|(k, _)| k.as_str() == key) {
            attr.1 = value;
        } else {
            self.attrs.push((CompactString::from(key), value));
        }
    }

    /// Get an attribute value by name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if an attribute exists
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k.as_str() == key)
    }

    /// Attribute names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Render as a self-closing `<link .../>` element.
    pub fn to_markup(&self) -> String {
        let mut output = String::with_capacity(16 + self.attrs.len() * 16);
        output.push('<');
        output.push_str(LINK_TAG);
        for (name, value) in &self.attrs {
            output.push(' ');
            output.push_str(name);
            output.push_str("=\"");
            output.push_str(&escape_attr(value));
            output.push('"');
        }
        output.push_str(" />");
        output
    }
}

// =============================================================================
// Markup helpers
// =============================================================================

/// Escape attribute value special characters.
///
/// Tabs and line breaks become character references; a conforming XML
/// reader would otherwise normalize them to spaces.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}

/// Read the first element of `markup`, which must be a `<link>`.
fn read_link(markup: &str) -> LinkResult<AttributeMap> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(start) | Event::Empty(start)) => {
                if start.name().as_ref() != LINK_TAG.as_bytes() {
                    return Err(expected_link());
                }
                return read_attrs(&start);
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(_) => return Err(expected_link()),
            Err(e) => return Err(LinkError::markup(e.to_string())),
        }
    }
}

fn read_attrs(start: &BytesStart<'_>) -> LinkResult<AttributeMap> {
    let mut map = AttributeMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| LinkError::markup(e.to_string()))?;
        let name =
            std::str::from_utf8(attr.key.as_ref()).map_err(|e| LinkError::markup(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| LinkError::markup(e.to_string()))?;
        map.insert(name, &*value);
    }
    Ok(map)
}

fn expected_link() -> LinkError {
    LinkError::markup(format!("expected <{LINK_TAG}>"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_absent_is_empty() {
        let map = AttributeMap::new().with("url", "/about");
        assert_eq!(map.get("url"), "/about");
        assert_eq!(map.get("anchor"), "");
        assert!(map.contains("url"));
        assert!(!map.contains("anchor"));
    }

    #[test]
    fn test_packet_operations() {
        let mut packet = AttributePacket::new();
        packet.set("text", "Home");
        packet.set("linktype", "internal");
        packet.set("querystring", "a");
        assert_eq!(packet.len(), 3);

        // Update keeps position
        packet.set("querystring", "b");
        assert_eq!(packet.len(), 3);
        assert_eq!(packet.get("querystring"), Some("b"));
        assert_eq!(packet.keys().collect::<Vec<_>>(), ["text", "linktype", "querystring"]);
        assert_eq!(packet.get("id"), None);
    }

    #[test]
    fn test_packet_markup() {
        let mut packet = AttributePacket::new();
        packet.set("text", "Tom & \"Jerry\"");
        packet.set("linktype", "external");
        assert_eq!(
            packet.to_markup(),
            r#"<link text="Tom &amp; &quot;Jerry&quot;" linktype="external" />"#
        );
        assert_eq!(AttributePacket::new().to_markup(), "<link />");
    }

    #[test]
    fn test_parse_markup() {
        let map = AttributeMap::from_markup(
            r#"<link text="a &lt;b&gt;" linktype='mailto' url="mailto:x@y.org" title="&#39;q&#x27;"/>"#,
        )
        .unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("text"), "a <b>");
        assert_eq!(map.link_type(), "mailto");
        assert_eq!(map.get("title"), "'q'");
    }

    #[test]
    fn test_parse_empty_link() {
        assert!(AttributeMap::from_markup("").unwrap().is_empty());
        assert!(AttributeMap::from_markup("<link/>").unwrap().is_empty());
        assert!(AttributeMap::from_markup("<link></link>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_entities() {
        assert!(AttributeMap::from_markup(r#"<link url="a&nbsp;" />"#).is_err());
        assert!(AttributeMap::from_markup(r#"<link url="a&b=c" />"#).is_err());

        let map = AttributeMap::from_markup(r#"<link url="a&amp;b=c" />"#).unwrap();
        assert_eq!(map.get("url"), "a&b=c");
    }

    #[test]
    fn test_parse_rejects_duplicate_attribute() {
        let err = AttributeMap::from_markup(r#"<link url="a" url="b"/>"#).unwrap_err();
        assert!(matches!(err, LinkError::MalformedMarkup(_)));
    }

    #[test]
    fn test_parse_skips_prolog() {
        let map = AttributeMap::from_markup(
            "<?xml version=\"1.0\"?>\n<!-- stored --> <link linktype=\"anchor\" anchor=\"top\"/>",
        )
        .unwrap();
        let mut pairs: Vec<_> = map.iter().collect();
        pairs.sort();
        assert_eq!(pairs, [("anchor", "top"), ("linktype", "anchor")]);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(AttributeMap::from_markup("<a href=\"x\"/>").is_err());
        assert!(AttributeMap::from_markup("<linktype/>").is_err());
        assert!(AttributeMap::from_markup("<link url=x />").is_err());
        assert!(AttributeMap::from_markup("<link url=\"x />").is_err());
        assert!(AttributeMap::from_markup("<link url").is_err());
    }

    #[test]
    fn test_markup_round_trip() {
        let mut packet = AttributePacket::new();
        packet.set("text", "<b>bold</b> & co");
        packet.set("url", "http://a.b/?x=1&y=2");
        let map = AttributeMap::from_markup(&packet.to_markup()).unwrap();
        assert_eq!(map, AttributeMap::from(&packet));
    }

    #[test]
    fn test_markup_escapes_whitespace_controls() {
        let mut packet = AttributePacket::new();
        packet.set("url", "javascript:var a = 1;\r\n\talert(a);");
        let markup = packet.to_markup();
        assert_eq!(
            markup,
            r#"<link url="javascript:var a = 1;&#13;&#10;&#9;alert(a);" />"#
        );

        let map = AttributeMap::from_markup(&markup).unwrap();
        assert_eq!(map.get("url"), "javascript:var a = 1;\r\n\talert(a);");
    }

    #[test]
    fn test_markup_survives_attribute_normalization() {
        let mut packet = AttributePacket::new();
        packet.set("linktype", "javascript");
        packet.set("url", "javascript:var a = 1;\nalert(a);");

        // roxmltree applies XML attribute-value normalization
        let markup = packet.to_markup();
        let doc = roxmltree::Document::parse(&markup).unwrap();
        let link = doc.root_element();
        assert_eq!(link.tag_name().name(), LINK_TAG);
        assert_eq!(link.attribute("url"), Some("javascript:var a = 1;\nalert(a);"));
    }
}
