//! Owned tree representation for FilmScribe XML documents
//!
//! FilmScribe exports are small (a few hundred KB at most), so the whole
//! document is parsed into an owned `Element` tree that can be deep-copied
//! and mutated independently of the input buffer, then serialized back out.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading, writing, or navigating a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed XML in {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no <{0}> element found in document")]
    MissingElement(&'static str),
}

/// One XML element: tag, attributes in document order, text before the
/// first child, children in document order, and the text between this
/// element's end tag and the next sibling (`tail`).
///
/// The text/tail split preserves the export's whitespace layout through a
/// parse/serialize round trip, so untouched parts of the plates document
/// come back out byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
    pub tail: Option<String>,
}

impl Element {
    /// Create an empty element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
            tail: None,
        }
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First direct child with the given tag, mutable
    pub fn find_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    /// First descendant with the given tag, depth-first (self excluded)
    pub fn descendant(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    /// First descendant with the given tag, depth-first, mutable
    pub fn descendant_mut(&mut self, tag: &str) -> Option<&mut Element> {
        for child in &mut self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.descendant_mut(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Text content of a nested child, e.g. `Source` then `ClipName`
    pub fn nested_text(&self, outer: &str, inner: &str) -> Option<&str> {
        self.find(outer)
            .and_then(|o| o.find(inner))
            .and_then(|i| i.text.as_deref())
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            if let Some(text) = &self.text {
                escape_into(text, false, out);
            }
            for child in &self.children {
                child.write_xml(out);
            }
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }

        if let Some(tail) = &self.tail {
            escape_into(tail, false, out);
        }
    }
}

/// Escape XML entities; attribute values additionally escape quotes.
fn escape_into(s: &str, attr: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// A parsed FilmScribe document: the root element tree.
///
/// `Clone` is a deep copy of the whole tree; the merge engine relies on
/// this to mutate an independent copy of the plates document.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse a document from XML text
    pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
        let parsed = roxmltree::Document::parse(text)?;
        Ok(Self {
            root: convert(parsed.root_element()),
        })
    }

    /// Read and parse a document from a file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text).map_err(|source| DocumentError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The event container: first `Events` element anywhere in the tree.
    ///
    /// Both inputs must have one; its absence is a structural error.
    pub fn events(&self) -> Result<&Element, DocumentError> {
        self.root
            .descendant("Events")
            .ok_or(DocumentError::MissingElement("Events"))
    }

    /// Mutable access to the event container
    pub fn events_mut(&mut self) -> Result<&mut Element, DocumentError> {
        self.root
            .descendant_mut("Events")
            .ok_or(DocumentError::MissingElement("Events"))
    }

    /// Serialize to XML text with a declaration
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.root.write_xml(&mut out);
        out
    }

    /// Serialize and write to a file, UTF-8
    pub fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_xml()).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Convert a roxmltree node into an owned element.
///
/// Text nodes follow the text/tail model: character data before the first
/// child element belongs to the parent's `text`, character data after a
/// child element belongs to that child's `tail`. Comments and processing
/// instructions are dropped.
fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut elem = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        elem.attrs
            .push((attr.name().to_string(), attr.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            elem.children.push(convert(child));
        } else if child.is_text() {
            let chunk = child.text().unwrap_or("");
            let slot = match elem.children.last_mut() {
                Some(last) => &mut last.tail,
                None => &mut elem.text,
            };
            match slot {
                Some(existing) => existing.push_str(chunk),
                None => *slot = Some(chunk.to_string()),
            }
        }
    }

    elem
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FilmScribeFile Version="1.0"><AssembleList>
  <ListHead>
    <Title>REEL_1</Title>
    <OpticalCount>2</OpticalCount>
  </ListHead>
  <Events>
    <Event Num="1" Type="Cut"/>
    <Comment Type="Locator">
      <Text>VFX 0010_0010 cleanup</Text>
    </Comment>
  </Events>
</AssembleList></FilmScribeFile>"#;

    #[test]
    fn parse_builds_expected_tree() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.root.tag, "FilmScribeFile");
        assert_eq!(doc.root.attr("Version"), Some("1.0"));

        let head = doc.root.descendant("ListHead").unwrap();
        assert_eq!(head.find("Title").unwrap().text.as_deref(), Some("REEL_1"));

        let events = doc.events().unwrap();
        assert_eq!(events.children.len(), 2);
        assert_eq!(events.children[0].tag, "Event");
        assert_eq!(events.children[1].attr("Type"), Some("Locator"));
    }

    #[test]
    fn round_trip_preserves_layout() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.to_xml(), SAMPLE);
    }

    #[test]
    fn round_trip_is_stable_after_clone() {
        let doc = Document::parse(SAMPLE).unwrap();
        let copy = doc.clone();
        assert_eq!(copy.to_xml(), doc.to_xml());
    }

    #[test]
    fn text_entities_are_escaped() {
        let xml = "<Root Note=\"a &amp; b &quot;q&quot;\"><Text>1 &lt; 2 &amp; 3 &gt; 2</Text></Root>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            doc.root.find("Text").unwrap().text.as_deref(),
            Some("1 < 2 & 3 > 2")
        );
        assert!(doc.to_xml().contains("1 &lt; 2 &amp; 3 &gt; 2"));
        assert!(doc.to_xml().contains("a &amp; b &quot;q&quot;"));
    }

    #[test]
    fn empty_elements_self_close() {
        let doc = Document::parse("<Root><Empty/></Root>").unwrap();
        assert!(doc.to_xml().contains("<Empty/>"));
    }

    #[test]
    fn missing_events_is_an_error() {
        let doc = Document::parse("<Root><Other/></Root>").unwrap();
        assert!(matches!(
            doc.events(),
            Err(DocumentError::MissingElement("Events"))
        ));
    }

    #[test]
    fn load_reports_malformed_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xml");
        std::fs::write(&path, "<Root><Unclosed>").unwrap();
        assert!(matches!(
            Document::load(&path),
            Err(DocumentError::Malformed { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.xml");
        assert!(matches!(
            Document::load(&path),
            Err(DocumentError::Read { .. })
        ));
    }
}
