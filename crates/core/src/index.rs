//! VFX marker index built from a document's event list
//!
//! Markers live in `Comment Type="Locator"` elements that sit next to the
//! `Event` elements inside `Events`. A comment counts as a VFX marker only
//! if its note text carries a shot code (`VFX 0120_0050` and friends);
//! everything else in the event list is ignored.

use crate::document::{Document, DocumentError, Element};
use ahash::AHashMap;
use regex::Regex;
use std::sync::LazyLock;

/// `VFX`, one separator, then two digit groups joined by one separator.
/// Separators are space or underscore in any combination.
static SHOT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"VFX[_ ](\d+[_ ]\d+)").expect("shot code pattern compiles"));

/// Extract a canonical shot code from marker note text.
///
/// `VFX 0120_0050`, `VFX_0120 0050`, etc. all normalize to `0120_0050`.
/// Returns `None` when the text carries no shot code; such comments are
/// not VFX markers by this tool's criterion.
pub fn shot_code(note: &str) -> Option<String> {
    SHOT_CODE
        .captures(note)
        .map(|caps| caps[1].replace(' ', "_"))
}

/// One indexed VFX marker. Borrows from the document it was built over;
/// `comment` is the full `Comment` element so the merge can copy the
/// sub-tree verbatim, metadata and all.
#[derive(Debug, Clone)]
pub struct VfxRecord<'doc> {
    pub code: String,
    pub note: Option<&'doc str>,
    pub clip_name: Option<&'doc str>,
    pub timecode: Option<&'doc str>,
    pub comment: &'doc Element,
}

/// Shot code to record mapping for one document. Built once, read-only
/// afterwards. The map itself is unordered; every ordered view sorts the
/// codes explicitly.
#[derive(Debug)]
pub struct VfxIndex<'doc> {
    records: AHashMap<String, VfxRecord<'doc>>,
}

impl<'doc> VfxIndex<'doc> {
    /// Scan the document's event list and index every Locator comment
    /// whose note text carries a shot code.
    ///
    /// Duplicate codes overwrite: the last occurrence in document order
    /// wins the slot. Comments without a parseable code are skipped
    /// silently.
    pub fn build(doc: &'doc Document) -> Result<Self, DocumentError> {
        let events = doc.events()?;
        let mut records = AHashMap::new();

        for comment in &events.children {
            if comment.tag != "Comment" || comment.attr("Type") != Some("Locator") {
                continue;
            }

            let note = comment.find("Text").and_then(|t| t.text.as_deref());
            let Some(code) = note.and_then(shot_code) else {
                continue;
            };

            let clip_name = comment.nested_text("Source", "ClipName");
            let timecode = comment.nested_text("Master", "Timecode");

            tracing::debug!(
                code = %code,
                clip = clip_name.unwrap_or("-"),
                tc = timecode.unwrap_or("-"),
                "indexed VFX marker"
            );

            records.insert(
                code.clone(),
                VfxRecord {
                    code,
                    note,
                    clip_name,
                    timecode,
                    comment,
                },
            );
        }

        Ok(Self { records })
    }

    /// Number of indexed markers
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for a shot code
    pub fn get(&self, code: &str) -> Option<&VfxRecord<'doc>> {
        self.records.get(code)
    }

    /// Whether a shot code is present
    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    /// All shot codes, unordered
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// All shot codes in ascending lexical order
    pub fn sorted_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.records.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
