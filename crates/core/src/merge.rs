//! Merge engine: fill VFX markers missing from the plates document
//!
//! The plates export is the trusted side (camera-original clip names); the
//! original export is the complete side (full marker set). The merge keeps
//! everything in plates untouched and appends deep copies of the markers
//! that only exist in the original.

use crate::document::{Document, DocumentError};
use crate::index::VfxIndex;
use std::collections::BTreeSet;

/// Result of a merge: the independent merged tree, the shot codes that
/// were missing from plates (sorted), and the marker total after merge.
#[derive(Debug)]
pub struct MergeOutcome {
    pub merged: Document,
    pub missing: BTreeSet<String>,
    pub total: usize,
}

/// Merge the original's extra markers into a copy of the plates document.
///
/// Missing codes are appended to the event list in ascending code order,
/// each one a verbatim copy of the original's `Comment` sub-tree. If the
/// copy has a `ListHead/OpticalCount` field it is set to the new marker
/// total; documents without one are left alone.
///
/// Neither input document is modified.
pub fn merge(
    plates_doc: &Document,
    plates: &VfxIndex<'_>,
    original: &VfxIndex<'_>,
) -> Result<MergeOutcome, DocumentError> {
    let missing: BTreeSet<String> = original
        .codes()
        .filter(|code| !plates.contains(code))
        .map(String::from)
        .collect();

    let mut merged = plates_doc.clone();
    let events = merged.events_mut()?;

    for code in &missing {
        if let Some(record) = original.get(code) {
            events.children.push(record.comment.clone());
        }
    }

    let total = plates.len() + missing.len();

    if let Some(count) = merged
        .root
        .descendant_mut("ListHead")
        .and_then(|head| head.find_mut("OpticalCount"))
    {
        count.text = Some(total.to_string());
    }

    tracing::info!(
        plates = plates.len(),
        original = original.len(),
        added = missing.len(),
        total,
        "merged VFX markers"
    );

    Ok(MergeOutcome {
        merged,
        missing,
        total,
    })
}
