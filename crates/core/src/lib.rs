//! FilmScribe VFX marker reconciliation
//!
//! This crate provides:
//! - Owned XML document tree (parse, deep-copy, serialize)
//! - VFX marker index (shot code extraction over Locator comments)
//! - Merge engine (append markers missing from the plates side)

pub mod document;
pub mod index;
pub mod merge;

// Re-exports
pub use document::{Document, DocumentError, Element};
pub use index::{shot_code, VfxIndex, VfxRecord};
pub use merge::{merge, MergeOutcome};
