// src/page/mod.rs
// =============================================================================
// Everything we do with a page once it has been downloaded.
//
// Submodules:
// - document: pattern matching and link extraction (Page, MatchOptions)
// - normalize: Unicode cleanup applied before matching (optional)
// =============================================================================

mod document;
mod normalize;

pub use document::{MatchOptions, Page};
pub use normalize::{normalize, normalize_with, NormalizationForm};
