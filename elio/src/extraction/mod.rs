//! Product attribute extraction from OCR text.
//!
//! Keyword and regex heuristics tuned for medical-supply packaging. All
//! functions here are pure: no I/O and no shared state.

mod attributes;
mod quantity;

pub use attributes::{extract_attributes, extract_from_text};
pub use quantity::infer_quantity;
