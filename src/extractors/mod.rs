// src/extractors/mod.rs
pub mod section;
pub mod source;

// Re-export key extraction types for convenience
pub use section::{Section, Segmenter};
pub use source::extract_text;
