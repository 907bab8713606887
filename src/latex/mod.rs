// src/latex/mod.rs
pub mod fragments;
pub mod rules;
pub mod template;
pub mod transliterate;

pub use transliterate::Transliterator;
