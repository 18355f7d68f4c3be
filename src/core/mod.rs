//! Low-level XML primitives
//!
//! Building blocks shared by the tree builder:
//! - Scanner: memchr-backed byte cursor with quote-aware tag-end search
//! - Tokenizer: lenient pull tokenizer for well-formedness-only parsing
//! - Entities: predefined/numeric entity decoding and text escaping
//! - Attributes: ordered attribute extraction from raw tag bytes

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
