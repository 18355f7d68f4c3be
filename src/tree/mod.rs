//! Tree Builder - minimal XML tree model over raw decoder tokens
//!
//! An [`Element`] carries its qualified name, ordered attributes, and its
//! inner content as raw serialized markup. Children are not materialized into
//! a persistent tree; [`Element::children`] re-parses the stored content on
//! every call. That trades CPU for simplicity and keeps the model free of
//! parent/child ownership cycles.

mod builder;
mod element;
pub(crate) mod serialize;

pub use builder::parse_elements;
pub use element::{Attr, Element, QName};
