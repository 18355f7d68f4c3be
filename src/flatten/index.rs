//! Reference Index: one full-tree walk collecting every element with an `id`.

use crate::error::Error;
use crate::tree::{parse_elements, Element};
use std::collections::HashMap;

/// Ephemeral mapping from `id` attribute value to the declaring element.
/// Built fresh for every flatten call, never reused across documents.
pub(crate) type RefIndex = HashMap<String, Element>;

/// Parse the document and record `id -> element` for every element carrying
/// an `id` attribute, at any depth.
pub(crate) fn build_index(data: &[u8]) -> Result<RefIndex, Error> {
    let mut index = RefIndex::new();
    for element in parse_elements(data)? {
        collect(element, &mut index)?;
    }
    Ok(index)
}

/// Depth-first, children before self. A duplicate id overwrites the earlier
/// entry (last-write-wins); ids are assumed document-unique.
fn collect(element: Element, index: &mut RefIndex) -> Result<(), Error> {
    for child in element.children()? {
        collect(child, index)?;
    }
    if let Some(id) = element.id() {
        index.insert(id.to_string(), element);
    }
    Ok(())
}
