//! The substitution pass: placeholder rewriting and re-serialization.

use super::index::RefIndex;
use crate::error::Error;
use crate::tree::serialize::write_element;
use crate::tree::Element;
use std::collections::HashSet;

/// Flatten one element and append its serialized form to `out`.
///
/// Order of operations per element:
/// 1. An element locally named `multiRef` is dropped entirely (Apache Axis2
///    wraps reference targets in sibling `multiRef` containers that must not
///    appear in the application-facing document).
/// 2. A document-local `href` with a known id replaces this element's content
///    with the referenced element's content; tag and attributes are kept.
/// 3. Children are re-derived from the (possibly substituted) content,
///    flattened recursively, and their serialized forms become the new
///    content.
///
/// `active` holds the ids whose substituted content is currently being
/// flattened further up the stack; an `href` targeting one of them is a
/// cycle and fails instead of recursing forever.
pub(crate) fn flatten_element(
    mut element: Element,
    index: &RefIndex,
    active: &mut HashSet<String>,
    out: &mut Vec<u8>,
) -> Result<(), Error> {
    if element.name.local == "multiRef" {
        return Ok(());
    }

    let mut substituted: Option<String> = None;
    if let Some(target) = element.href_target() {
        if active.contains(target) {
            return Err(Error::CyclicReference {
                id: target.to_string(),
            });
        }
        if let Some(referenced) = index.get(target) {
            let target = target.to_string();
            element.content = referenced.content.clone();
            substituted = Some(target);
        }
    }
    if let Some(id) = &substituted {
        active.insert(id.clone());
    }

    let children = element.children()?;
    if !children.is_empty() {
        let mut accum = Vec::new();
        for child in children {
            flatten_element(child, index, active, &mut accum)?;
        }
        element.content = accum;
    }

    if let Some(id) = &substituted {
        active.remove(id);
    }

    write_element(&element, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_elements;

    fn rewrite(doc: &[u8], index: RefIndex) -> Vec<u8> {
        let mut out = Vec::new();
        let mut active = HashSet::new();
        for element in parse_elements(doc).unwrap() {
            flatten_element(element, &index, &mut active, &mut out).unwrap();
        }
        out
    }

    #[test]
    fn test_multiref_serializes_to_nothing() {
        let out = rewrite(b"<multiRef id=\"a\">x</multiRef>", RefIndex::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_placeholder_tag_and_attrs_preserved() {
        let mut index = RefIndex::new();
        for element in parse_elements(b"<multiRef id=\"a\">v</multiRef>").unwrap() {
            index.insert("a".to_string(), element);
        }
        let out = rewrite(b"<s:val q=\"2\" href=\"#a\" />", index);
        assert_eq!(out, b"<s:val q=\"2\" href=\"#a\">v</s:val>");
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let doc = b"<multiRef id=\"a\"><x href=\"#a\"/></multiRef>";
        let mut index = RefIndex::new();
        for element in parse_elements(doc).unwrap() {
            index.insert("a".to_string(), element);
        }

        let mut out = Vec::new();
        let mut active = HashSet::new();
        let element = parse_elements(b"<y href=\"#a\"/>").unwrap().remove(0);
        let err = flatten_element(element, &index, &mut active, &mut out).unwrap_err();
        assert!(matches!(err, Error::CyclicReference { ref id } if id == "a"));
    }
}
