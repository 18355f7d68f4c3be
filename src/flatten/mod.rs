//! Reference Flattener - resolves document-local `href` references
//!
//! Two passes over the same byte buffer:
//! 1. Index pass: walk every element and record `id -> element`.
//! 2. Substitution pass: re-parse, replace each `href="#id"` placeholder's
//!    content with the referenced element's content, recursively flatten
//!    children, and re-serialize.
//!
//! Both passes derive their trees independently from the input; nothing is
//! shared or cached between calls, so concurrent flattens over independent
//! buffers are safe without synchronization.

mod index;
mod rewrite;

use crate::error::Error;
use crate::tree::parse_elements;
use std::collections::HashSet;

/// Return a new XML document in which every `href="#X"` placeholder has been
/// replaced by a copy of the content of the element declaring `id="X"`, with
/// `multiRef` container elements suppressed.
///
/// An `href` whose id appears nowhere in the document is left unsubstituted
/// (the placeholder is emitted with empty content); that leniency is
/// deliberate. A reference chain that cycles back to an element already being
/// substituted fails with [`Error::CyclicReference`]. Malformed input fails
/// with [`Error::Malformed`] and no partial output.
pub fn flatten(data: &[u8]) -> Result<Vec<u8>, Error> {
    let index = index::build_index(data)?;

    let mut out = Vec::with_capacity(data.len());
    let mut active = HashSet::new();
    for element in parse_elements(data)? {
        rewrite::flatten_element(element, &index, &mut active, &mut out)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_substitution() {
        let doc = b"<Envelope><Header><sessionId href=\"#id0\"/></Header>\
                    <Body><multiRef id=\"id0\">123456</multiRef></Body></Envelope>";
        let out = flatten(doc).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "<Envelope><Header><sessionId href=\"#id0\">123456</sessionId></Header>\
             <Body /></Envelope>"
        );
        assert!(!out.contains("multiRef"));
    }

    #[test]
    fn test_no_references_round_trips() {
        let doc = b"<a x=\"1\"><b>hi &amp; bye</b><c /></a>";
        let out = flatten(doc).unwrap();
        assert_eq!(out, b"<a x=\"1\"><b>hi &amp; bye</b><c /></a>");
    }

    #[test]
    fn test_missing_id_yields_empty_substitution() {
        let out = flatten(b"<a><b href=\"#missing\"/></a>").unwrap();
        assert_eq!(out, b"<a><b href=\"#missing\" /></a>");
    }

    #[test]
    fn test_multiple_multiref_suppressed() {
        let doc = b"<Envelope><Header>\
                    <user href=\"#id0\"/><token href=\"#id1\"/>\
                    </Header><Body>\
                    <multiRef id=\"id0\">alice</multiRef>\
                    <multiRef id=\"id1\">s3cret</multiRef>\
                    </Body></Envelope>";
        let out = String::from_utf8(flatten(doc).unwrap()).unwrap();
        assert!(!out.contains("multiRef"));
        assert!(out.contains("<user href=\"#id0\">alice</user>"));
        assert!(out.contains("<token href=\"#id1\">s3cret</token>"));
    }

    #[test]
    fn test_nested_reference_chain() {
        // id0's content itself holds a reference to id1
        let doc = b"<r><x href=\"#id0\"/>\
                    <multiRef id=\"id0\"><y href=\"#id1\"/></multiRef>\
                    <multiRef id=\"id1\">deep</multiRef></r>";
        let out = String::from_utf8(flatten(doc).unwrap()).unwrap();
        assert_eq!(out, "<r><x href=\"#id0\"><y href=\"#id1\">deep</y></x></r>");
    }

    #[test]
    fn test_cycle_detected() {
        let doc = b"<r><x href=\"#a\"/>\
                    <multiRef id=\"a\"><y href=\"#b\"/></multiRef>\
                    <multiRef id=\"b\"><z href=\"#a\"/></multiRef></r>";
        let err = flatten(doc).unwrap_err();
        assert!(matches!(err, Error::CyclicReference { ref id } if id == "a"));
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let doc = b"<r><x href=\"#a\"/>\
                    <multiRef id=\"a\">first</multiRef>\
                    <multiRef id=\"a\">second</multiRef></r>";
        let out = String::from_utf8(flatten(doc).unwrap()).unwrap();
        assert_eq!(out, "<r><x href=\"#a\">second</x></r>");
    }

    #[test]
    fn test_malformed_input_no_partial_output() {
        assert!(matches!(
            flatten(b"<a><b></a></b>"),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_id_target_outside_multiref_kept() {
        // Reference targets need not live in a multiRef container; a plain
        // element with an id stays in the output
        let doc = b"<r><x href=\"#a\"/><keep id=\"a\">v</keep></r>";
        let out = String::from_utf8(flatten(doc).unwrap()).unwrap();
        assert_eq!(out, "<r><x href=\"#a\">v</x><keep id=\"a\">v</keep></r>");
    }
}
