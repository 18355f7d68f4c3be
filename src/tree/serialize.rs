//! Element-to-text serialization.
//!
//! Pure, stateless formatting functions writing into a caller-supplied
//! buffer. The emitted forms are `<name attrs>content</name>` for elements
//! with content and `<name attrs />` otherwise. Attribute values are emitted
//! verbatim; content is raw markup already escaped by the tree builder.

use super::element::{Attr, Element, QName};

/// Write `<name attr="value"...>`.
pub fn write_start_tag(name: &QName, attrs: &[Attr], out: &mut Vec<u8>) {
    out.push(b'<');
    write_name(name, out);
    write_attrs(attrs, out);
    out.push(b'>');
}

/// Write `</name>`.
pub fn write_end_tag(name: &QName, out: &mut Vec<u8>) {
    out.extend_from_slice(b"</");
    write_name(name, out);
    out.push(b'>');
}

/// Write a whole element: self-closing if its content is empty.
pub fn write_element(el: &Element, out: &mut Vec<u8>) {
    if el.content.is_empty() {
        out.push(b'<');
        write_name(&el.name, out);
        write_attrs(&el.attrs, out);
        out.extend_from_slice(b" />");
    } else {
        write_start_tag(&el.name, &el.attrs, out);
        out.extend_from_slice(&el.content);
        write_end_tag(&el.name, out);
    }
}

fn write_name(name: &QName, out: &mut Vec<u8>) {
    if let Some(prefix) = &name.prefix {
        out.extend_from_slice(prefix.as_bytes());
        out.push(b':');
    }
    out.extend_from_slice(name.local.as_bytes());
}

fn write_attrs(attrs: &[Attr], out: &mut Vec<u8>) {
    for attr in attrs {
        out.push(b' ');
        out.extend_from_slice(attr.name.as_bytes());
        out.extend_from_slice(b"=\"");
        out.extend_from_slice(attr.value.as_bytes());
        out.push(b'"');
    }
}
