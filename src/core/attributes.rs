//! XML attribute parsing.
//!
//! Attributes are returned in document order; re-serialization depends on
//! first-seen order being preserved, so nothing here sorts or deduplicates.

use super::entities::decode_text;
use memchr::memchr;
use std::borrow::Cow;

/// A parsed attribute.
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    /// Qualified name as written (may include a namespace prefix).
    pub name: &'a [u8],
    /// Value with entity references decoded.
    pub value: Cow<'a, [u8]>,
}

/// Split a qualified name into prefix and local name at the colon.
pub fn split_name(name: &[u8]) -> (Option<&[u8]>, &[u8]) {
    if let Some(colon_pos) = memchr(b':', name) {
        (Some(&name[..colon_pos]), &name[colon_pos + 1..])
    } else {
        (None, name)
    }
}

/// Parse attributes from the raw bytes between an element name and the
/// closing '>' or '/>'.
pub fn parse_attributes(input: &[u8]) -> Vec<Attribute<'_>> {
    let mut attrs = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() || input[pos] == b'/' || input[pos] == b'>' {
            break;
        }

        // Attribute name
        let name_start = pos;
        if !is_name_start_char(input[pos]) {
            pos += 1;
            continue;
        }
        while pos < input.len() && is_name_char(input[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        if pos >= input.len() || input[pos] != b'=' {
            // Valueless attribute, tolerated in lenient parsing
            attrs.push(Attribute {
                name,
                value: Cow::Borrowed(b""),
            });
            continue;
        }
        pos += 1; // '='

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            break;
        }

        let quote = input[pos];
        if quote != b'"' && quote != b'\'' {
            // Unquoted value, non-standard but tolerated
            let value_start = pos;
            while pos < input.len()
                && !is_whitespace(input[pos])
                && input[pos] != b'/'
                && input[pos] != b'>'
            {
                pos += 1;
            }
            attrs.push(Attribute {
                name,
                value: decode_text(&input[value_start..pos]),
            });
            continue;
        }

        pos += 1; // opening quote
        let value_start = pos;
        while pos < input.len() && input[pos] != quote {
            pos += 1;
        }
        attrs.push(Attribute {
            name,
            value: decode_text(&input[value_start..pos]),
        });
        if pos < input.len() {
            pos += 1; // closing quote
        }
    }

    attrs
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_name_start_char(b: u8) -> bool {
    super::scanner::is_name_start_char(b)
}

#[inline]
fn is_name_char(b: u8) -> bool {
    super::scanner::is_name_char(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_attributes() {
        let attrs = parse_attributes(b" id=\"test\" class=\"foo\"");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, b"id");
        assert_eq!(attrs[0].value.as_ref(), b"test");
        assert_eq!(attrs[1].name, b"class");
        assert_eq!(attrs[1].value.as_ref(), b"foo");
    }

    #[test]
    fn test_order_preserved() {
        let attrs = parse_attributes(b" z=\"1\" a=\"2\" m=\"3\"");
        let names: Vec<_> = attrs.iter().map(|a| a.name).collect();
        assert_eq!(names, vec![b"z" as &[u8], b"a", b"m"]);
    }

    #[test]
    fn test_single_quoted() {
        let attrs = parse_attributes(b" href='#id0'");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].value.as_ref(), b"#id0");
    }

    #[test]
    fn test_split_prefixed_name() {
        let attrs = parse_attributes(b" xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\"");
        let (prefix, local) = split_name(attrs[0].name);
        assert_eq!(prefix, Some(b"xmlns" as &[u8]));
        assert_eq!(local, b"soapenv");
    }

    #[test]
    fn test_entity_in_value() {
        let attrs = parse_attributes(b" title=\"&lt;hi&gt;\"");
        assert_eq!(attrs[0].value.as_ref(), b"<hi>");
    }

    #[test]
    fn test_whitespace_around_equals() {
        let attrs = parse_attributes(b"  id  =  \"test\"  ");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, b"id");
        assert_eq!(attrs[0].value.as_ref(), b"test");
    }
}
