//! Builds the element sequence from raw tokens.
//!
//! Each top-level start tag recursively consumes everything up to its
//! matching end tag, accumulating a serialized representation of the inner
//! markup: nested tags are re-emitted through the deterministic
//! name+attributes transform in `serialize`, character data is escaped for
//! safe re-embedding. Comments, processing instructions, and DOCTYPE
//! declarations are dropped from the accumulated content.

use super::element::{Attr, Element, QName};
use super::serialize::{write_end_tag, write_start_tag};
use crate::core::attributes::parse_attributes;
use crate::core::entities::escape_text;
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::Error;

/// Parse a buffer containing one well-formed XML fragment (possibly with
/// multiple top-level elements, Header/Body style) into an ordered sequence
/// of top-level [`Element`]s.
///
/// Pure transformation: the input is never mutated and no state survives the
/// call. Clean end-of-input is the normal terminal condition; a mismatched
/// end tag or a stream truncated inside an open element aborts the whole
/// build with [`Error::Malformed`].
pub fn parse_elements(data: &[u8]) -> Result<Vec<Element>, Error> {
    let mut tokenizer = Tokenizer::new(data);
    let mut elements = Vec::new();

    loop {
        let token = tokenizer.next_token()?;
        match token.kind {
            TokenKind::Eof => break,
            TokenKind::StartTag => {
                let (name, attrs) = tag_parts(data, &token);
                let mut content = Vec::new();
                read_content(&mut tokenizer, data, token.name.unwrap_or(b""), &mut content)?;
                elements.push(Element {
                    name,
                    attrs,
                    content,
                });
            }
            TokenKind::EmptyTag => {
                let (name, attrs) = tag_parts(data, &token);
                elements.push(Element {
                    name,
                    attrs,
                    content: Vec::new(),
                });
            }
            // Text, comments, PIs, and DOCTYPE between top-level elements
            // carry no tree structure
            _ => {}
        }
    }

    Ok(elements)
}

/// Consume tokens up to and including the end tag matching `open_name`,
/// appending the serialized inner markup to `buf`.
fn read_content(
    tokenizer: &mut Tokenizer<'_>,
    data: &[u8],
    open_name: &[u8],
    buf: &mut Vec<u8>,
) -> Result<(), Error> {
    loop {
        let token = tokenizer.next_token()?;
        match token.kind {
            TokenKind::StartTag => {
                let (name, attrs) = tag_parts(data, &token);
                write_start_tag(&name, &attrs, buf);
                read_content(tokenizer, data, token.name.unwrap_or(b""), buf)?;
                write_end_tag(&name, buf);
            }
            TokenKind::EmptyTag => {
                let (name, attrs) = tag_parts(data, &token);
                write_start_tag(&name, &attrs, buf);
                write_end_tag(&name, buf);
            }
            TokenKind::Text | TokenKind::CData => {
                if let Some(content) = &token.content {
                    escape_text(content, buf);
                }
            }
            TokenKind::EndTag => {
                let name = token.name.unwrap_or(b"");
                if name == open_name {
                    return Ok(());
                }
                return Err(Error::malformed(
                    format!(
                        "unexpected end tag </{}> inside <{}>",
                        String::from_utf8_lossy(name),
                        String::from_utf8_lossy(open_name)
                    ),
                    token.span.0,
                ));
            }
            TokenKind::Eof => {
                return Err(Error::malformed(
                    format!(
                        "unexpected end of input inside <{}>",
                        String::from_utf8_lossy(open_name)
                    ),
                    token.span.0,
                ));
            }
            // Comments, PIs, and DOCTYPE are dropped from element content
            TokenKind::Comment | TokenKind::ProcessingInstruction | TokenKind::DocType => {}
        }
    }
}

/// Extract the qualified name and ordered attributes from a tag token's raw
/// span (`<name attr="v">`, `<name attr="v"/>`).
fn tag_parts(data: &[u8], token: &Token<'_>) -> (QName, Vec<Attr>) {
    let name_bytes = token.name.unwrap_or(b"");
    let name = QName::from_bytes(name_bytes);

    let (start, end) = token.span;
    let tag = &data[start..end];

    // Skip '<' plus the name, then trim the closing '>' or '/>'
    let attr_start = (1 + name_bytes.len()).min(tag.len());
    let mut attr_end = tag.len();
    if tag.ends_with(b"/>") {
        attr_end -= 2;
    } else if tag.ends_with(b">") {
        attr_end -= 1;
    }
    if attr_start >= attr_end {
        return (name, Vec::new());
    }

    let attrs = parse_attributes(&tag[attr_start..attr_end])
        .into_iter()
        .map(|a| Attr {
            name: String::from_utf8_lossy(a.name).into_owned(),
            value: String::from_utf8_lossy(&a.value).into_owned(),
        })
        .collect();
    (name, attrs)
}
