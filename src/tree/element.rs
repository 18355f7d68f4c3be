//! The element model: qualified names, ordered attributes, raw inner content.

use crate::error::Error;
use std::fmt;

/// A qualified name as written in the document. The prefix is kept verbatim;
/// it is not resolved against namespace declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub(crate) fn from_bytes(name: &[u8]) -> Self {
        let (prefix, local) = crate::core::attributes::split_name(name);
        QName {
            prefix: prefix.map(|p| String::from_utf8_lossy(p).into_owned()),
            local: String::from_utf8_lossy(local).into_owned(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// An attribute in document order. `value` holds entity-decoded text and is
/// re-emitted verbatim during serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    /// Local name, after the colon if prefixed.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }
}

/// One XML element: qualified name, ordered attributes, and inner content as
/// raw, already-escaped serialized markup.
///
/// Created by the tree builder, mutated in place during flattening, and
/// discarded once the flattened document has been serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    pub attrs: Vec<Attr>,
    pub content: Vec<u8>,
}

impl Element {
    /// Child elements, obtained by re-parsing the stored content. Pure and
    /// uncached: calling this twice yields identical sequences, at the cost
    /// of a re-scan each time.
    pub fn children(&self) -> Result<Vec<Element>, Error> {
        super::builder::parse_elements(&self.content)
    }

    /// First attribute whose local name matches, regardless of prefix.
    pub fn attr(&self, local: &str) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.local_name() == local)
    }

    /// Value of the `id` attribute, if present.
    pub fn id(&self) -> Option<&str> {
        self.attr("id").map(|a| a.value.as_str())
    }

    /// Target id of a document-local `href` attribute (`href="#id0"` yields
    /// `id0`). An href not starting with `#`, or bare `#`, is not a
    /// document-local reference.
    pub fn href_target(&self) -> Option<&str> {
        let value = &self.attr("href")?.value;
        if value.len() > 1 && value.starts_with('#') {
            Some(&value[1..])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(attrs: Vec<(&str, &str)>) -> Element {
        Element {
            name: QName {
                prefix: None,
                local: "x".to_string(),
            },
            attrs: attrs
                .into_iter()
                .map(|(name, value)| Attr {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            content: Vec::new(),
        }
    }

    #[test]
    fn test_qname_display() {
        let plain = QName::from_bytes(b"Body");
        assert_eq!(plain.to_string(), "Body");
        let prefixed = QName::from_bytes(b"soapenv:Body");
        assert_eq!(prefixed.prefix.as_deref(), Some("soapenv"));
        assert_eq!(prefixed.local, "Body");
        assert_eq!(prefixed.to_string(), "soapenv:Body");
    }

    #[test]
    fn test_href_target() {
        assert_eq!(element(vec![("href", "#id0")]).href_target(), Some("id0"));
        assert_eq!(element(vec![("href", "#")]).href_target(), None);
        assert_eq!(
            element(vec![("href", "http://example.com")]).href_target(),
            None
        );
        assert_eq!(element(vec![]).href_target(), None);
    }

    #[test]
    fn test_attr_matches_any_prefix() {
        let el = element(vec![("soapenc:href", "#a")]);
        assert_eq!(el.href_target(), Some("a"));
    }
}
