//! Lenient pull tokenizer for XML markup.
//!
//! Yields start/end/empty tags, character data, CDATA sections, comments,
//! processing instructions, and DOCTYPE declarations. It checks nothing
//! beyond markup shape; tag pairing (well-formedness proper) is enforced by
//! the tree builder consuming these tokens.

use super::entities::decode_text;
use super::scanner::Scanner;
use crate::error::Error;
use std::borrow::Cow;

/// Type of XML token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: `<element>`
    StartTag,
    /// Element end tag: `</element>`
    EndTag,
    /// Empty element: `<element/>`
    EmptyTag,
    /// Character data (entities decoded)
    Text,
    /// CDATA section content
    CData,
    /// Comment
    Comment,
    /// Processing instruction or XML declaration
    ProcessingInstruction,
    /// DOCTYPE declaration
    DocType,
    /// End of input
    Eof,
}

/// A parsed XML token.
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in the input (start, end), covering the whole construct.
    pub span: (usize, usize),
    /// For tags and PIs: the qualified name.
    pub name: Option<&'a [u8]>,
    /// For text/CDATA: the content, decoded (owned only if entities present).
    pub content: Option<Cow<'a, [u8]>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
        }
    }

    fn with_name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: Cow<'a, [u8]>) -> Self {
        self.content = Some(content);
        self
    }
}

/// Pull tokenizer over a complete in-memory buffer.
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
        }
    }

    /// Get the next token. End of input yields `TokenKind::Eof`, repeatedly.
    pub fn next_token(&mut self) -> Result<Token<'a>, Error> {
        if self.scanner.is_eof() {
            let pos = self.scanner.position();
            return Ok(Token::new(TokenKind::Eof, (pos, pos)));
        }

        match self.scanner.peek() {
            Some(b'<') => self.parse_markup(),
            _ => self.parse_text(),
        }
    }

    fn parse_markup(&mut self) -> Result<Token<'a>, Error> {
        let start = self.scanner.position();
        self.scanner.advance(1); // '<'

        match self.scanner.peek() {
            Some(b'/') => self.parse_end_tag(start),
            Some(b'!') => self.parse_bang_markup(start),
            Some(b'?') => self.parse_pi(start),
            Some(_) => self.parse_start_tag(start),
            None => Err(Error::malformed("input ends inside markup", start)),
        }
    }

    fn parse_start_tag(&mut self, start: usize) -> Result<Token<'a>, Error> {
        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| Error::malformed("invalid element name", start))?;

        let end = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| Error::malformed("unterminated start tag", start))?;

        let is_empty = end > start && self.scanner.slice(end - 1, end) == b"/";
        self.scanner.set_position(end + 1);

        let kind = if is_empty {
            TokenKind::EmptyTag
        } else {
            TokenKind::StartTag
        };
        Ok(Token::new(kind, (start, end + 1)).with_name(name))
    }

    fn parse_end_tag(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.scanner.advance(1); // '/'

        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| Error::malformed("invalid name in end tag", start))?;

        let end = self
            .scanner
            .find_byte(b'>')
            .ok_or_else(|| Error::malformed("unterminated end tag", start))?;
        self.scanner.set_position(end + 1);

        Ok(Token::new(TokenKind::EndTag, (start, end + 1)).with_name(name))
    }

    fn parse_bang_markup(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.scanner.advance(1); // '!'

        if self.scanner.starts_with(b"--") {
            self.parse_comment(start)
        } else if self.scanner.starts_with(b"[CDATA[") {
            self.parse_cdata(start)
        } else if self.scanner.starts_with(b"DOCTYPE") {
            self.parse_doctype(start)
        } else {
            Err(Error::malformed("invalid markup after '<!'", start))
        }
    }

    fn parse_comment(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.scanner.advance(2); // '--'
        let content_start = self.scanner.position();

        loop {
            let pos = self
                .scanner
                .find_byte(b'-')
                .ok_or_else(|| Error::malformed("unterminated comment", start))?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with(b"-->") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(3);
                return Ok(Token::new(TokenKind::Comment, (start, self.scanner.position()))
                    .with_content(Cow::Borrowed(content)));
            }
            self.scanner.advance(1);
        }
    }

    fn parse_cdata(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.scanner.advance(7); // '[CDATA['
        let content_start = self.scanner.position();

        loop {
            let pos = self
                .scanner
                .find_byte(b']')
                .ok_or_else(|| Error::malformed("unterminated CDATA section", start))?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with(b"]]>") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(3);
                return Ok(Token::new(TokenKind::CData, (start, self.scanner.position()))
                    .with_content(Cow::Borrowed(content)));
            }
            self.scanner.advance(1);
        }
    }

    /// Skip a DOCTYPE declaration, honoring quoted literals and the internal
    /// subset brackets so a '>' inside either does not terminate it early.
    fn parse_doctype(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.scanner.advance(7); // 'DOCTYPE'

        let mut in_subset = false;
        let mut in_string = false;
        let mut string_char = 0u8;

        while let Some(b) = self.scanner.peek() {
            if in_string {
                if b == string_char {
                    in_string = false;
                }
                self.scanner.advance(1);
                continue;
            }
            match b {
                b'"' | b'\'' => {
                    in_string = true;
                    string_char = b;
                }
                b'[' => in_subset = true,
                b']' => in_subset = false,
                b'>' if !in_subset => {
                    self.scanner.advance(1);
                    return Ok(Token::new(TokenKind::DocType, (start, self.scanner.position())));
                }
                _ => {}
            }
            self.scanner.advance(1);
        }
        Err(Error::malformed("unterminated DOCTYPE declaration", start))
    }

    fn parse_pi(&mut self, start: usize) -> Result<Token<'a>, Error> {
        self.scanner.advance(1); // '?'
        let name = self.scanner.read_name();

        loop {
            let pos = self
                .scanner
                .find_byte(b'?')
                .ok_or_else(|| Error::malformed("unterminated processing instruction", start))?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with(b"?>") {
                self.scanner.advance(2);
                let mut token =
                    Token::new(TokenKind::ProcessingInstruction, (start, self.scanner.position()));
                if let Some(name) = name {
                    token = token.with_name(name);
                }
                return Ok(token);
            }
            self.scanner.advance(1);
        }
    }

    fn parse_text(&mut self) -> Result<Token<'a>, Error> {
        let start = self.scanner.position();
        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(start + self.scanner.remaining().len());

        let content = decode_text(self.scanner.slice(start, end));
        self.scanner.set_position(end);
        Ok(Token::new(TokenKind::Text, (start, end)).with_content(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &[u8]) -> Vec<TokenKind> {
        let mut tok = Tokenizer::new(input);
        let mut out = Vec::new();
        loop {
            let token = tok.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn test_simple_element() {
        assert_eq!(
            kinds(b"<root>hello</root>"),
            vec![TokenKind::StartTag, TokenKind::Text, TokenKind::EndTag]
        );
    }

    #[test]
    fn test_empty_tag() {
        let mut tok = Tokenizer::new(b"<sessionId href=\"#id0\" />");
        let token = tok.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EmptyTag);
        assert_eq!(token.name, Some(b"sessionId" as &[u8]));
    }

    #[test]
    fn test_text_entities_decoded() {
        let mut tok = Tokenizer::new(b"<a>1 &lt; 2</a>");
        tok.next_token().unwrap();
        let text = tok.next_token().unwrap();
        assert_eq!(text.content.unwrap().as_ref(), b"1 < 2");
    }

    #[test]
    fn test_comment_and_cdata() {
        assert_eq!(
            kinds(b"<a><!-- note --><![CDATA[x < y]]></a>"),
            vec![
                TokenKind::StartTag,
                TokenKind::Comment,
                TokenKind::CData,
                TokenKind::EndTag
            ]
        );
    }

    #[test]
    fn test_declaration_and_doctype() {
        assert_eq!(
            kinds(b"<?xml version=\"1.0\"?><!DOCTYPE r [<!ENTITY a \"b\">]><r/>"),
            vec![
                TokenKind::ProcessingInstruction,
                TokenKind::DocType,
                TokenKind::EmptyTag
            ]
        );
    }

    #[test]
    fn test_unterminated_tag_rejected() {
        let mut tok = Tokenizer::new(b"<root attr=\"x\"");
        assert!(matches!(
            tok.next_token(),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_gt_inside_quoted_attribute() {
        let mut tok = Tokenizer::new(b"<a label=\"x > y\">t</a>");
        let token = tok.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::StartTag);
        assert_eq!(&b"<a label=\"x > y\">"[..], {
            let (s, e) = token.span;
            &b"<a label=\"x > y\">t</a>"[s..e]
        });
    }
}
