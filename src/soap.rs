//! SOAP decode facade
//!
//! Thin surface over the flattening core: typed unmarshaling of flattened
//! documents through quick-xml/serde, SOAP 1.1 Fault detection, and the
//! outbound HTTP request shape. Unmarshaling rules are exactly quick-xml's;
//! this crate adds only the dereferencing step before them.

use crate::error::Error;
use crate::flatten::flatten;
use crate::tree::{parse_elements, Element};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const NS_XSD: &str = "http://www.w3.org/2001/XMLSchema";
pub const NS_SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const NS_SOAP_ENC: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// A standard SOAP 1.1 Fault message.
#[derive(Debug, Clone, Default, Error)]
#[error("SOAP fault: {string}")]
pub struct Fault {
    /// `faultcode` child, e.g. `soapenv:Server`.
    pub code: String,
    /// `faultstring` child, the human-readable message.
    pub string: String,
    /// `faultactor` child, if present.
    pub actor: String,
    /// Raw markup of the `detail` child (also accepted under the
    /// `faultDetail` spelling some toolkits emit).
    pub detail: Vec<u8>,
}

/// Decode XML data into a value. Behaves like a plain quick-xml deserialize,
/// with the addition that document-local links are dereferenced first.
pub fn unmarshal<T: DeserializeOwned>(data: &[u8]) -> Result<T, Error> {
    let flat = flatten(data)?;
    let text = std::str::from_utf8(&flat)?;
    Ok(quick_xml::de::from_str(text)?)
}

/// Scan a document for an Envelope/Body/Fault element and extract it.
///
/// Matching is by local name; prefixes are preserved in the extracted fields
/// but not resolved against namespace URIs.
pub fn find_fault(data: &[u8]) -> Result<Option<Fault>, Error> {
    for envelope in parse_elements(data)? {
        if envelope.name.local != "Envelope" {
            continue;
        }
        for body in envelope.children()? {
            if body.name.local != "Body" {
                continue;
            }
            for child in body.children()? {
                if child.name.local == "Fault" {
                    return Ok(Some(fault_from_element(&child)?));
                }
            }
        }
    }
    Ok(None)
}

fn fault_from_element(element: &Element) -> Result<Fault, Error> {
    let mut fault = Fault::default();
    for child in element.children()? {
        match child.name.local.as_str() {
            "faultcode" => fault.code = element_text(&child),
            "faultstring" => fault.string = element_text(&child),
            "faultactor" => fault.actor = element_text(&child),
            "detail" | "faultDetail" => fault.detail = child.content.clone(),
            _ => {}
        }
    }
    Ok(fault)
}

/// Character data of an element, with the builder's escaping undone.
fn element_text(element: &Element) -> String {
    let decoded = crate::core::entities::decode_text(&element.content);
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Build an HTTP request for a SOAP RPC call: POST with an empty `SOAPAction`
/// header and a `text/xml` UTF-8 body.
pub fn new_request(client: &Client, url: &str, body: Vec<u8>) -> RequestBuilder {
    client
        .post(url)
        .header("SOAPAction", "")
        .header(CONTENT_TYPE, "text/xml; charset=utf-8")
        .body(body)
}

/// Decode an HTTP response into a value. The body is fully buffered; if it
/// carries a SOAP Fault, the fault is returned as the error instead of
/// attempting the typed decode.
pub fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let body = response.bytes()?;
    parse_body(&body)
}

fn parse_body<T: DeserializeOwned>(data: &[u8]) -> Result<T, Error> {
    if let Some(fault) = find_fault(data)? {
        return Err(Error::Fault(fault));
    }
    unmarshal(data)
}
