//! soapref - SOAP 1.1 multiRef reference flattening
//!
//! SOAP encoders in the multiRef style (notably Apache Axis2) factor shared
//! values out into sibling elements carrying an `id` attribute and replace
//! each original occurrence with a placeholder carrying `href="#id"`. Such a
//! document cannot be decoded with ordinary tree-structured XML binding until
//! every placeholder has been replaced with a copy of its referenced content.
//!
//! Pipeline:
//!
//! ```text
//! raw bytes ---> tree::parse_elements ---> top-level Elements
//!                        |
//!                        v
//!           flatten::flatten (index pass + substitution pass)
//!                        |
//!                        v
//!           self-contained XML ---> soap::unmarshal (quick-xml/serde)
//! ```
//!
//! The crate is fully synchronous and allocation-scoped per call: every
//! [`flatten`] invocation builds its own tree and reference index, so
//! concurrent calls over independent buffers need no synchronization.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Envelope {
//!     #[serde(rename = "Header")]
//!     header: Header,
//! }
//!
//! #[derive(Deserialize)]
//! struct Header {
//!     #[serde(rename = "sessionId")]
//!     session_id: String,
//! }
//!
//! let doc = br##"<Envelope>
//!   <Header><sessionId href="#id0" /></Header>
//!   <Body><multiRef id="id0">123456</multiRef></Body>
//! </Envelope>"##;
//!
//! let msg: Envelope = soapref::unmarshal(doc).unwrap();
//! assert_eq!(msg.header.session_id, "123456");
//! ```

mod core;
mod error;
mod flatten;
mod soap;
mod tree;

pub use error::Error;
pub use flatten::flatten;
pub use soap::{
    find_fault, new_request, parse_response, unmarshal, Fault, NS_SOAP_ENC, NS_SOAP_ENV, NS_XSD,
    NS_XSI,
};
pub use tree::{parse_elements, Attr, Element, QName};
