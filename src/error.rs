//! Error taxonomy for parsing, flattening, and the SOAP decode facade.

use thiserror::Error;

use crate::soap::Fault;

/// Errors surfaced by this crate.
///
/// Parse and build failures abort immediately with no partial result; nothing
/// is retried or logged internally. An `href` with no matching `id` is
/// deliberately *not* an error (it yields an empty substitution).
#[derive(Error, Debug)]
pub enum Error {
    /// The token stream does not form well-matched start/end tag pairs, or a
    /// markup construct is truncated before its terminator.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { message: String, position: usize },

    /// An `href` chain leads back to an element whose content is currently
    /// being substituted. The corresponding document can never flatten.
    #[error("cyclic reference through id \"{id}\"")]
    CyclicReference { id: String },

    /// The response Body carried a SOAP Fault instead of a payload.
    #[error(transparent)]
    Fault(#[from] Fault),

    /// Typed decode of the flattened document failed.
    #[error("decode: {0}")]
    Decode(#[from] quick_xml::DeError),

    /// The HTTP collaborator failed before a body could be parsed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The flattened document is not valid UTF-8.
    #[error("document is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>, position: usize) -> Self {
        Error::Malformed {
            message: message.into(),
            position,
        }
    }
}
