// SPDX-License-Identifier: MPL-2.0
//! Parsing and encoding of base64 `data:` URIs.
//!
//! Only base64 payloads are accepted: every producer the upload control talks
//! to (canvas exports, file readers, the message bridge) emits base64.

use crate::domain::attachment::MimeType;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::borrow::Cow;
use std::fmt;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = "base64";

/// Encoder emits padding; decoder accepts payloads with or without it.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors produced while parsing or decoding a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataUriError {
    /// The string does not start with `data:`.
    MissingScheme,
    /// No `,` separates the header from the payload.
    MissingSeparator,
    /// The header lacks the `;base64` marker.
    NotBase64,
    /// The payload is not valid base64.
    InvalidBase64(String),
}

impl fmt::Display for DataUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUriError::MissingScheme => write!(f, "not a data URI"),
            DataUriError::MissingSeparator => write!(f, "data URI has no payload separator"),
            DataUriError::NotBase64 => write!(f, "data URI payload is not base64 encoded"),
            DataUriError::InvalidBase64(msg) => write!(f, "invalid base64 payload: {msg}"),
        }
    }
}

impl std::error::Error for DataUriError {}

/// A parsed view of a base64 `data:` URI.
///
/// Header parameters other than the base64 marker are discarded, and ASCII
/// whitespace inside the payload is stripped the way browsers do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    mime_type: Option<MimeType>,
    payload: Cow<'a, str>,
}

impl<'a> DataUri<'a> {
    /// Parses the header of a data URI without decoding the payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUriError`] when the scheme, separator or base64 marker is missing.
    pub fn parse(uri: &'a str) -> Result<Self, DataUriError> {
        let rest = strip_scheme(uri).ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(DataUriError::MissingSeparator)?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default();
        if !params.any(|p| p.trim().eq_ignore_ascii_case(BASE64_MARKER)) {
            return Err(DataUriError::NotBase64);
        }

        Ok(Self {
            mime_type: MimeType::parse(media_type),
            payload: strip_whitespace(payload),
        })
    }

    /// MIME type declared in the header, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&MimeType> {
        self.mime_type.as_ref()
    }

    /// The still-encoded payload, whitespace removed.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Rebuilds the URI from its parsed parts: `data:<mime>;base64,<payload>`.
    ///
    /// Only meaningful once [`decode`](Self::decode) succeeded, which limits
    /// the payload to the base64 alphabet. `None` without a MIME type.
    #[must_use]
    pub fn canonical(&self) -> Option<String> {
        let mime_type = self.mime_type.as_ref()?;
        Some(format!(
            "{SCHEME}{mime_type};{BASE64_MARKER},{}",
            self.payload
        ))
    }

    /// Decodes the payload into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError::InvalidBase64`] if the payload cannot be decoded.
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        decode_base64(&self.payload)
    }
}

fn strip_whitespace(payload: &str) -> Cow<'_, str> {
    let payload = payload.trim();
    if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(payload.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(payload)
    }
}

fn strip_scheme(uri: &str) -> Option<&str> {
    let trimmed = uri.trim_start();
    let head = trimmed.get(..SCHEME.len())?;
    head.eq_ignore_ascii_case(SCHEME)
        .then(|| &trimmed[SCHEME.len()..])
}

/// Returns `true` if the string looks like a data URI (scheme check only).
#[must_use]
pub fn is_data_uri(candidate: &str) -> bool {
    strip_scheme(candidate).is_some()
}

/// Decodes a bare base64 payload with the same rules as data URI payloads.
///
/// # Errors
///
/// Returns [`DataUriError::InvalidBase64`] if the payload cannot be decoded.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, DataUriError> {
    ENGINE
        .decode(strip_whitespace(payload).as_bytes())
        .map_err(|e| DataUriError::InvalidBase64(e.to_string()))
}

/// Encodes bytes as `data:<mime>;base64,<payload>`.
#[must_use]
pub fn encode(mime_type: &MimeType, bytes: &[u8]) -> String {
    let mut uri = format!("{SCHEME}{mime_type};{BASE64_MARKER},");
    ENGINE.encode_string(bytes, &mut uri);
    uri
}
