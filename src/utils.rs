use http::header::{HeaderMap, HeaderName, HeaderValue};
use httparse::{parse_headers, Status, EMPTY_HEADER};

use crate::{Error, Result};

pub(crate) const MAX_HEADERS: usize = 8 * 2;
pub(crate) const DASHES: [u8; 2] = [b'-', b'-']; // `--`
pub(crate) const CRLF: [u8; 2] = [b'\r', b'\n']; // `\r\n`

pub(crate) const TEXT_PLAIN: &str = "text/plain";

/// Truncates a content type at its first `;`, dropping parameters such as
/// `charset=`. An absent value falls back to `text/plain`.
pub(crate) fn normalize_content_type(value: Option<&str>) -> String {
    value
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(TEXT_PLAIN)
        .to_owned()
}

/// Splits a segment into its header block and body.
///
/// Returns the parsed headers plus the offset of the first body byte, which
/// sits right after the blank line terminating the header block. A segment
/// whose header block never terminates is malformed, not a reason to keep
/// scanning.
pub(crate) fn parse_part_headers(bytes: &[u8]) -> Result<(HeaderMap, usize)> {
    let mut headers = [EMPTY_HEADER; MAX_HEADERS];
    match parse_headers(bytes, &mut headers) {
        Ok(Status::Complete((body_offset, hs))) => {
            let mut header_map = HeaderMap::with_capacity(hs.len());
            for h in hs {
                header_map.append(
                    HeaderName::from_bytes(h.name.as_bytes())
                        .map_err(|_| Error::MalformedSegment("invalid header name"))?,
                    HeaderValue::from_bytes(h.value)
                        .map_err(|_| Error::MalformedSegment("invalid header value"))?,
                );
            }
            Ok((header_map, body_offset))
        }
        Ok(Status::Partial) => Err(Error::MalformedSegment("truncated header block")),
        Err(_) => Err(Error::MalformedSegment("unparseable header block")),
    }
}

/// Pulls one attribute out of a `form-data; name="a"; filename="b"` value.
///
/// Attribute values may be wrapped in single or double quotes, both produced
/// by real-world agents; the surrounding quotes are stripped. An empty value
/// counts as absent.
pub(crate) fn disposition_param(value: &str, key: &str) -> Option<String> {
    for piece in value.split(';') {
        let Some((k, v)) = piece.split_once('=') else {
            continue;
        };
        if k.trim() != key {
            continue;
        }
        let v = v.trim();
        let v = match v.as_bytes() {
            [b'"', inner @ .., b'"'] | [b'\'', inner @ .., b'\''] => {
                String::from_utf8_lossy(inner).into_owned()
            }
            _ => v.to_owned(),
        };
        if v.is_empty() {
            return None;
        }
        return Some(v);
    }
    None
}
