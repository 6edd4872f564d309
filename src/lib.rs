//! Encoder/decoder for `multipart/form-data` byte streams.
//!
//! Encoding assembles named, typed [`Part`]s into one boundary-delimited
//! stream; decoding splits such a stream back into parts with a streaming
//! Knuth-Morris-Pratt delimiter search, linear in the source length.
//!
//! # Example
//!
//! ```rust
//! use multipart_codec::{decode, encode, generate_boundary, parse_boundary, Part};
//!
//! # fn main() -> Result<(), multipart_codec::Error> {
//! let boundary = generate_boundary(&mut rand::thread_rng());
//!
//! let parts = vec![
//!     Part::new("a.txt", Some("text/plain; charset=utf-8"), &b"hello"[..])?
//!         .file_name("a.txt"),
//!     Part::new("b.png", Some("image/png"), &b"\x89PNG"[..])?,
//! ];
//! let payload = encode(&boundary, parts);
//!
//! // The receiver recovers the boundary from the content-type header.
//! let content_type = format!("multipart/form-data; boundary={boundary}");
//! let boundary = parse_boundary(&content_type)?;
//!
//! let parts = decode(payload.as_ref(), &boundary)?;
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts[0].name, "a.txt");
//! assert_eq!(parts[0].content_type, "text/plain");
//! assert_eq!(parts[1].content.as_ref(), b"\x89PNG");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod error;
mod form;
mod limits;
mod part;
mod searcher;
mod utils;

pub use error::Error;

pub use form::{decode, decode_with_limits, encode, generate_boundary, FormReader, MultipartForm};

pub use part::Part;

pub use searcher::{StreamSearcher, MAX_PATTERN_LENGTH};

pub use limits::Limits;

/// A Result type with this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parses a `Content-Type` header value to extract the boundary token.
///
/// The value must be `multipart/form-data` and carry a `boundary`
/// parameter; matching is case-insensitive per MIME rules.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> Result<String> {
    let m = content_type
        .as_ref()
        .parse::<mime::Mime>()
        .map_err(|_| Error::NotMultipart)?;

    if !(m.type_() == mime::MULTIPART_FORM_DATA.type_()
        && m.subtype() == mime::MULTIPART_FORM_DATA.subtype())
    {
        return Err(Error::NotMultipart);
    }

    m.get_param(mime::BOUNDARY)
        .map(|name| name.as_str().to_owned())
        .ok_or(Error::MissingBoundary)
}
