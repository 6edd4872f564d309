use std::fmt;

use bytes::Bytes;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use tracing::trace;

use crate::{
    utils::{disposition_param, normalize_content_type, parse_part_headers},
    Error, Result,
};

/// One named, typed section of a multipart body.
///
/// A `Part` is built either by the encoding caller, one per logical
/// attachment, or by [`decode`](crate::decode) from one extracted segment.
/// It is not mutated after being handed to a [`MultipartForm`](crate::MultipartForm).
#[derive(Clone, PartialEq, Eq)]
pub struct Part {
    /// The name of the part, never empty.
    pub name: String,
    /// The content type, truncated at its first `;`, `text/plain` by default.
    pub content_type: String,
    /// The filename of the part, optional.
    pub file_name: Option<String>,
    /// The transfer encoding of the part, optional; emitted verbatim.
    pub transfer_encoding: Option<String>,
    /// The raw content bytes, no charset assumed.
    pub content: Bytes,
}

impl Part {
    /// Creates a part.
    ///
    /// The content type is normalized the same way the decode path does it.
    /// An empty `name` is refused: the framer and the parser both rely on
    /// every part carrying one.
    pub fn new(
        name: impl Into<String>,
        content_type: Option<&str>,
        content: impl Into<Bytes>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::MissingName);
        }
        Ok(Self {
            name,
            content_type: normalize_content_type(content_type),
            file_name: None,
            transfer_encoding: None,
            content: content.into(),
        })
    }

    /// Sets the filename.
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name.replace(file_name.into());
        self
    }

    /// Sets the transfer encoding.
    #[must_use]
    pub fn transfer_encoding(mut self, transfer_encoding: impl Into<String>) -> Self {
        self.transfer_encoding.replace(transfer_encoding.into());
        self
    }

    /// The length of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Renders the delimiter line and header block emitted in front of this
    /// part's content.
    ///
    /// Layout: `CRLF --boundary CRLF Content-Disposition CRLF Content-Type
    /// CRLF [Content-Transfer-Encoding CRLF] CRLF`.
    pub fn render_leader(&self, boundary: &str) -> Bytes {
        let mut leader = format!(
            "\r\n--{}\r\nContent-Disposition: form-data; name=\"{}\"",
            boundary, self.name
        );
        if let Some(file_name) = self.file_name.as_deref().filter(|f| !f.trim().is_empty()) {
            leader.push_str(&format!("; filename=\"{file_name}\""));
        }
        leader.push_str(&format!("\r\nContent-Type: {}\r\n", self.content_type));
        if let Some(te) = self.transfer_encoding.as_deref().filter(|t| !t.trim().is_empty()) {
            leader.push_str(&format!("Content-Transfer-Encoding: {te}\r\n"));
        }
        leader.push_str("\r\n");
        Bytes::from(leader)
    }

    /// Parses one extracted segment into a part.
    ///
    /// The segment is header lines, a blank line, then body bytes. The
    /// `content-disposition` header must yield a part name; `content-type`
    /// is normalized; every other header is discarded. All bytes after the
    /// blank line are the content, verbatim.
    pub fn parse(segment: &[u8]) -> Result<Self> {
        let (mut headers, body_offset) = parse_part_headers(segment)?;

        let disposition = headers
            .remove(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().map(str::to_owned).ok());

        let name = disposition
            .as_deref()
            .and_then(|v| disposition_param(v, "name"))
            .ok_or(Error::MissingName)?;
        let file_name = disposition
            .as_deref()
            .and_then(|v| disposition_param(v, "filename"));

        let content_type = normalize_content_type(
            headers
                .remove(CONTENT_TYPE)
                .as_ref()
                .and_then(|v| v.to_str().ok()),
        );

        trace!(name = %name, content_type = %content_type, "parsed part headers");

        Ok(Self {
            name,
            content_type,
            file_name,
            transfer_encoding: None,
            content: Bytes::copy_from_slice(&segment[body_offset..]),
        })
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .field("transfer_encoding", &self.transfer_encoding)
            .field("size", &self.size())
            .finish()
    }
}
