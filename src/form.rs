use std::{
    collections::VecDeque,
    io::{self, BufRead, Read},
};

use bytes::{Buf, Bytes, BytesMut};
use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, trace};

use crate::{Error, Limits, Part, Result, StreamSearcher};

/// An ordered sequence of parts plus the boundary token framing them.
///
/// A form is constructed once, with its finalized part list, and consumed
/// once to produce the framed byte stream; insertion order is output order.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartForm {
    /// Creates a form.
    ///
    /// The boundary is caller-chosen; it must not occur inside any part's
    /// content, which the codec does not verify. See [`generate_boundary`]
    /// for minting one.
    pub fn new(boundary: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            boundary: boundary.into(),
            parts,
        }
    }

    /// The boundary token.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The parts, in output order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Renders the framed stream as a sequence of chunks: per part a leader
    /// and its content, then the closing delimiter. Content chunks are
    /// refcounted, not copied.
    pub fn chunks(&self) -> Vec<Bytes> {
        let mut chunks = Vec::with_capacity(self.parts.len() * 2 + 1);
        for part in &self.parts {
            chunks.push(part.render_leader(&self.boundary));
            if !part.content.is_empty() {
                chunks.push(part.content.clone());
            }
        }
        chunks.push(Bytes::from(format!("\r\n--{}--\r\n", self.boundary)));
        chunks
    }

    /// Renders the framed stream as one contiguous buffer.
    pub fn to_bytes(&self) -> Bytes {
        let chunks = self.chunks();
        let mut buf = BytesMut::with_capacity(chunks.iter().map(Bytes::len).sum());
        for chunk in chunks {
            buf.extend_from_slice(&chunk);
        }
        buf.freeze()
    }

    /// Consumes the form into a lazy [`Read`] over its chunks, avoiding a
    /// second copy of large payloads.
    pub fn into_reader(self) -> FormReader {
        FormReader {
            chunks: self.chunks().into(),
        }
    }
}

/// A [`Read`] adapter walking the chunks of a rendered [`MultipartForm`].
#[derive(Debug)]
pub struct FormReader {
    chunks: VecDeque<Bytes>,
}

impl Read for FormReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(chunk) = self.chunks.front_mut() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.advance(n);
        if chunk.is_empty() {
            self.chunks.pop_front();
        }
        Ok(n)
    }
}

/// Frames `parts` into one `multipart/form-data` byte stream delimited by
/// `boundary`.
pub fn encode(boundary: &str, parts: Vec<Part>) -> Bytes {
    MultipartForm::new(boundary, parts).to_bytes()
}

/// Splits a `multipart/form-data` byte stream back into its parts, in the
/// order they appear, with [`Limits::default`] bounds.
///
/// The boundary is the one named by the enclosing content-type header; see
/// [`parse_boundary`](crate::parse_boundary).
pub fn decode<R: BufRead>(source: R, boundary: &str) -> Result<Vec<Part>> {
    decode_with_limits(source, boundary, &Limits::default())
}

/// [`decode`] with explicit [`Limits`].
pub fn decode_with_limits<R: BufRead>(
    mut source: R,
    boundary: &str,
    limits: &Limits,
) -> Result<Vec<Part>> {
    let searcher = StreamSearcher::new(boundary.as_bytes())?;
    let mut parts = Vec::new();

    // Anything before the first delimiter is preamble. A stream with no
    // delimiter at all carries zero parts; that is not an error.
    let Some(preamble) = searcher.skip_to_match(&mut source)? else {
        debug!("no delimiter found, empty form");
        return Ok(parts);
    };
    trace!(preamble, "skipped to the first delimiter");

    while let Some(segment) = searcher.extract_to_match(&mut source, limits)? {
        if let Some(max) = limits.checked_parts(parts.len() + 1) {
            return Err(Error::PartsTooMany(max));
        }
        trace!(index = parts.len(), size = segment.len(), "extracted segment");
        parts.push(Part::parse(&segment)?);
    }

    debug!(parts = parts.len(), "form decoded");
    Ok(parts)
}

/// Mints a boundary token: twenty dashes followed by fourteen alphanumeric
/// characters drawn from `rng`.
///
/// Called once per encode operation. The token is unlikely to collide with
/// part content, but the codec does not verify that it doesn't.
pub fn generate_boundary<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut boundary = String::with_capacity(34);
    boundary.push_str("--------------------");
    boundary.extend(
        std::iter::repeat_with(|| rng.sample(Alphanumeric))
            .take(14)
            .map(char::from),
    );
    boundary
}
