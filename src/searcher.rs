use std::io::BufRead;

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::{
    utils::{CRLF, DASHES},
    Error, Limits, Result,
};

/// Max length of a delimiter pattern, in bytes.
pub const MAX_PATTERN_LENGTH: usize = 512;

/// A streaming exact-pattern searcher based on the Knuth-Morris-Pratt
/// algorithm.
///
/// The searcher holds no per-scan state; each call resumes from wherever the
/// source's read cursor currently sits, so one searcher can drive a whole
/// sequence of scans over the same source. Total work across all calls is
/// linear in the source length, with `pattern.len() + 1` words of auxiliary
/// space and no backtracking on the source.
pub struct StreamSearcher {
    pattern: Bytes,
    /// KMP border table: `borders[i]` is the length of the longest proper
    /// border of `pattern[..i]`, with `-1` as the sentinel at index 0.
    borders: Vec<isize>,
}

impl StreamSearcher {
    /// Creates a searcher for `pattern`.
    pub fn new(pattern: &[u8]) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(Error::PatternTooLong(pattern.len()));
        }

        let mut borders = vec![0; pattern.len() + 1];
        borders[0] = -1;
        let mut i = 0;
        let mut j: isize = -1;
        while i < pattern.len() {
            while j >= 0 && pattern[i] != pattern[j as usize] {
                j = borders[j as usize];
            }
            i += 1;
            j += 1;
            borders[i] = j;
        }

        Ok(Self {
            pattern: Bytes::copy_from_slice(pattern),
            borders,
        })
    }

    /// The pattern this searcher was built for.
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Advances the match cursor `j` by one input byte.
    fn step(&self, mut j: isize, b: u8) -> isize {
        while j >= 0 && b != self.pattern[j as usize] {
            j = self.borders[j as usize];
        }
        j + 1
    }

    /// Scans `source` until the pattern has been matched once, discarding
    /// everything read.
    ///
    /// On a match, returns the number of bytes consumed including the pattern
    /// itself, and leaves the source cursor on the first byte after the
    /// match. Returns `None` when the source drains without a match; the
    /// source is then fully consumed.
    pub fn skip_to_match<R: BufRead>(&self, source: &mut R) -> Result<Option<u64>> {
        let mut consumed: u64 = 0;
        let mut j: isize = 0;

        loop {
            let (used, matched) = {
                let buf = source.fill_buf()?;
                if buf.is_empty() {
                    trace!(consumed, "source drained without a match");
                    return Ok(None);
                }
                self.scan(&mut j, buf)
            };
            source.consume(used);
            consumed += used as u64;
            if matched {
                trace!(consumed, "delimiter matched");
                return Ok(Some(consumed));
            }
        }
    }

    /// Scans `source` until the pattern has been matched once, accumulating
    /// everything read, and returns the segment between the previous match
    /// and this one with its delimiter framing stripped.
    ///
    /// The accumulated bytes are `CRLF <segment> CRLF--<pattern>`: the line
    /// terminator that closed the previous delimiter line in front, and the
    /// leader of the next delimiter behind. Both are verified and removed, so
    /// the returned segment is exactly the part's header block and body with
    /// no delimiter artifacts.
    ///
    /// When the source drains instead, a residue starting with `--` is the
    /// tail of the closing delimiter and yields `None` (end of parts);
    /// anything else means the closing delimiter never arrived.
    pub fn extract_to_match<R: BufRead>(
        &self,
        source: &mut R,
        limits: &Limits,
    ) -> Result<Option<Bytes>> {
        let mut acc = BytesMut::new();
        let mut j: isize = 0;

        loop {
            let (used, matched) = {
                let buf = source.fill_buf()?;
                if buf.is_empty() {
                    if acc.starts_with(&DASHES) {
                        trace!(residue = acc.len(), "closing delimiter reached");
                        return Ok(None);
                    }
                    return Err(Error::MalformedStream);
                }
                let (used, matched) = self.scan(&mut j, buf);
                acc.extend_from_slice(&buf[..used]);
                (used, matched)
            };
            source.consume(used);

            if let Some(max) = limits.checked_segment_size(acc.len()) {
                return Err(Error::SegmentTooLarge(max));
            }
            if matched {
                trace!(accumulated = acc.len(), "segment delimited");
                return self.trim_segment(acc).map(Some);
            }
        }
    }

    /// Runs the KMP cursor over one buffered chunk. Returns how many bytes
    /// of `buf` were used and whether the pattern completed within them.
    fn scan(&self, j: &mut isize, buf: &[u8]) -> (usize, bool) {
        for (i, &b) in buf.iter().enumerate() {
            *j = self.step(*j, b);
            if *j as usize == self.pattern.len() {
                return (i + 1, true);
            }
        }
        (buf.len(), false)
    }

    /// Strips the delimiter framing off an accumulated segment.
    fn trim_segment(&self, mut acc: BytesMut) -> Result<Bytes> {
        let tail = CRLF.len() + DASHES.len() + self.pattern.len();
        if acc.len() < CRLF.len() + tail {
            return Err(Error::MalformedSegment("shorter than its delimiter framing"));
        }
        if acc[..2] != CRLF {
            return Err(Error::MalformedSegment("delimiter line not CRLF-terminated"));
        }
        let end = acc.len() - tail;
        if acc[end..end + 2] != CRLF || acc[end + 2..end + 4] != DASHES {
            return Err(Error::MalformedSegment("delimiter leader is not `\\r\\n--`"));
        }
        acc.truncate(end);
        let _ = acc.split_to(CRLF.len());
        Ok(acc.freeze())
    }
}
