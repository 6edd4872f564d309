use serde::{Deserialize, Serialize};

/// Various limits on incoming data
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Limits {
    /// Max size of one extracted segment (headers plus body)
    pub segment_size: Option<usize>,
    /// Max number of parts
    pub parts: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            segment_size: Some(Self::DEFAULT_SEGMENT_SIZE),
            parts: None,
        }
    }
}

impl Limits {
    /// Max number of segment size, defaults to 10MB.
    pub const DEFAULT_SEGMENT_SIZE: usize = 10 * 1024 * 1024;

    /// Max segment size
    #[must_use]
    pub fn segment_size(mut self, max: usize) -> Self {
        self.segment_size.replace(max);
        self
    }

    /// Max number of parts
    #[must_use]
    pub fn parts(mut self, max: usize) -> Self {
        self.parts.replace(max);
        self
    }

    /// Check segment size
    #[must_use]
    pub fn checked_segment_size(&self, rhs: usize) -> Option<usize> {
        self.segment_size.filter(|max| rhs > *max)
    }

    /// Check parts
    #[must_use]
    pub fn checked_parts(&self, rhs: usize) -> Option<usize> {
        self.parts.filter(|max| rhs > *max)
    }
}
