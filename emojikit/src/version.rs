//! Dotted platform versions ("15.4", "16", "17.0.1") compared segment by segment.

use std::cmp::Ordering;
use std::fmt;

/// A numeric dotted version. Missing trailing segments count as zero, so
/// "16" and "16.0" are equal.
#[derive(Debug, Clone)]
pub struct PlatformVersion {
    segments: Vec<u64>,
}

impl PlatformVersion {
    /// Parse leniently: each segment contributes its leading digits, anything
    /// else in a segment is ignored.
    pub fn parse(version: &str) -> Self {
        let segments = version
            .trim()
            .split('.')
            .map(|segment| {
                let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u64>().unwrap_or(0)
            })
            .collect();
        Self { segments }
    }

    fn segment(&self, i: usize) -> u64 {
        self.segments.get(i).copied().unwrap_or(0)
    }
}

impl From<&str> for PlatformVersion {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PlatformVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PlatformVersion {}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}
