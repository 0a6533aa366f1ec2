//! Year parsing and century buckets.

use serde::{Deserialize, Serialize};

/// Century bucket: the leading two digits of a four-digit year
/// (19 for the 1900s, 20 for the 2000s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Century(pub u8);

impl Century {
    /// Bucket a year. Negative years have no bucket.
    pub fn from_year(year: i32) -> Option<Century> {
        if year < 0 {
            return None;
        }
        u8::try_from(year / 100).ok().map(Century)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Century {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract a year from free text: the first run of at least three ASCII
/// digits, truncated to its first four.
///
/// Shorter digit runs are skipped, so `"vol. 12, 1968"` yields 1968.
pub fn extract_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }

        let run = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

        if run >= 3 {
            let digits = &text[start..start + run.min(4)];
            return digits.parse().ok();
        }
        start += run;
    }

    None
}
