//! Lenient version ordering.
//!
//! Installed tools report versions in wildly inconsistent formats: differing
//! segment counts ("1.6" vs "1.6.0"), pre-release suffixes ("1.0rc1"),
//! alphabetic patch markers ("1.0.1b"). Strict semver parsing would reject
//! half of them, so comparison here never fails — every string gets a total
//! order.
//!
//! Rules:
//! - Versions split on `.`, and each chunk further splits into numeric and
//!   alphabetic runs ("1.0rc1" becomes `[1, 0, "rc", 1]`).
//! - Numeric segments compare numerically, alphabetic segments compare
//!   lexicographically.
//! - A missing trailing segment counts as zero, so "1.6" equals "1.6.0".
//! - At the same position an alphabetic segment orders below a numeric one,
//!   so "1.0rc1" sorts before "1.0".

use std::cmp::Ordering;
use std::fmt;

/// A single parsed segment of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Alpha(String),
}

impl Segment {
    fn cmp_segment(&self, other: &Segment) -> Ordering {
        match (self, other) {
            (Segment::Num(a), Segment::Num(b)) => a.cmp(b),
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            // Pre-release suffixes sort below numeric segments
            (Segment::Alpha(_), Segment::Num(_)) => Ordering::Less,
            (Segment::Num(_), Segment::Alpha(_)) => Ordering::Greater,
        }
    }
}

/// A version string parsed for lenient comparison.
///
/// Parsing never fails; the original string is retained for display.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    raw: String,
    segments: Vec<Segment>,
}

impl Version {
    /// Parse a version string.
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        for chunk in raw.trim().split('.') {
            segments.extend(split_runs(chunk));
        }
        Self {
            raw: raw.trim().to_string(),
            segments,
        }
    }

    /// The original string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this version satisfies a minimum (self >= minimum).
    pub fn satisfies(&self, minimum: &Version) -> bool {
        *self >= *minimum
    }
}

/// Split one dot-delimited chunk into alternating numeric/alphabetic runs.
fn split_runs(chunk: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut numeric = None::<bool>;

    for ch in chunk.chars() {
        let is_digit = ch.is_ascii_digit();
        if numeric != Some(is_digit) && !buf.is_empty() {
            out.push(finish_run(&buf, numeric == Some(true)));
            buf.clear();
        }
        numeric = Some(is_digit);
        buf.push(ch);
    }
    if !buf.is_empty() {
        out.push(finish_run(&buf, numeric == Some(true)));
    }
    out
}

fn finish_run(buf: &str, numeric: bool) -> Segment {
    if numeric {
        // Absurdly long digit runs overflow u64; saturate rather than fail
        Segment::Num(buf.parse().unwrap_or(u64::MAX))
    } else {
        Segment::Alpha(buf.to_string())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            // Missing trailing segments count as zero
            let zero = Segment::Num(0);
            let a = self.segments.get(i).unwrap_or(&zero);
            let b = other.segments.get(i).unwrap_or(&zero);
            match a.cmp_segment(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
