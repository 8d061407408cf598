//! Character classes built from interval sets
//!
//!     The tokenizer needs a handful of character classes (identifier starts, identifier
//!     bodies, function names). Rather than writing them out by hand, they are described
//!     with a compact range syntax and turned into sorted, merged interval lists, which can
//!     then be queried directly or rendered into a regex character class.
//!
//! Range Syntax
//!
//!     A spec is read left to right. Whenever the next three characters have the shape
//!     `x-y` they form an inclusive range, otherwise the next character stands for itself.
//!     So `a-zA-Z0-9_-` is the ranges a..z, A..Z, 0..9 followed by the single characters `_`
//!     and `-` (a trailing dash can't start a range, there is nothing after it).
//!
//! Operations
//!
//!     - [`parse`] sorts and merges the ranges of a spec (adjacent or overlapping ranges
//!       collapse into one).
//!     - [`parse_excluding`] parses a spec and removes everything covered by a second spec.
//!     - [`merge`] is the union of two lists, [`difference`] the ordered set-difference.
//!
//!     All of them return a [`RangeList`], which is always sorted and disjoint.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt::{self, Write};

/// An inclusive range of code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    /// Create a range, swapping the bounds if they come in reverse order.
    pub fn new(start: char, end: char) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn single(c: char) -> Self {
        Self { start: c, end: c }
    }

    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    fn write_class_item(&self, out: &mut String) {
        push_class_char(out, self.start);
        if self.end != self.start {
            out.push('-');
            push_class_char(out, self.end);
        }
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start.escape_debug())
        } else {
            write!(
                f,
                "{}-{}",
                self.start.escape_debug(),
                self.end.escape_debug()
            )
        }
    }
}

/// A sorted, merged, non-overlapping sequence of [`CharRange`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RangeList {
    ranges: Vec<CharRange>,
}

impl RangeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[CharRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CharRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Membership test by binary search over the sorted ranges.
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|range| {
                if range.end < c {
                    Ordering::Less
                } else if range.start > c {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Render as a regex character class, e.g. `[a-z_]`.
    ///
    /// An empty list renders as a class that never matches.
    pub fn to_class(&self) -> String {
        if self.ranges.is_empty() {
            return r"[^\x{0}-\x{10FFFF}]".to_string();
        }
        let mut out = String::from("[");
        for range in &self.ranges {
            range.write_class_item(&mut out);
        }
        out.push(']');
        out
    }

    /// Render as a class followed verbatim by `suffix` (usually a quantifier).
    pub fn to_pattern(&self, suffix: Option<&str>) -> String {
        let mut pattern = self.to_class();
        if let Some(suffix) = suffix {
            pattern.push_str(suffix);
        }
        pattern
    }

    pub fn to_regex(&self, suffix: Option<&str>) -> Result<Regex, regex::Error> {
        Regex::new(&self.to_pattern(suffix))
    }
}

impl fmt::Display for RangeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_class())
    }
}

impl From<Vec<CharRange>> for RangeList {
    fn from(ranges: Vec<CharRange>) -> Self {
        normalize(ranges)
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a CharRange;
    type IntoIter = std::slice::Iter<'a, CharRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Parse a range spec into a sorted, merged list.
pub fn parse(spec: &str) -> RangeList {
    let chars: Vec<char> = spec.chars().collect();
    let mut ranges = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            ranges.push(CharRange::new(chars[i], chars[i + 2]));
            i += 3;
        } else {
            ranges.push(CharRange::single(chars[i]));
            i += 1;
        }
    }
    normalize(ranges)
}

/// Parse `spec` and remove every character covered by `excludes`.
pub fn parse_excluding(spec: &str, excludes: &str) -> RangeList {
    let ranges = parse(spec);
    if excludes.is_empty() {
        return ranges;
    }
    difference(&ranges, &parse(excludes))
}

/// Union of two lists.
pub fn merge(left: &RangeList, right: &RangeList) -> RangeList {
    let mut ranges = Vec::with_capacity(left.len() + right.len());
    ranges.extend_from_slice(&left.ranges);
    ranges.extend_from_slice(&right.ranges);
    normalize(ranges)
}

/// Ordered set-difference `list - excludes`.
///
/// Both inputs are sorted and disjoint, so a single pass with one cursor per list is
/// enough. A range is split in two when an exclusion falls strictly inside it.
pub fn difference(list: &RangeList, excludes: &RangeList) -> RangeList {
    let excludes = excludes.as_slice();
    let mut result = Vec::with_capacity(list.len());
    let mut cursor = 0;

    for range in list {
        while cursor < excludes.len() && excludes[cursor].end < range.start {
            cursor += 1;
        }

        let mut start = range.start;
        let mut covered = false;
        let mut k = cursor;
        while k < excludes.len() && excludes[k].start <= range.end {
            let exclusion = excludes[k];
            if exclusion.start > start {
                if let Some(before) = pred(exclusion.start) {
                    result.push(CharRange::new(start, before));
                }
            }
            match succ(exclusion.end) {
                Some(next) if exclusion.end < range.end => start = next,
                _ => {
                    covered = true;
                    break;
                }
            }
            k += 1;
        }
        if !covered {
            result.push(CharRange::new(start, range.end));
        }
    }

    RangeList { ranges: result }
}

/// Compile `ranges` minus `excludes` into a regex, with an optional suffix.
pub fn ranges_without(
    ranges: &str,
    excludes: &str,
    suffix: Option<&str>,
) -> Result<Regex, regex::Error> {
    parse_excluding(ranges, excludes).to_regex(suffix)
}

fn normalize(mut ranges: Vec<CharRange>) -> RangeList {
    ranges.sort_by_key(|range| range.start);
    let mut merged: Vec<CharRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if touches(last, &range) => {
                if range.end > last.end {
                    last.end = range.end;
                }
            }
            _ => merged.push(range),
        }
    }
    RangeList { ranges: merged }
}

/// `next` starts inside `current` or right after it.
fn touches(current: &CharRange, next: &CharRange) -> bool {
    match succ(current.end) {
        Some(after) => next.start <= after,
        None => true,
    }
}

// Code point arithmetic that steps over the surrogate gap.
fn succ(c: char) -> Option<char> {
    match c {
        '\u{D7FF}' => Some('\u{E000}'),
        _ => char::from_u32(c as u32 + 1),
    }
}

fn pred(c: char) -> Option<char> {
    match c {
        '\u{E000}' => Some('\u{D7FF}'),
        '\0' => None,
        _ => char::from_u32(c as u32 - 1),
    }
}

fn push_class_char(out: &mut String, c: char) {
    if c.is_ascii_alphanumeric() {
        out.push(c);
    } else if c.is_ascii_graphic() {
        out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
    } else {
        let _ = write!(out, "\\x{{{:X}}}", c as u32);
    }
}
