//! Tree addresses.
//!
//! A [`Path`] is the universal key of the engine: every node in the scene
//! tree, every geometry in the render tree and every emitted event is
//! addressed by one. The dotted string form is `.a.b.c` with the bare dot
//! denoting the root.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Returns whether `part` is usable as a single path segment.
///
/// Valid parts are non-empty and drawn from `[A-Za-z0-9:_-]`.
pub fn is_valid_path_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-'))
}

/// An immutable sequence of name parts addressing a node in the scene tree.
///
/// Ordering is length-major: shorter paths sort before longer ones, equal
/// lengths compare part by part. This keeps every ancestor ahead of its
/// descendants in sorted maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    parts: Vec<String>,
}

impl Path {
    /// The empty path addressing the root.
    #[inline]
    pub fn root() -> Path {
        Path { parts: Vec::new() }
    }

    /// Builds a path from parts, validating each one.
    pub fn new<I, S>(parts: I) -> Result<Path>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        for part in &parts {
            if !is_valid_path_part(part) {
                return Err(Error::InvalidPath(format!(
                    "'{part}' is not a valid path part"
                )));
            }
        }
        Ok(Path { parts })
    }

    /// Parses the dotted form: `"."` or `""` is the root, otherwise
    /// `.a.b.c` (the leading dot is optional). Adjacent dots are rejected.
    pub fn parse(dotted: &str) -> Result<Path> {
        if dotted.is_empty() || dotted == "." {
            return Ok(Path::root());
        }

        let body = dotted.strip_prefix('.').unwrap_or(dotted);
        let mut parts = Vec::new();
        for part in body.split('.') {
            if part.is_empty() {
                return Err(Error::InvalidPath(format!("'{dotted}' has '..' within it")));
            }
            if !is_valid_path_part(part) {
                return Err(Error::InvalidPath(format!(
                    "'{part}' is not a valid path part"
                )));
            }
            parts.push(part.to_owned());
        }
        Ok(Path { parts })
    }

    #[inline]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Whether this path has at most one part.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.parts.len() <= 1
    }

    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// Extends the path by one part.
    ///
    /// The part must already satisfy [`is_valid_path_part`]; node names are
    /// validated when they enter the tree.
    pub fn join(&self, part: &str) -> Path {
        debug_assert!(is_valid_path_part(part));
        let mut parts = self.parts.clone();
        parts.push(part.to_owned());
        Path { parts }
    }

    /// Drops the first `count` parts; saturates to the root.
    pub fn without_first(&self, count: usize) -> Path {
        Path {
            parts: self.parts.iter().skip(count).cloned().collect(),
        }
    }

    /// Drops the last `count` parts; saturates to the root.
    pub fn without_last(&self, count: usize) -> Path {
        let keep = self.parts.len().saturating_sub(count);
        Path {
            parts: self.parts[..keep].to_vec(),
        }
    }

    /// Whether this path is exactly one level below `other`.
    pub fn is_child_of(&self, other: &Path) -> bool {
        self.size() == other.size() + 1 && self.is_descendant_of(other, false)
    }

    /// Whether `other` is a (strict, unless `or_equal`) prefix of this path.
    pub fn is_descendant_of(&self, other: &Path, or_equal: bool) -> bool {
        if other.size() > self.size() {
            return false;
        }
        if !or_equal && other.size() == self.size() {
            return false;
        }
        self.parts.iter().zip(&other.parts).all(|(a, b)| a == b)
    }

    /// All strict prefixes, nearest first, optionally starting with self.
    /// The root is never included.
    pub fn ancestor_paths(&self, including_self: bool) -> Vec<Path> {
        let mut paths = Vec::new();
        if including_self {
            paths.push(self.clone());
        }
        let mut current = self.without_last(1);
        while !current.is_empty() {
            paths.push(current.clone());
            current = current.without_last(1);
        }
        paths
    }

    /// Successive prefixes of self, ending just before the nearest common
    /// ancestor of `other`.
    pub fn paths_between(&self, other: &Path, including_self: bool) -> Vec<Path> {
        let mut intermediate = Vec::new();
        if including_self {
            intermediate.push(self.clone());
        }
        if self.is_empty() {
            return intermediate;
        }

        let mut current = self.without_last(1);
        while !other.is_descendant_of(&current, true) {
            intermediate.push(current.clone());
            current = current.without_last(1);
        }
        intermediate
    }

    fn common_prefix_len(&self, other: &Path) -> usize {
        self.parts
            .iter()
            .zip(&other.parts)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// The longest shared prefix.
    pub fn common_ancestor_with(&self, other: &Path) -> Path {
        Path {
            parts: self.parts[..self.common_prefix_len(other)].to_vec(),
        }
    }

    /// The shared prefix extended by this path's next part, if any.
    pub fn child_of_common_ancestor_with(&self, other: &Path) -> Path {
        let len = (self.common_prefix_len(other) + 1).min(self.parts.len());
        Path {
            parts: self.parts[..len].to_vec(),
        }
    }

    /// This path with the shared prefix stripped.
    pub fn without_common_ancestor(&self, other: &Path) -> Path {
        self.without_first(self.common_prefix_len(other))
    }

    /// Concatenates `other` after the part of self preceding the first
    /// occurrence of `other`'s head, yielding a path that re-roots `other`
    /// under this one.
    pub fn join_after_common_descendant(&self, other: &Path) -> Path {
        let split = match other.first() {
            Some(head) => self
                .parts
                .iter()
                .position(|part| part == head)
                .unwrap_or(self.parts.len()),
            None => 0,
        };
        let mut parts = self.parts[..split].to_vec();
        parts.extend(other.parts.iter().cloned());
        Path { parts }
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Path) -> Ordering {
        self.size()
            .cmp(&other.size())
            .then_with(|| self.parts.cmp(&other.parts))
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Path) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Path> {
        Path::parse(s)
    }
}

impl Add<&Path> for Path {
    type Output = Path;

    fn add(mut self, other: &Path) -> Path {
        self.parts.extend(other.parts.iter().cloned());
        self
    }
}

impl Add<&str> for Path {
    type Output = Path;

    /// Appends a single part; see [`Path::join`].
    fn add(self, part: &str) -> Path {
        self.join(part)
    }
}

impl Sub<&Path> for Path {
    type Output = Path;

    /// Strips the common prefix; see [`Path::without_common_ancestor`].
    fn sub(self, other: &Path) -> Path {
        self.without_common_ancestor(other)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            return f.write_str(".");
        }
        for part in &self.parts {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(dotted: &str) -> Path {
        Path::parse(dotted).unwrap()
    }

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn parse_root() {
        assert!(p(".").is_empty());
        assert!(p("").is_empty());
    }

    #[test]
    fn parse_dotted() {
        assert_eq!(p(".a.b.c").parts(), &["a", "b", "c"]);
        assert_eq!(p("a.b").parts(), &["a", "b"]);
    }

    #[test]
    fn parse_rejects_adjacent_separators() {
        assert!(Path::parse("a..b").is_err());
        assert!(Path::parse(".a.").is_err());
    }

    #[test]
    fn parse_rejects_invalid_parts() {
        assert!(Path::parse(".a b").is_err());
        assert!(Path::parse(".a/b").is_err());
        assert!(Path::parse(".node:0_ok-1").is_ok());
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(p(".a.b.c").to_string(), ".a.b.c");
        assert_eq!(Path::root().to_string(), ".");
    }

    // ── prefix/suffix ─────────────────────────────────────────────────────

    #[test]
    fn concat_and_strip_are_inverse() {
        let a = p(".x.y");
        let b = p(".u.v.w");
        let joined = a.clone() + &b;
        assert_eq!(joined.without_first(a.size()), b);
        assert_eq!(joined - &a, b);
    }

    #[test]
    fn without_last_saturates() {
        assert_eq!(p(".a").without_last(3), Path::root());
    }

    #[test]
    fn first_and_last() {
        let path = p(".a.b");
        assert_eq!(path.first(), Some("a"));
        assert_eq!(path.last(), Some("b"));
        assert_eq!(Path::root().first(), None);
    }

    // ── ancestry ──────────────────────────────────────────────────────────

    #[test]
    fn descendant_of_self_only_with_or_equal() {
        let a = p(".a.b");
        assert!(a.is_descendant_of(&a, true));
        assert!(!a.is_descendant_of(&a, false));
    }

    #[test]
    fn child_and_descendant() {
        let parent = p(".a");
        let child = p(".a.b");
        let grandchild = p(".a.b.c");
        assert!(child.is_child_of(&parent));
        assert!(!grandchild.is_child_of(&parent));
        assert!(grandchild.is_descendant_of(&parent, false));
        assert!(!parent.is_descendant_of(&child, true));
    }

    #[test]
    fn ancestors_nearest_first() {
        assert_eq!(p(".a.b.c").ancestor_paths(false), vec![p(".a.b"), p(".a")]);
        assert_eq!(
            p(".a.b").ancestor_paths(true),
            vec![p(".a.b"), p(".a")]
        );
    }

    #[test]
    fn paths_between_stops_at_common_ancestor() {
        let from = p(".a.b.c.d");
        let to = p(".a.x");
        assert_eq!(
            from.paths_between(&to, false),
            vec![p(".a.b.c"), p(".a.b")]
        );
    }

    #[test]
    fn common_ancestor_is_commutative() {
        let a = p(".a.b.c");
        let b = p(".a.b.x.y");
        assert_eq!(a.common_ancestor_with(&b), p(".a.b"));
        assert_eq!(b.common_ancestor_with(&a), p(".a.b"));
        assert_eq!(a.common_ancestor_with(&a), a);
    }

    #[test]
    fn child_of_common_ancestor() {
        let a = p(".a.b.c");
        let b = p(".a.x");
        assert_eq!(a.child_of_common_ancestor_with(&b), p(".a.b"));
    }

    #[test]
    fn join_after_common_descendant_re_roots() {
        let base = p(".root.sub.leaf");
        let other = p(".sub.extra");
        assert_eq!(base.join_after_common_descendant(&other), p(".root.sub.extra"));
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn order_is_length_major() {
        assert!(p(".z") < p(".a.a"));
        assert!(p(".a.a") < p(".a.b"));
        assert!(p(".a.b") < p(".b.a"));
    }

    #[test]
    fn order_is_transitive() {
        let a = p(".a");
        let b = p(".a.a");
        let c = p(".a.b");
        assert!(a < b && b < c && a < c);
    }
}
