use std::collections::HashSet;

/// Digest of the output of a passing unit test.
pub const BASELINE: &str = "0832f708a97acc6da385446384647a8f";

/// Read-only set of accepted fingerprints.
///
/// Filled once at startup, then shared behind an `Arc` by every worker without locking.
#[derive(Clone, Debug, Default)]
pub struct KnownFingerprints {
    hashes: HashSet<String>,
}

impl KnownFingerprints {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in set every run starts from.
    pub fn baseline() -> Self {
        let mut known = Self::empty();
        known.insert(BASELINE);
        known
    }

    pub fn insert(&mut self, hash: impl Into<String>) -> bool {
        self.hashes.insert(hash.into())
    }

    /// Add one fingerprint per non-blank line of `text`. Returns how many were new.
    pub fn extend_from_text(&mut self, text: &str) -> usize {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter(|l| self.hashes.insert((*l).to_string()))
            .count()
    }

    #[inline]
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownFingerprints {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            hashes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_knows_passing_unit_test() {
        let known = KnownFingerprints::baseline();
        assert!(known.contains(BASELINE));
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn extend_skips_blanks_and_duplicates() {
        let mut known = KnownFingerprints::baseline();
        let added = known.extend_from_text(&format!("aaa\n\n  bbb  \n{BASELINE}\naaa\n"));
        assert_eq!(added, 2);
        assert_eq!(known.len(), 3);
        assert!(known.contains("bbb"));
    }
}
