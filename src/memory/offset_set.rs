// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Set of element indices into one typed view. Kept sorted and deduplicated
/// so intersection is a linear merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct OffsetSet {
    offsets: Vec<usize>,
}

impl OffsetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from indices already in strictly ascending order.
    pub(crate) fn from_sorted(offsets: Vec<usize>) -> Self {
        debug_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.offsets.binary_search(&offset).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    /// The only member, when there is exactly one.
    pub fn single(&self) -> Option<usize> {
        match self.offsets.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn intersect(&self, other: &OffsetSet) -> OffsetSet {
        let (a, b) = (&self.offsets, &other.offsets);
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        Self { offsets: out }
    }

    pub fn intersect_in_place(&mut self, other: &OffsetSet) {
        self.offsets.retain(|offset| other.contains(*offset));
    }
}

impl FromIterator<usize> for OffsetSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut offsets: Vec<usize> = iter.into_iter().collect();
        offsets.sort_unstable();
        offsets.dedup();
        Self { offsets }
    }
}

impl From<Vec<usize>> for OffsetSet {
    fn from(offsets: Vec<usize>) -> Self {
        offsets.into_iter().collect()
    }
}

impl From<OffsetSet> for Vec<usize> {
    fn from(set: OffsetSet) -> Self {
        set.offsets
    }
}

impl<'a> IntoIterator for &'a OffsetSet {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}

impl fmt::Display for OffsetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, offset) in self.offsets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", offset)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> OffsetSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_duplicates_collapse() {
        let s = set(&[4, 1, 4, 2, 1]);
        assert_eq!(s.as_slice(), &[1, 2, 4]);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_intersect() {
        let a = set(&[0, 2, 4, 6]);
        let b = set(&[0, 2, 4, 9]);
        assert_eq!(a.intersect(&b), set(&[0, 2, 4]));
        assert!(set(&[1, 2]).intersect(&set(&[3, 4])).is_empty());
        assert!(a.intersect(&OffsetSet::new()).is_empty());
    }

    #[test]
    fn test_intersect_commutative_and_associative() {
        let a = set(&[1, 3, 5, 7, 9]);
        let b = set(&[3, 5, 9, 11]);
        let c = set(&[0, 5, 9]);

        assert_eq!(a.intersect(&b), b.intersect(&a));
        assert_eq!(a.intersect(&b).intersect(&c), a.intersect(&b.intersect(&c)));
        assert_eq!(c.intersect(&a).intersect(&b), set(&[5, 9]));
    }

    #[test]
    fn test_intersect_in_place_matches_intersect() {
        let a = set(&[2, 4, 8, 16]);
        let b = set(&[4, 16, 32]);
        let mut c = a.clone();
        c.intersect_in_place(&b);
        assert_eq!(c, a.intersect(&b));
    }

    #[test]
    fn test_single() {
        assert_eq!(set(&[4]).single(), Some(4));
        assert_eq!(set(&[]).single(), None);
        assert_eq!(set(&[1, 2]).single(), None);
    }

    #[test]
    fn test_deserialize_sorts_and_dedups() {
        let s: OffsetSet = serde_json::from_str("[9, 3, 3, 1]").unwrap();
        assert_eq!(s.as_slice(), &[1, 3, 9]);
        assert!(s.contains(1));
        assert!(s.contains(3));
        assert_eq!(s.intersect(&set(&[1, 3])), set(&[1, 3]));

        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[1,3,9]");
        assert_eq!(serde_json::from_str::<OffsetSet>(&json).unwrap(), s);
    }

    #[test]
    fn test_display() {
        assert_eq!(set(&[6, 0, 2]).to_string(), "{0, 2, 6}");
        assert_eq!(OffsetSet::new().to_string(), "{}");
    }
}
