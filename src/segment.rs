use std::cmp::Ordering;
use std::fmt;

/// One validated entry of a [`RangeKeyMap`](crate::RangeKeyMap): a half-open
/// interval `[begin, end)` or a single point (`begin == end`), paired with
/// its value.
///
/// A key `k` belongs to a segment iff `k == begin` or `begin < k < end`.
/// Under half-open semantics an interval's own `end` is excluded, and a
/// point segment contains exactly its own key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<K, V> {
    begin: K,
    end: K,
    value: V,
}

impl<K, V> Segment<K, V> {
    pub(crate) fn new(begin: K, end: K, value: V) -> Self {
        Self { begin, end, value }
    }

    /// Left boundary (inclusive).
    #[inline]
    pub fn begin(&self) -> &K {
        &self.begin
    }

    /// Right boundary (exclusive for intervals, equal to `begin` for points).
    #[inline]
    pub fn end(&self) -> &K {
        &self.end
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<K: PartialOrd, V> Segment<K, V> {
    /// Whether this segment is a degenerate point (`begin == end`).
    pub fn is_point(&self) -> bool {
        matches!(self.begin.partial_cmp(&self.end), Some(Ordering::Equal))
    }

    /// Whether `key` belongs to this segment.
    ///
    /// An incomparable key (e.g. a NaN boundary against float keys) is
    /// never contained; comparison failure is a quiet "no".
    pub fn contains(&self, key: &K) -> bool {
        match key.partial_cmp(&self.begin) {
            Some(Ordering::Equal) => true,
            Some(Ordering::Greater) => {
                matches!(key.partial_cmp(&self.end), Some(Ordering::Less))
            }
            _ => false,
        }
    }

    /// Lexicographic `(begin, end)` comparison against another segment.
    /// `None` if the boundaries are not mutually comparable.
    pub(crate) fn cmp_bounds(&self, other: &Self) -> Option<Ordering> {
        match self.begin.partial_cmp(&other.begin) {
            Some(Ordering::Equal) => self.end.partial_cmp(&other.end),
            ord => ord,
        }
    }
}

impl<K: PartialOrd + fmt::Debug, V> fmt::Display for Segment<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_point() {
            write!(f, "point {:?}", self.begin)
        } else {
            write!(f, "[{:?}, {:?})", self.begin, self.end)
        }
    }
}
