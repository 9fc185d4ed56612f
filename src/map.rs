//! The range-keyed map and its construction-time validation.

use std::cmp::Ordering;
use std::fmt;
use std::ops;

use crate::error::ConstructError;
use crate::iter::Iter;
use crate::segment::Segment;

/// A key for one entry of a [`RangeKeyMap`]: either a half-open span
/// `[left, right)` or a single point.
///
/// `(K, K)` tuples convert into the span form, so span-only inputs can be
/// written as bare tuples; point entries name the variant. (A blanket
/// scalar conversion would make `(0, 5)` ambiguous between a span of
/// integers and a point that happens to be a tuple, so there isn't one.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeKey<K> {
    /// Half-open span `[left, right)`. `left == right` makes a zero-width
    /// span that behaves exactly like a point.
    Span(K, K),
    /// A single key.
    Point(K),
}

impl<K> From<(K, K)> for RangeKey<K> {
    fn from((left, right): (K, K)) -> Self {
        RangeKey::Span(left, right)
    }
}

/// An immutable map from disjoint half-open ranges `[begin, end)` (and
/// single points) to values, answering point queries in O(log n).
///
/// The whole input mapping is validated up front; a map is either fully
/// constructed or rejected with a [`ConstructError`] naming the offending
/// keys. There is no mutation API, so sharing a map across readers needs
/// no synchronization.
///
/// Keys are one generic `K: PartialOrd + Clone`. Value-level comparison
/// failures (a NaN float, say) are rejected at construction but treated
/// as a plain miss at query time; see [`RangeKeyMap::get`].
///
/// ```rust
/// use rangekey::{RangeKey, RangeKeyMap};
///
/// let map = RangeKeyMap::new([
///     (RangeKey::Span(0, 3), "low"),
///     (RangeKey::Span(3, 7), "mid"),
///     (RangeKey::Point(7), "top"),
/// ])
/// .unwrap();
///
/// assert_eq!(map.get(&0), Some(&"low"));
/// assert_eq!(map.get(&6), Some(&"mid"));
/// assert_eq!(map.get(&7), Some(&"top"));
/// assert_eq!(map.get(&8), None);
/// ```
#[derive(Debug, Clone)]
pub struct RangeKeyMap<K, V> {
    /// All segments, ascending by `(begin, end)`.
    segments: Vec<Segment<K, V>>,
    /// Positions of the zero-width segments within `segments`, for the
    /// exact-hit fast path. Inherits the sort order of `segments`.
    point_index: Vec<usize>,
}

impl<K, V> RangeKeyMap<K, V>
where
    K: PartialOrd + Clone,
{
    /// Build a map from `(range key, value)` entries.
    ///
    /// Validation rejects, in this order per entry and then across the
    /// sorted entries: spans with `left > right` (or an incomparable
    /// boundary pair), point keys that cannot be ordered at all,
    /// duplicated left boundaries, and overlapping segments. Two points
    /// at the same position count as duplicated left boundaries.
    pub fn new<I, R>(entries: I) -> Result<Self, ConstructError>
    where
        I: IntoIterator<Item = (R, V)>,
        R: Into<RangeKey<K>>,
        K: fmt::Debug,
    {
        let mut segments: Vec<Segment<K, V>> = Vec::new();
        for (key, value) in entries {
            let (begin, end) = match key.into() {
                RangeKey::Span(left, right) => match left.partial_cmp(&right) {
                    Some(Ordering::Less | Ordering::Equal) => (left, right),
                    _ => {
                        return Err(ConstructError::InvalidSpan {
                            key: format!("({:?}, {:?})", left, right),
                        });
                    }
                },
                RangeKey::Point(key) => {
                    // A span's boundaries proved comparable in the check
                    // above; a lone point has to prove it against itself.
                    if key.partial_cmp(&key).is_none() {
                        return Err(ConstructError::IncomparableBoundary {
                            key: format!("{:?}", key),
                        });
                    }
                    (key.clone(), key)
                }
            };
            segments.push(Segment::new(begin, end, value));
        }

        // Ties from incomparable pairs are re-examined in the adjacent
        // walk below, so they cannot slip through the sort unnoticed.
        segments.sort_by(|a, b| a.cmp_bounds(b).unwrap_or(Ordering::Equal));

        for i in 1..segments.len() {
            let prev = &segments[i - 1];
            let cur = &segments[i];
            match prev.begin().partial_cmp(cur.begin()) {
                None => {
                    return Err(ConstructError::IncomparableBoundary {
                        key: format!("{:?}", cur.begin()),
                    });
                }
                Some(Ordering::Equal) => {
                    return Err(ConstructError::DuplicateLeftBoundary {
                        first: prev.to_string(),
                        second: cur.to_string(),
                    });
                }
                Some(_) => {}
            }
            // Equal begins were rejected above, so overlap reduces to the
            // previous segment reaching past the next one's begin.
            match prev.end().partial_cmp(cur.begin()) {
                None => {
                    return Err(ConstructError::IncomparableBoundary {
                        key: format!("{:?}", cur.begin()),
                    });
                }
                Some(Ordering::Greater) => {
                    return Err(ConstructError::Overlap {
                        prev: prev.to_string(),
                        next: cur.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let point_index = segments
            .iter()
            .enumerate()
            .filter(|(_, seg)| seg.is_point())
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            segments,
            point_index,
        })
    }
}

impl<K, V> RangeKeyMap<K, V>
where
    K: PartialOrd,
{
    /// Look up the value of the unique segment containing `key`.
    ///
    /// A key no segment contains yields `None`. So does a key that is
    /// not comparable with the stored boundaries (querying a float map
    /// with NaN): comparison failure at query time is deliberately a
    /// quiet miss, not a panic, even though the same key would have been
    /// rejected at construction.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_segment(key).map(Segment::value)
    }

    /// Like [`get`](Self::get), but returns `default` on a miss.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Whether any segment contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_segment(key).is_some()
    }

    /// The whole segment containing `key`, boundaries included.
    pub fn get_segment(&self, key: &K) -> Option<&Segment<K, V>> {
        if self.segments.is_empty() {
            return None;
        }
        if let Some(seg) = self.find_point(key) {
            return Some(seg);
        }

        // First segment whose begin is >= key; it and its left neighbor
        // are the only candidates that can contain the key.
        let idx = self.lower_bound(key)?;
        if idx == 0 {
            let seg = &self.segments[0];
            return seg.contains(key).then_some(seg);
        }
        if idx == self.segments.len() {
            let seg = &self.segments[idx - 1];
            return seg.contains(key).then_some(seg);
        }
        [&self.segments[idx - 1], &self.segments[idx]]
            .into_iter()
            .find(|seg| seg.contains(key))
    }

    /// Exact-hit fast path over the zero-width segments.
    fn find_point(&self, key: &K) -> Option<&Segment<K, V>> {
        let mut lo = 0;
        let mut hi = self.point_index.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let seg = &self.segments[self.point_index[mid]];
            match seg.begin().partial_cmp(key) {
                Some(Ordering::Less) => lo = mid + 1,
                Some(Ordering::Equal) => return Some(seg),
                Some(Ordering::Greater) => hi = mid,
                None => return None,
            }
        }
        None
    }

    /// Index of the first segment with `begin >= key`, or `None` when the
    /// key is not comparable with a probed boundary.
    fn lower_bound(&self, key: &K) -> Option<usize> {
        let mut lo = 0;
        let mut hi = self.segments.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.segments[mid].begin().partial_cmp(key) {
                Some(Ordering::Less) => lo = mid + 1,
                Some(_) => hi = mid,
                None => return None,
            }
        }
        Some(lo)
    }
}

impl<K, V> RangeKeyMap<K, V> {
    /// Number of segments (spans and points together).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in ascending `(begin, end)` order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.segments)
    }
}

impl<'a, K, V> IntoIterator for &'a RangeKeyMap<K, V> {
    type Item = &'a Segment<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> ops::Index<&K> for RangeKeyMap<K, V>
where
    K: PartialOrd + fmt::Debug,
{
    type Output = V;

    /// Strict lookup. Panics on a miss, like indexing the std maps; use
    /// [`get`](RangeKeyMap::get) for the non-panicking form.
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no range contains key {:?}", key),
        }
    }
}

impl<K, V> TryFrom<Vec<(RangeKey<K>, V)>> for RangeKeyMap<K, V>
where
    K: PartialOrd + Clone + fmt::Debug,
{
    type Error = ConstructError;

    fn try_from(entries: Vec<(RangeKey<K>, V)>) -> Result<Self, ConstructError> {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConstructError, RangeKey, RangeKeyMap};

    fn abc_map() -> RangeKeyMap<i32, char> {
        RangeKeyMap::new([
            (RangeKey::Span(0, 3), 'a'),
            (RangeKey::Span(3, 7), 'b'),
            (RangeKey::Point(7), 'c'),
        ])
        .unwrap()
    }

    #[test]
    fn test_point_lookup() {
        let map = abc_map();
        assert_eq!(map.get(&0), Some(&'a'));
        assert_eq!(map.get(&2), Some(&'a'));
        assert_eq!(map.get(&3), Some(&'b'));
        assert_eq!(map.get(&6), Some(&'b'));
        assert_eq!(map.get(&7), Some(&'c'));
        assert_eq!(map.get(&8), None);
        assert_eq!(map.get(&-1), None);
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let map = abc_map();
        for _ in 0..3 {
            assert_eq!(map.get(&3), Some(&'b'));
            assert_eq!(map.get(&8), None);
        }
    }

    #[test]
    fn test_get_or_default() {
        let map = abc_map();
        assert_eq!(map.get_or(&2, &'z'), &'a');
        assert_eq!(map.get_or(&8, &'z'), &'z');
    }

    #[test]
    fn test_index_hit() {
        let map = abc_map();
        assert_eq!(map[&2], 'a');
        assert_eq!(map[&7], 'c');
    }

    #[test]
    #[should_panic(expected = "no range contains key 42")]
    fn test_index_miss_panics() {
        let map = abc_map();
        let _ = map[&42];
    }

    #[test]
    fn test_overlap_rejected() {
        let err = RangeKeyMap::new([((0, 5), 'a'), ((3, 8), 'b')]).unwrap_err();
        assert!(matches!(err, ConstructError::Overlap { .. }));
        // message names both segments
        let msg = err.to_string();
        assert!(msg.contains("[0, 5)"), "{}", msg);
        assert!(msg.contains("[3, 8)"), "{}", msg);
    }

    #[test]
    fn test_duplicate_left_boundary_rejected() {
        let err = RangeKeyMap::new([((0, 5), 'a'), ((0, 3), 'b')]).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateLeftBoundary { .. }));
    }

    #[test]
    fn test_duplicate_points_rejected() {
        let err =
            RangeKeyMap::new([(RangeKey::Point(5), 'a'), (RangeKey::Point(5), 'b')]).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateLeftBoundary { .. }));
    }

    #[test]
    fn test_point_inside_span_rejected() {
        let err =
            RangeKeyMap::new([(RangeKey::Span(0, 5), 'a'), (RangeKey::Point(3), 'b')]).unwrap_err();
        assert!(matches!(err, ConstructError::Overlap { .. }));
    }

    #[test]
    fn test_left_boundary_must_not_exceed_right() {
        let err = RangeKeyMap::new([((5, 3), 'a')]).unwrap_err();
        assert!(matches!(err, ConstructError::InvalidSpan { .. }));
    }

    #[test]
    fn test_touching_spans_split_at_the_shared_boundary() {
        let map = RangeKeyMap::new([((0, 5), 'a'), ((5, 10), 'b')]).unwrap();
        assert_eq!(map.get(&4), Some(&'a'));
        // half-open: the shared boundary belongs to the next span
        assert_eq!(map.get(&5), Some(&'b'));
        assert_eq!(map.get(&10), None);
    }

    #[test]
    fn test_point_at_span_end_is_allowed() {
        let map = RangeKeyMap::new([(RangeKey::Span(0, 5), 'a'), (RangeKey::Point(5), 'b')]).unwrap();
        assert_eq!(map.get(&4), Some(&'a'));
        assert_eq!(map.get(&5), Some(&'b'));
    }

    #[test]
    fn test_zero_width_span_acts_as_point() {
        let map = RangeKeyMap::new([((0, 3), 'a'), ((5, 5), 'b')]).unwrap();
        assert_eq!(map.get(&5), Some(&'b'));
        assert_eq!(map.get(&4), None);
    }

    #[test]
    fn test_float_boundaries() {
        let map = RangeKeyMap::new([((0.0, 2.5), 'a'), ((2.5, 5.0), 'b')]).unwrap();
        assert_eq!(map.get(&0.0), Some(&'a'));
        assert_eq!(map.get(&2.4), Some(&'a'));
        assert_eq!(map.get(&2.5), Some(&'b'));
        assert_eq!(map.get(&5.0), None);
    }

    #[test]
    fn test_nan_query_is_a_miss() {
        let map = RangeKeyMap::new([((0.0, 5.0), 'a')]).unwrap();
        assert_eq!(map.get(&f64::NAN), None);
        assert_eq!(map.get_or(&f64::NAN, &'z'), &'z');
    }

    #[test]
    fn test_nan_boundary_rejected() {
        let err = RangeKeyMap::new([(RangeKey::Point(f64::NAN), 'a')]).unwrap_err();
        assert!(matches!(err, ConstructError::IncomparableBoundary { .. }));

        let err = RangeKeyMap::new([((f64::NAN, 1.0), 'a')]).unwrap_err();
        assert!(matches!(err, ConstructError::InvalidSpan { .. }));
    }

    #[test]
    fn test_string_keys() {
        let map = RangeKeyMap::new([
            (("apple".to_string(), "banana".to_string()), 1),
            (("cherry".to_string(), "date".to_string()), 2),
        ])
        .unwrap();
        assert_eq!(map.get(&"avocado".to_string()), Some(&1));
        assert_eq!(map.get(&"cherry".to_string()), Some(&2));
        assert_eq!(map.get(&"banana".to_string()), None);
    }

    #[test]
    fn test_empty_map() {
        let map = RangeKeyMap::new(Vec::<(RangeKey<i32>, char)>::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.get(&0), None);
    }

    #[test]
    fn test_single_entry_edges() {
        let map = RangeKeyMap::new([((10, 20), 'a')]).unwrap();
        // insertion index 0 and len are the two one-candidate paths
        assert_eq!(map.get(&5), None);
        assert_eq!(map.get(&10), Some(&'a'));
        assert_eq!(map.get(&19), Some(&'a'));
        assert_eq!(map.get(&20), None);
        assert_eq!(map.get(&25), None);
    }

    #[test]
    fn test_iteration_is_sorted_by_begin() {
        let map = RangeKeyMap::new([
            (RangeKey::Point(7), 'c'),
            (RangeKey::Span(3, 7), 'b'),
            (RangeKey::Span(0, 3), 'a'),
        ])
        .unwrap();
        let begins: Vec<i32> = map.iter().map(|seg| *seg.begin()).collect();
        assert_eq!(begins, vec![0, 3, 7]);
        assert_eq!(map.iter().len(), 3);
        assert_eq!(map.len(), 3);
        assert!(!map.is_empty());
        assert!((&map).into_iter().any(|seg| seg.is_point()));
    }

    #[test]
    fn test_contains_key() {
        let map = abc_map();
        assert!(map.contains_key(&0));
        assert!(map.contains_key(&7));
        assert!(!map.contains_key(&8));
    }

    #[test]
    fn test_get_segment() {
        let map = abc_map();
        let seg = map.get_segment(&4).unwrap();
        assert_eq!((*seg.begin(), *seg.end()), (3, 7));
        assert_eq!(seg.value(), &'b');
        assert!(map.get_segment(&8).is_none());
    }

    #[test]
    fn test_try_from_entries() {
        let map = RangeKeyMap::try_from(vec![
            (RangeKey::Span(0, 3), 'a'),
            (RangeKey::Point(3), 'b'),
        ])
        .unwrap();
        assert_eq!(map.get(&3), Some(&'b'));
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let map = RangeKeyMap::new([((30, 40), 'c'), ((0, 10), 'a'), ((10, 20), 'b')]).unwrap();
        assert_eq!(map.get(&15), Some(&'b'));
        assert_eq!(map.get(&35), Some(&'c'));
        assert_eq!(map.get(&25), None);
    }
}
