use crate::segment::Segment;

/// Iterator over the segments of a [`RangeKeyMap`](crate::RangeKeyMap),
/// ascending by `(begin, end)`.
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Segment<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(segments: &'a [Segment<K, V>]) -> Self {
        Self {
            inner: segments.iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Segment<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
