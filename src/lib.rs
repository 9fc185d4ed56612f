//! An immutable associative container keyed by disjoint half-open ranges
//! `[begin, end)` and single points, with O(log n) point lookup.
//!
//! [`RangeKeyMap`] is built once from a collection of `(range key, value)`
//! entries. Construction validates everything up front (malformed spans,
//! duplicated left boundaries, overlapping segments, incomparable
//! boundaries) and yields either a ready map or a [`ConstructError`]
//! naming the offending keys. After that the map is read-only: lookups
//! are deterministic and the map can be shared across threads freely.
//!
//! ```rust
//! use rangekey::{RangeKey, RangeKeyMap};
//!
//! let grades = RangeKeyMap::new([
//!     (RangeKey::Span(0, 60), 'F'),
//!     (RangeKey::Span(60, 70), 'D'),
//!     (RangeKey::Span(70, 80), 'C'),
//!     (RangeKey::Span(80, 90), 'B'),
//!     (RangeKey::Span(90, 100), 'A'),
//!     (RangeKey::Point(100), 'A'),
//! ])
//! .unwrap();
//!
//! assert_eq!(grades.get(&89), Some(&'B'));
//! assert_eq!(grades.get(&90), Some(&'A'));
//! assert_eq!(grades[&100], 'A');
//! assert_eq!(grades.get(&101), None);
//! ```

mod error;
pub mod iter;
pub mod map;
pub mod segment;

pub use error::ConstructError;
pub use iter::Iter;
pub use map::{RangeKey, RangeKeyMap};
pub use segment::Segment;
