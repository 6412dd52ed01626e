use alloc::string::String;

use core::cmp::Ordering;

/// A single monetary transaction: a timestamp, a signed amount, and an
/// opaque identifier.
///
/// Records are immutable once constructed; only read-only accessors are
/// exposed. The identifier is expected to be unique within a dataset but
/// uniqueness is not enforced here.
///
/// A plain fixed-shape struct keeps per-record overhead at the three fields
/// and lets a sorted `&[Transaction<T>]` act as the contiguous read-only view
/// the windowing pass borrows.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction<T> {
    /// Timestamp the transaction occurred at, in dataset units
    /// (days, seconds since epoch, ...)
    timestamp: i64,
    /// Signed monetary amount
    amount: T,
    /// Opaque identifier
    id: String,
}

impl<T: Copy> Transaction<T> {
    /// Creates a record from its field values.
    ///
    /// No validation is performed; the parsing layer owns schema checks.
    pub fn new(id: impl Into<String>, timestamp: i64, amount: T) -> Self {
        Self {
            timestamp,
            amount,
            id: id.into(),
        }
    }

    /// Returns the record's timestamp.
    #[inline]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the record's signed amount.
    #[inline]
    pub const fn amount(&self) -> T {
        self.amount
    }

    /// Returns the record's identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Compares two records by timestamp alone, the order the windowing pass
    /// requires.
    ///
    /// Derived equality is structural (all three fields), so this sequencing
    /// order is exposed as a named comparator rather than an `Ord` impl.
    /// See [`crate::dataset::sort_by_timestamp`] for the matching sort.
    #[inline]
    pub fn cmp_timestamps(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}
