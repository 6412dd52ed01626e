use num_traits::Float;

use crate::{Alignment, Anchor, Error, Reducer, Result, Rolling, Span, Transaction, dataset};

/// Validated configuration for a rolling-window pass.
///
/// Width is checked at construction; anchor stride and (optionally) input
/// order are checked when a scan is started, so a configuration error can
/// never surface mid-pass.
///
/// # Examples
///
/// ```
/// use txn_windows::{RollingWindow, Transaction};
///
/// let records = vec![
///     Transaction::new("a", 1, 10.0),
///     Transaction::new("b", 2, 20.0),
///     Transaction::new("c", 3, 30.0),
/// ];
///
/// let windows = RollingWindow::new(3).unwrap();
/// let mut scan = windows.scan(&records).unwrap();
///
/// let step = scan.next().unwrap();
/// assert_eq!(step.anchor(), 1);
/// assert_eq!(step.entering().len(), 3);
/// assert_eq!(step.leaving().len(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingWindow {
    width: i64,
    anchor: Anchor,
    alignment: Alignment,
    check_sorted: bool,
}

impl RollingWindow {
    /// Creates a configuration with the given window width, the
    /// [`Anchor::EveryRecord`] policy, and [`Alignment::Leading`] placement.
    ///
    /// Input-order checking defaults to on in debug builds and off in release
    /// builds; see [`RollingWindow::check_sorted`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindowWidth`] if `width <= 0`.
    pub fn new(width: i64) -> Result<Self> {
        if width <= 0 {
            return Err(Error::InvalidWindowWidth(width));
        }
        Ok(Self {
            width,
            anchor: Anchor::EveryRecord,
            alignment: Alignment::Leading,
            check_sorted: cfg!(debug_assertions),
        })
    }

    /// Returns the window width.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.width
    }

    /// Sets the anchor-selection policy.
    #[inline]
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the window placement relative to its anchor.
    #[inline]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Forces input-order checking on or off.
    ///
    /// When on, [`RollingWindow::scan`] verifies the record sequence is
    /// ascending by timestamp and fails with [`Error::UnsortedInput`] before
    /// producing any step. When off, sorted input is an undocumented-results
    /// precondition: the scan will not detect violations and membership sets
    /// will be silently wrong.
    #[inline]
    pub const fn check_sorted(mut self, check: bool) -> Self {
        self.check_sorted = check;
        self
    }

    /// Starts a scan over `records`, which must be sorted ascending by
    /// timestamp.
    ///
    /// The scan borrows `records` read-only for the duration of the pass and
    /// never mutates it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStride`] for a non-positive fixed stride, and
    /// [`Error::UnsortedInput`] when checking is enabled and a timestamp is
    /// out of order.
    pub fn scan<'a, T: Float>(&self, records: &'a [Transaction<T>]) -> Result<WindowScan<'a, T>> {
        if let Anchor::FixedStride { stride, .. } = self.anchor {
            if stride <= 0 {
                return Err(Error::InvalidStride(stride));
            }
        }
        if self.check_sorted {
            dataset::ensure_sorted(records)?;
        }
        Ok(WindowScan {
            records,
            width: self.width,
            alignment: self.alignment,
            anchors: Anchors::new(self.anchor, records),
            lo: 0,
            hi: 0,
        })
    }

    /// Starts a scan and folds it with `reducer`, yielding one
    /// `(anchor, value)` pair per window position.
    ///
    /// # Errors
    ///
    /// Same as [`RollingWindow::scan`].
    pub fn aggregate<'a, T, R>(
        &self,
        records: &'a [Transaction<T>],
        reducer: R,
    ) -> Result<Rolling<'a, T, R>>
    where
        T: Float,
        R: Reducer<T>,
    {
        Ok(self.scan(records)?.aggregate(reducer))
    }
}

/// Internal anchor position generator; one yielded position per window.
#[derive(Debug, Clone)]
enum Anchors<'a, T> {
    /// One anchor per distinct record timestamp
    Records {
        records: &'a [Transaction<T>],
        pos: usize,
    },
    /// Anchors at fixed time steps through the dataset span
    Stride {
        next: i64,
        last: i64,
        stride: i64,
        exhausted: bool,
    },
}

impl<'a, T: Float> Anchors<'a, T> {
    fn new(policy: Anchor, records: &'a [Transaction<T>]) -> Self {
        match policy {
            Anchor::EveryRecord => Self::Records { records, pos: 0 },
            Anchor::FixedStride { start, stride } => {
                let first = records.first().map(Transaction::timestamp);
                let last = records.last().map(Transaction::timestamp);
                match (start.or(first), last) {
                    (Some(next), Some(last)) => Self::Stride {
                        next,
                        last,
                        stride,
                        exhausted: false,
                    },
                    _ => Self::Stride {
                        next: 0,
                        last: 0,
                        stride,
                        exhausted: true,
                    },
                }
            }
        }
    }
}

impl<T: Float> Iterator for Anchors<'_, T> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self {
            Self::Records { records, pos } => {
                let anchor = records.get(*pos)?.timestamp();
                *pos += 1;
                // Duplicate timestamps collapse to one anchor
                while records.get(*pos).map(Transaction::timestamp) == Some(anchor) {
                    *pos += 1;
                }
                Some(anchor)
            }
            Self::Stride {
                next,
                last,
                stride,
                exhausted,
            } => {
                if *exhausted || *next > *last {
                    *exhausted = true;
                    return None;
                }
                let anchor = *next;
                match next.checked_add(*stride) {
                    Some(n) => *next = n,
                    None => *exhausted = true,
                }
                Some(anchor)
            }
        }
    }
}

/// One step of a scan: the anchor, the window it places, and the membership
/// delta relative to the previous step.
///
/// `entering` and `leaving` are contiguous slices of the input sequence:
/// membership only ever changes by suffix addition at the high end and prefix
/// removal at the low end. `window` is the full membership slice after the
/// deltas are applied.
#[derive(Debug, Clone, Copy)]
pub struct WindowStep<'a, T> {
    anchor: i64,
    span: Span,
    entering: &'a [Transaction<T>],
    leaving: &'a [Transaction<T>],
    window: &'a [Transaction<T>],
}

impl<'a, T> WindowStep<'a, T> {
    /// Returns the anchor position this window was placed at.
    #[inline]
    pub const fn anchor(&self) -> i64 {
        self.anchor
    }

    /// Returns the half-open interval covered by this window.
    #[inline]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the records that entered the window at this step.
    #[inline]
    pub const fn entering(&self) -> &'a [Transaction<T>] {
        self.entering
    }

    /// Returns the records that left the window at this step, oldest first.
    #[inline]
    pub const fn leaving(&self) -> &'a [Transaction<T>] {
        self.leaving
    }

    /// Returns the full membership set of this window.
    #[inline]
    pub const fn window(&self) -> &'a [Transaction<T>] {
        self.window
    }

    /// Returns the number of records currently inside the window.
    #[inline]
    pub const fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns true if the window holds no records.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

/// Lazy single-pass iterator producing one [`WindowStep`] per anchor.
///
/// Two monotone indices (`lo`, first included; `hi`, one past last included)
/// advance through the sequence; neither ever moves backward, so each record
/// is visited at most twice across the whole pass regardless of the number of
/// windows. The pass is strictly sequential and not restartable: the indices
/// are step-dependent state. Stopping early is valid and releases the
/// borrowed sequence with no cleanup.
#[derive(Debug, Clone)]
pub struct WindowScan<'a, T> {
    records: &'a [Transaction<T>],
    width: i64,
    alignment: Alignment,
    anchors: Anchors<'a, T>,
    lo: usize,
    hi: usize,
}

impl<'a, T: Float> WindowScan<'a, T> {
    /// Folds this scan with `reducer`, yielding one `(anchor, value)` pair
    /// per window position.
    pub fn aggregate<R: Reducer<T>>(self, reducer: R) -> Rolling<'a, T, R> {
        Rolling::new(self, reducer)
    }
}

impl<'a, T: Float> Iterator for WindowScan<'a, T> {
    type Item = WindowStep<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let anchor = self.anchors.next()?;
        let span = Span::around(anchor, self.width, self.alignment);

        let prev_lo = self.lo;
        let prev_hi = self.hi;

        // Admit records below the new upper bound, then retire records below
        // the new lower bound. Records the window jumped clean over (between
        // prev_hi and the new lo) were never members and appear in neither
        // delta.
        while self.hi < self.records.len() && self.records[self.hi].timestamp() < span.upper() {
            self.hi += 1;
        }
        while self.lo < self.hi && self.records[self.lo].timestamp() < span.lower() {
            self.lo += 1;
        }

        Some(WindowStep {
            anchor,
            span,
            entering: &self.records[prev_hi.max(self.lo)..self.hi],
            leaving: &self.records[prev_lo..self.lo.min(prev_hi)],
            window: &self.records[self.lo..self.hi],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn records(rows: &[(i64, f64)]) -> Vec<Transaction<f64>> {
        rows.iter()
            .enumerate()
            .map(|(i, &(day, amount))| Transaction::new(format!("T{i:04}"), day, amount))
            .collect()
    }

    #[test]
    fn width_must_be_positive() {
        assert_eq!(RollingWindow::new(0), Err(Error::InvalidWindowWidth(0)));
        assert_eq!(RollingWindow::new(-5), Err(Error::InvalidWindowWidth(-5)));
        assert!(RollingWindow::new(1).is_ok());
    }

    #[test]
    fn stride_must_be_positive() {
        let rows = records(&[(1, 1.0)]);
        let failure = RollingWindow::new(3)
            .map(|w| w.anchor(Anchor::stride(0)).scan(&rows).err());
        assert_eq!(failure, Ok(Some(Error::InvalidStride(0))));
    }

    #[test]
    fn unsorted_input_is_rejected_before_any_step() {
        let rows = records(&[(5, 1.0), (3, 2.0), (9, 3.0)]);
        let failure = RollingWindow::new(2).map(|w| w.check_sorted(true).scan(&rows).err());
        assert_eq!(failure, Ok(Some(Error::UnsortedInput(1))));
    }

    #[test]
    fn per_record_deltas_follow_the_boundaries() {
        let rows = records(&[(1, 10.0), (2, 20.0), (3, 30.0), (10, 5.0), (11, 5.0)]);
        let windows = RollingWindow::new(3).map(|w| w.check_sorted(true));
        let steps: Vec<_> = windows
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.collect())
            .unwrap_or_default();

        let summary: Vec<_> = steps
            .iter()
            .map(|s| (s.anchor(), s.entering().len(), s.leaving().len(), s.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, 3, 0, 3),
                (2, 0, 1, 2),
                (3, 0, 1, 1),
                (10, 2, 1, 2),
                (11, 0, 1, 1),
            ]
        );
    }

    #[test]
    fn indices_are_monotonic_across_the_pass() {
        let rows = records(&[
            (1, 1.0),
            (1, 2.0),
            (4, 3.0),
            (6, 4.0),
            (6, 5.0),
            (9, 6.0),
            (15, 7.0),
        ]);
        let windows = RollingWindow::new(4);
        let Ok(mut scan) = windows.and_then(|w| w.scan(&rows)) else {
            panic!("scan failed");
        };

        let (mut last_lo, mut last_hi) = (0, 0);
        while let Some(step) = scan.next() {
            assert!(scan.lo >= last_lo, "lo moved backward");
            assert!(scan.hi >= last_hi, "hi moved backward");
            assert!(scan.lo <= scan.hi);
            assert_eq!(step.window().len(), scan.hi - scan.lo);
            last_lo = scan.lo;
            last_hi = scan.hi;
        }
    }

    #[test]
    fn duplicate_timestamps_collapse_to_one_anchor() {
        let rows = records(&[(1, 1.0), (1, 2.0), (1, 3.0), (2, 4.0)]);
        let anchors: Vec<_> = RollingWindow::new(2)
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.map(|s| s.anchor()).collect())
            .unwrap_or_default();
        assert_eq!(anchors, vec![1, 2]);
    }

    #[test]
    fn anchor_before_first_record_yields_an_empty_window() {
        let rows = records(&[(100, 1.0)]);
        let windows = RollingWindow::new(5).map(|w| {
            w.anchor(Anchor::FixedStride {
                start: Some(0),
                stride: 100,
            })
        });
        let steps: Vec<_> = windows
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.collect())
            .unwrap_or_default();

        assert_eq!(steps.len(), 2);
        assert!(steps[0].is_empty());
        assert_eq!(steps[1].anchor(), 100);
        assert_eq!(steps[1].len(), 1);
    }

    #[test]
    fn window_wider_than_span_holds_every_record() {
        let rows = records(&[(1, 1.0), (3, 2.0), (7, 3.0)]);
        let steps: Vec<_> = RollingWindow::new(1_000)
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.collect())
            .unwrap_or_default();

        assert_eq!(steps[0].len(), rows.len());
        assert!(steps.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn trailing_alignment_excludes_the_anchor_day() {
        // The five-day trailing windows of the original day-ledger layout:
        // anchor d covers [d - 5, d).
        let rows = records(&[(1, 1.0), (2, 2.0), (3, 3.0), (6, 6.0), (8, 8.0)]);
        let windows = RollingWindow::new(5).map(|w| {
            w.alignment(Alignment::Trailing).anchor(Anchor::FixedStride {
                start: Some(6),
                stride: 1,
            })
        });
        let steps: Vec<_> = windows
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.collect())
            .unwrap_or_default();

        let members: Vec<Vec<i64>> = steps
            .iter()
            .map(|s| s.window().iter().map(Transaction::timestamp).collect())
            .collect();
        assert_eq!(members, vec![vec![1, 2, 3], vec![2, 3, 6], vec![3, 6]]);
    }

    #[test]
    fn record_skipped_by_a_stride_jump_is_in_neither_delta() {
        // Stride jumps from 1 to 41; the records at 5 and 6 never belong to
        // any window and must not surface as entering or leaving.
        let rows = records(&[(1, 1.0), (5, 5.0), (6, 6.0), (41, 41.0)]);
        let windows = RollingWindow::new(2).map(|w| {
            w.anchor(Anchor::FixedStride {
                start: Some(1),
                stride: 40,
            })
        });
        let steps: Vec<_> = windows
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.collect())
            .unwrap_or_default();

        let touched: Vec<i64> = steps
            .iter()
            .flat_map(|s| s.entering().iter().chain(s.leaving().iter()))
            .map(Transaction::timestamp)
            .collect();
        assert_eq!(touched, vec![1, 41, 1]);
    }

    #[test]
    fn empty_input_produces_no_steps() {
        let rows: Vec<Transaction<f64>> = Vec::new();
        let count = RollingWindow::new(3)
            .and_then(|w| w.scan(&rows))
            .map(|scan| scan.count())
            .unwrap_or(usize::MAX);
        assert_eq!(count, 0);
    }
}
