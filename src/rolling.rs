use num_traits::Float;

use crate::{Reducer, WindowScan};

/// Iterator adapter folding scan deltas into a running aggregate.
///
/// For each window position the engine applies [`Reducer::exclude`] to every
/// leaving record and then [`Reducer::include`] to every entering record, and
/// emits the accumulator value tagged with the anchor. Exclude-before-include
/// keeps the magnitude of a compensated running sum from growing past the
/// union of the two windows, bounding rounding error accumulation.
///
/// The emitted value for an anchor reflects exactly the records whose
/// timestamps fall inside that window's span, no matter how many windows were
/// processed before it. The engine is purely reactive: the scan drives
/// advancement, and stopping early is valid.
///
/// # Examples
///
/// ```
/// use txn_windows::{RollingSum, RollingWindow, Transaction};
///
/// let records = vec![
///     Transaction::new("a", 1, 10.0),
///     Transaction::new("b", 2, 20.0),
///     Transaction::new("c", 3, 30.0),
///     Transaction::new("d", 10, 5.0),
///     Transaction::new("e", 11, 5.0),
/// ];
///
/// let windows = RollingWindow::new(3).unwrap();
/// let sums: Vec<_> = windows
///     .aggregate(&records, RollingSum::new())
///     .unwrap()
///     .collect();
///
/// assert_eq!(
///     sums,
///     vec![(1, 60.0), (2, 50.0), (3, 30.0), (10, 10.0), (11, 5.0)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Rolling<'a, T, R> {
    scan: WindowScan<'a, T>,
    reducer: R,
}

impl<'a, T, R> Rolling<'a, T, R> {
    /// Wraps a scan with a reducer.
    pub(crate) const fn new(scan: WindowScan<'a, T>, reducer: R) -> Self {
        Self { scan, reducer }
    }

    /// Returns the reducer in its current state.
    #[inline]
    pub const fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Consumes the engine, returning the reducer.
    #[inline]
    pub fn into_reducer(self) -> R {
        self.reducer
    }
}

impl<T, R> Iterator for Rolling<'_, T, R>
where
    T: Float,
    R: Reducer<T>,
{
    type Item = (i64, R::Output);

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.scan.next()?;
        for record in step.leaving() {
            self.reducer.exclude(record);
        }
        for record in step.entering() {
            self.reducer.include(record);
        }
        Some((step.anchor(), self.reducer.value()))
    }
}
