use num_traits::Float;

use crate::{Kbn, Reducer, Transaction};

/// Running total of the amounts inside the window.
///
/// Sums are kept with Kahan-Babuska-Neumaier compensated summation so that
/// the include/exclude churn of a long pass does not accumulate
/// floating-point error the way a bare `+=`/`-=` pair would. An empty window
/// totals zero.
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
///     Transaction::new("d", 4, 40.0),
/// ];
///
/// let windows = RollingWindow::new(3).unwrap();
/// let sums: Vec<f64> = windows
///     .aggregate(&records, RollingSum::new())
///     .unwrap()
///     .map(|(_, sum)| sum)
///     .collect();
///
/// assert_eq!(sums, vec![60.0, 90.0, 70.0, 40.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RollingSum<T: Float> {
    /// Compensated running total
    sum: Kbn<T>,
}

impl<T: Float + Default> RollingSum<T> {
    /// Creates an empty running sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the accumulator.
    pub fn reset(&mut self) -> &mut Self {
        self.sum = Kbn::default();
        self
    }
}

impl<T: Float + Default> Reducer<T> for RollingSum<T> {
    type Output = T;

    #[inline]
    fn include(&mut self, record: &Transaction<T>) {
        self.sum += record.amount();
    }

    #[inline]
    fn exclude(&mut self, record: &Transaction<T>) {
        self.sum -= record.amount();
    }

    #[inline]
    fn value(&self) -> T {
        self.sum.total()
    }
}
