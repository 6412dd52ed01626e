use crate::Transaction;

/// An incremental aggregate over the records currently inside a window.
///
/// The aggregation engine drives a reducer with exactly two mutations:
/// [`Reducer::exclude`] for every record leaving the window, then
/// [`Reducer::include`] for every record entering it, after which
/// [`Reducer::value`] is emitted for the window position. Excludes arrive
/// oldest-first and only for records previously included, mirroring the
/// prefix-removal order of the scan.
///
/// Implementations must make `include` followed by `exclude` of the same
/// record a no-op on the observable value, within floating-point tolerance.
/// (The extremes reducers are the documented exception: they additionally
/// rely on the engine's oldest-first exclusion order.)
///
/// # Examples
///
/// A custom reducer counting credits against debits in the current window:
///
/// ```
/// use txn_windows::{Reducer, Transaction};
///
/// #[derive(Default)]
/// struct NetDirection {
///     credits: usize,
///     debits: usize,
/// }
///
/// impl Reducer<f64> for NetDirection {
///     type Output = isize;
///
///     fn include(&mut self, record: &Transaction<f64>) {
///         if record.amount() >= 0.0 {
///             self.credits += 1;
///         } else {
///             self.debits += 1;
///         }
///     }
///
///     fn exclude(&mut self, record: &Transaction<f64>) {
///         if record.amount() >= 0.0 {
///             self.credits -= 1;
///         } else {
///             self.debits -= 1;
///         }
///     }
///
///     fn value(&self) -> isize {
///         self.credits as isize - self.debits as isize
///     }
/// }
/// ```
pub trait Reducer<T> {
    /// Value emitted once per window position.
    type Output;

    /// Folds a record entering the window into the accumulator.
    fn include(&mut self, record: &Transaction<T>);

    /// Removes a record leaving the window from the accumulator.
    fn exclude(&mut self, record: &Transaction<T>);

    /// Returns the current accumulator value.
    fn value(&self) -> Self::Output;
}
