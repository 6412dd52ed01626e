#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

#[cfg_attr(test, macro_use)]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod error;
pub use error::{Error, Result};

mod record;
pub use record::Transaction;

mod window;
pub use window::{Alignment, Anchor, Span};

mod scan;
pub use scan::{RollingWindow, WindowScan, WindowStep};

mod traits;
pub use traits::Reducer;

mod rolling;
pub use rolling::Rolling;

mod sum;
pub use sum::RollingSum;

mod count;
pub use count::RollingCount;

mod mean;
pub use mean::RollingMean;

mod moments;
pub use moments::{Moments, RollingMoments};

mod extremes;
pub use extremes::{Extreme, Max, Min, OrderPolicy, RollingMax, RollingMin};

pub mod dataset;
