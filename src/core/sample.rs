use std::fmt::Debug;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Numeric sample type a series can carry.
///
/// The engine treats samples as opaque values: the only thing it needs is a
/// scene-space `f64` projection. `to_scene` returns `None` for values without a
/// finite projection; those are skipped when computing extents and split line
/// strips when rendering.
pub trait Sample: Copy + Debug + PartialOrd + Send + Sync + 'static {
    fn to_scene(self) -> Option<f64>;
}

macro_rules! impl_lossless_sample {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sample for $ty {
                fn to_scene(self) -> Option<f64> {
                    Some(f64::from(self)).filter(|value| value.is_finite())
                }
            }
        )*
    };
}

impl_lossless_sample!(i16, i32, f32);

impl Sample for i64 {
    fn to_scene(self) -> Option<f64> {
        Some(self as f64)
    }
}

impl Sample for f64 {
    fn to_scene(self) -> Option<f64> {
        self.is_finite().then_some(self)
    }
}

impl Sample for Decimal {
    fn to_scene(self) -> Option<f64> {
        self.to_f64().filter(|value| value.is_finite())
    }
}

/// Finite `(min, max)` over the scene projection of `samples`.
#[must_use]
pub fn sample_range<S: Sample>(samples: &[S]) -> Option<(f64, f64)> {
    samples
        .iter()
        .filter_map(|sample| sample.to_scene())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
