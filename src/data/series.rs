use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use polars::prelude::*;

use crate::constants::datetime::WORLD_TIME_START;
use crate::constants::series::{COUNT_END, COUNT_START, TIME_START, TIME_STEP, TIME_STOP};
use crate::error::{FixtureError, Result};

/// Half-open arithmetic range `[start, stop)`
///
/// Elements are computed as `start + i * step` rather than by accumulation so
/// the last values carry no rounding drift.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step == 0.0 || !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Vec::new();
    }
    let len = ((stop - start) / step).ceil();
    if len <= 0.0 {
        return Vec::new();
    }
    (0..len as usize).map(|i| start + i as f64 * step).collect()
}

/// Inclusive integer counter `start..=end`
pub fn counter(name: &str, start: i64, end: i64) -> Series {
    let values: Vec<i64> = (start..=end).collect();
    Series::new(name.into(), values)
}

/// Zero-based row counter `0..len`
pub fn row_counter(name: &str, len: usize) -> Series {
    let values: Vec<i64> = (0..len as i64).collect();
    Series::new(name.into(), values)
}

/// `time`: 1.0, 1.5, ..., 10.5
pub fn time_series() -> Series {
    Series::new("time".into(), arange(TIME_START, TIME_STOP, TIME_STEP))
}

/// `count`: 1, 2, ..., 10
pub fn count_series() -> Series {
    counter("count", COUNT_START, COUNT_END)
}

/// Derive a float series element-wise; integer sources are promoted to f64
pub fn map_f64(source: &Series, name: &str, f: impl Fn(f64) -> f64) -> Result<Series> {
    let as_f64 = source.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = as_f64.f64()?.into_iter().map(|v| v.map(&f)).collect();
    Ok(Series::new(name.into(), values))
}

/// Multiply an integer series by a constant
pub fn scale_i64(source: &Series, name: &str, factor: i64) -> Result<Series> {
    let as_i64 = source.cast(&DataType::Int64)?;
    let values: Vec<Option<i64>> = as_i64
        .i64()?
        .into_iter()
        .map(|v| v.map(|v| v * factor))
        .collect();
    Ok(Series::new(name.into(), values))
}

/// Element-wise product of two integer series of equal length
pub fn elementwise_product(a: &Series, b: &Series, name: &str) -> Result<Series> {
    if a.len() != b.len() {
        return Err(FixtureError::ShapeMismatch {
            column: b.name().to_string(),
            expected: a.len(),
            actual: b.len(),
        });
    }
    let a = a.cast(&DataType::Int64)?;
    let b = b.cast(&DataType::Int64)?;
    let values: Vec<Option<i64>> = a
        .i64()?
        .into_iter()
        .zip(b.i64()?.into_iter())
        .map(|(x, y)| Some(x? * y?))
        .collect();
    Ok(Series::new(name.into(), values))
}

/// Start of the world-time series
pub fn world_time_start() -> Result<NaiveDateTime> {
    let (year, month, day, hour, minute, second) = WORLD_TIME_START;
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| FixtureError::Config("invalid world time start".to_string()))
}

/// `len` timestamps one second apart, as a millisecond Datetime series
pub fn world_time(name: &str, start: NaiveDateTime, len: usize) -> Result<Series> {
    let millis: Vec<i64> = (0..len as i64)
        .map(|i| (start + TimeDelta::seconds(i)).and_utc().timestamp_millis())
        .collect();
    let series = Series::new(name.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    Ok(series)
}
