//! The ordered list of fixtures a generation run produces.
//!
//! Each [`FixtureSpec`] pairs a frame recipe with the dialect it is written
//! in and the mutations applied afterwards. Order matters only where two
//! entries target the same file: the later one wins.

use polars::prelude::*;
use serde::Serialize;
use std::f64::consts::PI;

use crate::config::{GeneratorConfig, WorldTimeTarget};
use crate::constants::datetime::WORLD_TIME_LEN;
use crate::constants::mutation::{BANNER, LATE_ROW, SPLICE_OFFSET, SPLICE_TEXT};
use crate::constants::series::{COUNT_END, COUNT_START, LATE_COUNT_END};
use crate::data::FrameBuilder;
use crate::data::series::{
    count_series, counter, elementwise_product, map_f64, row_counter, scale_i64, time_series,
    world_time, world_time_start,
};
use crate::dialect::{Dialect, LineEnding};
use crate::error::{FixtureError, Result};
use crate::postprocess::Mutation;

/// How a fixture's frame is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRecipe {
    /// time, cos, sin, cos_t, sin_t
    SinCos,
    /// time, squared
    Squared,
    /// time, count (zero-based row counter)
    TimeCount,
    /// counter, double
    CounterDouble,
    /// counter, double_and_half
    CounterDoubleAndHalf,
    /// epoch's, the double, speed [m/s]
    HardNames,
    /// time and equal, both 1..=end
    EqualCount { end: i64 },
    /// timestamp, count with the second `count` collapsing onto the first
    WorldTimeCollapsed,
    /// timestamp, count, count_squared
    WorldTimeStandalone,
}

impl FrameRecipe {
    pub fn build(&self) -> Result<DataFrame> {
        profiling::scope!("build_frame");
        match self {
            FrameRecipe::SinCos => {
                let time = time_series();
                let cos = map_f64(&time, "cos", f64::cos)?;
                let sin = map_f64(&time, "sin", f64::sin)?;
                let cos_t = map_f64(&time, "cos_t", |t| t * t.cos())?;
                let sin_t = map_f64(&time, "sin_t", |t| t * t.sin())?;
                FrameBuilder::new()
                    .column(time)
                    .column(cos)
                    .column(sin)
                    .column(cos_t)
                    .column(sin_t)
                    .build()
            }
            FrameRecipe::Squared => {
                let time = time_series();
                let squared = map_f64(&time, "squared", |t| t * t)?;
                FrameBuilder::new().column(time).column(squared).build()
            }
            FrameRecipe::TimeCount => {
                let time = time_series();
                let count = row_counter("count", time.len());
                FrameBuilder::new().column(time).column(count).build()
            }
            FrameRecipe::CounterDouble => {
                let count = count_series().with_name("counter".into());
                let double = scale_i64(&count, "double", 2)?;
                FrameBuilder::new().column(count).column(double).build()
            }
            FrameRecipe::CounterDoubleAndHalf => {
                let count = count_series().with_name("counter".into());
                let half = map_f64(&count, "double_and_half", |c| c * 2.5)?;
                FrameBuilder::new().column(count).column(half).build()
            }
            FrameRecipe::HardNames => {
                let count = count_series();
                FrameBuilder::new()
                    .column(count.clone().with_name("epoch's".into()))
                    .column(scale_i64(&count, "the double", 2)?)
                    .column(map_f64(&count, "speed [m/s]", |c| c * PI)?)
                    .build()
            }
            FrameRecipe::EqualCount { end } => FrameBuilder::new()
                .column(counter("time", COUNT_START, *end))
                .column(counter("equal", COUNT_START, *end))
                .build(),
            FrameRecipe::WorldTimeCollapsed => {
                let timestamp = world_time("timestamp", world_time_start()?, WORLD_TIME_LEN)?;
                let count = row_counter("count", timestamp.len());
                let squares = elementwise_product(&count, &count, "count")?;
                FrameBuilder::new()
                    .column(timestamp)
                    .column(count)
                    .column(squares)
                    .build()
            }
            FrameRecipe::WorldTimeStandalone => {
                let timestamp = world_time("timestamp", world_time_start()?, WORLD_TIME_LEN)?;
                let count = row_counter("count", timestamp.len());
                let squares = elementwise_product(&count, &count, "count_squared")?;
                FrameBuilder::new()
                    .column(timestamp)
                    .column(count)
                    .column(squares)
                    .build()
            }
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureSpec {
    pub id: String,
    pub file_name: String,
    pub recipe: FrameRecipe,
    pub dialect: Dialect,
    pub mutations: Vec<Mutation>,
}

impl FixtureSpec {
    fn new(id: &str, recipe: FrameRecipe, dialect: Dialect) -> Self {
        Self {
            id: id.to_string(),
            file_name: format!("{id}.csv"),
            recipe,
            dialect,
            mutations: Vec::new(),
        }
    }

    fn written_to(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    fn then(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    /// `name` may be the id or the file name
    pub fn matches(&self, name: &str) -> bool {
        self.id == name || self.file_name == name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureCatalog {
    pub fixtures: Vec<FixtureSpec>,
}

impl FixtureCatalog {
    /// The full fixture set, in generation order
    pub fn standard(config: &GeneratorConfig) -> Self {
        let csv = Dialect::csv(config.line_ending);

        let world_time = match config.world_time_target {
            WorldTimeTarget::ChangingType => {
                FixtureSpec::new("world_time", FrameRecipe::WorldTimeCollapsed, csv)
                    .written_to("changing_type.csv")
            }
            WorldTimeTarget::Standalone => {
                FixtureSpec::new("world_time", FrameRecipe::WorldTimeStandalone, csv)
            }
        };

        let fixtures = vec![
            FixtureSpec::new("sincos", FrameRecipe::SinCos, csv),
            FixtureSpec::new("squared", FrameRecipe::Squared, csv),
            FixtureSpec::new("123", FrameRecipe::TimeCount, csv),
            FixtureSpec::new("custom_header", FrameRecipe::TimeCount, csv)
                .then(Mutation::prepend_banner(&BANNER)),
            FixtureSpec::new(
                "custom_header_linux_ending",
                FrameRecipe::TimeCount,
                csv.with_line_ending(LineEnding::Lf),
            )
            .then(Mutation::prepend_banner(&BANNER)),
            FixtureSpec::new("dotsep", FrameRecipe::TimeCount, csv.with_delimiter('.')),
            FixtureSpec::new("notimename", FrameRecipe::CounterDouble, csv),
            FixtureSpec::new("withindex", FrameRecipe::CounterDouble, csv.with_index()),
            FixtureSpec::new(
                "excel_comma",
                FrameRecipe::CounterDoubleAndHalf,
                csv.with_delimiter(';').with_decimal_mark(','),
            ),
            FixtureSpec::new("hardnames", FrameRecipe::HardNames, csv),
            FixtureSpec::new("changing_type", FrameRecipe::EqualCount { end: COUNT_END }, csv)
                .then(Mutation::splice(SPLICE_OFFSET, SPLICE_TEXT)),
            FixtureSpec::new(
                "changing_type_late",
                FrameRecipe::EqualCount {
                    end: LATE_COUNT_END,
                },
                csv,
            )
            .then(Mutation::append_row(LATE_ROW)),
            world_time,
        ];

        Self { fixtures }
    }

    /// Keep only the entries named in `only`; empty keeps everything
    pub fn select(self, only: &[String]) -> Result<Self> {
        if only.is_empty() {
            return Ok(self);
        }
        if let Some(unknown) = only
            .iter()
            .find(|name| !self.fixtures.iter().any(|f| f.matches(name)))
        {
            return Err(FixtureError::UnknownFixture {
                name: unknown.clone(),
            });
        }
        let fixtures = self
            .fixtures
            .into_iter()
            .filter(|f| only.iter().any(|name| f.matches(name)))
            .collect();
        Ok(Self { fixtures })
    }

    /// One `id -> file (mutations)` line per entry
    pub fn describe_lines(&self) -> Vec<String> {
        self.fixtures
            .iter()
            .map(|spec| {
                let mutations: Vec<String> = spec.mutations.iter().map(|m| m.describe()).collect();
                if mutations.is_empty() {
                    format!("{} -> {}", spec.id, spec.file_name)
                } else {
                    format!("{} -> {} ({})", spec.id, spec.file_name, mutations.join(", "))
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
