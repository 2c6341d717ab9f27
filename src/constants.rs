//! Fixture constants and default values
//!
//! This module centralizes the literal ranges, banner text and mutation
//! parameters that shape the generated fixtures.

/// Series ranges
pub mod series {
    /// First `time` value
    pub const TIME_START: f64 = 1.0;

    /// `time` stops before this value (half-open range)
    pub const TIME_STOP: f64 = 11.0;

    /// `time` step
    pub const TIME_STEP: f64 = 0.5;

    /// First `count` value
    pub const COUNT_START: i64 = 1;

    /// Last `count` value (inclusive)
    pub const COUNT_END: i64 = 10;

    /// Last row of the long integer column in `changing_type_late.csv`
    pub const LATE_COUNT_END: i64 = 198;
}

/// Timestamp series
pub mod datetime {
    /// World time start: 2019-11-20T13:37:00
    pub const WORLD_TIME_START: (i32, u32, u32, u32, u32, u32) = (2019, 11, 20, 13, 37, 0);

    /// Number of one-second samples
    pub const WORLD_TIME_LEN: usize = 30;

    /// ISO-8601 rendering without fractional seconds
    pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    /// ISO-8601 rendering with microseconds
    pub const ISO_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";
}

/// Post-processing parameters
pub mod mutation {
    /// Junk lines prepended to `custom_header.csv`
    pub const BANNER: [&str; 4] = ["this is a custom", "header which", "should not", "be parsed"];

    /// Character offset of the `changing_type.csv` splice
    pub const SPLICE_OFFSET: usize = 20;

    /// Text inserted by the splice
    pub const SPLICE_TEXT: &str = ".14";

    /// Row appended to `changing_type_late.csv`
    pub const LATE_ROW: &str = "199,199.1";
}

/// Configuration file paths
pub mod config {
    /// Configuration file name looked up in the working directory
    pub const CONFIG_FILE: &str = "csv-fixtures.json";

    /// Default filter for `RUST_LOG`-less runs
    pub const DEFAULT_LOG_FILTER: &str = "info";

    /// Where captured puffin frames are saved
    #[cfg(feature = "profile-with-puffin")]
    pub const PROFILE_FILE: &str = "csv-fixtures.puffin";
}
