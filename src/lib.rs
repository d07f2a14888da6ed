//! Five-field cron expression parser and time-zone aware next-runs projector.
#![deny(unsafe_code, missing_docs)]

//! This crate is intended to:
//! - parse classic five-field cron expressions into a queryable form;
//! - check whether a zoned calendar instant matches the schedule;
//! - project the next fire times of a schedule in any IANA time zone, correctly across DST changes.
//!
//! _This is not a cron jobs scheduler or runner._
//!
//! ## Cron expression format
//!
//! An expression has exactly five whitespace separated fields: minutes, hours, days of month, months and days of week.
//!
//! | Field        | Allowed values           | Allowed special characters |
//! |--------------|--------------------------|----------------------------|
//! | Minutes      | 0-59                     | * ? , - /                  |
//! | Hours        | 0-23                     | * ? , - /                  |
//! | Day of Month | 1-31                     | * ? , - /                  |
//! | Month        | 1-12 or JAN-DEC          | * ? , - /                  |
//! | Day of Week  | 0-6 (or 7) or SUN-SAT    | * ? , - /                  |
//!
//! Patterns meanings:
//! - `*` or `?` - any value; if a list contains it, the whole field is unconstrained;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - inclusive range of values, i.e. `0-15`, `JAN-MAR`; descending ranges like `22-2` are rejected;
//! - `/` - step, i.e. `*/12`, `30-59/2`; note that `10/5` means just `10`, there is no implicit end of the range;
//! - names are case-insensitive; both `0` and `7` mean Sunday.
//!
//! When both day of month and day of week are restricted, a day matches if **either** of them matches
//! (`0 0 15 * MON` fires on the 15th and on every Monday).
//! When only one of them is restricted, it alone decides.
//!
//! ## How to use
//!
//! The central entity of the crate is a [`CronSchedule`] structure:
//! - [new()](CronSchedule::new) (or [`parse_cron_expression`]): parses and validates the expression;
//! - [matches()](CronSchedule::matches): checks a [`ZonedInstant`] against the schedule;
//! - [iter()](CronSchedule::iter): returns an `Iterator` of fire times in the specified time zone;
//! - [describe()](CronSchedule::describe): returns human-readable description of the schedule.
//!
//! ### Example with `get_next_runs`
//! ```rust
//! use chrono::{DateTime, Utc};
//! use cron_forecast::{get_next_runs, parse_cron_expression, NextRunsOptions, Result};
//!
//! fn next_runs() -> Result<()> {
//!     let schedule = parse_cron_expression("0 9 * * 1-5")?;
//!     let start = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc);
//!     let options = NextRunsOptions::new(3, "America/New_York").starting_at(start);
//!
//!     let runs = get_next_runs(&schedule, &options);
//!     assert_eq!(runs.len(), 3);
//!     assert_eq!(runs[0].to_rfc3339(), "2024-01-01T14:00:00+00:00");
//!
//!     Ok(())
//! }
//! # next_runs().unwrap();
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use chrono::Utc;
//! use cron_forecast::{CronSchedule, Result};
//!
//! fn iterator() -> Result<()> {
//!     let schedule = CronSchedule::new("*/15 * * * *")?;
//!     let now = Utc::now();
//!
//!     // Get the next 10 timestamps starting from now
//!     schedule.iter(&now, "Europe/Kyiv").take(10).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # iterator().unwrap();
//! ```
//!
//! The projection walks forward minute by minute and gives up after [`MAX_ITERATIONS`] minutes,
//! so a schedule that can't fire (like `0 0 30 2 *`) yields fewer results than requested, possibly none.
//! This is not an error: always check the length of the result.
//!
//! Unknown time zone names are treated as UTC.
//! A custom [`ZoneDecomposer`] may be provided via [`get_next_runs_with`] or [`CronSchedule::iter_with`].
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and
//!   [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`CronSchedule`],
//!   it's serialized as a canonical expression string.

/// Human-readable schedule description.
pub mod describe;
/// Crate specific Error implementation.
pub mod error;
/// Single field parser.
pub mod field;
/// Next fire times projection.
pub mod projector;
/// Cron expression parser and matcher.
pub mod schedule;
mod series;
mod utils;
/// Time zone decomposition of instants.
pub mod zone;

// Re-export of public entities.
pub use error::CronError;
pub use field::{parse_field, CronField, CronSegment, FieldKind, FieldValue};
pub use projector::{get_next_runs, get_next_runs_with, NextRuns, NextRunsOptions, MAX_ITERATIONS};
pub use schedule::{parse_cron_expression, CronSchedule};
pub use zone::{TzDecomposer, ZoneCache, ZoneDecomposer, ZonedInstant};

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
