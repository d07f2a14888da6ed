use crate::{
    schedule::CronSchedule,
    zone::{TzDecomposer, ZoneDecomposer},
};
use chrono::{DateTime, TimeDelta, Timelike, Utc};

/// Maximum number of minutes the projector checks before giving up, about 416 days.
pub const MAX_ITERATIONS: usize = 600_000;

/// Default number of runs in [`NextRunsOptions::default`].
pub const DEFAULT_COUNT: usize = 5;

/// Parameters of the next runs projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NextRunsOptions {
    /// Number of fire times to collect.
    pub count: usize,
    /// IANA name of the zone the schedule is evaluated in; unknown names mean UTC.
    pub time_zone: String,
    /// Start of the projection, current time if `None`.
    pub start: Option<DateTime<Utc>>,
}

impl NextRunsOptions {
    /// Options to collect `count` runs in `time_zone` starting from now.
    pub fn new(count: usize, time_zone: impl Into<String>) -> Self {
        Self {
            count,
            time_zone: time_zone.into(),
            start: None,
        }
    }

    /// Sets explicit start of the projection.
    pub fn starting_at(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }
}

impl Default for NextRunsOptions {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT, "UTC")
    }
}

/// Returns up to `options.count` fire times of the `schedule`, in ascending order.
///
/// The result is shorter than requested (possibly empty) if the schedule
/// doesn't fire often enough within [`MAX_ITERATIONS`] minutes from the start.
///
/// Every call resolves the zone with a fresh [`TzDecomposer`], so an unknown zone is reported on each call.
/// Use [`get_next_runs_with`] and a long-lived decomposer to share resolved zones between projections.
pub fn get_next_runs(schedule: &CronSchedule, options: &NextRunsOptions) -> Vec<DateTime<Utc>> {
    get_next_runs_with(schedule, options, TzDecomposer::new())
}

/// Same as [`get_next_runs`], with a caller provided zone decomposition service.
pub fn get_next_runs_with<D: ZoneDecomposer>(
    schedule: &CronSchedule,
    options: &NextRunsOptions,
    decomposer: D,
) -> Vec<DateTime<Utc>> {
    let start = options.start.unwrap_or_else(Utc::now);
    let runs: Vec<_> = NextRuns::new(schedule, decomposer, &start, options.time_zone.as_str())
        .take(options.count)
        .collect();

    if runs.len() < options.count {
        tracing::debug!(
            schedule = %schedule,
            time_zone = %options.time_zone,
            requested = options.count,
            found = runs.len(),
            "next runs search horizon exhausted"
        );
    }

    runs
}

/// Iterator over fire times of a schedule.
///
/// Walks forward minute by minute, re-decomposing every candidate in the target zone,
/// and stops for good after [`MAX_ITERATIONS`] candidates.
#[derive(Debug, Clone)]
pub struct NextRuns<'a, D> {
    schedule: &'a CronSchedule,
    decomposer: D,
    time_zone: String,
    cursor: Option<DateTime<Utc>>,
    remaining: usize,
}

impl<'a, D: ZoneDecomposer> NextRuns<'a, D> {
    /// Creates iterator starting from `start` truncated to the whole minute (inclusively).
    pub fn new(
        schedule: &'a CronSchedule,
        decomposer: D,
        start: &DateTime<Utc>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            schedule,
            decomposer,
            time_zone: time_zone.into(),
            cursor: Some(truncate_to_minute(start)),
            remaining: MAX_ITERATIONS,
        }
    }

    /// Number of candidate minutes left before the iterator gives up.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<D: ZoneDecomposer> Iterator for NextRuns<'_, D> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let current = self.cursor?;
            self.remaining -= 1;
            self.cursor = current.checked_add_signed(TimeDelta::minutes(1));

            let zoned = self.decomposer.decompose(&current, &self.time_zone);
            if self.schedule.matches(&zoned) {
                return Some(current);
            }
        }

        None
    }
}

fn truncate_to_minute(dt: &DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0)
        .and_then(|dt| dt.with_second(0))
        .unwrap_or(*dt)
}
