use crate::{
    describe,
    field::{CronField, FieldKind},
    projector::{self, NextRuns, NextRunsOptions},
    zone::{TzDecomposer, ZoneDecomposer, ZonedInstant},
    CronError, Result,
};
use chrono::{DateTime, Utc};
use std::{fmt::Display, str::FromStr};

/// Compiled five-field cron schedule.
///
/// For the expression syntax, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct CronSchedule {
    minute: CronField,
    hour: CronField,
    day_of_month: CronField,
    month: CronField,
    day_of_week: CronField,
}

/// Parses and validates cron `expression`, see [`CronSchedule::new`].
#[inline]
pub fn parse_cron_expression(expression: &str) -> Result<CronSchedule> {
    CronSchedule::new(expression)
}

impl CronSchedule {
    /// Parses and validates provided `expression` and constructs [`CronSchedule`] instance.
    ///
    /// Alternative way to construct [`CronSchedule`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable:
    /// [`CronError::MalformedExpression`] if it doesn't consist of exactly five fields,
    /// or the error of the first invalid field.
    pub fn new(expression: impl AsRef<str>) -> Result<Self> {
        let expression = expression.as_ref();
        let elements: Vec<&str> = expression.split_whitespace().collect();

        if elements.len() != 5 {
            return Err(CronError::MalformedExpression(format!(
                "expected 5 fields, found {} in '{}'",
                elements.len(),
                expression.trim()
            )));
        }

        let schedule = Self {
            minute: CronField::parse(FieldKind::Minute, elements[0])?,
            hour: CronField::parse(FieldKind::Hour, elements[1])?,
            day_of_month: CronField::parse(FieldKind::DayOfMonth, elements[2])?,
            month: CronField::parse(FieldKind::Month, elements[3])?,
            day_of_week: CronField::parse(FieldKind::DayOfWeek, elements[4])?,
        };

        tracing::trace!(expression, schedule = %schedule, "parsed cron expression");

        Ok(schedule)
    }

    /// Minutes field.
    #[inline]
    pub fn minute(&self) -> &CronField {
        &self.minute
    }

    /// Hours field.
    #[inline]
    pub fn hour(&self) -> &CronField {
        &self.hour
    }

    /// Day of month field.
    #[inline]
    pub fn day_of_month(&self) -> &CronField {
        &self.day_of_month
    }

    /// Months field.
    #[inline]
    pub fn month(&self) -> &CronField {
        &self.month
    }

    /// Day of week field.
    #[inline]
    pub fn day_of_week(&self) -> &CronField {
        &self.day_of_week
    }

    /// Field by its kind.
    pub fn field(&self, kind: FieldKind) -> &CronField {
        match kind {
            FieldKind::Minute => &self.minute,
            FieldKind::Hour => &self.hour,
            FieldKind::DayOfMonth => &self.day_of_month,
            FieldKind::Month => &self.month,
            FieldKind::DayOfWeek => &self.day_of_week,
        }
    }

    /// Returns `true` if the zoned instant satisfies the schedule.
    ///
    /// Seconds are ignored. When both day of month and day of week are restricted,
    /// the day matches if **either** of them matches; when only one is restricted, it alone decides.
    pub fn matches(&self, zoned: &ZonedInstant) -> bool {
        self.minute.matches(zoned.minute)
            && self.hour.matches(zoned.hour)
            && self.month.matches(zoned.month)
            && self.matches_day(zoned)
    }

    fn matches_day(&self, zoned: &ZonedInstant) -> bool {
        let dom_match = self.day_of_month.matches(zoned.day);
        let dow_match = self.day_of_week.matches(zoned.weekday);

        match (self.day_of_month.is_any(), self.day_of_week.is_any()) {
            (true, true) => true,
            (true, false) => dow_match,
            (false, true) => dom_match,
            (false, false) => dom_match || dow_match,
        }
    }

    /// Returns iterator of fire times starting from `start` (inclusively, truncated to the whole minute)
    /// as observed in the IANA `time_zone`.
    ///
    /// The iterator ends after [`MAX_ITERATIONS`](crate::MAX_ITERATIONS) checked minutes.
    #[inline]
    pub fn iter(&self, start: &DateTime<Utc>, time_zone: impl Into<String>) -> NextRuns<'_, TzDecomposer> {
        NextRuns::new(self, TzDecomposer::new(), start, time_zone)
    }

    /// Same as [`iter`](Self::iter), but with a caller provided zone decomposition service.
    #[inline]
    pub fn iter_with<D: ZoneDecomposer>(
        &self,
        decomposer: D,
        start: &DateTime<Utc>,
        time_zone: impl Into<String>,
    ) -> NextRuns<'_, D> {
        NextRuns::new(self, decomposer, start, time_zone)
    }

    /// Returns time of the upcoming fire time starting from the provided `start` (inclusively).
    ///
    /// Returns `None` if nothing matches within the safety horizon.
    #[inline]
    pub fn upcoming(&self, start: &DateTime<Utc>, time_zone: impl Into<String>) -> Option<DateTime<Utc>> {
        self.iter(start, time_zone).next()
    }

    /// Returns up to `options.count` upcoming fire times, see [`get_next_runs`](crate::get_next_runs).
    #[inline]
    pub fn next_runs(&self, options: &NextRunsOptions) -> Vec<DateTime<Utc>> {
        projector::get_next_runs(self, options)
    }

    /// Human-readable English description of the schedule.
    #[inline]
    pub fn describe(&self) -> String {
        describe::describe(self)
    }
}

impl From<CronSchedule> for String {
    fn from(value: CronSchedule) -> Self {
        value.to_string()
    }
}

impl From<&CronSchedule> for String {
    fn from(value: &CronSchedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CronSchedule {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for CronSchedule {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CronSchedule {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for CronSchedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for CronSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}
