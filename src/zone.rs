use crate::field::FieldValue;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// Calendar decomposition of an instant in a particular time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZonedInstant {
    /// Calendar year.
    pub year: i32,
    /// Month, `1-12`.
    pub month: FieldValue,
    /// Day of month, `1-31`.
    pub day: FieldValue,
    /// Hour, `0-23`.
    pub hour: FieldValue,
    /// Minute, `0-59`.
    pub minute: FieldValue,
    /// Second, `0-59`.
    pub second: FieldValue,
    /// Day of week, `0-6`, Sunday is `0`.
    pub weekday: FieldValue,
}

impl ZonedInstant {
    /// Decomposes any zoned `chrono` timestamp.
    pub fn from_datetime<T: TimeZone>(dt: &DateTime<T>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            weekday: dt.weekday().num_days_from_sunday(),
        }
    }
}

/// Source of zoned calendar fields for the projector.
///
/// Implementations must apply DST and historical offset rules of the zone.
/// Unknown zone names should be treated as UTC rather than failing.
pub trait ZoneDecomposer {
    /// Returns calendar fields of `instant` as observed in `time_zone`.
    fn decompose(&self, instant: &DateTime<Utc>, time_zone: &str) -> ZonedInstant;
}

/// Cache of resolved IANA zone names.
///
/// Unknown names are cached too, resolved to UTC.
#[derive(Debug, Default)]
pub struct ZoneCache {
    zones: RwLock<HashMap<String, Tz>>,
}

impl ZoneCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns zone for the IANA `name`, parsing and remembering it on the first request.
    pub fn resolve(&self, name: &str) -> Tz {
        if let Some(tz) = self.zones.read().unwrap_or_else(PoisonError::into_inner).get(name) {
            return *tz;
        }

        let tz = name.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(time_zone = name, "unknown time zone, falling back to UTC");
            Tz::UTC
        });

        self.zones
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), tz);

        tz
    }

    /// Number of remembered names.
    pub fn len(&self) -> usize {
        self.zones.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing was resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`ZoneDecomposer`] backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Default)]
pub struct TzDecomposer {
    cache: ZoneCache,
}

impl TzDecomposer {
    /// Creates decomposer with its own empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates decomposer which owns the provided (possibly pre-filled) cache.
    pub fn with_cache(cache: ZoneCache) -> Self {
        Self { cache }
    }

    /// Cache of resolved zones.
    pub fn cache(&self) -> &ZoneCache {
        &self.cache
    }
}

impl ZoneDecomposer for TzDecomposer {
    fn decompose(&self, instant: &DateTime<Utc>, time_zone: &str) -> ZonedInstant {
        let tz = self.cache.resolve(time_zone);
        ZonedInstant::from_datetime(&instant.with_timezone(&tz))
    }
}

impl<D: ZoneDecomposer + ?Sized> ZoneDecomposer for &D {
    #[inline]
    fn decompose(&self, instant: &DateTime<Utc>, time_zone: &str) -> ZonedInstant {
        (**self).decompose(instant, time_zone)
    }
}
