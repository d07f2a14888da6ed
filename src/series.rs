/// Generator of numbers series.
use crate::field::FieldValue;

/// Generator (iterator) state.
///
/// Yields `min, min + step, min + 2 * step, ...` while the value doesn't exceed `max`.
/// Stops silently instead of overflowing, so any positive `step` is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SeriesWithStep {
    max: FieldValue,
    step: FieldValue,
    next: Option<FieldValue>,
}

impl SeriesWithStep {
    /// Caller is responsible to ensure that `min <= max` and `step > 0`,
    /// otherwise the series is empty.
    #[inline]
    pub(crate) fn new(min: FieldValue, max: FieldValue, step: FieldValue) -> Self {
        let next = if min > max || step == 0 { None } else { Some(min) };

        Self { max, step, next }
    }
}

impl Iterator for SeriesWithStep {
    type Item = FieldValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.checked_add(self.step).filter(|next| *next <= self.max);
        Some(current)
    }
}
