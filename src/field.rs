use crate::{
    series::SeriesWithStep,
    utils::{self, Digital},
    CronError, Result,
};
use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

/// Numeric type of every field value: minutes, hours, days, months and days of week.
pub type FieldValue = u32;

/// Position of the field in the five-field cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Minutes, `0-59`.
    Minute,
    /// Hours, `0-23`.
    Hour,
    /// Day of month, `1-31`.
    DayOfMonth,
    /// Month, `1-12` or `JAN-DEC`.
    Month,
    /// Day of week, `0-6` or `SUN-SAT`; `7` is accepted as Sunday too.
    DayOfWeek,
}

impl FieldKind {
    /// All kinds in the order they appear in an expression.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    /// Inclusive bounds of legal (normalized) values.
    pub fn min_max(&self) -> (FieldValue, FieldValue) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 6),
        }
    }

    /// Bounds of a literal token before normalization: Sunday may be written as `7`.
    fn token_bounds(&self) -> (FieldValue, FieldValue) {
        match self {
            Self::DayOfWeek => (0, 7),
            _ => self.min_max(),
        }
    }

    /// Mnemonic names table and the value of its first entry.
    fn names(&self) -> Option<(&'static [&'static str], FieldValue)> {
        match self {
            Self::Month => Some((&utils::MONTHS, 1)),
            Self::DayOfWeek => Some((&utils::DAYS_OF_WEEK, 0)),
            _ => None,
        }
    }

    /// Folds the `7` alias of Sunday into `0`, other values are left as is.
    #[inline]
    pub(crate) fn normalize(&self, value: FieldValue) -> FieldValue {
        if *self == Self::DayOfWeek && value == 7 {
            0
        } else {
            value
        }
    }

    /// Resolves a single start/end token: names take priority over numbers.
    fn parse_token(&self, token: &str) -> Result<FieldValue> {
        if let Some((names, first)) = self.names() {
            if let Some(index) = utils::parse_string_value(token, names) {
                return Ok(index + first);
            }
        }

        let (min, max) = self.token_bounds();
        match utils::parse_digital_value(token) {
            Digital::Value(value) if (min..=max).contains(&value) => Ok(value),
            Digital::Value(_) | Digital::Overflow => Err(CronError::OutOfRange(format!(
                "{self} value '{token}' is outside of {min}-{max}"
            ))),
            Digital::NotANumber => Err(CronError::InvalidToken(format!("'{token}' in {self} field"))),
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        };
        f.write_str(name)
    }
}

/// One comma separated clause of a field, as it was written.
///
/// Segments are kept for rendering and description only, matching uses [`CronField::values`].
///
/// Values are normalized, with one exception: a day-of-week range keeps its literal end `7`
/// (`fri-7` is `Range(5, 7, 1)`), since folding it would make the range descending.
/// The expanded values of such a range are always folded to `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronSegment {
    /// `*` or `?`.
    Any,
    /// Single value.
    Value(FieldValue),
    /// start-end/step, inclusive.
    Range(FieldValue, FieldValue, FieldValue),
}

/// Compiled form of a single cron field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CronField {
    kind: FieldKind,
    any: bool,
    values: BTreeSet<FieldValue>,
    segments: Vec<CronSegment>,
}

/// Parses the text of one field, see [`CronField::parse`].
#[inline]
pub fn parse_field(input: &str, kind: FieldKind) -> Result<CronField> {
    CronField::parse(kind, input)
}

impl CronField {
    /// Parses the text of one field of the specified `kind`.
    ///
    /// Empty input, `*` and `?` give an unconstrained field.
    /// Any other input is a comma separated list of clauses, each one of
    /// `value`, `start-end`, `value/step`, `start-end/step` or `*/step`.
    /// If any clause of the list is a bare wildcard, the whole field is unconstrained.
    pub fn parse(kind: FieldKind, input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() || is_wildcard(input) {
            return Ok(Self::any(kind));
        }

        let mut values = BTreeSet::new();
        let mut segments = Vec::new();

        for clause in input.split(',') {
            if is_wildcard(clause) {
                return Ok(Self::any(kind));
            }

            let (segment, series) = Self::parse_clause(kind, clause)?;
            values.extend(series);
            segments.push(segment);
        }

        Ok(Self {
            kind,
            any: false,
            values,
            segments,
        })
    }

    fn any(kind: FieldKind) -> Self {
        Self {
            kind,
            any: true,
            values: BTreeSet::new(),
            segments: vec![CronSegment::Any],
        }
    }

    fn parse_clause(kind: FieldKind, clause: &str) -> Result<(CronSegment, impl Iterator<Item = FieldValue>)> {
        let (range, step) = match clause.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (clause, None),
        };

        let step = match step.map(utils::parse_digital_value) {
            None => 1,
            Some(Digital::Value(step)) if step > 0 => step,
            Some(Digital::Overflow) => FieldValue::MAX,
            Some(_) => return Err(CronError::InvalidStep(format!("'{clause}' in {kind} field"))),
        };

        let (start, end) = if is_wildcard(range) {
            kind.min_max()
        } else if let Some((start, end)) = range.split_once('-') {
            (kind.parse_token(start)?, kind.parse_token(end)?)
        } else {
            let value = kind.normalize(kind.parse_token(range)?);
            (value, value)
        };

        if start > end {
            return Err(CronError::InvalidRange(format!("'{clause}' in {kind} field")));
        }

        let segment = if start == end && step == 1 {
            CronSegment::Value(kind.normalize(start))
        } else if start == end {
            CronSegment::Range(kind.normalize(start), kind.normalize(end), step)
        } else {
            CronSegment::Range(start, end, step)
        };

        let series = SeriesWithStep::new(start, end, step).map(move |value| kind.normalize(value));

        Ok((segment, series))
    }

    /// Kind of the field.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// `true` if the field is unconstrained (`*` or `?`).
    #[inline]
    pub fn is_any(&self) -> bool {
        self.any
    }

    /// Expanded set of matching values, empty for unconstrained field.
    #[inline]
    pub fn values(&self) -> &BTreeSet<FieldValue> {
        &self.values
    }

    /// Clauses as written, in input order.
    #[inline]
    pub fn segments(&self) -> &[CronSegment] {
        &self.segments
    }

    /// Returns `true` if the field accepts the `value`.
    #[inline]
    pub fn matches(&self, value: FieldValue) -> bool {
        self.any || self.values.contains(&value)
    }
}

impl Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.kind.min_max();
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            match *segment {
                CronSegment::Any => write!(f, "*")?,
                CronSegment::Value(value) => write!(f, "{value}")?,
                CronSegment::Range(start, end, 1) => write!(f, "{start}-{end}")?,
                CronSegment::Range(start, end, step) if start == min && end == max => write!(f, "*/{step}")?,
                CronSegment::Range(start, end, step) if start == end => write!(f, "{start}/{step}")?,
                CronSegment::Range(start, end, step) => write!(f, "{start}-{end}/{step}")?,
            }
        }
        Ok(())
    }
}

#[inline]
fn is_wildcard(input: &str) -> bool {
    input == "*" || input == "?"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rstest_reuse::{apply, template};

    #[template]
    #[rstest]
    #[case(FieldKind::Minute)]
    #[case(FieldKind::Hour)]
    #[case(FieldKind::DayOfMonth)]
    #[case(FieldKind::Month)]
    #[case(FieldKind::DayOfWeek)]
    fn all_kinds(#[case] kind: FieldKind) {}

    #[apply(all_kinds)]
    fn test_wildcards(kind: FieldKind) {
        for input in ["*", "?", "", "  ", " * "] {
            let field = CronField::parse(kind, input).unwrap();
            assert!(field.is_any(), "kind = {kind}, input = '{input}'");
            assert!(field.values().is_empty());
            assert_eq!(field.segments(), &[CronSegment::Any]);
        }
    }

    #[apply(all_kinds)]
    fn test_wildcard_absorbs_list(kind: FieldKind) {
        let star = CronField::parse(kind, "*").unwrap();
        for input in ["5,*", "*,5", "5,?", "1-3,*,5"] {
            assert_eq!(CronField::parse(kind, input).unwrap(), star, "kind = {kind}, input = '{input}'");
        }
    }

    #[apply(all_kinds)]
    fn test_full_range_step_one(kind: FieldKind) {
        let (min, max) = kind.min_max();
        let field = CronField::parse(kind, "*/1").unwrap();
        assert!(!field.is_any());
        assert_eq!(field.values(), &(min..=max).collect::<BTreeSet<_>>());
        assert_eq!(field.segments(), &[CronSegment::Range(min, max, 1)]);
    }

    #[apply(all_kinds)]
    fn test_parse_invalid_common(kind: FieldKind) {
        for input in [",", "1,", ",1", "/", "*/", "1/", "-", "1-", "-1", "a", "1-2-3", "1/0", "*/0", "1/-5", "1, 2", "1/a"] {
            assert!(
                CronField::parse(kind, input).is_err(),
                "kind = {kind}, input = '{input}' should be rejected"
            );
        }
    }

    #[rstest]
    #[case(FieldKind::Minute, "0", [0])]
    #[case(FieldKind::Minute, "59", [59])]
    #[case(FieldKind::Minute, "07", [7])]
    #[case(FieldKind::Minute, "*/15", [0, 15, 30, 45])]
    #[case(FieldKind::Minute, "10-30/5", [10, 15, 20, 25, 30])]
    #[case(FieldKind::Minute, "50-59/10", [50])]
    #[case(FieldKind::Minute, "5/15", [5])]
    #[case(FieldKind::Minute, "0-5", [0, 1, 2, 3, 4, 5])]
    #[case(FieldKind::Minute, "12,22,30", [12, 22, 30])]
    #[case(FieldKind::Minute, "30,10,10,20", [10, 20, 30])]
    #[case(FieldKind::Minute, "10,12,25-30,40-45/2,*/30", [0, 10, 12, 25, 26, 27, 28, 29, 30, 40, 42, 44])]
    #[case(FieldKind::Minute, "0-59/100", [0])]
    #[case(FieldKind::Minute, "0/99999999999", [0])]
    #[case(FieldKind::Hour, "9-17/2", [9, 11, 13, 15, 17])]
    #[case(FieldKind::Hour, "*/6", [0, 6, 12, 18])]
    #[case(FieldKind::Hour, "23", [23])]
    #[case(FieldKind::DayOfMonth, "*/10", [1, 11, 21, 31])]
    #[case(FieldKind::DayOfMonth, "1,15", [1, 15])]
    #[case(FieldKind::DayOfMonth, "28-31", [28, 29, 30, 31])]
    #[case(FieldKind::Month, "JAN-MAR", [1, 2, 3])]
    #[case(FieldKind::Month, "jan-mar", [1, 2, 3])]
    #[case(FieldKind::Month, "Dec", [12])]
    #[case(FieldKind::Month, "*/3", [1, 4, 7, 10])]
    #[case(FieldKind::Month, "feb,aug-oct", [2, 8, 9, 10])]
    #[case(FieldKind::Month, "jun-12/2", [6, 8, 10, 12])]
    #[case(FieldKind::DayOfWeek, "MON-FRI", [1, 2, 3, 4, 5])]
    #[case(FieldKind::DayOfWeek, "sun", [0])]
    #[case(FieldKind::DayOfWeek, "0", [0])]
    #[case(FieldKind::DayOfWeek, "7", [0])]
    #[case(FieldKind::DayOfWeek, "5-7", [0, 5, 6])]
    #[case(FieldKind::DayOfWeek, "0-7", [0, 1, 2, 3, 4, 5, 6])]
    #[case(FieldKind::DayOfWeek, "*/2", [0, 2, 4, 6])]
    #[case(FieldKind::DayOfWeek, "sat,Sun", [0, 6])]
    fn test_parse_values(
        #[case] kind: FieldKind,
        #[case] input: &str,
        #[case] expected: impl Into<Vec<FieldValue>>,
    ) {
        let field = CronField::parse(kind, input);
        assert!(field.is_ok(), "kind = {kind}, input = {input}, error = {}", field.err().unwrap());
        let field = field.unwrap();
        assert!(!field.is_any());
        assert_eq!(
            field.values().iter().copied().collect::<Vec<_>>(),
            expected.into(),
            "kind = {kind}, input = {input}"
        );
    }

    #[rstest]
    #[case(FieldKind::Minute, "5", vec![CronSegment::Value(5)])]
    #[case(FieldKind::Minute, "5/15", vec![CronSegment::Range(5, 5, 15)])]
    #[case(FieldKind::Minute, "5-5", vec![CronSegment::Value(5)])]
    #[case(FieldKind::Minute, "*/15", vec![CronSegment::Range(0, 59, 15)])]
    #[case(FieldKind::Minute, "3,1,2-5,10-22/4", vec![
        CronSegment::Value(3),
        CronSegment::Value(1),
        CronSegment::Range(2, 5, 1),
        CronSegment::Range(10, 22, 4),
    ])]
    #[case(FieldKind::Month, "mar,oct-nov", vec![CronSegment::Value(3), CronSegment::Range(10, 11, 1)])]
    #[case(FieldKind::DayOfWeek, "7", vec![CronSegment::Value(0)])]
    #[case(FieldKind::DayOfWeek, "7-7", vec![CronSegment::Value(0)])]
    #[case(FieldKind::DayOfWeek, "7/2", vec![CronSegment::Range(0, 0, 2)])]
    #[case(FieldKind::DayOfWeek, "fri-7", vec![CronSegment::Range(5, 7, 1)])]
    fn test_parse_segments(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: Vec<CronSegment>) {
        assert_eq!(CronField::parse(kind, input).unwrap().segments(), expected.as_slice());
    }

    #[rstest]
    #[case(FieldKind::Minute, "60")]
    #[case(FieldKind::Minute, "0-60")]
    #[case(FieldKind::Minute, "99999999999")]
    #[case(FieldKind::Hour, "24")]
    #[case(FieldKind::Hour, "20-24/2")]
    #[case(FieldKind::DayOfMonth, "0")]
    #[case(FieldKind::DayOfMonth, "32")]
    #[case(FieldKind::Month, "0")]
    #[case(FieldKind::Month, "13")]
    #[case(FieldKind::DayOfWeek, "8")]
    #[case(FieldKind::DayOfWeek, "0-8")]
    fn test_parse_out_of_range(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(matches!(
            CronField::parse(kind, input),
            Err(CronError::OutOfRange(_))
        ), "kind = {kind}, input = {input}");
    }

    #[rstest]
    #[case(FieldKind::Minute, "abc")]
    #[case(FieldKind::Minute, "jan")]
    #[case(FieldKind::Hour, "mon")]
    #[case(FieldKind::Hour, "+5")]
    #[case(FieldKind::DayOfMonth, "L")]
    #[case(FieldKind::DayOfMonth, "15W")]
    #[case(FieldKind::Month, "FOO")]
    #[case(FieldKind::Month, "ja")]
    #[case(FieldKind::Month, "january")]
    #[case(FieldKind::Month, "mon")]
    #[case(FieldKind::DayOfWeek, "jan")]
    #[case(FieldKind::DayOfWeek, "monday")]
    #[case(FieldKind::DayOfWeek, "1#2")]
    #[case(FieldKind::DayOfWeek, "5L")]
    fn test_parse_invalid_token(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(matches!(
            CronField::parse(kind, input),
            Err(CronError::InvalidToken(_))
        ), "kind = {kind}, input = {input}");
    }

    #[rstest]
    #[case(FieldKind::Minute, "*/0")]
    #[case(FieldKind::Minute, "0-30/")]
    #[case(FieldKind::Hour, "1/x")]
    #[case(FieldKind::Hour, "1/2/3")]
    #[case(FieldKind::Month, "jan/-1")]
    fn test_parse_invalid_step(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(matches!(
            CronField::parse(kind, input),
            Err(CronError::InvalidStep(_))
        ), "kind = {kind}, input = {input}");
    }

    #[rstest]
    #[case(FieldKind::Minute, "30-10")]
    #[case(FieldKind::Hour, "22-2")]
    #[case(FieldKind::Hour, "23-1/2")]
    #[case(FieldKind::Month, "dec-jan")]
    #[case(FieldKind::DayOfWeek, "sat-mon")]
    #[case(FieldKind::DayOfWeek, "7-1")]
    fn test_parse_descending_range(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(matches!(
            CronField::parse(kind, input),
            Err(CronError::InvalidRange(_))
        ), "kind = {kind}, input = {input}");
    }

    #[test]
    fn test_seven_equals_zero() {
        assert_eq!(
            CronField::parse(FieldKind::DayOfWeek, "7").unwrap(),
            CronField::parse(FieldKind::DayOfWeek, "0").unwrap()
        );
    }

    #[test]
    fn test_weekday_range_keeps_literal_seven() {
        let field = CronField::parse(FieldKind::DayOfWeek, "fri-7,3-7/2").unwrap();
        assert_eq!(
            field.segments(),
            &[CronSegment::Range(5, 7, 1), CronSegment::Range(3, 7, 2)]
        );
        assert_eq!(field.values(), &BTreeSet::from([0, 3, 5, 6]));
        assert!(field.values().iter().all(|v| *v <= 6));
        assert_eq!(field.to_string(), "5-7,3-7/2");
    }

    #[test]
    fn test_stepped_range_never_exceeds_end() {
        for step in 1..=12 {
            let field = CronField::parse(FieldKind::Minute, &format!("3-41/{step}")).unwrap();
            let expected = (3..=41).step_by(step as usize).collect::<BTreeSet<_>>();
            assert_eq!(field.values(), &expected, "step = {step}");
            assert!(field.values().iter().all(|v| *v <= 41));
        }
    }

    #[test]
    fn test_field_matches() {
        let any = CronField::parse(FieldKind::Hour, "*").unwrap();
        assert!(any.matches(0));
        assert!(any.matches(23));

        let field = CronField::parse(FieldKind::Hour, "9-17/4").unwrap();
        assert!(field.matches(9));
        assert!(field.matches(13));
        assert!(field.matches(17));
        assert!(!field.matches(10));
        assert!(!field.matches(21));
    }

    #[test]
    fn test_parse_field_fn() {
        assert_eq!(
            parse_field("JAN-MAR", FieldKind::Month).unwrap(),
            CronField::parse(FieldKind::Month, "1-3").unwrap()
        );
    }

    #[rstest]
    #[case(FieldKind::Minute, "*", "*")]
    #[case(FieldKind::Minute, "5,*", "*")]
    #[case(FieldKind::Minute, "5", "5")]
    #[case(FieldKind::Minute, "*/15", "*/15")]
    #[case(FieldKind::Minute, "0-59/15", "*/15")]
    #[case(FieldKind::Minute, "*/1", "0-59")]
    #[case(FieldKind::Minute, "5/15", "5/15")]
    #[case(FieldKind::Hour, "9-17/2,20", "9-17/2,20")]
    #[case(FieldKind::Month, "JAN-MAR", "1-3")]
    #[case(FieldKind::Month, "dec,jan", "12,1")]
    #[case(FieldKind::DayOfWeek, "MON-FRI", "1-5")]
    #[case(FieldKind::DayOfWeek, "7", "0")]
    #[case(FieldKind::DayOfWeek, "fri-7", "5-7")]
    fn test_field_display(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: &str) {
        let field = CronField::parse(kind, input).unwrap();
        let rendered = field.to_string();
        assert_eq!(rendered, expected);
        assert_eq!(CronField::parse(kind, &rendered).unwrap(), field, "input = {input}");
    }

    #[test]
    fn test_field_kind_display() {
        let names = FieldKind::ALL.iter().map(|kind| kind.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["minute", "hour", "day-of-month", "month", "day-of-week"]);
    }
}
