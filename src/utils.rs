/// Common utility functions.
use crate::field::FieldValue;

/// Three-letter day of week names, Sunday first.
pub(crate) const DAYS_OF_WEEK: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
/// Three-letter month names, January first.
pub(crate) const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Result of numeric token conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Digital {
    /// Plain decimal value.
    Value(FieldValue),
    /// All digits, but too large for the value type.
    Overflow,
    /// Not a decimal number at all.
    NotANumber,
}

/// Converts string of ASCII digits into unsigned number.
///
/// Signs, whitespace and empty input are rejected, unlike plain `str::parse`.
pub(crate) fn parse_digital_value(input: &str) -> Digital {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        Digital::NotANumber
    } else if let Ok(value) = input.parse::<FieldValue>() {
        Digital::Value(value)
    } else {
        Digital::Overflow
    }
}

/// Converts string with mnemonic value representation into its index in `values`.
pub(crate) fn parse_string_value(input: &str, values: &[&str]) -> Option<FieldValue> {
    if input.is_empty() {
        None
    } else {
        values
            .iter()
            .position(|x| x.eq_ignore_ascii_case(input))
            .map(|i| i as FieldValue)
    }
}

/// English name of the month, `1` is January.
pub(crate) fn month_name(month: FieldValue) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES.get((month as usize).checked_sub(1)?).copied()
}

/// English name of the day of week, `0` and `7` are Sunday.
pub(crate) fn day_of_week_name(dow: FieldValue) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    NAMES.get((dow % 7) as usize).filter(|_| dow <= 7).copied()
}

/// Ordinal suffix form of a number: `1st`, `2nd`, `11th`, `23rd`.
pub(crate) fn ordinal(n: FieldValue) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
