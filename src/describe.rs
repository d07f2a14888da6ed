use crate::{
    field::{CronField, CronSegment, FieldKind, FieldValue},
    schedule::CronSchedule,
    utils,
};

/// Builds human-readable English description of the schedule from its segments.
///
/// ```rust
/// use cron_forecast::CronSchedule;
///
/// let schedule = CronSchedule::new("0 9 * * MON-FRI").unwrap();
/// assert_eq!(schedule.describe(), "At 09:00 on every day-of-week from Monday through Friday");
/// ```
pub fn describe(schedule: &CronSchedule) -> String {
    let minute = schedule.minute();
    let hour = schedule.hour();

    let mut text = match (single_value(minute), single_value(hour)) {
        (Some(minute), Some(hour)) => format!("At {hour:02}:{minute:02}"),
        _ => {
            let mut text = format!("At {}", field_phrase(minute));
            if !hour.is_any() {
                text.push_str(" past ");
                text.push_str(&field_phrase(hour));
            }
            text
        }
    };

    let dom = schedule.day_of_month();
    let dow = schedule.day_of_week();
    if !dom.is_any() {
        text.push_str(" on ");
        text.push_str(&field_phrase(dom));
    }
    if !dow.is_any() {
        // either of the days is enough when both are restricted
        text.push_str(if dom.is_any() { " on " } else { " or on " });
        text.push_str(&field_phrase(dow));
    }

    let month = schedule.month();
    if !month.is_any() {
        text.push_str(" in ");
        text.push_str(&field_phrase(month));
    }

    text
}

/// The only value of a field written as a single clause, if so.
fn single_value(field: &CronField) -> Option<FieldValue> {
    match field.segments() {
        [segment] => single_segment_value(*segment),
        _ => None,
    }
}

fn single_segment_value(segment: CronSegment) -> Option<FieldValue> {
    match segment {
        CronSegment::Value(value) => Some(value),
        CronSegment::Range(start, end, _) if start == end => Some(start),
        _ => None,
    }
}

fn field_phrase(field: &CronField) -> String {
    let kind = field.kind();
    if field.is_any() {
        return format!("every {kind}");
    }

    let singles: Option<Vec<FieldValue>> = field.segments().iter().map(|s| single_segment_value(*s)).collect();
    if let Some(values) = singles {
        let labels = values.into_iter().map(|v| label(kind, v)).collect::<Vec<_>>();
        return match kind {
            FieldKind::Month | FieldKind::DayOfWeek => join(&labels),
            _ => format!("{kind} {}", join(&labels)),
        };
    }

    let phrases = field
        .segments()
        .iter()
        .map(|segment| segment_phrase(kind, *segment))
        .collect::<Vec<_>>();
    join(&phrases)
}

fn segment_phrase(kind: FieldKind, segment: CronSegment) -> String {
    let (min, max) = kind.min_max();
    match segment {
        CronSegment::Any => format!("every {kind}"),
        CronSegment::Range(start, end, step) if start != end => {
            let full = start == min && (end == max || (kind == FieldKind::DayOfWeek && end == 7));
            let every = if step == 1 {
                format!("every {kind}")
            } else {
                format!("every {} {kind}", utils::ordinal(step))
            };

            if full {
                every
            } else {
                format!("{every} from {} through {}", label(kind, start), label(kind, end))
            }
        }
        CronSegment::Value(value) | CronSegment::Range(value, _, _) => match kind {
            FieldKind::Month | FieldKind::DayOfWeek => label(kind, value),
            _ => format!("{kind} {value}"),
        },
    }
}

fn label(kind: FieldKind, value: FieldValue) -> String {
    let name = match kind {
        FieldKind::Month => utils::month_name(value),
        FieldKind::DayOfWeek => utils::day_of_week_name(value),
        _ => None,
    };
    name.map(str::to_owned).unwrap_or_else(|| value.to_string())
}

/// `a`, `a and b`, `a, b and c`.
fn join(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [single] => single.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}
