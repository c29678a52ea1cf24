use chrono::{Duration, NaiveDate, NaiveDateTime};

// Parsed CF time units, e.g. "seconds since 2000-01-01 00:00:00"
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    pub seconds_per_unit: f64,
    pub reference: Option<NaiveDateTime>,
}

impl TimeUnits {
    pub fn parse(units: &str) -> Option<Self> {
        let mut parts = units.trim().splitn(2, " since ");
        let unit = parts.next()?.trim().to_lowercase();
        let seconds_per_unit = match unit.as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => 1.0,
            "minutes" | "minute" | "mins" | "min" => 60.0,
            "hours" | "hour" | "hrs" | "hr" | "h" => 3600.0,
            "days" | "day" | "d" => 86400.0,
            _ => return None,
        };
        let reference = parts.next().and_then(parse_reference);

        Some(TimeUnits {
            seconds_per_unit,
            reference,
        })
    }
}

fn parse_reference(text: &str) -> Option<NaiveDateTime> {
    let text = text
        .trim()
        .trim_end_matches(" UTC")
        .trim_end_matches('Z')
        .trim_end_matches("+00:00");

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

// Time coordinate of a result file, values converted to seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub seconds: Vec<f64>,
    pub units: Option<TimeUnits>,
}

impl TimeAxis {
    /// Build from raw values; missing or unknown units are taken as seconds.
    pub fn new(raw: Vec<f64>, units_attr: Option<&str>) -> Self {
        let units = units_attr.and_then(TimeUnits::parse);
        match (&units, units_attr) {
            (None, Some(attr)) => {
                log::warn!("Unrecognised time units {:?}, assuming seconds", attr)
            }
            (None, None) => log::warn!("Time variable has no units, assuming seconds"),
            _ => {}
        }

        let factor = units.as_ref().map_or(1.0, |u| u.seconds_per_unit);
        let seconds = if factor == 1.0 {
            raw
        } else {
            raw.into_iter().map(|v| v * factor).collect()
        };

        TimeAxis { seconds, units }
    }

    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Simulated period as absolute datetimes, when the reference time is known.
    ///
    /// `None` when either end is not finite or falls outside the datetime range,
    /// e.g. a fill value in the time variable.
    pub fn period(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let reference = self.units.as_ref()?.reference?;
        let first = *self.seconds.first()?;
        let last = *self.seconds.last()?;
        Some((offset(reference, first)?, offset(reference, last)?))
    }
}

fn offset(reference: NaiveDateTime, seconds: f64) -> Option<NaiveDateTime> {
    let millis = (seconds * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    reference.checked_add_signed(Duration::try_milliseconds(millis as i64)?)
}
