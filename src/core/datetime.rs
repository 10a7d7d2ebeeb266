//! Deadline date arithmetic.
//!
//! Every function takes "now" in the caller's time zone, does its
//! calendar arithmetic on that zone's wall clock, and returns the
//! resulting instant in UTC.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, SecondsFormat, TimeZone, Utc,
    Weekday,
};

/// Hour of day given to every deadline except "today".
const DUE_HOUR: u32 = 17;

/// Weekday names in `num_days_from_sunday` order.
pub const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

/// Find the first weekday name contained in `text` (case-insensitive).
///
/// Names are tried Sunday first, so "sunday monday" yields Sunday.
#[must_use]
pub fn weekday_in(text: &str) -> Option<Weekday> {
    let lower = text.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|&(_, weekday)| weekday)
}

/// Days from `from` until the next `target`, always in `1..=7`.
#[must_use]
pub fn days_until(from: Weekday, target: Weekday) -> i64 {
    let diff = i64::from(target.num_days_from_sunday()) - i64::from(from.num_days_from_sunday());
    if diff <= 0 {
        diff + 7
    } else {
        diff
    }
}

/// Today at 23:59:59.999 local time.
#[must_use]
pub fn end_of_today<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    at_local(&now.timezone(), now.date_naive(), time)
}

/// `days` calendar days from today, at 17:00 local time.
#[must_use]
pub fn days_ahead<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> DateTime<Utc> {
    at_local(&now.timezone(), now.date_naive() + Duration::days(days), due_time())
}

/// The coming Friday at 17:00. On a Friday this is a week out.
#[must_use]
pub fn end_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    next_weekday(now, Weekday::Fri)
}

/// The next `weekday` strictly after today, at 17:00.
#[must_use]
pub fn next_weekday<Tz: TimeZone>(now: &DateTime<Tz>, weekday: Weekday) -> DateTime<Utc> {
    days_ahead(now, days_until(now.weekday(), weekday))
}

/// Format as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[must_use]
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn due_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DUE_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Pin a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times
/// skipped by a forward transition move one hour later. A skip longer than
/// an hour falls back to the zone's offset in effect at that UTC instant.
fn at_local<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .map_or_else(
            || {
                let offset = tz.offset_from_utc_datetime(&naive).fix();
                Utc.from_utc_datetime(
                    &(naive - Duration::seconds(i64::from(offset.local_minus_utc()))),
                )
            },
            |local| local.with_timezone(&Utc),
        )
}
