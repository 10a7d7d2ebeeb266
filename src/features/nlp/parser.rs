//! Natural language task parser.
//!
//! Turns quick-add strings like "Urgent: call mom tomorrow" into a title,
//! a deadline, and a priority. Extraction runs in a fixed order: one
//! deadline phrase, then one priority phrase, then title cleanup. Each
//! stage sees the text left over by the previous one.

use chrono::{DateTime, Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::core::{days_ahead, end_of_today, end_of_week, next_weekday, to_iso_millis, weekday_in};

/// Longest title, in characters, that passes [`is_valid_parsed_task`].
pub const MAX_TITLE_CHARS: usize = 255;

/// Priority tiers. The numeric values are fixed by the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    /// No priority keyword (0).
    #[default]
    None,
    /// low, low priority, whenever, someday, maybe (2).
    Low,
    /// medium priority, moderate, should (5).
    Medium,
    /// important, high priority, high, must (7).
    High,
    /// urgent, asap, critical, emergency, immediately (10).
    Urgent,
}

impl Priority {
    /// Keyword tiers in the order they are tried.
    pub const KEYWORD_TIERS: [Self; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];

    /// Numeric priority stored with the task.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 2,
            Self::Medium => 5,
            Self::High => 7,
            Self::Urgent => 10,
        }
    }

    fn keyword_pattern(self) -> Option<&'static Regex> {
        match self {
            Self::None => None,
            Self::Low => Some(&*LOW_PATTERN),
            Self::Medium => Some(&*MEDIUM_PATTERN),
            Self::High => Some(&*HIGH_PATTERN),
            Self::Urgent => Some(&*URGENT_PATTERN),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        })
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

/// Deadline phrase categories, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineKind {
    /// today, tonight, this evening
    Today,
    /// tomorrow, tmr, tmrw
    Tomorrow,
    /// next week
    NextWeek,
    /// this week, end of week
    ThisWeek,
    /// on/by/before followed by a weekday name
    DayOfWeek,
    /// 12/15, 12/15/25, Dec 15th, and any other word followed by a day number
    SpecificDate,
}

impl DeadlineKind {
    /// All categories in match order.
    pub const ALL: [Self; 6] = [
        Self::Today,
        Self::Tomorrow,
        Self::NextWeek,
        Self::ThisWeek,
        Self::DayOfWeek,
        Self::SpecificDate,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Today => &*TODAY_PATTERN,
            Self::Tomorrow => &*TOMORROW_PATTERN,
            Self::NextWeek => &*NEXT_WEEK_PATTERN,
            Self::ThisWeek => &*THIS_WEEK_PATTERN,
            Self::DayOfWeek => &*DAY_OF_WEEK_PATTERN,
            Self::SpecificDate => &*SPECIFIC_DATE_PATTERN,
        }
    }

    /// Resolve the matched phrase against `now`.
    ///
    /// Specific dates are not converted to a calendar date; they only
    /// resolve when the matched text happens to name a weekday.
    fn resolve<Tz: TimeZone>(self, matched: &str, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        match self {
            Self::Today => Some(end_of_today(now)),
            Self::Tomorrow => Some(days_ahead(now, 1)),
            Self::NextWeek => Some(days_ahead(now, 7)),
            Self::ThisWeek => Some(end_of_week(now)),
            Self::DayOfWeek | Self::SpecificDate => {
                weekday_in(matched).map(|weekday| next_weekday(now, weekday))
            },
        }
    }
}

impl std::fmt::Display for DeadlineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::NextWeek => "next week",
            Self::ThisWeek => "this week",
            Self::DayOfWeek => "day of week",
            Self::SpecificDate => "specific date",
        })
    }
}

/// Result of parsing a quick-add string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTask {
    /// Text left after removing the deadline and priority phrases.
    pub title: String,
    /// Absolute deadline, if a deadline phrase resolved to one.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_deadline"
    )]
    pub deadline: Option<DateTime<Utc>>,
    /// Priority tier; serialized as its numeric value.
    pub priority: Priority,
}

impl ParsedTask {
    /// Deadline as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[must_use]
    pub fn deadline_iso(&self) -> Option<String> {
        self.deadline.as_ref().map(to_iso_millis)
    }

    /// See [`is_valid_parsed_task`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_parsed_task(self)
    }
}

fn serialize_deadline<S: Serializer>(
    deadline: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match deadline {
        Some(instant) => serializer.serialize_str(&to_iso_millis(instant)),
        None => serializer.serialize_none(),
    }
}

// Compiled regex patterns. ASCII mode: accented letters are not word
// characters and case folding stays within ASCII. Whitespace stays Unicode.
static TODAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(today|tonight|this evening)\b")
        .unwrap_or_else(|e| panic!("Invalid today regex: {e}"))
});

static TOMORROW_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(tomorrow|tmr|tmrw)\b")
        .unwrap_or_else(|e| panic!("Invalid tomorrow regex: {e}"))
});

static NEXT_WEEK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\bnext week\b").unwrap_or_else(|e| panic!("Invalid next week regex: {e}"))
});

static THIS_WEEK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(this week|end of week)\b")
        .unwrap_or_else(|e| panic!("Invalid this week regex: {e}"))
});

static DAY_OF_WEEK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "on monday", "by friday", "before sunday"
    Regex::new(
        r"(?i-u)\b(on|by|before)(?u:\s)+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .unwrap_or_else(|e| panic!("Invalid day of week regex: {e}"))
});

static SPECIFIC_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "12/15", "12/15/2025", "dec 15", "december 15th"
    Regex::new(r"(?i-u)\b(\d{1,2}/\d{1,2}(?:/\d{2,4})?|\w+(?u:\s)+\d{1,2}(?:st|nd|rd|th)?)\b")
        .unwrap_or_else(|e| panic!("Invalid specific date regex: {e}"))
});

static URGENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(urgent|asap|critical|emergency|immediately)\b")
        .unwrap_or_else(|e| panic!("Invalid urgent regex: {e}"))
});

static HIGH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(important|high priority|high|must)\b")
        .unwrap_or_else(|e| panic!("Invalid high priority regex: {e}"))
});

static MEDIUM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(medium priority|moderate|should)\b")
        .unwrap_or_else(|e| panic!("Invalid medium priority regex: {e}"))
});

static LOW_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b(low priority|low|whenever|someday|maybe)\b")
        .unwrap_or_else(|e| panic!("Invalid low priority regex: {e}"))
});

/// Parse a quick-add string, resolving deadlines against the local clock.
///
/// # Examples
///
/// ```
/// use quicktask::features::nlp::{parse_task, Priority};
///
/// let task = parse_task("Urgent: Fix production bug");
/// assert_eq!(task.title, "Fix production bug");
/// assert_eq!(task.priority, Priority::Urgent);
/// assert!(task.deadline.is_none());
///
/// let task = parse_task("Call mom tomorrow");
/// assert_eq!(task.title, "Call mom");
/// assert!(task.deadline.is_some());
/// ```
#[must_use]
pub fn parse_task(input: &str) -> ParsedTask {
    parse_task_at(input, &Local::now())
}

/// Parse a quick-add string, resolving deadlines against `now`.
///
/// Never fails. Blank input yields an empty title. If stripping keywords
/// leaves nothing, the trimmed input becomes the title.
#[must_use]
pub fn parse_task_at<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> ParsedTask {
    let raw = input.trim();
    if raw.is_empty() {
        return ParsedTask::default();
    }

    let (deadline, remaining) = extract_deadline(raw, now);
    let (priority, remaining) = extract_priority(&remaining);

    let mut title = clean_title(&remaining);
    if title.is_empty() {
        debug!(input = raw, "nothing left after extraction, keeping input as title");
        title = raw.to_string();
    }

    ParsedTask {
        title,
        deadline,
        priority,
    }
}

/// Whether `task` has a title of 1 to [`MAX_TITLE_CHARS`] characters.
#[must_use]
pub fn is_valid_parsed_task(task: &ParsedTask) -> bool {
    (1..=MAX_TITLE_CHARS).contains(&task.title.chars().count())
}

/// Find the first deadline category that matches and cut its phrase out.
fn extract_deadline<Tz: TimeZone>(
    text: &str,
    now: &DateTime<Tz>,
) -> (Option<DateTime<Utc>>, String) {
    for kind in DeadlineKind::ALL {
        if let Some(m) = kind.pattern().find(text) {
            let deadline = kind.resolve(m.as_str(), now);
            debug!(
                kind = %kind,
                phrase = m.as_str(),
                resolved = deadline.is_some(),
                "deadline phrase"
            );
            return (deadline, remove_span(text, m.start(), m.end()));
        }
    }
    (None, text.to_string())
}

/// Find the first priority tier with a keyword and cut that keyword out.
fn extract_priority(text: &str) -> (Priority, String) {
    for tier in Priority::KEYWORD_TIERS {
        let Some(pattern) = tier.keyword_pattern() else {
            continue;
        };
        if let Some(m) = pattern.find(text) {
            debug!(priority = %tier, keyword = m.as_str(), "priority keyword");
            return (tier, remove_span(text, m.start(), m.end()));
        }
    }
    (Priority::None, text.to_string())
}

fn remove_span(text: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(text.len() - (end - start));
    out.push_str(&text[..start]);
    out.push_str(&text[end..]);
    out.trim().to_string()
}

/// Collapse whitespace and strip separators left at either end.
fn clean_title(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '-'))
        .trim()
        .to_string()
}
