//! Date formatting for templates.
//!
//! Patterns use the dayjs token language, including its localized (`LL`,
//! `LLL`, ...) and advanced (`Do`, `Q`, `k`, `X`, `x`) tokens. Text inside
//! square brackets is copied as is; characters that are not tokens pass
//! through unchanged.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};

use crate::config::ThemeConfig;

mod locale;

pub use locale::Locale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub locale: Locale,
    /// Normalise to UTC before formatting instead of keeping the value's own
    /// offset.
    pub utc: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            utc: false,
        }
    }
}

impl FormatOptions {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            locale: Locale::parse(&theme.locale),
            utc: theme.utc,
        }
    }
}

const LOCALIZED_TOKENS: &[&str] = &[
    "LLLL", "LLL", "LTS", "LL", "LT", "L", "llll", "lll", "ll", "l",
];

// Longest first, so `MMMM` is never read as four `M`.
const TOKENS: &[&str] = &[
    "YYYY", "YY", "MMMM", "MMM", "MM", "M", "Do", "DD", "D", "dddd", "ddd", "dd", "d", "HH", "H",
    "hh", "h", "kk", "k", "mm", "m", "ss", "s", "SSS", "ZZ", "Z", "A", "a", "Q", "X", "x",
];

/// Format `date` according to `pattern`.
pub fn format_date(date: &DateTime<FixedOffset>, pattern: &str, options: &FormatOptions) -> String {
    let date = if options.utc {
        date.with_timezone(&Utc).fixed_offset()
    } else {
        *date
    };

    let pattern = expand_localized(pattern, options.locale);
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern.as_str();

    while !rest.is_empty() {
        if let Some(literal) = bracketed(rest) {
            out.push_str(literal);
            rest = &rest[literal.len() + 2..];
        } else if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str(&render_token(token, &date, options.locale));
            rest = &rest[token.len()..];
        } else {
            rest = push_first_char(&mut out, rest);
        }
    }

    out
}

/// Format a calendar date, taken as midnight at offset zero.
pub fn format_naive_date(date: NaiveDate, pattern: &str, options: &FormatOptions) -> String {
    let value = date.and_time(NaiveTime::MIN).and_utc().fixed_offset();
    format_date(&value, pattern, options)
}

/// Parse an RFC 3339 timestamp, `YYYY-MM-DD HH:MM[:SS]` or a bare
/// `YYYY-MM-DD`. Values without an offset are taken as UTC.
pub fn parse_date_value(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Replace the localized tokens with the locale's long formats, leaving
/// bracketed literals alone.
fn expand_localized(pattern: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(literal) = bracketed(rest) {
            let consumed = literal.len() + 2;
            out.push_str(&rest[..consumed]);
            rest = &rest[consumed..];
        } else if let Some(token) = LOCALIZED_TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str(locale.long_format(token));
            rest = &rest[token.len()..];
        } else {
            rest = push_first_char(&mut out, rest);
        }
    }

    out
}

/// Inner text of a leading `[...]` with at least one character inside.
fn bracketed(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('[')?;
    let end = inner.find(']')?;
    (end > 0).then(|| &inner[..end])
}

fn push_first_char<'s>(out: &mut String, s: &'s str) -> &'s str {
    let mut chars = s.chars();
    if let Some(ch) = chars.next() {
        out.push(ch);
    }
    chars.as_str()
}

fn render_token(token: &str, date: &DateTime<FixedOffset>, locale: Locale) -> String {
    let month0 = date.month0() as usize;
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let hour = date.hour();
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };

    match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => locale.months()[month0].to_string(),
        "MMM" => locale.months_short()[month0].to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "Do" => locale.ordinal(date.day()),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "dddd" => locale.weekdays()[weekday].to_string(),
        "ddd" => locale.weekdays_short()[weekday].to_string(),
        "dd" => locale.weekdays_min()[weekday].to_string(),
        "d" => weekday.to_string(),
        "HH" => format!("{hour:02}"),
        "H" => hour.to_string(),
        "hh" => format!("{hour12:02}"),
        "h" => hour12.to_string(),
        "kk" => format!("{:02}", if hour == 0 { 24 } else { hour }),
        "k" => (if hour == 0 { 24 } else { hour }).to_string(),
        "mm" => format!("{:02}", date.minute()),
        "m" => date.minute().to_string(),
        "ss" => format!("{:02}", date.second()),
        "s" => date.second().to_string(),
        "SSS" => format!("{:03}", date.timestamp_subsec_millis().min(999)),
        "ZZ" => offset_string(date.offset(), ""),
        "Z" => offset_string(date.offset(), ":"),
        "A" => locale.meridiem(hour).to_string(),
        "a" => locale.meridiem(hour).to_lowercase(),
        "Q" => (month0 / 3 + 1).to_string(),
        "X" => date.timestamp().to_string(),
        "x" => date.timestamp_millis().to_string(),
        other => other.to_string(),
    }
}

fn offset_string(offset: &FixedOffset, separator: &str) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{sign}{:02}{separator}{:02}", minutes / 60, minutes % 60)
}
