use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::{Direction, SortKey};
use crate::model::IndexEntry;

/// Ordering of two entries under a sort key and direction.
///
/// Dates run newest-first under `Ascending`; the direction flips that
/// baseline rather than calendar order. Title and author follow
/// [`collate`] and read `Ascending` as A→Z.
pub fn compare(a: &IndexEntry, b: &IndexEntry, key: SortKey, direction: Direction) -> Ordering {
    let ord = match key {
        // undated entries rank as oldest
        SortKey::Date => date_of(b).cmp(&date_of(a)),
        SortKey::Title => collate(&a.title, &b.title),
        SortKey::Author => collate(
            a.author.as_deref().unwrap_or(""),
            b.author.as_deref().unwrap_or(""),
        ),
    };
    match direction {
        Direction::Ascending => ord,
        Direction::Descending => ord.reverse(),
    }
}

fn date_of(e: &IndexEntry) -> Option<NaiveDate> {
    e.date.as_deref().and_then(calendar_date)
}

/// Calendar day of an ISO-8601 date or timestamp.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        .or_else(|| {
            s.get(..10)
                .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        })
}

/// Dictionary-style comparison: accents and case are ignored first, then
/// lowercase sorts before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary(a)
        .cmp(primary(b))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}
