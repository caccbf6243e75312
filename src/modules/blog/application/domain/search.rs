use std::sync::LazyLock;

use chrono::{Months, NaiveDate};
use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidDateFilter {
    #[error("Date must look like YYYY, YYYY-MM or YYYY-MM-DD")]
    Shape,

    #[error("Date contains a non-numeric part")]
    NotNumeric,

    #[error("Date is out of range")]
    OutOfRange,
}

/// A year, a month or a single day of publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Year(i32),
    Month(i32, u32),
    Day(NaiveDate),
}

impl DateFilter {
    /// Blank input means "no date filter".
    pub fn parse(raw: &str) -> Result<Option<Self>, InvalidDateFilter> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let parts: Vec<&str> = NON_WORD.split(raw).collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(InvalidDateFilter::Shape);
        }

        let numbers = parts
            .iter()
            .map(|p| {
                if p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()) {
                    return Err(InvalidDateFilter::NotNumeric);
                }
                p.parse::<u32>().map_err(|_| InvalidDateFilter::OutOfRange)
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let year = i32::try_from(numbers[0]).map_err(|_| InvalidDateFilter::OutOfRange)?;
        if !(1..=9999).contains(&year) {
            return Err(InvalidDateFilter::OutOfRange);
        }

        let filter = match numbers[..] {
            [_] => DateFilter::Year(year),
            [_, month] => {
                if !(1..=12).contains(&month) {
                    return Err(InvalidDateFilter::OutOfRange);
                }
                DateFilter::Month(year, month)
            }
            [_, month, day] => DateFilter::Day(
                NaiveDate::from_ymd_opt(year, month, day).ok_or(InvalidDateFilter::OutOfRange)?,
            ),
            _ => return Err(InvalidDateFilter::Shape),
        };

        Ok(Some(filter))
    }

    /// Half-open `[start, end)` range of calendar days.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            DateFilter::Year(y) => {
                let start = first_of(y, 1);
                (start, start + Months::new(12))
            }
            DateFilter::Month(y, m) => {
                let start = first_of(y, m);
                (start, start + Months::new(1))
            }
            DateFilter::Day(d) => (d, d + chrono::Days::new(1)),
        }
    }
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    // parse() only builds in-range years and months
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Conditions on published posts; every set field must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub category_slug: Option<String>,
    pub author_username: Option<String>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the title or the body.
    pub text: Option<String>,
    pub date: Option<DateFilter>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl PostFilter {
    pub fn by_category(slug: &str) -> Self {
        Self {
            category_slug: Some(slug.to_string()),
            ..Self::default()
        }
    }

    pub fn by_author(username: &str) -> Self {
        Self {
            author_username: Some(username.to_string()),
            ..Self::default()
        }
    }

    pub fn search(
        author: Option<&str>,
        title: Option<&str>,
        text: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, InvalidDateFilter> {
        Ok(Self {
            category_slug: None,
            author_username: non_blank(author),
            title: non_blank(title),
            text: non_blank(text),
            date: match date {
                Some(raw) => DateFilter::parse(raw)?,
                None => None,
            },
        })
    }
}
