//! Plain-text month calendar, Monday first, laid out in 20 columns so it
//! lines up inside a code block.

use chrono::{Datelike, Month, NaiveDate};

use crate::errors::{BotError, BotResult};

const WIDTH: usize = 20;
const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

pub fn format_month(year: i32, month: u32) -> BotResult<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| BotError::InvalidInput(format!("no such month: {}-{}", year, month)))?;
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .ok_or_else(|| BotError::InvalidInput(format!("no such month: {}", month)))?;

    let mut out = String::new();
    out.push_str(center(&format!("{} {}", name, year), WIDTH).trim_end());
    out.push('\n');
    out.push_str(WEEKDAY_HEADER);
    out.push('\n');

    let offset = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["  ".to_string(); offset];
    cells.extend((1..=days_in_month(first)).map(|day| format!("{:>2}", day)));
    while cells.len() % 7 != 0 {
        cells.push("  ".to_string());
    }

    for week in cells.chunks(7) {
        out.push_str(week.join(" ").trim_end());
        out.push('\n');
    }

    Ok(out)
}

/// Calendar for the month containing `date`.
pub fn format_month_of(date: NaiveDate) -> BotResult<String> {
    format_month(date.year(), date.month())
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };

    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(margin - left))
}
