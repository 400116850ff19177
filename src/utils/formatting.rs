//! Locale-aware formatting for numbers, percentages and dates
//!
//! The dashboard is Brazilian, so pt-BR is the default everywhere: `.` as
//! the thousands separator, `,` as the decimal separator and Portuguese
//! month and weekday names.

use crate::error::UtilsError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use std::fmt;
use std::str::FromStr;

/// Maximum fraction digits kept by [`format_number`]
const MAX_FRACTION_DIGITS: usize = 3;

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    EnUs,
}

impl Locale {
    fn separators(&self) -> (char, char) {
        match self {
            Locale::PtBr => ('.', ','),
            Locale::EnUs => (',', '.'),
        }
    }
}

impl FromStr for Locale {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en_us" | "en" => Ok(Locale::EnUs),
            _ => Err(UtilsError::Validation {
                message: format!("Unsupported locale '{}'", s),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::EnUs => write!(f, "en-US"),
        }
    }
}

/// Date presentation styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DateFormat {
    /// 15/01/2024
    #[default]
    Short,
    /// segunda-feira, 15 de janeiro de 2024
    Long,
    /// janeiro de 2024
    Month,
}

/// Format a number with locale grouping, keeping up to three fraction digits.
pub fn format_number(value: f64, locale: Locale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (group_sep, decimal_sep) = locale.separators();
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut result = String::new();
    if value.is_sign_negative() && !is_zero {
        result.push('-');
    }
    result.push_str(&grouped);
    if !frac_part.is_empty() {
        result.push(decimal_sep);
        result.push_str(frac_part);
    }
    result
}

/// Format `value / total` as a percentage. A zero total yields `"0%"`.
pub fn format_percentage(value: f64, total: f64, decimals: usize) -> String {
    if total == 0.0 {
        return "0%".to_string();
    }
    let percentage = (value / total) * 100.0;
    format!("{:.*}%", decimals, percentage)
}

fn parse_date(input: &str) -> Result<NaiveDate, UtilsError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Ok(date);
    }

    Err(UtilsError::DateParse {
        input: input.to_string(),
    })
}

fn weekday_pt_br(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Format a date string in pt-BR.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and
/// `DD/MM/YYYY`.
pub fn format_date(input: &str, format: DateFormat) -> Result<String, UtilsError> {
    let date = parse_date(input)?;
    let month = MONTHS_PT_BR[date.month0() as usize];

    let formatted = match format {
        DateFormat::Short => date.format("%d/%m/%Y").to_string(),
        DateFormat::Long => format!(
            "{}, {} de {} de {}",
            weekday_pt_br(date.weekday()),
            date.day(),
            month,
            date.year()
        ),
        DateFormat::Month => format!("{} de {}", month, date.year()),
    };

    Ok(formatted)
}
