use std::sync::OnceLock;

use regex::Regex;

use crate::models::{StatusCode, StudentStats};
use crate::schema::TableSchema;

/// Count status codes across `cells`. `attendance` is the sheet's own
/// percentage and is copied through untouched.
pub fn aggregate<'a, I>(cells: I, schema: &TableSchema, attendance: f64) -> StudentStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = StudentStats {
        present_percentage: attendance,
        ..StudentStats::default()
    };

    for text in cells {
        match schema.parse_status(text) {
            StatusCode::Present => stats.present += 1,
            StatusCode::Absent => stats.absent += 1,
            StatusCode::Late => stats.late += 1,
            StatusCode::Reflection => stats.reflection += 1,
            StatusCode::Conflict => stats.conflict += 1,
            StatusCode::Unset => {}
        }
    }

    stats
}

fn leading_number() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"^\s*[-+]?(\d+\.?\d*|\.\d+)").expect("number pattern is a valid literal")
    })
}

/// Leading decimal number of a cell (`"85.5%"` is 85.5). Blank or
/// non-numeric text reads as 0.
pub fn parse_percentage(text: &str) -> f64 {
    leading_number()
        .find(text)
        .and_then(|found| found.as_str().trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Leading whole number of a cell, 0 when there is none.
pub fn parse_count(text: &str) -> u32 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
