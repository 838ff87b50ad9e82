use std::sync::OnceLock;

use regex::Regex;

use crate::models::Weekday;

/// Calendar position of one session column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    pub week: u32,
    pub day: Weekday,
}

/// How a header cell spells its week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekToken {
    /// `Wk 3 Tuesday`
    Events,
    /// `W3, F1`
    Fireside,
}

impl WeekToken {
    fn pattern(&self) -> &'static Regex {
        static EVENTS: OnceLock<Regex> = OnceLock::new();
        static FIRESIDE: OnceLock<Regex> = OnceLock::new();
        match self {
            WeekToken::Events => EVENTS.get_or_init(|| compile(r"Wk (\d+)")),
            WeekToken::Fireside => FIRESIDE.get_or_init(|| compile(r"W(\d+)")),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("calendar pattern is a valid literal")
}

fn weekday_pattern() -> &'static Regex {
    static WEEKDAY: OnceLock<Regex> = OnceLock::new();
    WEEKDAY.get_or_init(|| compile(r"(Monday|Tuesday|Wednesday|Thursday|Friday)"))
}

/// Week number written in `label`. `None` for no token, an unparseable
/// number, or week 0, all of which fall back to the carried week.
pub fn extract_week(label: &str, token: WeekToken) -> Option<u32> {
    token
        .pattern()
        .captures(label)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .filter(|week| *week != 0)
}

/// First weekday named in `label`.
pub fn extract_day(label: &str) -> Weekday {
    let Some(found) = weekday_pattern().find(label) else {
        return Weekday::Unknown;
    };

    Weekday::NAMED
        .into_iter()
        .find(|day| day.name() == found.as_str())
        .unwrap_or_default()
}

/// Running state of the column fold.
#[derive(Debug, Clone, Copy, Default)]
struct Carry {
    last_week: u32,
    last_day: Weekday,
}

impl Carry {
    fn step(&mut self, label: &str, token: WeekToken) -> Slot {
        // A blank label is the tail of a merged header cell and belongs to
        // the block on its left.
        if label.trim().is_empty() {
            return Slot {
                week: self.last_week,
                day: self.last_day,
            };
        }

        if let Some(week) = extract_week(label, token) {
            self.last_week = week;
        }
        self.last_day = extract_day(label);

        Slot {
            week: self.last_week,
            day: self.last_day,
        }
    }
}

/// Parse a row of header labels into one slot per column. Columns before the
/// first week token get week 0.
pub fn parse_schedule<S: AsRef<str>>(labels: &[S], token: WeekToken) -> Vec<Slot> {
    labels
        .iter()
        .scan(Carry::default(), |carry, label| {
            Some(carry.step(label.as_ref(), token))
        })
        .collect()
}
