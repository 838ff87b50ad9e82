use crate::calendar::{extract_day, parse_schedule, WeekToken};
use crate::models::{cell, RawTable, SessionEntry};
use crate::schema::{EventsLayout, FiresideLayout, TableSchema};

pub const FIRESIDE_SESSION_NAME: &str = "Fireside Chat";

/// Cells of `row` from `offset` on, padded with "" up to `width`.
fn columns(row: &[String], offset: usize, width: usize) -> Vec<&str> {
    (0..width).map(|index| cell(row, offset + index)).collect()
}

fn width_from(row: &[String], offset: usize) -> usize {
    row.len().saturating_sub(offset)
}

/// One entry per named session column of the events table, carrying the
/// student's status from the (separately offset) status columns.
pub fn assemble_sessions(
    table: &RawTable,
    layout: &EventsLayout,
    schema: &TableSchema,
    student: &[String],
) -> Vec<SessionEntry> {
    let name_row = table.row(layout.session_name_row);
    let width = width_from(name_row, layout.header_offset);

    let labels = columns(table.row(layout.week_day_row), layout.header_offset, width);
    let names = columns(name_row, layout.header_offset, width);
    let speakers = columns(table.row(layout.speaker_row), layout.header_offset, width);
    let schedule = parse_schedule(&labels, WeekToken::Events);

    schedule
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !names[*index].trim().is_empty())
        .map(|(index, slot)| SessionEntry {
            name: names[index].to_string(),
            speaker: speakers[index].to_string(),
            week: slot.week,
            day: slot.day,
            status: schema.parse_status(cell(student, layout.status_offset + index)),
            is_fireside: false,
        })
        .collect()
}

/// Fireside columns for one student. Columns without a week-info label are
/// not sessions.
pub fn assemble_fireside(
    table: &RawTable,
    layout: &FiresideLayout,
    schema: &TableSchema,
    student: &[String],
) -> Vec<SessionEntry> {
    let info_row = table.row(layout.week_info_row);
    let width = width_from(info_row, layout.column_offset);

    let infos = columns(info_row, layout.column_offset, width);
    let days = columns(table.row(layout.days_row), layout.column_offset, width);
    let weeks = parse_schedule(&infos, WeekToken::Fireside);

    weeks
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !infos[*index].trim().is_empty())
        .map(|(index, slot)| SessionEntry {
            name: FIRESIDE_SESSION_NAME.to_string(),
            speaker: infos[index].to_string(),
            week: slot.week,
            day: extract_day(days[index]),
            status: schema.parse_status(cell(student, layout.column_offset + index)),
            is_fireside: true,
        })
        .collect()
}

/// Order by week, then weekday (unknown first). Stable for equal keys.
pub fn sort_sessions(sessions: &mut [SessionEntry]) {
    sessions.sort_by_key(|session| (session.week, session.day.rank()));
}

pub fn merge_sessions(primary: Vec<SessionEntry>, fireside: Vec<SessionEntry>) -> Vec<SessionEntry> {
    let mut merged = primary;
    merged.extend(fireside);
    sort_sessions(&mut merged);
    merged
}

/// Sessions grouped by week, weeks ascending. Input order is kept inside a
/// group.
pub fn group_by_week(sessions: &[SessionEntry]) -> Vec<(u32, Vec<&SessionEntry>)> {
    let mut groups: std::collections::BTreeMap<u32, Vec<&SessionEntry>> =
        std::collections::BTreeMap::new();

    for session in sessions {
        groups.entry(session.week).or_default().push(session);
    }

    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StatusCode, Weekday};

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn entry(name: &str, week: u32, day: Weekday, is_fireside: bool) -> SessionEntry {
        SessionEntry {
            name: name.to_string(),
            speaker: String::new(),
            week,
            day,
            status: StatusCode::Unset,
            is_fireside,
        }
    }

    fn current_events() -> RawTable {
        RawTable::new(vec![
            row(&["", "", "", "", "", "Wk 1 Monday", "", "Wk 2 Tuesday"]),
            row(&["", "", "", "", "", "Intro", "Followup", "Workshop"]),
            row(&["", "", "", "", "", "Alice", "Alice", "Bob"]),
        ])
    }

    #[test]
    fn assembles_named_columns_with_statuses() {
        let schema = TableSchema::current();
        let student = row(&["Jane Doe", "jane@example.com", "State", "90", "3", "P", "P", "L"]);
        let sessions = assemble_sessions(&current_events(), &schema.events, &schema, &student);

        let summary: Vec<(&str, u32, Weekday, StatusCode)> = sessions
            .iter()
            .map(|s| (s.name.as_str(), s.week, s.day, s.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Intro", 1, Weekday::Monday, StatusCode::Present),
                ("Followup", 1, Weekday::Monday, StatusCode::Present),
                ("Workshop", 2, Weekday::Tuesday, StatusCode::Late),
            ]
        );
        assert_eq!(sessions[2].speaker, "Bob");
    }

    #[test]
    fn skips_unnamed_columns_and_defaults_missing_status() {
        let schema = TableSchema::current();
        let table = RawTable::new(vec![
            row(&["", "", "", "", "", "Wk 1 Monday", "Wk 1 Tuesday", "Wk 1 Friday"]),
            row(&["", "", "", "", "", "Intro", "", "Retro"]),
            row(&["", "", "", "", "", "Alice"]),
        ]);
        let student = row(&["Jane Doe", "jane@example.com", "", "", "", "A"]);
        let sessions = assemble_sessions(&table, &schema.events, &schema, &student);

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].status, StatusCode::Absent);
        assert_eq!(sessions[1].name, "Retro");
        assert_eq!(sessions[1].day, Weekday::Friday);
        assert_eq!(sessions[1].speaker, "");
        assert_eq!(sessions[1].status, StatusCode::Unset);
    }

    #[test]
    fn legacy_statuses_use_their_own_offset() {
        let schema = TableSchema::legacy();
        let mut labels = vec![""; 11];
        labels.push("Wk 1 Wednesday");
        let mut names = vec![""; 11];
        names.push("Kickoff");
        let table = RawTable::new(vec![row(&labels), row(&names), row(&[])]);
        let student = row(&["Jules", "jules@example.com", "State", "50", "1", "C"]);

        let sessions = assemble_sessions(&table, &schema.events, &schema, &student);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].status, StatusCode::Conflict);
        assert_eq!(sessions[0].day, Weekday::Wednesday);
    }

    #[test]
    fn fireside_entries_carry_week_info_as_speaker() {
        let schema = TableSchema::current();
        let layout = schema.fireside.clone().unwrap();
        let table = RawTable::new(vec![
            row(&["", "Thursday", "", "Friday"]),
            row(&["", "W3, F1", "", "W4, F2"]),
            row(&["Jane Doe", "A", "P", "P"]),
        ]);
        let sessions = assemble_fireside(&table, &layout, &schema, table.row(2));

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].name, FIRESIDE_SESSION_NAME);
        assert_eq!(sessions[0].speaker, "W3, F1");
        assert_eq!(sessions[0].week, 3);
        assert_eq!(sessions[0].day, Weekday::Thursday);
        assert_eq!(sessions[0].status, StatusCode::Absent);
        assert!(sessions[0].is_fireside);
        assert_eq!(sessions[1].week, 4);
        assert_eq!(sessions[1].status, StatusCode::Present);
    }

    #[test]
    fn merge_orders_by_week_then_weekday() {
        let primary = vec![
            entry("Workshop", 2, Weekday::Tuesday, false),
            entry("Intro", 1, Weekday::Monday, false),
            entry("Panel", 4, Weekday::Friday, false),
        ];
        let fireside = vec![entry(FIRESIDE_SESSION_NAME, 3, Weekday::Unknown, true)];
        let merged = merge_sessions(primary, fireside);

        let names: Vec<&str> = merged.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Intro", "Workshop", FIRESIDE_SESSION_NAME, "Panel"]);
    }

    #[test]
    fn unknown_day_sorts_first_within_week() {
        let mut sessions = vec![
            entry("Monday talk", 2, Weekday::Monday, false),
            entry("Unscheduled", 2, Weekday::Unknown, false),
        ];
        sort_sessions(&mut sessions);
        assert_eq!(sessions[0].name, "Unscheduled");
    }

    #[test]
    fn sorting_is_stable_and_idempotent() {
        let mut sessions = vec![
            entry("b", 1, Weekday::Monday, false),
            entry("a", 1, Weekday::Monday, false),
            entry("fireside", 1, Weekday::Monday, true),
            entry("early", 0, Weekday::Unknown, false),
        ];
        sort_sessions(&mut sessions);
        let once = sessions.clone();
        sort_sessions(&mut sessions);

        assert_eq!(sessions, once);
        let names: Vec<&str> = sessions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["early", "b", "a", "fireside"]);
    }

    #[test]
    fn groups_weeks_in_ascending_order() {
        let sessions = vec![
            entry("x", 2, Weekday::Monday, false),
            entry("y", 1, Weekday::Monday, false),
            entry("z", 2, Weekday::Friday, false),
        ];
        let groups = group_by_week(&sessions);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 1);
        let names: Vec<&str> = groups[1].1.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["x", "z"]);
    }
}
