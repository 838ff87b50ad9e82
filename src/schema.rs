use clap::ValueEnum;

use crate::models::StatusCode;

/// The attendance workbook went through two layouts. Each one is a
/// configuration value; parsing code never hard-codes column numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaRevision {
    /// Single sheet, conflict code `C` still in use.
    Legacy,
    /// Events, fireside chats and project on separate tabs.
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsLayout {
    pub range: String,
    pub name_column: usize,
    pub email_column: usize,
    pub school_column: usize,
    pub attendance_column: usize,
    pub total_events_column: usize,
    pub week_day_row: usize,
    pub session_name_row: usize,
    pub speaker_row: usize,
    /// First column of the header rows holding session labels.
    pub header_offset: usize,
    /// First column of a student row holding session statuses.
    pub status_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiresideLayout {
    pub range: String,
    pub days_row: usize,
    pub week_info_row: usize,
    pub name_column: usize,
    pub column_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub range: String,
    pub name_column: usize,
    pub status_column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub revision: SchemaRevision,
    pub events: EventsLayout,
    pub fireside: Option<FiresideLayout>,
    pub project: Option<ProjectLayout>,
}

impl TableSchema {
    pub fn for_revision(revision: SchemaRevision) -> Self {
        match revision {
            SchemaRevision::Legacy => Self::legacy(),
            SchemaRevision::Current => Self::current(),
        }
    }

    pub fn legacy() -> Self {
        Self {
            revision: SchemaRevision::Legacy,
            events: EventsLayout {
                range: "A:ZZ".to_string(),
                name_column: 0,
                email_column: 1,
                school_column: 2,
                attendance_column: 3,
                total_events_column: 4,
                week_day_row: 0,
                session_name_row: 1,
                speaker_row: 2,
                header_offset: 11,
                status_offset: 5,
            },
            fireside: None,
            project: None,
        }
    }

    pub fn current() -> Self {
        Self {
            revision: SchemaRevision::Current,
            events: EventsLayout {
                range: "Events!A:ZZ".to_string(),
                name_column: 0,
                email_column: 1,
                school_column: 2,
                attendance_column: 3,
                total_events_column: 4,
                week_day_row: 0,
                session_name_row: 1,
                speaker_row: 2,
                header_offset: 5,
                status_offset: 5,
            },
            fireside: Some(FiresideLayout {
                range: "Fireside Chats!A:ZZ".to_string(),
                days_row: 0,
                week_info_row: 1,
                name_column: 0,
                column_offset: 1,
            }),
            project: Some(ProjectLayout {
                range: "Project!A:ZZ".to_string(),
                name_column: 0,
                status_column: 1,
            }),
        }
    }

    /// Classify one status cell. Exact, case-sensitive single letters only;
    /// anything else is unset.
    pub fn parse_status(&self, text: &str) -> StatusCode {
        match text {
            "P" => StatusCode::Present,
            "A" => StatusCode::Absent,
            "L" => StatusCode::Late,
            "R" => StatusCode::Reflection,
            "C" if self.revision == SchemaRevision::Legacy => StatusCode::Conflict,
            _ => StatusCode::Unset,
        }
    }
}
