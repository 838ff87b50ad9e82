use serde::Serialize;

/// One fetched spreadsheet range: rows of cell text, ragged and positional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn row(&self, index: usize) -> &[String] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Cell text at `column`, or "" when the row is shorter.
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum StatusCode {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
    #[serde(rename = "L")]
    Late,
    #[serde(rename = "R")]
    Reflection,
    #[serde(rename = "C")]
    Conflict,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Present => "P",
            StatusCode::Absent => "A",
            StatusCode::Late => "L",
            StatusCode::Reflection => "R",
            StatusCode::Conflict => "C",
            StatusCode::Unset => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl Weekday {
    pub const NAMED: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Unknown => "",
        }
    }

    /// Sort rank within a week. Unknown days sort before Monday.
    pub fn rank(&self) -> u8 {
        match self {
            Weekday::Unknown => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    pub name: String,
    /// For fireside entries this carries the raw week-info label.
    pub speaker: String,
    pub week: u32,
    pub day: Weekday,
    pub status: StatusCode,
    pub is_fireside: bool,
}

impl SessionEntry {
    pub fn needs_recording(&self) -> bool {
        self.status == StatusCode::Absent
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub present: usize,
    pub reflection: usize,
    pub late: usize,
    pub conflict: usize,
    pub absent: usize,
    pub present_percentage: f64,
}

impl StudentStats {
    pub fn counted(&self) -> usize {
        self.present + self.reflection + self.late + self.conflict + self.absent
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStatus {
    pub status: StatusCode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    pub school: String,
    pub attendance: f64,
    pub total_events: u32,
    pub stats: StudentStats,
    pub sessions: Vec<SessionEntry>,
    pub project: ProjectStatus,
    pub recording_url: String,
}

/// What the presentation layer receives for one dashboard request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "record", rename_all = "camelCase")]
pub enum DashboardView {
    NotSignedIn,
    NoRecord,
    Record(Box<StudentRecord>),
}

impl DashboardView {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, DashboardView::NotSignedIn)
    }

    pub fn record(&self) -> Option<&StudentRecord> {
        match self {
            DashboardView::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            DashboardView::NotSignedIn => Some("Please sign in to view your attendance data."),
            DashboardView::NoRecord => Some("No data available"),
            DashboardView::Record(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceBand {
    Good,
    Fair,
    Low,
}

impl AttendanceBand {
    pub fn classify(attendance: f64) -> Self {
        if attendance >= 70.0 {
            AttendanceBand::Good
        } else if attendance >= 50.0 {
            AttendanceBand::Fair
        } else {
            AttendanceBand::Low
        }
    }
}
