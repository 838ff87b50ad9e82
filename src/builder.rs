use crate::identity::{Identity, IdentityProvider};
use crate::locator::locate_row;
use crate::models::{cell, DashboardView, ProjectStatus, SessionEntry, StudentRecord};
use crate::project::resolve_project;
use crate::schema::TableSchema;
use crate::sessions::{assemble_fireside, assemble_sessions, merge_sessions};
use crate::source::TableSource;
use crate::stats::{aggregate, parse_count, parse_percentage};

pub struct RecordBuilder<'a> {
    source: &'a dyn TableSource,
    schema: TableSchema,
    recording_url: String,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(source: &'a dyn TableSource, schema: TableSchema) -> Self {
        Self {
            source,
            schema,
            recording_url: String::new(),
        }
    }

    pub fn with_recording_url(mut self, url: impl Into<String>) -> Self {
        self.recording_url = url.into();
        self
    }

    pub async fn dashboard(&self, identity: &dyn IdentityProvider) -> DashboardView {
        let Some(identity) = identity.current() else {
            return DashboardView::NotSignedIn;
        };

        match self.build_record(&identity).await {
            Some(record) => DashboardView::Record(Box::new(record)),
            None => DashboardView::NoRecord,
        }
    }

    /// `None` when the events table cannot be read or has no row for the
    /// caller. Secondary tables only ever degrade to empty values.
    pub async fn build_record(&self, identity: &Identity) -> Option<StudentRecord> {
        let layout = &self.schema.events;
        let table = match self.source.fetch_range(&layout.range).await {
            Ok(table) => table,
            Err(err) => {
                tracing::error!(range = %layout.range, error = %err, "failed to fetch events table");
                return None;
            }
        };

        let Some(student) = locate_row(&table, layout.email_column, &identity.email) else {
            tracing::info!(email = %identity.email, "no events row for caller");
            return None;
        };

        let sessions = assemble_sessions(&table, layout, &self.schema, student);

        let mut display_name = cell(student, layout.name_column).trim().to_string();
        if display_name.is_empty() {
            display_name = identity.display_name_hint.clone().unwrap_or_default();
        }

        let (fireside, project) = tokio::join!(
            self.fireside_for(&display_name),
            self.project_for(&display_name)
        );

        let attendance = parse_percentage(cell(student, layout.attendance_column));
        // Fireside marks only count for columns that became sessions.
        let status_cells = student
            .get(layout.status_offset..)
            .unwrap_or(&[])
            .iter()
            .map(String::as_str)
            .chain(fireside.iter().map(|session| session.status.as_str()));
        let stats = aggregate(status_cells, &self.schema, attendance);

        Some(StudentRecord {
            name: cell(student, layout.name_column).to_string(),
            email: cell(student, layout.email_column).to_string(),
            school: cell(student, layout.school_column).to_string(),
            attendance,
            total_events: parse_count(cell(student, layout.total_events_column)),
            stats,
            sessions: merge_sessions(sessions, fireside),
            project,
            recording_url: self.recording_url.clone(),
        })
    }

    async fn fireside_for(&self, display_name: &str) -> Vec<SessionEntry> {
        let Some(layout) = &self.schema.fireside else {
            return Vec::new();
        };

        let table = match self.source.fetch_range(&layout.range).await {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(range = %layout.range, error = %err, "failed to fetch fireside table");
                return Vec::new();
            }
        };

        let Some(student) = locate_row(&table, layout.name_column, display_name) else {
            tracing::info!(student = display_name, "no fireside row for student");
            return Vec::new();
        };

        assemble_fireside(&table, layout, &self.schema, student)
    }

    async fn project_for(&self, display_name: &str) -> ProjectStatus {
        let Some(layout) = &self.schema.project else {
            return ProjectStatus::default();
        };

        match self.source.fetch_range(&layout.range).await {
            Ok(table) => resolve_project(&table, layout, &self.schema, display_name),
            Err(err) => {
                tracing::warn!(range = %layout.range, error = %err, "failed to fetch project table");
                ProjectStatus::default()
            }
        }
    }
}
