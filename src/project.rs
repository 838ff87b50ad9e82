use serde::Serialize;

use crate::locator::locate_row;
use crate::models::{cell, ProjectStatus, RawTable, StatusCode};
use crate::schema::{ProjectLayout, TableSchema};

/// Project status for the student named `display_name`. A missing row or
/// cell resolves to unset.
pub fn resolve_project(
    table: &RawTable,
    layout: &ProjectLayout,
    schema: &TableSchema,
    display_name: &str,
) -> ProjectStatus {
    let status = locate_row(table, layout.name_column, display_name)
        .map(|row| schema.parse_status(cell(row, layout.status_column)))
        .unwrap_or_default();

    ProjectStatus { status }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectProgress {
    Completed,
    InProgress,
}

impl ProjectProgress {
    /// `A` counts as completed alongside `P`. The dashboard has always shown
    /// it this way.
    pub fn classify(project: &ProjectStatus) -> Self {
        match project.status {
            StatusCode::Present | StatusCode::Absent => ProjectProgress::Completed,
            _ => ProjectProgress::InProgress,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectProgress::Completed => "Completed",
            ProjectProgress::InProgress => "In progress",
        }
    }
}
