use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{AttendanceBand, DashboardView, StudentRecord};
use crate::project::ProjectProgress;
use crate::sessions::group_by_week;

fn band_label(band: AttendanceBand) -> &'static str {
    match band {
        AttendanceBand::Good => "on track",
        AttendanceBand::Fair => "needs attention",
        AttendanceBand::Low => "at risk",
    }
}

pub fn build_report(view: &DashboardView, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Dashboard");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);

    match view.record() {
        Some(record) => write_record(&mut output, record),
        None => {
            let _ = writeln!(output, "{}", view.message().unwrap_or_default());
        }
    }

    output
}

fn write_record(output: &mut String, record: &StudentRecord) {
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Name: {}", record.name);
    if !record.school.is_empty() {
        let _ = writeln!(output, "- School: {}", record.school);
    }
    let _ = writeln!(
        output,
        "- Attendance rate: {}% ({})",
        record.attendance,
        band_label(AttendanceBand::classify(record.attendance))
    );
    let _ = writeln!(output, "- Total events: {}", record.total_events);

    let stats = &record.stats;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Counts");
    let _ = writeln!(output, "- Present: {}", stats.present);
    let _ = writeln!(output, "- Reflection: {}", stats.reflection);
    let _ = writeln!(output, "- Late: {}", stats.late);
    if stats.conflict > 0 {
        let _ = writeln!(output, "- Conflict: {}", stats.conflict);
    }
    let _ = writeln!(output, "- Absent: {}", stats.absent);
    let _ = writeln!(output, "- Marked sessions: {}", stats.counted());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Sessions");

    if record.sessions.is_empty() {
        let _ = writeln!(output, "No sessions recorded yet.");
    }

    for (week, sessions) in group_by_week(&record.sessions) {
        let _ = writeln!(output);
        let _ = writeln!(output, "### Week {} ({} sessions)", week, sessions.len());
        for session in sessions {
            let day = if session.day.name().is_empty() {
                "TBD"
            } else {
                session.day.name()
            };
            let tag = if session.is_fireside { "[Fireside] " } else { "" };
            let status = if session.status.as_str().is_empty() {
                "-"
            } else {
                session.status.as_str()
            };
            let _ = write!(
                output,
                "- {}: {}{} ({}) {}",
                day, tag, session.name, session.speaker, status
            );
            if session.needs_recording() && !record.recording_url.is_empty() {
                let _ = write!(output, " [watch recording]({})", record.recording_url);
            }
            let _ = writeln!(output);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Project");
    let _ = writeln!(output, "{}", ProjectProgress::classify(&record.project).label());
}
