//! Plain-text rendering of list snapshots.

use std::fmt::Write;

use todoview_client::controller::{ViewSnapshot, ViewState};
use todoview_core::presentation::TodoRow;
use todoview_core::scope::Scope;

/// Render a snapshot as a plain-text table.
pub fn render_plain(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", title(snapshot));
    if snapshot.state == ViewState::Errored {
        if let Some(ref message) = snapshot.error {
            let _ = writeln!(out, "error: {message}");
        }
    }
    let counts = &snapshot.counts;
    let _ = writeln!(
        out,
        "{} total | {} open | {} in progress | {} completed | {} overdue",
        snapshot.total_count, counts.open, counts.started, counts.completed, counts.overdue
    );

    let rows = snapshot.rows();
    if rows.is_empty() {
        let _ = writeln!(out, "(no todos)");
    }
    for row in &rows {
        let _ = writeln!(out, "{}", render_row(row));
    }

    if snapshot.has_more {
        let _ = writeln!(
            out,
            "... showing {} of {} (use --all to load everything)",
            rows.len(),
            snapshot.total_count
        );
    }
    out
}

fn title(snapshot: &ViewSnapshot) -> String {
    let header = snapshot.header.as_ref();
    match snapshot.scope {
        Scope::Unclassified => "Unclassified todos".to_string(),
        Scope::Project(id) => {
            let project = header
                .and_then(|h| h.project.as_ref())
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("Project {id}"));
            match header.and_then(|h| h.organization.as_ref()) {
                Some(org) => format!("{} / {project}", org.name),
                None => project,
            }
        }
        Scope::Organization(id) => header
            .and_then(|h| h.organization.as_ref())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| format!("Organization {id}")),
    }
}

fn render_row(row: &TodoRow) -> String {
    let mut line = format!("#{:<6} [{:<11}] {}", row.id, row.status_label, row.title);
    if !row.due_date.is_empty() {
        let _ = write!(line, "  due {}", row.due_date);
    }
    if row.overdue {
        line.push_str(" (overdue)");
    }
    if let Some(quadrant) = row.quadrant {
        let _ = write!(line, "  <{quadrant}>");
    }
    if !row.category.is_empty() {
        let _ = write!(line, "  #{}", row.category);
    }
    if !row.excerpt.is_empty() {
        let _ = write!(line, "\n         {}", row.excerpt);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use todoview_client::controller::ScopeHeader;
    use todoview_core::sort_policy::StatusCounts;
    use todoview_core::todo::{Project, Todo, TodoStatus};

    fn snapshot(items: Vec<Todo>, has_more: bool) -> ViewSnapshot {
        let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        ViewSnapshot {
            scope: Scope::Project(4),
            state: ViewState::Ready,
            counts: StatusCounts::from_items(&items, today),
            total_count: items.len() + usize::from(has_more),
            items,
            has_more,
            error: None,
            header: Some(ScopeHeader {
                project: Some(Project {
                    id: 4,
                    name: "Launch".into(),
                    description: None,
                    organization_id: None,
                }),
                organization: None,
            }),
            today,
        }
    }

    fn todo(id: i64, status: TodoStatus) -> Todo {
        Todo {
            id,
            title: format!("Todo {id}"),
            description: Some("<p>Some <em>notes</em></p>".into()),
            status,
            category: Some("ops".into()),
            urgency: None,
            importance: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 20),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            project_id: Some(4),
            organization_id: None,
        }
    }

    #[test]
    fn renders_title_counts_and_rows() {
        let out = render_plain(&snapshot(vec![todo(1, TodoStatus::Open)], false));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Launch");
        assert_eq!(lines[1], "1 total | 1 open | 0 in progress | 0 completed | 1 overdue");
        assert!(lines[2].starts_with("#1"));
        assert!(lines[2].contains("due Jan 20, 2025 (overdue)"));
        assert!(lines[2].contains("#ops"));
        assert_eq!(lines[3].trim(), "Some notes");
    }

    #[test]
    fn mentions_more_pages() {
        let out = render_plain(&snapshot(vec![todo(1, TodoStatus::Completed)], true));
        assert!(out.contains("showing 1 of 2"));
        assert!(!out.contains("overdue)"));
    }

    #[test]
    fn empty_list_placeholder() {
        let out = render_plain(&snapshot(vec![], false));
        assert!(out.contains("(no todos)"));
    }
}
