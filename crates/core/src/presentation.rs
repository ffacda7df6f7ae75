//! Display helpers that turn raw todo records into render-ready fields.
//!
//! Everything here is pure. Absent inputs render as empty strings so the
//! presentation layer never has to special-case `None`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::todo::{Todo, TodoStatus};
use crate::types::{Date, DbId};

/// Appended by [`truncate`] when text is shortened.
pub const ELLIPSIS: char = '…';

/// Character budget for the description excerpt shown in list rows.
pub const EXCERPT_LENGTH: usize = 100;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid regex")
});
static BLOCK_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|tr|blockquote)\s*>").expect("valid regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// A todo is overdue when its due date is strictly before `today` and it is
/// not in a terminal status.
pub fn is_overdue(todo: &Todo, today: Date) -> bool {
    match todo.due_date {
        Some(due) => due < today && !todo.status.is_terminal(),
        None => false,
    }
}

/// Shorten `text` to `max_len` characters plus [`ELLIPSIS`].
///
/// Text at or under the limit is returned unchanged.
pub fn truncate(text: Option<&str>, max_len: usize) -> String {
    let text = text.unwrap_or_default();
    let mut chars = text.char_indices();
    match chars.nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&text[..cut]);
            out.push(ELLIPSIS);
            out
        }
    }
}

/// Extract plain text from marked-up content.
///
/// Drops `<script>`/`<style>` bodies, turns block-level breaks into spaces,
/// removes remaining tags, decodes character entities, and collapses runs
/// of whitespace.
pub fn strip_markup(text: Option<&str>) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    let without_code = SCRIPT_STYLE_RE.replace_all(text, "");
    let with_breaks = BLOCK_BREAK_RE.replace_all(&without_code, " ");
    let without_tags = TAG_RE.replace_all(&with_breaks, "");
    let decoded = ENTITY_RE.replace_all(&without_tags, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });

    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        _ => return None,
    };
    Some(decoded.to_string())
}

/// `"Jan 5, 2025"` style date; empty when absent.
pub fn format_date(date: Option<Date>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Class token used by the presentation layer to colour a status badge.
pub fn status_class(status: &TodoStatus) -> &'static str {
    match status {
        TodoStatus::Open => "status-open",
        TodoStatus::Started => "status-started",
        TodoStatus::Completed => "status-completed",
        TodoStatus::Cancelled => "status-cancelled",
        TodoStatus::Unknown(_) => "status-unknown",
    }
}

/// Human-readable status label.
pub fn status_label(status: &TodoStatus) -> String {
    match status {
        TodoStatus::Open => "Open".to_string(),
        TodoStatus::Started => "In Progress".to_string(),
        TodoStatus::Completed => "Completed".to_string(),
        TodoStatus::Cancelled => "Cancelled".to_string(),
        TodoStatus::Unknown(raw) => raw.clone(),
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Display-ready projection of a single todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoRow {
    pub id: DbId,
    pub title: String,
    pub excerpt: String,
    pub status_class: &'static str,
    pub status_label: String,
    pub category: String,
    pub due_date: String,
    pub created_at: String,
    pub overdue: bool,
    pub quadrant: Option<&'static str>,
}

impl TodoRow {
    pub fn from_todo(todo: &Todo, today: Date) -> Self {
        let plain = strip_markup(todo.description.as_deref());
        Self {
            id: todo.id,
            title: todo.title.clone(),
            excerpt: truncate(Some(plain.as_str()), EXCERPT_LENGTH),
            status_class: status_class(&todo.status),
            status_label: status_label(&todo.status),
            category: todo.category.clone().unwrap_or_default(),
            due_date: format_date(todo.due_date),
            created_at: format_date(Some(todo.created_at.date_naive())),
            overdue: is_overdue(todo, today),
            quadrant: todo.quadrant().map(|q| q.label()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
