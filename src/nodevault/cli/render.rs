//! # Rendering
//!
//! Turns command results into terminal text. Every function returns a
//! `String` so the same output can go to stdout or into a test buffer.
//! Layout math (widths, truncation, padding) is Unicode-aware.

use chrono::{DateTime, Utc};
use colored::Colorize;
use nodevault::api::{CmdMessage, MessageLevel, VaultStats};
use nodevault::model::Record;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const NAME_WIDTH: usize = 24;
pub const TIME_WIDTH: usize = 16;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.normal(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

/// One line per record: position, id, name, value and age.
pub fn render_records(records: &[Record]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let id = format!("ID {:<5}", record.id);
        let name = pad_to_width(&truncate_to_width(&record.name, NAME_WIDTH), NAME_WIDTH);
        let age = format!("{:>width$}", format_age(record), width = TIME_WIDTH);

        let fixed = idx.width() + id.width() + 1 + NAME_WIDTH + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let value = pad_to_width(&truncate_to_width(&record.value, available), available);

        out.push_str(&format!(
            "{}{} {} {}{}\n",
            idx,
            id.yellow(),
            name.bold(),
            value,
            age.dimmed()
        ));
    }
    out
}

/// Full field listing of a single record.
pub fn render_record(record: &Record) -> String {
    format!(
        "{} {}\n--------------------------------\nName:    {}\nValue:   {}\nCreated: {}\n",
        "ID".yellow(),
        record.id.to_string().yellow(),
        record.name.bold(),
        record.value,
        record.created_label()
    )
}

pub fn render_stats(stats: &VaultStats) -> String {
    let longest = stats
        .longest_name
        .as_ref()
        .map(|r| format!("{} (ID {})", r.name, r.id))
        .unwrap_or_else(|| "N/A".to_string());
    let last_modified = if stats.latest.is_some() {
        format_instant(stats.last_modified)
    } else {
        "N/A".to_string()
    };

    let rows = [
        ("Total records", stats.total.to_string()),
        ("Last modified", last_modified),
        ("Longest name", longest),
        ("Earliest record", format_optional(stats.earliest)),
        ("Latest record", format_optional(stats.latest)),
    ];

    let mut out = format!("{}\n", "Vault Statistics".bold());
    for (label, value) in rows {
        let label = format!("{:<16}", format!("{}:", label));
        out.push_str(&format!("  {} {}\n", label.dimmed(), value));
    }
    out
}

fn format_optional(instant: Option<DateTime<Utc>>) -> String {
    instant
        .map(format_instant)
        .unwrap_or_else(|| "unavailable".to_string())
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn format_age(record: &Record) -> String {
    let Some(created) = record.created_at() else {
        return "N/A".to_string();
    };
    let duration = Utc::now().signed_duration_since(created);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
