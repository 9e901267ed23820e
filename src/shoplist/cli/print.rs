use chrono::{DateTime, Local};
use colored::Colorize;
use shoplist::api::{CmdMessage, CountdownReport, MessageLevel};
use shoplist::config::{ShopConfig, CONFIG_KEYS};
use shoplist::model::now_millis;
use shoplist::order::{DisplayIndex, DisplayItem};
use std::time::Duration;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 72;
const TIME_WIDTH: usize = 16;
const DONE_MARKER: &str = "✓";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_items(items: &[DisplayItem]) {
    if items.is_empty() {
        println!("Your shopping list is empty");
        return;
    }

    let now = now_millis();
    let mut last_was_active = false;
    for di in items {
        let is_completed = matches!(di.index, DisplayIndex::Completed(_));
        if last_was_active && is_completed {
            println!();
        }
        last_was_active = !is_completed;

        let idx_str = format!("{}. ", di.index);
        let left_prefix = if is_completed {
            format!("  {} ", DONE_MARKER)
        } else {
            "    ".to_string()
        };

        let stamp = di
            .item
            .completed_at_timestamp
            .unwrap_or(di.item.last_updated_timestamp);
        let time_ago = format_time_ago(now, stamp);

        let fixed_width = left_prefix.width() + idx_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name = truncate_to_width(&di.item.name, available);
        let padding = available.saturating_sub(name.width());

        let (idx_colored, name_colored) = if is_completed {
            (idx_str.dimmed(), name.dimmed().strikethrough())
        } else {
            (idx_str.yellow(), name.normal())
        };

        println!(
            "{}{}{}{}{}",
            left_prefix,
            idx_colored,
            name_colored,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_countdown(report: &CountdownReport) {
    let status = &report.status;
    if status.is_overdue {
        println!("{} {}", "Overdue by".red().bold(), status.distance);
    } else {
        println!("{} {}", "Due in".green().bold(), status.distance);
    }
    if let Some(due) = status.due_at_utc() {
        println!(
            "{}",
            format!("Due at {}", due.with_timezone(&Local).format(DATE_FORMAT)).dimmed()
        );
    }

    if report.history.is_empty() {
        println!("{}", "Never done yet.".dimmed());
        return;
    }

    let now = now_millis();
    println!();
    for stamp in &report.history {
        let when = DateTime::from_timestamp_millis(*stamp)
            .map(|dt| dt.with_timezone(&Local).format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| stamp.to_string());
        println!("  {}  {}", when, format_time_ago(now, *stamp).trim().dimmed());
    }
}

pub(super) fn print_config(config: &ShopConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
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
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(now: i64, stamp: i64) -> String {
    let elapsed = Duration::from_millis(now.saturating_sub(stamp).max(0) as u64);
    let formatter = Formatter::new();
    format!("{:>width$}", formatter.convert(elapsed), width = TIME_WIDTH)
}
