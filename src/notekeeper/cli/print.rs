use chrono::{DateTime, Utc};
use colored::Colorize;
use notekeeper::model::Note;
use notekeeper::notify::{Notice, NoticeKind};
use notekeeper::order::Page;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const ID_WIDTH: usize = 8;
const PIN_MARKER: &str = "⚲";

pub(super) fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => println!("{}", notice.message.green()),
            NoticeKind::Error => eprintln!("{}", notice.message.red()),
        }
    }
}

pub(super) fn print_page(page: &Page) {
    if page.is_empty() {
        if page.total_notes == 0 {
            println!("No notes found.");
        } else {
            println!("Page {} is empty ({} pages).", page.page, page.total_pages);
        }
        return;
    }

    let mut last_was_pinned = false;
    for (i, note) in page.notes.iter().enumerate() {
        if i > 0 && last_was_pinned && !note.pinned {
            println!();
        }
        last_was_pinned = note.pinned;
        print_row(note);
    }

    println!();
    println!(
        "{}",
        format!(
            "Page {} of {} ({} notes)",
            page.page, page.total_pages, page.total_notes
        )
        .dimmed()
    );
}

fn print_row(note: &Note) {
    let left_prefix = if note.pinned {
        format!("  {} ", PIN_MARKER)
    } else {
        "    ".to_string()
    };
    let id = short_id(&note.id);
    let id_str = format!("{} ", id);

    let title_line = if note.tagline.is_empty() {
        note.title.clone()
    } else {
        format!("{} · {}", note.title, note.tagline)
    };

    let fixed_width = left_prefix.width() + id_str.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let title_display = truncate_to_width(&single_line(&title_line), available);
    let padding = available.saturating_sub(title_display.width());

    let id_colored = if note.pinned {
        id_str.yellow()
    } else {
        id_str.normal()
    };

    println!(
        "{}{}{}{}{}",
        left_prefix,
        id_colored,
        title_display,
        " ".repeat(padding),
        format_time_ago(note.updated_at).dimmed()
    );
}

pub(super) fn print_full_note(note: &Note) {
    let marker = if note.pinned { PIN_MARKER } else { " " };
    println!(
        "{} {} {}",
        marker,
        short_id(&note.id).yellow(),
        note.title.bold()
    );
    if !note.tagline.is_empty() {
        println!("  {}", note.tagline.italic());
    }
    println!("--------------------------------");
    println!("{}", note.body);
    println!("--------------------------------");
    println!(
        "{}",
        format!(
            "id {}  created {}  updated {}",
            note.id,
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.updated_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(ID_WIDTH) {
        Some((pos, _)) => &id[..pos],
        None => id,
    }
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_display_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn short_id_keeps_prefix() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn single_line_flattens_newlines() {
        assert_eq!(single_line("a\nb"), "a b");
    }
}
