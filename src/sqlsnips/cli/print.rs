use chrono::{DateTime, Utc};
use colored::Colorize;
use sqlsnips::commands::browse::FolderContents;
use sqlsnips::model::{Folder, Snippet, SnippetCount};
use sqlsnips::pagination::Page;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 8;
const FOLDER_MARKER: &str = "▸";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_snippet_page(page: &Page<Snippet>) {
    if page.items.is_empty() {
        println!("No snippets found.");
    }
    for snippet in &page.items {
        println!("{}", snippet_line(snippet));
    }
    print_cursor(page.next_cursor.as_ref());
}

pub(super) fn print_full_snippets(snippets: &[Snippet]) {
    for (i, snippet) in snippets.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", short_id(snippet).yellow(), snippet.name.bold());
        println!("{}", snippet.id.to_string().dimmed());
        println!("--------------------------------");
        println!("{}", snippet.content.sql);
    }
}

pub(super) fn print_folders(folders: &[Folder]) {
    if folders.is_empty() {
        println!("No folders found.");
        return;
    }
    for folder in folders {
        println!("{}", folder_line(folder));
    }
}

pub(super) fn print_folder_contents(contents: &FolderContents) {
    for folder in &contents.folders {
        println!("{}", folder_line(folder));
    }
    if !contents.folders.is_empty() && !contents.contents.items.is_empty() {
        println!();
    }
    for snippet in &contents.contents.items {
        println!("{}", snippet_line(snippet));
    }
    if contents.folders.is_empty() && contents.contents.items.is_empty() {
        println!("Nothing here.");
    }
    print_cursor(contents.contents.next_cursor.as_ref());
}

pub(super) fn print_count(count: &SnippetCount) {
    println!(
        "{} snippets ({} private, {} shared, {} favorites)",
        count.total.to_string().bold(),
        count.private,
        count.shared,
        count.favorites
    );
}

fn print_cursor(cursor: Option<&uuid::Uuid>) {
    if let Some(cursor) = cursor {
        println!();
        println!("{}", format!("More results: --cursor {}", cursor).dimmed());
    }
}

fn short_id(snippet: &Snippet) -> String {
    snippet.id.to_string().chars().take(ID_WIDTH).collect()
}

fn folder_line(folder: &Folder) -> String {
    format!(
        "  {} {}  {}",
        FOLDER_MARKER.cyan(),
        folder.name.cyan().bold(),
        folder.id.to_string().dimmed()
    )
}

fn snippet_line(snippet: &Snippet) -> String {
    let left_prefix = "    ";
    let id_str = format!("{}  ", short_id(snippet));

    let preview: String = snippet
        .content
        .sql
        .chars()
        .take(60)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let title_content = if preview.trim().is_empty() {
        snippet.name.clone()
    } else {
        format!("{}  {}", snippet.name, preview.trim())
    };

    let fixed_width = left_prefix.width() + id_str.width() + TIME_WIDTH + 2;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let title_display = truncate_to_width(&title_content, available);
    let padding = available.saturating_sub(title_display.width());

    format!(
        "{}{}{}{}  {}",
        left_prefix,
        id_str.yellow(),
        title_display,
        " ".repeat(padding),
        format_time_ago(snippet.updated_at).dimmed()
    )
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters take two columns each
        let truncated = truncate_to_width("日本語のテキスト", 6);
        assert_eq!(truncated, "日本…");
        assert!(truncated.width() <= 6);
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let formatted = format_time_ago(Utc::now() - chrono::Duration::hours(2));
        assert_eq!(formatted, "   2 hours ago");
    }
}
