//! Output formatting utilities

use std::time::Duration;

use console::{measure_text_width, style, Style};
use indicatif::{ProgressBar, ProgressStyle};

use launchpad_changelog::CommitType;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// White-on-colour badge, e.g. ` ERROR `
pub fn badge(text: &str, background: Style) -> String {
    background.white().apply_to(format!(" {text} ")).to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for tags
pub fn tag_style() -> Style {
    Style::new().yellow()
}

/// Background colour for a commit type in the review table
pub fn commit_type_style(commit_type: CommitType) -> Style {
    match commit_type {
        CommitType::Feat => Style::new().on_green(),
        CommitType::Fix => Style::new().on_red(),
        CommitType::Build => Style::new().on_blue(),
        CommitType::Docs => Style::new().on_yellow(),
        CommitType::Refactor | CommitType::Other => Style::new().on_cyan(),
    }
}

/// Spinner shown while waiting on the network
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Render rows as aligned columns under a bold header.
///
/// Cells may contain ANSI styling; widths are measured on visible text.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i].saturating_sub(measure_text_width(cell));
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(
        headers.iter().map(|h| header(h)).collect(),
    ));
    lines.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let mut cells: Vec<String> = row.iter().take(columns).cloned().collect();
        cells.resize(columns, String::new());
        lines.push(render_row(cells));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        console::set_colors_enabled(false);
        let table = render_table(
            &["Type", "Ticket"],
            &[
                vec!["feat".to_string(), "1001".to_string()],
                vec!["refactor".to_string(), String::new()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Type      Ticket");
        assert_eq!(lines[1], "────────  ──────");
        assert_eq!(lines[2], "feat      1001");
        assert_eq!(lines[3], "refactor");
    }

    #[test]
    fn test_render_table_ignores_ansi_width() {
        let styled = style("feat").green().force_styling(true).to_string();
        assert!(styled.len() > 4);
        let table = render_table(&["T", "X"], &[vec![styled, "1".to_string()]]);
        let last = table.lines().last().unwrap();
        assert_eq!(measure_text_width(last), "feat  1".len());
    }

    #[test]
    fn test_short_rows_are_padded() {
        console::set_colors_enabled(false);
        let table = render_table(&["A", "B", "C"], &[vec!["x".to_string()]]);
        assert_eq!(table.lines().count(), 3);
    }
}
