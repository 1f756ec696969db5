// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the chunkweave CLI.
//!
//! Box-drawn tables with injected rows highlighted. Colors follow the
//! terminal: off when stdout is not a TTY or `NO_COLOR` is set.

use chunkweave::{ReportRow, SimulationReport};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply styles if colors are on, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad to `width` visible characters.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Cut to `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(s: &str) -> String {
    styled(&[GRAY], s)
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    println!("{}{}{}", border("│"), pad_right(content, BOX_WIDTH), border("│"));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", styled(&[BOLD, CYAN], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print section bottom: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// ROWS
// ═══════════════════════════════════════════════════════════════════════════

/// Badge for a row's origin.
pub fn origin_badge(injected: bool) -> String {
    if injected {
        styled(&[BOLD, YELLOW], "INJECTED")
    } else {
        styled(&[DIM], "primary ")
    }
}

/// One table line: position, id, type, title, origin.
pub fn format_row(position: usize, row: &ReportRow) -> String {
    let post = &row.post;
    format!(
        " {:>3}  {:>8}  {}  {}  {}",
        position + 1,
        post.id,
        pad_right(&truncate(&post.post_type, 10), 10),
        pad_right(&truncate(&post.title, 30), 30),
        origin_badge(row.is_injected())
    )
}

/// Print the rows of a report as a table.
pub fn print_report(label: &str, report: &SimulationReport) {
    section_top(label);
    row(&styled(
        &[DIM],
        &format!(
            " {:>3}  {:>8}  {}  {}  {}",
            "#",
            "id",
            pad_right("type", 10),
            pad_right("title", 30),
            "origin"
        ),
    ));
    for (i, r) in report.rows.iter().enumerate() {
        row(&format_row(i, r));
    }
    section_bot();

    let summary = format!(
        "{} rows, {} injected, {} site(s) registered",
        report.rows.len(),
        report.injected_count(),
        report.registered.len()
    );
    println!("{}", styled(&[GREEN], &summary));
    for refusal in &report.refused {
        println!("{} {}", styled(&[YELLOW], "refused:"), refusal);
    }
}

/// Print a fetch plan.
pub fn print_plan(page_size: usize, before_each: usize, per_inject: usize, fetch: usize) {
    section_top("PLAN");
    row(&format!(" page size            {}", page_size));
    row(&format!(" before each inject   {}", before_each));
    row(&format!(" per inject           {}", per_inject));
    row(&format!(
        " secondary to fetch   {}",
        styled(&[BOLD, GREEN], &fetch.to_string())
    ));
    section_bot();
}
