//! Plain-text rendering of an aggregation pass.

use std::fmt::Write as _;

use showcase_core::{filter_items, AggregateResult, NormalizedItem};

const FEATURED_NAME_WIDTH: usize = 40;

/// Formats a count with `,` thousands separators.
pub(crate) fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortens `name` to `max` characters, marking the cut with `…`.
pub(crate) fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        format!("{}\u{2026}", name.chars().take(max).collect::<String>())
    } else {
        name.to_owned()
    }
}

pub(crate) fn render_stats(result: &AggregateResult) -> String {
    format!(
        "Games:        {}\nPlaying now:  {}\nTotal visits: {}\n",
        fmt_count(u64::try_from(result.item_count()).unwrap_or(u64::MAX)),
        fmt_count(result.total_playing()),
        fmt_count(result.total_visits()),
    )
}

pub(crate) fn render_featured(items: &[NormalizedItem]) -> String {
    if items.is_empty() {
        return "no featured games available\n".to_string();
    }
    let mut out = String::new();
    for (rank, item) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<43}{:>12} playing  {:>3}% liked",
            rank + 1,
            truncate_name(&item.name, FEATURED_NAME_WIDTH),
            fmt_count(item.playing),
            item.like_ratio
        );
    }
    out
}

pub(crate) fn render_grid(result: &AggregateResult, search: &str) -> String {
    let matches = filter_items(result.items(), search);
    if matches.is_empty() {
        return if search.trim().is_empty() {
            "No games found.\n".to_string()
        } else {
            format!("No games match \"{}\".\n", search.trim())
        };
    }

    let mut out = format!("{:<44}{:>12}{:>16}{:>7}\n", "NAME", "PLAYING", "VISITS", "LIKES");
    for item in matches {
        let _ = writeln!(
            out,
            "{:<44}{:>12}{:>16}{:>6}%",
            truncate_name(&item.name, FEATURED_NAME_WIDTH),
            fmt_count(item.playing),
            fmt_count(item.visits),
            item.like_ratio
        );
    }
    out
}

pub(crate) fn render_grid_error() -> String {
    "Error loading games. Check the connection or snapshot URL and try again.\n".to_string()
}
