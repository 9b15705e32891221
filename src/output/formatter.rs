use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::benchmark::ReferenceListing;
use crate::pipeline::{ScoredTable, Summary};
use crate::scoring::Category;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Category label padded to a fixed width, colored by band
pub fn format_category(category: Category, use_colors: bool) -> String {
    let padded = format!("{:<17}", category.as_str());
    if !use_colors {
        return padded;
    }
    match category {
        Category::TopPerformer => padded.green().bold().to_string(),
        Category::AboveAverage => padded.green().to_string(),
        Category::Average => padded.yellow().to_string(),
        Category::BelowAverage => padded.magenta().to_string(),
        Category::NeedsImprovement => padded.red().to_string(),
    }
}

/// Ratio with two decimals, or "-" when undefined
pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "-".to_string())
}

/// Format scored rows as a table with columns: Index, Score, Category,
/// Ratio, Building, Match
/// No headers (minimal format)
/// Index column: 3 chars (fits "99."), right-aligned
pub fn format_results_table(table: &ScoredTable, use_colors: bool) -> String {
    if table.records.is_empty() {
        return "No buildings scored.".to_string();
    }

    let term_width = get_terminal_width();
    let separator = "  ";
    // index 3 + space + score 3 + category 17 + ratio 6, plus separators
    let fixed_width = 3 + 1 + 3 + 17 + 6 + separator.len() * 4;

    table
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>3}", record.score);
            let ratio_str = format!("{:>6}", format_ratio(record.performance_ratio));

            let label = match record.building_name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => format!("{} ({} / {})", name, record.building_type, record.region),
                None => format!("{} / {}", record.building_type, record.region),
            };
            let detail = if record.notes.is_empty() {
                format!("{}  [{}]", label, record.match_status)
            } else {
                format!("{}  [{}] {}", label, record.match_status, record.notes)
            };

            let detail = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&detail, width - fixed_width),
                Some(_) => truncate(&detail, 20),
                None => detail,
            };

            if use_colors {
                let detail = if record.match_status.is_resolved() {
                    detail
                } else {
                    detail.dimmed().to_string()
                };
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    format_category(record.category, true),
                    separator,
                    ratio_str,
                    separator,
                    detail
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    score_str,
                    separator,
                    format_category(record.category, false),
                    separator,
                    ratio_str,
                    separator,
                    detail
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line run summary, e.g. "3 buildings: 2 exact, 1 no match (mean score 61.3)"
pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let mut parts = vec![format!("{} exact", summary.exact)];
    if summary.fuzzy_type > 0 {
        parts.push(format!("{} fuzzy", summary.fuzzy_type));
    }
    if summary.type_ok_region_miss > 0 {
        parts.push(format!("{} region miss", summary.type_ok_region_miss));
    }
    if summary.no_match > 0 {
        parts.push(format!("{} no match", summary.no_match));
    }

    let mean = summary
        .mean_score
        .map(|m| format!(" (mean score {:.1})", m))
        .unwrap_or_default();
    let head = format!("{} buildings", summary.rows);
    let head = if use_colors {
        head.bold().to_string()
    } else {
        head
    };
    format!("{}: {}{}", head, parts.join(", "), mean)
}

/// Reference listings grouped by sector
pub fn format_reference(listing: &ReferenceListing, use_colors: bool) -> String {
    let sections = [
        ("Non-residential building types", &listing.non_residential_types),
        ("Residential building types", &listing.residential_types),
        ("Non-residential regions", &listing.non_residential_regions),
        ("Residential regions", &listing.residential_regions),
    ];

    sections
        .iter()
        .map(|(title, items)| {
            let heading = if use_colors {
                title.bold().underline().to_string()
            } else {
                title.to_string()
            };
            let body = if items.is_empty() {
                "  (none)".to_string()
            } else {
                items
                    .iter()
                    .map(|item| format!("  {}", item))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            format!("{}\n{}", heading, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Records as a pretty JSON array
pub fn format_json(table: &ScoredTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&table.records)
}
