//! Presentational terminal output.
//!
//! Everything here formats state owned elsewhere; nothing in this module
//! holds state of its own. Screen sections are built as strings, like the
//! report generators they replace a browser page with.

use crate::app::App;
use crate::models::Review;
use crate::stats::{self, Stats};
use crate::view::View;
use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Render the full screen for the current view.
pub fn render_screen(app: &App) -> String {
    let mut output = String::new();

    output.push_str(&render_header(app));

    if app.is_loading() {
        // The overlay suppresses view content while a request is out.
        output.push_str("\n   ⏳ Waiting for the review service...\n");
        return output;
    }

    match app.active_view() {
        View::Upload => output.push_str(&render_upload(app)),
        View::Results => output.push_str(&render_reviews(app.store().session(), View::Results)),
        View::History => output.push_str(&render_reviews(app.store().history(), View::History)),
    }

    output
}

/// Title line, tab bar, and the stats bar for the active list.
fn render_header(app: &App) -> String {
    let mut header = String::new();

    header.push_str("\n🧠 ReviewDeck — AI code review\n");
    header.push_str(&render_tabs(app.active_view()));

    // Derived fresh from the active list on every render, never cached.
    let reviews = app.store().active_list(app.active_view());
    if !reviews.is_empty() {
        header.push_str(&render_stats_bar(&stats::summarize(reviews)));
    }

    header
}

fn render_tabs(active: View) -> String {
    let tab = |view: View| {
        if view == active {
            format!("[{}]", view)
        } else {
            format!(" {} ", view)
        }
    };

    format!(
        "{} {} {}\n",
        tab(View::Upload),
        tab(View::Results),
        tab(View::History)
    )
}

fn render_stats_bar(stats: &Stats) -> String {
    format!(
        "📊 {} review(s) | avg readability {:.1} | avg modularity {:.1}\n",
        stats.count, stats.avg_readability, stats.avg_modularity
    )
}

/// The Upload view: the pending selection, or a hint when it is empty.
fn render_upload(app: &App) -> String {
    let pending = app.pending();

    if pending.is_empty() {
        return "\n   No files selected. Use `add <path>...` to pick source files.\n".to_string();
    }

    let mut section = String::new();
    section.push_str(&format!("\n📋 Selected files ({}):\n", pending.len()));

    for (index, file) in pending.iter().enumerate() {
        section.push_str(&format!(
            "   [{}] {} {} ({})\n",
            index,
            file_icon(&file.extension),
            file.name,
            format_size(file.size)
        ));
    }

    section.push_str("\n   `submit` to analyze, `rm <index>` to drop a file.\n");
    section
}

/// A list of review cards, or the view's empty-state message.
fn render_reviews(reviews: &[Review], view: View) -> String {
    if reviews.is_empty() {
        return match view {
            View::History => "\n   📝 No review history found.\n".to_string(),
            _ => "\n   🚀 No reviews yet. Submit some code files to get started!\n".to_string(),
        };
    }

    let mut section = String::new();
    for review in reviews {
        section.push_str(&render_card(review));
    }
    section
}

fn render_card(review: &Review) -> String {
    let mut card = String::new();

    card.push_str(&format!("\n📄 {}\n", review.filename));
    card.push_str(&format!(
        "   Readability: {:.1}/10 | Modularity: {:.1}/10\n",
        review.readability_score, review.modularity_score
    ));

    if !review.potential_issues.is_empty() {
        card.push_str("   ⚠️  Potential issues:\n");
        for issue in &review.potential_issues {
            card.push_str(&format!("      - {}\n", issue));
        }
    }

    if !review.suggestions.is_empty() {
        card.push_str("   💡 Suggestions:\n");
        for suggestion in &review.suggestions {
            card.push_str(&format!("      - {}\n", suggestion));
        }
    }

    if let Some(ref created_at) = review.created_at {
        card.push_str(&format!("   Reviewed: {}\n", format_timestamp(created_at)));
    }

    card
}

/// Icon for a file extension, matching what the service can analyze.
pub fn file_icon(extension: &str) -> &'static str {
    match extension {
        "js" => "🟨",
        "jsx" | "tsx" => "⚛️",
        "ts" | "cs" => "🔷",
        "py" => "🐍",
        "java" => "☕",
        "c" | "cpp" => "⚙️",
        "php" => "🐘",
        "rb" => "💎",
        "go" => "🐹",
        "rs" => "🦀",
        _ => "📄",
    }
}

fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Display a history timestamp.
///
/// The persistence layer behind the service emits `YYYY-MM-DD HH:MM:SS`;
/// other providers send RFC 3339. Anything else is shown verbatim.
fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string();
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format("%Y-%m-%d %H:%M UTC").to_string();
    }

    raw.to_string()
}

#[derive(Serialize)]
struct BatchReport<'a> {
    generated_at: String,
    stats: Stats,
    reviews: &'a [Review],
}

/// One-shot batch report as pretty-printed JSON.
pub fn render_batch_json(reviews: &[Review]) -> Result<String> {
    let report = BatchReport {
        generated_at: Utc::now().to_rfc3339(),
        stats: stats::summarize(reviews),
        reviews,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// One-shot batch report as plain text.
pub fn render_batch_text(reviews: &[Review]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Generated: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&render_stats_bar(&stats::summarize(reviews)));
    output.push_str(&render_reviews(reviews, View::Results));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(filename: &str) -> Review {
        Review {
            id: None,
            filename: filename.to_string(),
            readability_score: 7.0,
            modularity_score: 5.0,
            potential_issues: vec!["mixes sync and async patterns".to_string()],
            suggestions: vec!["use async/await consistently".to_string()],
            created_at: Some("2026-08-01 10:22:41".to_string()),
        }
    }

    #[test]
    fn test_file_icon() {
        assert_eq!(file_icon("rs"), "🦀");
        assert_eq!(file_icon("py"), "🐍");
        assert_eq!(file_icon("txt"), "📄");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10240), "10.0 KB");
        assert_eq!(format_size(512), "0.5 KB");
    }

    #[test]
    fn test_format_timestamp_lenient() {
        assert_eq!(
            format_timestamp("2026-08-01 10:22:41"),
            "2026-08-01 10:22 UTC"
        );
        assert_eq!(
            format_timestamp("2026-08-01T10:22:41Z"),
            "2026-08-01 10:22 UTC"
        );
        assert_eq!(format_timestamp("whenever"), "whenever");
    }

    #[test]
    fn test_card_contains_scores_and_lists() {
        let card = render_card(&review("app.js"));
        assert!(card.contains("app.js"));
        assert!(card.contains("7.0/10"));
        assert!(card.contains("5.0/10"));
        assert!(card.contains("mixes sync and async patterns"));
        assert!(card.contains("use async/await consistently"));
        assert!(card.contains("2026-08-01 10:22 UTC"));
    }

    #[test]
    fn test_empty_states_differ_by_view() {
        let results = render_reviews(&[], View::Results);
        let history = render_reviews(&[], View::History);
        assert!(results.contains("No reviews yet"));
        assert!(history.contains("No review history found"));
    }

    #[test]
    fn test_batch_json_parses_back() {
        let reviews = vec![review("app.js")];
        let json = render_batch_json(&reviews).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["count"], 1);
        assert_eq!(value["reviews"][0]["filename"], "app.js");
        assert!(value["generated_at"].is_string());
    }
}
