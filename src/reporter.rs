use crate::models::{Analysis, IssueSeverity, TagRecord, TagStatus};
use crate::scoring;
use anyhow::Result;
use colored::*;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    /// Prints the full colored report for one analysis.
    pub fn print_text_report(analysis: &Analysis, show_tags: bool, verbose: bool) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "SEO Analysis".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "URL".bright_white().bold(), analysis.url);
        println!(
            "{}: {} ({})",
            "Score".bright_white().bold(),
            colorize_score(analysis.score),
            score_grade(analysis.score)
        );
        println!("{}", score_summary(analysis.score));
        if verbose {
            println!(
                "{}: {}/100",
                "Quick Score".bright_white().bold(),
                scoring::quick_score(&analysis.tag_record)
            );
        }
        println!();

        println!("{}", "Meta Tags Summary".bright_yellow().bold().underline());
        for entry in &analysis.tag_summary {
            println!(
                "  {} {}",
                format!("{:<14}", format!("{}:", entry.name)).bright_white(),
                status_label(entry.status)
            );
        }
        println!();

        if analysis.issues.is_empty() {
            println!("{}", "No issues found.".bright_green());
        } else {
            println!("{}", "Issues".bright_yellow().bold().underline());
            for issue in &analysis.issues {
                let severity_str = match issue.severity {
                    IssueSeverity::Error => "ERROR".bright_red(),
                    IssueSeverity::Warning => "WARN ".yellow(),
                    IssueSeverity::Info => "INFO ".bright_cyan(),
                };
                println!("  [{}] {}", severity_str, issue.message);
            }
        }
        println!();

        if !analysis.recommendations.is_empty() {
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for (index, recommendation) in analysis.recommendations.iter().enumerate() {
                println!("  {}. {}", index + 1, recommendation);
            }
            println!();
        }

        println!("{}", "Search Preview".bright_yellow().bold().underline());
        let title = analysis.tag_record.title.as_deref().unwrap_or("Untitled Page");
        let description = analysis
            .tag_record
            .description
            .as_deref()
            .unwrap_or("No description available");
        println!("  {}", truncate_text(title, 60).bright_blue().bold());
        println!("  {}", format_display_url(&analysis.url).green());
        println!("  {}", truncate_text(description, 160).dimmed());
        println!();

        if show_tags {
            print_tag_record(&analysis.tag_record);
            println!();
        }

        println!("{}", "=".repeat(80).bright_blue());
    }

    /// Prints all analyses as one pretty-printed JSON array.
    pub fn print_json_report(analyses: &[Analysis]) -> Result<()> {
        let json = serde_json::to_string_pretty(analyses)?;
        println!("{json}");
        Ok(())
    }

    pub fn save_json_report(analyses: &[Analysis], filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(analyses)?;
        let mut file = File::create(filename)?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}

/// Grade band for a score, matching the summary wording below.
pub fn score_grade(score: u8) -> &'static str {
    match score {
        80..=100 => "Excellent",
        60..=79 => "Good",
        40..=59 => "Needs Improvement",
        _ => "Poor",
    }
}

pub fn score_summary(score: u8) -> &'static str {
    match score {
        80..=100 => "Your website has excellent SEO optimization. Keep up the good work!",
        60..=79 => "Your SEO is good, but there's still room for improvement.",
        40..=59 => "Your SEO needs improvement. Check recommendations to boost your score.",
        _ => "Your SEO is poor. Implementing the recommended changes is highly advised.",
    }
}

/// Truncates `text` to `max_length` characters, appending an ellipsis when
/// anything was cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() > max_length {
        let kept: String = text.chars().take(max_length).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Strips the scheme and any trailing slash for compact display.
pub fn format_display_url(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .strip_suffix('/')
        .unwrap_or(without_scheme)
        .to_string()
}

fn colorize_score(score: u8) -> ColoredString {
    let text = format!("{score}/100");
    match score {
        80..=100 => text.bright_green(),
        60..=79 => text.bright_blue(),
        40..=59 => text.yellow(),
        _ => text.bright_red(),
    }
}

fn status_label(status: TagStatus) -> ColoredString {
    match status {
        TagStatus::Optimal => "Optimal".bright_green(),
        TagStatus::Present => "Present".bright_blue(),
        TagStatus::Partial => "Partial".yellow(),
        TagStatus::Missing => "Missing".bright_red(),
    }
}

fn print_tag_record(record: &TagRecord) {
    println!("{}", "Extracted Tags".bright_yellow().bold().underline());

    let fields: [(&str, &Option<String>); 8] = [
        ("title", &record.title),
        ("description", &record.description),
        ("canonical", &record.canonical),
        ("viewport", &record.viewport),
        ("robots", &record.robots),
        ("charset", &record.charset),
        ("language", &record.language),
        ("author", &record.author),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            println!("  {} {}", format!("{name:<20}").bright_white(), value);
        }
    }

    if let Some(og_tags) = &record.open_graph_tags {
        for (key, value) in og_tags {
            let name = format!("og:{key}");
            println!("  {} {}", format!("{name:<20}").bright_white(), value);
        }
    }

    if let Some(twitter_tags) = &record.twitter_tags {
        for (key, value) in twitter_tags {
            let name = format!("twitter:{key}");
            println!("  {} {}", format!("{name:<20}").bright_white(), value);
        }
    }

    if let Some(other_tags) = &record.other_tags {
        for tag in other_tags {
            println!(
                "  {} {}",
                format!("{:<20}", tag.name).bright_white(),
                tag.content
            );
        }
    }
}
