pub mod analyzer;
pub mod auditor;
pub mod cache;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod http_client;
pub mod models;
pub mod reporter;
pub mod scoring;

use anyhow::Result;
use auditor::Auditor;
use cli::Cli;
use colored::*;
use config::Config;
use models::Analysis;
use reporter::Reporter;
use std::path::Path;

pub async fn run(args: Cli) -> Result<()> {
    // Explicit config file first, then the default locations
    let args = match &args.config {
        Some(path) => Config::from_file(Path::new(path))?.merge_with_cli(&args),
        None => match Config::from_default_paths()? {
            Some(config) => config.merge_with_cli(&args),
            None => args,
        },
    };

    println!("{}", "Metascope - SEO Meta Tag Analyzer".bright_cyan().bold());
    println!("{}", "=".repeat(50).bright_blue());
    println!();

    println!(
        "{} {}",
        "Analyzing:".bright_white().bold(),
        args.urls.join(", ")
    );
    println!(
        "{} {}",
        "Started:".bright_white().bold(),
        chrono::Utc::now().to_rfc3339()
    );
    println!();

    let mut auditor = Auditor::new(args.timeout)?;
    let mut analyses: Vec<Analysis> = Vec::new();
    let mut failures = 0usize;

    for url in &args.urls {
        if args.verbose {
            println!("{} {}", "Fetching:".bright_yellow(), url);
        }

        match auditor.analyze_url(url).await {
            Ok(analysis) => {
                if args.output != "json" {
                    Reporter::print_text_report(&analysis, args.show_tags, args.verbose);
                }
                analyses.push(analysis);
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "analysis failed");
                // With a single URL the failure is the run's result;
                // with several, report it and keep going.
                if args.urls.len() == 1 {
                    return Err(e.into());
                }
                eprintln!("{} {}: {}", "Error:".bright_red().bold(), url, e);
                failures += 1;
            }
        }
    }

    if analyses.is_empty() {
        anyhow::bail!("all {failures} URLs failed to analyze");
    }

    if args.output == "json" {
        Reporter::print_json_report(&analyses)?;
    }

    if let Some(filename) = &args.save {
        Reporter::save_json_report(&analyses, filename)?;
    }

    if args.verbose {
        println!();
        println!(
            "{} {} analyzed, {} cached, {} failed",
            "Done:".bright_green().bold(),
            analyses.len(),
            auditor.cache_len(),
            failures
        );
    }

    Ok(())
}
