//! Progress reporting and summary output for the CLI

use eduscrub_core::CleanStats;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner shown while rows stream in from the input adapter
pub fn reading_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {human_pos} rows read {msg}")
            .unwrap(),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Print a formatted summary report
pub fn print_summary_report(input: &Path, output: Option<&Path>, stats: &CleanStats) {
    println!("\n{}", "═".repeat(60));
    println!("Interaction Log Cleaning Complete");
    println!("{}", "═".repeat(60));
    println!("Input:               {}", input.display());

    if let Some(output_path) = output {
        println!("Output:              {}", output_path.display());
    } else {
        println!("Output:              (dry run - no output written)");
    }

    println!("Total rows:          {}", format_with_commas(stats.rows_in));

    if stats.duplicates_removed > 0 {
        println!(
            "Duplicates removed:  {} ({:.1}%)",
            format_with_commas(stats.duplicates_removed),
            percent(stats.duplicates_removed, stats.rows_in)
        );
    }

    if stats.incomplete_dropped > 0 {
        println!(
            "Incomplete dropped:  {} ({:.1}%)",
            format_with_commas(stats.incomplete_dropped),
            percent(stats.incomplete_dropped, stats.rows_in)
        );
    }

    if stats.hint_clamps > 0 {
        println!(
            "Hint counts clamped: {}",
            format_with_commas(stats.hint_clamps)
        );
    }

    let correct_repairs = stats.correct_filled + stats.correct_coerced;
    if correct_repairs > 0 {
        println!(
            "Correct repaired:    {} ({} filled, {} coerced)",
            format_with_commas(correct_repairs),
            format_with_commas(stats.correct_filled),
            format_with_commas(stats.correct_coerced)
        );
    }

    let response_repairs = stats.response_unparseable + stats.response_clamped;
    if response_repairs > 0 {
        println!(
            "Latency normalized:  {} ({} fallbacks, {} clamped)",
            format_with_commas(response_repairs),
            format_with_commas(stats.response_unparseable),
            format_with_commas(stats.response_clamped)
        );
    }

    if stats.unordered_groups > 0 {
        println!(
            "Ordering issues:     {} of {} user-problem groups",
            format_with_commas(stats.unordered_groups),
            format_with_commas(stats.groups_checked)
        );
    }

    println!(
        "Final rows:          {} ({:.1}%)",
        format_with_commas(stats.rows_out),
        stats.retention_rate()
    );

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .unwrap()
        .join(",")
}
