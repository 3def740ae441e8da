// Colored terminal output for comparison results.
//
// This module handles all terminal-specific formatting. The library never
// prints on its own; main.rs calls these after a workflow returns.

use colored::Colorize;

use crate::extract::Document;
use crate::matching::MatchResult;
use crate::output::report::ReportMode;
use crate::pipeline::{BulkOutcome, ComparisonOutcome};

/// Display the artifacts and top matched words of a highlight comparison.
pub fn display_comparison(outcome: &ComparisonOutcome, top_n: usize) {
    println!("\n{}", "=== Comparison complete ===".bold());
    println!("  Highlighted DOCX: {}", outcome.highlighted.display());
    println!("  Report:           {}", outcome.report.display());
    println!();
    display_matches(&outcome.matches, top_n);
}

/// Display the most frequent matched words as a bar chart.
pub fn display_matches(matches: &MatchResult, top_n: usize) {
    if matches.is_empty() {
        println!("  {}", "No words in common.".dimmed());
        return;
    }

    println!(
        "  {} common words, {} matched occurrences",
        matches.common.len().to_string().bold(),
        matches.total_matches().to_string().bold()
    );
    println!();

    let max = matches
        .frequencies
        .first()
        .map(|wc| wc.count)
        .unwrap_or(1)
        .max(1);
    let bar_width: usize = 20;
    for wc in matches.frequencies.iter().take(top_n) {
        let filled = ((wc.count as f64 / max as f64) * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        println!(
            "  {:<24} {} {}",
            super::truncate_chars(&wc.word, 24),
            bar.bright_yellow(),
            wc.count
        );
    }
    if matches.frequencies.len() > top_n {
        println!(
            "  {}",
            format!("... and {} more (see report)", matches.frequencies.len() - top_n).dimmed()
        );
    }
}

/// Lead-in for a failed bulk comparison: a file in single-source mode, a
/// pair ("a and b") in all-pairs mode.
fn failure_prefix(mode: ReportMode) -> &'static str {
    match mode {
        ReportMode::SingleSource => "Error processing",
        ReportMode::AllPairs => "Error comparing",
    }
}

/// Display each bulk comparison, its failures, and a summary line.
pub fn display_bulk(outcome: &BulkOutcome) {
    for row in &outcome.rows {
        println!(
            "Compared {}, Similarity: {}",
            row.label(),
            colorize_score(row.score)
        );
    }
    for failure in &outcome.failures {
        println!(
            "{} {}: {}",
            failure_prefix(outcome.mode).red(),
            failure.label,
            failure.error.dimmed()
        );
    }

    println!();
    println!(
        "{} {} comparisons written to {}",
        "Done.".green().bold(),
        outcome.rows.len(),
        outcome.report.display()
    );
    if !outcome.failures.is_empty() {
        println!("  {} {} failed (see log)", "!".yellow(), outcome.failures.len());
    }
}

/// Display a single pairwise score.
pub fn display_score(doc1: &Document, doc2: &Document, score: f64) {
    println!(
        "{} vs {}: {}",
        doc1.file_name().bold(),
        doc2.file_name().bold(),
        colorize_score(score)
    );
}

/// Display a document's tokens, one per line.
pub fn display_tokens(doc: &Document, normalized: bool) {
    println!(
        "{}",
        format!(
            "=== {} ({}, {} tokens) ===",
            doc.file_name(),
            doc.format,
            doc.tokens.len()
        )
        .bold()
    );
    if normalized {
        for (raw, norm) in doc.tokens.iter().zip(doc.normalized()) {
            println!("  {:<30} {}", raw, norm.dimmed());
        }
    } else {
        for token in &doc.tokens {
            println!("  {token}");
        }
    }
}

/// Color a similarity score by how close the documents are.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}");
    if score >= 0.8 {
        text.red().bold()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.green()
    }
}
