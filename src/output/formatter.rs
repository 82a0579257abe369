//! Output formatters for the top-K view of a ranking

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::RankingReport;
use colored::{Color, Colorize};

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    precision: usize,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown list, one bullet per top match
pub struct MarkdownFormatter {
    precision: usize,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, precision: usize) -> Self {
        Self { use_colors, precision }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 0.75 => Color::Green,
            s if s >= 0.5 => Color::Yellow,
            _ => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!(
            "Top {} Matching Resumes",
            report.metadata.top_k
        )));

        let width = report
            .top_matches
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);

        for (i, candidate) in report.top_matches.iter().enumerate() {
            let score = format!("{:.*}", self.precision, candidate.score);
            output.push_str(&format!(
                "{:>3}. {:<width$}  similarity {}\n",
                i + 1,
                candidate.name,
                self.colorize(&score, Self::score_color(candidate.score)),
                width = width
            ));
        }

        if report.ranking.len() > report.top_matches.len() {
            output.push_str(&format!(
                "     ... {} more in the full ranking\n",
                report.ranking.len() - report.top_matches.len()
            ));
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped Files"));
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    self.colorize("!", Color::Yellow),
                    skipped.name,
                    skipped.reason
                ));
            }
        }

        output.push_str(&format!(
            "\nModel: {} ({} dims) | Processing time: {}ms\n",
            report.metadata.embedding_model,
            report.metadata.embedding_dimension,
            report.metadata.processing_time_ms
        ));

        if let Some(path) = &report.metadata.export_path {
            output.push_str(&format!(
                "Full ranking ({} rows) exported to {}\n",
                report.ranking.len(),
                self.colorize(path, Color::Cyan)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = format!("## Top {} Matching Resumes\n\n", report.metadata.top_k);

        for candidate in &report.top_matches {
            output.push_str(&format!(
                "- **{}** — similarity `{:.*}`\n",
                candidate.name, self.precision, candidate.score
            ));
        }

        if !report.skipped.is_empty() {
            output.push_str("\n### Skipped Files\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!("- {}: {}\n", skipped.name, skipped.reason));
            }
        }

        if let Some(path) = &report.metadata.export_path {
            output.push_str(&format!("\nFull ranking: `{}`\n", path));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, 3, true)
    }

    pub fn with_options(use_colors: bool, precision: usize, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, precision),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(precision),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{SkipReason, SkippedDocument};
    use crate::processing::pipeline::RankingOutcome;
    use crate::processing::ranker::{Ranking, ScoredCandidate};

    fn sample_report() -> RankingReport {
        let ranking = Ranking::from_scored(
            [("alice.pdf", 0.91234), ("bob.docx", 0.5), ("carol.txt", 0.1)]
                .iter()
                .enumerate()
                .map(|(i, (name, score))| ScoredCandidate {
                    name: name.to_string(),
                    score: *score,
                    upload_index: i,
                })
                .collect(),
        );
        let outcome = RankingOutcome {
            ranking,
            skipped: vec![SkippedDocument {
                name: "empty.txt".to_string(),
                upload_index: 3,
                reason: SkipReason::NoText,
            }],
            model_name: "potion-base-8M".to_string(),
            embedding_dimension: 256,
            processing_time_ms: 12,
        };
        RankingReport::from_outcome(&outcome, 2).with_export_path("ranked_resumes.xlsx")
    }

    #[test]
    fn test_console_shows_top_k_with_three_decimals() {
        let output = ConsoleFormatter::new(false, 3)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("Top 2 Matching Resumes"));
        assert!(output.contains("alice.pdf  similarity 0.912"));
        assert!(output.contains("bob.docx   similarity 0.500"));
        assert!(!output.contains("carol.txt"));
        assert!(output.contains("1 more in the full ranking"));
        assert!(output.contains("empty.txt: no text could be extracted"));
        assert!(output.contains("exported to ranked_resumes.xlsx"));
    }

    #[test]
    fn test_markdown_lines() {
        let output = MarkdownFormatter::new(3).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("## Top 2 Matching Resumes"));
        assert!(output.contains("- **alice.pdf** — similarity `0.912`\n"));
        assert!(output.contains("- **bob.docx** — similarity `0.500`\n"));
    }

    #[test]
    fn test_json_contains_full_ranking() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["top_matches"].as_array().unwrap().len(), 2);
        assert_eq!(value["ranking"].as_array().unwrap().len(), 3);
        assert_eq!(value["ranking"][2]["name"], "carol.txt");
        assert_eq!(value["skipped"][0]["reason"], "NoText");
        assert_eq!(value["metadata"]["embedding_model"], "potion-base-8M");
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, 3, true);
        let report = sample_report();

        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("## "));
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
    }
}
