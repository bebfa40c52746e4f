use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::attribution::RankedAttribution;
use crate::classifier::Diagnosis;
use crate::detect::DetectionReport;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Headline for a classifier outcome.
pub fn format_diagnosis(diagnosis: Diagnosis, use_colors: bool) -> String {
    let text = match diagnosis {
        Diagnosis::Detected => "Schizophrenia is Detected",
        Diagnosis::NotDetected => "Schizophrenia is Not Detected",
    };
    if !use_colors {
        return text.to_string();
    }
    match diagnosis {
        Diagnosis::Detected => text.red().bold().to_string(),
        Diagnosis::NotDetected => text.green().bold().to_string(),
    }
}

/// Signed impact with four decimals ("+0.0213", "-1.5000")
pub fn format_impact(impact: f64) -> String {
    format!("{:+.4}", impact)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a taxon name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a ranking as a table with columns: Index, Impact, Feature
/// Index column: 3 chars (fits "20."), right-aligned
/// Impact column is right-aligned, 10 chars wide (fits "-999.9999")
pub fn format_ranking_table(ranking: &RankedAttribution, use_colors: bool) -> String {
    if ranking.is_empty() {
        return "No attributable features.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let impact_width = 10;
    let separator = "  ";
    let fixed_width = index_width + 1 + impact_width + separator.len();

    ranking
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let impact_str = format!(
                "{:>width$}",
                format_impact(record.impact),
                width = impact_width
            );

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&record.feature, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(&record.feature, 20),
                // No terminal (pipe), don't truncate
                None => record.feature.clone(),
            };

            if use_colors {
                let impact_colored = if record.impact > 0.0 {
                    impact_str.green().to_string()
                } else {
                    impact_str.red().to_string()
                };
                format!(
                    "{} {}{}{}",
                    index_str.dimmed(),
                    impact_colored,
                    separator,
                    name
                )
            } else {
                format!("{} {}{}{}", index_str, impact_str, separator, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a ranking as tab-separated values for scripting
/// Columns: feature, impact (no headers, no colors)
pub fn format_tsv(ranking: &RankedAttribution) -> String {
    ranking
        .iter()
        .map(|record| format!("{}\t{}", record.feature, record.impact))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON for a detection report
pub fn format_json(report: &DetectionReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::rank;
    use crate::coefficients::CoefficientTable;
    use crate::subject::SubjectVector;

    fn sample_ranking() -> RankedAttribution {
        let table =
            CoefficientTable::from_rows(vec![("g__Prevotella", 2.0), ("g__Blautia", -3.0)]).unwrap();
        let subject =
            SubjectVector::new(vec![("g__Prevotella", 1.0), ("g__Blautia", 0.5)]).unwrap();
        rank(&subject, &table).unwrap()
    }

    #[test]
    fn test_format_impact_signed() {
        assert_eq!(format_impact(2.0), "+2.0000");
        assert_eq!(format_impact(-0.02134), "-0.0213");
    }

    #[test]
    fn test_format_diagnosis_plain() {
        assert_eq!(
            format_diagnosis(Diagnosis::Detected, false),
            "Schizophrenia is Detected"
        );
        assert_eq!(
            format_diagnosis(Diagnosis::NotDetected, false),
            "Schizophrenia is Not Detected"
        );
    }

    #[test]
    fn test_format_ranking_table_empty() {
        let result = format_ranking_table(&RankedAttribution::default(), false);
        assert_eq!(result, "No attributable features.");
    }

    #[test]
    fn test_format_ranking_table_rows() {
        let result = format_ranking_table(&sample_ranking(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("+2.0000"));
        assert!(lines[0].contains("g__Prevotella"));
        assert!(lines[1].contains("-1.5000"));
        assert!(lines[1].contains("g__Blautia"));
    }

    #[test]
    fn test_format_ranking_table_colors_by_sign() {
        let result = format_ranking_table(&sample_ranking(), true);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].contains(&format!("\x1b[32m{:>10}", "+2.0000")));
        assert!(lines[1].contains(&format!("\x1b[31m{:>10}", "-1.5000")));
    }

    #[test]
    fn test_format_tsv() {
        assert_eq!(
            format_tsv(&sample_ranking()),
            "g__Prevotella\t2\ng__Blautia\t-1.5"
        );
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&RankedAttribution::default()), "");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("g__Faecalibacterium", 10), "g__Faec...");
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("abcdef", 3), "abc");
    }

    #[test]
    fn test_format_json_report() {
        let report = DetectionReport {
            patient_id: "P1".to_string(),
            diagnosis: Diagnosis::Detected,
            attribution: Some(sample_ranking()),
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_json(&report).unwrap()).unwrap();
        assert_eq!(json["patient_id"], "P1");
        assert_eq!(json["attribution"][0]["feature"], "g__Prevotella");
        assert_eq!(json["attribution"][1]["impact"], -1.5);
    }
}
