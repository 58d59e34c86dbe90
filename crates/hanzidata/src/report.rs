//! Renders difficulty reports for the terminal.

use hanzi::{DifficultyReport, Level};
use std::{collections::BTreeMap, fmt::Write};

pub fn label(difficulty_level: u8) -> &'static str {
    match difficulty_level {
        1 => "easy",
        2 => "elementary",
        3 => "intermediate",
        4 => "advanced",
        _ => "difficult",
    }
}

/// One line per level with the count, share and characters, followed by the score and level.
pub fn histogram(report: &DifficultyReport, characters: &BTreeMap<Level, Vec<char>>) -> String {
    let mut out = String::new();
    for level in Level::ALL {
        let chars = characters
            .get(&level)
            .map(|c| c.iter().collect::<String>())
            .unwrap_or_default();
        // writing to a String can't fail
        let _ = writeln!(
            out,
            "{level} {:>5} {:>5.1}% {chars}",
            report.count(level),
            report.distribution(level),
        );
    }
    let _ = writeln!(
        out,
        "{} hanzi, {} distinct",
        report.total_characters, report.unique_characters
    );
    let _ = writeln!(out, "score {}", report.difficulty_score);
    let _ = writeln!(
        out,
        "level {} ({})",
        report.difficulty_level,
        label(report.difficulty_level)
    );
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use hanzi::{DifficultyAnalyzer, FrequencyTable};

    #[test]
    fn renders_histogram() {
        let table = FrequencyTable::bundled();
        let analyzer = DifficultyAnalyzer::new(&table);
        let text = "我是大学生";
        let out = histogram(&analyzer.analyze(text), &analyzer.unique_by_level(text));
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "LEVEL_1     5 100.0% 我是大学生");
        assert_eq!(lines[5], "LEVEL_6     0   0.0% ");
        assert_eq!(lines[6], "5 hanzi, 5 distinct");
        assert_eq!(lines[7], "score 0");
        assert_eq!(lines[8], "level 1 (easy)");
    }

    #[test]
    fn labels() {
        assert_eq!(label(1), "easy");
        assert_eq!(label(5), "difficult");
    }
}
