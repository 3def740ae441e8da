// Report files — the matched-words report and the CSV similarity reports.
//
// Every writer truncates an existing file at the target path. The CSV writer
// is owned by a single coordinator; rows are appended in the order the caller
// supplies them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CompareError, Result};
use crate::matching::MatchResult;

/// File name of the matched-words report inside the output folder.
pub const MATCH_REPORT_FILE: &str = "comparison_report.txt";

const MATCH_REPORT_TITLE: &str = "Matched Words Report";

/// Render the matched-words report: title, a rule, then `word: count` lines.
pub fn render_match_report(result: &MatchResult) -> String {
    let mut out = String::new();
    out.push_str(MATCH_REPORT_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(40));
    out.push('\n');
    for wc in &result.frequencies {
        out.push_str(&format!("{}: {}\n", wc.word, wc.count));
    }
    out
}

/// Write `comparison_report.txt` into `output_folder`.
pub fn write_match_report(output_folder: &Path, result: &MatchResult) -> Result<PathBuf> {
    let path = output_folder.join(MATCH_REPORT_FILE);
    std::fs::write(&path, render_match_report(result)).map_err(|e| CompareError::io(&path, e))?;
    Ok(path)
}

/// Which bulk comparison a similarity report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// One source document against every file in a folder.
    SingleSource,
    /// Every unordered pair of files in a folder.
    AllPairs,
}

impl ReportMode {
    pub fn header(self) -> &'static str {
        match self {
            ReportMode::SingleSource => "File,Similarity Score",
            ReportMode::AllPairs => "File 1,File 2,Similarity Score",
        }
    }
}

/// One successful comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub file: String,
    /// The second file in all-pairs mode; `None` in single-source mode.
    pub other: Option<String>,
    pub score: f64,
}

impl ScoreRow {
    pub fn label(&self) -> String {
        match &self.other {
            Some(other) => format!("{} and {}", self.file, other),
            None => self.file.clone(),
        }
    }
}

/// Format a score at full precision, always with a fractional part.
///
/// Uses the shortest decimal that round-trips to the same `f64`, so `1.0`
/// prints as `1.0` and `0.8164965809277261` prints in full.
pub fn format_score(score: f64) -> String {
    // -0.0 == 0.0, and the sign has no meaning for a similarity
    let score = if score == 0.0 { 0.0 } else { score };
    let s = score.to_string();
    if s.contains('.') || !score.is_finite() {
        s
    } else {
        format!("{s}.0")
    }
}

/// CSV similarity report with a single writer.
pub struct SimilarityReport {
    path: PathBuf,
    mode: ReportMode,
    writer: BufWriter<File>,
    rows: usize,
}

impl SimilarityReport {
    /// Create (or truncate) the report and write its header line.
    pub fn create(path: &Path, mode: ReportMode) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CompareError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| CompareError::io(path, e))?;
        let mut report = Self {
            path: path.to_path_buf(),
            mode,
            writer: BufWriter::new(file),
            rows: 0,
        };
        let header = mode.header();
        report.write_line(header)?;
        Ok(report)
    }

    pub fn append(&mut self, row: &ScoreRow) -> Result<()> {
        let score = format_score(row.score);
        let line = match (self.mode, &row.other) {
            (ReportMode::AllPairs, Some(other)) => {
                format!("{},{},{}", csv_field(&row.file), csv_field(other), score)
            }
            _ => format!("{},{}", csv_field(&row.file), score),
        };
        self.write_line(&line)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush to disk and return the report path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .map_err(|e| CompareError::io(&self.path, e))?;
        Ok(self.path)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|e| CompareError::io(&self.path, e))
    }
}

/// Quote a field only when it needs quoting.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::WordCount;

    #[test]
    fn test_render_match_report() {
        let result = MatchResult {
            common: ["brown", "quick"].iter().map(|s| s.to_string()).collect(),
            frequencies: vec![
                WordCount { word: "quick".into(), count: 3 },
                WordCount { word: "brown".into(), count: 1 },
            ],
        };
        let expected = format!(
            "Matched Words Report\n{}\nquick: 3\nbrown: 1\n",
            "=".repeat(40)
        );
        assert_eq!(render_match_report(&result), expected);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(-0.0), "0.0");
        assert_eq!(format_score(0.5), "0.5");
        assert_eq!(format_score(0.8164965809277261), "0.8164965809277261");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain.pdf"), "plain.pdf");
        assert_eq!(csv_field("a,b.pdf"), "\"a,b.pdf\"");
        assert_eq!(csv_field("say \"hi\".pdf"), "\"say \"\"hi\"\".pdf\"");
    }

    #[test]
    fn test_similarity_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale contents\n").unwrap();

        let mut report = SimilarityReport::create(&path, ReportMode::AllPairs).unwrap();
        report
            .append(&ScoreRow {
                file: "a.pdf".into(),
                other: Some("b.pdf".into()),
                score: 0.25,
            })
            .unwrap();
        assert_eq!(report.rows(), 1);
        report.finish().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "File 1,File 2,Similarity Score\na.pdf,b.pdf,0.25\n");
    }
}
