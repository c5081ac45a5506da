use super::types::{ParsedReport, Section, SectionedReport};
use crate::{Error, Result};
use tracing::{debug, warn};

/// Section markers in the order they are expected in model output.
pub const DELIMITERS: [(Section, &str); 4] = [
    (Section::DetailedAnalysis, "\nDetailed Analysis:"),
    (Section::AnalysisReport, "\nAnalysis Report:"),
    (Section::Recommendations, "\nRecommendations:"),
    (Section::Treatments, "\nTreatments:"),
];

/// Splits free-form model output into report sections. Callers only see
/// this trait, so the marker-based parser can be swapped for a structured
/// output contract later.
pub trait ReportParser: Send + Sync {
    fn parse(&self, raw: &str) -> SectionedReport;
}

/// Marker-based splitter. A slot is filled from the first occurrence of its
/// marker up to the first occurrence of the next marker, and only when both
/// are present. The last slot runs to the end of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedSectionParser;

impl ReportParser for DelimitedSectionParser {
    fn parse(&self, raw: &str) -> SectionedReport {
        let mut report = SectionedReport::default();

        for pair in DELIMITERS.windows(2) {
            let (section, start_marker) = pair[0];
            let (_, end_marker) = pair[1];
            if !(raw.contains(start_marker) && raw.contains(end_marker)) {
                continue;
            }
            if let Some(body) = between(raw, start_marker, end_marker) {
                report.set(section, body);
            }
        }

        let (last, marker) = DELIMITERS[DELIMITERS.len() - 1];
        if let Some(idx) = raw.find(marker) {
            report.set(last, &raw[idx + marker.len()..]);
        }

        report
    }
}

/// Text after the first `start` and before the first `end` that follows it.
/// When `end` only occurs before `start`, the slice runs to the end.
fn between<'a>(raw: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let after_start = &raw[raw.find(start)? + start.len()..];
    Some(match after_start.find(end) {
        Some(idx) => &after_start[..idx],
        None => after_start,
    })
}

/// Runs `parser` over the model output. `None` is a degenerate input and an
/// error; text without any markers is not, it falls back to the raw block.
pub fn extract(parser: &dyn ReportParser, raw: Option<&str>) -> Result<ParsedReport> {
    let raw = raw.ok_or(Error::MissingText)?;
    let report = parser.parse(raw);

    if report.is_empty() {
        warn!(
            "No section markers found in {} chars of model output, showing raw text",
            raw.len()
        );
        return Ok(ParsedReport::Unstructured {
            raw_text: raw.to_string(),
        });
    }

    if !report.is_complete() {
        debug!(
            "Partial report: {} of {} sections found",
            report.sections().count(),
            Section::ALL.len()
        );
    }

    Ok(ParsedReport::Sectioned(report))
}
