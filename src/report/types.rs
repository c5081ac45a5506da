use serde::Serialize;

/// The four report slots, in the order the model is asked to emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    DetailedAnalysis,
    AnalysisReport,
    Recommendations,
    Treatments,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::DetailedAnalysis,
        Section::AnalysisReport,
        Section::Recommendations,
        Section::Treatments,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DetailedAnalysis => "Detailed Analysis",
            Self::AnalysisReport => "Analysis Report",
            Self::Recommendations => "Recommendations",
            Self::Treatments => "Treatments",
        }
    }

    /// Heading shown above the collapsible block.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DetailedAnalysis => "Detailed Analysis 🔬",
            Self::AnalysisReport => "Analysis Report 📊",
            Self::Recommendations => "Recommendations ✅",
            Self::Treatments => "Treatments 💊",
        }
    }

    /// Only the first section starts expanded.
    pub fn expanded_by_default(&self) -> bool {
        matches!(self, Self::DetailedAnalysis)
    }
}

/// Four optional slots. A populated slot is always non-empty and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionedReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatments: Option<String>,
}

impl SectionedReport {
    pub fn get(&self, section: Section) -> Option<&str> {
        match section {
            Section::DetailedAnalysis => self.detailed_analysis.as_deref(),
            Section::AnalysisReport => self.analysis_report.as_deref(),
            Section::Recommendations => self.recommendations.as_deref(),
            Section::Treatments => self.treatments.as_deref(),
        }
    }

    /// Stores `body` trimmed; blank bodies leave the slot empty.
    pub fn set(&mut self, section: Section, body: &str) {
        let body = body.trim();
        let value = (!body.is_empty()).then(|| body.to_string());
        let slot = match section {
            Section::DetailedAnalysis => &mut self.detailed_analysis,
            Section::AnalysisReport => &mut self.analysis_report,
            Section::Recommendations => &mut self.recommendations,
            Section::Treatments => &mut self.treatments,
        };
        *slot = value;
    }

    /// Populated sections in fixed order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL
            .into_iter()
            .filter_map(|section| self.get(section).map(|body| (section, body)))
    }

    pub fn is_empty(&self) -> bool {
        self.sections().next().is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.sections().count() == Section::ALL.len()
    }
}

/// What the display layer receives: either labeled sections, or the whole
/// model output when no section markers were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReport {
    Sectioned(SectionedReport),
    Unstructured { raw_text: String },
}

impl ParsedReport {
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Sectioned(_))
    }
}
