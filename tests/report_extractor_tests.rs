use pretty_assertions::assert_eq;
use rstest::rstest;
use visual_medical_assistant::{
    Error,
    report::{
        DELIMITERS, DelimitedSectionParser, ParsedReport, ReportParser, Section, SectionedReport,
        extract,
    },
};

fn parse(raw: &str) -> SectionedReport {
    DelimitedSectionParser.parse(raw)
}

#[test]
fn test_full_report_scenario() {
    let raw = "\nDetailed Analysis:\nA\n\nAnalysis Report:\nB\n\nRecommendations:\nC\n\nTreatments:\nD";

    let report = parse(raw);

    assert_eq!(
        report,
        SectionedReport {
            detailed_analysis: Some("A".to_string()),
            analysis_report: Some("B".to_string()),
            recommendations: Some("C".to_string()),
            treatments: Some("D".to_string()),
        }
    );
    assert!(report.is_complete());
}

#[test]
fn test_no_markers_falls_back_to_raw_text() {
    let raw = "no markers here";

    assert!(parse(raw).is_empty());
    assert_eq!(
        extract(&DelimitedSectionParser, Some(raw)).unwrap(),
        ParsedReport::Unstructured {
            raw_text: raw.to_string()
        }
    );
}

#[test]
fn test_empty_input_falls_back_without_error() {
    let parsed = extract(&DelimitedSectionParser, Some("")).unwrap();
    assert_eq!(
        parsed,
        ParsedReport::Unstructured {
            raw_text: String::new()
        }
    );
}

#[test]
fn test_absent_text_is_an_error() {
    assert!(matches!(
        extract(&DelimitedSectionParser, None),
        Err(Error::MissingText)
    ));
}

#[test]
fn test_only_treatments_marker() {
    let report = parse("Preamble\nTreatments:\n  Rest and fluids.  \n");

    assert_eq!(report.treatments.as_deref(), Some("Rest and fluids."));
    assert_eq!(report.detailed_analysis, None);
    assert_eq!(report.analysis_report, None);
    assert_eq!(report.recommendations, None);
}

#[rstest]
#[case::missing_first(
    "\nAnalysis Report:\nB\n\nRecommendations:\nC\n\nTreatments:\nD",
    [None, Some("B"), Some("C"), Some("D")]
)]
#[case::missing_second(
    "\nDetailed Analysis:\nA\n\nRecommendations:\nC\n\nTreatments:\nD",
    [None, None, Some("C"), Some("D")]
)]
#[case::missing_last(
    "\nDetailed Analysis:\nA\n\nAnalysis Report:\nB\n\nRecommendations:\nC",
    [Some("A"), Some("B"), None, None]
)]
#[case::first_two_only(
    "\nDetailed Analysis:\nA\n\nAnalysis Report:\nB",
    [Some("A"), None, None, None]
)]
#[case::markers_without_leading_newline(
    "Detailed Analysis:\nA\nAnalysis Report:\nB\nRecommendations:\nC",
    [None, Some("B"), None, None]
)]
fn test_partial_reports(#[case] raw: &str, #[case] expected: [Option<&str>; 4]) {
    let report = parse(raw);
    for (section, want) in Section::ALL.into_iter().zip(expected) {
        assert_eq!(report.get(section), want, "section {:?}", section);
    }
}

#[test]
fn test_partial_report_is_still_sectioned() {
    let parsed = extract(
        &DelimitedSectionParser,
        Some("intro\nRecommendations:\nRest\nTreatments:\nIce"),
    )
    .unwrap();

    match parsed {
        ParsedReport::Sectioned(report) => {
            assert_eq!(report.recommendations.as_deref(), Some("Rest"));
            assert_eq!(report.treatments.as_deref(), Some("Ice"));
            assert!(!report.is_complete());
        }
        other => panic!("expected sectioned report, got {:?}", other),
    }
}

#[test]
fn test_first_occurrence_wins() {
    let raw = "\nTreatments:\nFirst plan.\nTreatments:\nSecond plan.";
    let report = parse(raw);

    assert_eq!(
        report.treatments.as_deref(),
        Some("First plan.\nTreatments:\nSecond plan.")
    );
}

#[test]
fn test_repeated_middle_marker_splits_at_first() {
    let raw = "\nDetailed Analysis:\nA\nAnalysis Report:\nB\nAnalysis Report:\nB2\nRecommendations:\nC";
    let report = parse(raw);

    assert_eq!(report.detailed_analysis.as_deref(), Some("A"));
    assert_eq!(
        report.analysis_report.as_deref(),
        Some("B\nAnalysis Report:\nB2")
    );
}

#[test]
fn test_blank_section_body_is_absent() {
    let raw = "\nDetailed Analysis:\n   \n\nAnalysis Report:\nB\n\nRecommendations:\nC";
    let report = parse(raw);

    assert_eq!(report.detailed_analysis, None);
    assert_eq!(report.analysis_report.as_deref(), Some("B"));
}

#[test]
fn test_extraction_is_idempotent() {
    let raw = "x\nDetailed Analysis:\nA\nAnalysis Report:\nB\nTreatments:\nD";
    let first = extract(&DelimitedSectionParser, Some(raw)).unwrap();
    let second = extract(&DelimitedSectionParser, Some(raw)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sections_iterate_in_fixed_order() {
    let report = parse("\nRecommendations:\nC\nTreatments:\nD\nDetailed Analysis:\nA\nAnalysis Report:\nB");
    let order: Vec<Section> = report.sections().map(|(section, _)| section).collect();

    let mut sorted = order.clone();
    sorted.sort_by_key(|s| Section::ALL.iter().position(|x| x == s));
    assert_eq!(order, sorted);
}

#[test]
fn test_delimiters_match_section_labels() {
    for (section, marker) in DELIMITERS {
        assert_eq!(marker, format!("\n{}:", section.label()));
    }
}

#[test]
fn test_titles_and_default_expansion() {
    assert_eq!(Section::DetailedAnalysis.title(), "Detailed Analysis 🔬");
    assert_eq!(Section::Treatments.title(), "Treatments 💊");
    assert!(Section::DetailedAnalysis.expanded_by_default());
    assert!(!Section::AnalysisReport.expanded_by_default());
}

/// Any parser behind the trait can stand in for the marker-based one.
#[test]
fn test_custom_parser_through_trait() {
    struct EverythingIsTreatment;

    impl ReportParser for EverythingIsTreatment {
        fn parse(&self, raw: &str) -> SectionedReport {
            let mut report = SectionedReport::default();
            report.set(Section::Treatments, raw);
            report
        }
    }

    let parsed = extract(&EverythingIsTreatment, Some(" rest ")).unwrap();
    match parsed {
        ParsedReport::Sectioned(report) => assert_eq!(report.treatments.as_deref(), Some("rest")),
        other => panic!("expected sectioned report, got {:?}", other),
    }
}
