//! End-to-end document assembly: single reports, the full bundle and the
//! executive summary, driven through stub providers against the recording
//! canvas.

mod common;

use common::RecordingCanvas;
use intelbrief_pdf::export::{
    build_all_reports, build_executive_summary, build_single_report,
};
use intelbrief_pdf::{
    Canvas, ContentProvider, Error, ExportJob, PageGeometry, REPORT_CATALOG, ReportRequest,
    RequesterContext, StyleTable, Summarizer,
};

/// Serves canned markdown per report type, optionally failing a chosen set
/// of requests. Records the order requests arrive in.
struct StubProvider {
    fail_ids: Vec<&'static str>,
    seen: Vec<String>,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            fail_ids: Vec::new(),
            seen: Vec::new(),
        }
    }

    fn failing(ids: &[&'static str]) -> Self {
        Self {
            fail_ids: ids.to_vec(),
            seen: Vec::new(),
        }
    }
}

impl ContentProvider for StubProvider {
    fn fetch(&mut self, request: &ReportRequest) -> Result<String, String> {
        self.seen.push(request.report_type_id.clone());
        if self.fail_ids.contains(&request.report_type_id.as_str()) {
            return Err("upstream timeout".to_string());
        }
        Ok(format!(
            "# Findings for {id}\n\nBody text for {id} covering the \
             competitive picture in enough detail to render.",
            id = request.report_type_id,
        ))
    }
}

struct StubSummarizer {
    fail: bool,
    received: usize,
}

impl Summarizer for StubSummarizer {
    fn summarize(&mut self, _company_name: &str, reports: &[String]) -> Result<String, String> {
        self.received = reports.len();
        if self.fail {
            return Err("model overloaded".to_string());
        }
        Ok("# Key Takeaways\n\nThe condensed view across all reports.".to_string())
    }
}

fn job() -> ExportJob {
    ExportJob {
        company_id: "acme".to_string(),
        company_name: "Acme Corp".to_string(),
        competitor_ids: vec!["globex".to_string(), "initech".to_string()],
        requester: RequesterContext {
            user_id: "u1".to_string(),
            firm_id: "f1".to_string(),
        },
    }
}

fn all_text(canvas: &RecordingCanvas) -> String {
    (0..canvas.page_count())
        .map(|p| canvas.page_text(p))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn short_single_report_fits_one_unfootered_page() {
    let mut canvas = RecordingCanvas::new();
    build_single_report(
        &mut canvas,
        &StyleTable::default(),
        PageGeometry::default(),
        "Market Overview",
        "# Title\n\nShort paragraph.",
    );

    assert_eq!(canvas.page_count(), 1);
    let ops = canvas.text_ops(0);
    let heading_y = ops.iter().find(|(_, t)| *t == "Title").map(|(y, _)| *y);
    let body_y = ops
        .iter()
        .find(|(_, t)| *t == "Short paragraph.")
        .map(|(y, _)| *y);
    assert!(heading_y.unwrap() < body_y.unwrap(), "heading must sit above the body");
    assert!(
        !canvas.page_text(0).contains("Page 1 of"),
        "standalone documents carry no footer",
    );
}

#[test]
fn error_text_yields_fixed_unavailable_document() {
    let mut canvas = RecordingCanvas::new();
    build_single_report(
        &mut canvas,
        &StyleTable::default(),
        PageGeometry::default(),
        "SWOT Analysis",
        "We're sorry, but we Failed To Generate this report. Try again later.",
    );

    assert_eq!(canvas.page_count(), 1);
    let text = canvas.page_text(0);
    assert!(text.contains("Report Unavailable"));
    assert!(!text.contains("We're sorry"));
}

#[test]
fn bundle_covers_toc_all_sections_and_closing() {
    let styles = StyleTable::default();
    let mut canvas = RecordingCanvas::new();
    let mut provider = StubProvider::new();
    let mut messages: Vec<String> = Vec::new();

    build_all_reports(
        &mut canvas,
        &styles,
        PageGeometry::default(),
        &mut provider,
        &job(),
        &mut |m| messages.push(m.to_string()),
    );

    // Cover, TOC, 16 banner sections and the closing page at minimum.
    assert!(canvas.page_count() >= 19, "got {} pages", canvas.page_count());
    assert_eq!(canvas.banner_pages(styles.banner_height).len(), 16);
    assert!(canvas.page_text(0).contains("Comprehensive Business Analysis"));
    assert!(canvas.page_text(0).contains("Acme Corp"));
    assert!(canvas.page_text(1).contains("Table of Contents"));
    let last = canvas.page_count() - 1;
    assert!(canvas.page_text(last).contains("Thank You"));

    // Fetches happen in catalog order and one progress line per report.
    let expected: Vec<&str> = REPORT_CATALOG.iter().map(|rt| rt.id).collect();
    assert_eq!(provider.seen, expected);
    assert_eq!(messages.len(), 16);
    assert!(messages[0].contains("Market Overview"));
}

#[test]
fn failed_fetch_becomes_error_section_and_bundle_survives() {
    let styles = StyleTable::default();
    let mut canvas = RecordingCanvas::new();
    let mut provider = StubProvider::failing(&["swot-analysis"]);

    build_all_reports(
        &mut canvas,
        &styles,
        PageGeometry::default(),
        &mut provider,
        &job(),
        &mut |_| {},
    );

    assert_eq!(canvas.banner_pages(styles.banner_height).len(), 16);
    let text = all_text(&canvas);
    assert!(text.contains("Error generating SWOT Analysis: upstream timeout"));
    // The entry stays in the table of contents despite the failure.
    assert!(canvas.page_text(1).contains("SWOT Analysis"));
    // The other sections still carry their content.
    assert!(text.contains("Body text for market-overview"));
    assert!(text.contains("Body text for action-plan"));
}

#[test]
fn interior_pages_carry_exactly_one_footer() {
    let styles = StyleTable::default();
    let mut canvas = RecordingCanvas::new();
    let mut provider = StubProvider::failing(&["customer-sentiment"]);

    build_all_reports(
        &mut canvas,
        &styles,
        PageGeometry::default(),
        &mut provider,
        &job(),
        &mut |_| {},
    );

    let total = canvas.page_count();
    for page in 0..total {
        let footers = canvas
            .text_ops(page)
            .iter()
            .filter(|(_, t)| t.contains(&format!("Page {} of {total}", page + 1)))
            .count();
        let expected = if page == 0 || page == total - 1 { 0 } else { 1 };
        assert_eq!(
            footers, expected,
            "page {page} of {total} has {footers} footers",
        );
    }
}

#[test]
fn summary_bundle_condenses_all_reports_into_one_section() {
    let styles = StyleTable::default();
    let mut canvas = RecordingCanvas::new();
    let mut provider = StubProvider::failing(&["funding-history"]);
    let mut summarizer = StubSummarizer {
        fail: false,
        received: 0,
    };

    let result = build_executive_summary(
        &mut canvas,
        &styles,
        PageGeometry::default(),
        &mut provider,
        &mut summarizer,
        &job(),
        &mut |_| {},
    );

    assert!(result.is_ok());
    // Every report is collected even when one fetch fails; the failure is
    // passed to the summarizer as error text.
    assert_eq!(summarizer.received, 16);
    assert_eq!(provider.seen.len(), 16);

    assert_eq!(canvas.banner_pages(styles.banner_height).len(), 1);
    assert!(canvas.page_text(0).contains("Executive Summary"));
    let text = all_text(&canvas);
    assert!(text.contains("Key Takeaways"));
    assert!(text.contains("Thank You"));
    assert!(!text.contains("Table of Contents"));
}

#[test]
fn summarization_failure_aborts_before_any_assembly() {
    let styles = StyleTable::default();
    let mut canvas = RecordingCanvas::new();
    let mut provider = StubProvider::new();
    let mut summarizer = StubSummarizer {
        fail: true,
        received: 0,
    };

    let result = build_executive_summary(
        &mut canvas,
        &styles,
        PageGeometry::default(),
        &mut provider,
        &mut summarizer,
        &job(),
        &mut |_| {},
    );

    match result {
        Err(Error::Summarization(message)) => assert_eq!(message, "model overloaded"),
        other => panic!("expected a summarization error, got {other:?}"),
    }
    // Nothing was drawn: the document is abandoned, not partially built.
    assert!(canvas.pages.iter().all(|ops| ops.is_empty()));
}
