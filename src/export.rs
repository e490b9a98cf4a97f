//! Export orchestration: fetches report content, assembles documents and
//! saves the finished PDF.
//!
//! Bundle builds fetch the catalog sequentially: the fetch order is the
//! table-of-contents order and the section order, so completion order never
//! drives layout order. A per-report fetch failure is recovered as an error
//! paragraph inside that report's section; only a failed batch summarization
//! aborts a build.

use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::compose::Assembler;
use crate::error::Error;
use crate::markdown::parse_blocks;
use crate::model::{Block, ExportMode, REPORT_CATALOG, ReportRequest, ReportType, Section};
use crate::pdf::PdfCanvas;
use crate::style::{PageGeometry, StyleTable};

/// Report-content provider: returns the markdown body for one report
/// request, or the provider's error message. Calls are synchronous; bundle
/// builds issue them one at a time.
pub trait ContentProvider {
    fn fetch(&mut self, request: &ReportRequest) -> Result<String, String>;
}

/// Batch summarization provider for Executive Summary exports.
pub trait Summarizer {
    fn summarize(&mut self, company_name: &str, reports: &[String]) -> Result<String, String>;
}

/// Everything a bundle export needs to know about its subject.
#[derive(Clone, Debug)]
pub struct ExportJob {
    pub company_id: String,
    pub company_name: String,
    pub competitor_ids: Vec<String>,
    pub requester: crate::model::RequesterContext,
}

impl ExportJob {
    fn request_for(&self, report_type: &ReportType) -> ReportRequest {
        ReportRequest {
            report_type_id: report_type.id.to_string(),
            company_id: self.company_id.clone(),
            competitor_ids: self.competitor_ids.clone(),
            requester: self.requester.clone(),
        }
    }

    fn cover_meta(&self, date_label: &str) -> Vec<String> {
        vec![
            format!("Generated {date_label}"),
            format!("{} competitors tracked", self.competitor_ids.len()),
        ]
    }
}

/// Phrases that mark a report body as provider-generated error text rather
/// than analysis. Substring match, case-insensitive. Kept behind this
/// predicate so it can be replaced by a structured success flag without
/// touching the callers.
const ERROR_PHRASES: [&str; 4] = [
    "failed to generate",
    "error generating",
    "unable to generate",
    "report generation service is unavailable",
];

pub fn looks_like_provider_error(text: &str) -> bool {
    let lower = text.to_lowercase();
    ERROR_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

fn error_section(title: &str) -> Section {
    Section::new(
        title,
        vec![
            Block::Heading {
                level: 2,
                text: "Report Unavailable".to_string(),
            },
            Block::Paragraph(
                "This report could not be generated. Regenerate it from the dashboard \
                 and export again."
                    .to_string(),
            ),
        ],
    )
}

fn fetch_blocks(
    provider: &mut dyn ContentProvider,
    job: &ExportJob,
    report_type: &ReportType,
) -> Vec<Block> {
    match provider.fetch(&job.request_for(report_type)) {
        Ok(text) => parse_blocks(&text),
        Err(message) => {
            log::warn!("fetch failed for {}: {message}", report_type.id);
            vec![Block::Paragraph(format!(
                "Error generating {}: {}",
                report_type.title, message
            ))]
        }
    }
}

/// Single-report fast path. The content is already fetched; if it reads
/// like provider error text, a fixed one-page error document is produced
/// instead of laying out a cosmetically complete report around the error.
pub fn build_single_report(
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
    geometry: PageGeometry,
    title: &str,
    markdown: &str,
) {
    let mut assembler = Assembler::new(canvas, styles, geometry, ExportMode::Single);
    if looks_like_provider_error(markdown) {
        assembler.compose_section(&error_section(title));
    } else {
        assembler.compose_section(&Section::new(title, parse_blocks(markdown)));
    }
    assembler.finalize(&iso_date());
}

/// All-reports bundle: cover, fixed-plan TOC, one section per catalog entry
/// in catalog order, closing page, footers.
pub fn build_all_reports(
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
    geometry: PageGeometry,
    provider: &mut dyn ContentProvider,
    job: &ExportJob,
    progress: &mut dyn FnMut(&str),
) {
    let date = iso_date();
    let mut assembler = Assembler::new(canvas, styles, geometry, ExportMode::All);

    assembler.cover_page(
        "Comprehensive Business Analysis",
        Some(&job.company_name),
        &job.cover_meta(&date),
    );

    // The TOC is planned before any fetch: an entry stays listed even if
    // its fetch later fails.
    let entries: Vec<(&str, &str)> = REPORT_CATALOG
        .iter()
        .map(|rt| (rt.title, rt.description))
        .collect();
    assembler.table_of_contents(&entries);

    for report_type in &REPORT_CATALOG {
        progress(&format!("Generating {}...", report_type.title));
        let blocks = fetch_blocks(provider, job, report_type);
        assembler.compose_section(
            &Section::new(report_type.title, blocks).with_byline(&job.company_name),
        );
    }

    assembler.closing_page(
        "Thank You",
        "This analysis was prepared from the latest available competitive data. \
         Review it alongside your own market knowledge before acting on it.",
    );
    assembler.finalize(&date);
}

/// Executive Summary bundle: all report texts are collected first, then
/// summarized in one batch. Summarization failure aborts the whole build;
/// partial summaries are not attempted.
pub fn build_executive_summary(
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
    geometry: PageGeometry,
    provider: &mut dyn ContentProvider,
    summarizer: &mut dyn Summarizer,
    job: &ExportJob,
    progress: &mut dyn FnMut(&str),
) -> Result<(), Error> {
    let date = iso_date();

    let mut texts: Vec<String> = Vec::with_capacity(REPORT_CATALOG.len());
    for report_type in &REPORT_CATALOG {
        progress(&format!("Collecting {}...", report_type.title));
        let text = match provider.fetch(&job.request_for(report_type)) {
            Ok(text) => text,
            Err(message) => {
                log::warn!("fetch failed for {}: {message}", report_type.id);
                format!("Error generating {}: {}", report_type.title, message)
            }
        };
        texts.push(text);
    }

    progress("Summarizing collected reports...");
    let summary = summarizer
        .summarize(&job.company_name, &texts)
        .map_err(Error::Summarization)?;

    let mut assembler = Assembler::new(canvas, styles, geometry, ExportMode::Summary);
    assembler.cover_page(
        "Executive Summary",
        Some(&job.company_name),
        &job.cover_meta(&date),
    );
    assembler.compose_section(
        &Section::new("Executive Summary", parse_blocks(&summary)).with_byline(&job.company_name),
    );
    assembler.closing_page(
        "Thank You",
        "This executive summary condenses the full competitive analysis. \
         Export the complete bundle for the underlying detail.",
    );
    assembler.finalize(&date);
    Ok(())
}

fn iso_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Filesystem-safe label: runs of non-alphanumeric characters collapse to a
/// single underscore.
fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_was_sep = true;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn save_pdf(canvas: PdfCanvas, out_dir: &Path, filename: &str) -> Result<PathBuf, Error> {
    let bytes = canvas.finish();
    let path = out_dir.join(filename);
    std::fs::write(&path, &bytes)?;
    Ok(path)
}

/// Export one already-fetched report as its own document.
/// Output: `<ReportLabel>_<ISODate>.pdf`.
pub fn export_single_report(
    report_label: &str,
    markdown: &str,
    out_dir: &Path,
) -> Result<PathBuf, Error> {
    let t0 = std::time::Instant::now();
    let styles = StyleTable::default();
    let geometry = PageGeometry::default();

    let mut canvas = PdfCanvas::new(geometry.page_width, geometry.page_height);
    build_single_report(&mut canvas, &styles, geometry, report_label, markdown);
    let filename = format!("{}_{}.pdf", sanitize_label(report_label), iso_date());
    let path = save_pdf(canvas, out_dir, &filename)?;

    log::info!(
        "single export '{report_label}' → {} ({:.1}ms)",
        path.display(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(path)
}

/// Export the full bundle.
/// Output: `Comprehensive_Business_Analysis_<CompanyName>_<ISODate>.pdf`.
pub fn export_all_reports(
    provider: &mut dyn ContentProvider,
    job: &ExportJob,
    out_dir: &Path,
    progress: &mut dyn FnMut(&str),
) -> Result<PathBuf, Error> {
    let t0 = std::time::Instant::now();
    let styles = StyleTable::default();
    let geometry = PageGeometry::default();

    let mut canvas = PdfCanvas::new(geometry.page_width, geometry.page_height);
    build_all_reports(&mut canvas, &styles, geometry, provider, job, progress);
    let filename = format!(
        "Comprehensive_Business_Analysis_{}_{}.pdf",
        sanitize_label(&job.company_name),
        iso_date(),
    );
    let result = save_pdf(canvas, out_dir, &filename);

    // The caller's overlay keys off this terminal message on every path.
    progress(match &result {
        Ok(_) => "Export complete",
        Err(_) => "Export failed",
    });
    if let Ok(path) = &result {
        log::info!(
            "bundle export for '{}' → {} ({:.1}ms)",
            job.company_name,
            path.display(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
    }
    result
}

/// Export the summarized bundle.
/// Output: `Executive_Summary_<CompanyName>_<ISODate>.pdf`. A failed
/// summarization aborts without saving anything.
pub fn export_executive_summary(
    provider: &mut dyn ContentProvider,
    summarizer: &mut dyn Summarizer,
    job: &ExportJob,
    out_dir: &Path,
    progress: &mut dyn FnMut(&str),
) -> Result<PathBuf, Error> {
    let t0 = std::time::Instant::now();
    let styles = StyleTable::default();
    let geometry = PageGeometry::default();

    let mut canvas = PdfCanvas::new(geometry.page_width, geometry.page_height);
    let result = build_executive_summary(
        &mut canvas,
        &styles,
        geometry,
        provider,
        summarizer,
        job,
        progress,
    )
    .and_then(|()| {
        let filename = format!(
            "Executive_Summary_{}_{}.pdf",
            sanitize_label(&job.company_name),
            iso_date(),
        );
        save_pdf(canvas, out_dir, &filename)
    });

    progress(match &result {
        Ok(_) => "Export complete",
        Err(_) => "Export failed",
    });
    if let Ok(path) = &result {
        log::info!(
            "summary export for '{}' → {} ({:.1}ms)",
            job.company_name,
            path.display(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_sniff_is_case_insensitive_substring() {
        assert!(looks_like_provider_error("Sorry, FAILED TO GENERATE report"));
        assert!(looks_like_provider_error("there was an Error Generating this"));
        assert!(!looks_like_provider_error("# Market Overview\n\nAll good."));
        assert!(!looks_like_provider_error(""));
    }

    #[test]
    fn labels_sanitize_to_filename_safe_tokens() {
        assert_eq!(sanitize_label("Acme Corp."), "Acme_Corp");
        assert_eq!(sanitize_label("SWOT Analysis"), "SWOT_Analysis");
        assert_eq!(sanitize_label("a  / b"), "a_b");
        assert_eq!(sanitize_label("__"), "");
    }
}
