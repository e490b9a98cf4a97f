use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use intelbrief_pdf::{
    ContentProvider, ExportJob, ReportRequest, RequesterContext, Summarizer, export_all_reports,
    export_executive_summary, export_single_report,
};

#[derive(Parser)]
#[command(
    name = "intelbrief-pdf",
    version,
    about = "Export competitive-intelligence markdown reports as paginated PDF documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export one markdown report file as a standalone document.
    Single {
        /// Markdown file with the report body.
        input: PathBuf,
        /// Report label used for the banner and the output filename.
        #[arg(long)]
        label: String,
        /// Output directory.
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
    /// Export the full 16-report bundle from a directory of
    /// `<report-id>.md` files.
    All {
        /// Directory holding one markdown file per report type id.
        reports: PathBuf,
        #[arg(long)]
        company: String,
        /// Competitor identifiers, comma separated.
        #[arg(long, value_delimiter = ',', default_value = "")]
        competitors: Vec<String>,
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
    /// Export the executive-summary bundle. The summary body is read from
    /// `executive_summary.md` in the reports directory.
    Summary {
        reports: PathBuf,
        #[arg(long)]
        company: String,
        #[arg(long, value_delimiter = ',', default_value = "")]
        competitors: Vec<String>,
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
}

/// Reads report bodies from `<dir>/<report_type_id>.md`.
struct FileProvider {
    dir: PathBuf,
}

impl ContentProvider for FileProvider {
    fn fetch(&mut self, request: &ReportRequest) -> Result<String, String> {
        let path = self.dir.join(format!("{}.md", request.report_type_id));
        std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))
    }
}

/// Stands in for the AI summarization service: serves a pre-written
/// `executive_summary.md` from the reports directory.
struct FileSummarizer {
    dir: PathBuf,
}

impl Summarizer for FileSummarizer {
    fn summarize(&mut self, _company_name: &str, _reports: &[String]) -> Result<String, String> {
        let path = self.dir.join("executive_summary.md");
        std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))
    }
}

fn job_for(company: String, competitors: Vec<String>) -> ExportJob {
    ExportJob {
        company_id: company.to_lowercase().replace(' ', "-"),
        company_name: company,
        competitor_ids: competitors.into_iter().filter(|c| !c.is_empty()).collect(),
        requester: RequesterContext {
            user_id: "cli".to_string(),
            firm_id: "local".to_string(),
        },
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut progress = |message: &str| log::info!("{message}");

    let result = match cli.command {
        Command::Single { input, label, out } => std::fs::read_to_string(&input)
            .map_err(intelbrief_pdf::Error::from)
            .and_then(|markdown| export_single_report(&label, &markdown, &out)),
        Command::All {
            reports,
            company,
            competitors,
            out,
        } => {
            let mut provider = FileProvider { dir: reports };
            let job = job_for(company, competitors);
            export_all_reports(&mut provider, &job, &out, &mut progress)
        }
        Command::Summary {
            reports,
            company,
            competitors,
            out,
        } => {
            let mut provider = FileProvider {
                dir: reports.clone(),
            };
            let mut summarizer = FileSummarizer { dir: reports };
            let job = job_for(company, competitors);
            export_executive_summary(&mut provider, &mut summarizer, &job, &out, &mut progress)
        }
    };

    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
