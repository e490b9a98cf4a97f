pub mod canvas;
pub mod compose;
mod error;
pub mod export;
mod fonts;
pub mod layout;
pub mod markdown;
pub mod model;
pub mod pdf;
pub mod style;

pub use canvas::{Canvas, TextStyle};
pub use compose::Assembler;
pub use error::Error;
pub use export::{
    ContentProvider, ExportJob, Summarizer, export_all_reports, export_executive_summary,
    export_single_report, looks_like_provider_error,
};
pub use markdown::parse_blocks;
pub use model::{
    Block, BlockKind, ExportMode, REPORT_CATALOG, ReportRequest, ReportType, RequesterContext,
    Section, report_type_by_id,
};
pub use pdf::PdfCanvas;
pub use style::{PageGeometry, StyleRule, StyleTable};
