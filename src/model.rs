#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    UnorderedList,
    OrderedList,
    Table,
}

/// One typed unit of parsed report content. Immutable once produced by the
/// markdown parser; owned by a `Section` during rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    List { ordered: bool, items: Vec<String> },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { level: 1, .. } => BlockKind::Heading1,
            Block::Heading { level: 2, .. } => BlockKind::Heading2,
            Block::Heading { .. } => BlockKind::Heading3,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::List { ordered: false, .. } => BlockKind::UnorderedList,
            Block::List { ordered: true, .. } => BlockKind::OrderedList,
            Block::Table { .. } => BlockKind::Table,
        }
    }

    /// A block with no visible content renders as nothing and consumes no
    /// vertical space. Stray empty markdown elements must never produce
    /// blank gaps.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Heading { text, .. } | Block::Paragraph(text) => text.trim().is_empty(),
            Block::List { items, .. } => items.iter().all(|i| i.trim().is_empty()),
            Block::Table { headers, rows } => {
                headers.iter().all(|h| h.trim().is_empty())
                    && rows.iter().all(|r| r.iter().all(|c| c.trim().is_empty()))
            }
        }
    }
}

/// One complete report: banner title, optional company byline, and the
/// parsed blocks. Consumed exactly once by the section composer.
#[derive(Clone, Debug)]
pub struct Section {
    pub title: String,
    pub byline: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            byline: None,
            blocks,
        }
    }

    pub fn with_byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = Some(byline.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportMode {
    Single,
    All,
    Summary,
}

impl ExportMode {
    /// Cover and closing pages exist only when several reports are bundled
    /// into one document.
    pub fn is_bundle(self) -> bool {
        matches!(self, ExportMode::All | ExportMode::Summary)
    }
}

#[derive(Clone, Debug)]
pub struct RequesterContext {
    pub user_id: String,
    pub firm_id: String,
}

/// Input to the report-content provider for one report type.
#[derive(Clone, Debug)]
pub struct ReportRequest {
    pub report_type_id: String,
    pub company_id: String,
    pub competitor_ids: Vec<String>,
    pub requester: RequesterContext,
}

/// One entry of the fixed report-type catalog: stable id, display title and
/// the one-line description shown in the table of contents.
#[derive(Clone, Copy, Debug)]
pub struct ReportType {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed, ordered catalog of report types. Bundle exports fetch these
/// sequentially; the order here is the order of the table of contents and of
/// the sections in the final document.
pub const REPORT_CATALOG: [ReportType; 16] = [
    ReportType {
        id: "market-overview",
        title: "Market Overview",
        description: "Size, growth and segmentation of the market the company competes in.",
    },
    ReportType {
        id: "competitor-profiles",
        title: "Competitor Profiles",
        description: "Who the tracked competitors are, their positioning and scale.",
    },
    ReportType {
        id: "swot-analysis",
        title: "SWOT Analysis",
        description: "Strengths, weaknesses, opportunities and threats relative to competitors.",
    },
    ReportType {
        id: "pricing-comparison",
        title: "Pricing Comparison",
        description: "Published pricing and packaging across the competitive set.",
    },
    ReportType {
        id: "product-benchmark",
        title: "Product Benchmark",
        description: "Feature-by-feature comparison of the company's product against rivals.",
    },
    ReportType {
        id: "marketing-channels",
        title: "Marketing Channels",
        description: "Where competitors invest in acquisition and how loudly they spend.",
    },
    ReportType {
        id: "customer-sentiment",
        title: "Customer Sentiment",
        description: "Review and social signal analysis for the company and its competitors.",
    },
    ReportType {
        id: "talent-landscape",
        title: "Talent Landscape",
        description: "Hiring velocity, key roles and organizational signals at competitors.",
    },
    ReportType {
        id: "funding-history",
        title: "Funding History",
        description: "Capital raised, investors and runway signals across the competitive set.",
    },
    ReportType {
        id: "technology-stack",
        title: "Technology Stack",
        description: "Observable technology choices and engineering investments.",
    },
    ReportType {
        id: "partnership-map",
        title: "Partnership Map",
        description: "Alliances, integrations and channel relationships of each competitor.",
    },
    ReportType {
        id: "regulatory-risks",
        title: "Regulatory Risks",
        description: "Compliance exposure and pending regulation affecting the market.",
    },
    ReportType {
        id: "growth-opportunities",
        title: "Growth Opportunities",
        description: "Underserved segments and expansion plays competitors have not taken.",
    },
    ReportType {
        id: "threat-assessment",
        title: "Threat Assessment",
        description: "Ranked near-term competitive threats and their likely impact.",
    },
    ReportType {
        id: "go-to-market",
        title: "Go-to-Market Strategy",
        description: "How competitors sell, their motion and their sales narratives.",
    },
    ReportType {
        id: "action-plan",
        title: "Recommended Action Plan",
        description: "Prioritized defensive and offensive moves derived from the analysis.",
    },
];

pub fn report_type_by_id(id: &str) -> Option<&'static ReportType> {
    REPORT_CATALOG.iter().find(|rt| rt.id == id)
}
