use intelbrief_pdf::{Canvas, TextStyle};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        bold: bool,
        color: [u8; 3],
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: [u8; 3],
    },
}

/// Canvas fake that records every draw per page. Text is measured at a
/// fixed half-em per character so wrapping is deterministic.
pub struct RecordingCanvas {
    pub pages: Vec<Vec<Op>>,
    current: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            current: 0,
        }
    }

    /// All text written to a page, joined in draw order.
    pub fn page_text(&self, page: usize) -> String {
        self.pages[page]
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                Op::Rect { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Baseline positions and text of every text op on a page.
    pub fn text_ops(&self, page: usize) -> Vec<(f32, &str)> {
        self.pages[page]
            .iter()
            .filter_map(|op| match op {
                Op::Text { y, text, .. } => Some((*y, text.as_str())),
                Op::Rect { .. } => None,
            })
            .collect()
    }

    /// Pages carrying a full-width section banner of the given height.
    pub fn banner_pages(&self, banner_height: f32) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, ops)| {
                ops.iter().any(|op| {
                    matches!(op, Op::Rect { y, h, .. }
                        if *y == 0.0 && (*h - banner_height).abs() < 0.01)
                })
            })
            .map(|(i, _)| i)
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn set_page(&mut self, index: usize) {
        self.current = index.min(self.pages.len() - 1);
    }

    fn text(&mut self, x: f32, y: f32, s: &str, style: &TextStyle) {
        self.pages[self.current].push(Op::Text {
            x,
            y,
            text: s.to_string(),
            font_size: style.font_size,
            bold: style.bold,
            color: style.color,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3]) {
        self.pages[self.current].push(Op::Rect { x, y, w, h, color });
    }

    fn text_width(&self, s: &str, style: &TextStyle) -> f32 {
        s.chars().count() as f32 * style.font_size * 0.5
    }
}
