//! Layout engine: vertical cursor management, text wrapping and per-block
//! rendering against a `Canvas`.

mod table;

use crate::canvas::{Canvas, TextStyle};
use crate::model::{Block, BlockKind};
use crate::style::{PageGeometry, StyleRule, StyleTable};

/// Fraction of the font size between the top of a line slot and the
/// baseline. Matches the Helvetica ascender.
pub(crate) const ASCENDER_RATIO: f32 = 0.75;

/// Tracks the current page and the vertical write position within margins.
/// `y` is top-down: it starts at `margin_top` on every new page and a write
/// may never push it past `page_height - margin_bottom`.
pub struct PageCursor {
    pub page_index: usize,
    pub y: f32,
    geometry: PageGeometry,
}

impl PageCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            page_index: 1,
            y: geometry.margin_top,
            geometry,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.geometry.margin_top).abs() < 0.5
    }

    /// Vertical space left on the current page.
    pub fn remaining(&self) -> f32 {
        self.geometry.content_limit() - self.y
    }

    /// Start a new page: the backend appends one, `y` resets to the top
    /// margin. The page index mirrors the backend's page count, which is
    /// the source of truth.
    pub fn break_page(&mut self, canvas: &mut dyn Canvas) {
        canvas.add_page();
        self.page_index = canvas.page_count();
        self.y = self.geometry.margin_top;
        log::debug!("page break → page {}", self.page_index);
    }

    /// Guarantee `required` points of space before the caller writes,
    /// breaking the page first if the write would cross the bottom margin.
    pub fn ensure_space(&mut self, required: f32, canvas: &mut dyn Canvas) {
        if self.y + required > self.geometry.content_limit() {
            self.break_page(canvas);
        }
    }

    /// Move down after a write.
    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }

    /// Cosmetic gap between blocks. Clamped to the bottom margin so trailing
    /// gaps never leave the cursor outside the writable band.
    pub fn pad(&mut self, gap: f32) {
        self.y = (self.y + gap).min(self.geometry.content_limit());
    }

    /// Place the cursor at an absolute offset from the page top (used below
    /// section banners). Never above the top margin.
    pub fn seek(&mut self, y: f32) {
        self.y = y.max(self.geometry.margin_top).min(self.geometry.content_limit());
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`,
/// measured through the canvas. A word wider than the limit gets a line of
/// its own rather than being split mid-word. Whitespace-only text wraps to
/// zero lines.
pub fn wrap_text(canvas: &dyn Canvas, text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
    let space_w = canvas.text_width(" ", style);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w: f32 = 0.0;

    for word in text.split_whitespace() {
        let word_w = canvas.text_width(word, style);
        if !current.is_empty() && current_w + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current_w = 0.0;
        }
        if current.is_empty() {
            current.push_str(word);
            current_w = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_w += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render one block at the cursor, advancing it and breaking pages as
/// needed. Empty blocks are a no-op and consume no space.
pub fn render_block(
    block: &Block,
    cursor: &mut PageCursor,
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
) {
    if block.is_empty() {
        return;
    }
    match block {
        Block::Heading { text, .. } => {
            render_heading(text, block.kind(), cursor, canvas, styles);
        }
        Block::Paragraph(text) => render_paragraph(text, cursor, canvas, styles),
        Block::List { ordered, items } => render_list(*ordered, items, cursor, canvas, styles),
        Block::Table { headers, rows } => {
            table::render_table(headers, rows, cursor, canvas, styles);
        }
    }
}

fn write_line(
    line: &str,
    x: f32,
    cursor: &mut PageCursor,
    canvas: &mut dyn Canvas,
    rule: &StyleRule,
    style: &TextStyle,
) {
    cursor.ensure_space(rule.line_height, canvas);
    let baseline = cursor.y + rule.font_size * ASCENDER_RATIO;
    canvas.text(x, baseline, line, style);
    cursor.advance(rule.line_height);
}

/// Headings are kept together: space for the whole wrapped run is reserved
/// up front, then lines are written. The per-line check below stays as a
/// guard for a heading taller than a page.
fn render_heading(
    text: &str,
    kind: BlockKind,
    cursor: &mut PageCursor,
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
) {
    let rule = styles.rule_for(kind);
    let style = TextStyle::from_rule(rule);
    let g = *cursor.geometry();
    let lines = wrap_text(canvas, text, g.content_width(), &style);
    if lines.is_empty() {
        return;
    }
    if !cursor.at_page_top() {
        cursor.pad(rule.top_gap);
    }
    cursor.ensure_space(lines.len() as f32 * rule.line_height, canvas);
    for line in &lines {
        write_line(line, g.margin_left, cursor, canvas, rule, &style);
    }
    cursor.pad(rule.bottom_gap);
}

/// Paragraphs check space per line, not per block: a paragraph may legally
/// split across a page boundary (pages are filled in preference to avoiding
/// mid-paragraph breaks).
fn render_paragraph(
    text: &str,
    cursor: &mut PageCursor,
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
) {
    let rule = &styles.paragraph;
    let style = TextStyle::from_rule(rule);
    let g = *cursor.geometry();
    let lines = wrap_text(canvas, text, g.content_width(), &style);
    if lines.is_empty() {
        return;
    }
    if !cursor.at_page_top() {
        cursor.pad(rule.top_gap);
    }
    for line in &lines {
        write_line(line, g.margin_left, cursor, canvas, rule, &style);
    }
    cursor.pad(rule.bottom_gap);
}

pub(crate) fn list_marker(ordered: bool, ordinal: usize) -> String {
    if ordered {
        format!("{}.", ordinal + 1)
    } else {
        "\u{2022}".to_string()
    }
}

fn render_list(
    ordered: bool,
    items: &[String],
    cursor: &mut PageCursor,
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
) {
    let rule = &styles.list_item;
    let style = TextStyle::from_rule(rule);
    let g = *cursor.geometry();
    let indent = styles.list_indent;
    let text_x = g.margin_left + indent;
    let wrap_width = g.content_width() - indent;

    for (ordinal, item) in items.iter().enumerate() {
        let lines = wrap_text(canvas, item, wrap_width, &style);
        if lines.is_empty() {
            continue;
        }
        for (li, line) in lines.iter().enumerate() {
            cursor.ensure_space(rule.line_height, canvas);
            let baseline = cursor.y + rule.font_size * ASCENDER_RATIO;
            if li == 0 {
                canvas.text(g.margin_left, baseline, &list_marker(ordered, ordinal), &style);
            }
            canvas.text(text_x, baseline, line, &style);
            cursor.advance(rule.line_height);
        }
        cursor.pad(styles.list_item_gap);
    }
    cursor.pad(rule.bottom_gap);
}
