//! Section composition and document assembly.
//!
//! The assembler walks a linear sequence, never branching back:
//! cover → table of contents → sections → closing page → finalize. Cover,
//! TOC and closing page exist only in bundle modes. The backend's page list
//! is the only page buffer; `finalize` walks it to stamp footers.

use crate::canvas::{Canvas, TextStyle};
use crate::layout::{ASCENDER_RATIO, PageCursor, render_block, wrap_text};
use crate::model::{ExportMode, Section};
use crate::style::{PageGeometry, StyleTable};

pub struct Assembler<'a> {
    canvas: &'a mut dyn Canvas,
    styles: &'a StyleTable,
    geometry: PageGeometry,
    cursor: PageCursor,
    mode: ExportMode,
    page_used: bool,
    cover_page: Option<usize>,
    closing_page: Option<usize>,
}

impl<'a> Assembler<'a> {
    pub fn new(
        canvas: &'a mut dyn Canvas,
        styles: &'a StyleTable,
        geometry: PageGeometry,
        mode: ExportMode,
    ) -> Self {
        Self {
            canvas,
            styles,
            geometry,
            cursor: PageCursor::new(geometry),
            mode,
            page_used: false,
            cover_page: None,
            closing_page: None,
        }
    }

    /// Move to an untouched page: the initial blank page if nothing has been
    /// drawn yet, a fresh one otherwise.
    fn fresh_page(&mut self) {
        if self.page_used {
            self.cursor.break_page(self.canvas);
        }
        self.page_used = true;
    }

    fn centered(&mut self, y: f32, text: &str, style: &TextStyle) {
        let w = self.canvas.text_width(text, style);
        self.canvas
            .text((self.geometry.page_width - w) / 2.0, y, text, style);
    }

    /// Full-bleed cover: accent band across the upper half, document title,
    /// optional subject (company) name, metadata lines below the band.
    pub fn cover_page(&mut self, title: &str, subject: Option<&str>, meta: &[String]) {
        self.fresh_page();
        self.cover_page = Some(self.canvas.current_page());

        let g = self.geometry;
        let band_h = g.page_height * 0.45;
        self.canvas
            .fill_rect(0.0, 0.0, g.page_width, band_h, self.styles.accent);

        let title_style = TextStyle {
            font_size: 26.0,
            bold: true,
            color: [255, 255, 255],
        };
        let mut y = band_h * 0.55;
        for line in wrap_text(self.canvas, title, g.content_width(), &title_style) {
            self.centered(y, &line, &title_style);
            y += 32.0;
        }
        if let Some(subject) = subject {
            let subject_style = TextStyle {
                font_size: 15.0,
                bold: false,
                color: [220, 228, 240],
            };
            self.centered(y + 6.0, subject, &subject_style);
        }

        let meta_style = TextStyle {
            font_size: 10.5,
            bold: false,
            color: self.styles.footer.color,
        };
        let mut meta_y = band_h + 48.0;
        for line in meta {
            self.centered(meta_y, line, &meta_style);
            meta_y += 16.0;
        }

        self.cursor.seek(meta_y);
    }

    /// One page (overflowing to more as needed) listing every planned
    /// section. The entries are a fixed plan decided before any content is
    /// fetched, so a later fetch failure does not remove its entry.
    pub fn table_of_contents(&mut self, entries: &[(&str, &str)]) {
        self.fresh_page();
        let g = self.geometry;

        let heading_style = TextStyle {
            font_size: 18.0,
            bold: true,
            color: self.styles.heading1.color,
        };
        let baseline = self.cursor.y + heading_style.font_size * ASCENDER_RATIO;
        self.canvas
            .text(g.margin_left, baseline, "Table of Contents", &heading_style);
        self.cursor.advance(36.0);

        let title_style = TextStyle {
            font_size: 11.5,
            bold: true,
            color: self.styles.heading2.color,
        };
        let desc_style = TextStyle {
            font_size: 9.5,
            bold: false,
            color: self.styles.footer.color,
        };
        let title_lh = 15.0;
        let desc_lh = 12.0;
        let indent = 20.0;

        for (i, (title, description)) in entries.iter().enumerate() {
            let desc_lines =
                wrap_text(self.canvas, description, g.content_width() - indent, &desc_style);
            let entry_h = title_lh + desc_lines.len() as f32 * desc_lh + 8.0;
            self.cursor.ensure_space(entry_h, self.canvas);

            let label = format!("{}.  {}", i + 1, title);
            let baseline = self.cursor.y + title_style.font_size * ASCENDER_RATIO;
            self.canvas.text(g.margin_left, baseline, &label, &title_style);
            self.cursor.advance(title_lh);

            for line in &desc_lines {
                let baseline = self.cursor.y + desc_style.font_size * ASCENDER_RATIO;
                self.canvas
                    .text(g.margin_left + indent, baseline, line, &desc_style);
                self.cursor.advance(desc_lh);
            }
            self.cursor.pad(8.0);
        }
    }

    /// A section always starts on a brand-new page: full-width accent banner
    /// with the title, optional byline, then the blocks in order. A section
    /// with zero blocks still produces its banner page.
    pub fn compose_section(&mut self, section: &Section) {
        self.fresh_page();
        let g = self.geometry;
        let banner_h = self.styles.banner_height;

        self.canvas
            .fill_rect(0.0, 0.0, g.page_width, banner_h, self.styles.accent);
        let title_style = TextStyle {
            font_size: 16.0,
            bold: true,
            color: [255, 255, 255],
        };
        let baseline = banner_h / 2.0 + title_style.font_size * 0.35;
        self.canvas
            .text(g.margin_left, baseline, &section.title, &title_style);

        self.cursor.seek(banner_h + 18.0);

        if let Some(byline) = &section.byline {
            let byline_style = TextStyle {
                font_size: 9.5,
                bold: false,
                color: self.styles.footer.color,
            };
            let baseline = self.cursor.y + byline_style.font_size * ASCENDER_RATIO;
            self.canvas
                .text(g.margin_left, baseline, byline, &byline_style);
            self.cursor.advance(16.0);
        }

        for block in &section.blocks {
            render_block(block, &mut self.cursor, self.canvas, self.styles);
        }
        log::debug!(
            "section '{}' ended on page {} ({} blocks)",
            section.title,
            self.cursor.page_index,
            section.blocks.len(),
        );
    }

    /// Bordered thank-you page closing a bundle.
    pub fn closing_page(&mut self, headline: &str, message: &str) {
        self.fresh_page();
        self.closing_page = Some(self.canvas.current_page());

        let g = self.geometry;
        let inset = 24.0;
        let thickness = 2.0;
        let accent = self.styles.accent;
        let inner_w = g.page_width - 2.0 * inset;
        let inner_h = g.page_height - 2.0 * inset;
        self.canvas.fill_rect(inset, inset, inner_w, thickness, accent);
        self.canvas
            .fill_rect(inset, g.page_height - inset - thickness, inner_w, thickness, accent);
        self.canvas.fill_rect(inset, inset, thickness, inner_h, accent);
        self.canvas
            .fill_rect(g.page_width - inset - thickness, inset, thickness, inner_h, accent);

        let headline_style = TextStyle {
            font_size: 22.0,
            bold: true,
            color: self.styles.heading1.color,
        };
        self.centered(g.page_height * 0.42, headline, &headline_style);

        let message_style = TextStyle {
            font_size: 10.5,
            bold: false,
            color: self.styles.paragraph.color,
        };
        let mut y = g.page_height * 0.42 + 28.0;
        for line in wrap_text(self.canvas, message, g.content_width() - 80.0, &message_style) {
            self.centered(y, &line, &message_style);
            y += 15.0;
        }
    }

    /// Stamp a `date | Page i of N` footer on every interior page. Cover and
    /// closing pages are excluded; single-report documents carry no footer
    /// at all. Never fails: an empty body still finalizes cleanly.
    pub fn finalize(&mut self, date_label: &str) {
        if !self.mode.is_bundle() {
            return;
        }
        let total = self.canvas.page_count();
        let style = TextStyle::from_rule(&self.styles.footer);
        let y = self.geometry.page_height - self.geometry.margin_bottom + 22.0;

        for index in 0..total {
            if Some(index) == self.cover_page || Some(index) == self.closing_page {
                continue;
            }
            self.canvas.set_page(index);
            let label = format!("{}  |  Page {} of {}", date_label, index + 1, total);
            let w = self.canvas.text_width(&label, &style);
            self.canvas
                .text((self.geometry.page_width - w) / 2.0, y, &label, &style);
        }
        self.canvas.set_page(total - 1);
        log::debug!("finalized: {total} pages");
    }
}
