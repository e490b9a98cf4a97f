//! `Canvas` backend producing a real PDF through `pdf-writer`.
//!
//! Pages are accumulated as independent content streams and assembled into
//! the page tree once the build is complete. The two base-14 Helvetica faces
//! are registered with WinAnsi encoding; no font data is embedded.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::canvas::{Canvas, TextStyle};
use crate::fonts::{FontMetrics, to_winansi_bytes};

pub struct PdfCanvas {
    page_width: f32,
    page_height: f32,
    pages: Vec<Content>,
    current: usize,
    regular: FontMetrics,
    bold: FontMetrics,
}

impl PdfCanvas {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            pages: vec![Content::new()],
            current: 0,
            regular: FontMetrics::helvetica(),
            bold: FontMetrics::helvetica_bold(),
        }
    }

    /// Assemble the catalog, fonts and page tree and return the PDF bytes.
    /// Content streams are deflate-compressed.
    pub fn finish(self) -> Vec<u8> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, content) in self.pages.into_iter().enumerate() {
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), regular_id);
            fonts.pair(Name(b"F2"), bold_id);
        }

        let bytes = pdf.finish();
        log::info!(
            "PDF assembly: {} pages, {} bytes, {:.1}ms",
            n,
            bytes.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        bytes
    }

    fn metrics(&self, bold: bool) -> &FontMetrics {
        if bold { &self.bold } else { &self.regular }
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self) {
        self.pages.push(Content::new());
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
        let baseline = self.page_height - y;
        let font = if style.bold { b"F2".as_slice() } else { b"F1".as_slice() };
        let [r, g, b] = style.color;
        let bytes = to_winansi_bytes(s);

        // Each write is self-contained: pages may be revisited for footer
        // stamping, so no graphics state is carried between calls.
        let content = &mut self.pages[self.current];
        content.begin_text();
        content.set_font(Name(font), style.font_size);
        content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        content.next_line(x, baseline);
        content.show(Str(&bytes));
        content.end_text();
        content.set_fill_gray(0.0);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3]) {
        let [r, g, b] = color;
        let content = &mut self.pages[self.current];
        content.save_state();
        content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        content.rect(x, self.page_height - y - h, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn text_width(&self, s: &str, style: &TextStyle) -> f32 {
        self.metrics(style.bold).text_width(s, style.font_size)
    }
}
