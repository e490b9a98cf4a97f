/// Font/color state for a single text write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub color: [u8; 3],
}

impl TextStyle {
    pub fn from_rule(rule: &crate::style::StyleRule) -> Self {
        Self {
            font_size: rule.font_size,
            bold: rule.bold,
            color: rule.color,
        }
    }
}

/// The minimal drawing capability the layout engine needs from a rendering
/// backend. Coordinates are top-down: `y` grows from the top edge of the
/// page, and `text` takes the baseline position. A fresh canvas starts with
/// one empty page.
///
/// The engine treats the backend's page list as the source of truth for the
/// document: there is no separate page buffer.
pub trait Canvas {
    /// Append a new page and make it current.
    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    /// Zero-based index of the page currently receiving draws.
    fn current_page(&self) -> usize;

    /// Redirect subsequent draws to an existing page (footer stamping).
    /// Out-of-range indices are clamped to the last page.
    fn set_page(&mut self, index: usize);

    /// Draw `s` with its baseline at `(x, y)` on the current page.
    fn text(&mut self, x: f32, y: f32, s: &str, style: &TextStyle);

    /// Fill a rectangle whose top-left corner is `(x, y)`.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3]);

    /// Measured advance width of `s` at `style`, in points.
    fn text_width(&self, s: &str, style: &TextStyle) -> f32;
}
