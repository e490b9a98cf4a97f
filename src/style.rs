use crate::model::BlockKind;

/// How one block kind is set: font, color and the vertical rhythm around it.
/// All distances are points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleRule {
    pub font_size: f32,
    pub bold: bool,
    pub color: [u8; 3],
    pub line_height: f32,
    pub top_gap: f32,
    pub bottom_gap: f32,
}

/// Fixed A4 page geometry with four-sided margins. Injected into the engine
/// rather than read from a global so tests can run with different sets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest `y` (top-down) a write may reach before a page break is due.
    pub fn content_limit(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin_left: 48.0,
            margin_right: 48.0,
            margin_top: 56.0,
            margin_bottom: 56.0,
        }
    }
}

/// The process-wide style lookup: block kind → rule, plus the handful of
/// document-chrome constants (banner, table shading, footer). Read-only.
#[derive(Clone, Debug)]
pub struct StyleTable {
    pub heading1: StyleRule,
    pub heading2: StyleRule,
    pub heading3: StyleRule,
    pub paragraph: StyleRule,
    pub list_item: StyleRule,
    pub table_header: StyleRule,
    pub table_cell: StyleRule,
    pub footer: StyleRule,
    /// Banner / cover / table-header background.
    pub accent: [u8; 3],
    /// Alternating table row background.
    pub row_shading: [u8; 3],
    pub banner_height: f32,
    pub list_indent: f32,
    /// Extra gap after the last line of each list item.
    pub list_item_gap: f32,
    pub cell_padding: f32,
}

impl StyleTable {
    /// Static lookup, no failure mode: kinds without a dedicated rule fall
    /// back to the paragraph rule.
    pub fn rule_for(&self, kind: BlockKind) -> &StyleRule {
        match kind {
            BlockKind::Heading1 => &self.heading1,
            BlockKind::Heading2 => &self.heading2,
            BlockKind::Heading3 => &self.heading3,
            BlockKind::UnorderedList | BlockKind::OrderedList => &self.list_item,
            BlockKind::Paragraph | BlockKind::Table => &self.paragraph,
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let ink = [31, 41, 55];
        let body = [55, 65, 81];
        Self {
            heading1: StyleRule {
                font_size: 18.0,
                bold: true,
                color: ink,
                line_height: 24.0,
                top_gap: 14.0,
                bottom_gap: 6.0,
            },
            heading2: StyleRule {
                font_size: 15.0,
                bold: true,
                color: ink,
                line_height: 20.0,
                top_gap: 12.0,
                bottom_gap: 5.0,
            },
            heading3: StyleRule {
                font_size: 13.0,
                bold: true,
                color: ink,
                line_height: 17.0,
                top_gap: 10.0,
                bottom_gap: 4.0,
            },
            paragraph: StyleRule {
                font_size: 10.5,
                bold: false,
                color: body,
                line_height: 15.0,
                top_gap: 0.0,
                bottom_gap: 8.0,
            },
            list_item: StyleRule {
                font_size: 10.5,
                bold: false,
                color: body,
                line_height: 15.0,
                top_gap: 0.0,
                bottom_gap: 8.0,
            },
            table_header: StyleRule {
                font_size: 9.5,
                bold: true,
                color: [255, 255, 255],
                line_height: 13.0,
                top_gap: 0.0,
                bottom_gap: 0.0,
            },
            table_cell: StyleRule {
                font_size: 9.5,
                bold: false,
                color: body,
                line_height: 13.0,
                top_gap: 6.0,
                bottom_gap: 10.0,
            },
            footer: StyleRule {
                font_size: 8.5,
                bold: false,
                color: [120, 128, 140],
                line_height: 11.0,
                top_gap: 0.0,
                bottom_gap: 0.0,
            },
            accent: [31, 59, 102],
            row_shading: [243, 244, 246],
            banner_height: 64.0,
            list_indent: 18.0,
            list_item_gap: 4.0,
            cell_padding: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_paragraph() {
        let styles = StyleTable::default();
        assert_eq!(*styles.rule_for(BlockKind::Table), styles.paragraph);
        assert_eq!(*styles.rule_for(BlockKind::Heading2), styles.heading2);
        assert_eq!(
            *styles.rule_for(BlockKind::OrderedList),
            *styles.rule_for(BlockKind::UnorderedList)
        );
    }

    #[test]
    fn default_geometry_leaves_printable_area() {
        let g = PageGeometry::default();
        assert!(g.content_width() > 400.0);
        assert!(g.content_limit() > g.margin_top);
    }
}
