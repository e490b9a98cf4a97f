//! Table pagination: header + body rows across pages, with the header row
//! re-drawn at the top of every continuation page.

use crate::canvas::{Canvas, TextStyle};
use crate::style::StyleTable;

use super::{ASCENDER_RATIO, PageCursor, wrap_text};

struct CellRun {
    lines: Vec<Vec<String>>,
    height: f32,
}

impl CellRun {
    /// Line count of the tallest cell; a row with only empty cells still
    /// occupies one line slot.
    fn line_count(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0).max(1)
    }
}

/// Wrap every cell of a row and derive the row height from the tallest cell.
fn layout_row(
    canvas: &dyn Canvas,
    cells: &[String],
    ncols: usize,
    col_width: f32,
    padding: f32,
    style: &TextStyle,
    line_height: f32,
) -> CellRun {
    let inner = (col_width - 2.0 * padding).max(1.0);
    let lines: Vec<Vec<String>> = (0..ncols)
        .map(|i| {
            cells
                .get(i)
                .map(|c| wrap_text(canvas, c, inner, style))
                .unwrap_or_default()
        })
        .collect();
    let tallest = lines.iter().map(|l| l.len()).max().unwrap_or(0).max(1);
    CellRun {
        lines,
        height: tallest as f32 * line_height + 2.0 * padding,
    }
}

/// Draw line slots `from..to` of a row and return the drawn height. Cells
/// shorter than the slice contribute nothing past their own last line.
#[allow(clippy::too_many_arguments)]
fn draw_row_lines(
    canvas: &mut dyn Canvas,
    run: &CellRun,
    from: usize,
    to: usize,
    x0: f32,
    top: f32,
    col_width: f32,
    padding: f32,
    style: &TextStyle,
    line_height: f32,
    background: Option<[u8; 3]>,
    full_width: f32,
) -> f32 {
    let height = (to - from).max(1) as f32 * line_height + 2.0 * padding;
    if let Some(color) = background {
        canvas.fill_rect(x0, top, full_width, height, color);
    }
    for (ci, cell_lines) in run.lines.iter().enumerate() {
        let cell_x = x0 + ci as f32 * col_width + padding;
        let mut line_top = top + padding;
        for line in cell_lines.iter().take(to).skip(from) {
            canvas.text(cell_x, line_top + style.font_size * ASCENDER_RATIO, line, style);
            line_top += line_height;
        }
    }
    height
}

/// Lay out a table at the cursor. Column widths come from even division of
/// the content width by the column count. A table is never started in a
/// space too small to show its header plus one body row; whenever a body
/// row would cross the bottom margin, a new page begins and the header is
/// re-drawn before the remaining rows. A row too tall for even a fresh page
/// is itself split at line granularity rather than drawn past the margin.
/// Alternating row backgrounds are cosmetic.
pub(crate) fn render_table(
    headers: &[String],
    rows: &[Vec<String>],
    cursor: &mut PageCursor,
    canvas: &mut dyn Canvas,
    styles: &StyleTable,
) {
    let ncols = if headers.is_empty() {
        rows.first().map(|r| r.len()).unwrap_or(0)
    } else {
        headers.len()
    };
    if ncols == 0 {
        return;
    }

    let g = *cursor.geometry();
    let x0 = g.margin_left;
    let full_width = g.content_width();
    let col_width = full_width / ncols as f32;
    let padding = styles.cell_padding;

    let header_style = TextStyle::from_rule(&styles.table_header);
    let cell_style = TextStyle::from_rule(&styles.table_cell);
    let header_lh = styles.table_header.line_height;
    let cell_lh = styles.table_cell.line_height;

    let header_run = (!headers.is_empty()).then(|| {
        layout_row(canvas, headers, ncols, col_width, padding, &header_style, header_lh)
    });
    let header_h = header_run.as_ref().map(|h| h.height).unwrap_or(0.0);

    if !cursor.at_page_top() {
        cursor.pad(styles.table_cell.top_gap);
    }

    // Never start a table where not even the header and one body row fit.
    let first_row_h = rows
        .first()
        .map(|r| layout_row(canvas, r, ncols, col_width, padding, &cell_style, cell_lh).height)
        .unwrap_or(cell_lh + 2.0 * padding);
    if !cursor.at_page_top() && cursor.remaining() < header_h + first_row_h {
        cursor.break_page(canvas);
    }

    let mut draw_header = |cursor: &mut PageCursor, canvas: &mut dyn Canvas| {
        if let Some(run) = &header_run {
            let h = draw_row_lines(
                canvas,
                run,
                0,
                run.line_count(),
                x0,
                cursor.y,
                col_width,
                padding,
                &header_style,
                header_lh,
                Some(styles.accent),
                full_width,
            );
            cursor.advance(h);
        }
    };

    draw_header(cursor, canvas);

    for (ri, row) in rows.iter().enumerate() {
        let run = layout_row(canvas, row, ncols, col_width, padding, &cell_style, cell_lh);
        if cursor.remaining() < run.height && !cursor.at_page_top() {
            log::debug!("table continuation after row {ri}");
            cursor.break_page(canvas);
            draw_header(cursor, canvas);
        }
        let background = (ri % 2 == 1).then_some(styles.row_shading);

        // A row taller than the space left on a fresh page is split at line
        // granularity, with the header re-drawn above every slice.
        let total_lines = run.line_count();
        let mut from = 0usize;
        while from < total_lines {
            let mut fit = ((cursor.remaining() - 2.0 * padding) / cell_lh) as usize;
            if fit == 0 && cursor.at_page_top() {
                fit = 1;
            }
            if fit == 0 {
                cursor.break_page(canvas);
                draw_header(cursor, canvas);
                continue;
            }
            let to = total_lines.min(from + fit);
            let h = draw_row_lines(
                canvas,
                &run,
                from,
                to,
                x0,
                cursor.y,
                col_width,
                padding,
                &cell_style,
                cell_lh,
                background,
                full_width,
            );
            cursor.advance(h);
            from = to;
            if from < total_lines {
                log::debug!("row {ri} continues past line {to}");
                cursor.break_page(canvas);
                draw_header(cursor, canvas);
            }
        }
    }

    cursor.pad(styles.table_cell.bottom_gap);
}
