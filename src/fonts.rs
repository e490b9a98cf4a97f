//! WinAnsi text encoding and approximate base-14 Helvetica metrics.
//!
//! The engine only needs advance widths for line wrapping and centering, so
//! the two standard faces are measured from compact width tables instead of
//! embedded font files.

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str
/// encoding. Characters without a WinAnsi slot are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}

/// Approximate Helvetica-Bold widths. Bold strokes widen most glyph classes
/// by roughly one metric step.
fn helvetica_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,
            33..=47 => 389.0,
            48..=57 => 556.0,
            58..=64 => 389.0,
            73 | 74 => 278.0,
            77 => 889.0,
            65..=90 => 722.0,
            91..=96 => 389.0,
            102 | 105 | 106 | 108 | 116 => 333.0,
            109 | 119 => 889.0,
            97..=122 => 611.0,
            _ => 611.0,
        })
        .collect()
}

pub(crate) struct FontMetrics {
    widths_1000: Vec<f32>,
}

impl FontMetrics {
    pub(crate) fn helvetica() -> Self {
        Self {
            widths_1000: helvetica_widths(),
        }
    }

    pub(crate) fn helvetica_bold() -> Self {
        Self {
            widths_1000: helvetica_bold_widths(),
        }
    }

    /// Advance width of `text` at `font_size` points.
    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .filter(|&&b| b >= 32)
            .map(|&b| self.widths_1000[(b - 32) as usize] * font_size / 1000.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winansi_maps_typographic_chars() {
        assert_eq!(to_winansi_bytes("•"), vec![0x95]);
        assert_eq!(to_winansi_bytes("a—b"), vec![b'a', 0x97, b'b']);
        // Unmappable characters are dropped, not replaced
        assert_eq!(to_winansi_bytes("a\u{4e2d}b"), vec![b'a', b'b']);
    }

    #[test]
    fn bold_measures_wider_than_regular() {
        let regular = FontMetrics::helvetica();
        let bold = FontMetrics::helvetica_bold();
        let s = "Competitive Landscape";
        assert!(bold.text_width(s, 12.0) > regular.text_width(s, 12.0));
    }

    #[test]
    fn width_scales_linearly_with_font_size() {
        let m = FontMetrics::helvetica();
        let w10 = m.text_width("pricing", 10.0);
        let w20 = m.text_width("pricing", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
    }
}
