//! Standard Type 1 font handling for the PDF report
//!
//! The report only uses the base-14 Helvetica family, which every PDF viewer
//! provides, so no font program is embedded. Text is limited to a single-byte
//! Latin character set.

/// Typeface variant used for a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    /// Regular face with an underline rule
    Underline,
}

impl FontStyle {
    /// Resource name of the font in the page resources
    pub fn resource_name(self) -> &'static str {
        match self {
            FontStyle::Regular | FontStyle::Underline => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    pub fn is_underlined(self) -> bool {
        matches!(self, FontStyle::Underline)
    }

    /// Width of a glyph in thousandths of the font size
    pub fn glyph_width(self, byte: u8) -> u16 {
        let (ascii, latin1) = match self {
            FontStyle::Bold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_LATIN1_WIDTHS),
            _ => (&HELVETICA_WIDTHS, &HELVETICA_LATIN1_WIDTHS),
        };

        match byte {
            32..=126 => ascii[usize::from(byte - 32)],
            0xA0..=0xFF => latin1[usize::from(byte - 0xA0)],
            // Control characters have no glyph
            _ => 0,
        }
    }

    /// Width of a Latin-1 string in thousandths of the font size
    pub fn text_width(self, bytes: &[u8]) -> u32 {
        bytes
            .iter()
            .map(|&byte| u32::from(self.glyph_width(byte)))
            .sum()
    }
}

/// Base fonts registered in the document, by resource name
pub const BASE_FONTS: [(&str, &str); 3] = [
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Helvetica-Oblique"),
];

/// Re-encode text to Latin-1, replacing unrepresentable characters with `?`
///
/// # Example
///
/// ```
/// use pubmed_export::document::to_latin1;
///
/// assert_eq!(to_latin1("Período"), b"Per\xedodo".to_vec());
/// assert_eq!(to_latin1("β-catenin"), b"?-catenin".to_vec());
/// ```
pub fn to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

// Helvetica advance widths for 0x20..=0x7E (Adobe AFM)
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

// Helvetica-Bold advance widths for 0x20..=0x7E (Adobe AFM)
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

// Helvetica advance widths for 0xA0..=0xFF (Adobe AFM)
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // eth..ydieresis
];

// Helvetica-Bold advance widths for 0xA0..=0xFF (Adobe AFM)
const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // eth..ydieresis
];
