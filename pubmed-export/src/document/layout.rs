//! Page layout primitives: cells, multi-line cells, line breaks and rules
//!
//! Positions are tracked in millimetres from the top-left corner of an A4
//! page and converted to PDF points (origin bottom-left) when operations are
//! emitted. A line that would cross the bottom break margin starts a new page.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use super::fonts::FontStyle;

/// Points per millimetre
pub const K: f32 = 72.0 / 25.4;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
pub const BREAK_MARGIN: f32 = 15.0;
/// Horizontal padding inside a cell
pub const CELL_MARGIN: f32 = MARGIN / 10.0;

const LINE_WIDTH: f32 = 0.2;
const UNDERLINE_POSITION: f32 = -100.0;
const UNDERLINE_THICKNESS: f32 = 50.0;

/// One output line of a wrapped paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub bytes: Vec<u8>,
    /// Extra space added to each space character to justify the line, in mm
    pub word_spacing: f32,
}

/// Lay out Latin-1 text into lines no wider than `max_width` millimetres
///
/// Lines break at the last space that fits; a word longer than the line is
/// broken between characters. Explicit `\n` starts a new line. Lines ended by
/// wrapping at a space are justified; the last line of each paragraph is not.
pub fn wrap_text(text: &[u8], style: FontStyle, size_pt: f32, max_width: f32) -> Vec<WrappedLine> {
    let font_size = size_pt / K;
    let max_units = max_width * 1000.0 / font_size;

    let mut bytes: Vec<u8> = text.iter().copied().filter(|&b| b != b'\r').collect();
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    let mut last_space: Option<usize> = None;
    let mut width_at_space = 0.0;
    let mut spaces = 0;
    let mut width = 0.0;

    while i < bytes.len() {
        let byte = bytes[i];

        if byte == b'\n' {
            lines.push(WrappedLine {
                bytes: bytes[start..i].to_vec(),
                word_spacing: 0.0,
            });
            i += 1;
            start = i;
            last_space = None;
            spaces = 0;
            width = 0.0;
            continue;
        }

        if byte == b' ' {
            last_space = Some(i);
            width_at_space = width;
            spaces += 1;
        }

        width += f32::from(style.glyph_width(byte));

        if width > max_units {
            match last_space {
                None => {
                    if i == start {
                        i += 1;
                    }
                    lines.push(WrappedLine {
                        bytes: bytes[start..i].to_vec(),
                        word_spacing: 0.0,
                    });
                }
                Some(space) => {
                    let word_spacing = if spaces > 1 {
                        (max_units - width_at_space) / 1000.0 * font_size / (spaces - 1) as f32
                    } else {
                        0.0
                    };
                    lines.push(WrappedLine {
                        bytes: bytes[start..space].to_vec(),
                        word_spacing,
                    });
                    i = space + 1;
                }
            }
            start = i;
            last_space = None;
            spaces = 0;
            width = 0.0;
        } else {
            i += 1;
        }
    }

    lines.push(WrappedLine {
        bytes: bytes[start..].to_vec(),
        word_spacing: 0.0,
    });
    lines
}

/// Page content under construction
pub struct PageLayout {
    pages: Vec<Vec<Operation>>,
    y: f32,
    style: FontStyle,
    size_pt: f32,
}

impl PageLayout {
    /// Start with one empty page and the cursor at the top margin
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: MARGIN,
            style: FontStyle::Regular,
            size_pt: 12.0,
        }
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.style = style;
        self.size_pt = size_pt;
    }

    /// Current vertical position in mm from the top edge
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Move to the left margin and down by `height`
    pub fn line_break(&mut self, height: f32) {
        self.y += height;
    }

    /// Single-line cell of the given width starting at the left margin with
    /// the text centred in it, followed by a line break
    pub fn centered_cell(&mut self, width: f32, height: f32, text: &[u8]) {
        self.break_page_if_needed(height);

        let dx = (width - self.text_width(text)) / 2.0;
        self.emit_text(MARGIN + dx, height, text, 0.0);
        self.y += height;
    }

    /// Cell spanning the full text width that wraps onto as many lines as needed
    pub fn multi_cell(&mut self, height: f32, text: &[u8]) {
        let max_width = PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_MARGIN;

        for line in wrap_text(text, self.style, self.size_pt, max_width) {
            self.break_page_if_needed(height);
            self.emit_text(MARGIN + CELL_MARGIN, height, &line.bytes, line.word_spacing);
            self.y += height;
        }
    }

    /// Horizontal rule at the current position
    pub fn rule(&mut self, x1: f32, x2: f32) {
        let y = (PAGE_HEIGHT - self.y) * K;
        let ops = vec![
            Operation::new("w", vec![real(LINE_WIDTH * K)]),
            Operation::new("m", vec![real(x1 * K), real(y)]),
            Operation::new("l", vec![real(x2 * K), real(y)]),
            Operation::new("S", vec![]),
        ];
        self.current_page().extend(ops);
    }

    /// Content operations of every page, in order
    pub fn into_pages(self) -> Vec<Vec<Operation>> {
        self.pages
    }

    fn break_page_if_needed(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT - BREAK_MARGIN {
            self.pages.push(Vec::new());
            self.y = MARGIN;
        }
    }

    fn font_size_mm(&self) -> f32 {
        self.size_pt / K
    }

    fn text_width(&self, text: &[u8]) -> f32 {
        self.style.text_width(text) as f32 * self.font_size_mm() / 1000.0
    }

    fn emit_text(&mut self, x: f32, height: f32, text: &[u8], word_spacing: f32) {
        if text.is_empty() {
            return;
        }

        let baseline = self.y + 0.5 * height + 0.3 * self.font_size_mm();
        let mut ops = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![self.style.resource_name().into(), real(self.size_pt)],
            ),
        ];
        if word_spacing > 0.0 {
            ops.push(Operation::new("Tw", vec![real(word_spacing * K)]));
        }
        ops.push(Operation::new(
            "Td",
            vec![real(x * K), real((PAGE_HEIGHT - baseline) * K)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(text.to_vec(), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        if word_spacing > 0.0 {
            ops.push(Operation::new("Tw", vec![real(0.0)]));
        }

        if self.style.is_underlined() {
            let spaces = text.iter().filter(|&&b| b == b' ').count() as f32;
            let width = self.text_width(text) + word_spacing * spaces;
            let top = baseline - UNDERLINE_POSITION / 1000.0 * self.font_size_mm();
            ops.push(Operation::new(
                "re",
                vec![
                    real(x * K),
                    real((PAGE_HEIGHT - top) * K),
                    real(width * K),
                    real(-UNDERLINE_THICKNESS / 1000.0 * self.size_pt),
                ],
            ));
            ops.push(Operation::new("f", vec![]));
        }

        self.current_page().extend(ops);
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[WrappedLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| String::from_utf8_lossy(&l.bytes).into_owned())
            .collect()
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text(b"Ano: 2023", FontStyle::Regular, 12.0, 188.0);
        assert_eq!(texts(&lines), vec!["Ano: 2023"]);
        assert_eq!(lines[0].word_spacing, 0.0);
    }

    #[test]
    fn test_wraps_at_spaces_and_justifies() {
        let text = "word ".repeat(60);
        let lines = wrap_text(text.trim_end().as_bytes(), FontStyle::Regular, 12.0, 188.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.bytes.starts_with(b" "));
            assert!(!line.bytes.ends_with(b" "));
            let width = FontStyle::Regular.text_width(&line.bytes) as f32 * (12.0 / K) / 1000.0;
            assert!(width <= 188.0);
        }
        assert!(lines[0].word_spacing > 0.0);
        assert_eq!(lines.last().map(|l| l.word_spacing), Some(0.0));

        let rejoined = texts(&lines).join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn test_overlong_word_is_split() {
        let text = "x".repeat(300);
        let lines = wrap_text(text.as_bytes(), FontStyle::Regular, 12.0, 50.0);

        assert!(lines.len() > 1);
        let total: usize = lines.iter().map(|l| l.bytes.len()).sum();
        assert_eq!(total, 300);
        assert!(lines.iter().all(|l| l.word_spacing == 0.0));
    }

    #[test]
    fn test_explicit_newlines() {
        let lines = wrap_text(b"first\r\nsecond\n", FontStyle::Regular, 12.0, 188.0);
        assert_eq!(texts(&lines), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        let lines = wrap_text(b"", FontStyle::Regular, 12.0, 188.0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].bytes.is_empty());
    }

    #[test]
    fn test_cursor_moves_by_cell_height() {
        let mut layout = PageLayout::new();
        layout.set_font(FontStyle::Regular, 12.0);
        layout.multi_cell(8.0, b"one line");
        assert_eq!(layout.y(), MARGIN + 8.0);

        layout.line_break(5.0);
        assert_eq!(layout.y(), MARGIN + 13.0);
    }

    #[test]
    fn test_page_break_at_bottom_margin() {
        let mut layout = PageLayout::new();
        layout.set_font(FontStyle::Regular, 12.0);

        // 10 + 34 * 8 = 282: the 34th line still fits, the 35th does not
        for _ in 0..34 {
            layout.multi_cell(8.0, b"line");
        }
        assert_eq!(layout.page_count(), 1);

        layout.multi_cell(8.0, b"line");
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.y(), MARGIN + 8.0);
    }

    #[test]
    fn test_underline_adds_filled_rect() {
        let mut layout = PageLayout::new();
        layout.set_font(FontStyle::Underline, 11.0);
        layout.multi_cell(8.0, b"Link: https://pubmed.ncbi.nlm.nih.gov/1/");

        let pages = layout.into_pages();
        let operators: Vec<_> = pages[0].iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["BT", "Tf", "Td", "Tj", "ET", "re", "f"]);
    }

    #[test]
    fn test_centered_cell_splits_free_space_evenly() {
        let mut layout = PageLayout::new();
        layout.set_font(FontStyle::Bold, 16.0);
        let text = b"Relat\xf3rio";
        let text_width = FontStyle::Bold.text_width(text) as f32 * (16.0 / K) / 1000.0;
        layout.centered_cell(200.0, 10.0, text);

        let pages = layout.into_pages();
        let td = pages[0]
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        let Object::Real(x) = td.operands[0] else {
            panic!("expected a real x offset, got {:?}", td.operands[0]);
        };
        let expected = (MARGIN + (200.0 - text_width) / 2.0) * K;
        assert!((x - expected).abs() < 0.01);
    }

    #[test]
    fn test_rule_emits_stroke() {
        let mut layout = PageLayout::new();
        layout.rule(10.0, 200.0);

        let pages = layout.into_pages();
        let operators: Vec<_> = pages[0].iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["w", "m", "l", "S"]);
    }
}
