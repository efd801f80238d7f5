//! Page layout for the result slip
//!
//! `layout_slip` turns slip content into positioned draw operations on A4
//! pages. It performs no I/O; the PDF writer replays the operations.
//! All coordinates are PDF points with the origin at the bottom-left corner.

use super::metrics::{text_width, wrap};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 36.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Logo bounding box (points)
pub const LOGO_BOX: f32 = 100.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const GRADE_SIZE: f32 = 14.0;
const LEADING: f32 = 1.5;
const BLANK_LINE: f32 = BODY_SIZE * LEADING;
const CELL_PADDING: f32 = 4.0;
/// Unit column share of the table width; marks take the rest
const UNIT_COLUMN_SHARE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Black,
    Blue,
    Red,
}

impl Ink {
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            Ink::Black => (0.0, 0.0, 0.0),
            Ink::Blue => (0.0, 0.0, 1.0),
            Ink::Red => (1.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `y` is the text baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        face: FontFace,
        ink: Ink,
    },
    /// Thin black line, used for table borders
    Rule { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Logo image placed with its bottom-left corner at (x, y)
    Logo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlipLayout {
    pub pages: Vec<Page>,
}

impl SlipLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run in page order, for inspection
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.ops.iter()).filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Everything printed on a slip, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct SlipContent {
    pub title_lines: Vec<String>,
    pub student_id: String,
    pub name: String,
    /// (unit, formatted marks) in display order
    pub rows: Vec<(String, String)>,
    pub total: String,
    pub average: String,
    pub grade: String,
}

/// Natural size of the logo image in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl LogoSize {
    /// Scale to fit the logo box, preserving aspect ratio
    pub fn fitted(&self) -> (f32, f32) {
        let w = self.width_px.max(1) as f32;
        let h = self.height_px.max(1) as f32;
        let scale = (LOGO_BOX / w).min(LOGO_BOX / h);
        (w * scale, h * scale)
    }
}

/// Top-down writer that starts a new page when the next block does not fit
struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN && self.y < PAGE_HEIGHT - MARGIN {
            self.pages.push(Page::default());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn skip(&mut self, height: f32) {
        self.y -= height;
    }

    /// Write a paragraph, wrapped to the content width
    fn line(&mut self, text: &str, size: f32, face: FontFace, ink: Ink, centred: bool) {
        let bold = face == FontFace::Bold;
        let height = size * LEADING;
        for wrapped in wrap(text, size, bold, CONTENT_WIDTH) {
            self.reserve(height);
            let x = if centred {
                (PAGE_WIDTH - text_width(&wrapped, size, bold)) / 2.0
            } else {
                MARGIN
            };
            self.push(DrawOp::Text {
                text: wrapped,
                x,
                y: self.y - size,
                size,
                face,
                ink,
            });
            self.y -= height;
        }
    }

    fn table_row(&mut self, unit: &str, marks: &str, face: FontFace) {
        let bold = face == FontFace::Bold;
        let unit_width = CONTENT_WIDTH * UNIT_COLUMN_SHARE;
        let left = MARGIN;
        let split = MARGIN + unit_width;
        let right = MARGIN + CONTENT_WIDTH;

        let unit_lines = wrap(unit, BODY_SIZE, bold, unit_width - 2.0 * CELL_PADDING);
        let marks_lines = wrap(
            marks,
            BODY_SIZE,
            bold,
            CONTENT_WIDTH - unit_width - 2.0 * CELL_PADDING,
        );
        let line_height = BODY_SIZE * LEADING;
        let lines = unit_lines.len().max(marks_lines.len());
        let height = lines as f32 * line_height + CELL_PADDING;

        self.reserve(height);
        let top = self.y;
        let bottom = top - height;

        for (column_x, cell) in [(left, &unit_lines), (split, &marks_lines)] {
            for (i, text) in cell.iter().enumerate() {
                self.push(DrawOp::Text {
                    text: text.clone(),
                    x: column_x + CELL_PADDING,
                    y: top - CELL_PADDING - BODY_SIZE - i as f32 * line_height,
                    size: BODY_SIZE,
                    face,
                    ink: Ink::Black,
                });
            }
        }

        for (x1, y1, x2, y2) in [
            (left, top, right, top),
            (left, bottom, right, bottom),
            (left, top, left, bottom),
            (split, top, split, bottom),
            (right, top, right, bottom),
        ] {
            self.push(DrawOp::Rule { x1, y1, x2, y2 });
        }
        self.y = bottom;
    }

    fn finish(self) -> SlipLayout {
        SlipLayout { pages: self.pages }
    }
}

/// Lay out a slip: logo, title block, identity block, marks table, summary
pub fn layout_slip(content: &SlipContent, logo: Option<LogoSize>) -> SlipLayout {
    let mut cursor = Cursor::new();

    if let Some(size) = logo {
        let (width, height) = size.fitted();
        cursor.push(DrawOp::Logo {
            x: (PAGE_WIDTH - width) / 2.0,
            y: cursor.y - height,
            width,
            height,
        });
        cursor.skip(height + BODY_SIZE / 2.0);
    }

    for line in &content.title_lines {
        cursor.line(line, TITLE_SIZE, FontFace::Bold, Ink::Blue, true);
    }
    cursor.skip(BLANK_LINE);

    cursor.line(
        &format!("Student ID: {}", content.student_id),
        BODY_SIZE,
        FontFace::Regular,
        Ink::Black,
        false,
    );
    cursor.line(
        &format!("Name: {}", content.name),
        BODY_SIZE,
        FontFace::Regular,
        Ink::Black,
        false,
    );
    cursor.skip(BLANK_LINE);

    cursor.table_row("Unit", "Marks", FontFace::Bold);
    for (unit, marks) in &content.rows {
        cursor.table_row(unit, marks, FontFace::Regular);
    }
    cursor.skip(BLANK_LINE);

    cursor.line(
        &format!("Total Marks: {}", content.total),
        BODY_SIZE,
        FontFace::Regular,
        Ink::Black,
        false,
    );
    cursor.line(
        &format!("Average Marks: {}", content.average),
        BODY_SIZE,
        FontFace::Regular,
        Ink::Black,
        false,
    );
    cursor.line(
        &format!("Grade: {}", content.grade),
        GRADE_SIZE,
        FontFace::Bold,
        Ink::Red,
        false,
    );

    cursor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(rows: usize) -> SlipContent {
        SlipContent {
            title_lines: vec!["KCA UNIVERSITY".into(), "Student Result Slip".into()],
            student_id: "S1".into(),
            name: "Jane".into(),
            rows: (0..rows).map(|i| (format!("Unit {i}"), "50".to_string())).collect(),
            total: "0".into(),
            average: "0.00".into(),
            grade: "F".into(),
        }
    }

    fn all_ops(layout: &SlipLayout) -> impl Iterator<Item = &DrawOp> {
        layout.pages.iter().flat_map(|p| p.ops.iter())
    }

    #[test]
    fn test_blocks_appear_in_order() {
        let layout = layout_slip(&content(2), None);
        let texts: Vec<&str> = layout.texts().collect();

        let pos = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert!(pos("KCA UNIVERSITY") < pos("Student Result Slip"));
        assert!(pos("Student Result Slip") < pos("Student ID: S1"));
        assert!(pos("Name: Jane") < pos("Unit"));
        assert!(pos("Marks") < pos("Unit 0"));
        assert!(pos("Unit 1") < pos("Total Marks: 0"));
        assert!(pos("Average Marks: 0.00") < pos("Grade: F"));
    }

    #[test]
    fn test_title_is_centred() {
        let layout = layout_slip(&content(0), None);
        let x = all_ops(&layout)
            .find_map(|op| match op {
                DrawOp::Text { text, x, .. } if text == "KCA UNIVERSITY" => Some(*x),
                _ => None,
            })
            .unwrap();
        let width = text_width("KCA UNIVERSITY", TITLE_SIZE, true);
        assert!((x + width / 2.0 - PAGE_WIDTH / 2.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_table_has_only_header() {
        let layout = layout_slip(&content(0), None);
        assert_eq!(layout.page_count(), 1);
        let rules = all_ops(&layout)
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .count();
        assert_eq!(rules, 5, "header row box only");
    }

    #[test]
    fn test_long_table_overflows_to_new_page() {
        let layout = layout_slip(&content(60), None);
        assert!(layout.page_count() > 1);

        let last_page_texts: Vec<&str> = layout.pages[layout.page_count() - 1]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(last_page_texts.contains(&"Grade: F"));

        for op in all_ops(&layout) {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y >= MARGIN - BODY_SIZE, "text below bottom margin at {y}");
            }
        }
    }

    #[test]
    fn test_logo_fitted_and_centred() {
        let layout = layout_slip(
            &content(0),
            Some(LogoSize {
                width_px: 400,
                height_px: 200,
            }),
        );
        match &layout.pages[0].ops[0] {
            DrawOp::Logo {
                x, width, height, ..
            } => {
                assert!((width - 100.0).abs() < 0.01);
                assert!((height - 50.0).abs() < 0.01);
                assert!((x + width / 2.0 - PAGE_WIDTH / 2.0).abs() < 0.01);
            }
            other => panic!("expected logo first, got {other:?}"),
        }
    }

    #[test]
    fn test_long_lines_wrap_inside_margins() {
        let mut long = content(1);
        long.title_lines[0] = "Institute of Advanced Studies in Applied Mathematics and Computing Sciences".into();
        long.name = "Wanjiku ".repeat(20).trim_end().to_string();
        let layout = layout_slip(&long, None);

        let mut name_lines = 0;
        let mut title_lines = 0;
        for op in all_ops(&layout) {
            if let DrawOp::Text {
                text, x, size, face, ..
            } = op
            {
                let width = text_width(text, *size, *face == FontFace::Bold);
                assert!(*x >= MARGIN - 0.01, "{text:?} starts left of the margin");
                assert!(
                    x + width <= PAGE_WIDTH - MARGIN + 0.01,
                    "{text:?} runs past the right margin"
                );
                if text.starts_with("Name: ") || text.starts_with("Wanjiku") {
                    name_lines += 1;
                }
                if *size == TITLE_SIZE {
                    title_lines += 1;
                }
            }
        }
        assert!(name_lines > 1, "long name should wrap");
        assert!(title_lines > 2, "long institution should wrap");
    }

    #[test]
    fn test_grade_line_is_bold_red() {
        let layout = layout_slip(&content(1), None);
        let grade = all_ops(&layout)
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text.starts_with("Grade:")))
            .unwrap();
        match grade {
            DrawOp::Text {
                face, ink, size, ..
            } => {
                assert_eq!(*face, FontFace::Bold);
                assert_eq!(*ink, Ink::Red);
                assert_eq!(*size, GRADE_SIZE);
            }
            _ => unreachable!(),
        }
    }
}
