//! PDF serialisation of a laid-out slip via `printpdf`

use super::layout::{DrawOp, FontFace, SlipLayout, PAGE_HEIGHT, PAGE_WIDTH};
use crate::errors::SlipError;
use printpdf::image_crate::DynamicImage;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};

const RULE_THICKNESS: f32 = 0.5;

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn pdf_error(err: printpdf::Error) -> SlipError {
    SlipError::Pdf {
        message: err.to_string(),
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn face(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

/// Build the PDF bytes for `layout`
///
/// `logo` is drawn wherever the layout placed a `DrawOp::Logo`; a logo op
/// without an image is skipped.
pub fn write_pdf(
    layout: &SlipLayout,
    logo: Option<&DynamicImage>,
    document_title: &str,
) -> Result<Vec<u8>, SlipError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        document_title,
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "Page 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
    };

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                mm(PAGE_WIDTH),
                mm(PAGE_HEIGHT),
                format!("Page {}", index + 1),
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for op in &page.ops {
            draw(&layer, &fonts, op, logo);
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp, logo: Option<&DynamicImage>) {
    match op {
        DrawOp::Text {
            text,
            x,
            y,
            size,
            face,
            ink,
        } => {
            let (r, g, b) = ink.rgb();
            layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
            layer.use_text(text.clone(), *size, mm(*x), mm(*y), fonts.face(*face));
        }
        DrawOp::Rule { x1, y1, x2, y2 } => {
            layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
            layer.set_outline_thickness(RULE_THICKNESS);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(*x1), mm(*y1)), false),
                    (Point::new(mm(*x2), mm(*y2)), false),
                ],
                is_closed: false,
            });
        }
        DrawOp::Logo {
            x,
            y,
            width,
            height,
        } => {
            let Some(image) = logo else {
                return;
            };
            let width_px = image.width().max(1) as f32;
            let height_px = image.height().max(1) as f32;
            // At 72 dpi one pixel is one point, so the scale maps pixels to
            // the fitted size directly.
            Image::from_dynamic_image(image).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(mm(*x)),
                    translate_y: Some(mm(*y)),
                    scale_x: Some(width / width_px),
                    scale_y: Some(height / height_px),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::{layout_slip, SlipContent};

    #[test]
    fn test_output_is_a_pdf() {
        let content = SlipContent {
            title_lines: vec!["KCA UNIVERSITY".into()],
            student_id: "S1".into(),
            name: "Jane".into(),
            rows: vec![("Math".into(), "85".into())],
            total: "85".into(),
            average: "85.00".into(),
            grade: "B".into(),
        };
        let bytes = write_pdf(&layout_slip(&content, None), None, "Result Slip").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 100);
    }

    #[test]
    fn test_mm_conversion() {
        assert!((mm(72.0).0 - 25.4).abs() < 1e-4);
    }
}
