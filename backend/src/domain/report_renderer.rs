//! Serializes a [`ReportLayout`] into a document.
//!
//! [`PdfReportRenderer`] draws the layout onto A4 pages with the built-in
//! Helvetica family. Long lines are word-wrapped using an average glyph width,
//! and the layout continues on a new page when the bottom margin is reached.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fmt::Debug;

use crate::domain::report_service::{LineStyle, ReportLayout};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// Turns a laid-out report into document bytes
pub trait ReportRenderer: Send + Sync {
    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, RenderError>;
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 10.0;
const TOP_MARGIN_MM: f32 = 15.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;
const TITLE_GAP_MM: f32 = 10.0;
const SECTION_GAP_MM: f32 = 5.0;
const PT_TO_MM: f32 = 0.3528;
// Helvetica averages roughly half an em per glyph
const AVG_GLYPH_EM: f32 = 0.5;

struct LineMetrics {
    font_size: f32,
    /// vertical advance per wrapped line
    leading_mm: f32,
    width_mm: f32,
}

fn metrics(style: LineStyle) -> LineMetrics {
    match style {
        LineStyle::Title => LineMetrics { font_size: 16.0, leading_mm: 10.0, width_mm: 200.0 },
        LineStyle::Heading => LineMetrics { font_size: 12.0, leading_mm: 10.0, width_mm: 200.0 },
        LineStyle::Body => LineMetrics { font_size: 10.0, leading_mm: 5.0, width_mm: 190.0 },
        LineStyle::Note => LineMetrics { font_size: 9.0, leading_mm: 4.0, width_mm: 180.0 },
    }
}

fn estimated_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_EM * PT_TO_MM
}

fn max_chars(width_mm: f32, font_size: f32) -> usize {
    ((width_mm / (font_size * AVG_GLYPH_EM * PT_TO_MM)).floor() as usize).max(1)
}

/// Greedy word wrap on character count. Words longer than a line are split.
/// Leading indentation is kept on the first line only.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let indent: String = text.chars().take_while(|c| c.is_whitespace()).collect();

    let mut lines = Vec::new();
    let mut current = indent;
    let mut has_words = false;

    for word in text.split_whitespace() {
        let mut rest: Vec<char> = word.chars().collect();

        while !rest.is_empty() {
            let used = current.chars().count();
            let separator = usize::from(has_words);

            if used + separator + rest.len() <= max_chars {
                if has_words {
                    current.push(' ');
                }
                current.extend(rest.drain(..));
                has_words = true;
            } else if has_words {
                lines.push(std::mem::take(&mut current));
                has_words = false;
            } else {
                let take = max_chars.saturating_sub(used).max(1).min(rest.len());
                current.extend(rest.drain(..take));
                lines.push(std::mem::take(&mut current));
            }
        }
    }

    if has_words || lines.is_empty() {
        lines.push(current);
    }
    lines
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn for_style(&self, style: LineStyle) -> &IndirectFontRef {
        match style {
            LineStyle::Title | LineStyle::Body => &self.regular,
            LineStyle::Heading => &self.bold,
            LineStyle::Note => &self.italic,
        }
    }
}

fn pdf_error<E: Debug>(err: E) -> RenderError {
    RenderError::Pdf(format!("{:?}", err))
}

/// Renders reports as PDF with printpdf
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReportRenderer;

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            layout.title.clone(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );

        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(pdf_error)?,
        };

        let mut current_layer: PdfLayerReference = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
        let mut page_count = 1;
        let mut previous: Option<LineStyle> = None;

        for line in &layout.lines {
            let m = metrics(line.style);

            match (previous, line.style) {
                (Some(LineStyle::Title), _) => y -= TITLE_GAP_MM,
                (Some(_), LineStyle::Heading) => y -= SECTION_GAP_MM,
                _ => {}
            }

            for chunk in wrap_text(&line.text, max_chars(m.width_mm, m.font_size)) {
                if y < BOTTOM_MARGIN_MM {
                    page_count += 1;
                    let (next_page, next_layer) = doc.add_page(
                        Mm(PAGE_WIDTH_MM),
                        Mm(PAGE_HEIGHT_MM),
                        format!("Page {}, Layer 1", page_count),
                    );
                    current_layer = doc.get_page(next_page).get_layer(next_layer);
                    y = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
                }

                let x = if line.style == LineStyle::Title {
                    ((PAGE_WIDTH_MM - estimated_width_mm(&chunk, m.font_size)) / 2.0).max(LEFT_MARGIN_MM)
                } else {
                    LEFT_MARGIN_MM
                };

                current_layer.use_text(chunk, m.font_size, Mm(x), Mm(y), fonts.for_style(line.style));
                y -= m.leading_mm;
            }

            previous = Some(line.style);
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}
