/*!
 * PDF export.
 *
 * Building a PDF is split in two steps:
 * - `plan_document` lays out text and tables on A4 pages (pure, testable)
 * - `render` draws a plan with printpdf
 *
 * Coordinates in a plan are millimetres from the top-left corner of a page.
 */

use log::debug;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::errors::ExportError;
use crate::flashcards::Card;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 18.0;

/// Width of the row label column
pub const LABEL_COLUMN_MM: f32 = 28.0;
/// Width of the content column
pub const CONTENT_COLUMN_MM: f32 = 150.0;

/// A forced page break follows every this many cards
pub const CARDS_PER_PAGE: usize = 6;

const TITLE_SIZE: f32 = 18.0;
const TOPIC_SIZE: f32 = 13.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;

const TITLE_HEIGHT_MM: f32 = 10.0;
const TOPIC_HEIGHT_MM: f32 = 8.0;
const AFTER_HEADER_MM: f32 = 6.0;
const HEADING_HEIGHT_MM: f32 = 7.0;
const AFTER_CARD_MM: f32 = 5.0;
const LINE_HEIGHT_MM: f32 = 4.6;
const CELL_PADDING_MM: f32 = 1.5;

/// Approximate characters of 10pt Helvetica per line in the content column
const CONTENT_WRAP_CHARS: usize = 85;

/// Rendering options
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    /// TrueType font used instead of the built-in Helvetica
    pub font_path: Option<PathBuf>,
}

/// One row of a card table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: &'static str,
    /// Content already wrapped to the column width
    pub lines: Vec<String>,
}

impl TableRow {
    pub fn height(&self) -> f32 {
        self.lines.len().max(1) as f32 * LINE_HEIGHT_MM + 2.0 * CELL_PADDING_MM
    }
}

/// Something placed on a page
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Single line of text; `top` is the baseline
    Text {
        text: String,
        left: f32,
        top: f32,
        size: f32,
        bold: bool,
    },
    /// Two-column table; `top` is the upper border
    Table {
        left: f32,
        top: f32,
        rows: Vec<TableRow>,
        /// Rows carried over from the previous page
        continued: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub blocks: Vec<Block>,
}

impl PagePlan {
    /// Number of cards starting on this page
    pub fn card_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table { continued: false, .. }))
            .count()
    }

    fn has_tables(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Table { .. }))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPlan {
    pub pages: Vec<PagePlan>,
}

/// Build the PDF for one language
pub fn build_pdf(topic: &str, language: &str, cards: &[Card], options: &PdfOptions) -> Result<Vec<u8>, ExportError> {
    let plan = plan_document(topic, language, cards);
    debug!(
        "PDF for {} planned on {} page(s) with {} card(s)",
        language,
        plan.pages.len(),
        cards.len()
    );
    render(&plan, &format!("Flashcards - {}", language), options)
}

/// Lay out the document without drawing it
pub fn plan_document(topic: &str, language: &str, cards: &[Card]) -> DocumentPlan {
    let bottom = PAGE_HEIGHT_MM - MARGIN_MM;
    let mut pages = Vec::new();
    let mut page = PagePlan::default();
    let mut cursor = MARGIN_MM + TITLE_HEIGHT_MM;

    page.blocks.push(text_block(format!("Multilingual Flashcards - {}", language), cursor, TITLE_SIZE, true));
    cursor += TOPIC_HEIGHT_MM;
    page.blocks.push(text_block(format!("Topic: {}", topic), cursor, TOPIC_SIZE, false));
    cursor += AFTER_HEADER_MM;

    for (index, card) in cards.iter().enumerate() {
        let mut rows = card_rows(card);
        let card_height = HEADING_HEIGHT_MM + rows.iter().map(TableRow::height).sum::<f32>();

        if page.has_tables() && cursor + card_height > bottom {
            pages.push(std::mem::take(&mut page));
            cursor = MARGIN_MM;
        }

        let heading = format!("{}. {}", index + 1, card.display_term());
        page.blocks.push(text_block(heading, cursor + HEADING_HEIGHT_MM - 2.0, HEADING_SIZE, true));
        cursor += HEADING_HEIGHT_MM;

        // A card taller than a page continues its rows on the next one
        let mut continued = false;
        loop {
            let (fitting, rest) = split_rows(rows, bottom - cursor);
            if !fitting.is_empty() {
                let height: f32 = fitting.iter().map(TableRow::height).sum();
                page.blocks.push(Block::Table {
                    left: MARGIN_MM,
                    top: cursor,
                    rows: fitting,
                    continued,
                });
                cursor += height;
                continued = true;
            }
            match rest {
                Some(rest) => {
                    pages.push(std::mem::take(&mut page));
                    cursor = MARGIN_MM;
                    rows = rest;
                }
                None => break,
            }
        }
        cursor += AFTER_CARD_MM;

        let number = index + 1;
        if number % CARDS_PER_PAGE == 0 && number < cards.len() {
            pages.push(std::mem::take(&mut page));
            cursor = MARGIN_MM;
        }
    }

    pages.push(page);
    DocumentPlan { pages }
}

fn text_block(text: String, top: f32, size: f32, bold: bool) -> Block {
    Block::Text {
        text,
        left: MARGIN_MM,
        top,
        size,
        bold,
    }
}

/// Rows that fit in `available` millimetres, and the remainder if any.
///
/// The row that crosses the limit is split between lines.
fn split_rows(rows: Vec<TableRow>, available: f32) -> (Vec<TableRow>, Option<Vec<TableRow>>) {
    let mut fitting = Vec::new();
    let mut used = 0.0;
    let mut rows = rows.into_iter();

    while let Some(mut row) = rows.next() {
        let height = row.height();
        if used + height <= available {
            used += height;
            fitting.push(row);
            continue;
        }

        let room = (available - used - 2.0 * CELL_PADDING_MM) / LINE_HEIGHT_MM;
        let lines_fit = if room >= 1.0 { room.floor() as usize } else { 0 };

        let mut rest = Vec::new();
        if lines_fit > 0 && lines_fit < row.lines.len() {
            let tail = row.lines.split_off(lines_fit);
            rest.push(TableRow {
                label: row.label,
                lines: tail,
            });
            fitting.push(row);
        } else {
            rest.push(row);
        }
        rest.extend(rows);
        return (fitting, Some(rest));
    }

    (fitting, None)
}

/// The four rows of a card; all are present even when empty
fn card_rows(card: &Card) -> Vec<TableRow> {
    [
        ("Definition", card.definition.as_str()),
        ("Example", card.example.as_str()),
        ("Q", card.qa.question.as_str()),
        ("A", card.qa.answer.as_str()),
    ]
    .into_iter()
    .map(|(label, content)| TableRow {
        label,
        lines: wrap_text(content, CONTENT_WRAP_CHARS),
    })
    .collect()
}

/// Greedy word wrap by character count.
///
/// Embedded newlines are kept, words longer than `width` are split, and an
/// empty input still yields one (empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let chunk: String = chunk.iter().collect();
                let chunk_len = chunk.chars().count();

                if current_len == 0 {
                    current = chunk;
                    current_len = chunk_len;
                } else if current_len + 1 + chunk_len <= width {
                    current.push(' ');
                    current.push_str(&chunk);
                    current_len += 1 + chunk_len;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current = chunk;
                    current_len = chunk_len;
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn pdf_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn load_fonts(doc: &PdfDocumentReference, options: &PdfOptions) -> Result<Fonts, ExportError> {
    match &options.font_path {
        Some(path) => {
            let file = File::open(path)?;
            let font = doc.add_external_font(BufReader::new(file)).map_err(pdf_error)?;
            Ok(Fonts {
                regular: font.clone(),
                bold: font,
            })
        }
        None => Ok(Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
        }),
    }
}

/// Draw a plan into PDF bytes
pub fn render(plan: &DocumentPlan, title: &str, options: &PdfOptions) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let fonts = load_fonts(&doc, options)?;

    for (index, page) in plan.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for block in &page.blocks {
            match block {
                Block::Text {
                    text,
                    left,
                    top,
                    size,
                    bold,
                } => {
                    let font = if *bold { &fonts.bold } else { &fonts.regular };
                    layer.use_text(text.as_str(), *size, Mm(*left), Mm(PAGE_HEIGHT_MM - top), font);
                }
                Block::Table { left, top, rows, .. } => draw_table(&layer, &fonts, *left, *top, rows),
            }
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_table(layer: &PdfLayerReference, fonts: &Fonts, left: f32, top: f32, rows: &[TableRow]) {
    let right = left + LABEL_COLUMN_MM + CONTENT_COLUMN_MM;
    let divider = left + LABEL_COLUMN_MM;
    let height: f32 = rows.iter().map(TableRow::height).sum();
    let bottom = top + height;

    layer.set_outline_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));

    // Inner grid
    layer.set_outline_thickness(0.3);
    layer.add_line(segment((divider, top), (divider, bottom)));
    let mut row_top = top;
    for row in rows {
        let mut baseline = row_top + CELL_PADDING_MM + LINE_HEIGHT_MM - 1.0;
        layer.use_text(row.label, BODY_SIZE, Mm(left + CELL_PADDING_MM), Mm(PAGE_HEIGHT_MM - baseline), &fonts.regular);
        for line in &row.lines {
            layer.use_text(line.as_str(), BODY_SIZE, Mm(divider + CELL_PADDING_MM), Mm(PAGE_HEIGHT_MM - baseline), &fonts.regular);
            baseline += LINE_HEIGHT_MM;
        }

        row_top += row.height();
        if row_top < bottom {
            layer.add_line(segment((left, row_top), (right, row_top)));
        }
    }

    // Box
    layer.set_outline_thickness(0.6);
    layer.add_line(Line {
        points: [(left, top), (right, top), (right, bottom), (left, bottom)]
            .into_iter()
            .map(|(x, y)| (point(x, y), false))
            .collect(),
        is_closed: true,
    });
}

fn point(x: f32, top: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT_MM - top))
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![(point(from.0, from.1), false), (point(to.0, to.1), false)],
        is_closed: false,
    }
}
