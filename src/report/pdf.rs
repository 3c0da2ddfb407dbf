use std::{error::Error, fmt::Debug};

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point};
use thiserror::Error;

use crate::{db_interaction::ReportData, utils::error_fmt_chain};

use super::currency::to_readable_num;

const HEADER: &str = "Koperasi SMKN 5 Kota Tangerang";
const TITLE: &str = "LAPORAN PENJUALAN PER BARANG";
const COLUMNS: [&str; 5] = ["Nama Barang", "Qty Terjual", "Modal", "Harga Jual", "Profit"];

// A4 portrait
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 1.5;
const BODY_SIZE: f32 = 10.0;
const MAX_NAME_CHARS: usize = 24;

#[derive(Error)]
pub enum ReportRenderError{
    #[error("Failed to build pdf document")]
    PdfError(#[from] printpdf::Error)
}

impl Debug for ReportRenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

struct Fonts{
    regular: IndirectFontRef,
    bold: IndirectFontRef
}

// Tracks the current page and the y position of the next row
struct Cursor<'a>{
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32
}

impl Cursor<'_> {
    // Starts a new page when the next row would cross the bottom margin
    fn next_row(&mut self) -> f32{
        if self.y - ROW_HEIGHT < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }

        self.y -= ROW_HEIGHT;
        self.y
    }
}

/// Renders the per-item sales table and total profit as a PDF.
pub fn render_report(subtitle: &str, data: &ReportData) -> Result<Vec<u8>, ReportRenderError>{
    let (doc, page, layer) = PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts{
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?
    };

    let first_layer = doc.get_page(page).get_layer(layer);
    write_centered(&first_layer, HEADER, 11.0, PAGE_HEIGHT - 20.0, &fonts.regular);
    write_centered(&first_layer, TITLE, 15.0, PAGE_HEIGHT - 30.0, &fonts.bold);
    write_centered(&first_layer, subtitle, 10.0, PAGE_HEIGHT - 38.0, &fonts.regular);

    let mut cursor = Cursor{ doc: &doc, layer: first_layer, y: PAGE_HEIGHT - 45.0 };
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / COLUMNS.len() as f32;

    let y = cursor.next_row();
    for (i, column) in COLUMNS.iter().enumerate() {
        write_cell(&cursor.layer, column, column_x(i, column_width), y, &fonts.bold);
    }
    separator(&cursor.layer, y);

    for row in data.rows.iter() {
        let y = cursor.next_row();
        let cells = [
            truncate(&row.nama_barang),
            row.qty_pembelian.to_string(),
            to_readable_num(row.harga_beli),
            to_readable_num(row.harga_jual),
            to_readable_num(row.profit)
        ];

        for (i, cell) in cells.iter().enumerate() {
            write_cell(&cursor.layer, cell, column_x(i, column_width), y, &fonts.regular);
        }
        separator(&cursor.layer, y);
    }

    let y = cursor.next_row();
    write_cell(&cursor.layer, "Total Profit", column_x(0, column_width), y, &fonts.bold);
    write_cell(&cursor.layer, &to_readable_num(data.total_profit), column_x(4, column_width), y, &fonts.bold);
    separator(&cursor.layer, y);

    Ok(doc.save_to_bytes()?)
}

fn column_x(index: usize, column_width: f32) -> f32{
    MARGIN + index as f32 * column_width + CELL_PADDING
}

fn write_cell(layer: &PdfLayerReference, text: &str, x: f32, row_bottom: f32, font: &IndirectFontRef){
    layer.use_text(text, BODY_SIZE, Mm(x), Mm(row_bottom + 2.5), font);
}

// Builtin fonts carry no metrics here, so width is estimated from the average glyph
fn write_centered(layer: &PdfLayerReference, text: &str, size: f32, y: f32, font: &IndirectFontRef){
    let pt_to_mm = 0.3528;
    let estimated_width = text.chars().count() as f32 * size * 0.5 * pt_to_mm;
    let x = ((PAGE_WIDTH - estimated_width) / 2.0).max(MARGIN);

    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn separator(layer: &PdfLayerReference, y: f32){
    layer.add_line(Line{
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false)
        ],
        is_closed: false
    });
}

fn truncate(name: &str) -> String{
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string()
    }

    let mut short: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
    short.push_str("...");
    short
}
