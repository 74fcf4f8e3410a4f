//! A4 rendering of the monthly report.

use std::ops::Range;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use thiserror::Error;
use tracing::debug;
use utils::money::format_amount;

use super::report::{MonthlyReport, ReportBookingRow};

pub const RESORT_NAME: &str = "Vagamon Misty Heights Resort";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
/// Baseline of the table header on the first page, below title and summary.
const FIRST_TABLE_TOP: f32 = PAGE_HEIGHT - 84.0;
const NEXT_TABLE_TOP: f32 = PAGE_HEIGHT - 20.0;
const TABLE_FONT_SIZE: f32 = 8.0;

/// Column x offset (mm) and width (mm).
const COLUMNS: [(&str, f32, f32); 6] = [
    ("Booking ID", 14.0, 26.0),
    ("Customer", 40.0, 36.0),
    ("Room", 76.0, 40.0),
    ("Check-in", 116.0, 28.0),
    ("Check-out", 144.0, 28.0),
    ("Amount", 172.0, 24.0),
];

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("pdf rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

fn rows_fitting(table_top: f32) -> usize {
    // One slot goes to the header row.
    (((table_top - MARGIN_BOTTOM) / ROW_HEIGHT) as usize).saturating_sub(1)
}

/// Splits `rows` table rows into per-page ranges. There is always at least
/// one page, even for an empty month.
fn paginate(rows: usize) -> Vec<Range<usize>> {
    let first = rows_fitting(FIRST_TABLE_TOP).min(rows);
    let mut pages = vec![0..first];
    let per_page = rows_fitting(NEXT_TABLE_TOP).max(1);
    let mut start = first;
    while start < rows {
        let end = (start + per_page).min(rows);
        pages.push(start..end);
        start = end;
    }
    pages
}

/// Rough Helvetica width in mm, good enough for centring and clipping.
fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * 0.3528
}

fn fit(text: &str, width: f32, font_size: f32) -> String {
    if text_width(text, font_size) <= width {
        return text.to_string();
    }
    let max_chars = (width / (font_size * 0.5 * 0.3528)) as usize;
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn rupees(amount: f64) -> String {
    // The built-in fonts have no rupee glyph.
    format!("Rs. {}", format_amount(amount))
}

fn centered(layer: &PdfLayerReference, text: &str, size: f32, y: f32, font: &IndirectFontRef) {
    let x = (PAGE_WIDTH - text_width(text, size)) / 2.0;
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn rule(layer: &PdfLayerReference, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN_LEFT), Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn table_header(layer: &PdfLayerReference, top: f32, bold: &IndirectFontRef) {
    layer.set_fill_color(Color::Rgb(Rgb::new(142.0 / 255.0, 76.0 / 255.0, 36.0 / 255.0, None)));
    for (title, x, _) in COLUMNS {
        layer.use_text(title, TABLE_FONT_SIZE, Mm(x), Mm(top), bold);
    }
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    rule(layer, top - 2.0);
}

fn table_rows(
    layer: &PdfLayerReference,
    top: f32,
    rows: &[ReportBookingRow],
    font: &IndirectFontRef,
) {
    for (i, row) in rows.iter().enumerate() {
        let y = top - ROW_HEIGHT * (i as f32 + 1.0);
        let cells = [
            row.short_id(),
            row.customer_name.clone(),
            row.room_name.clone(),
            row.check_in.clone(),
            row.check_out.clone(),
            rupees(row.amount),
        ];
        for ((_, x, width), cell) in COLUMNS.iter().zip(cells) {
            layer.use_text(
                fit(&cell, *width - 1.0, TABLE_FONT_SIZE),
                TABLE_FONT_SIZE,
                Mm(*x),
                Mm(y),
                font,
            );
        }
    }
}

/// Renders `report` as PDF bytes. Long months continue the table on
/// further pages with the header repeated.
pub fn render_monthly_report(report: &MonthlyReport) -> Result<Vec<u8>, PdfError> {
    let title = format!("Monthly Booking Report - {} {}", report.month_name, report.year);
    let (doc, first_page, first_layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let layer = doc.get_page(first_page).get_layer(first_layer);
    centered(&layer, RESORT_NAME, 20.0, PAGE_HEIGHT - 20.0, &bold);
    centered(&layer, "Monthly Booking Report", 16.0, PAGE_HEIGHT - 30.0, &font);
    centered(
        &layer,
        &format!("{} {}", report.month_name, report.year),
        12.0,
        PAGE_HEIGHT - 38.0,
        &font,
    );

    let mut y = PAGE_HEIGHT - 50.0;
    layer.use_text("Summary", 12.0, Mm(MARGIN_LEFT), Mm(y), &bold);
    let summary = [
        format!("Total Bookings: {}", report.total_bookings),
        format!("Total Revenue: {}", rupees(report.total_revenue)),
        format!("Most Booked Room: {}", report.most_booked_room),
    ];
    y -= 8.0;
    for line in &summary {
        layer.use_text(line.as_str(), 10.0, Mm(20.0), Mm(y), &font);
        y -= 7.0;
    }

    let pages = paginate(report.bookings.len());
    debug!(
        rows = report.bookings.len(),
        pages = pages.len(),
        "Rendering monthly report"
    );

    for (index, range) in pages.into_iter().enumerate() {
        let (layer, top) = if index == 0 {
            (doc.get_page(first_page).get_layer(first_layer), FIRST_TABLE_TOP)
        } else {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", index + 1));
            (doc.get_page(page).get_layer(page_layer), NEXT_TABLE_TOP)
        };
        table_header(&layer, top, &bold);
        table_rows(&layer, top, &report.bookings[range], &font);
    }

    Ok(doc.save_to_bytes()?)
}
