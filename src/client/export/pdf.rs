use crate::client::errors::ClientError;
use crate::client::export::{Column, Locale};
use crate::data_models::Product;
use chrono::{DateTime, TimeZone};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb,
};
use std::fmt::Display;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const TITLE_Y: f32 = PAGE_HEIGHT - 20.0;
const TABLE_TOP: f32 = PAGE_HEIGHT - 32.0;
const FOOTER_Y: f32 = 10.0;
const ROW_HEIGHT: f32 = 7.0;
const FONT_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 14.0;

const HEADER_COLOR: (f32, f32, f32) = (89.0 / 255.0, 172.0 / 255.0, 191.0 / 255.0);
const LOW_STOCK_COLOR: (f32, f32, f32) = (211.0 / 255.0, 40.0 / 255.0, 40.0 / 255.0);
const TEXT_COLOR: (f32, f32, f32) = (0.0, 0.0, 0.0);

fn width_of(column: Column) -> f32 {
    match column {
        Column::Id => 14.0,
        Column::Name => 56.0,
        Column::Unit => 22.0,
        Column::Category => 40.0,
        Column::Quantity => 24.0,
        Column::MinStock => 26.0,
    }
}

/// Splits rows into pages. An empty list still yields one (empty) page.
pub fn paginate<T>(rows: &[T], rows_per_page: usize) -> Vec<&[T]> {
    if rows.is_empty() {
        return vec![rows];
    }
    rows.chunks(rows_per_page.max(1)).collect()
}

fn fit(text: &str, width: f32) -> String {
    // Helvetica at 9pt averages close to 2mm per glyph
    let max_chars = (width / 2.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut fitted: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    fitted.push('…');
    fitted
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Paginated table of products. Rows at or below their minimum stock are
/// drawn in red; each page carries the generation time and its page number.
#[derive(Debug, Clone)]
pub struct PdfExport {
    locale: Locale,
    title: String,
    columns: Vec<Column>,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfExport {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            title: "Relatório de Produtos do Almoxarifado".to_string(),
            columns: Column::DEFAULT.to_vec(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_columns(mut self, columns: &[Column]) -> Self {
        if !columns.is_empty() {
            self.columns = columns.to_vec();
        }
        self
    }

    pub fn rows_per_page(&self) -> usize {
        ((TABLE_TOP - ROW_HEIGHT - (FOOTER_Y + ROW_HEIGHT)) / ROW_HEIGHT) as usize
    }

    pub fn render<'a, Tz: TimeZone>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
        generated_at: &DateTime<Tz>,
    ) -> Result<Vec<u8>, ClientError>
    where
        Tz::Offset: Display,
    {
        let products: Vec<&Product> = products.into_iter().collect();
        let pages = paginate(&products, self.rows_per_page());
        let timestamp = self.locale.format_timestamp(generated_at);

        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ClientError::Pdf(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ClientError::Pdf(e.to_string()))?,
        };

        let total = pages.len();
        for (index, rows) in pages.into_iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };
            self.draw_page(&layer, &fonts, rows, index + 1, total, &timestamp);
        }

        doc.save_to_bytes()
            .map_err(|e| ClientError::Pdf(e.to_string()))
    }

    fn draw_page(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        rows: &[&Product],
        page: usize,
        total: usize,
        timestamp: &str,
    ) {
        layer.set_fill_color(rgb(TEXT_COLOR));
        layer.use_text(&self.title, TITLE_SIZE, Mm(MARGIN), Mm(TITLE_Y), &fonts.bold);

        layer.set_fill_color(rgb(HEADER_COLOR));
        let mut x = MARGIN;
        for column in &self.columns {
            layer.use_text(column.header(), FONT_SIZE, Mm(x), Mm(TABLE_TOP), &fonts.bold);
            x += width_of(*column);
        }

        let mut y = TABLE_TOP - ROW_HEIGHT;
        for product in rows {
            let color = if product.is_low_stock() {
                LOW_STOCK_COLOR
            } else {
                TEXT_COLOR
            };
            layer.set_fill_color(rgb(color));
            let mut x = MARGIN;
            for column in &self.columns {
                let width = width_of(*column);
                let text = fit(&column.value(product, self.locale), width);
                layer.use_text(text, FONT_SIZE, Mm(x), Mm(y), &fonts.regular);
                x += width;
            }
            y -= ROW_HEIGHT;
        }

        layer.set_fill_color(rgb(TEXT_COLOR));
        let generated = format!("{} {timestamp}", self.locale.generated_label());
        layer.use_text(generated, FONT_SIZE, Mm(MARGIN), Mm(FOOTER_Y), &fonts.regular);
        layer.use_text(
            self.locale.page_label(page, total),
            FONT_SIZE,
            Mm(PAGE_WIDTH - MARGIN - 28.0),
            Mm(FOOTER_Y),
            &fonts.regular,
        );
    }
}
