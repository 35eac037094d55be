use crate::client::errors::ClientError;
use crate::client::export::{Column, Locale};
use crate::data_models::Product;
use ::csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use std::io::Write;

/// Delimited text export. The delimiter comes from the locale; values holding
/// the delimiter, a quote or a line break are quoted with quotes doubled.
#[derive(Debug, Clone)]
pub struct CsvExport {
    locale: Locale,
    columns: Vec<Column>,
}

impl CsvExport {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            columns: Column::DEFAULT.to_vec(),
        }
    }

    pub fn with_columns(mut self, columns: &[Column]) -> Self {
        if !columns.is_empty() {
            self.columns = columns.to_vec();
        }
        self
    }

    pub fn write<'a, W: Write>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
        writer: W,
    ) -> Result<(), ClientError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.locale.delimiter())
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);
        writer.write_record(self.columns.iter().map(Column::header))?;
        for product in products {
            writer.write_record(
                self.columns
                    .iter()
                    .map(|column| column.value(product, self.locale)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
    ) -> Result<String, ClientError> {
        let mut buffer = Vec::new();
        self.write(products, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Reads back a document produced with the same locale and columns.
    /// Rows whose fields cannot be mapped back are skipped.
    pub fn parse(&self, data: &str) -> Result<Vec<Product>, ClientError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.locale.delimiter())
            .has_headers(true)
            .from_reader(data.as_bytes());
        let mut products = vec![];
        for record in reader.records() {
            let record = record?;
            let mut product = Product::default();
            let parsed = self
                .columns
                .iter()
                .zip(record.iter())
                .all(|(column, text)| column.apply(&mut product, text, self.locale).is_some());
            if parsed {
                products.push(product);
            }
        }
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: Some("Parafuso; sextavado".to_string()),
                quantity: Some(5),
                category: Some("Ferramentas".to_string()),
                unit: Some("Caixa".to_string()),
                min_stock: Some(10),
            },
            Product {
                id: 2,
                name: Some("Tinta \"acrílica\", branca".to_string()),
                quantity: Some(12_500),
                category: Some("Pintura\nexterna".to_string()),
                unit: Some("Litro".to_string()),
                min_stock: Some(1_000),
            },
            Product {
                id: 3,
                name: None,
                quantity: None,
                category: None,
                unit: None,
                min_stock: Some(0),
            },
        ]
    }

    #[test]
    fn header_uses_default_projection() {
        let csv = CsvExport::new(Locale::PtBr)
            .render(&Vec::<Product>::new())
            .expect("Failed to render");
        assert_eq!(
            csv.lines().next(),
            Some("ID;Nome;Unidade;Categoria;Quantidade;Estoque mínimo")
        );
    }

    #[test]
    fn values_are_escaped() {
        let csv = CsvExport::new(Locale::EnUs)
            .render(&products())
            .expect("Failed to render");
        assert!(csv.contains("\"Tinta \"\"acrílica\"\", branca\""));
        assert!(csv.contains("\"12,500\""));
        assert!(csv.contains("\"Pintura\nexterna\""));
    }

    #[test]
    fn pt_br_numbers_use_dot_grouping() {
        let csv = CsvExport::new(Locale::PtBr)
            .render(&products())
            .expect("Failed to render");
        assert!(csv.contains(";12.500;"));
        assert!(csv.contains("\"Parafuso; sextavado\""));
    }

    #[test]
    fn round_trip_reproduces_fields() {
        for locale in [Locale::PtBr, Locale::EnUs] {
            let export = CsvExport::new(locale);
            let csv = export.render(&products()).expect("Failed to render");
            let parsed = export.parse(&csv).expect("Failed to parse");
            assert_eq!(parsed, products());
        }
    }

    #[test]
    fn custom_projection() {
        let export = CsvExport::new(Locale::PtBr).with_columns(&[Column::Name, Column::Quantity]);
        let csv = export.render(&products()).expect("Failed to render");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Nome;Quantidade"));
        assert_eq!(lines.next(), Some("\"Parafuso; sextavado\";5"));
    }
}
