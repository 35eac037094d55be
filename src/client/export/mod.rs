//! CSV and PDF renditions of the client-held product list.

pub mod csv;
pub mod pdf;

use crate::data_models::Product;
use crate::errors::ConfigurationError;
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    PtBr,
    EnUs,
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::EnUs => write!(f, "en-US"),
        }
    }
}

impl FromStr for Locale {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(ConfigurationError::UnknownLocale(other.to_string())),
        }
    }
}

impl Locale {
    /// Field delimiter that does not clash with the decimal separator.
    pub fn delimiter(&self) -> u8 {
        match self {
            Locale::PtBr => b';',
            Locale::EnUs => b',',
        }
    }

    pub fn grouping_separator(&self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::EnUs => ',',
        }
    }

    pub fn format_integer(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.grouping_separator());
            }
            grouped.push(digit);
        }
        if value < 0 {
            format!("-{grouped}")
        } else {
            grouped
        }
    }

    pub fn parse_integer(&self, text: &str) -> Option<i64> {
        let separator = self.grouping_separator();
        text.trim()
            .chars()
            .filter(|c| *c != separator)
            .collect::<String>()
            .parse()
            .ok()
    }

    pub fn format_timestamp<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        match self {
            Locale::PtBr => timestamp.format("%d/%m/%Y %H:%M").to_string(),
            Locale::EnUs => timestamp.format("%m/%d/%Y %I:%M %p").to_string(),
        }
    }

    pub fn generated_label(&self) -> &'static str {
        match self {
            Locale::PtBr => "Gerado em",
            Locale::EnUs => "Generated at",
        }
    }

    pub fn page_label(&self, page: usize, total: usize) -> String {
        match self {
            Locale::PtBr => format!("Página {page} de {total}"),
            Locale::EnUs => format!("Page {page} of {total}"),
        }
    }
}

/// A projected product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Unit,
    Category,
    Quantity,
    MinStock,
}

impl Column {
    pub const DEFAULT: [Column; 6] = [
        Column::Id,
        Column::Name,
        Column::Unit,
        Column::Category,
        Column::Quantity,
        Column::MinStock,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "Nome",
            Column::Unit => "Unidade",
            Column::Category => "Categoria",
            Column::Quantity => "Quantidade",
            Column::MinStock => "Estoque mínimo",
        }
    }

    pub fn value(&self, product: &Product, locale: Locale) -> String {
        let number = |value: Option<i32>| {
            value
                .map(|v| locale.format_integer(v.into()))
                .unwrap_or_default()
        };
        match self {
            Column::Id => product.id.to_string(),
            Column::Name => product.name.clone().unwrap_or_default(),
            Column::Unit => product.unit.clone().unwrap_or_default(),
            Column::Category => product.category.clone().unwrap_or_default(),
            Column::Quantity => number(product.quantity),
            Column::MinStock => number(product.min_stock),
        }
    }

    /// Writes a rendered value back onto `product`. An empty field reads back
    /// as no value, so an empty text and a missing one export the same way.
    pub fn apply(&self, product: &mut Product, text: &str, locale: Locale) -> Option<()> {
        let text_value = || (!text.is_empty()).then(|| text.to_string());
        let number = || -> Option<Option<i32>> {
            if text.is_empty() {
                return Some(None);
            }
            let value = locale.parse_integer(text)?;
            i32::try_from(value).ok().map(Some)
        };
        match self {
            Column::Id => product.id = text.trim().parse().ok()?,
            Column::Name => product.name = text_value(),
            Column::Unit => product.unit = text_value(),
            Column::Category => product.category = text_value(),
            Column::Quantity => product.quantity = number()?,
            Column::MinStock => product.min_stock = number()?,
        }
        Some(())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(Column::Id),
            "name" => Ok(Column::Name),
            "unit" => Ok(Column::Unit),
            "category" => Ok(Column::Category),
            "quantity" => Ok(Column::Quantity),
            "min_stock" | "minstock" => Ok(Column::MinStock),
            other => Err(format!("unknown column: {other}")),
        }
    }
}
