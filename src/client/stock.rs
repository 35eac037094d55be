use crate::data_models::Product;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn low_stock<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    products
        .into_iter()
        .filter(|product| product.is_low_stock())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockSummary {
    pub total: usize,
    pub low_stock: usize,
    pub low_stock_percentage: f64,
}

impl StockSummary {
    pub fn of<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let (total, low_stock) = products.into_iter().fold((0, 0), |(total, low), product| {
            (total + 1, low + usize::from(product.is_low_stock()))
        });
        let low_stock_percentage = if total == 0 {
            0.0
        } else {
            low_stock as f64 * 100.0 / total as f64
        };
        Self {
            total,
            low_stock,
            low_stock_percentage,
        }
    }
}

/// Product count per category label. Labels are taken as written on the
/// product, whether or not such a category exists.
pub fn category_distribution<'a>(
    products: impl IntoIterator<Item = &'a Product>,
) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for category in products.into_iter().filter_map(|p| p.category.as_ref()) {
        *distribution.entry(category.to_string()).or_insert(0) += 1;
    }
    distribution
}

/// One bar pair of the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockBar {
    pub name: String,
    pub quantity: i32,
    pub min_stock: i32,
    pub low_stock: bool,
}

pub fn stock_chart<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<StockBar> {
    products
        .into_iter()
        .map(|product| StockBar {
            name: product.name.clone().unwrap_or_default(),
            quantity: product.quantity.unwrap_or_default(),
            min_stock: product.min_stock.unwrap_or_default(),
            low_stock: product.is_low_stock(),
        })
        .collect()
}

/// Case-insensitive match over name, quantity, category and unit.
pub fn search<'a>(products: impl IntoIterator<Item = &'a Product>, query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    products
        .into_iter()
        .filter(|product| {
            let text = |value: &Option<String>| value.as_deref().unwrap_or_default().to_lowercase();
            let quantity = product.quantity.map(|q| q.to_string()).unwrap_or_default();
            text(&product.name).contains(&query)
                || quantity.contains(&query)
                || text(&product.category).contains(&query)
                || text(&product.unit).contains(&query)
        })
        .collect()
}
