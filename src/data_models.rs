use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString, PickFirst};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use validator::Validate;

/// A stored product row.
///
/// Every field except `id` is nullable: the service accepts partially filled
/// payloads and leaves completeness checks to the client form.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub unit: Option<String>,
    #[serde(alias = "minstock")]
    pub min_stock: Option<i32>,
}

impl Product {
    /// A product is low on stock when its quantity does not exceed its
    /// reorder threshold. Missing numbers count as zero.
    pub fn is_low_stock(&self) -> bool {
        self.quantity.unwrap_or_default() <= self.min_stock.unwrap_or_default()
    }
}

/// Body of `POST /products` and `PUT /products/:id`.
///
/// Numbers are also accepted as strings, as form inputs send them; an empty
/// string means no value.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPayload {
    pub name: Option<String>,
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub unit: Option<String>,
    #[serde(alias = "minstock")]
    #[serde_as(as = "PickFirst<(Option<_>, NoneAsEmptyString)>")]
    pub min_stock: Option<i32>,
}

impl ProductPayload {
    pub fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            category: self.category,
            unit: self.unit,
            min_stock: self.min_stock,
        }
    }
}

impl From<&Product> for ProductPayload {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            quantity: product.quantity,
            category: product.category.clone(),
            unit: product.unit.clone(),
            min_stock: product.min_stock,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Body of `POST /categories`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "O nome da categoria é obrigatório"))]
    pub name: String,
}

impl CategoryPayload {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn cleaned(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Unit {
    Unit,
    Box,
    Package,
    Liter,
    Kilo,
}

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Unit, Unit::Box, Unit::Package, Unit::Liter, Unit::Kilo];
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Unit => write!(f, "Unidade"),
            Unit::Box => write!(f, "Caixa"),
            Unit::Package => write!(f, "Pacote"),
            Unit::Liter => write!(f, "Litro"),
            Unit::Kilo => write!(f, "Kilo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl Display for UnknownUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown unit: {}", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}
