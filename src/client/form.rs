use crate::data_models::{Product, ProductPayload, Unit};
use validator::{Validate, ValidationError, ValidationErrors};

/// Product editor state. `id` is set while an existing row is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProductForm {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub name: String,
    #[validate(
        required(message = "A quantidade é obrigatória"),
        range(min = 0, message = "A quantidade deve ser >= 0")
    )]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, message = "A categoria é obrigatória"))]
    pub category: String,
    #[validate(custom(function = "validate_unit"))]
    pub unit: String,
    #[validate(
        required(message = "O estoque mínimo é obrigatório"),
        range(min = 0, message = "O estoque mínimo deve ser >= 0")
    )]
    pub min_stock: Option<i32>,
}

fn validate_unit(unit: &str) -> Result<(), ValidationError> {
    unit.parse::<Unit>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("unit");
        error.message = Some("A unidade é obrigatória".into());
        error
    })
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone().unwrap_or_default(),
            quantity: product.quantity,
            category: product.category.clone().unwrap_or_default(),
            unit: product.unit.clone().unwrap_or_default(),
            min_stock: product.min_stock,
        }
    }

    pub fn cleaned(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            category: self.category.trim().to_string(),
            unit: self.unit.trim().to_string(),
            min_stock: self.min_stock,
        }
    }

    /// Validates the trimmed form and turns it into a request body.
    pub fn check(&self) -> Result<ProductPayload, ValidationErrors> {
        let cleaned = self.cleaned();
        cleaned.validate()?;
        Ok(ProductPayload {
            name: Some(cleaned.name),
            quantity: cleaned.quantity,
            category: Some(cleaned.category),
            unit: Some(cleaned.unit),
            min_stock: cleaned.min_stock,
        })
    }
}
