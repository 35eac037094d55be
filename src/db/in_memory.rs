use crate::data_models::{Category, CategoryPayload, Product, ProductPayload};
use crate::db::errors::DBError;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-local storage with the same contract as the relational backend:
/// ids are generated from a sequence, lists come back ordered by id and
/// category names are unique.
#[derive(Debug, Default)]
pub struct InMemoryDB {
    pub products: RwLock<BTreeMap<i32, Product>>,
    pub categories: RwLock<BTreeMap<i32, Category>>,
    sequences: RwLock<Sequences>,
}

#[derive(Debug, Default)]
struct Sequences {
    product: i32,
    category: i32,
}

impl InMemoryDB {
    pub fn init() -> Self {
        Self::default()
    }

    fn next_product_id(&self) -> Result<i32, DBError> {
        let mut sequences = self.sequences.write().map_err(|_| DBError::Poisoned)?;
        sequences.product += 1;
        Ok(sequences.product)
    }

    fn next_category_id(&self) -> Result<i32, DBError> {
        let mut sequences = self.sequences.write().map_err(|_| DBError::Poisoned)?;
        sequences.category += 1;
        Ok(sequences.category)
    }

    pub fn all_products(&self) -> Result<Vec<Product>, DBError> {
        let products = self.products.read().map_err(|_| DBError::Poisoned)?;
        Ok(products.values().cloned().collect())
    }

    pub fn create_product(&self, payload: ProductPayload) -> Result<Product, DBError> {
        let product = payload.into_product(self.next_product_id()?);
        self.products
            .write()
            .map_err(|_| DBError::Poisoned)?
            .insert(product.id, product.clone());
        Ok(product)
    }

    pub fn replace_product(&self, id: i32, payload: ProductPayload) -> Result<Product, DBError> {
        let mut products = self.products.write().map_err(|_| DBError::Poisoned)?;
        match products.get_mut(&id) {
            None => Err(DBError::ProductNotFound(id)),
            Some(stored) => {
                *stored = payload.into_product(id);
                Ok(stored.clone())
            }
        }
    }

    pub fn delete_product(&self, id: i32) -> Result<(), DBError> {
        self.products
            .write()
            .map_err(|_| DBError::Poisoned)?
            .remove(&id);
        Ok(())
    }

    pub fn all_categories(&self) -> Result<Vec<Category>, DBError> {
        let categories = self.categories.read().map_err(|_| DBError::Poisoned)?;
        Ok(categories.values().cloned().collect())
    }

    pub fn create_category(&self, payload: CategoryPayload) -> Result<Category, DBError> {
        let mut categories = self.categories.write().map_err(|_| DBError::Poisoned)?;
        if categories.values().any(|c| c.name == payload.name) {
            return Err(DBError::DuplicateCategory);
        }
        let category = Category {
            id: self.next_category_id()?,
            name: payload.name,
        };
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub fn delete_category(&self, id: i32) -> Result<(), DBError> {
        self.categories
            .write()
            .map_err(|_| DBError::Poisoned)?
            .remove(&id);
        Ok(())
    }
}
