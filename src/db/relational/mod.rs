pub mod entities;
pub mod schema;

use entities::{prelude::*, *};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder};
use std::sync::Arc;

use crate::data_models::{Category as InnerCategory, CategoryPayload, Product as InnerProduct, ProductPayload};
use crate::db::connection::ConnectionManager;
use crate::db::errors::DBError;

#[derive(Debug, Clone)]
pub struct RelationalDB {
    pub manager: Arc<ConnectionManager>,
}

impl From<product::Model> for InnerProduct {
    fn from(prod: product::Model) -> Self {
        Self {
            id: prod.id,
            name: prod.name,
            quantity: prod.quantity,
            category: prod.category,
            unit: prod.unit,
            min_stock: prod.min_stock,
        }
    }
}

impl From<category::Model> for InnerCategory {
    fn from(category: category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

fn active_product(id: Option<i32>, payload: ProductPayload) -> product::ActiveModel {
    product::ActiveModel {
        id: id.map(Unchanged).unwrap_or(NotSet),
        name: Set(payload.name),
        quantity: Set(payload.quantity),
        category: Set(payload.category),
        unit: Set(payload.unit),
        min_stock: Set(payload.min_stock),
    }
}

impl RelationalDB {
    pub fn init(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    pub async fn is_healthy(&self) -> bool {
        self.manager.is_healthy().await
    }

    pub async fn all_products(&self) -> Result<Vec<InnerProduct>, DBError> {
        let connection = self.manager.acquire().await?;
        let products = self.manager.observe(
            Product::find()
                .order_by_asc(product::Column::Id)
                .all(connection.as_ref())
                .await,
        )?;
        Ok(products.into_iter().map(|prod| prod.into()).collect())
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<InnerProduct, DBError> {
        let connection = self.manager.acquire().await?;
        let product = self
            .manager
            .observe(active_product(None, payload).insert(connection.as_ref()).await)?;
        Ok(product.into())
    }

    pub async fn replace_product(
        &self,
        id: i32,
        payload: ProductPayload,
    ) -> Result<InnerProduct, DBError> {
        let connection = self.manager.acquire().await?;
        match self
            .manager
            .observe(active_product(Some(id), payload).update(connection.as_ref()).await)
        {
            Ok(product) => Ok(product.into()),
            Err(DbErr::RecordNotUpdated) => Err(DBError::ProductNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), DBError> {
        let connection = self.manager.acquire().await?;
        self.manager
            .observe(Product::delete_by_id(id).exec(connection.as_ref()).await)?;
        Ok(())
    }

    pub async fn all_categories(&self) -> Result<Vec<InnerCategory>, DBError> {
        let connection = self.manager.acquire().await?;
        let categories = self.manager.observe(
            Category::find()
                .order_by_asc(category::Column::Id)
                .all(connection.as_ref())
                .await,
        )?;
        Ok(categories.into_iter().map(|category| category.into()).collect())
    }

    pub async fn create_category(
        &self,
        payload: CategoryPayload,
    ) -> Result<InnerCategory, DBError> {
        let connection = self.manager.acquire().await?;
        let model = category::ActiveModel {
            id: NotSet,
            name: Set(payload.name),
        };
        let category = self
            .manager
            .observe(model.insert(connection.as_ref()).await)
            .map_err(DBError::from_category_insert)?;
        Ok(category.into())
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), DBError> {
        let connection = self.manager.acquire().await?;
        self.manager
            .observe(Category::delete_by_id(id).exec(connection.as_ref()).await)?;
        Ok(())
    }
}
