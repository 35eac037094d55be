use crate::client::api::InventoryApi;
use crate::client::errors::ClientError;
use crate::client::export::csv::CsvExport;
use crate::client::export::pdf::PdfExport;
use crate::client::export::Locale;
use crate::client::form::ProductForm;
use crate::client::notifications::Notifications;
use crate::client::stock::{self, StockBar, StockSummary};
use crate::client::store::LocalList;
use crate::data_models::{Category, Product};
use chrono::Local;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Client-side controller: owns the local lists, the product form and the
/// notice queue, and keeps the lists in step with the service by merging the
/// result of every successful mutation.
///
/// A failed mutation leaves both lists and the form as they were.
#[derive(Debug)]
pub struct Inventory {
    api: InventoryApi,
    pub products: LocalList<Product>,
    pub categories: LocalList<Category>,
    pub form: ProductForm,
    pub notifications: Notifications,
}

impl Inventory {
    pub fn new(api: InventoryApi) -> Self {
        Self {
            api,
            products: LocalList::new(),
            categories: LocalList::new(),
            form: ProductForm::default(),
            notifications: Notifications::default(),
        }
    }

    /// Full fetch of both lists. Also used as the manual refresh.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let fetched = tokio::try_join!(self.api.list_products(), self.api.list_categories());
        match fetched {
            Ok((products, categories)) => {
                info!(
                    "loaded {} products and {} categories",
                    products.len(),
                    categories.len()
                );
                self.products.replace_all(products);
                self.categories.replace_all(categories);
                Ok(())
            }
            Err(e) => {
                warn!("failed to load lists: {e}");
                self.notifications.error("Erro ao carregar os dados.");
                Err(e)
            }
        }
    }

    /// Puts a listed product into the form for editing.
    pub fn edit_product(&mut self, id: i32) -> bool {
        match self.products.get(id) {
            Some(product) => {
                self.form = ProductForm::from_product(product);
                true
            }
            None => false,
        }
    }

    pub fn clear_form(&mut self) {
        self.form = ProductForm::default();
    }

    /// Creates or replaces the product held in the form.
    pub async fn save_product(&mut self) -> Result<Product, ClientError> {
        let payload = match self.form.check() {
            Ok(payload) => payload,
            Err(e) => {
                self.notifications
                    .warning("Preencha todos os campos obrigatórios corretamente.");
                return Err(e.into());
            }
        };

        let result = match self.form.id {
            Some(id) => self.api.replace_product(id, &payload).await,
            None => self.api.create_product(&payload).await,
        };
        match (self.form.id, result) {
            (Some(_), Ok(product)) => {
                self.products.replace_by_key(product.clone());
                self.notifications.success("Produto atualizado com sucesso!");
                self.clear_form();
                Ok(product)
            }
            (None, Ok(product)) => {
                self.products.insert_at_head(product.clone());
                self.notifications.success("Produto cadastrado com sucesso!");
                self.clear_form();
                Ok(product)
            }
            (_, Err(e)) => {
                warn!("failed to save product: {e}");
                self.notifications.error("Erro ao salvar o produto.");
                Err(e)
            }
        }
    }

    pub async fn remove_product(&mut self, id: i32) -> Result<(), ClientError> {
        match self.api.delete_product(id).await {
            Ok(()) => {
                self.products.remove_by_key(id);
                self.notifications.info("Produto excluído com sucesso!");
                Ok(())
            }
            Err(e) => {
                warn!("failed to delete product {id}: {e}");
                self.notifications.error("Erro ao excluir o produto.");
                Err(e)
            }
        }
    }

    pub async fn add_category(&mut self, name: &str) -> Result<Category, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            self.notifications.warning("Informe o nome da categoria.");
            return Err(ClientError::EmptyCategoryName);
        }
        match self.api.create_category(name).await {
            Ok(category) => {
                self.categories.insert_at_head(category.clone());
                self.notifications.success("Categoria criada com sucesso!");
                Ok(category)
            }
            Err(ClientError::DuplicateCategory(message)) => {
                self.notifications.error(message.clone());
                Err(ClientError::DuplicateCategory(message))
            }
            Err(e) => {
                warn!("failed to create category: {e}");
                self.notifications.error("Erro ao criar categoria");
                Err(e)
            }
        }
    }

    pub async fn remove_category(&mut self, id: i32) -> Result<(), ClientError> {
        match self.api.delete_category(id).await {
            Ok(()) => {
                self.categories.remove_by_key(id);
                self.notifications.info("Categoria excluída com sucesso!");
                Ok(())
            }
            Err(e) => {
                warn!("failed to delete category {id}: {e}");
                self.notifications.error("Erro ao excluir a categoria.");
                Err(e)
            }
        }
    }

    pub fn low_stock(&self) -> Vec<&Product> {
        stock::low_stock(&self.products)
    }

    pub fn summary(&self) -> StockSummary {
        StockSummary::of(&self.products)
    }

    pub fn category_distribution(&self) -> BTreeMap<String, usize> {
        stock::category_distribution(&self.products)
    }

    pub fn stock_chart(&self) -> Vec<StockBar> {
        stock::stock_chart(&self.products)
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        stock::search(&self.products, query)
    }

    pub fn export_csv(&self, locale: Locale) -> Result<String, ClientError> {
        CsvExport::new(locale).render(&self.products)
    }

    pub fn export_pdf(&self, locale: Locale) -> Result<Vec<u8>, ClientError> {
        PdfExport::new(locale).render(&self.products, &Local::now())
    }
}
