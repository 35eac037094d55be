use crate::client::errors::ClientError;
use crate::data_models::{Category, CategoryPayload, Product, ProductPayload};
use crate::errors::DUPLICATE_CATEGORY_MESSAGE;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper over the service's HTTP API.
#[derive(Debug, Clone)]
pub struct InventoryApi {
    client: Client,
    base_url: Url,
}

impl InventoryApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        if status == StatusCode::BAD_REQUEST && message == DUPLICATE_CATEGORY_MESSAGE {
            return Err(ClientError::DuplicateCategory(message));
        }
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.client.get(self.url("products")?).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let response = self
            .client
            .post(self.url("products")?)
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn replace_product(
        &self,
        id: i32,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("products/{id}"))?)
            .json(payload)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::ProductNotFound(id));
        }
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("products/{id}"))?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.client.get(self.url("categories")?).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, ClientError> {
        let response = self
            .client
            .post(self.url("categories")?)
            .json(&CategoryPayload::new(name))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("categories/{id}"))?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
