//! HTTP client for the record-keeping service

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::{ApiErrorBody, ClientError, ClientResult};
use crate::{
    config::ConsoleConfig,
    models::{
        Equipment, EquipmentRequest, EquipmentType, ListParams, MaintenanceLog,
        MaintenanceRequest, Page,
    },
};

/// Operations the console performs against the service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentApi: Send + Sync {
    async fn list_equipment(&self, params: &ListParams) -> ClientResult<Page<Equipment>>;

    async fn get_equipment(&self, id: i64) -> ClientResult<Equipment>;

    async fn create_equipment(&self, request: &EquipmentRequest) -> ClientResult<Equipment>;

    async fn update_equipment(&self, id: i64, request: &EquipmentRequest) -> ClientResult<Equipment>;

    async fn delete_equipment(&self, id: i64) -> ClientResult<()>;

    async fn list_equipment_types(&self) -> ClientResult<Vec<EquipmentType>>;

    async fn log_maintenance(&self, request: &MaintenanceRequest) -> ClientResult<MaintenanceLog>;

    async fn maintenance_history(&self, equipment_id: i64) -> ClientResult<Vec<MaintenanceLog>>;
}

/// [`EquipmentApi`] over REST/JSON
#[derive(Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Client with default settings; `base_url` excludes the `/api` prefix
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_config(config: &ConsoleConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(http, config.api_base_url.clone()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), message = ?body.message, "Request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            message: body.message,
            field_errors: body.field_errors,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        Ok(Self::check(response).await?.json::<T>().await?)
    }
}

#[async_trait]
impl EquipmentApi for HttpApiClient {
    async fn list_equipment(&self, params: &ListParams) -> ClientResult<Page<Equipment>> {
        tracing::debug!(?params, "Fetching equipment page");
        let response = self.http.get(self.url("/equipment")).query(params).send().await?;
        Self::decode(response).await
    }

    async fn get_equipment(&self, id: i64) -> ClientResult<Equipment> {
        let response = self.http.get(self.url(&format!("/equipment/{}", id))).send().await?;
        Self::decode(response).await
    }

    async fn create_equipment(&self, request: &EquipmentRequest) -> ClientResult<Equipment> {
        let response = self.http.post(self.url("/equipment")).json(request).send().await?;
        Self::decode(response).await
    }

    async fn update_equipment(&self, id: i64, request: &EquipmentRequest) -> ClientResult<Equipment> {
        let response = self
            .http
            .put(self.url(&format!("/equipment/{}", id)))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_equipment(&self, id: i64) -> ClientResult<()> {
        let response = self.http.delete(self.url(&format!("/equipment/{}", id))).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_equipment_types(&self) -> ClientResult<Vec<EquipmentType>> {
        let response = self.http.get(self.url("/equipment-types")).send().await?;
        Self::decode(response).await
    }

    async fn log_maintenance(&self, request: &MaintenanceRequest) -> ClientResult<MaintenanceLog> {
        let response = self.http.post(self.url("/maintenance")).json(request).send().await?;
        Self::decode(response).await
    }

    async fn maintenance_history(&self, equipment_id: i64) -> ClientResult<Vec<MaintenanceLog>> {
        let response = self
            .http
            .get(self.url(&format!("/equipment/{}/maintenance", equipment_id)))
            .send()
            .await?;
        Self::decode(response).await
    }
}
