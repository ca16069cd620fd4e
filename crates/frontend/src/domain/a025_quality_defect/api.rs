//! Quality defects - API client
//!
//! `DefectApi` is the seam between the workflows and the backend.
//! `HttpDefectApi` talks to the real server; tests substitute a recording double.

use crate::shared::api_utils::ApiConfig;
use async_trait::async_trait;
use contracts::domain::a025_quality_defect::dto::{
    CreateDefectDto, DefectListQuery, UpdateDefectDto, UploadResponse,
};
use contracts::domain::a025_quality_defect::{Defect, DefectId};
use contracts::domain::a026_production_plan::ProductionPlan;
use contracts::domain::common::AggregateId;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with HTTP {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied `detail` of an error response
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Text for an alert: the server detail when present, else the error itself.
    pub fn user_message(&self) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}

/// Pull `detail` out of a FastAPI-style error body.
///
/// `{"detail": "..."}` yields the string; a validation error list yields its
/// `msg` entries joined with `; `.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(entries) => {
            let msgs: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

#[async_trait(?Send)]
pub trait DefectApi {
    /// What the browser hands over for `POST /upload`
    type Upload;

    async fn list_plans(&self) -> Result<Vec<ProductionPlan>, ApiError>;

    async fn list_defects(&self, query: &DefectListQuery) -> Result<Vec<Defect>, ApiError>;

    async fn create_defect(&self, dto: &CreateDefectDto) -> Result<Defect, ApiError>;

    async fn update_defect(&self, id: DefectId, dto: &UpdateDefectDto)
        -> Result<Defect, ApiError>;

    async fn delete_defect(&self, id: DefectId) -> Result<(), ApiError>;

    async fn upload_file(&self, file: Self::Upload) -> Result<UploadResponse, ApiError>;
}

/// `DefectApi` over `fetch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDefectApi {
    config: ApiConfig,
}

impl HttpDefectApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn defect_url(&self, id: DefectId) -> String {
        self.config
            .url(&format!("/quality/defects/{}", id.as_string()))
    }
}

impl Default for HttpDefectApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| extract_detail(&body));
    ApiError::Status { status, detail }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[async_trait(?Send)]
impl DefectApi for HttpDefectApi {
    type Upload = web_sys::File;

    async fn list_plans(&self) -> Result<Vec<ProductionPlan>, ApiError> {
        let url = self.config.url("/production/plans");
        log::debug!("GET {}", url);
        let response = Request::get(&url).send().await.map_err(network)?;
        read_json(response).await
    }

    async fn list_defects(&self, query: &DefectListQuery) -> Result<Vec<Defect>, ApiError> {
        let qs = serde_qs::to_string(query)
            .map_err(|e| ApiError::Network(format!("failed to encode query: {}", e)))?;
        let url = format!("{}?{}", self.config.url("/quality/defects/"), qs);
        log::debug!("GET {}", url);
        let response = Request::get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn create_defect(&self, dto: &CreateDefectDto) -> Result<Defect, ApiError> {
        let url = self.config.url("/quality/defects/");
        log::debug!("POST {}", url);
        let response = Request::post(&url)
            .json(dto)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn update_defect(
        &self,
        id: DefectId,
        dto: &UpdateDefectDto,
    ) -> Result<Defect, ApiError> {
        let url = self.defect_url(id);
        log::debug!("PUT {}", url);
        let response = Request::put(&url)
            .json(dto)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn delete_defect(&self, id: DefectId) -> Result<(), ApiError> {
        let url = self.defect_url(id);
        log::debug!("DELETE {}", url);
        let response = Request::delete(&url).send().await.map_err(network)?;
        if !response.ok() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn upload_file(&self, file: web_sys::File) -> Result<UploadResponse, ApiError> {
        let form_data =
            web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
        form_data
            .append_with_blob("file", &file)
            .map_err(|e| ApiError::Network(format!("{e:?}")))?;

        let url = self.config.url("/upload");
        log::debug!("POST {} ({})", url, file.name());
        let response = Request::post(&url)
            .body(form_data)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }
}
