use async_trait::async_trait;
use serde_json::Value;

use crate::{
    clinical::ClinicalInput,
    remote::{
        envelope::Envelope,
        error::RemoteError,
        types::{
            ComparativeResult, DirectoryPage, EvaluationResult, ProfileUpdate, RecommendationQuery,
            Recommendations, SpecialistEntity,
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Raw request/response plumbing. Implementations resolve every exchange to
/// an [`Envelope`] or a transport error and never panic across the boundary.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Envelope, RemoteError>;
}

/// Typed remote operations consumed by the workflow. Every envelope has
/// already been normalized, callers only see `Ok(T)` or a [`RemoteError`].
#[async_trait]
pub trait RemoteDataPort: Send + Sync {
    async fn evaluate(&self, input: &ClinicalInput) -> Result<EvaluationResult, RemoteError>;

    async fn recommend(&self, query: &RecommendationQuery)
    -> Result<Recommendations, RemoteError>;

    async fn list_directory(&self, page: u32, per_page: u32)
    -> Result<DirectoryPage, RemoteError>;

    async fn compare(&self, parameters: &[f64]) -> Result<ComparativeResult, RemoteError>;

    async fn get_profile(&self) -> Result<SpecialistEntity, RemoteError>;

    async fn put_profile(&self, update: &ProfileUpdate) -> Result<SpecialistEntity, RemoteError>;
}
