use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    clinical::{ClinicalInput, PHYSIOLOGICAL_FIELD_COUNT},
    remote::{
        envelope::normalize,
        error::{RemoteError, invalid_request},
        ports::{ApiRequest, RemoteDataPort, Transport},
        types::{
            ComparativeResult, DirectoryPage, EvaluationResult, ProfileUpdate, RecommendationQuery,
            Recommendations, SpecialistEntity,
        },
    },
};

pub const EVALUATE_FALLBACK: &str = "No se pudo realizar la evaluación";
pub const RECOMMEND_FALLBACK: &str = "No se pudieron obtener los médicos";
pub const DIRECTORY_FALLBACK: &str = "No se pudo cargar el listado de cardiólogos";
pub const COMPARE_FALLBACK: &str = "No se pudo obtener el análisis comparativo";
pub const PROFILE_LOAD_FALLBACK: &str = "Error al cargar perfil";
pub const PROFILE_SAVE_FALLBACK: &str = "Error al guardar";

/// [`RemoteDataPort`] over any [`Transport`], normalizing each envelope at
/// the boundary.
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<R, RemoteError> {
        let path = request.path.clone();
        let envelope = self.transport.send(request).await.inspect_err(|err| {
            tracing::warn!(target: "remote", path = %path, error = %err, "transport_failed");
        })?;
        tracing::debug!(
            target: "remote",
            path = %path,
            status = envelope.status,
            ok = envelope.ok,
            "envelope_received"
        );
        normalize(envelope, fallback)
    }
}

#[async_trait]
impl<T: Transport> RemoteDataPort for ApiClient<T> {
    async fn evaluate(&self, input: &ClinicalInput) -> Result<EvaluationResult, RemoteError> {
        let body = serde_json::to_value(input)
            .map_err(|err| invalid_request(format!("clinical input is not serializable: {err}")))?;
        let result: EvaluationResult = self
            .call(ApiRequest::post("/evaluacion", body), EVALUATE_FALLBACK)
            .await?;
        result.check()?;
        Ok(result)
    }

    async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Recommendations, RemoteError> {
        self.call(
            ApiRequest::post("/medicos/recomendados", json!({ "perfil_riesgo": query })),
            RECOMMEND_FALLBACK,
        )
        .await
    }

    async fn list_directory(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<DirectoryPage, RemoteError> {
        self.call(
            ApiRequest::get(format!("/medicos/todos?page={page}&per_page={per_page}")),
            DIRECTORY_FALLBACK,
        )
        .await
    }

    async fn compare(&self, parameters: &[f64]) -> Result<ComparativeResult, RemoteError> {
        if parameters.len() != PHYSIOLOGICAL_FIELD_COUNT {
            return Err(invalid_request(format!(
                "comparison needs {PHYSIOLOGICAL_FIELD_COUNT} parameters, got {}",
                parameters.len()
            )));
        }
        self.call(
            ApiRequest::post("/evaluacion/comparativo", json!({ "parametros": parameters })),
            COMPARE_FALLBACK,
        )
        .await
    }

    async fn get_profile(&self) -> Result<SpecialistEntity, RemoteError> {
        self.call(ApiRequest::get("/medicos/perfil"), PROFILE_LOAD_FALLBACK)
            .await
    }

    async fn put_profile(&self, update: &ProfileUpdate) -> Result<SpecialistEntity, RemoteError> {
        let body = serde_json::to_value(update)
            .map_err(|err| invalid_request(format!("profile update is not serializable: {err}")))?;
        self.call(ApiRequest::put("/medicos/perfil", body), PROFILE_SAVE_FALLBACK)
            .await
    }
}
