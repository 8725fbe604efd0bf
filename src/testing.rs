//! In-memory collaborators for tests.

use std::{
    collections::{BTreeMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    clinical::ClinicalInput,
    notify::{Notification, NotificationPort},
    remote::{
        ComparativeResult, DirectoryPage, EvaluationResult, FeatureImportance, ModelMetrics,
        ModelPrediction, ProfileUpdate, RecommendationQuery, Recommendations, RemoteDataPort,
        RemoteError, RiskProfile, SpecialistEntity, error::rejected,
    },
    session::SessionPort,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RemoteOp {
    Evaluate,
    Recommend,
    ListDirectory,
    Compare,
    GetProfile,
    PutProfile,
}

/// Lets a test park a call inside the port until it decides to let it go.
#[derive(Debug, Clone, Default)]
pub struct HoldHandle {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl HoldHandle {
    /// Resolves once the held call has reached the port.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
struct Script {
    evaluations: VecDeque<Result<EvaluationResult, RemoteError>>,
    recommendations: VecDeque<Result<Recommendations, RemoteError>>,
    comparisons: VecDeque<Result<ComparativeResult, RemoteError>>,
    directory_overrides: VecDeque<Result<DirectoryPage, RemoteError>>,
    directory: Vec<SpecialistEntity>,
    profile: Option<SpecialistEntity>,
    holds: BTreeMap<RemoteOp, HoldHandle>,
    calls: BTreeMap<RemoteOp, usize>,
    recommendation_queries: Vec<RecommendationQuery>,
    directory_requests: Vec<(u32, u32)>,
    compared: Vec<Vec<f64>>,
    profile_updates: Vec<ProfileUpdate>,
}

/// [`RemoteDataPort`] answering from queued responses. The directory is
/// served from an in-memory roster with the same paging rules as the
/// service unless an override page is queued.
#[derive(Default)]
pub struct ScriptedRemotePort {
    script: Mutex<Script>,
}

impl ScriptedRemotePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(self, roster: Vec<SpecialistEntity>) -> Self {
        self.lock().directory = roster;
        self
    }

    pub fn push_evaluation(&self, response: Result<EvaluationResult, RemoteError>) {
        self.lock().evaluations.push_back(response);
    }

    pub fn push_recommendations(&self, response: Result<Recommendations, RemoteError>) {
        self.lock().recommendations.push_back(response);
    }

    pub fn push_comparison(&self, response: Result<ComparativeResult, RemoteError>) {
        self.lock().comparisons.push_back(response);
    }

    pub fn push_directory_page(&self, response: Result<DirectoryPage, RemoteError>) {
        self.lock().directory_overrides.push_back(response);
    }

    pub fn set_profile(&self, profile: SpecialistEntity) {
        self.lock().profile = Some(profile);
    }

    /// The next call of `op` parks until [`HoldHandle::release`].
    pub fn hold(&self, op: RemoteOp) -> HoldHandle {
        let handle = HoldHandle::default();
        self.lock().holds.insert(op, handle.clone());
        handle
    }

    pub fn calls(&self, op: RemoteOp) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or_default()
    }

    pub fn recommendation_queries(&self) -> Vec<RecommendationQuery> {
        self.lock().recommendation_queries.clone()
    }

    pub fn directory_requests(&self) -> Vec<(u32, u32)> {
        self.lock().directory_requests.clone()
    }

    pub fn compared(&self) -> Vec<Vec<f64>> {
        self.lock().compared.clone()
    }

    pub fn profile_updates(&self) -> Vec<ProfileUpdate> {
        self.lock().profile_updates.clone()
    }

    async fn enter(&self, op: RemoteOp) {
        let hold = {
            let mut script = self.lock();
            *script.calls.entry(op).or_default() += 1;
            script.holds.remove(&op)
        };
        if let Some(hold) = hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
    }

    fn serve_directory(script: &Script, page: u32, per_page: u32) -> DirectoryPage {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 1000);
        let total = script.directory.len();
        let start = ((page - 1) as usize).saturating_mul(per_page as usize).min(total);
        let end = start.saturating_add(per_page as usize).min(total);
        DirectoryPage {
            specialists: script.directory[start..end].to_vec(),
            total: total as u64,
            page,
            per_page: Some(per_page),
            total_pages: Some((total as u32).div_ceil(per_page).max(1)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unscripted(op: RemoteOp) -> RemoteError {
    rejected(format!("no scripted response for {op:?}"))
}

#[async_trait]
impl RemoteDataPort for ScriptedRemotePort {
    async fn evaluate(&self, _input: &ClinicalInput) -> Result<EvaluationResult, RemoteError> {
        self.enter(RemoteOp::Evaluate).await;
        self.lock()
            .evaluations
            .pop_front()
            .unwrap_or_else(|| Err(unscripted(RemoteOp::Evaluate)))
    }

    async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Recommendations, RemoteError> {
        self.enter(RemoteOp::Recommend).await;
        let mut script = self.lock();
        script.recommendation_queries.push(query.clone());
        script
            .recommendations
            .pop_front()
            .unwrap_or_else(|| Err(unscripted(RemoteOp::Recommend)))
    }

    async fn list_directory(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<DirectoryPage, RemoteError> {
        self.enter(RemoteOp::ListDirectory).await;
        let mut script = self.lock();
        script.directory_requests.push((page, per_page));
        match script.directory_overrides.pop_front() {
            Some(response) => response,
            None => Ok(Self::serve_directory(&script, page, per_page)),
        }
    }

    async fn compare(&self, parameters: &[f64]) -> Result<ComparativeResult, RemoteError> {
        self.enter(RemoteOp::Compare).await;
        let mut script = self.lock();
        script.compared.push(parameters.to_vec());
        script
            .comparisons
            .pop_front()
            .unwrap_or_else(|| Err(unscripted(RemoteOp::Compare)))
    }

    async fn get_profile(&self) -> Result<SpecialistEntity, RemoteError> {
        self.enter(RemoteOp::GetProfile).await;
        self.lock()
            .profile
            .clone()
            .ok_or_else(|| rejected("No autorizado"))
    }

    async fn put_profile(&self, update: &ProfileUpdate) -> Result<SpecialistEntity, RemoteError> {
        self.enter(RemoteOp::PutProfile).await;
        let mut script = self.lock();
        script.profile_updates.push(update.clone());
        let profile = script
            .profile
            .as_mut()
            .ok_or_else(|| rejected("No autorizado"))?;
        if let Some(phone) = &update.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(office_location) = &update.office_location {
            profile.office_location = Some(office_location.clone());
        }
        if let Some(province) = &update.province {
            profile.province = Some(province.clone());
        }
        if let Some(district) = &update.district {
            profile.district = Some(district.clone());
        }
        Ok(profile.clone())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn signed_in(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl SessionPort for StaticSession {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Result the service returns for [`ClinicalInput::demo`].
pub fn demo_evaluation() -> EvaluationResult {
    EvaluationResult {
        risk_flag: 1,
        risk_probability: 0.82,
        message: "Riesgo cardíaco detectado".to_string(),
        patient_id: Some(1),
        risk_profile: Some(RiskProfile {
            specialties: vec!["Cardiología Isquémica".to_string()],
            primary: "Cardiología Isquémica".to_string(),
            scores: BTreeMap::from([("Cardiología Isquémica".to_string(), 95.0)]),
        }),
        feature_importances: Some(vec![
            FeatureImportance {
                name: "dolor_pecho".to_string(),
                weight: 0.18,
            },
            FeatureImportance {
                name: "numero_vasos".to_string(),
                weight: 0.12,
            },
        ]),
        parameters: Some(vec![
            63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0,
        ]),
        evaluated_parameters: BTreeMap::from([
            ("edad".to_string(), 63.0),
            ("presion_arterial".to_string(), 145.0),
            ("colesterol".to_string(), 233.0),
        ]),
    }
}

/// `count` specialists around central Lima with ids `1..=count`. Every
/// third one has no coordinates.
pub fn roster(count: i64) -> Vec<SpecialistEntity> {
    (1..=count)
        .map(|id| {
            let mappable = id % 3 != 0;
            SpecialistEntity {
                id,
                name: format!("Dr(a). Especialista {id}"),
                specialty: Some("Cardiología".to_string()),
                district: Some("Miraflores".to_string()),
                rating: Some(4.5),
                visit_price: Some("S/ 150".to_string()),
                latitude: mappable.then_some(-12.0464 - id as f64 * 0.001),
                longitude: mappable.then_some(-77.0428 + id as f64 * 0.001),
                ..SpecialistEntity::default()
            }
        })
        .collect()
}

pub fn recommendations(count: i64, detected_profile: &str) -> Recommendations {
    Recommendations {
        specialists: roster(count),
        detected_profile: detected_profile.to_string(),
        recommended_specialties: vec![detected_profile.to_string()],
    }
}

pub fn comparison() -> ComparativeResult {
    let metrics = |accuracy: f64| ModelMetrics {
        accuracy,
        precision: accuracy - 0.02,
        recall: accuracy - 0.03,
        f1: accuracy - 0.025,
    };
    ComparativeResult {
        random_forest: Some(ModelPrediction {
            prediction: 1,
            probability: 0.82,
        }),
        decision_tree: Some(ModelPrediction {
            prediction: 1,
            probability: 0.74,
        }),
        svm: Some(ModelPrediction {
            prediction: 0,
            probability: 0.41,
        }),
        model_metrics: BTreeMap::from([
            ("random_forest".to_string(), metrics(0.9)),
            ("decision_tree".to_string(), metrics(0.82)),
        ]),
    }
}
