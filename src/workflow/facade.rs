use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

use crate::{
    clinical::ClinicalInput,
    comparison::ComparativeAnalysisView,
    directory::{DirectoryError, PageWindow},
    notify::{Notification, NotificationPort},
    remote::{RemoteDataPort, SpecialistId},
    selection::SelectionOrigin,
    session::SessionPort,
    specialists::{PanelView, SelectionOutcome, SpecialistPanel},
    workflow::{
        error::WorkflowError,
        gate::{ActionGate, ActionPermit},
        report::RiskReport,
        state::{SharedPanel, WorkflowState},
        types::{Action, Dispatch, SkipReason, WorkflowSettings, WorkflowSnapshot, WorkflowView},
    },
};

/// Evaluation session driver: `Form -> Result -> Recommendations`.
///
/// Every command takes `&self` so different actions can run concurrently.
/// State lives behind a short-lived lock that is never held across a remote
/// call; each call is tagged with the generation it was issued under and its
/// response is dropped if [`EvaluationWorkflow::new_evaluation`] ran in the
/// meantime.
pub struct EvaluationWorkflow {
    port: Arc<dyn RemoteDataPort>,
    session: Arc<dyn SessionPort>,
    notifier: Arc<dyn NotificationPort>,
    settings: WorkflowSettings,
    gate: Arc<ActionGate>,
    state: Mutex<WorkflowState>,
}

impl EvaluationWorkflow {
    pub fn new(
        port: Arc<dyn RemoteDataPort>,
        session: Arc<dyn SessionPort>,
        notifier: Arc<dyn NotificationPort>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            port,
            session,
            notifier,
            settings,
            gate: Arc::new(ActionGate::default()),
            state: Mutex::new(WorkflowState::default()),
        }
    }

    pub fn settings(&self) -> WorkflowSettings {
        self.settings
    }

    pub fn view(&self) -> WorkflowView {
        self.lock_state().view
    }

    pub fn generation(&self) -> u64 {
        self.lock_state().generation
    }

    pub fn is_loading(&self) -> bool {
        self.gate.any_in_flight()
    }

    pub fn is_in_flight(&self, action: Action) -> bool {
        self.gate.is_in_flight(action)
    }

    /// Validates and submits the clinical input. Only accepted from `Form`.
    pub async fn submit(
        &self,
        input: ClinicalInput,
    ) -> Result<Dispatch<RiskReport>, WorkflowError> {
        let generation = {
            let state = self.lock_state();
            if state.view != WorkflowView::Form {
                return Ok(Dispatch::Skipped(SkipReason::Unavailable));
            }
            state.generation
        };
        if let Err(err) = input.check_complete() {
            tracing::debug!(target: "workflow", field = err.field, "submit_invalid_input");
            return Err(self.fail(err.into()));
        }
        let Some(_permit) = self.acquire(Action::Submit) else {
            return Ok(Dispatch::Skipped(SkipReason::InFlight));
        };

        tracing::info!(target: "workflow", generation, "submit_started");
        let response = self.port.evaluate(&input).await;

        let mut state = self.lock_state();
        if !state.is_current(generation) {
            return Ok(self.stale(Action::Submit, generation));
        }
        let result = match response {
            Ok(result) => result,
            Err(err) => {
                drop(state);
                tracing::warn!(target: "workflow", generation, error = %err, "submit_failed");
                return Err(self.fail(err.into()));
            }
        };

        let report = RiskReport::from_result(&result);
        state.result = Some(result);
        state.view = WorkflowView::Result;
        state.submitted_input = Some(input);
        if !self.session.is_authenticated() {
            state.registration.arm();
        }
        tracing::info!(
            target: "workflow",
            generation,
            at_risk = report.at_risk,
            probability = %report.percentage_label,
            "submit_applied"
        );
        Ok(Dispatch::Applied(report))
    }

    pub async fn request_recommendations(&self) -> Result<Dispatch, WorkflowError> {
        let (generation, query) = {
            let state = self.lock_state();
            let profile = match (&state.view, &state.result) {
                (WorkflowView::Result, Some(result)) => result.risk_profile.as_ref(),
                _ => None,
            };
            match profile {
                Some(profile) => (state.generation, profile.query()),
                None => return Ok(Dispatch::Skipped(SkipReason::Unavailable)),
            }
        };
        let Some(_permit) = self.acquire(Action::Recommend) else {
            return Ok(Dispatch::Skipped(SkipReason::InFlight));
        };

        tracing::info!(target: "workflow", generation, "recommend_started");
        let response = self.port.recommend(&query).await;

        let mut state = self.lock_state();
        if !state.is_current(generation) {
            return Ok(self.stale(Action::Recommend, generation));
        }
        let recommendations = match response {
            Ok(recommendations) => recommendations,
            Err(err) => {
                drop(state);
                tracing::warn!(target: "workflow", generation, error = %err, "recommend_failed");
                return Err(self.fail(err.into()));
            }
        };

        tracing::info!(
            target: "workflow",
            generation,
            count = recommendations.specialists.len(),
            profile = %recommendations.detected_profile,
            "recommend_applied"
        );
        let panel = SpecialistPanel::recommended(recommendations, self.settings.per_page);
        state.panel = Some(Arc::new(AsyncMutex::new(panel)));
        state.view = WorkflowView::Recommendations;
        Ok(Dispatch::Applied(()))
    }

    /// Side navigation to the model comparison. The returned view owns copies
    /// of its inputs and shares nothing with the workflow afterwards.
    pub async fn request_comparison(
        &self,
    ) -> Result<Dispatch<ComparativeAnalysisView>, WorkflowError> {
        let (generation, evaluation, parameters) = {
            let state = self.lock_state();
            let evaluation = match (&state.view, &state.result) {
                (WorkflowView::Result, Some(result)) => result,
                _ => return Ok(Dispatch::Skipped(SkipReason::Unavailable)),
            };
            let Some(parameters) = evaluation.comparison_parameters() else {
                return Ok(Dispatch::Skipped(SkipReason::Unavailable));
            };
            (state.generation, evaluation.clone(), parameters.to_vec())
        };
        let Some(_permit) = self.acquire(Action::Compare) else {
            return Ok(Dispatch::Skipped(SkipReason::InFlight));
        };

        tracing::info!(target: "workflow", generation, "compare_started");
        let response = self.port.compare(&parameters).await;

        if !self.lock_state().is_current(generation) {
            return Ok(self.stale(Action::Compare, generation));
        }
        match response {
            Ok(result) => {
                tracing::info!(target: "workflow", generation, "compare_applied");
                Ok(Dispatch::Applied(ComparativeAnalysisView::new(result, evaluation)))
            }
            Err(err) => {
                tracing::warn!(target: "workflow", generation, error = %err, "compare_failed");
                Err(self.fail(err.into()))
            }
        }
    }

    /// Switches the specialist list to the remote directory, page 1.
    pub async fn view_all_specialists(&self) -> Result<Dispatch<PageWindow>, WorkflowError> {
        let Some((generation, panel)) = self.current_panel(WorkflowView::Recommendations) else {
            return Ok(Dispatch::Skipped(SkipReason::Unavailable));
        };
        let Some(_permit) = self.acquire(Action::Paginate) else {
            return Ok(Dispatch::Skipped(SkipReason::InFlight));
        };

        let outcome = panel
            .lock()
            .await
            .view_all(Arc::clone(&self.port), self.settings.remote_per_page)
            .await;
        self.settle_page(generation, outcome)
    }

    pub async fn go_to_page(&self, page: u32) -> Result<Dispatch<PageWindow>, WorkflowError> {
        let Some((generation, panel)) = self.current_panel(WorkflowView::Recommendations) else {
            return Ok(Dispatch::Skipped(SkipReason::Unavailable));
        };
        let Some(_permit) = self.acquire(Action::Paginate) else {
            return Ok(Dispatch::Skipped(SkipReason::InFlight));
        };

        let outcome = panel.lock().await.go_to_page(page).await;
        self.settle_page(generation, outcome)
    }

    pub async fn select_specialist(
        &self,
        id: SpecialistId,
        origin: SelectionOrigin,
    ) -> Dispatch<SelectionOutcome> {
        let Some((generation, panel)) = self.current_panel(WorkflowView::Recommendations) else {
            return Dispatch::Skipped(SkipReason::Unavailable);
        };
        let outcome = panel.lock().await.select(id, origin).await;
        if !self.lock_state().is_current(generation) {
            return Dispatch::Skipped(SkipReason::Stale);
        }
        Dispatch::Applied(outcome)
    }

    /// `Recommendations -> Result`, or `Form` when no result is held. The
    /// specialist panel is kept so returning is cheap.
    pub fn back(&self) -> WorkflowView {
        let mut state = self.lock_state();
        if state.view == WorkflowView::Recommendations {
            state.view = if state.result.is_some() {
                WorkflowView::Result
            } else {
                WorkflowView::Form
            };
            tracing::debug!(target: "workflow", view = ?state.view, "back");
        }
        state.view
    }

    /// Reopens the panel kept by [`EvaluationWorkflow::back`].
    pub fn reopen_recommendations(&self) -> Dispatch {
        let mut state = self.lock_state();
        if state.view != WorkflowView::Result || state.panel.is_none() {
            return Dispatch::Skipped(SkipReason::Unavailable);
        }
        state.view = WorkflowView::Recommendations;
        Dispatch::Applied(())
    }

    pub fn new_evaluation(&self) -> u64 {
        let generation = self.lock_state().reset();
        tracing::info!(target: "workflow", generation, "new_evaluation");
        generation
    }

    pub fn registration_prompt_visible(&self) -> bool {
        self.lock_state().registration_prompt_visible()
    }

    pub fn dismiss_registration_prompt(&self) {
        let mut state = self.lock_state();
        if state.registration_prompt_visible() {
            state.registration.resolve();
        }
    }

    /// Accepting the prompt hands back the submitted input as a pre-fill.
    pub fn accept_registration(&self) -> Option<ClinicalInput> {
        let mut state = self.lock_state();
        if !state.registration_prompt_visible() {
            return None;
        }
        state.registration.resolve();
        state.submitted_input.clone()
    }

    pub fn specialists(&self) -> Option<SharedPanel> {
        self.lock_state().panel.clone()
    }

    pub async fn specialists_view(&self) -> Option<PanelView> {
        let panel = self.specialists()?;
        let view = panel.lock().await.view();
        Some(view)
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.lock_state();
        let report = state.result.as_ref().map(RiskReport::from_result);
        let in_result = state.view == WorkflowView::Result;
        WorkflowSnapshot {
            view: state.view,
            generation: state.generation,
            loading: self.gate.any_in_flight(),
            in_flight: self.gate.in_flight(),
            can_recommend: in_result
                && state
                    .result
                    .as_ref()
                    .is_some_and(|result| result.risk_profile.is_some()),
            can_compare: in_result && report.as_ref().is_some_and(|report| report.can_compare),
            report,
            registration_prompt_visible: state.registration_prompt_visible(),
            has_specialists: state.panel.is_some(),
        }
    }

    fn current_panel(&self, view: WorkflowView) -> Option<(u64, SharedPanel)> {
        let state = self.lock_state();
        if state.view != view {
            return None;
        }
        state
            .panel
            .as_ref()
            .map(|panel| (state.generation, Arc::clone(panel)))
    }

    fn settle_page(
        &self,
        generation: u64,
        outcome: Result<PageWindow, DirectoryError>,
    ) -> Result<Dispatch<PageWindow>, WorkflowError> {
        if !self.lock_state().is_current(generation) {
            return Ok(self.stale(Action::Paginate, generation));
        }
        match outcome {
            Ok(window) => Ok(Dispatch::Applied(window)),
            Err(err) => {
                tracing::warn!(target: "workflow", generation, error = %err, "page_failed");
                Err(self.fail(err.into()))
            }
        }
    }

    fn acquire(&self, action: Action) -> Option<ActionPermit> {
        let permit = ActionGate::try_acquire(&self.gate, action);
        if permit.is_none() {
            tracing::debug!(target: "workflow", action = action.as_str(), "action_in_flight");
        }
        permit
    }

    fn stale<T>(&self, action: Action, generation: u64) -> Dispatch<T> {
        tracing::info!(
            target: "workflow",
            action = action.as_str(),
            generation,
            "stale_response_dropped"
        );
        Dispatch::Skipped(SkipReason::Stale)
    }

    fn fail(&self, err: WorkflowError) -> WorkflowError {
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }

    fn lock_state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
