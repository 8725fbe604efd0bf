mod comparison;
mod loading;
mod registration;
mod submit;

use std::sync::Arc;

use cardionet::{
    clinical::ClinicalInput,
    testing::{
        RecordingNotifier, ScriptedRemotePort, StaticSession, demo_evaluation, recommendations,
        roster,
    },
    workflow::{EvaluationWorkflow, WorkflowSettings, WorkflowView},
};

pub struct Harness {
    pub port: Arc<ScriptedRemotePort>,
    pub notifier: Arc<RecordingNotifier>,
    pub workflow: Arc<EvaluationWorkflow>,
}

pub fn harness_with(port: ScriptedRemotePort, session: StaticSession) -> Harness {
    let port = Arc::new(port);
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = Arc::new(EvaluationWorkflow::new(
        port.clone(),
        Arc::new(session),
        notifier.clone(),
        WorkflowSettings {
            per_page: 5,
            remote_per_page: 10,
        },
    ));
    Harness {
        port,
        notifier,
        workflow,
    }
}

pub fn harness() -> Harness {
    harness_with(ScriptedRemotePort::new(), StaticSession::signed_in("token"))
}

pub fn directory_harness(roster_size: i64) -> Harness {
    harness_with(
        ScriptedRemotePort::new().with_directory(roster(roster_size)),
        StaticSession::signed_in("token"),
    )
}

pub async fn drive_to_result(harness: &Harness) {
    harness.port.push_evaluation(Ok(demo_evaluation()));
    harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect("demo submit should succeed");
    assert_eq!(harness.workflow.view(), WorkflowView::Result);
}

pub async fn drive_to_recommendations(harness: &Harness, recommended: i64) {
    drive_to_result(harness).await;
    harness
        .port
        .push_recommendations(Ok(recommendations(recommended, "Cardiología Isquémica")));
    harness
        .workflow
        .request_recommendations()
        .await
        .expect("recommend should succeed");
    assert_eq!(harness.workflow.view(), WorkflowView::Recommendations);
}

pub async fn harness_in_result() -> Harness {
    let harness = harness();
    drive_to_result(&harness).await;
    harness
}
