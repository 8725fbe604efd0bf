use cardionet::{
    clinical::ClinicalInput,
    remote::error::{rejected, transport_error},
    testing::{RemoteOp, demo_evaluation},
    workflow::{Dispatch, SkipReason, WorkflowError, WorkflowView},
};

use super::harness;

#[tokio::test]
async fn given_demo_patient_when_service_reports_risk_then_result_shows_82_percent() {
    let harness = harness();
    harness.port.push_evaluation(Ok(demo_evaluation()));

    let dispatch = harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect("submit should succeed");

    let report = dispatch.applied().expect("submit should apply");
    assert_eq!(report.percentage_label, "82.0%");
    assert!(report.at_risk);

    let snapshot = harness.workflow.snapshot();
    assert_eq!(snapshot.view, WorkflowView::Result);
    assert!(snapshot.can_recommend);
    assert!(snapshot.can_compare);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn given_rejection_when_submitting_then_form_is_kept_and_error_is_notified() {
    let harness = harness();
    harness
        .port
        .push_evaluation(Err(rejected("Faltan campos requeridos")));

    let err = harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect_err("rejection should surface");

    assert!(matches!(err, WorkflowError::Remote(_)));
    assert_eq!(harness.workflow.view(), WorkflowView::Form);
    assert!(harness.workflow.snapshot().report.is_none());
    assert_eq!(harness.notifier.messages(), vec!["Faltan campos requeridos"]);
    assert!(!harness.workflow.is_loading());
}

#[tokio::test]
async fn given_network_failure_when_submitting_then_generic_connectivity_message_is_shown() {
    let harness = harness();
    harness
        .port
        .push_evaluation(Err(transport_error("connection refused")));

    harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect_err("transport error should surface");

    let messages = harness.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Error de conexión con el servidor"));
    assert_eq!(harness.workflow.view(), WorkflowView::Form);
}

#[tokio::test]
async fn given_missing_physiological_field_when_submitting_then_no_remote_call_is_made() {
    let harness = harness();
    let input = ClinicalInput {
        cholesterol: String::new(),
        ..ClinicalInput::demo()
    };

    let err = harness
        .workflow
        .submit(input)
        .await
        .expect_err("validation should fail");

    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(harness.port.calls(RemoteOp::Evaluate), 0);
    assert_eq!(harness.workflow.view(), WorkflowView::Form);
}

#[tokio::test]
async fn given_result_view_when_submitting_again_then_submit_is_unavailable() {
    let harness = super::harness_in_result().await;

    let dispatch = harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect("skip is not an error");

    assert_eq!(dispatch, Dispatch::Skipped(SkipReason::Unavailable));
    assert_eq!(harness.port.calls(RemoteOp::Evaluate), 1);
}
