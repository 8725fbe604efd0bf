use std::sync::Arc;

use cardionet::{
    clinical::ClinicalInput,
    remote::error::rejected,
    testing::{RemoteOp, comparison, demo_evaluation, recommendations},
    workflow::{Action, Dispatch, SkipReason},
};

use super::{harness, harness_in_result};

#[tokio::test]
async fn given_submit_in_flight_when_submitting_again_then_second_submit_is_skipped() {
    let harness = harness();
    harness.port.push_evaluation(Ok(demo_evaluation()));
    let hold = harness.port.hold(RemoteOp::Evaluate);

    let workflow = Arc::clone(&harness.workflow);
    let first = tokio::spawn(async move { workflow.submit(ClinicalInput::demo()).await });
    hold.entered().await;

    assert!(harness.workflow.is_loading());
    assert!(harness.workflow.is_in_flight(Action::Submit));
    let second = harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect("skip is not an error");
    assert_eq!(second, Dispatch::Skipped(SkipReason::InFlight));

    hold.release();
    let first = first
        .await
        .expect("task should join")
        .expect("submit should succeed");
    assert!(first.is_applied());
    assert!(!harness.workflow.is_loading());
    assert_eq!(harness.port.calls(RemoteOp::Evaluate), 1);
}

#[tokio::test]
async fn given_failing_submit_when_it_completes_then_loading_is_cleared() {
    let harness = harness();
    harness
        .port
        .push_evaluation(Err(rejected("Error interno del modelo")));
    let hold = harness.port.hold(RemoteOp::Evaluate);

    let workflow = Arc::clone(&harness.workflow);
    let pending = tokio::spawn(async move { workflow.submit(ClinicalInput::demo()).await });
    hold.entered().await;
    assert!(harness.workflow.snapshot().loading);

    hold.release();
    pending
        .await
        .expect("task should join")
        .expect_err("rejection should surface");

    let snapshot = harness.workflow.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.in_flight.is_empty());
}

#[tokio::test]
async fn different_actions_run_concurrently() {
    let harness = harness_in_result().await;
    harness
        .port
        .push_recommendations(Ok(recommendations(3, "Cardiología Isquémica")));
    harness.port.push_comparison(Ok(comparison()));
    let hold = harness.port.hold(RemoteOp::Recommend);

    let workflow = Arc::clone(&harness.workflow);
    let recommend = tokio::spawn(async move { workflow.request_recommendations().await });
    hold.entered().await;
    assert_eq!(harness.workflow.snapshot().in_flight, vec![Action::Recommend]);

    let compared = harness
        .workflow
        .request_comparison()
        .await
        .expect("compare should succeed");
    assert!(compared.is_applied());
    assert!(harness.workflow.is_in_flight(Action::Recommend));

    hold.release();
    let recommend = recommend
        .await
        .expect("task should join")
        .expect("recommend should succeed");
    assert!(recommend.is_applied());
    assert!(!harness.workflow.is_loading());
}
