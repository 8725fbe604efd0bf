use cardionet::{
    clinical::ClinicalInput,
    comparison::{ChartPanel, ComparisonPanels, ModelKind},
    remote::error::transport_error,
    testing::{RemoteOp, comparison, demo_evaluation},
    workflow::{Dispatch, SkipReason, WorkflowView},
};

use super::{harness, harness_in_result};

#[tokio::test]
async fn given_result_when_comparing_then_all_three_models_are_shown() {
    let harness = harness_in_result().await;
    harness.port.push_comparison(Ok(comparison()));

    let mut view = harness
        .workflow
        .request_comparison()
        .await
        .expect("compare should succeed")
        .applied()
        .expect("compare should apply");

    assert_eq!(harness.port.compared()[0].len(), 13);
    assert_eq!(
        view.models().iter().map(|(model, _)| *model).collect::<Vec<_>>(),
        ModelKind::ALL.to_vec()
    );
    let table = view.table();
    assert_eq!(table[0].probability_label, "82.0%");
    assert_eq!(table[2].verdict, "Sin riesgo");

    let panels = view.panels();
    assert_eq!(panels.gauges.as_ref().map(Vec::len), Some(3));
    // svm comes back without metrics
    assert_eq!(panels.radar.as_ref().map(Vec::len), Some(2));

    view.toggle(ChartPanel::Radar);
    assert!(view.panels().radar.is_none());
    view.toggle_all();
    assert!(view.visibility().all_visible());
    view.toggle_all();
    assert_eq!(view.panels(), ComparisonPanels::default());

    // side navigation only
    assert_eq!(harness.workflow.view(), WorkflowView::Result);
}

#[tokio::test]
async fn given_incomplete_parameter_vector_when_comparing_then_no_call_is_made() {
    let harness = harness();
    let mut evaluation = demo_evaluation();
    evaluation.parameters = Some(vec![63.0; 12]);
    harness.port.push_evaluation(Ok(evaluation));
    harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect("submit should succeed");
    assert!(!harness.workflow.snapshot().can_compare);

    let dispatch = harness
        .workflow
        .request_comparison()
        .await
        .expect("skip is not an error");

    assert_eq!(dispatch, Dispatch::Skipped(SkipReason::Unavailable));
    assert_eq!(harness.port.calls(RemoteOp::Compare), 0);
}

#[tokio::test]
async fn given_compare_failure_when_comparing_then_user_is_notified() {
    let harness = harness_in_result().await;
    harness
        .port
        .push_comparison(Err(transport_error("timed out")));

    harness
        .workflow
        .request_comparison()
        .await
        .expect_err("failure should surface");

    let messages = harness.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Error de conexión con el servidor"));
    assert_eq!(harness.workflow.view(), WorkflowView::Result);
    assert!(!harness.workflow.is_loading());
}
