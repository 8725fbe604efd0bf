use cardionet::{
    clinical::ClinicalInput,
    testing::{ScriptedRemotePort, StaticSession, demo_evaluation, recommendations},
};

use super::{Harness, drive_to_result, harness_in_result, harness_with};

async fn anonymous_in_result() -> Harness {
    let harness = harness_with(ScriptedRemotePort::new(), StaticSession::anonymous());
    drive_to_result(&harness).await;
    harness
}

#[tokio::test]
async fn given_anonymous_user_when_result_is_shown_then_registration_is_offered() {
    let harness = anonymous_in_result().await;

    assert!(harness.workflow.registration_prompt_visible());
    assert!(harness.workflow.snapshot().registration_prompt_visible);
}

#[tokio::test]
async fn given_signed_in_user_when_result_is_shown_then_registration_is_not_offered() {
    let harness = harness_in_result().await;

    assert!(!harness.workflow.registration_prompt_visible());
    assert_eq!(harness.workflow.accept_registration(), None);
}

#[tokio::test]
async fn given_pending_prompt_when_accepted_then_submitted_input_is_returned_once() {
    let harness = anonymous_in_result().await;

    let prefill = harness.workflow.accept_registration();

    assert_eq!(prefill, Some(ClinicalInput::demo()));
    assert!(!harness.workflow.registration_prompt_visible());
    assert_eq!(harness.workflow.accept_registration(), None);
}

#[tokio::test]
async fn given_pending_prompt_when_dismissed_then_it_stays_hidden() {
    let harness = anonymous_in_result().await;

    harness.workflow.dismiss_registration_prompt();

    assert!(!harness.workflow.registration_prompt_visible());
    assert_eq!(harness.workflow.accept_registration(), None);
}

#[tokio::test]
async fn given_pending_prompt_when_leaving_result_then_it_is_hidden_until_return() {
    let harness = anonymous_in_result().await;
    harness
        .port
        .push_recommendations(Ok(recommendations(2, "Cardiología Isquémica")));
    harness
        .workflow
        .request_recommendations()
        .await
        .expect("recommend should succeed");

    assert!(!harness.workflow.registration_prompt_visible());
    harness.workflow.back();
    assert!(harness.workflow.registration_prompt_visible());
}

#[tokio::test]
async fn new_evaluation_clears_the_prompt() {
    let harness = anonymous_in_result().await;

    harness.workflow.new_evaluation();
    assert!(!harness.workflow.registration_prompt_visible());

    harness.port.push_evaluation(Ok(demo_evaluation()));
    harness
        .workflow
        .submit(ClinicalInput::demo())
        .await
        .expect("submit should succeed");
    assert!(harness.workflow.registration_prompt_visible());
}
