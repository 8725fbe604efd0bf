use std::sync::Arc;

use cardionet::{
    profile::{PROFILE_SAVED, ProfileEditor},
    remote::SpecialistEntity,
    testing::{RecordingNotifier, ScriptedRemotePort},
};

fn own_profile() -> SpecialistEntity {
    SpecialistEntity {
        id: 7,
        name: "Dra. Rosa Quispe".to_string(),
        phone: Some("987654321".to_string()),
        office_location: Some("Av. Larco 345".to_string()),
        province: Some("Lima".to_string()),
        district: Some("Miraflores".to_string()),
        ..SpecialistEntity::default()
    }
}

#[tokio::test]
async fn given_signed_in_specialist_when_saving_then_address_is_sent_as_office_location() {
    let port = Arc::new(ScriptedRemotePort::new());
    port.set_profile(own_profile());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut editor = ProfileEditor::new(port.clone(), notifier.clone());

    let form = editor.load().await.expect("profile should load");
    assert_eq!(form.address, "Av. Larco 345");

    editor.form_mut().address = "Calle Schell 120".to_string();
    editor.form_mut().phone = "912345678".to_string();
    let saved = editor.save().await.expect("profile should save");
    assert_eq!(saved.office_location.as_deref(), Some("Calle Schell 120"));

    let updates = port.profile_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].phone.as_deref(), Some("912345678"));
    assert_eq!(notifier.messages(), vec![PROFILE_SAVED]);
}

#[tokio::test]
async fn given_no_session_when_loading_then_profile_stays_empty() {
    let port = Arc::new(ScriptedRemotePort::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut editor = ProfileEditor::new(port, notifier.clone());

    editor.load().await.expect_err("profile is unavailable");

    assert!(editor.profile().is_none());
    assert_eq!(notifier.messages(), vec!["No autorizado"]);
}
