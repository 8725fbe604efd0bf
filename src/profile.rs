use std::sync::Arc;

use crate::{
    notify::{Notification, NotificationPort},
    remote::{ProfileUpdate, RemoteDataPort, RemoteError, SpecialistEntity},
};

pub const PROFILE_SAVED: &str = "Perfil actualizado";

/// Editable fields of the specialist's own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub phone: String,
    pub address: String,
    pub province: String,
    pub district: String,
}

impl ProfileForm {
    pub fn from_entity(entity: &SpecialistEntity) -> Self {
        let address = [&entity.full_address, &entity.office_location]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        Self {
            phone: entity.phone.clone().unwrap_or_default(),
            address: address.to_string(),
            province: entity.province.clone().unwrap_or_default(),
            district: entity.district.clone().unwrap_or_default(),
        }
    }

    /// The address field is stored as the office location.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            phone: Some(self.phone.clone()),
            office_location: Some(self.address.clone()),
            province: Some(self.province.clone()),
            district: Some(self.district.clone()),
        }
    }
}

/// Load/save cycle for the profile page. Used outside the evaluation
/// workflow.
pub struct ProfileEditor {
    port: Arc<dyn RemoteDataPort>,
    notifier: Arc<dyn NotificationPort>,
    profile: Option<SpecialistEntity>,
    form: ProfileForm,
}

impl ProfileEditor {
    pub fn new(port: Arc<dyn RemoteDataPort>, notifier: Arc<dyn NotificationPort>) -> Self {
        Self {
            port,
            notifier,
            profile: None,
            form: ProfileForm::default(),
        }
    }

    pub async fn load(&mut self) -> Result<&ProfileForm, RemoteError> {
        match self.port.get_profile().await {
            Ok(profile) => {
                self.form = ProfileForm::from_entity(&profile);
                self.profile = Some(profile);
                Ok(&self.form)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }

    pub async fn save(&mut self) -> Result<&SpecialistEntity, RemoteError> {
        match self.port.put_profile(&self.form.to_update()).await {
            Ok(profile) => {
                self.notifier.notify(Notification::info(PROFILE_SAVED));
                Ok(self.profile.insert(profile))
            }
            Err(err) => {
                self.notifier.notify(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }

    /// `None` until a profile was loaded; the page shows "No autorizado".
    pub fn profile(&self) -> Option<&SpecialistEntity> {
        self.profile.as_ref()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }
}
