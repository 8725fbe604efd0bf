use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    clinical::PHYSIOLOGICAL_FIELD_COUNT,
    map::GeoPoint,
    remote::error::{RemoteError, decode_error},
};

pub type SpecialistId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "importancia")]
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    #[serde(rename = "especialidades", default)]
    pub specialties: Vec<String>,
    #[serde(rename = "principal", default)]
    pub primary: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

impl RiskProfile {
    pub fn query(&self) -> RecommendationQuery {
        RecommendationQuery {
            specialties: (!self.specialties.is_empty()).then(|| self.specialties.clone()),
            primary: (!self.primary.trim().is_empty()).then(|| self.primary.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationQuery {
    #[serde(rename = "especialidades", skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(rename = "principal", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
}

/// Risk estimate returned by the evaluation service. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(rename = "tiene_riesgo")]
    pub risk_flag: u8,
    #[serde(rename = "probabilidad_riesgo")]
    pub risk_probability: f64,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(rename = "paciente_id", default)]
    pub patient_id: Option<i64>,
    #[serde(rename = "perfil_riesgo", default)]
    pub risk_profile: Option<RiskProfile>,
    #[serde(default)]
    pub feature_importances: Option<Vec<FeatureImportance>>,
    #[serde(rename = "parametros", default)]
    pub parameters: Option<Vec<f64>>,
    #[serde(rename = "parametros_evaluados", default)]
    pub evaluated_parameters: BTreeMap<String, f64>,
}

impl EvaluationResult {
    pub fn is_at_risk(&self) -> bool {
        self.risk_flag == 1
    }

    /// Parameters usable for a model comparison: present and exactly 13 long.
    pub fn comparison_parameters(&self) -> Option<&[f64]> {
        self.parameters
            .as_deref()
            .filter(|parameters| parameters.len() == PHYSIOLOGICAL_FIELD_COUNT)
    }

    pub fn check(&self) -> Result<(), RemoteError> {
        if self.risk_flag > 1 {
            return Err(decode_error(format!(
                "tiene_riesgo must be 0 or 1, got {}",
                self.risk_flag
            )));
        }
        if !(0.0..=1.0).contains(&self.risk_probability) {
            return Err(decode_error(format!(
                "probabilidad_riesgo must be within [0, 1], got {}",
                self.risk_probability
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialistEntity {
    pub id: SpecialistId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especialidad", default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(rename = "subespecialidad", default, skip_serializing_if = "Option::is_none")]
    pub subspecialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "provincia", default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "distrito", default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "calificacion", default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "num_opiniones", default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(rename = "precio_visita", default, skip_serializing_if = "Option::is_none")]
    pub visit_price: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "ubicacion_consultorio", default, skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(rename = "direccion_completa", default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(rename = "latitud", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl SpecialistEntity {
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn is_mappable(&self) -> bool {
        self.coordinates().is_some()
    }

    pub fn display_address(&self) -> Option<&str> {
        [&self.full_address, &self.office_location, &self.district]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(rename = "medicos")]
    pub specialists: Vec<SpecialistEntity>,
    #[serde(rename = "perfil_detectado", default)]
    pub detected_profile: String,
    #[serde(rename = "especialidades_recomendadas", default)]
    pub recommended_specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPage {
    #[serde(rename = "medicos")]
    pub specialists: Vec<SpecialistEntity>,
    pub total: u64,
    pub page: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    #[serde(rename = "prediccion")]
    pub prediction: u8,
    #[serde(rename = "probabilidad")]
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ModelMetrics {
    pub fn as_array(&self) -> [f64; 4] {
        [self.accuracy, self.precision, self.recall, self.f1]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparativeResult {
    #[serde(default)]
    pub random_forest: Option<ModelPrediction>,
    #[serde(default)]
    pub decision_tree: Option<ModelPrediction>,
    #[serde(default)]
    pub svm: Option<ModelPrediction>,
    #[serde(rename = "metricas_modelos", default)]
    pub model_metrics: BTreeMap<String, ModelMetrics>,
}

/// Partial self-profile update sent by the owning specialist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "ubicacion_consultorio", skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(rename = "provincia", skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "distrito", skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}
