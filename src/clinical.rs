use std::fmt;

use serde::{Deserialize, Serialize};

pub const PHYSIOLOGICAL_FIELD_COUNT: usize = 13;

/// The 13 physiological inputs in model order.
pub type ClinicalFeatures = [f64; PHYSIOLOGICAL_FIELD_COUNT];

/// One form session's worth of patient data, exactly as the form collaborator
/// captured it. Field values stay textual until [`ClinicalInput::check_complete`]
/// coerces the physiological part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalInput {
    #[serde(rename = "apellidos_nombre")]
    pub full_name: String,
    #[serde(rename = "historia_clinica")]
    pub clinical_record: String,
    pub dni: String,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "edad")]
    pub age: String,
    #[serde(rename = "sexo")]
    pub sex: String,
    #[serde(rename = "dolor_pecho")]
    pub chest_pain: String,
    #[serde(rename = "presion_arterial")]
    pub blood_pressure: String,
    #[serde(rename = "colesterol")]
    pub cholesterol: String,
    #[serde(rename = "glucosa")]
    pub fasting_glucose: String,
    #[serde(rename = "resultado_ecg")]
    pub ecg_result: String,
    #[serde(rename = "frecuencia_cardiaca_max")]
    pub max_heart_rate: String,
    #[serde(rename = "angina")]
    pub exercise_angina: String,
    #[serde(rename = "depresion_st")]
    pub st_depression: String,
    #[serde(rename = "pendiente_st")]
    pub st_slope: String,
    #[serde(rename = "numero_vasos")]
    pub major_vessels: String,
    #[serde(rename = "thalassemia")]
    pub thalassemia: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    Missing,
    NotNumeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    pub field: &'static str,
    pub problem: InputProblem,
}

impl InputError {
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            problem: InputProblem::Missing,
        }
    }

    pub fn not_numeric(field: &'static str) -> Self {
        Self {
            field,
            problem: InputProblem::NotNumeric,
        }
    }

    pub fn user_message(&self) -> String {
        match self.problem {
            InputProblem::Missing => format!("Campo requerido: {}", self.field),
            InputProblem::NotNumeric => format!("Valor numérico inválido: {}", self.field),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            InputProblem::Missing => write!(f, "field {} is required", self.field),
            InputProblem::NotNumeric => write!(f, "field {} is not a number", self.field),
        }
    }
}

impl std::error::Error for InputError {}

impl ClinicalInput {
    /// Demo patient loaded by the form's "Demo" action.
    pub fn demo() -> Self {
        Self {
            full_name: "Pérez García, Juan".to_string(),
            clinical_record: "HC-2025-DEMO".to_string(),
            dni: "12345678".to_string(),
            birth_date: "1961-05-15".to_string(),
            phone: "987654321".to_string(),
            address: "Av. Principal 123, Lima".to_string(),
            age: "63".to_string(),
            sex: "1".to_string(),
            chest_pain: "3".to_string(),
            blood_pressure: "145".to_string(),
            cholesterol: "233".to_string(),
            fasting_glucose: "1".to_string(),
            ecg_result: "0".to_string(),
            max_heart_rate: "150".to_string(),
            exercise_angina: "0".to_string(),
            st_depression: "2.3".to_string(),
            st_slope: "0".to_string(),
            major_vessels: "0".to_string(),
            thalassemia: "1".to_string(),
        }
    }

    pub fn identity_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("apellidos_nombre", &self.full_name),
            ("historia_clinica", &self.clinical_record),
            ("dni", &self.dni),
            ("fecha_nacimiento", &self.birth_date),
            ("telefono", &self.phone),
            ("direccion", &self.address),
        ]
    }

    pub fn physiological_fields(&self) -> [(&'static str, &str); PHYSIOLOGICAL_FIELD_COUNT] {
        [
            ("edad", &self.age),
            ("sexo", &self.sex),
            ("dolor_pecho", &self.chest_pain),
            ("presion_arterial", &self.blood_pressure),
            ("colesterol", &self.cholesterol),
            ("glucosa", &self.fasting_glucose),
            ("resultado_ecg", &self.ecg_result),
            ("frecuencia_cardiaca_max", &self.max_heart_rate),
            ("angina", &self.exercise_angina),
            ("depresion_st", &self.st_depression),
            ("pendiente_st", &self.st_slope),
            ("numero_vasos", &self.major_vessels),
            ("thalassemia", &self.thalassemia),
        ]
    }

    /// Structural completeness only: every field non-empty and every
    /// physiological field coercible to a number. Clinical ranges belong to
    /// the form collaborator and the service.
    pub fn check_complete(&self) -> Result<ClinicalFeatures, InputError> {
        for (field, value) in self.identity_fields() {
            if value.trim().is_empty() {
                return Err(InputError::missing(field));
            }
        }
        self.features()
    }

    pub fn features(&self) -> Result<ClinicalFeatures, InputError> {
        let mut features = [0.0; PHYSIOLOGICAL_FIELD_COUNT];
        for (slot, (field, value)) in features.iter_mut().zip(self.physiological_fields()) {
            let value = value.trim();
            if value.is_empty() {
                return Err(InputError::missing(field));
            }
            *slot = value
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .ok_or_else(|| InputError::not_numeric(field))?;
        }
        Ok(features)
    }
}
