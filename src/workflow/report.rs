use serde::Serialize;

use crate::remote::{EvaluationResult, FeatureImportance};

pub const HIGH_RISK_HEADLINE: &str = "Alto riesgo cardíaco detectado";
pub const LOW_RISK_HEADLINE: &str = "Bajo riesgo cardíaco";
pub const HIGH_RISK_ADVICE: &str =
    "Se recomienda consultar con un cardiólogo especialista de inmediato.";
pub const LOW_RISK_ADVICE: &str = "Los parámetros evaluados están dentro de rangos saludables.";

/// Presentation of one [`EvaluationResult`] for the result screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub at_risk: bool,
    pub percentage_label: String,
    pub percentage: u8,
    pub colour: &'static str,
    pub headline: &'static str,
    pub advice: &'static str,
    pub message: String,
    pub feature_importances: Vec<FeatureImportance>,
    pub can_compare: bool,
}

impl RiskReport {
    pub fn from_result(result: &EvaluationResult) -> Self {
        let percent = result.risk_probability * 100.0;
        let percentage_label = format!("{percent:.1}%");
        let percentage = percent.round().clamp(0.0, 100.0) as u8;
        let at_risk = result.is_at_risk();

        let mut feature_importances = result.feature_importances.clone().unwrap_or_default();
        feature_importances.sort_by(|left, right| right.weight.total_cmp(&left.weight));

        Self {
            at_risk,
            percentage_label,
            percentage,
            colour: colour_band(percentage),
            headline: if at_risk {
                HIGH_RISK_HEADLINE
            } else {
                LOW_RISK_HEADLINE
            },
            advice: if at_risk {
                HIGH_RISK_ADVICE
            } else {
                LOW_RISK_ADVICE
            },
            message: result.message.clone(),
            feature_importances,
            can_compare: result.comparison_parameters().is_some(),
        }
    }
}

pub fn colour_band(percentage: u8) -> &'static str {
    match percentage {
        0..30 => "#28a745",
        30..50 => "#5cb85c",
        50..70 => "#ffc107",
        70..85 => "#fd7e14",
        _ => "#dc3545",
    }
}

/// One-shot "register this patient" offer for anonymous users. It is armed by
/// a successful submit and only shown on the result screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationPrompt {
    #[default]
    Idle,
    Pending,
    Resolved,
}

impl RegistrationPrompt {
    pub fn arm(&mut self) {
        if *self == Self::Idle {
            *self = Self::Pending;
        }
    }

    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    pub fn resolve(&mut self) -> bool {
        let was_pending = self.is_pending();
        *self = Self::Resolved;
        was_pending
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
