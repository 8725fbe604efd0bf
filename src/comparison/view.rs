use serde::Serialize;

use crate::remote::{ComparativeResult, EvaluationResult, ModelMetrics, ModelPrediction};

pub const METRIC_LABELS: [&str; 4] = ["Exactitud", "Precisión", "Sensibilidad", "F1-Score"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ModelKind {
    RandomForest,
    DecisionTree,
    Svm,
}

impl ModelKind {
    pub const ALL: [Self; 3] = [Self::RandomForest, Self::DecisionTree, Self::Svm];

    /// Key used by the service in `metricas_modelos`.
    pub fn key(self) -> &'static str {
        match self {
            Self::RandomForest => "random_forest",
            Self::DecisionTree => "decision_tree",
            Self::Svm => "svm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RandomForest => "Random Forest",
            Self::DecisionTree => "Árbol de Decisión",
            Self::Svm => "SVM",
        }
    }

    fn prediction(self, result: &ComparativeResult) -> Option<ModelPrediction> {
        match self {
            Self::RandomForest => result.random_forest,
            Self::DecisionTree => result.decision_tree,
            Self::Svm => result.svm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartPanel {
    Gauges,
    ProbabilityBars,
    Radar,
    MetricBars,
}

impl ChartPanel {
    pub const ALL: [Self; 4] = [
        Self::Gauges,
        Self::ProbabilityBars,
        Self::Radar,
        Self::MetricBars,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Gauges => "Gauges",
            Self::ProbabilityBars => "Barras",
            Self::Radar => "Radar",
            Self::MetricBars => "Métricas",
        }
    }

    pub fn shows_metrics(self) -> bool {
        matches!(self, Self::Radar | Self::MetricBars)
    }

    fn index(self) -> usize {
        match self {
            Self::Gauges => 0,
            Self::ProbabilityBars => 1,
            Self::Radar => 2,
            Self::MetricBars => 3,
        }
    }
}

/// Local toggle state. Everything starts visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelVisibility([bool; 4]);

impl Default for PanelVisibility {
    fn default() -> Self {
        Self([true; 4])
    }
}

impl PanelVisibility {
    pub fn is_visible(&self, panel: ChartPanel) -> bool {
        self.0[panel.index()]
    }

    pub fn toggle(&mut self, panel: ChartPanel) {
        let slot = &mut self.0[panel.index()];
        *slot = !*slot;
    }

    pub fn show_all(&mut self) {
        self.0 = [true; 4];
    }

    pub fn hide_all(&mut self) {
        self.0 = [false; 4];
    }

    pub fn all_visible(&self) -> bool {
        self.0.iter().all(|visible| *visible)
    }

    pub fn none_visible(&self) -> bool {
        self.0.iter().all(|visible| !*visible)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRow {
    pub model: ModelKind,
    pub label: &'static str,
    pub verdict: &'static str,
    pub probability_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gauge {
    pub model: ModelKind,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityBar {
    pub model: ModelKind,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSeries {
    pub model: ModelKind,
    pub values: [f64; 4],
}

/// Visible chart data. `None` means the panel is toggled off.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonPanels {
    pub gauges: Option<Vec<Gauge>>,
    pub probability_bars: Option<Vec<ProbabilityBar>>,
    pub radar: Option<Vec<MetricSeries>>,
    pub metric_bars: Option<Vec<MetricSeries>>,
}

/// Pure projection of one comparison and the evaluation it was asked for.
/// The only mutable state is which panels are shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeAnalysisView {
    result: ComparativeResult,
    evaluation: EvaluationResult,
    visibility: PanelVisibility,
}

impl ComparativeAnalysisView {
    pub fn new(result: ComparativeResult, evaluation: EvaluationResult) -> Self {
        Self {
            result,
            evaluation,
            visibility: PanelVisibility::default(),
        }
    }

    pub fn result(&self) -> &ComparativeResult {
        &self.result
    }

    pub fn evaluation(&self) -> &EvaluationResult {
        &self.evaluation
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn toggle(&mut self, panel: ChartPanel) {
        self.visibility.toggle(panel);
    }

    /// The "all/none" switch: hides everything when all panels are shown,
    /// otherwise shows everything.
    pub fn toggle_all(&mut self) {
        if self.visibility.all_visible() {
            self.visibility.hide_all();
        } else {
            self.visibility.show_all();
        }
    }

    pub fn show_all(&mut self) {
        self.visibility.show_all();
    }

    pub fn hide_all(&mut self) {
        self.visibility.hide_all();
    }

    /// Models that came back with a prediction, in fixed order.
    pub fn models(&self) -> Vec<(ModelKind, ModelPrediction)> {
        ModelKind::ALL
            .into_iter()
            .filter_map(|model| model.prediction(&self.result).map(|prediction| (model, prediction)))
            .collect()
    }

    pub fn metric_models(&self) -> Vec<(ModelKind, ModelMetrics)> {
        self.models()
            .into_iter()
            .filter_map(|(model, _)| {
                self.result
                    .model_metrics
                    .get(model.key())
                    .map(|metrics| (model, *metrics))
            })
            .collect()
    }

    pub fn table(&self) -> Vec<ModelRow> {
        self.models()
            .into_iter()
            .map(|(model, prediction)| ModelRow {
                model,
                label: model.label(),
                verdict: if prediction.prediction == 1 {
                    "Riesgo"
                } else {
                    "Sin riesgo"
                },
                probability_label: format!("{:.1}%", prediction.probability * 100.0),
            })
            .collect()
    }

    pub fn panels(&self) -> ComparisonPanels {
        let models = self.models();
        let metrics = self.metric_models();
        let series = || {
            metrics
                .iter()
                .map(|(model, metrics)| MetricSeries {
                    model: *model,
                    values: metrics.as_array(),
                })
                .collect::<Vec<_>>()
        };

        ComparisonPanels {
            gauges: self.visibility.is_visible(ChartPanel::Gauges).then(|| {
                models
                    .iter()
                    .map(|(model, prediction)| Gauge {
                        model: *model,
                        percent: (prediction.probability.clamp(0.0, 1.0) * 100.0).round() as u8,
                    })
                    .collect()
            }),
            probability_bars: self.visibility.is_visible(ChartPanel::ProbabilityBars).then(|| {
                models
                    .iter()
                    .map(|(model, prediction)| ProbabilityBar {
                        model: *model,
                        percent: (prediction.probability * 1000.0).round() / 10.0,
                    })
                    .collect()
            }),
            radar: self.visibility.is_visible(ChartPanel::Radar).then(series),
            metric_bars: self.visibility.is_visible(ChartPanel::MetricBars).then(series),
        }
    }
}
