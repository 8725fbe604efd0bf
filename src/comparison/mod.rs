pub mod view;

pub use view::{
    ChartPanel, ComparativeAnalysisView, ComparisonPanels, Gauge, METRIC_LABELS, MetricSeries,
    ModelKind, ModelRow, PanelVisibility, ProbabilityBar,
};
