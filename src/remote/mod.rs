pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod ports;
pub mod types;

pub use client::ApiClient;
pub use envelope::{Envelope, normalize};
pub use error::{RemoteError, RemoteErrorKind};
pub use http::HttpTransport;
pub use ports::{ApiRequest, HttpMethod, RemoteDataPort, Transport};
pub use types::{
    ComparativeResult, DirectoryPage, EvaluationResult, FeatureImportance, ModelMetrics,
    ModelPrediction, ProfileUpdate, RecommendationQuery, Recommendations, RiskProfile,
    SpecialistEntity, SpecialistId,
};
