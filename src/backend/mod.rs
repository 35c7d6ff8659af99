/// Port to the recommendation backend.
///
/// The backend is a black box reached over HTTP. The view controller only
/// depends on the [`Backend`] trait so tests can script responses and count
/// requests without a network.
pub mod http;
pub mod models;

use crate::error::ViewError;

pub use http::HttpBackend;
pub use models::{
    AnalyticsQuery, AnalyticsResponse, ChatRequest, ChatResponse, FilterOptions, KpiSummary,
    PlotSpec, PreviewRow, RecommendationItem,
};

/// Endpoint paths, relative to the backend base URL.
pub const FILTERS_PATH: &str = "/api/filters";
pub const RECOMMENDATIONS_PATH: &str = "/api/recommendations";
pub const CHAT_PATH: &str = "/api/chat";

/// The three calls the presentation layer makes.
pub trait Backend {
    /// `GET /api/filters`
    fn filters(&self) -> Result<FilterOptions, ViewError>;

    /// `POST /api/recommendations`
    fn recommendations(&self, query: &AnalyticsQuery) -> Result<AnalyticsResponse, ViewError>;

    /// `POST /api/chat`
    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ViewError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn filters(&self) -> Result<FilterOptions, ViewError> {
        (**self).filters()
    }

    fn recommendations(&self, query: &AnalyticsQuery) -> Result<AnalyticsResponse, ViewError> {
        (**self).recommendations(query)
    }

    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ViewError> {
        (**self).chat(request)
    }
}
