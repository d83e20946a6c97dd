mod abtest;
mod analytics;
mod trend;
mod variant;

pub use abtest::{
    AbTestConfig, AbTestRequest, BannerRequest, CarouselRequest, Slide, TestType,
    REQUEST_CATEGORY,
};
pub use analytics::{AnalyticsSummary, DashboardPayload, TopKeyword, TrendAnalytics};
pub use trend::{CategorySummary, ScorePoint, TrendRecord, VolumePoint, UNKNOWN_CATEGORY};
pub use variant::{Strategy, Variant, VariantPayload};
