use std::sync::Arc;

use crate::external::analytics_provider::AnalyticsProvider;
use crate::external::variant_provider::VariantProvider;
use crate::services::session_service::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<dyn AnalyticsProvider>,
    pub variants: Arc<dyn VariantProvider>,
    pub sessions: SessionStore,
}
