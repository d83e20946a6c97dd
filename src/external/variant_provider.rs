use async_trait::async_trait;
use serde::Serialize;

use super::ProviderError;
use crate::models::{AbTestConfig, AbTestRequest, TestType, Variant};

/// Generation request forwarded to the content generator. Carries the
/// campaign goal plus the creative context the generator conditions on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVariantsRequest {
    pub message: String,
    pub variant_count: u32,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub brand: String,
    pub style: String,
    pub dimensions: String,
}

impl GenerateVariantsRequest {
    pub fn from_config(config: &AbTestConfig, goal: &str) -> Self {
        Self {
            message: goal.to_string(),
            variant_count: config.variant_count,
            test_type: config.test_type,
            brand: config.brand.clone(),
            style: config.style.clone(),
            dimensions: config.dimensions.clone(),
        }
    }
}

/// Write-side collaborator: the automation webhook that generates variant
/// copy and launches submitted tests. Responses are opaque beyond
/// success/failure plus the generated variant list.
#[async_trait]
pub trait VariantProvider: Send + Sync {
    async fn generate_variants(
        &self,
        request: &GenerateVariantsRequest,
    ) -> Result<Vec<Variant>, ProviderError>;

    async fn submit_test(&self, request: &AbTestRequest) -> Result<(), ProviderError>;
}
