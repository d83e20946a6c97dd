use async_trait::async_trait;
use serde::Deserialize;

use super::variant_provider::{GenerateVariantsRequest, VariantProvider};
use super::ProviderError;
use crate::models::{AbTestRequest, Variant};

/// Reqwest client for the automation webhook that generates variant copy and
/// receives finalized test requests.
pub struct WebhookClient {
    client: reqwest::Client,
    base_url: String,
}

impl WebhookClient {
    pub fn from_env() -> Result<Self, ProviderError> {
        let base_url = std::env::var("WEBHOOK_URL")
            .map_err(|_| ProviderError::BadResponse("WEBHOOK_URL not set".into()))?;

        Ok(Self::new(base_url))
    }

    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedVariants {
    #[serde(default)]
    variants: Vec<Variant>,
}

#[async_trait]
impl VariantProvider for WebhookClient {
    async fn generate_variants(
        &self,
        request: &GenerateVariantsRequest,
    ) -> Result<Vec<Variant>, ProviderError> {
        let url = format!("{}/generate-ab-test-variants", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::BadResponse(format!(
                "variant generation returned {}",
                resp.status()
            )));
        }

        let body = resp
            .json::<GeneratedVariants>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(body.variants)
    }

    async fn submit_test(&self, request: &AbTestRequest) -> Result<(), ProviderError> {
        let url = format!("{}/forward-to-webhook", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::BadResponse(format!(
                "test submission returned {}",
                resp.status()
            )));
        }

        // Response body is an opaque acknowledgement; nothing in it is relied on
        Ok(())
    }
}
