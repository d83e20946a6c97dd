use serde::{Deserialize, Serialize};

use super::variant::VariantPayload;

/// Discriminator shared by every outbound test request.
pub const REQUEST_CATEGORY: &str = "visual_creation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Banner,
    Carousel,
}

/// One carousel slide. Every slide carries its own creative fields; nothing is
/// inherited from the top level of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub dimensions: String,
}

/// Form state for one test-creation flow. Owned by a single session and reset
/// to defaults after a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbTestConfig {
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub brand: String,
    pub message: String,
    pub style: String,
    pub dimensions: String,
    pub project_id: String,
    pub variant_count: u32,
    pub scheduled_at: Option<String>,
    pub slides: Vec<Slide>,
}

impl Default for AbTestConfig {
    fn default() -> Self {
        Self {
            test_type: TestType::Banner,
            brand: "VKU".to_string(),
            message: String::new(),
            style: "refreshing".to_string(),
            dimensions: "1200x630".to_string(),
            project_id: "proj200".to_string(),
            variant_count: 2,
            scheduled_at: None,
            slides: Vec::new(),
        }
    }
}

/// Normalized outbound request. Banner and carousel are separate shapes so a
/// banner request cannot carry slides and a carousel request cannot carry
/// top-level creative scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AbTestRequest {
    Banner(BannerRequest),
    Carousel(CarouselRequest),
}

impl AbTestRequest {
    pub fn test_type(&self) -> TestType {
        match self {
            AbTestRequest::Banner(_) => TestType::Banner,
            AbTestRequest::Carousel(_) => TestType::Carousel,
        }
    }

    pub fn project_id(&self) -> &str {
        match self {
            AbTestRequest::Banner(r) => &r.project_id,
            AbTestRequest::Carousel(r) => &r.project_id,
        }
    }

    pub fn variant_count(&self) -> u32 {
        match self {
            AbTestRequest::Banner(r) => r.variant_count,
            AbTestRequest::Carousel(r) => r.variant_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRequest {
    pub category: &'static str,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub brand: String,
    pub message: String,
    pub style: String,
    pub dimensions: String,
    pub project_id: String,
    pub variant_count: u32,
    // Absent means "start now"; never serialized as an empty string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantPayload>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselRequest {
    pub category: &'static str,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub project_id: String,
    pub variant_count: u32,
    pub slides: Vec<Slide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantPayload>>,
}
