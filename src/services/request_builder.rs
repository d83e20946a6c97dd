use crate::models::{
    AbTestConfig, AbTestRequest, BannerRequest, CarouselRequest, Slide, TestType, Variant,
    VariantPayload, REQUEST_CATEGORY,
};

/// Where the variant content of a test request comes from.
#[derive(Debug, Clone, Copy)]
pub enum VariantSource<'a> {
    /// Manual form entry; the config's own fields are authoritative.
    Manual,
    /// A finalized AI-generated list. The list overrides the configured
    /// variant count and its first entry stands in for the primary message.
    Generated(&'a [Variant]),
}

/// Assemble the normalized outbound request. Pure: no side effects, no
/// network access, no reinterpretation of `scheduled_at` (it is an opaque,
/// already-normalized timestamp from the timezone collaborator).
///
/// The request shape discriminates strictly on the configured test type:
/// banner requests carry top-level creative fields and never slides, carousel
/// requests carry slides and never the top-level scalars.
pub fn build_request(config: &AbTestConfig, source: VariantSource) -> AbTestRequest {
    let (message, variant_count, variants) = match source {
        VariantSource::Manual => (config.message.clone(), config.variant_count, None),
        VariantSource::Generated(list) => (
            list.first().map(|v| v.message.clone()).unwrap_or_default(),
            list.len() as u32,
            Some(list.iter().map(VariantPayload::from).collect()),
        ),
    };

    let scheduled_at = config
        .scheduled_at
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    match config.test_type {
        TestType::Banner => AbTestRequest::Banner(BannerRequest {
            category: REQUEST_CATEGORY,
            test_type: TestType::Banner,
            brand: config.brand.clone(),
            message,
            style: config.style.clone(),
            dimensions: config.dimensions.clone(),
            project_id: config.project_id.clone(),
            variant_count,
            scheduled_at,
            variants,
        }),
        TestType::Carousel => AbTestRequest::Carousel(CarouselRequest {
            category: REQUEST_CATEGORY,
            test_type: TestType::Carousel,
            project_id: config.project_id.clone(),
            variant_count,
            slides: config.slides.clone(),
            scheduled_at,
            variants,
        }),
    }
}

/// Outcome of applying a free-form slides edit.
///
/// Live JSON editing must never corrupt committed state: a malformed payload
/// keeps the last valid value and reports why, instead of being swallowed.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideEdit {
    Accepted(Vec<Slide>),
    Rejected { kept: Vec<Slide>, reason: String },
}

impl SlideEdit {
    pub fn slides(&self) -> &[Slide] {
        match self {
            SlideEdit::Accepted(slides) => slides,
            SlideEdit::Rejected { kept, .. } => kept,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SlideEdit::Accepted(_) => None,
            SlideEdit::Rejected { reason, .. } => Some(reason),
        }
    }
}

/// Parse a raw slides edit against the previously committed value.
pub fn parse_slides(raw: &str, previous: &[Slide]) -> SlideEdit {
    match serde_json::from_str::<Vec<Slide>>(raw) {
        Ok(slides) => SlideEdit::Accepted(slides),
        Err(err) => SlideEdit::Rejected {
            kept: previous.to_vec(),
            reason: err.to_string(),
        },
    }
}
