use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::variant_provider::{GenerateVariantsRequest, VariantProvider};
use crate::models::{AbTestConfig, Strategy, TestType, Variant};
use crate::services::request_builder::{build_request, parse_slides, SlideEdit, VariantSource};
use crate::services::variant_workflow::{VariantWorkflow, WorkflowState};

/// One dashboard session's test-creation flow: the form config plus the
/// variant workflow. Exclusively owned by the session that created it.
#[derive(Debug)]
pub struct AbTestSession {
    pub id: Uuid,
    pub config: AbTestConfig,
    pub workflow: VariantWorkflow,
    pub slide_error: Option<String>,
}

impl AbTestSession {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            config: AbTestConfig::default(),
            workflow: VariantWorkflow::new(),
            slide_error: None,
        }
    }
}

/// In-memory session registry. Sessions are not persisted; they live for the
/// duration of the process only.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Arc<Mutex<AbTestSession>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> SessionSnapshot {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(AbTestSession::new(id)));
        let snapshot = snapshot(&session.lock());
        self.inner.insert(id, session);
        snapshot
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Mutex<AbTestSession>>, AppError> {
        self.inner
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(AppError::NotFound)
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner.remove(&id).map(|_| ()).ok_or(AppError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Wire snapshot of a session, including where the workflow currently stands.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: &'static str,
    pub variants: Vec<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<Variant>,
    pub config: AbTestConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_error: Option<String>,
}

pub fn snapshot(session: &AbTestSession) -> SessionSnapshot {
    let (editing_index, draft) = match session.workflow.state() {
        WorkflowState::Editing { index, draft, .. } => (Some(*index), Some(draft.clone())),
        _ => (None, None),
    };

    SessionSnapshot {
        session_id: session.id,
        state: session.workflow.state().tag(),
        variants: session.workflow.variants().to_vec(),
        editing_index,
        draft,
        config: session.config.clone(),
        slide_error: session.slide_error.clone(),
    }
}

/// Partial config update. Slides arrive as raw JSON text from a free-form
/// editor; a malformed value keeps the committed slides and reports the
/// parse error in the snapshot instead of failing the whole patch.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(rename = "type")]
    pub test_type: Option<TestType>,
    pub brand: Option<String>,
    pub message: Option<String>,
    pub style: Option<String>,
    pub dimensions: Option<String>,
    pub project_id: Option<String>,
    pub variant_count: Option<u32>,
    pub scheduled_at: Option<String>,
    pub slides_raw: Option<String>,
}

/// Partial edit applied to the currently open draft.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub message: Option<String>,
    pub strategy: Option<Strategy>,
    pub tone: Option<String>,
    pub dimensions: Option<String>,
}

impl DraftPatch {
    pub fn apply(self, draft: &mut Variant) {
        if let Some(message) = self.message {
            draft.message = message;
        }
        if let Some(strategy) = self.strategy {
            draft.strategy = strategy;
        }
        if let Some(tone) = self.tone {
            draft.tone = tone;
        }
        if let Some(dimensions) = self.dimensions {
            draft.dimensions = if dimensions.trim().is_empty() {
                None
            } else {
                Some(dimensions)
            };
        }
    }
}

pub fn apply_config_patch(
    store: &SessionStore,
    id: Uuid,
    patch: ConfigPatch,
) -> Result<SessionSnapshot, AppError> {
    let session = store.get(id)?;
    let mut session = session.lock();

    if let Some(count) = patch.variant_count {
        if count == 0 {
            return Err(AppError::Validation(
                "variant count must be positive".to_string(),
            ));
        }
        session.config.variant_count = count;
    }
    if let Some(test_type) = patch.test_type {
        session.config.test_type = test_type;
    }
    if let Some(brand) = patch.brand {
        session.config.brand = brand;
    }
    if let Some(message) = patch.message {
        session.config.message = message;
    }
    if let Some(style) = patch.style {
        session.config.style = style;
    }
    if let Some(dimensions) = patch.dimensions {
        session.config.dimensions = dimensions;
    }
    if let Some(project_id) = patch.project_id {
        session.config.project_id = project_id;
    }
    if let Some(scheduled_at) = patch.scheduled_at {
        // Blank means "clear the schedule"; the value itself is an opaque
        // normalized timestamp from the timezone collaborator
        session.config.scheduled_at = if scheduled_at.trim().is_empty() {
            None
        } else {
            Some(scheduled_at)
        };
    }
    if let Some(raw) = patch.slides_raw {
        match parse_slides(&raw, &session.config.slides) {
            SlideEdit::Accepted(slides) => {
                session.config.slides = slides;
                session.slide_error = None;
            }
            SlideEdit::Rejected { kept, reason } => {
                session.config.slides = kept;
                session.slide_error = Some(reason);
            }
        }
    }

    Ok(snapshot(&session))
}

/// Run a generation (or regeneration) cycle against the provider.
///
/// The session lock is released while the provider call is outstanding; the
/// workflow's `Generating` state is what rejects concurrent triggers.
pub async fn generate(
    store: &SessionStore,
    provider: &dyn VariantProvider,
    id: Uuid,
    goal: &str,
) -> Result<SessionSnapshot, AppError> {
    let session = store.get(id)?;

    let request = {
        let mut session = session.lock();
        session.workflow.begin_generate(goal)?;
        session.config.message = goal.to_string();
        GenerateVariantsRequest::from_config(&session.config, goal)
    };

    info!(session_id = %id, "generating variants");

    match provider.generate_variants(&request).await {
        Ok(list) => {
            let mut session = session.lock();
            let produced = session.workflow.generation_succeeded(list)?;
            info!(session_id = %id, produced, "variant generation complete");
            Ok(snapshot(&session))
        }
        Err(err) => {
            let mut session = session.lock();
            session.workflow.generation_failed()?;
            Err(AppError::from(err))
        }
    }
}

/// Submit the reviewed list as an A/B test. On success the workflow resets
/// and the config returns to defaults; on failure the list is preserved so
/// the user can retry.
pub async fn finalize(
    store: &SessionStore,
    provider: &dyn VariantProvider,
    id: Uuid,
) -> Result<SessionSnapshot, AppError> {
    let session = store.get(id)?;

    let request = {
        let mut session = session.lock();
        let list = session.workflow.begin_finalize()?;
        build_request(&session.config, VariantSource::Generated(&list))
    };

    info!(session_id = %id, variant_count = request.variant_count(), "submitting test");

    match provider.submit_test(&request).await {
        Ok(()) => {
            let mut session = session.lock();
            session.workflow.submission_succeeded()?;
            session.config = AbTestConfig::default();
            session.slide_error = None;
            info!(session_id = %id, "test submitted, session reset");
            Ok(snapshot(&session))
        }
        Err(err) => {
            let mut session = session.lock();
            session.workflow.submission_failed()?;
            Err(AppError::from(err))
        }
    }
}
