use thiserror::Error;

use crate::models::Variant;

#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("{0} already in flight")]
    InFlight(&'static str),
    #[error("no variant at index {0}")]
    BadIndex(usize),
    #[error("operation not allowed while {0}")]
    InvalidState(&'static str),
}

/// Lifecycle of one variant review cycle, as an explicit tagged state so that
/// illegal combinations (editing while submitting, two concurrent generations)
/// are unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// No variants held.
    Idle,
    /// A generation request is outstanding.
    Generating,
    /// A non-empty variant list is available for review.
    Ready(Vec<Variant>),
    /// One variant is open for modification; the rest of the list is untouched.
    Editing {
        list: Vec<Variant>,
        index: usize,
        draft: Variant,
    },
    /// A finalize request is outstanding.
    Submitting(Vec<Variant>),
}

impl WorkflowState {
    pub fn tag(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Generating => "generating",
            WorkflowState::Ready(_) => "ready",
            WorkflowState::Editing { .. } => "editing",
            WorkflowState::Submitting(_) => "submitting",
        }
    }
}

/// State machine driving AI-generated A/B-test variants through
/// generate -> review/edit -> delete -> submit.
///
/// Transitions are pure and synchronous. The two asynchronous operations
/// (generation, finalization) are split into begin/complete pairs so the
/// caller drives the network call outside the machine; while one is
/// outstanding every other trigger is rejected (single-flight).
#[derive(Debug, Default)]
pub struct VariantWorkflow {
    state: WorkflowState,
}

impl Default for WorkflowState {
    fn default() -> Self {
        WorkflowState::Idle
    }
}

impl VariantWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Variant list visible in the current state (empty while Idle/Generating).
    pub fn variants(&self) -> &[Variant] {
        match &self.state {
            WorkflowState::Ready(list)
            | WorkflowState::Editing { list, .. }
            | WorkflowState::Submitting(list) => list,
            WorkflowState::Idle | WorkflowState::Generating => &[],
        }
    }

    /// Start a generation cycle. From `Ready` this is a regenerate and it is
    /// destructive: the current list, including any saved edits, is discarded
    /// unconditionally. Callers that want to warn the user must do so before
    /// invoking this.
    ///
    /// A blank goal fails fast with a validation error and changes nothing;
    /// no request must be issued in that case.
    pub fn begin_generate(&mut self, goal: &str) -> Result<(), WorkflowError> {
        if goal.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "campaign goal must not be blank".to_string(),
            ));
        }

        match self.state {
            WorkflowState::Idle | WorkflowState::Ready(_) => {
                self.state = WorkflowState::Generating;
                Ok(())
            }
            WorkflowState::Generating => Err(WorkflowError::InFlight("generation")),
            WorkflowState::Submitting(_) => Err(WorkflowError::InFlight("submission")),
            WorkflowState::Editing { .. } => Err(WorkflowError::InvalidState("editing")),
        }
    }

    /// Resolve an outstanding generation with the produced list. An empty
    /// result counts as a failure: there is nothing to review, so the
    /// workflow returns to `Idle`.
    pub fn generation_succeeded(&mut self, list: Vec<Variant>) -> Result<usize, WorkflowError> {
        if !matches!(self.state, WorkflowState::Generating) {
            return Err(WorkflowError::InvalidState(self.state.tag()));
        }

        if list.is_empty() {
            self.state = WorkflowState::Idle;
            return Err(WorkflowError::Validation(
                "generator returned no variants".to_string(),
            ));
        }

        let produced = list.len();
        self.state = WorkflowState::Ready(list);
        Ok(produced)
    }

    /// Resolve an outstanding generation as failed. No prior list existed, so
    /// there is nothing to preserve and the workflow returns to `Idle`.
    pub fn generation_failed(&mut self) -> Result<(), WorkflowError> {
        if !matches!(self.state, WorkflowState::Generating) {
            return Err(WorkflowError::InvalidState(self.state.tag()));
        }
        self.state = WorkflowState::Idle;
        Ok(())
    }

    /// Open one variant for modification. The draft is a copy; the list stays
    /// untouched until `save_edit`. Only one variant may be open at a time.
    pub fn open_edit(&mut self, index: usize) -> Result<(), WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Ready(list) => match list.get(index) {
                Some(variant) => {
                    let draft = variant.clone();
                    self.state = WorkflowState::Editing { list, index, draft };
                    Ok(())
                }
                None => {
                    self.state = WorkflowState::Ready(list);
                    Err(WorkflowError::BadIndex(index))
                }
            },
            other => {
                let tag = other.tag();
                self.state = other;
                Err(WorkflowError::InvalidState(tag))
            }
        }
    }

    /// Apply a modification to the open draft. The committed list is not
    /// touched until `save_edit`.
    pub fn update_draft(
        &mut self,
        apply: impl FnOnce(&mut Variant),
    ) -> Result<(), WorkflowError> {
        match &mut self.state {
            WorkflowState::Editing { draft, .. } => {
                apply(draft);
                Ok(())
            }
            other => Err(WorkflowError::InvalidState(other.tag())),
        }
    }

    /// Commit the draft, replacing exactly the edited index. The replacement
    /// builds a fresh list rather than patching in place, so the pre-edit list
    /// is never aliased by the post-edit one.
    pub fn save_edit(&mut self) -> Result<(), WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Editing { list, index, draft } => {
                let next: Vec<Variant> = list
                    .iter()
                    .enumerate()
                    .map(|(i, v)| if i == index { draft.clone() } else { v.clone() })
                    .collect();
                self.state = WorkflowState::Ready(next);
                Ok(())
            }
            other => {
                let tag = other.tag();
                self.state = other;
                Err(WorkflowError::InvalidState(tag))
            }
        }
    }

    /// Discard the draft and return the list exactly as it was before
    /// `open_edit`.
    pub fn cancel_edit(&mut self) -> Result<(), WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Editing { list, .. } => {
                self.state = WorkflowState::Ready(list);
                Ok(())
            }
            other => {
                let tag = other.tag();
                self.state = other;
                Err(WorkflowError::InvalidState(tag))
            }
        }
    }

    /// Remove one variant. Remaining entries are reindexed contiguously; an
    /// emptied list drops the workflow back to `Idle`.
    pub fn delete(&mut self, index: usize) -> Result<(), WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Ready(list) => {
                if index >= list.len() {
                    self.state = WorkflowState::Ready(list);
                    return Err(WorkflowError::BadIndex(index));
                }
                let next: Vec<Variant> = list
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, v)| v.clone())
                    .collect();
                self.state = if next.is_empty() {
                    WorkflowState::Idle
                } else {
                    WorkflowState::Ready(next)
                };
                Ok(())
            }
            other => {
                let tag = other.tag();
                self.state = other;
                Err(WorkflowError::InvalidState(tag))
            }
        }
    }

    /// Start submitting the reviewed list. Returns a snapshot of the list for
    /// building the outbound request. An empty workflow fails fast with a
    /// validation error and issues no request.
    pub fn begin_finalize(&mut self) -> Result<Vec<Variant>, WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Ready(list) => {
                let snapshot = list.clone();
                self.state = WorkflowState::Submitting(list);
                Ok(snapshot)
            }
            WorkflowState::Idle => Err(WorkflowError::Validation(
                "no variants to submit".to_string(),
            )),
            WorkflowState::Generating => {
                self.state = WorkflowState::Generating;
                Err(WorkflowError::InFlight("generation"))
            }
            other @ WorkflowState::Submitting(_) => {
                self.state = other;
                Err(WorkflowError::InFlight("submission"))
            }
            other @ WorkflowState::Editing { .. } => {
                self.state = other;
                Err(WorkflowError::InvalidState("editing"))
            }
        }
    }

    /// Resolve an outstanding submission as accepted; the workflow resets for
    /// a fresh cycle. The owning config is reset by the caller.
    pub fn submission_succeeded(&mut self) -> Result<(), WorkflowError> {
        if !matches!(self.state, WorkflowState::Submitting(_)) {
            return Err(WorkflowError::InvalidState(self.state.tag()));
        }
        self.state = WorkflowState::Idle;
        Ok(())
    }

    /// Resolve an outstanding submission as failed. The list that was being
    /// submitted is preserved so the user can retry without regenerating.
    pub fn submission_failed(&mut self) -> Result<(), WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Submitting(list) => {
                self.state = WorkflowState::Ready(list);
                Ok(())
            }
            other => {
                let tag = other.tag();
                self.state = other;
                Err(WorkflowError::InvalidState(tag))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;

    fn variant(message: &str, strategy: Strategy) -> Variant {
        Variant {
            message: message.to_string(),
            strategy,
            tone: "friendly".to_string(),
            dimensions: None,
        }
    }

    fn three_variants() -> Vec<Variant> {
        vec![
            variant("Buy one get one", Strategy::Promotion),
            variant("Feel the difference", Strategy::Emotion),
            variant("Only this week", Strategy::Urgency),
        ]
    }

    fn ready_workflow() -> VariantWorkflow {
        let mut wf = VariantWorkflow::new();
        wf.begin_generate("launch the new menu").unwrap();
        wf.generation_succeeded(three_variants()).unwrap();
        wf
    }

    #[test]
    fn test_blank_goal_is_rejected_without_state_change() {
        let mut wf = VariantWorkflow::new();

        let err = wf.begin_generate("   ").unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert_eq!(wf.state().tag(), "idle");
    }

    #[test]
    fn test_generation_success_reaches_ready() {
        let wf = ready_workflow();
        assert_eq!(wf.state().tag(), "ready");
        assert_eq!(wf.variants().len(), 3);
    }

    #[test]
    fn test_generation_failure_returns_to_idle() {
        let mut wf = VariantWorkflow::new();
        wf.begin_generate("goal").unwrap();
        wf.generation_failed().unwrap();
        assert_eq!(wf.state().tag(), "idle");
    }

    #[test]
    fn test_empty_generation_result_counts_as_failure() {
        let mut wf = VariantWorkflow::new();
        wf.begin_generate("goal").unwrap();

        let err = wf.generation_succeeded(Vec::new()).unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert_eq!(wf.state().tag(), "idle");
    }

    #[test]
    fn test_generate_is_single_flight() {
        let mut wf = VariantWorkflow::new();
        wf.begin_generate("goal").unwrap();

        let err = wf.begin_generate("another goal").unwrap_err();
        assert_eq!(err, WorkflowError::InFlight("generation"));
        assert_eq!(wf.state().tag(), "generating");
    }

    #[test]
    fn test_regenerate_discards_current_list() {
        let mut wf = ready_workflow();
        wf.begin_generate("different goal").unwrap();
        assert_eq!(wf.state().tag(), "generating");
        assert!(wf.variants().is_empty());
    }

    #[test]
    fn test_open_edit_then_cancel_restores_original_list() {
        let mut wf = ready_workflow();
        let before = wf.variants().to_vec();

        wf.open_edit(1).unwrap();
        wf.update_draft(|d| d.message = "something else".to_string())
            .unwrap();
        wf.cancel_edit().unwrap();

        assert_eq!(wf.variants(), before.as_slice());
    }

    #[test]
    fn test_save_edit_replaces_only_the_edited_index() {
        let mut wf = ready_workflow();
        let before = wf.variants().to_vec();

        wf.open_edit(1).unwrap();
        wf.update_draft(|d| {
            d.message = "Feel the joy".to_string();
            d.strategy = Strategy::Benefit;
        })
        .unwrap();
        wf.save_edit().unwrap();

        let after = wf.variants();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].message, "Feel the joy");
        assert_eq!(after[1].strategy, Strategy::Benefit);
    }

    #[test]
    fn test_second_open_edit_is_rejected() {
        let mut wf = ready_workflow();
        wf.open_edit(0).unwrap();

        let err = wf.open_edit(1).unwrap_err();
        assert_eq!(err, WorkflowError::InvalidState("editing"));
        assert_eq!(wf.state().tag(), "editing");
    }

    #[test]
    fn test_open_edit_out_of_range() {
        let mut wf = ready_workflow();
        let err = wf.open_edit(7).unwrap_err();
        assert_eq!(err, WorkflowError::BadIndex(7));
        assert_eq!(wf.state().tag(), "ready");
    }

    #[test]
    fn test_delete_reindexes_contiguously() {
        let mut wf = ready_workflow();
        let before = wf.variants().to_vec();

        wf.delete(1).unwrap();

        let after = wf.variants();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[2]);
    }

    #[test]
    fn test_deleting_last_variant_returns_to_idle() {
        let mut wf = VariantWorkflow::new();
        wf.begin_generate("goal").unwrap();
        wf.generation_succeeded(vec![variant("only one", Strategy::Promotion)])
            .unwrap();

        wf.delete(0).unwrap();
        assert_eq!(wf.state().tag(), "idle");
    }

    #[test]
    fn test_finalize_from_idle_is_a_validation_error() {
        let mut wf = VariantWorkflow::new();
        let err = wf.begin_finalize().unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn test_finalize_is_single_flight() {
        let mut wf = ready_workflow();
        wf.begin_finalize().unwrap();

        let err = wf.begin_finalize().unwrap_err();
        assert_eq!(err, WorkflowError::InFlight("submission"));
        assert_eq!(wf.state().tag(), "submitting");
    }

    #[test]
    fn test_submission_success_resets_workflow() {
        let mut wf = ready_workflow();
        wf.begin_finalize().unwrap();
        wf.submission_succeeded().unwrap();
        assert_eq!(wf.state().tag(), "idle");
    }

    #[test]
    fn test_submission_failure_preserves_list_for_retry() {
        let mut wf = ready_workflow();
        let before = wf.variants().to_vec();

        wf.begin_finalize().unwrap();
        wf.submission_failed().unwrap();

        assert_eq!(wf.state().tag(), "ready");
        assert_eq!(wf.variants(), before.as_slice());

        // Retry goes through
        assert!(wf.begin_finalize().is_ok());
    }

    #[test]
    fn test_no_triggers_while_submitting() {
        let mut wf = ready_workflow();
        wf.begin_finalize().unwrap();

        assert_eq!(
            wf.begin_generate("goal").unwrap_err(),
            WorkflowError::InFlight("submission")
        );
        assert!(matches!(
            wf.open_edit(0).unwrap_err(),
            WorkflowError::InvalidState(_)
        ));
        assert!(matches!(
            wf.delete(0).unwrap_err(),
            WorkflowError::InvalidState(_)
        ));
    }
}
