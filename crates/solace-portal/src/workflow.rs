use std::collections::HashMap;
use std::sync::Arc;

use jiff::Timestamp;
use serde_json::json;
use uuid::Uuid;

use solace_core::collections;
use solace_core::models::assignment::{AssignmentStatus, AssignmentWithTest};
use solace_core::models::result::TestResult;
use solace_store::filter::Filter;
use solace_store::record::{Nested, RecordStore};

use crate::error::PortalError;
use crate::observer::WorkflowObserver;
use crate::render::TestView;

/// One selected option score value per question position. Transient; built
/// by the view layer for a single submit and discarded afterwards.
pub type AnswerSet = HashMap<u32, i64>;

/// Drives one assignment through its two-state lifecycle:
/// `assigned` → `completed`, transitioning only inside [`submit`] and only
/// after the result row was written.
///
/// Store calls are strictly sequential and never retried. The two writes in
/// [`submit`] are not transactional; a failure between them is surfaced as
/// [`PortalError::StatusUpdate`] so the caller knows a result row already
/// exists for an assignment that still reads as assigned.
///
/// [`submit`]: AssignmentWorkflow::submit
pub struct AssignmentWorkflow {
    store: Arc<dyn RecordStore>,
}

impl AssignmentWorkflow {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The composite shape of an assignment load: the test template with
    /// its questions and shared options.
    fn test_spec() -> Nested {
        Nested::all(collections::CUSTOM_TESTS)
            .with_child(Nested::all(collections::TEST_QUESTIONS))
            .with_child(Nested::all(collections::TEST_OPTIONS))
    }

    fn parse_reference(assignment_id: &str) -> Result<Uuid, PortalError> {
        if assignment_id.is_empty() {
            return Err(PortalError::InvalidReference);
        }
        assignment_id
            .parse()
            .map_err(|_| PortalError::InvalidReference)
    }

    async fn load_assignment(&self, id: Uuid) -> Result<AssignmentWithTest, PortalError> {
        let filter = Filter::new().eq("id", id.to_string());
        let row = self
            .store
            .fetch_composite(collections::ASSIGNMENTS, &filter, &[Self::test_spec()])
            .await
            .map_err(PortalError::from_read)?;

        serde_json::from_value(row)
            .map_err(|e| PortalError::Fetch(format!("malformed assignment record: {e}")))
    }

    /// Load an assignment and build its render model.
    pub async fn load(&self, assignment_id: &str) -> Result<TestView, PortalError> {
        let id = Self::parse_reference(assignment_id)?;
        let loaded = self.load_assignment(id).await?;
        Ok(TestView::from_test(&loaded.custom_tests))
    }

    /// Sum the selected score values. Pure and order-independent.
    ///
    /// All-or-nothing: the answer set must hold exactly one entry per
    /// question of the loaded test. Partial sets are rejected, never
    /// partially scored.
    pub fn compute_score(test: &TestView, answers: &AnswerSet) -> Result<i64, PortalError> {
        if answers.len() != test.questions.len() {
            return Err(PortalError::IncompleteAnswers);
        }

        let mut total: i64 = 0;
        for question in &test.questions {
            match answers.get(&question.position) {
                Some(score_value) => total += score_value,
                None => return Err(PortalError::IncompleteAnswers),
            }
        }
        Ok(total)
    }

    /// Score the answers, persist the result, and mark the assignment
    /// completed. Returns the total score.
    ///
    /// A completed assignment is rejected up front with
    /// [`PortalError::AlreadyCompleted`], so a result row can never be
    /// double-created through this workflow.
    pub async fn submit(
        &self,
        assignment_id: &str,
        answers: &AnswerSet,
    ) -> Result<i64, PortalError> {
        let id = Self::parse_reference(assignment_id)?;
        let loaded = self.load_assignment(id).await?;

        if loaded.assignment.status == AssignmentStatus::Completed {
            return Err(PortalError::AlreadyCompleted);
        }

        let view = TestView::from_test(&loaded.custom_tests);
        let total_score = Self::compute_score(&view, answers)?;

        let result = TestResult {
            id: Uuid::new_v4(),
            assignment_id: id,
            total_score,
            created_at: Timestamp::now(),
        };
        let record = serde_json::to_value(&result)
            .map_err(|e| PortalError::ResultWrite(e.to_string()))?;
        self.store
            .insert(collections::TEST_RESULTS, record)
            .await
            .map_err(|e| PortalError::ResultWrite(e.to_string()))?;

        let patch = json!({
            "status": AssignmentStatus::Completed,
            "completed_at": Timestamp::now(),
        });
        let filter = Filter::new().eq("id", id.to_string());
        self.store
            .update(collections::ASSIGNMENTS, &filter, patch)
            .await
            .map_err(|e| PortalError::StatusUpdate(e.to_string()))?;

        Ok(total_score)
    }

    /// [`load`](Self::load), additionally dispatching to the view-layer
    /// observer.
    pub async fn load_observed(
        &self,
        assignment_id: &str,
        observer: &dyn WorkflowObserver,
    ) -> Result<TestView, PortalError> {
        match self.load(assignment_id).await {
            Ok(view) => {
                observer.on_loaded(&view);
                Ok(view)
            }
            Err(error) => {
                observer.on_load_failed(&error);
                Err(error)
            }
        }
    }

    /// [`submit`](Self::submit), additionally dispatching to the view-layer
    /// observer.
    pub async fn submit_observed(
        &self,
        assignment_id: &str,
        answers: &AnswerSet,
        observer: &dyn WorkflowObserver,
    ) -> Result<i64, PortalError> {
        match self.submit(assignment_id, answers).await {
            Ok(total_score) => {
                observer.on_submitted(total_score);
                Ok(total_score)
            }
            Err(error) => {
                observer.on_submit_failed(&error);
                Err(error)
            }
        }
    }
}
