use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use solace_portal::error::PortalError;
use solace_portal::observer::WorkflowObserver;
use solace_portal::render::TestView;
use solace_portal::workflow::{AnswerSet, AssignmentWorkflow};
use solace_store::error::StoreError;
use solace_store::filter::Filter;
use solace_store::memory::MemoryStore;
use solace_store::record::{Nested, RecordId, RecordStore};

const ASSIGNMENT_ID: &str = "5f6f9f2e-98a1-4f6e-9d3e-0b1f6f2e98a1";
const TEST_ID: &str = "0b32c9e4-6a5a-4c57-8f0d-2f6f9f2e98a1";
const PATIENT_ID: &str = "7c1d2e3f-4a5b-6c7d-8e9f-0a1b2c3d4e5f";

fn relational_store() -> MemoryStore {
    MemoryStore::new()
        .belongs_to("custom_test_assignments", "test_id", "custom_tests")
        .has_many("custom_tests", "custom_test_questions", "test_id")
        .has_many("custom_tests", "custom_test_options", "test_id")
}

async fn seed_assignment(store: &MemoryStore, status: &str) {
    store
        .seed(
            "custom_test_assignments",
            vec![json!({
                "id": ASSIGNMENT_ID,
                "patient_id": PATIENT_ID,
                "test_id": TEST_ID,
                "status": status,
                "assigned_at": "2026-08-01T08:00:00Z",
                "completed_at": null,
            })],
        )
        .await;
    store
        .seed(
            "custom_tests",
            vec![json!({ "id": TEST_ID, "test_name": "Weekly Check-in" })],
        )
        .await;
    // Seeded out of display order on purpose.
    store
        .seed(
            "custom_test_questions",
            vec![
                json!({
                    "id": Uuid::new_v4(),
                    "test_id": TEST_ID,
                    "question_text": "How often did you feel rested?",
                    "position": 2,
                }),
                json!({
                    "id": Uuid::new_v4(),
                    "test_id": TEST_ID,
                    "question_text": "How often did you feel calm?",
                    "position": 1,
                }),
            ],
        )
        .await;
    store
        .seed(
            "custom_test_options",
            vec![
                json!({ "id": Uuid::new_v4(), "test_id": TEST_ID, "option_text": "Never", "score_value": 0 }),
                json!({ "id": Uuid::new_v4(), "test_id": TEST_ID, "option_text": "Rarely", "score_value": 1 }),
                json!({ "id": Uuid::new_v4(), "test_id": TEST_ID, "option_text": "Often", "score_value": 2 }),
                json!({ "id": Uuid::new_v4(), "test_id": TEST_ID, "option_text": "Always", "score_value": 3 }),
            ],
        )
        .await;
}

fn full_answers() -> AnswerSet {
    HashMap::from([(1, 2), (2, 3)])
}

#[tokio::test]
async fn load_returns_questions_in_stored_order() {
    let store = relational_store();
    seed_assignment(&store, "assigned").await;
    let workflow = AssignmentWorkflow::new(Arc::new(store));

    let view = workflow.load(ASSIGNMENT_ID).await.unwrap();

    assert_eq!(view.test_name, "Weekly Check-in");
    assert_eq!(view.questions.len(), 2);
    let positions: Vec<u32> = view.questions.iter().map(|q| q.position).collect();
    assert_eq!(positions, vec![1, 2]);
    assert!(view.questions.iter().all(|q| q.options.len() == 4));
}

#[tokio::test]
async fn load_rejects_empty_reference() {
    let workflow = AssignmentWorkflow::new(Arc::new(relational_store()));

    let err = workflow.load("").await.unwrap_err();
    assert!(matches!(err, PortalError::InvalidReference));
}

#[tokio::test]
async fn load_rejects_garbage_reference() {
    let workflow = AssignmentWorkflow::new(Arc::new(relational_store()));

    let err = workflow.load("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, PortalError::InvalidReference));
}

#[tokio::test]
async fn load_unknown_assignment_is_not_found() {
    let store = relational_store();
    seed_assignment(&store, "assigned").await;
    let workflow = AssignmentWorkflow::new(Arc::new(store));

    let err = workflow
        .load(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::NotFound));
}

#[tokio::test]
async fn submit_persists_result_and_completes_assignment() {
    let store = Arc::new(relational_store());
    seed_assignment(&store, "assigned").await;
    let workflow = AssignmentWorkflow::new(store.clone());

    let total = workflow
        .submit(ASSIGNMENT_ID, &full_answers())
        .await
        .unwrap();
    assert_eq!(total, 5);

    let result = store
        .fetch_one(
            "custom_test_results",
            &Filter::new().eq("assignment_id", ASSIGNMENT_ID),
        )
        .await
        .unwrap();
    assert_eq!(result["total_score"], json!(5));

    let assignment = store
        .fetch_one(
            "custom_test_assignments",
            &Filter::new().eq("id", ASSIGNMENT_ID),
        )
        .await
        .unwrap();
    assert_eq!(assignment["status"], json!("completed"));
    assert!(assignment["completed_at"].is_string());
}

#[tokio::test]
async fn submit_rejects_incomplete_answers_without_writing() {
    let store = Arc::new(relational_store());
    seed_assignment(&store, "assigned").await;
    let workflow = AssignmentWorkflow::new(store.clone());

    let err = workflow
        .submit(ASSIGNMENT_ID, &HashMap::from([(1, 2)]))
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::IncompleteAnswers));

    let results = store
        .fetch_all("custom_test_results", &Filter::new(), &[])
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn resubmitting_a_completed_assignment_is_rejected() {
    let store = Arc::new(relational_store());
    seed_assignment(&store, "assigned").await;
    let workflow = AssignmentWorkflow::new(store.clone());

    workflow
        .submit(ASSIGNMENT_ID, &full_answers())
        .await
        .unwrap();
    let err = workflow
        .submit(ASSIGNMENT_ID, &full_answers())
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::AlreadyCompleted));

    let results = store
        .fetch_all(
            "custom_test_results",
            &Filter::new().eq("assignment_id", ASSIGNMENT_ID),
            &[],
        )
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
}

/// Delegating store that can be told to fail its next update, simulating a
/// backend fault between the two submit writes.
struct FaultyStore {
    inner: MemoryStore,
    fail_updates: AtomicBool,
}

#[async_trait]
impl RecordStore for FaultyStore {
    async fn fetch_one(&self, collection: &str, filter: &Filter) -> Result<Value, StoreError> {
        self.inner.fetch_one(collection, filter).await
    }

    async fn fetch_all(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Vec<Value>, StoreError> {
        self.inner.fetch_all(collection, filter, nested).await
    }

    async fn fetch_composite(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Value, StoreError> {
        self.inner.fetch_composite(collection, filter, nested).await
    }

    async fn insert(&self, collection: &str, record: Value) -> Result<RecordId, StoreError> {
        self.inner.insert(collection, record).await
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Write("injected update failure".to_string()));
        }
        self.inner.update(collection, filter, patch).await
    }
}

#[tokio::test]
async fn status_update_failure_leaves_result_behind() {
    let inner = relational_store();
    seed_assignment(&inner, "assigned").await;
    let store = Arc::new(FaultyStore {
        inner,
        fail_updates: AtomicBool::new(true),
    });
    let workflow = AssignmentWorkflow::new(store.clone());

    let err = workflow
        .submit(ASSIGNMENT_ID, &full_answers())
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::StatusUpdate(_)));

    // The partial write is observable: a result row exists, but the
    // assignment still reads as assigned.
    let result = store
        .fetch_one(
            "custom_test_results",
            &Filter::new().eq("assignment_id", ASSIGNMENT_ID),
        )
        .await
        .unwrap();
    assert_eq!(result["total_score"], json!(5));

    let assignment = store
        .fetch_one(
            "custom_test_assignments",
            &Filter::new().eq("id", ASSIGNMENT_ID),
        )
        .await
        .unwrap();
    assert_eq!(assignment["status"], json!("assigned"));
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl WorkflowObserver for RecordingObserver {
    fn on_loaded(&self, view: &TestView) {
        self.events
            .lock()
            .unwrap()
            .push(format!("loaded:{}", view.test_name));
    }

    fn on_load_failed(&self, error: &PortalError) {
        self.events.lock().unwrap().push(format!("load_failed:{error}"));
    }

    fn on_submitted(&self, total_score: i64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("submitted:{total_score}"));
    }

    fn on_submit_failed(&self, error: &PortalError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("submit_failed:{error}"));
    }
}

#[tokio::test]
async fn observer_sees_load_and_submit_outcomes() {
    let store = Arc::new(relational_store());
    seed_assignment(&store, "assigned").await;
    let workflow = AssignmentWorkflow::new(store);
    let observer = RecordingObserver::default();

    workflow
        .load_observed(ASSIGNMENT_ID, &observer)
        .await
        .unwrap();
    workflow
        .submit_observed(ASSIGNMENT_ID, &full_answers(), &observer)
        .await
        .unwrap();
    let _ = workflow
        .submit_observed(ASSIGNMENT_ID, &full_answers(), &observer)
        .await;

    let events = observer.events.lock().unwrap();
    assert_eq!(events[0], "loaded:Weekly Check-in");
    assert_eq!(events[1], "submitted:5");
    assert!(events[2].starts_with("submit_failed:"));
}
