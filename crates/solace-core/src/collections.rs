//! Backend collection (table) name conventions.
//!
//! Pure constants — no backend dependency. These define the canonical
//! record collections the portal reads and writes.

pub const PATIENTS: &str = "patients";
pub const MOOD_LOGS: &str = "mood_logs";
pub const SLEEP_LOGS: &str = "sleep_logs";
pub const CUSTOM_TESTS: &str = "custom_tests";
pub const TEST_QUESTIONS: &str = "custom_test_questions";
pub const TEST_OPTIONS: &str = "custom_test_options";
pub const ASSIGNMENTS: &str = "custom_test_assignments";
pub const TEST_RESULTS: &str = "custom_test_results";
