use serde::{Deserialize, Serialize};
use ts_rs::TS;

use solace_core::models::test::CustomTest;

/// Immutable render model for a loaded test. The rendering layer (web page,
/// component tree, server-side template) consumes this; the workflow never
/// produces markup itself.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TestView {
    pub test_name: String,
    /// Questions in stored `position` order.
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionView {
    pub position: u32,
    pub question_text: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionView {
    pub option_text: String,
    pub score_value: i64,
}

impl TestView {
    pub fn from_test(test: &CustomTest) -> Self {
        // The option set is shared across every question of a test.
        let options: Vec<OptionView> = test
            .custom_test_options
            .iter()
            .map(|option| OptionView {
                option_text: option.option_text.clone(),
                score_value: option.score_value,
            })
            .collect();

        let mut questions: Vec<QuestionView> = test
            .custom_test_questions
            .iter()
            .map(|question| QuestionView {
                position: question.position,
                question_text: question.question_text.clone(),
                options: options.clone(),
            })
            .collect();
        questions.sort_by_key(|question| question.position);

        Self {
            test_name: test.test_name.clone(),
            questions,
        }
    }
}
